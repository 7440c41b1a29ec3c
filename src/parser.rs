//! ads.txt parsing
//!
//! Turns raw ads.txt text into a lazy sequence of [`AdsTxtRecord`]s. The
//! format is line-oriented and comma-delimited: three required fields
//! (advertising system domain, publisher account ID, relationship) and an
//! optional fourth certification authority ID. Blank lines and `#` comments
//! are skipped, and malformed lines are logged and skipped without aborting
//! the rest of the file.

use crate::types::AdsTxtRecord;
use tracing::warn;

/// Parse raw ads.txt text into a lazy record sequence
///
/// The returned iterator borrows `content` and yields one record per
/// well-formed line. It performs no network or storage side effects.
///
/// # Example
///
/// ```
/// use adstxt_crawler::parser::parse_ads_txt;
///
/// let content = "# sellers\nssp.example, pub-1, DIRECT\n";
/// let records: Vec<_> = parse_ads_txt(content).collect();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].ssp_domain_name, "ssp.example");
/// ```
pub fn parse_ads_txt(content: &str) -> AdsTxtRecords<'_> {
    AdsTxtRecords {
        lines: content.lines(),
        skipped_lines: 0,
    }
}

/// Lazy iterator over the records of one ads.txt file
///
/// Non-restartable: once exhausted it stays exhausted. After exhaustion,
/// [`skipped_lines`](AdsTxtRecords::skipped_lines) reports how many
/// malformed lines were dropped (comments and blank lines do not count).
pub struct AdsTxtRecords<'a> {
    lines: std::str::Lines<'a>,
    skipped_lines: u64,
}

impl AdsTxtRecords<'_> {
    /// Number of malformed lines skipped so far
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }
}

impl Iterator for AdsTxtRecords<'_> {
    type Item = AdsTxtRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let trimmed = line.trim();
            // Comment convention of the ads.txt format
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_line(trimmed) {
                Some(record) => return Some(record),
                None => {
                    self.skipped_lines += 1;
                    warn!(line = %line, "Skipping malformed ads.txt line");
                }
            }
        }
        None
    }
}

/// Parse a single non-blank, non-comment line
///
/// Requires at least three non-empty comma-separated fields; a fourth field,
/// if present and non-empty, becomes the tag ID. Fields past the fourth are
/// ignored. Surrounding whitespace is trimmed from every field.
fn parse_line(line: &str) -> Option<AdsTxtRecord> {
    let mut fields = line.split(',');

    let ssp_domain_name = fields.next()?.trim();
    let publisher_id = fields.next()?.trim();
    let relationship = fields.next()?.trim();
    if ssp_domain_name.is_empty() || publisher_id.is_empty() || relationship.is_empty() {
        return None;
    }

    let tag_id = fields
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    Some(AdsTxtRecord {
        ssp_domain_name: ssp_domain_name.to_string(),
        publisher_id: publisher_id.to_string(),
        relationship: relationship.to_string(),
        tag_id,
    })
}
