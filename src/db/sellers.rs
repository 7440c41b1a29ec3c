//! Seller entry persistence and queries.

use crate::error::DatabaseError;
use crate::types::{AdsTxtRecord, RunId, SellerEntry};
use crate::{Error, Result};
use chrono::NaiveDate;

use super::{Database, SellerEntryRow};

impl Database {
    /// Persist one site's parsed records as seller entries
    ///
    /// All entries are stamped with the ingestion date and the owning run,
    /// and inserted in a single transaction so a storage failure never leaves
    /// a partial batch behind. Returns the number of entries inserted.
    pub async fn insert_seller_entries(
        &self,
        run_id: &RunId,
        date: NaiveDate,
        site: &str,
        records: &[AdsTxtRecord],
    ) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to begin seller entry transaction: {}",
                e
            )))
        })?;

        let date = date.to_string();
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO seller_entries (
                    site, ssp_domain_name, publisher_id, relationship, tag_id, date, run_id
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(site)
            .bind(&record.ssp_domain_name)
            .bind(&record.publisher_id)
            .bind(&record.relationship)
            .bind(&record.tag_id)
            .bind(&date)
            .bind(run_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to insert seller entry for {}: {}",
                    site, e
                )))
            })?;
        }

        tx.commit().await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to commit seller entries for {}: {}",
                site, e
            )))
        })?;

        Ok(records.len() as u64)
    }

    /// List all seller entries for a publisher domain
    ///
    /// Most recently ingested first.
    pub async fn list_sellers(&self, site: &str) -> Result<Vec<SellerEntry>> {
        let rows = sqlx::query_as::<_, SellerEntryRow>(
            r#"
            SELECT id, site, ssp_domain_name, publisher_id, relationship, tag_id, date, run_id
            FROM seller_entries
            WHERE site = ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(site)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list sellers for {}: {}",
                site, e
            )))
        })?;

        Ok(rows.into_iter().map(SellerEntry::from).collect())
    }

    /// Count seller entries owned by a run
    pub async fn count_entries_for_run(&self, run_id: &RunId) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM seller_entries WHERE run_id = ?")
            .bind(run_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to count entries for run {}: {}",
                    run_id, e
                )))
            })
    }

    /// Delete seller entries ingested before the given date
    ///
    /// Returns the number of entries deleted.
    pub async fn delete_seller_entries_before(&self, date: NaiveDate) -> Result<u64> {
        let result = sqlx::query("DELETE FROM seller_entries WHERE date < ?")
            .bind(date.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to delete old seller entries: {}",
                    e
                )))
            })?;

        Ok(result.rows_affected())
    }
}
