mod migrations;
mod sellers;

use super::Database;
use tempfile::NamedTempFile;

/// Helper to create a fresh on-disk test database
async fn create_test_db() -> (Database, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();
    (db, temp_file)
}
