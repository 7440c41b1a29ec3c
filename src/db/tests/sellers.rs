use super::create_test_db;
use crate::types::AdsTxtRecord;
use chrono::{NaiveDate, Utc};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn record(ssp: &str, publisher: &str) -> AdsTxtRecord {
    AdsTxtRecord {
        ssp_domain_name: ssp.to_string(),
        publisher_id: publisher.to_string(),
        relationship: "DIRECT".to_string(),
        tag_id: None,
    }
}

#[tokio::test]
async fn test_insert_and_list_sellers() {
    let (db, _file) = create_test_db().await;

    let today = Utc::now().date_naive();
    let run_id = db.create_scheduled_run(today).await.unwrap();

    let records = vec![
        record("google.com", "pub-1"),
        AdsTxtRecord {
            tag_id: Some("f08c47fec0942fa0".to_string()),
            ..record("rubicon.com", "11111")
        },
    ];
    let inserted = db
        .insert_seller_entries(&run_id, today, "example.com", &records)
        .await
        .unwrap();
    assert_eq!(inserted, 2);

    let sellers = db.list_sellers("example.com").await.unwrap();
    assert_eq!(sellers.len(), 2);
    assert!(sellers.iter().all(|s| s.site == "example.com"));
    assert!(sellers.iter().all(|s| s.run_id == run_id));
    assert!(sellers.iter().all(|s| s.date == today));

    let tagged = sellers
        .iter()
        .find(|s| s.ssp_domain_name == "rubicon.com")
        .unwrap();
    assert_eq!(tagged.tag_id.as_deref(), Some("f08c47fec0942fa0"));

    db.close().await;
}

#[tokio::test]
async fn test_list_sellers_unknown_site_is_empty() {
    let (db, _file) = create_test_db().await;
    let sellers = db.list_sellers("unknown.example").await.unwrap();
    assert!(sellers.is_empty());
    db.close().await;
}

#[tokio::test]
async fn test_insert_empty_batch_is_noop() {
    let (db, _file) = create_test_db().await;

    let today = Utc::now().date_naive();
    let run_id = db.create_scheduled_run(today).await.unwrap();
    let inserted = db
        .insert_seller_entries(&run_id, today, "example.com", &[])
        .await
        .unwrap();
    assert_eq!(inserted, 0);

    db.close().await;
}

#[tokio::test]
async fn test_entries_scoped_to_site() {
    let (db, _file) = create_test_db().await;

    let today = Utc::now().date_naive();
    let run_id = db.create_scheduled_run(today).await.unwrap();

    db.insert_seller_entries(&run_id, today, "a.example", &[record("ssp.com", "1")])
        .await
        .unwrap();
    db.insert_seller_entries(&run_id, today, "b.example", &[record("ssp.com", "2")])
        .await
        .unwrap();

    let a = db.list_sellers("a.example").await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].publisher_id, "1");

    assert_eq!(db.count_entries_for_run(&run_id).await.unwrap(), 2);

    db.close().await;
}

#[tokio::test]
async fn test_delete_seller_entries_before() {
    let (db, _file) = create_test_db().await;

    let run_id = db
        .create_scheduled_run(date("2026-08-26"))
        .await
        .unwrap();

    db.insert_seller_entries(
        &run_id,
        date("2026-08-20"),
        "old.example",
        &[record("ssp.com", "1")],
    )
    .await
    .unwrap();
    db.insert_seller_entries(
        &run_id,
        date("2026-08-26"),
        "new.example",
        &[record("ssp.com", "2")],
    )
    .await
    .unwrap();

    let deleted = db
        .delete_seller_entries_before(date("2026-08-25"))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    assert!(db.list_sellers("old.example").await.unwrap().is_empty());
    assert_eq!(db.list_sellers("new.example").await.unwrap().len(), 1);

    db.close().await;
}
