use chrono::{TimeZone, Utc};
use sea_orm::Database;

use engine::{Donor, Engine, EngineError, GENERAL_FUND, NewDonation};
use migration::MigratorTrait;

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().unwrap();
    for (id, name) in [("donor-1", "Ada Lovelace"), ("donor-2", ""), ("donor-3", "Idle")] {
        engine
            .new_donor(&Donor::new(id, name, &format!("{id}@example.org")))
            .await
            .unwrap();
    }
    engine
}

#[tokio::test]
async fn receipt_for_stored_donation() {
    let engine = engine().await;
    let received_at = Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap();
    let mut donation = NewDonation::new("donor-1", "120.495")
        .id("gift-1")
        .received_at(received_at);
    donation.method = Some("credit card".to_string());
    donation.restricted = true;
    engine.new_donation(donation).await.unwrap();

    let receipt = engine.donation_receipt("gift-1").await.unwrap();
    assert_eq!(receipt.receipt_id, "RCPT-gift-1");
    assert_eq!(receipt.donor_name, "Ada Lovelace");
    assert_eq!(receipt.email, "donor-1@example.org");
    assert_eq!(receipt.amount.to_string(), "120.50");
    assert_eq!(receipt.designation, GENERAL_FUND);
    assert_eq!(receipt.payment_method, "Credit Card");
    assert!(receipt.restricted);
    assert_eq!(receipt.line_items.len(), 1);
    assert_eq!(receipt.line_items[0].amount, 120.5);

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["donation_date"], "2024-05-04");
}

#[tokio::test]
async fn receipt_for_unknown_donation() {
    let engine = engine().await;

    assert_eq!(
        engine.donation_receipt("missing").await.unwrap_err(),
        EngineError::KeyNotFound("missing".to_string())
    );
    assert!(matches!(
        engine.donation_receipt("../etc").await.unwrap_err(),
        EngineError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn year_end_statements_cover_donors_with_gifts() {
    let engine = engine().await;
    let in_year = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
    let before = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();

    for (donor, amount, received_at) in [
        ("donor-2", "10", in_year),
        ("donor-1", "5", in_year),
        ("donor-1", "7.5", in_year),
        ("donor-3", "99", before),
    ] {
        engine
            .new_donation(NewDonation::new(donor, amount).received_at(received_at))
            .await
            .unwrap();
    }

    let statements = engine.year_end_statements(2024).await.unwrap();
    let ids: Vec<_> = statements.iter().map(|s| s.statement_id.as_str()).collect();
    assert_eq!(ids, vec!["YEAR-2024-donor-1", "YEAR-2024-donor-2"]);
    assert_eq!(statements[0].total.to_string(), "12.50");
    assert_eq!(statements[0].donation_count, 2);
    assert_eq!(statements[1].donor_name, "Donor");

    assert!(engine.year_end_statements(2022).await.unwrap().is_empty());
}
