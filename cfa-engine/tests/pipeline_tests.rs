//! End-to-end tests: CSV file on disk -> tier policy -> analysis -> report

use cfa_engine::ingest::{ingest_file, IngestError, InputOrder, DEFAULT_MAX_UPLOAD_BYTES};
use cfa_engine::report::{Report, ReportSettings};
use cfa_engine::{analyze, AccountStatus, AccountUsage, SubscriptionPlan, TierPolicy};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// `count` rows, oldest first; the last `recent_complaints` rows are 1-star
fn upload(count: usize, recent_complaints: usize) -> String {
    let mut csv = String::from("date,rating,review_text\n");
    for i in 0..count {
        let (rating, text) = if i >= count - recent_complaints {
            (1, "slow and expensive")
        } else {
            (5, "caring and knowledgeable team")
        };
        writeln!(csv, "2024-01-{:02},{},{}", i % 28 + 1, rating, text).unwrap();
    }
    csv
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

#[test]
fn test_trial_account_analyzes_most_recent_fifty() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "reviews.csv", &upload(60, 5));

    let ingested = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
    assert_eq!(ingested.imported(), 60);

    let status = AccountStatus::resolve(&AccountUsage {
        trial_limit: 3,
        ..AccountUsage::default()
    });
    let cap = TierPolicy::default().analysis_cap(&status);
    assert_eq!(cap, Some(50));

    let feed = ingested.into_feed(InputOrder::OldestFirst);
    let analysis = analyze(&feed, cap);

    assert_eq!(analysis.total_reviews, 50);
    assert_eq!(analysis.available_reviews(), 60);
    // the five newest rows are the complaints, so they lead the feed
    assert_eq!(analysis.top_complaints.len(), 5);
    assert_eq!(analysis.mentions("Responsiveness"), 5);
    assert_eq!(analysis.mentions("Compassion"), 45);
    assert_eq!(analysis.avg_rating, 4.6);

    let report = Report::build(&analysis, &status, &ReportSettings::default(), report_date());
    assert!(report.limited);
    assert_eq!(report.total_reviews, 50);
    assert_eq!(report.available_reviews, 60);
}

#[test]
fn test_subscription_account_analyzes_everything() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "reviews.csv", &upload(60, 5));

    let status = AccountStatus::resolve(&AccountUsage {
        subscription: Some(SubscriptionPlan::Monthly),
        ..AccountUsage::default()
    });
    let cap = TierPolicy::default().analysis_cap(&status);
    let feed = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap()
        .into_feed(InputOrder::OldestFirst);
    let analysis = analyze(&feed, cap);

    assert_eq!(analysis.total_reviews, 60);
    assert!(!analysis.is_capped());

    let report = Report::build(&analysis, &status, &ReportSettings::default(), report_date());
    assert!(!report.limited);
    assert_eq!(report.account_status, "Unlimited (Monthly Subscription)");
    assert_eq!(report.praise.len(), 5);
}

#[test]
fn test_oversized_upload_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "reviews.csv", &upload(20, 0));

    let err = ingest_file(&path, 64).unwrap_err();
    assert!(matches!(err, IngestError::TooLarge { limit: 64, .. }));
}

#[test]
fn test_non_csv_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "reviews.txt", &upload(2, 0));

    let err = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}

#[test]
fn test_uppercase_extension_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "REVIEWS.CSV", &upload(3, 1));
    assert_eq!(ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap().imported(), 3);
}

#[test]
fn test_invalid_utf8_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(&path, b"date,rating,review_text\n2024-01-01,5,caf\xe9\n").unwrap();

    let err = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
    assert!(matches!(err, IngestError::Encoding(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ingest_file(&dir.path().join("absent.csv"), DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}

#[test]
fn test_markup_is_stripped_before_theme_detection() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "reviews.csv",
        "date,rating,review_text\n2024-01-01,5,\"<b>Very</b> <i>responsive</i>\"\n",
    );

    let feed = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap()
        .into_feed(InputOrder::NewestFirst);
    assert_eq!(feed[0].review_text(), "Very responsive");
    assert_eq!(analyze(&feed, None).mentions("Communication"), 1);
}

#[test]
fn test_annual_report_plans_every_ranked_theme() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "reviews.csv", &upload(10, 4));

    let status = AccountStatus::resolve(&AccountUsage {
        subscription: Some(SubscriptionPlan::Annual),
        ..AccountUsage::default()
    });
    let feed = ingest_file(&path, DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap()
        .into_feed(InputOrder::OldestFirst);
    let analysis = analyze(&feed, TierPolicy::default().analysis_cap(&status));
    let report = Report::build(&analysis, &status, &ReportSettings::default(), report_date());

    // caring/knowledgeable/team rows and slow/expensive rows hit five themes
    assert_eq!(report.themes.len(), 5);
    assert_eq!(report.plans.len(), 5);
    assert!(!report.upgrade_cta);
    assert_eq!(report.plans[0].theme, report.themes[0].name);
    assert!(report.plans.iter().all(|p| p.initiatives.len() == 5));
}
