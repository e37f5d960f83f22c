#![forbid(unsafe_code)]
use chrono::NaiveDate;
use rosterwatch::{checksum, io, SnapshotStore, ShiftCalendar, DEFAULT_LOOKBACK_DAYS};
use std::fs;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
Date,Alice,Bob
01/01/2018,Day,Night
02/01/2018,Off,Day8
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn load_roster_from_csv_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(&path, SAMPLE_CSV).unwrap();

    let roster = io::load_roster_csv(&path, ShiftCalendar::default()).unwrap();
    assert_eq!(roster.headers(), ["Alice", "Bob"]);
    assert_eq!(roster.day("01/01/2018").unwrap()["Bob"], "Night");
}

#[test]
fn roster_roundtrips_through_csv_export() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("roster.csv");
    fs::write(&src, SAMPLE_CSV).unwrap();

    let mut roster = io::load_roster_csv(&src, ShiftCalendar::default()).unwrap();
    roster.add_member("Carol", Some("Morning"));

    let out = dir.path().join("edited.csv");
    io::export_roster_csv(&out, &roster).unwrap();

    let reloaded = io::load_roster_csv(&out, ShiftCalendar::default()).unwrap();
    assert_eq!(reloaded.headers(), roster.headers());
    assert_eq!(
        reloaded.day("02/01/2018").unwrap(),
        roster.day("02/01/2018").unwrap()
    );
}

#[test]
fn export_member_period_csv() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("roster.csv");
    fs::write(&src, SAMPLE_CSV).unwrap();

    let roster = io::load_roster_csv(&src, ShiftCalendar::default()).unwrap();
    let period = roster
        .member_period("Alice", "01/01/2018", "14/01/2018")
        .unwrap();

    let out = dir.path().join("alice.csv");
    io::export_period_csv(&out, &period).unwrap();
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("date,shift"));
    assert!(written.contains("01/01/2018,Day"));
}

#[test]
fn snapshot_store_finds_the_previous_file() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("downloaded"), "roster", "csv");

    let monday = ymd(2018, 1, 1);
    let thursday = ymd(2018, 1, 4);
    store.write(monday, SAMPLE_CSV.as_bytes()).unwrap();
    let latest = store.write(thursday, b"changed").unwrap();
    assert!(latest.ends_with("roster20180104.csv"));

    let previous = store
        .latest_before(thursday, DEFAULT_LOOKBACK_DAYS)
        .unwrap();
    assert!(previous.ends_with("roster20180101.csv"));

    // Rien avant le premier snapshot.
    assert!(store.latest_before(monday, DEFAULT_LOOKBACK_DAYS).is_none());
    // Fenêtre trop courte : pas trouvé non plus.
    assert!(store.latest_before(thursday, 2).is_none());
}

#[test]
fn checksum_detects_identical_content() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    let c = dir.path().join("c.csv");
    fs::write(&a, SAMPLE_CSV).unwrap();
    fs::write(&b, SAMPLE_CSV).unwrap();
    fs::write(&c, "Date,Alice\n01/01/2018,Night\n").unwrap();

    assert_eq!(
        checksum::file_checksum(&a).unwrap(),
        checksum::file_checksum(&b).unwrap()
    );
    assert!(checksum::files_match(&a, &b).unwrap());
    assert!(!checksum::files_match(&a, &c).unwrap());
}
