#![forbid(unsafe_code)]
use chrono::NaiveDate;
use rosterwatch::notification::{prepare_notice, HtmlTable, NoticeRenderer, PlainText};
use rosterwatch::{diff_member_period, RosterTable, ShiftCalendar};

fn table(rows: &[&[&str]]) -> RosterTable {
    let grid: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    RosterTable::from_grid(&grid, ShiftCalendar::default()).unwrap()
}

fn base_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Date", "Alice", "Bob"],
        vec!["01/01/2018", "Day", "Night"],
        vec!["02/01/2018", "Off", "Day8"],
        vec!["03/01/2018", "Night", "Off"],
    ]
}

fn table_from(rows: &[Vec<&str>]) -> RosterTable {
    let slices: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
    table(&slices)
}

#[test]
fn identical_snapshots_are_unchanged() {
    let current = table_from(&base_rows());
    let previous = table_from(&base_rows());
    let diff =
        diff_member_period(&current, &previous, "Alice", "01/01/2018", "03/01/2018").unwrap();
    assert!(diff.is_unchanged());
    assert!(diff.rows().is_empty());
}

#[test]
fn single_label_change_yields_one_changed_row() {
    let mut rows = base_rows();
    rows[2][1] = "Night"; // Alice, 02/01 : Off -> Night
    let current = table_from(&rows);
    let previous = table_from(&base_rows());

    let diff =
        diff_member_period(&current, &previous, "Alice", "01/01/2018", "03/01/2018").unwrap();
    let rows = diff.rows();
    // Une ligne par date de la période, une seule marquée changée.
    assert_eq!(rows.len(), 3);
    let changed: Vec<_> = rows.iter().filter(|r| r.is_change()).collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].date_key, "02/01/2018");
    assert_eq!(changed[0].previous.as_deref(), Some("Off"));
    assert_eq!(changed[0].current.as_deref(), Some("Night"));

    // Ordre chronologique.
    for pair in rows.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn shorter_previous_history_is_tolerated() {
    let current = table_from(&base_rows());
    // Le snapshot précédent n'a pas encore le 03/01.
    let previous = table_from(&base_rows()[..3].to_vec());

    let diff = diff_member_period(&current, &previous, "Bob", "01/01/2018", "03/01/2018").unwrap();
    let rows = diff.rows();
    assert_eq!(rows.len(), 3);
    let last = rows.last().unwrap();
    assert_eq!(last.date_key, "03/01/2018");
    assert_eq!(last.previous, None);
    assert_eq!(last.current.as_deref(), Some("Off"));
}

#[test]
fn changes_outside_the_period_are_invisible() {
    let mut rows = base_rows();
    rows[3][2] = "Grave"; // Bob, 03/01 : hors période interrogée
    let current = table_from(&rows);
    let previous = table_from(&base_rows());

    let diff = diff_member_period(&current, &previous, "Bob", "01/01/2018", "02/01/2018").unwrap();
    assert!(diff.is_unchanged());
}

#[test]
fn html_notice_contains_the_change_table() {
    let mut rows = base_rows();
    rows[1][2] = "Day"; // Bob, 01/01 : Night -> Day
    let current = table_from(&rows);
    let previous = table_from(&base_rows());

    let diff = diff_member_period(&current, &previous, "Bob", "01/01/2018", "03/01/2018").unwrap();
    let today = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    let notice = prepare_notice(
        "Bob",
        "bob@example.com",
        &diff,
        Some("https://www.example.com/example_roster.xlsx"),
        today,
        &HtmlTable,
    )
    .unwrap();

    assert_eq!(notice.subject, "Latest Roster 20180101");
    assert_eq!(notice.recipient, "bob@example.com");
    assert!(notice.body.starts_with("Hey, Bob!"));
    assert!(notice
        .body
        .contains("<tr><td>01/01/2018</td><td>Night</td><td>Day</td></tr>"));
    assert!(notice
        .body
        .contains("<a href='https://www.example.com/example_roster.xlsx'>"));
}

#[test]
fn notice_refuses_an_unchanged_diff() {
    let current = table_from(&base_rows());
    let previous = table_from(&base_rows());
    let diff =
        diff_member_period(&current, &previous, "Alice", "01/01/2018", "03/01/2018").unwrap();
    let today = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    assert!(prepare_notice("Alice", "a@example.com", &diff, None, today, &HtmlTable).is_err());
}

#[test]
fn plain_text_render() {
    let mut rows = base_rows();
    rows[1][1] = "Morning"; // Alice, 01/01 : Day -> Morning
    let current = table_from(&rows);
    let previous = table_from(&base_rows());

    let diff =
        diff_member_period(&current, &previous, "Alice", "01/01/2018", "02/01/2018").unwrap();
    let out = PlainText.render(diff.rows());
    insta::assert_snapshot!(out, @r###"
    Date       | Previous | New
    01/01/2018 | Day | Morning
    02/01/2018 | Off | Off
    "###);
}

#[test]
fn unknown_member_fails_loudly() {
    let current = table_from(&base_rows());
    let previous = table_from(&base_rows());
    assert!(matches!(
        diff_member_period(&current, &previous, "Mallory", "01/01/2018", "03/01/2018"),
        Err(rosterwatch::RosterError::MemberNotFound(_))
    ));
}
