use std::fs;
use std::path::PathBuf;

use canpl_terminal::transfers_fetch::parse_transfers_csv;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_transfers_fixture_newest_first() {
    let transfers =
        parse_transfers_csv(&read_fixture("transfers.csv")).expect("fixture should parse");
    // The nameless row is dropped.
    assert_eq!(transfers.len(), 3);
    assert_eq!(transfers[0].player_name, "Luka Petrov");
    assert_eq!(transfers[0].date.as_deref(), Some("2026-02-01"));
    assert_eq!(transfers[1].player_name, "Mateo Silva");
    // Undated rows sink to the bottom.
    assert_eq!(transfers[2].player_name, "Aiden Cole");
    assert!(transfers[2].date.is_none());
}

#[test]
fn explicit_ids_are_kept_and_missing_ones_synthesized() {
    let transfers =
        parse_transfers_csv(&read_fixture("transfers.csv")).expect("fixture should parse");
    let mateo = transfers.iter().find(|t| t.player_name == "Mateo Silva").expect("row");
    assert_eq!(mateo.id, "t-1");

    let luka = transfers.iter().find(|t| t.player_name == "Luka Petrov").expect("row");
    assert_eq!(luka.id, "2026-02-01__Luka Petrov____forge");

    let aiden = transfers.iter().find(|t| t.player_name == "Aiden Cole").expect("row");
    assert_eq!(aiden.id, "nodate__Aiden Cole__pacific__vancouver");
}

#[test]
fn empty_cells_become_none() {
    let transfers =
        parse_transfers_csv(&read_fixture("transfers.csv")).expect("fixture should parse");
    let luka = transfers.iter().find(|t| t.player_name == "Luka Petrov").expect("row");
    assert_eq!(luka.from_club.as_deref(), Some("NK Osijek"));
    assert!(luka.from_club_slug.is_none());
    assert!(luka.fee.is_none());
    assert_eq!(luka.transfer_type.as_deref(), Some("Loan"));
}

#[test]
fn missing_player_column_is_an_error() {
    assert!(parse_transfers_csv("fromClub,toClub\nForge FC,Cavalry FC\n").is_err());
}

#[test]
fn empty_body_is_empty_list() {
    let transfers = parse_transfers_csv("").expect("empty input parses");
    assert!(transfers.is_empty());
}
