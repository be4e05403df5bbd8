use std::collections::BTreeMap;

use chrono::NaiveDate;

use canpl_terminal::compliance::{
    club_rows, looks_like_addition, looks_like_departure, recent_additions, recent_departures,
    season_years, CPL_INTERNATIONAL_CAP,
};
use canpl_terminal::roster_fetch::{Player, RosterStatus};

fn player(id: &str, club_slug: &str, club: &str, birth: Option<(i32, u32, u32)>, cell_2025: &str) -> Player {
    let mut seasons = BTreeMap::new();
    if !cell_2025.is_empty() {
        seasons.insert(2025, cell_2025.to_string());
    }
    Player {
        id: id.to_string(),
        club_slug: club_slug.to_string(),
        club: club.to_string(),
        name: id.to_string(),
        position: None,
        position_detail: None,
        birth_date: birth.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        nationality: Vec::new(),
        number: None,
        source: None,
        notes: None,
        status: RosterStatus::Active,
        captain: false,
        seasons,
    }
}

#[test]
fn counts_contracts_per_club() {
    let players = vec![
        player("a", "forge", "Forge FC", Some((2000, 6, 1)), "Domestic"),
        player("b", "forge", "Forge FC", Some((2006, 3, 2)), "International"),
        player("c", "forge", "Forge FC", Some((2008, 9, 9)), "EYT"),
        player("d", "forge", "Forge FC", None, ""),
        player("e", "cavalry", "Cavalry FC", Some((1995, 4, 4)), "Domestic"),
    ];

    let rows = club_rows(&players, 2025);
    assert_eq!(rows.len(), 2);
    // Sorted by club name, Cavalry before Forge.
    assert_eq!(rows[0].club_slug, "cavalry");
    assert_eq!(rows[0].total, 1);

    let forge = &rows[1];
    assert_eq!(forge.club_slug, "forge");
    assert_eq!(forge.total, 3);
    assert_eq!(forge.internationals, 1);
    // b is 18 on Jan 1 2025, c is 16; the buckets do not overlap.
    assert_eq!(forge.u21, 1);
    assert_eq!(forge.u18, 1);
    assert_eq!(forge.eyt, 1);
}

#[test]
fn blank_and_na_cells_do_not_count() {
    let players = vec![
        player("a", "forge", "Forge FC", None, ""),
        player("b", "forge", "Forge FC", None, "N/A"),
    ];
    let rows = club_rows(&players, 2025);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, 0);
}

#[test]
fn clubless_players_are_excluded() {
    let mut free = player("f", "", "", None, "Domestic");
    free.status = RosterStatus::FreeAgent;
    let rows = club_rows(&[free], 2025);
    assert!(rows.is_empty());
}

#[test]
fn international_cap_flags_at_eight() {
    let mut players = Vec::new();
    for i in 0..CPL_INTERNATIONAL_CAP + 1 {
        players.push(player(
            &format!("i{i}"),
            "forge",
            "Forge FC",
            None,
            "International",
        ));
    }
    let rows = club_rows(&players, 2025);
    assert!(rows[0].over_international_cap());
    assert!(!rows[0].roster_size_in_band());
}

#[test]
fn season_years_cover_the_whole_roster() {
    let mut a = player("a", "forge", "Forge FC", None, "Domestic");
    a.seasons.insert(2026, "Club Option".to_string());
    let b = player("b", "cavalry", "Cavalry FC", None, "Domestic");
    assert_eq!(season_years(&[a, b]), vec![2025, 2026]);
}

#[test]
fn notes_keywords_split_moves() {
    assert!(looks_like_addition("New signing from academy"));
    assert!(looks_like_addition("Option exercised for 2026"));
    assert!(looks_like_departure("Contract expired"));
    assert!(looks_like_departure("Returned to parent club"));
    assert!(!looks_like_addition("Injured"));
    assert!(!looks_like_departure("Injured"));
}

#[test]
fn recent_lists_respect_the_limit() {
    let mut players = Vec::new();
    for i in 0..5 {
        let mut p = player(&format!("a{i}"), "forge", "Forge FC", None, "Domestic");
        p.notes = Some("Signed for 2025".to_string());
        players.push(p);
    }
    let mut gone = player("g", "", "", None, "");
    gone.status = RosterStatus::FreeAgent;
    gone.notes = Some("Released by mutual agreement".to_string());
    players.push(gone);

    assert_eq!(recent_additions(&players, 2025, 3).len(), 3);
    let departures = recent_departures(&players, 10);
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].id, "g");
}
