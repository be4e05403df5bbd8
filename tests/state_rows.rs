use std::collections::BTreeMap;

use chrono::NaiveDate;

use canpl_terminal::roster_fetch::{Player, RosterStatus};
use canpl_terminal::state::{AppState, Screen, SortDir, SortKey};

fn player(id: &str, name: &str, club_slug: &str, club: &str) -> Player {
    Player {
        id: id.to_string(),
        club_slug: club_slug.to_string(),
        club: club.to_string(),
        name: name.to_string(),
        position: None,
        position_detail: None,
        birth_date: None,
        nationality: Vec::new(),
        number: None,
        source: None,
        notes: None,
        status: RosterStatus::Active,
        captain: false,
        seasons: BTreeMap::new(),
    }
}

fn sample_state() -> AppState {
    let mut state = AppState::new();
    let mut a = player("a", "Zidane Okafor", "forge", "Forge FC");
    a.number = Some(10);
    a.position = Some("MF".to_string());
    a.birth_date = NaiveDate::from_ymd_opt(2004, 5, 5);
    let mut b = player("b", "Aaron Li", "cavalry", "Cavalry FC");
    b.number = Some(2);
    b.position = Some("DF".to_string());
    let mut c = player("c", "Marco Diaz", "", "");
    c.status = RosterStatus::FreeAgent;
    c.nationality = vec!["MX".to_string()];
    state.players = vec![a, b, c];
    state.season_years = vec![2025, 2026];
    state
}

#[test]
fn players_sort_by_name_by_default() {
    let mut state = sample_state();
    state.screen = Screen::Players;
    let names: Vec<&str> = state.visible_players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Aaron Li", "Marco Diaz", "Zidane Okafor"]);
}

#[test]
fn sort_direction_reverses_rows() {
    let mut state = sample_state();
    state.screen = Screen::Players;
    state.toggle_sort_dir();
    assert_eq!(state.sort_dir, SortDir::Desc);
    let names: Vec<&str> = state.visible_players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Zidane Okafor", "Marco Diaz", "Aaron Li"]);
}

#[test]
fn number_sort_puts_missing_values_last() {
    let mut state = sample_state();
    state.screen = Screen::Players;
    state.sort_key = SortKey::Number;
    let rows = state.visible_players();
    assert_eq!(rows[0].number, Some(2));
    assert_eq!(rows[1].number, Some(10));
    assert_eq!(rows[2].number, None);
}

#[test]
fn search_matches_name_club_and_nationality() {
    let mut state = sample_state();
    state.screen = Screen::Players;

    state.search = "forge".to_string();
    assert_eq!(state.visible_players().len(), 1);

    state.search = "mx".to_string();
    let rows = state.visible_players();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "c");

    state.search = "zzz".to_string();
    assert!(state.visible_players().is_empty());
}

#[test]
fn free_agents_screen_filters_by_status() {
    let mut state = sample_state();
    state.screen = Screen::FreeAgents;
    let rows = state.visible_players();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "c");
}

#[test]
fn club_detail_ignores_the_search_box() {
    let mut state = sample_state();
    state.screen = Screen::ClubDetail {
        slug: "forge".to_string(),
    };
    state.search = "nomatch".to_string();
    let rows = state.visible_players();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "a");
}

#[test]
fn cycling_the_sort_key_resets_direction() {
    let mut state = sample_state();
    state.toggle_sort_dir();
    state.selected = 2;
    state.cycle_sort_key();
    assert_eq!(state.sort_key, SortKey::Club);
    assert_eq!(state.sort_dir, SortDir::Asc);
    assert_eq!(state.selected, 0);
}

#[test]
fn active_season_prefers_explicit_then_earliest() {
    let mut state = sample_state();
    assert_eq!(state.active_season(), 2025);
    state.season = Some(2026);
    assert_eq!(state.active_season(), 2026);
}

#[test]
fn season_cycles_through_known_years() {
    let mut state = sample_state();
    state.cycle_season();
    assert_eq!(state.season, Some(2026));
    state.cycle_season();
    assert_eq!(state.season, Some(2025));
}

#[test]
fn selection_wraps_on_player_screens() {
    let mut state = sample_state();
    state.screen = Screen::Players;
    state.selected = 2;
    state.select_next();
    assert_eq!(state.selected, 0);
    state.select_prev();
    assert_eq!(state.selected, 2);
}

#[test]
fn player_age_follows_the_active_season() {
    let state = sample_state();
    let rows = state.visible_players();
    let okafor = rows.iter().find(|p| p.id == "a").expect("row");
    // Born 2004-05-05, so 20 on Jan 1 2025.
    assert_eq!(state.player_age(okafor), Some(20));
    let li = rows.iter().find(|p| p.id == "b").expect("row");
    assert_eq!(state.player_age(li), None);
}
