use std::collections::BTreeMap;

use canpl_terminal::roster_fetch::{Player, RosterStatus};
use canpl_terminal::state::{apply_delta, AppState, Delta, Screen};

fn player(id: &str, name: &str) -> Player {
    let mut seasons = BTreeMap::new();
    seasons.insert(2025, "Domestic".to_string());
    Player {
        id: id.to_string(),
        club_slug: "forge".to_string(),
        club: "Forge FC".to_string(),
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
        seasons,
    }
}

#[test]
fn set_players_recomputes_season_years() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetPlayers(vec![player("a", "Aaron Li")]));
    assert_eq!(state.season_years, vec![2025]);
    assert!(state.players_fetched_at.is_some());
}

#[test]
fn set_players_drops_a_stale_season_selection() {
    let mut state = AppState::new();
    state.season = Some(2030);
    apply_delta(&mut state, Delta::SetPlayers(vec![player("a", "Aaron Li")]));
    assert_eq!(state.season, None);
    assert_eq!(state.active_season(), 2025);
}

#[test]
fn set_players_keeps_the_highlighted_player() {
    let mut state = AppState::new();
    state.screen = Screen::Players;
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec![
            player("a", "Aaron Li"),
            player("b", "Marco Diaz"),
            player("c", "Zidane Okafor"),
        ]),
    );
    state.selected = 2;

    // A refresh that inserts a row ahead of the selection keeps it on Okafor.
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec![
            player("a", "Aaron Li"),
            player("b", "Marco Diaz"),
            player("d", "Nina Brant"),
            player("c", "Zidane Okafor"),
        ]),
    );
    let rows = state.visible_players();
    assert_eq!(rows[state.selected].id, "c");
}

#[test]
fn set_players_clamps_when_the_selection_disappears() {
    let mut state = AppState::new();
    state.screen = Screen::Players;
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec![player("a", "Aaron Li"), player("b", "Marco Diaz")]),
    );
    state.selected = 1;
    apply_delta(&mut state, Delta::SetPlayers(vec![player("a", "Aaron Li")]));
    assert_eq!(state.selected, 0);
}

#[test]
fn log_deltas_land_in_the_ring_buffer() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] hello".to_string()));
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] hello"));

    for i in 0..300 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] {i}")));
    }
    assert_eq!(state.logs.len(), 200);
}

#[test]
fn export_finished_raises_a_notice() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::ExportFinished {
            path: "out.xlsx".to_string(),
            rows: 42,
        },
    );
    assert!(state.export_notice.as_deref().is_some_and(|n| n.contains("42")));
    assert!(state.export_notice_at.is_some());
    assert!(state.logs.back().is_some_and(|l| l.contains("out.xlsx")));
}
