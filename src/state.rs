use std::collections::{HashMap, VecDeque};
use std::time::{Instant, SystemTime};

use chrono::Datelike;

use crate::clubs_fetch::{
    ClubHonoursRow, ClubHonoursSummary, ClubMeta, club_meta_by_slug, summarize_honours,
};
use crate::compliance::{self, ClubComplianceRow};
use crate::contracts::age_on_jan1;
use crate::roster_fetch::{Player, RosterStatus};
use crate::transfers_fetch::TransferItem;
use crate::updates_fetch::UpdateItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Players,
    Clubs,
    ClubDetail { slug: String },
    Transfers,
    Updates,
    FreeAgents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Club,
    Position,
    Number,
    Age,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

pub fn sort_key_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Name => "NAME",
        SortKey::Club => "CLUB",
        SortKey::Position => "POS",
        SortKey::Number => "NUM",
        SortKey::Age => "AGE",
        SortKey::Status => "STATUS",
    }
}

pub fn screen_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Overview => "OVERVIEW",
        Screen::Players => "PLAYERS",
        Screen::Clubs => "CLUBS",
        Screen::ClubDetail { .. } => "CLUB",
        Screen::Transfers => "TRANSFERS",
        Screen::Updates => "UPDATES",
        Screen::FreeAgents => "FREE AGENTS",
    }
}

pub struct AppState {
    pub screen: Screen,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub search: String,
    pub search_active: bool,
    pub selected: usize,
    pub clubs_selected: usize,
    pub transfers_scroll: u16,
    pub updates_scroll: u16,
    /// Season under review. Defaults to the earliest year column in the
    /// players data once it arrives.
    pub season: Option<u16>,
    pub season_years: Vec<u16>,
    pub players: Vec<Player>,
    pub transfers: Vec<TransferItem>,
    pub clubs_meta: Vec<ClubMeta>,
    pub honours: Vec<ClubHonoursRow>,
    pub updates: Vec<UpdateItem>,
    pub players_fetched_at: Option<SystemTime>,
    pub transfers_fetched_at: Option<SystemTime>,
    pub clubs_meta_fetched_at: Option<SystemTime>,
    pub honours_fetched_at: Option<SystemTime>,
    pub updates_fetched_at: Option<SystemTime>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub export_notice: Option<String>,
    pub export_notice_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Overview,
            sort_key: SortKey::Name,
            sort_dir: SortDir::Asc,
            search: String::new(),
            search_active: false,
            selected: 0,
            clubs_selected: 0,
            transfers_scroll: 0,
            updates_scroll: 0,
            season: None,
            season_years: Vec::new(),
            players: Vec::with_capacity(256),
            transfers: Vec::new(),
            clubs_meta: Vec::new(),
            honours: Vec::new(),
            updates: Vec::new(),
            players_fetched_at: None,
            transfers_fetched_at: None,
            clubs_meta_fetched_at: None,
            honours_fetched_at: None,
            updates_fetched_at: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
            export_notice: None,
            export_notice_at: None,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn maybe_clear_export(&mut self, now: Instant) {
        const NOTICE_SECS: u64 = 8;
        if let Some(at) = self.export_notice_at {
            if now.duration_since(at).as_secs() >= NOTICE_SECS {
                self.export_notice = None;
                self.export_notice_at = None;
            }
        }
    }

    /// Season the tables are computed for: explicit selection, else the
    /// earliest sheet year, else the current calendar year.
    pub fn active_season(&self) -> u16 {
        self.season
            .or_else(|| self.season_years.first().copied())
            .unwrap_or_else(|| chrono::Utc::now().year() as u16)
    }

    pub fn cycle_season(&mut self) {
        if self.season_years.is_empty() {
            return;
        }
        let current = self.active_season();
        let next = self
            .season_years
            .iter()
            .position(|y| *y == current)
            .map(|idx| (idx + 1) % self.season_years.len())
            .unwrap_or(0);
        self.season = Some(self.season_years[next]);
        self.push_log(format!("[INFO] Season: {}", self.season_years[next]));
    }

    pub fn cycle_sort_key(&mut self) {
        self.sort_key = match self.sort_key {
            SortKey::Name => SortKey::Club,
            SortKey::Club => SortKey::Position,
            SortKey::Position => SortKey::Number,
            SortKey::Number => SortKey::Age,
            SortKey::Age => SortKey::Status,
            SortKey::Status => SortKey::Name,
        };
        self.sort_dir = SortDir::Asc;
        self.selected = 0;
    }

    pub fn toggle_sort_dir(&mut self) {
        self.sort_dir = match self.sort_dir {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        };
    }

    pub fn player_age(&self, player: &Player) -> Option<i32> {
        let birth = player.birth_date?;
        Some(age_on_jan1(birth, self.active_season() as i32))
    }

    fn matches_search(&self, player: &Player) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        player.name.to_lowercase().contains(&needle)
            || player.club.to_lowercase().contains(&needle)
            || player
                .position
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&needle))
            || player
                .nationality
                .iter()
                .any(|n| n.to_lowercase().contains(&needle))
    }

    /// Players visible on the current screen, search-filtered and sorted.
    pub fn visible_players(&self) -> Vec<&Player> {
        let mut out: Vec<&Player> = match &self.screen {
            Screen::FreeAgents => self
                .players
                .iter()
                .filter(|p| p.status == RosterStatus::FreeAgent)
                .filter(|p| self.matches_search(p))
                .collect(),
            Screen::ClubDetail { slug } => self
                .players
                .iter()
                .filter(|p| p.club_slug == *slug && p.status == RosterStatus::Active)
                .collect(),
            _ => self
                .players
                .iter()
                .filter(|p| self.matches_search(p))
                .collect(),
        };

        out.sort_by(|a, b| {
            let ord = match self.sort_key {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::Club => a
                    .club
                    .to_lowercase()
                    .cmp(&b.club.to_lowercase())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
                SortKey::Position => option_cmp(a.position.as_deref(), b.position.as_deref())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
                SortKey::Number => option_ord(a.number, b.number),
                SortKey::Age => option_ord(self.player_age(a), self.player_age(b)),
                SortKey::Status => a
                    .status
                    .label()
                    .cmp(b.status.label())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            };
            match self.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
        out
    }

    pub fn compliance_rows(&self) -> Vec<ClubComplianceRow> {
        compliance::club_rows(&self.players, self.active_season())
    }

    pub fn honours_summary(&self) -> HashMap<String, ClubHonoursSummary> {
        summarize_honours(&self.honours)
    }

    pub fn club_meta_for(&self, slug: &str) -> Option<ClubMeta> {
        club_meta_by_slug(&self.clubs_meta).get(slug).cloned()
    }

    pub fn transfers_in(&self, slug: &str) -> Vec<&TransferItem> {
        let mut out: Vec<&TransferItem> = self
            .transfers
            .iter()
            .filter(|t| t.to_club_slug.as_deref() == Some(slug))
            .collect();
        out.sort_by(|a, b| {
            a.player_name
                .to_lowercase()
                .cmp(&b.player_name.to_lowercase())
        });
        out
    }

    pub fn transfers_out(&self, slug: &str) -> Vec<&TransferItem> {
        let mut out: Vec<&TransferItem> = self
            .transfers
            .iter()
            .filter(|t| t.from_club_slug.as_deref() == Some(slug))
            .collect();
        out.sort_by(|a, b| {
            a.player_name
                .to_lowercase()
                .cmp(&b.player_name.to_lowercase())
        });
        out
    }

    pub fn select_next(&mut self) {
        match &self.screen {
            Screen::Clubs => {
                let total = crate::clubs::CLUBS.len();
                if total > 0 {
                    self.clubs_selected = (self.clubs_selected + 1) % total;
                }
            }
            Screen::Transfers => self.transfers_scroll = self.transfers_scroll.saturating_add(1),
            Screen::Updates => self.updates_scroll = self.updates_scroll.saturating_add(1),
            _ => {
                let total = self.visible_players().len();
                if total == 0 {
                    self.selected = 0;
                } else {
                    self.selected = (self.selected + 1) % total;
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match &self.screen {
            Screen::Clubs => {
                let total = crate::clubs::CLUBS.len();
                if total > 0 {
                    self.clubs_selected = (self.clubs_selected + total - 1) % total;
                }
            }
            Screen::Transfers => self.transfers_scroll = self.transfers_scroll.saturating_sub(1),
            Screen::Updates => self.updates_scroll = self.updates_scroll.saturating_sub(1),
            _ => {
                let total = self.visible_players().len();
                if total == 0 {
                    self.selected = 0;
                } else if self.selected == 0 {
                    self.selected = total - 1;
                } else {
                    self.selected -= 1;
                }
            }
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.visible_players().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }
}

fn option_cmp(a: Option<&str>, b: Option<&str>) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
    }
}

fn option_ord<T: Ord>(a: Option<T>, b: Option<T>) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers(Vec<Player>),
    SetTransfers(Vec<TransferItem>),
    SetClubsMeta(Vec<ClubMeta>),
    SetHonours(Vec<ClubHonoursRow>),
    SetUpdates(Vec<UpdateItem>),
    ExportStarted { path: String },
    ExportFinished { path: String, rows: usize },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    RefreshAll,
    FetchPlayers,
    FetchTransfers,
    FetchClubsMeta,
    FetchHonours,
    FetchUpdates,
    ExportWorkbook { path: String },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers(players) => {
            // Preserve the highlighted player across a refresh when possible.
            let selected_id = state
                .visible_players()
                .get(state.selected)
                .map(|p| p.id.clone());

            state.players = players;
            state.players_fetched_at = Some(SystemTime::now());
            state.season_years = compliance::season_years(&state.players);
            if let Some(season) = state.season {
                if !state.season_years.contains(&season) {
                    state.season = None;
                }
            }

            if let Some(id) = selected_id {
                if let Some(pos) = state.visible_players().iter().position(|p| p.id == id) {
                    state.selected = pos;
                    return;
                }
            }
            state.clamp_selection();
        }
        Delta::SetTransfers(transfers) => {
            state.transfers = transfers;
            state.transfers_fetched_at = Some(SystemTime::now());
        }
        Delta::SetClubsMeta(clubs) => {
            state.clubs_meta = clubs;
            state.clubs_meta_fetched_at = Some(SystemTime::now());
        }
        Delta::SetHonours(rows) => {
            state.honours = rows;
            state.honours_fetched_at = Some(SystemTime::now());
        }
        Delta::SetUpdates(updates) => {
            state.updates = updates;
            state.updates_fetched_at = Some(SystemTime::now());
        }
        Delta::ExportStarted { path } => {
            state.push_log(format!("[INFO] Export started: {path}"));
        }
        Delta::ExportFinished { path, rows } => {
            state.push_log(format!("[INFO] Export finished: {path} ({rows} rows)"));
            state.export_notice = Some(format!("Exported {rows} rows to {path}"));
            state.export_notice_at = Some(Instant::now());
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
