//! Players sheet: the master roster with dynamic per-season contract columns.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contracts::parse_birth_date;
use crate::csv::{Sheet, is_year_header, non_empty, split_multi, to_number_maybe};
use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterStatus {
    Active,
    FreeAgent,
    LoanedOut,
    Retired,
    Other,
}

impl RosterStatus {
    /// Blank defaults to active, matching legacy sheet rows.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "active" => RosterStatus::Active,
            "free agent" => RosterStatus::FreeAgent,
            "loaned out" => RosterStatus::LoanedOut,
            "retired" => RosterStatus::Retired,
            _ => RosterStatus::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RosterStatus::Active => "active",
            RosterStatus::FreeAgent => "free agent",
            RosterStatus::LoanedOut => "loaned out",
            RosterStatus::Retired => "retired",
            RosterStatus::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub club_slug: String,
    pub club: String,
    pub name: String,
    pub position: Option<String>,
    pub position_detail: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// ISO-2 codes, `;`-separated in the sheet for dual nationals.
    pub nationality: Vec<String>,
    pub number: Option<u32>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: RosterStatus,
    pub captain: bool,
    /// Raw contract cells keyed by season year, empty cells omitted.
    pub seasons: BTreeMap<u16, String>,
}

impl Player {
    pub fn season_cell(&self, year: u16) -> &str {
        self.seasons.get(&year).map(String::as_str).unwrap_or("")
    }
}

fn players_csv_url() -> Result<String> {
    std::env::var("PLAYERS_CSV_URL")
        .context("Missing PLAYERS_CSV_URL; point it at the players Google Sheets CSV export")
}

pub fn fetch_players() -> Result<Vec<Player>> {
    let url = players_csv_url()?;
    let client = http_client()?;
    let body = fetch_text_cached(client, &url, &[]).context("players CSV request failed")?;
    parse_players_csv(&body)
}

pub fn parse_players_csv(raw: &str) -> Result<Vec<Player>> {
    let sheet = Sheet::parse(raw);
    if sheet.headers.is_empty() {
        return Ok(Vec::new());
    }
    if sheet.col("id").is_none() || sheet.col("name").is_none() {
        bail!("players CSV is missing required columns: id, name");
    }

    // Year columns are discovered from the headers, not hardcoded.
    let mut year_cols: Vec<(u16, usize)> = sheet
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_year_header(h))
        .filter_map(|(idx, h)| h.parse::<u16>().ok().map(|y| (y, idx)))
        .collect();
    year_cols.sort_by_key(|(year, _)| *year);

    let i_id = sheet.col("id");
    let i_club_slug = sheet.col("clubSlug");
    let i_club = sheet.col("club");
    let i_name = sheet.col("name");
    let i_position = sheet.col("position");
    let i_position_detail = sheet.col("positionDetail");
    let i_birth_date = sheet.col("birthDate");
    let i_nationality = sheet.col("nationality");
    let i_number = sheet.col("number");
    let i_source = sheet.col("source");
    let i_notes = sheet.col("notes");
    let i_status = sheet.col("status");
    let i_captain = sheet.col("captain");

    let mut players = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        let id = sheet.cell(row, i_id).to_string();
        let name = sheet.cell(row, i_name).to_string();
        if id.is_empty() || name.is_empty() {
            continue;
        }

        let club_slug = sheet.cell(row, i_club_slug).to_string();
        let status = RosterStatus::parse(sheet.cell(row, i_status));
        // Only active players must carry a clubSlug, so club pages stay
        // stable; free agents and departures may have it blank.
        if status == RosterStatus::Active && club_slug.is_empty() {
            continue;
        }

        let mut seasons = BTreeMap::new();
        for (year, idx) in &year_cols {
            if let Some(cell) = row.get(*idx) {
                let cell = cell.trim();
                if !cell.is_empty() {
                    seasons.insert(*year, cell.to_string());
                }
            }
        }

        players.push(Player {
            id,
            club_slug,
            club: sheet.cell(row, i_club).to_string(),
            name,
            position: non_empty(sheet.cell(row, i_position)),
            position_detail: non_empty(sheet.cell(row, i_position_detail)),
            birth_date: parse_birth_date(sheet.cell(row, i_birth_date)),
            nationality: split_multi(sheet.cell(row, i_nationality)),
            number: to_number_maybe(sheet.cell(row, i_number)),
            source: non_empty(sheet.cell(row, i_source)),
            notes: non_empty(sheet.cell(row, i_notes)),
            status,
            captain: sheet.cell(row, i_captain).eq_ignore_ascii_case("true"),
            seasons,
        });
    }

    Ok(players)
}
