//! Updates sheet: the curated signings/departures/extensions timeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::csv::{Sheet, non_empty};
use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    Signing,
    Departure,
    Extension,
}

impl UpdateKind {
    /// The sheet uses a strict dropdown; anything else invalidates the row.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Signing" => Some(UpdateKind::Signing),
            "Departure" => Some(UpdateKind::Departure),
            "Extension" => Some(UpdateKind::Extension),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UpdateKind::Signing => "Signing",
            UpdateKind::Departure => "Departure",
            UpdateKind::Extension => "Extension",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    pub id: String,
    pub date: String,
    pub kind: UpdateKind,
    pub player: String,
    pub club: String,
    pub club_slug: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
}

fn updates_csv_url() -> Result<String> {
    std::env::var("UPDATES_CSV_URL")
        .context("Missing UPDATES_CSV_URL; point it at the updates Google Sheets CSV export")
}

pub fn fetch_updates() -> Result<Vec<UpdateItem>> {
    let url = updates_csv_url()?;
    let client = http_client()?;
    let body = fetch_text_cached(client, &url, &[]).context("updates CSV request failed")?;
    Ok(parse_updates_csv(&body))
}

pub fn parse_updates_csv(raw: &str) -> Vec<UpdateItem> {
    let sheet = Sheet::parse(raw);

    let i_date = sheet.col("date");
    let i_type = sheet.col("type");
    let i_player = sheet.col("player");
    let i_club = sheet.col("club");
    let i_club_slug = sheet.col("clubSlug");
    let i_summary = sheet.col("summary");
    let i_link = sheet.col("link");
    let i_source = sheet.col("source");

    let mut out = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        let date = sheet.cell(row, i_date).to_string();
        let Some(kind) = UpdateKind::parse(sheet.cell(row, i_type)) else {
            continue;
        };
        let player = sheet.cell(row, i_player).to_string();
        let club = sheet.cell(row, i_club).to_string();
        if date.is_empty() || player.is_empty() || club.is_empty() {
            continue;
        }

        out.push(UpdateItem {
            id: format!("{date}__{}__{player}__{club}", kind.label()),
            date,
            kind,
            player,
            club,
            club_slug: non_empty(sheet.cell(row, i_club_slug)),
            summary: non_empty(sheet.cell(row, i_summary)),
            link: non_empty(sheet.cell(row, i_link)),
            source: non_empty(sheet.cell(row, i_source)),
        });
    }

    // Newest first, ties keep sheet order.
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
