//! Transfers sheet: one row per move, loosely columned, newest first.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::csv::{Sheet, non_empty};
use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferItem {
    pub id: String,
    pub season: Option<String>,
    pub player_name: String,
    pub player_slug: Option<String>,
    pub from_club: Option<String>,
    pub from_club_slug: Option<String>,
    pub to_club: Option<String>,
    pub to_club_slug: Option<String>,
    pub transfer_type: Option<String>,
    pub fee: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
}

fn transfers_csv_url() -> Result<String> {
    std::env::var("TRANSFERS_CSV_URL")
        .context("Missing TRANSFERS_CSV_URL; point it at the transfers Google Sheets CSV export")
}

pub fn fetch_transfers() -> Result<Vec<TransferItem>> {
    let url = transfers_csv_url()?;
    let client = http_client()?;
    let body = fetch_text_cached(client, &url, &[]).context("transfers CSV request failed")?;
    parse_transfers_csv(&body)
}

pub fn parse_transfers_csv(raw: &str) -> Result<Vec<TransferItem>> {
    let sheet = Sheet::parse(raw);
    if sheet.headers.is_empty() {
        return Ok(Vec::new());
    }

    let i_player_name = sheet.col("playerName");
    if i_player_name.is_none() {
        bail!("transfers CSV is missing required column: playerName");
    }
    let i_id = sheet.col("id");
    let i_season = sheet.col("season");
    let i_player_slug = sheet.col("playerSlug");
    let i_from_club = sheet.col("fromClub");
    let i_from_club_slug = sheet.col("fromClubSlug");
    let i_to_club = sheet.col("toClub");
    let i_to_club_slug = sheet.col("toClubSlug");
    let i_transfer_type = sheet.col("transferType");
    let i_fee = sheet.col("fee");
    let i_notes = sheet.col("notes");
    let i_source = sheet.col("source");
    let i_link = sheet.col("link");
    let i_date = sheet.col("date");

    let mut out = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        let player_name = sheet.cell(row, i_player_name).to_string();
        if player_name.is_empty() {
            continue;
        }

        let date = sheet.cell(row, i_date).to_string();
        let from_slug = sheet.cell(row, i_from_club_slug).to_string();
        let to_slug = sheet.cell(row, i_to_club_slug).to_string();

        // Rows without an explicit id get a stable synthesized one.
        let id = match non_empty(sheet.cell(row, i_id)) {
            Some(id) => id,
            None => format!(
                "{}__{}__{}__{}",
                if date.is_empty() { "nodate" } else { &date },
                player_name,
                from_slug,
                to_slug
            ),
        };

        out.push(TransferItem {
            id,
            season: non_empty(sheet.cell(row, i_season)),
            player_name,
            player_slug: non_empty(sheet.cell(row, i_player_slug)),
            from_club: non_empty(sheet.cell(row, i_from_club)),
            from_club_slug: non_empty(&from_slug),
            to_club: non_empty(sheet.cell(row, i_to_club)),
            to_club_slug: non_empty(&to_slug),
            transfer_type: non_empty(sheet.cell(row, i_transfer_type)),
            fee: non_empty(sheet.cell(row, i_fee)),
            notes: non_empty(sheet.cell(row, i_notes)),
            source: non_empty(sheet.cell(row, i_source)),
            link: non_empty(sheet.cell(row, i_link)),
            date: non_empty(&date),
        });
    }

    // Newest first when dated; undated rows sink to the bottom, ties keep
    // their sheet order.
    out.sort_by(|a, b| match (a.date.as_deref(), b.date.as_deref()) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(da), Some(db)) => db.cmp(da),
    });

    Ok(out)
}
