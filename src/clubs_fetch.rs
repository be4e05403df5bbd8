//! Clubs meta and honours sheets, plus the per-club honours rollup.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::csv::{Sheet, non_empty, split_multi, to_bool_maybe, to_number_maybe};
use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMeta {
    pub club_slug: String,
    pub display_name: String,
    pub joined: Option<u32>,
    pub location: Option<String>,
    pub stadium: Option<String>,
    pub capacity: Option<u32>,
    pub manager: Option<String>,
    pub defunct: bool,
    pub last_season: Option<u32>,
    pub successor_slug: Option<String>,
    pub former_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubHonoursRow {
    pub club_slug: String,
    pub season: u32,
    pub north_star_cup: bool,
    pub cpl_shield: bool,
    /// Filled in manually in the sheet later; parsed now so nothing has to
    /// change when it lands.
    pub playoffs: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubHonoursSummary {
    pub north_star_cup_years: Vec<u32>,
    pub cpl_shield_years: Vec<u32>,
    pub playoff_seasons: Vec<u32>,
}

impl ClubHonoursSummary {
    pub fn north_star_cup_titles(&self) -> usize {
        self.north_star_cup_years.len()
    }

    pub fn cpl_shield_titles(&self) -> usize {
        self.cpl_shield_years.len()
    }
}

fn clubs_meta_csv_url() -> Result<String> {
    std::env::var("CLUBS_META_CSV_URL")
        .context("Missing CLUBS_META_CSV_URL; point it at the clubs_meta Google Sheets CSV export")
}

fn clubs_honours_csv_url() -> Result<String> {
    std::env::var("CLUBS_HONOURS_CSV_URL").context(
        "Missing CLUBS_HONOURS_CSV_URL; point it at the clubs_honours Google Sheets CSV export",
    )
}

pub fn fetch_clubs_meta() -> Result<Vec<ClubMeta>> {
    let url = clubs_meta_csv_url()?;
    let client = http_client()?;
    let body = fetch_text_cached(client, &url, &[]).context("clubs_meta CSV request failed")?;
    Ok(parse_clubs_meta_csv(&body))
}

pub fn parse_clubs_meta_csv(raw: &str) -> Vec<ClubMeta> {
    let sheet = Sheet::parse(raw);

    let i_club_slug = sheet.col("clubSlug");
    let i_display_name = sheet.col("displayName");
    let i_joined = sheet.col("joined");
    let i_location = sheet.col("location");
    let i_stadium = sheet.col("stadium");
    let i_capacity = sheet.col("capacity");
    let i_manager = sheet.col("manager");
    let i_defunct = sheet.col("defunct");
    let i_last_season = sheet.col("lastSeason");
    let i_successor_slug = sheet.col("successorSlug");
    let i_former_names = sheet.col("formerNames");

    let mut clubs: Vec<ClubMeta> = sheet
        .rows
        .iter()
        .filter_map(|row| {
            let club_slug = sheet.cell(row, i_club_slug).to_string();
            let display_name = sheet.cell(row, i_display_name).to_string();
            if club_slug.is_empty() || display_name.is_empty() {
                return None;
            }
            Some(ClubMeta {
                club_slug,
                display_name,
                joined: to_number_maybe(sheet.cell(row, i_joined)),
                location: non_empty(sheet.cell(row, i_location)),
                stadium: non_empty(sheet.cell(row, i_stadium)),
                capacity: to_number_maybe(sheet.cell(row, i_capacity)),
                manager: non_empty(sheet.cell(row, i_manager)),
                defunct: to_bool_maybe(sheet.cell(row, i_defunct)).unwrap_or(false),
                last_season: to_number_maybe(sheet.cell(row, i_last_season)),
                successor_slug: non_empty(sheet.cell(row, i_successor_slug)),
                former_names: split_multi(sheet.cell(row, i_former_names)),
            })
        })
        .collect();

    clubs.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    clubs
}

pub fn club_meta_by_slug(clubs: &[ClubMeta]) -> HashMap<String, ClubMeta> {
    clubs
        .iter()
        .map(|c| (c.club_slug.clone(), c.clone()))
        .collect()
}

pub fn fetch_clubs_honours() -> Result<Vec<ClubHonoursRow>> {
    let url = clubs_honours_csv_url()?;
    let client = http_client()?;
    let body = fetch_text_cached(client, &url, &[]).context("clubs_honours CSV request failed")?;
    Ok(parse_clubs_honours_csv(&body))
}

pub fn parse_clubs_honours_csv(raw: &str) -> Vec<ClubHonoursRow> {
    let sheet = Sheet::parse(raw);

    let i_club_slug = sheet.col("clubSlug");
    let i_season = sheet.col("season");
    let i_north_star_cup = sheet.col("northStarCup");
    let i_cpl_shield = sheet.col("cplShield");
    let i_playoffs = sheet.col("playoffs");

    let mut rows: Vec<ClubHonoursRow> = sheet
        .rows
        .iter()
        .filter_map(|row| {
            let club_slug = sheet.cell(row, i_club_slug).to_string();
            let season = to_number_maybe(sheet.cell(row, i_season))?;
            if club_slug.is_empty() {
                return None;
            }
            Some(ClubHonoursRow {
                club_slug,
                season,
                north_star_cup: to_bool_maybe(sheet.cell(row, i_north_star_cup)).unwrap_or(false),
                cpl_shield: to_bool_maybe(sheet.cell(row, i_cpl_shield)).unwrap_or(false),
                playoffs: to_bool_maybe(sheet.cell(row, i_playoffs)),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.club_slug
            .to_lowercase()
            .cmp(&b.club_slug.to_lowercase())
            .then(a.season.cmp(&b.season))
    });
    rows
}

/// Aggregate honours rows into per-club totals with sorted year lists.
pub fn summarize_honours(rows: &[ClubHonoursRow]) -> HashMap<String, ClubHonoursSummary> {
    let mut out: HashMap<String, ClubHonoursSummary> = HashMap::new();

    for row in rows {
        let entry = out.entry(row.club_slug.clone()).or_default();
        if row.north_star_cup {
            entry.north_star_cup_years.push(row.season);
        }
        if row.cpl_shield {
            entry.cpl_shield_years.push(row.season);
        }
        if row.playoffs == Some(true) {
            entry.playoff_seasons.push(row.season);
        }
    }

    for summary in out.values_mut() {
        summary.north_star_cup_years.sort_unstable();
        summary.cpl_shield_years.sort_unstable();
        summary.playoff_seasons.sort_unstable();
    }
    out
}
