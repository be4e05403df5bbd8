//! Roster compliance against CPL squad rules, plus the notes-keyword
//! heuristics behind the "recent additions/departures" lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contracts::{
    AgeBucket, age_bucket, age_on_jan1, is_international_primary, is_under_contract,
};
use crate::roster_fetch::Player;

/// CPL roster rules the overview table checks against.
pub const CPL_ROSTER_MIN: usize = 20;
pub const CPL_ROSTER_MAX: usize = 23;
pub const CPL_INTERNATIONAL_CAP: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubComplianceRow {
    pub club_slug: String,
    pub club: String,
    pub total: usize,
    pub internationals: usize,
    pub u21: usize,
    pub u18: usize,
    pub eyt: usize,
}

impl ClubComplianceRow {
    pub fn over_international_cap(&self) -> bool {
        self.internationals > CPL_INTERNATIONAL_CAP
    }

    pub fn roster_size_in_band(&self) -> bool {
        (CPL_ROSTER_MIN..=CPL_ROSTER_MAX).contains(&self.total)
    }
}

fn season_age_bucket(player: &Player, season: u16) -> Option<AgeBucket> {
    let birth = player.birth_date?;
    age_bucket(age_on_jan1(birth, season as i32))
}

fn is_eyt_cell(cell: &str) -> bool {
    // Placeholder rule until the sheet standardizes how EYT is marked.
    cell.to_lowercase().contains("eyt")
}

/// One row per club, players under contract for the season grouped and
/// counted, sorted by club name case-insensitively.
pub fn club_rows(players: &[Player], season: u16) -> Vec<ClubComplianceRow> {
    let mut by_club: BTreeMap<(String, String), Vec<&Player>> = BTreeMap::new();
    for p in players {
        if p.club_slug.is_empty() || p.club.is_empty() {
            continue;
        }
        by_club
            .entry((p.club.to_lowercase(), p.club_slug.clone()))
            .or_default()
            .push(p);
    }

    by_club
        .into_iter()
        .map(|((_, club_slug), members)| {
            let under: Vec<&&Player> = members
                .iter()
                .filter(|p| is_under_contract(p.season_cell(season)))
                .collect();

            let internationals = under
                .iter()
                .filter(|p| is_international_primary(p.season_cell(season)))
                .count();
            let u21 = under
                .iter()
                .filter(|p| season_age_bucket(p, season) == Some(AgeBucket::U21))
                .count();
            let u18 = under
                .iter()
                .filter(|p| season_age_bucket(p, season) == Some(AgeBucket::U18))
                .count();
            let eyt = under
                .iter()
                .filter(|p| is_eyt_cell(p.season_cell(season)))
                .count();

            let club = members.first().map(|p| p.club.clone()).unwrap_or_default();

            ClubComplianceRow {
                club_slug,
                club,
                total: under.len(),
                internationals,
                u21,
                u18,
                eyt,
            }
        })
        .collect()
}

/// All season years appearing across the player set, ascending.
pub fn season_years(players: &[Player]) -> Vec<u16> {
    let mut years: Vec<u16> = players
        .iter()
        .flat_map(|p| p.seasons.keys().copied())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

const ADDITION_KEYWORDS: &[&str] = &[
    "signed",
    "new signing",
    "made permanent",
    "re-signed",
    "resigned",
    "guaranteed through",
    "contract retained",
    "option exercised",
    "option executed",
];

const DEPARTURE_KEYWORDS: &[&str] = &[
    "contract expired",
    "option declined",
    "returned to parent club",
    "terminated",
    "mutual agreement",
    "free agent",
    "left",
    "released",
];

// "Recent" is a heuristic over the notes column; the sheet has no date
// column for roster moves.
pub fn looks_like_addition(notes: &str) -> bool {
    let s = notes.to_lowercase();
    ADDITION_KEYWORDS.iter().any(|kw| s.contains(kw))
}

pub fn looks_like_departure(notes: &str) -> bool {
    let s = notes.to_lowercase();
    DEPARTURE_KEYWORDS.iter().any(|kw| s.contains(kw))
}

pub fn recent_additions<'a>(players: &'a [Player], season: u16, limit: usize) -> Vec<&'a Player> {
    players
        .iter()
        .filter(|p| {
            is_under_contract(p.season_cell(season))
                && p.notes.as_deref().is_some_and(looks_like_addition)
        })
        .take(limit)
        .collect()
}

pub fn recent_departures<'a>(players: &'a [Player], limit: usize) -> Vec<&'a Player> {
    players
        .iter()
        .filter(|p| p.notes.as_deref().is_some_and(looks_like_departure))
        .take(limit)
        .collect()
}
