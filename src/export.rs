//! Workbook export: Rosters, Compliance, Transfers, and Updates sheets.
//! Fetches fresh data itself so the written file never lags the sheets.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::compliance;
use crate::roster_fetch::{self, Player};
use crate::transfers_fetch;
use crate::updates_fetch;

pub struct ExportReport {
    pub players: usize,
    pub clubs: usize,
    pub transfers: usize,
    pub updates: usize,
    pub errors: Vec<String>,
}

impl ExportReport {
    pub fn total_rows(&self) -> usize {
        self.players + self.clubs + self.transfers + self.updates
    }
}

pub fn export_workbook(path: &Path) -> Result<ExportReport> {
    let mut errors = Vec::new();

    let players = roster_fetch::fetch_players().unwrap_or_else(|err| {
        errors.push(format!("players: {err:#}"));
        Vec::new()
    });
    let transfers = transfers_fetch::fetch_transfers().unwrap_or_else(|err| {
        errors.push(format!("transfers: {err:#}"));
        Vec::new()
    });
    let updates = updates_fetch::fetch_updates().unwrap_or_else(|err| {
        errors.push(format!("updates: {err:#}"));
        Vec::new()
    });

    let season = compliance::season_years(&players)
        .first()
        .copied()
        .unwrap_or(0);
    let compliance_rows = compliance::club_rows(&players, season);

    let mut workbook = Workbook::new();

    let rosters = workbook.add_worksheet();
    rosters.set_name("Rosters").context("name rosters sheet")?;
    write_roster_rows(rosters, &players, season)?;

    let compliance_ws = workbook.add_worksheet();
    compliance_ws
        .set_name("Compliance")
        .context("name compliance sheet")?;
    write_rows(
        compliance_ws,
        std::iter::once(vec![
            "Club".to_string(),
            "Slug".to_string(),
            "Total".to_string(),
            "Internationals".to_string(),
            "U-21".to_string(),
            "U-18".to_string(),
            "EYT".to_string(),
        ])
        .chain(compliance_rows.iter().map(|r| {
            vec![
                r.club.clone(),
                r.club_slug.clone(),
                r.total.to_string(),
                r.internationals.to_string(),
                r.u21.to_string(),
                r.u18.to_string(),
                r.eyt.to_string(),
            ]
        })),
    )?;

    let transfers_ws = workbook.add_worksheet();
    transfers_ws
        .set_name("Transfers")
        .context("name transfers sheet")?;
    write_rows(
        transfers_ws,
        std::iter::once(vec![
            "Date".to_string(),
            "Player".to_string(),
            "From".to_string(),
            "To".to_string(),
            "Type".to_string(),
            "Fee".to_string(),
            "Notes".to_string(),
        ])
        .chain(transfers.iter().map(|t| {
            vec![
                t.date.clone().unwrap_or_default(),
                t.player_name.clone(),
                t.from_club.clone().unwrap_or_default(),
                t.to_club.clone().unwrap_or_default(),
                t.transfer_type.clone().unwrap_or_default(),
                t.fee.clone().unwrap_or_default(),
                t.notes.clone().unwrap_or_default(),
            ]
        })),
    )?;

    let updates_ws = workbook.add_worksheet();
    updates_ws
        .set_name("Updates")
        .context("name updates sheet")?;
    write_rows(
        updates_ws,
        std::iter::once(vec![
            "Date".to_string(),
            "Type".to_string(),
            "Player".to_string(),
            "Club".to_string(),
            "Summary".to_string(),
        ])
        .chain(updates.iter().map(|u| {
            vec![
                u.date.clone(),
                u.kind.label().to_string(),
                u.player.clone(),
                u.club.clone(),
                u.summary.clone().unwrap_or_default(),
            ]
        })),
    )?;

    workbook.save(path).context("save workbook")?;

    Ok(ExportReport {
        players: players.len(),
        clubs: compliance_rows.len(),
        transfers: transfers.len(),
        updates: updates.len(),
        errors,
    })
}

fn write_roster_rows(sheet: &mut Worksheet, players: &[Player], season: u16) -> Result<()> {
    let header = vec![
        "Name".to_string(),
        "Club".to_string(),
        "Position".to_string(),
        "Number".to_string(),
        "Birth Date".to_string(),
        "Nationality".to_string(),
        "Status".to_string(),
        "Captain".to_string(),
        format!("Contract {season}"),
        "Notes".to_string(),
    ];
    let rows = players.iter().map(|p| {
        vec![
            p.name.clone(),
            p.club.clone(),
            p.position.clone().unwrap_or_default(),
            p.number.map(|n| n.to_string()).unwrap_or_default(),
            p.birth_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            p.nationality.join(";"),
            p.status.label().to_string(),
            if p.captain { "yes" } else { "" }.to_string(),
            p.season_cell(season).to_string(),
            p.notes.clone().unwrap_or_default(),
        ]
    });
    write_rows(sheet, std::iter::once(header).chain(rows))
}

fn write_rows(
    sheet: &mut Worksheet,
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
    for (row_idx, row) in rows.enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            sheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .context("write cell")?;
        }
    }
    Ok(())
}
