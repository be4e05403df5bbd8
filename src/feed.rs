//! Background provider: fetches all five sheets on startup, re-fetches on a
//! poll interval, and serves explicit refresh/export commands. A dataset
//! failure becomes a console log line, never a dead thread.

use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::clubs_fetch;
use crate::export;
use crate::roster_fetch;
use crate::state::{Delta, ProviderCommand};
use crate::transfers_fetch;
use crate::updates_fetch;

const DEFAULT_POLL_SECS: u64 = 300;
const MIN_POLL_SECS: u64 = 60;

fn poll_interval() -> Duration {
    let secs = env::var("SHEETS_POLL_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_POLL_SECS)
        .max(MIN_POLL_SECS);
    Duration::from_secs(secs)
}

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let poll = poll_interval();
        let mut last_refresh: Option<Instant> = None;

        loop {
            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    ProviderCommand::RefreshAll => {
                        fetch_all(&tx);
                        last_refresh = Some(Instant::now());
                    }
                    ProviderCommand::FetchPlayers => fetch_players(&tx),
                    ProviderCommand::FetchTransfers => fetch_transfers(&tx),
                    ProviderCommand::FetchClubsMeta => fetch_clubs_meta(&tx),
                    ProviderCommand::FetchHonours => fetch_honours(&tx),
                    ProviderCommand::FetchUpdates => fetch_updates(&tx),
                    ProviderCommand::ExportWorkbook { path } => {
                        let tx = tx.clone();
                        thread::spawn(move || run_export(&tx, path));
                    }
                }
            }

            let due = last_refresh
                .map(|at| at.elapsed() >= poll)
                .unwrap_or(true);
            if due {
                fetch_all(&tx);
                last_refresh = Some(Instant::now());
            }

            thread::sleep(Duration::from_millis(250));
        }
    });
}

fn fetch_all(tx: &Sender<Delta>) {
    fetch_players(tx);
    fetch_transfers(tx);
    fetch_clubs_meta(tx);
    fetch_honours(tx);
    fetch_updates(tx);
}

fn fetch_players(tx: &Sender<Delta>) {
    match roster_fetch::fetch_players() {
        Ok(players) => {
            let _ = tx.send(Delta::Log(format!("[INFO] Players loaded: {}", players.len())));
            let _ = tx.send(Delta::SetPlayers(players));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Players fetch failed: {err:#}")));
        }
    }
}

fn fetch_transfers(tx: &Sender<Delta>) {
    match transfers_fetch::fetch_transfers() {
        Ok(transfers) => {
            let _ = tx.send(Delta::SetTransfers(transfers));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Transfers fetch failed: {err:#}")));
        }
    }
}

fn fetch_clubs_meta(tx: &Sender<Delta>) {
    match clubs_fetch::fetch_clubs_meta() {
        Ok(clubs) => {
            let _ = tx.send(Delta::SetClubsMeta(clubs));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Clubs meta fetch failed: {err:#}")));
        }
    }
}

fn fetch_honours(tx: &Sender<Delta>) {
    match clubs_fetch::fetch_clubs_honours() {
        Ok(rows) => {
            let _ = tx.send(Delta::SetHonours(rows));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Honours fetch failed: {err:#}")));
        }
    }
}

fn fetch_updates(tx: &Sender<Delta>) {
    match updates_fetch::fetch_updates() {
        Ok(updates) => {
            let _ = tx.send(Delta::SetUpdates(updates));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Updates fetch failed: {err:#}")));
        }
    }
}

fn run_export(tx: &Sender<Delta>, path: String) {
    let _ = tx.send(Delta::ExportStarted { path: path.clone() });
    match export::export_workbook(&PathBuf::from(&path)) {
        Ok(report) => {
            for err in &report.errors {
                let _ = tx.send(Delta::Log(format!("[WARN] Export dataset failed: {err}")));
            }
            let _ = tx.send(Delta::ExportFinished {
                path,
                rows: report.total_rows(),
            });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Export failed: {err:#}")));
        }
    }
}
