use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use canpl_terminal::clubs::{self, short_club_tag, ClubInfo};
use canpl_terminal::compliance::{
    recent_additions, recent_departures, CPL_INTERNATIONAL_CAP, CPL_ROSTER_MAX, CPL_ROSTER_MIN,
};
use canpl_terminal::contracts::{age_bucket, contract_status, ContractStatus};
use canpl_terminal::feed;
use canpl_terminal::persist;
use canpl_terminal::roster_fetch::Player;
use canpl_terminal::state::{
    apply_delta, screen_label, sort_key_label, AppState, Delta, ProviderCommand, Screen, SortDir,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.state.search_active = false;
                    self.state.search.clear();
                    self.state.clamp_selection();
                }
                KeyCode::Enter => self.state.search_active = false,
                KeyCode::Backspace => {
                    self.state.search.pop();
                    self.state.clamp_selection();
                }
                KeyCode::Char(c) => {
                    self.state.search.push(c);
                    self.state.selected = 0;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.switch_screen(Screen::Overview),
            KeyCode::Char('2') => self.switch_screen(Screen::Players),
            KeyCode::Char('3') => self.switch_screen(Screen::Clubs),
            KeyCode::Char('4') => self.switch_screen(Screen::Transfers),
            KeyCode::Char('5') => self.switch_screen(Screen::Updates),
            KeyCode::Char('6') => self.switch_screen(Screen::FreeAgents),
            KeyCode::Enter => {
                if self.state.screen == Screen::Clubs {
                    if let Some(club) = clubs::CLUBS.get(self.state.clubs_selected) {
                        self.switch_screen(Screen::ClubDetail {
                            slug: club.slug.to_string(),
                        });
                    }
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => {
                if matches!(self.state.screen, Screen::ClubDetail { .. }) {
                    self.state.screen = Screen::Clubs;
                } else {
                    self.switch_screen(Screen::Overview);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('s') => self.state.cycle_sort_key(),
            KeyCode::Char('r') => self.state.toggle_sort_dir(),
            KeyCode::Char('y') => self.state.cycle_season(),
            KeyCode::Char('/') => {
                if matches!(
                    self.state.screen,
                    Screen::Players | Screen::FreeAgents | Screen::Overview
                ) {
                    self.state.search_active = true;
                }
            }
            KeyCode::Char('e') => self.request_export(),
            KeyCode::Char('R') => self.request_refresh(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.state.screen = screen;
        self.state.selected = 0;
        self.state.search_active = false;
    }

    fn request_refresh(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Refresh unavailable");
            return;
        };
        if tx.send(ProviderCommand::RefreshAll).is_err() {
            self.state.push_log("[WARN] Refresh request failed");
        } else {
            self.state.push_log("[INFO] Refresh requested");
        }
    }

    fn request_export(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Export unavailable");
            return;
        };
        let path = std::env::var("EXPORT_XLSX_PATH").unwrap_or_else(|_| "cpl_rosters.xlsx".into());
        if tx.send(ProviderCommand::ExportWorkbook { path }).is_err() {
            self.state.push_log("[WARN] Export request failed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    persist::load_into_state(&mut app.state);
    let res = run_app(&mut terminal, &mut app, rx);

    persist::save_from_state(&app.state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.maybe_clear_export(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::Overview => render_overview(frame, chunks[1], &app.state),
        Screen::Players | Screen::FreeAgents => render_players(frame, chunks[1], &app.state),
        Screen::Clubs => render_clubs(frame, chunks[1], &app.state),
        Screen::ClubDetail { slug } => render_club_detail(frame, chunks[1], &app.state, slug),
        Screen::Transfers => render_transfers(frame, chunks[1], &app.state),
        Screen::Updates => render_updates(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let mut line = format!(
        "CPL TERMINAL | {} | Season {} | Sort: {} {}",
        screen_label(&state.screen),
        state.active_season(),
        sort_key_label(state.sort_key),
        match state.sort_dir {
            SortDir::Asc => "↑",
            SortDir::Desc => "↓",
        }
    );
    if state.search_active {
        line.push_str(&format!(" | /{}", state.search));
    } else if !state.search.is_empty() {
        line.push_str(&format!(" | filter: {}", state.search));
    }
    if let Some(notice) = &state.export_notice {
        line.push_str(&format!(" | {notice}"));
    }
    line
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to filter | Enter Keep | Esc Clear".to_string();
    }
    match &state.screen {
        Screen::Clubs => {
            "1-6 Screens | Enter Club | j/k/↑/↓ Move | R Refresh | ? Help | q Quit".to_string()
        }
        Screen::ClubDetail { .. } => {
            "b/Esc Back | s Sort | r Reverse | y Season | ? Help | q Quit".to_string()
        }
        Screen::Transfers | Screen::Updates => {
            "1-6 Screens | j/k/↑/↓ Scroll | R Refresh | ? Help | q Quit".to_string()
        }
        _ => "1-6 Screens | j/k Move | s Sort | r Reverse | / Search | y Season | e Export | R Refresh | ? Help | q Quit"
            .to_string(),
    }
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(5)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(48), Constraint::Length(44)])
        .split(rows[0]);

    render_compliance_table(frame, columns[0], state);
    render_recent_moves(frame, columns[1], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[1]);
}

fn render_compliance_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!("Roster Compliance {}", state.active_season()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let widths = [
        Constraint::Min(22),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let header_style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, header_cols[0], "Club", header_style);
    render_cell_text(frame, header_cols[1], "Roster", header_style);
    render_cell_text(frame, header_cols[2], "Intl", header_style);
    render_cell_text(frame, header_cols[3], "U-21", header_style);
    render_cell_text(frame, header_cols[4], "U-18", header_style);
    render_cell_text(frame, header_cols[5], "EYT", header_style);

    let compliance = state.compliance_rows();
    if compliance.is_empty() {
        let empty =
            Paragraph::new("No roster data yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return;
    }

    let list_area = sections[1];
    for (i, row) in compliance
        .iter()
        .take(list_area.height as usize)
        .enumerate()
    {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let roster_style = if row.roster_size_in_band() {
            Style::default()
        } else {
            Style::default().fg(Color::Yellow)
        };
        let intl_style = if row.over_international_cap() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        render_cell_text(frame, cols[0], &row.club, Style::default());
        render_cell_text(
            frame,
            cols[1],
            &format!("{}/{}-{}", row.total, CPL_ROSTER_MIN, CPL_ROSTER_MAX),
            roster_style,
        );
        render_cell_text(
            frame,
            cols[2],
            &format!("{}/{}", row.internationals, CPL_INTERNATIONAL_CAP),
            intl_style,
        );
        render_cell_text(frame, cols[3], &row.u21.to_string(), Style::default());
        render_cell_text(frame, cols[4], &row.u18.to_string(), Style::default());
        render_cell_text(frame, cols[5], &row.eyt.to_string(), Style::default());
    }
}

fn render_recent_moves(frame: &mut Frame, area: Rect, state: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    const MOVE_LIMIT: usize = 8;
    let season = state.active_season();

    let additions = recent_additions(&state.players, season, MOVE_LIMIT);
    let additions_text = if additions.is_empty() {
        "Nothing flagged".to_string()
    } else {
        additions
            .iter()
            .map(|p| move_line(p))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let additions_widget = Paragraph::new(additions_text)
        .block(Block::default().title("Recent Additions").borders(Borders::ALL));
    frame.render_widget(additions_widget, halves[0]);

    let departures = recent_departures(&state.players, MOVE_LIMIT);
    let departures_text = if departures.is_empty() {
        "Nothing flagged".to_string()
    } else {
        departures
            .iter()
            .map(|p| move_line(p))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let departures_widget = Paragraph::new(departures_text)
        .block(Block::default().title("Recent Departures").borders(Borders::ALL));
    frame.render_widget(departures_widget, halves[1]);
}

fn move_line(player: &Player) -> String {
    let tag = if player.club.is_empty() {
        "---".to_string()
    } else {
        short_club_tag(&player.club)
    };
    let notes = player.notes.as_deref().unwrap_or("");
    format!("{tag:<4}{} | {notes}", player.name)
}

fn player_columns() -> [Constraint; 7] {
    [
        Constraint::Length(4),
        Constraint::Min(22),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Min(14),
    ]
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    // Free agents have no live contract cells; their notes column carries
    // the story instead.
    let free_agents = state.screen == Screen::FreeAgents;

    let widths = player_columns();
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, header_cols[0], "Num", style);
    render_cell_text(frame, header_cols[1], "Name", style);
    render_cell_text(frame, header_cols[2], "Club", style);
    render_cell_text(frame, header_cols[3], "Pos", style);
    render_cell_text(frame, header_cols[4], "Age", style);
    render_cell_text(frame, header_cols[5], "Nat", style);
    render_cell_text(
        frame,
        header_cols[6],
        if free_agents { "Notes" } else { "Contract" },
        style,
    );

    let list_area = sections[1];
    let players = state.visible_players();
    if players.is_empty() {
        let empty =
            Paragraph::new("No players match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, players.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let p = players[idx];
        let num = p
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "--".to_string());
        let name = if p.captain {
            format!("{} (C)", p.name)
        } else {
            p.name.clone()
        };
        let tag = if p.club.is_empty() {
            "---".to_string()
        } else {
            short_club_tag(&p.club)
        };
        let pos = p.position.as_deref().unwrap_or("-");
        let age = state
            .player_age(p)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        let nat = if p.nationality.is_empty() {
            "-".to_string()
        } else {
            p.nationality.join("/")
        };
        let (contract, contract_style) = if free_agents {
            (p.notes.clone().unwrap_or_else(|| "-".to_string()), row_style)
        } else {
            contract_cell(state, p, row_style)
        };

        render_cell_text(frame, cols[0], &num, row_style);
        render_cell_text(frame, cols[1], &name, row_style);
        render_cell_text(frame, cols[2], &tag, row_style);
        render_cell_text(frame, cols[3], pos, row_style);
        render_cell_text(frame, cols[4], &age, row_style);
        render_cell_text(frame, cols[5], &nat, row_style);
        render_cell_text(frame, cols[6], &contract, contract_style);
    }
}

/// Raw season cell plus an age badge, coloured by contract kind.
fn contract_cell(state: &AppState, player: &Player, base: Style) -> (String, Style) {
    let season = state.active_season();
    let cell = player.season_cell(season);
    let mut label = if cell.is_empty() {
        "-".to_string()
    } else {
        cell.to_string()
    };
    if let Some(bucket) = state.player_age(player).and_then(age_bucket) {
        label.push(' ');
        label.push_str(bucket.label());
    }

    let style = match contract_status(cell) {
        Some(ContractStatus::International) => base.fg(Color::Yellow),
        Some(ContractStatus::Eyt)
        | Some(ContractStatus::USports)
        | Some(ContractStatus::Development) => base.fg(Color::Cyan),
        Some(ContractStatus::OptionPending) | Some(ContractStatus::InDiscussion) => {
            base.fg(Color::DarkGray)
        }
        _ => base,
    };
    (label, style)
}

fn render_clubs(frame: &mut Frame, area: Rect, state: &AppState) {
    let honours = state.honours_summary();
    let list_area = area;

    if list_area.height == 0 {
        return;
    }

    const ROW_HEIGHT: u16 = 2;
    let visible = (list_area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.clubs_selected, clubs::CLUBS.len(), visible.max(1));

    for (i, idx) in (start..end).enumerate() {
        let club = &clubs::CLUBS[idx];
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + (i as u16) * ROW_HEIGHT,
            width: list_area.width,
            height: ROW_HEIGHT,
        };
        if row_area.y + ROW_HEIGHT > list_area.y + list_area.height {
            break;
        }

        let selected = idx == state.clubs_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let summary = honours.get(club.slug);
        let titles = summary
            .map(|s| {
                format!(
                    "NSC x{} | Shield x{}",
                    s.north_star_cup_titles(),
                    s.cpl_shield_titles()
                )
            })
            .unwrap_or_else(|| "No honours data".to_string());

        let text = format!(
            "{} ({})\n  {} | {} | joined {} | {titles}",
            club.name, club.location, club.stadium, coach_line(state, club), club.joined
        );
        let paragraph = Paragraph::new(text).style(row_style);
        frame.render_widget(paragraph, row_area);
    }
}

fn coach_line(state: &AppState, club: &ClubInfo) -> String {
    // Sheet meta wins over the static directory when both name a coach.
    state
        .club_meta_for(club.slug)
        .and_then(|meta| meta.manager)
        .unwrap_or_else(|| club.head_coach.to_string())
}

fn render_club_detail(frame: &mut Frame, area: Rect, state: &AppState, slug: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(area);

    let info = Paragraph::new(club_info_text(state, slug))
        .block(Block::default().title("Club").borders(Borders::ALL));
    frame.render_widget(info, rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(40)])
        .split(rows[1]);

    render_players(frame, bottom[0], state);
    render_club_transfers(frame, bottom[1], state, slug);
}

fn club_info_text(state: &AppState, slug: &str) -> String {
    let meta = state.club_meta_for(slug);
    let fallback = clubs::club_by_slug(slug);

    let name = meta
        .as_ref()
        .map(|m| m.display_name.clone())
        .or_else(|| fallback.map(|c| c.name.to_string()))
        .unwrap_or_else(|| slug.to_string());
    let location = meta
        .as_ref()
        .and_then(|m| m.location.clone())
        .or_else(|| fallback.map(|c| c.location.to_string()))
        .unwrap_or_else(|| "-".to_string());
    let stadium = meta
        .as_ref()
        .and_then(|m| m.stadium.clone())
        .or_else(|| fallback.map(|c| c.stadium.to_string()))
        .unwrap_or_else(|| "-".to_string());
    let capacity = meta
        .as_ref()
        .and_then(|m| m.capacity)
        .or_else(|| fallback.map(|c| c.capacity))
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    let joined = meta
        .as_ref()
        .and_then(|m| m.joined)
        .or_else(|| fallback.map(|c| c.joined as u32))
        .map(|j| j.to_string())
        .unwrap_or_else(|| "-".to_string());
    let coach = meta
        .as_ref()
        .and_then(|m| m.manager.clone())
        .or_else(|| fallback.map(|c| c.head_coach.to_string()))
        .unwrap_or_else(|| "-".to_string());

    let honours = state.honours_summary();
    let honours_line = honours
        .get(slug)
        .map(|s| {
            format!(
                "North Star Cup: {} | CPL Shield: {}",
                years_line(&s.north_star_cup_years),
                years_line(&s.cpl_shield_years)
            )
        })
        .unwrap_or_else(|| "No honours data".to_string());

    let mut lines = vec![
        name,
        format!("{location} | {stadium} (cap {capacity}) | joined {joined}"),
        format!("Head coach: {coach}"),
        honours_line,
    ];
    if let Some(meta) = &meta {
        if meta.defunct {
            let last = meta
                .last_season
                .map(|y| y.to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(format!("Defunct since {last}"));
        }
    }
    lines.join("\n")
}

fn years_line(years: &[u32]) -> String {
    if years.is_empty() {
        return "none".to_string();
    }
    years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_club_transfers(frame: &mut Frame, area: Rect, state: &AppState, slug: &str) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let incoming = state.transfers_in(slug);
    let incoming_text = if incoming.is_empty() {
        "None recorded".to_string()
    } else {
        incoming
            .iter()
            .map(|t| {
                format!(
                    "{} <- {}",
                    t.player_name,
                    t.from_club.as_deref().unwrap_or("?")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let incoming_widget = Paragraph::new(incoming_text)
        .block(Block::default().title("Transfers In").borders(Borders::ALL));
    frame.render_widget(incoming_widget, halves[0]);

    let outgoing = state.transfers_out(slug);
    let outgoing_text = if outgoing.is_empty() {
        "None recorded".to_string()
    } else {
        outgoing
            .iter()
            .map(|t| {
                format!(
                    "{} -> {}",
                    t.player_name,
                    t.to_club.as_deref().unwrap_or("?")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let outgoing_widget = Paragraph::new(outgoing_text)
        .block(Block::default().title("Transfers Out").borders(Borders::ALL));
    frame.render_widget(outgoing_widget, halves[1]);
}

fn transfer_columns() -> [Constraint; 6] {
    [
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Min(10),
    ]
}

fn render_transfers(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = transfer_columns();
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, header_cols[0], "Date", style);
    render_cell_text(frame, header_cols[1], "Player", style);
    render_cell_text(frame, header_cols[2], "From", style);
    render_cell_text(frame, header_cols[3], "To", style);
    render_cell_text(frame, header_cols[4], "Type", style);
    render_cell_text(frame, header_cols[5], "Fee", style);

    let list_area = sections[1];
    if state.transfers.is_empty() {
        let empty = Paragraph::new("No transfers yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let total = state.transfers.len();
    let max_start = total.saturating_sub(visible);
    let start = (state.transfers_scroll as usize).min(max_start);
    let end = (start + visible).min(total);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let t = &state.transfers[idx];
        render_cell_text(
            frame,
            cols[0],
            t.date.as_deref().unwrap_or("-"),
            Style::default(),
        );
        render_cell_text(frame, cols[1], &t.player_name, Style::default());
        render_cell_text(
            frame,
            cols[2],
            t.from_club.as_deref().unwrap_or("-"),
            Style::default(),
        );
        render_cell_text(
            frame,
            cols[3],
            t.to_club.as_deref().unwrap_or("-"),
            Style::default(),
        );
        render_cell_text(
            frame,
            cols[4],
            t.transfer_type.as_deref().unwrap_or("-"),
            Style::default(),
        );
        render_cell_text(
            frame,
            cols[5],
            t.fee.as_deref().unwrap_or("-"),
            Style::default(),
        );
    }
}

fn render_updates(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.updates.is_empty() {
        let empty = Paragraph::new("No updates yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }
    if area.height == 0 {
        return;
    }

    let visible = area.height as usize;
    let total = state.updates.len();
    let max_start = total.saturating_sub(visible);
    let start = (state.updates_scroll as usize).min(max_start);
    let end = (start + visible).min(total);

    let mut lines = Vec::with_capacity(end - start);
    for u in &state.updates[start..end] {
        let kind_tag = match u.kind.label() {
            "Signing" => "SIG",
            "Departure" => "DEP",
            _ => "EXT",
        };
        let summary = u.summary.as_deref().unwrap_or("");
        lines.push(format!(
            "{} [{kind_tag}] {} - {} {}",
            u.date, u.player, u.club, summary
        ));
    }
    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CPL Terminal - Help",
        "",
        "Screens:",
        "  1  Overview      4  Transfers",
        "  2  Players       5  Updates",
        "  3  Clubs         6  Free agents",
        "",
        "Global:",
        "  Enter        Open club (Clubs screen)",
        "  b / Esc      Back",
        "  j/k or ↑/↓   Move/scroll",
        "  s            Cycle sort column",
        "  r            Reverse sort",
        "  /            Search players",
        "  y            Cycle season",
        "  e            Export workbook",
        "  R            Refresh all sheets",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
