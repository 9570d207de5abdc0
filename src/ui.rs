use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};

use crate::app::AppState;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Everything one frame of the dashboard needs, computed outside the draw
/// closure so rendering stays pure. All-time figures include the live
/// session's counts.
pub struct DashboardStats {
    pub session_up: u64,
    pub session_down: u64,
    pub session_elapsed: Duration,
    pub scrolls_per_minute: f64,
    pub alltime_up: u64,
    pub alltime_down: u64,
    pub alltime_scrolls: u64,
    pub sessions: u64,
    pub alltime_seconds: f64,
}

impl DashboardStats {
    pub fn collect(state: &AppState) -> Self {
        let session = state.session.snapshot();
        let elapsed = state.started_at.elapsed();
        let totals = &state.totals;

        Self {
            session_up: session.scroll_up,
            session_down: session.scroll_down,
            session_elapsed: elapsed,
            scrolls_per_minute: scrolls_per_minute(session.total(), elapsed),
            alltime_up: totals.total_scroll_up + session.scroll_up,
            alltime_down: totals.total_scroll_down + session.scroll_down,
            alltime_scrolls: totals.total_scrolls + session.total(),
            sessions: totals.total_sessions + 1,
            alltime_seconds: totals.total_time_seconds + elapsed.as_secs_f64(),
        }
    }

    pub fn session_total(&self) -> u64 {
        self.session_up + self.session_down
    }
}

/// Session scroll rate; reported as zero until enough time has passed for
/// the rate to mean anything.
pub fn scrolls_per_minute(total: u64, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes > 0.05 {
        total as f64 / minutes
    } else {
        0.0
    }
}

/// Fraction of session scrolls going up, for the direction gauge.
pub fn direction_ratio(up: u64, down: u64) -> f64 {
    let total = up + down;
    if total == 0 {
        0.0
    } else {
        up as f64 / total as f64
    }
}

/// Renders seconds as `2h 14m 03s`, omitting leading zero units.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 || hours > 0 {
        parts.push(format!("{:02}m", minutes));
    }
    parts.push(format!("{:02}s", seconds));
    parts.join(" ")
}

pub fn draw(frame: &mut Frame, stats: &DashboardStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(7), // session panel
            Constraint::Length(3), // direction gauge
            Constraint::Length(7), // all-time panel
            Constraint::Length(1), // footer
            Constraint::Min(0),
        ])
        .split(frame.area());

    frame.render_widget(title(), chunks[0]);
    frame.render_widget(session_panel(stats), chunks[1]);
    frame.render_widget(direction_gauge(stats), chunks[2]);
    frame.render_widget(alltime_panel(stats), chunks[3]);
    frame.render_widget(footer(), chunks[4]);
}

fn title() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        "SCROLL WHEEL TRACKER",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
}

fn session_panel(stats: &DashboardStats) -> Paragraph<'static> {
    let lines = vec![
        stat_line("Scroll Up", stats.session_up.to_string()),
        stat_line("Scroll Down", stats.session_down.to_string()),
        stat_line("Total Scrolls", stats.session_total().to_string()),
        stat_line(
            "Duration",
            format_duration(stats.session_elapsed.as_secs()),
        ),
        stat_line("Scrolls/min", format!("{:.1}", stats.scrolls_per_minute)),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" SESSION ")
            .title_alignment(Alignment::Center),
    )
}

fn direction_gauge(stats: &DashboardStats) -> Gauge<'static> {
    let ratio = direction_ratio(stats.session_up, stats.session_down);
    let label = format!("{} up / {} down", stats.session_up, stats.session_down);

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Direction "))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label)
}

fn alltime_panel(stats: &DashboardStats) -> Paragraph<'static> {
    let lines = vec![
        stat_line("Scroll Up", stats.alltime_up.to_string()),
        stat_line("Scroll Down", stats.alltime_down.to_string()),
        stat_line("Total Scrolls", stats.alltime_scrolls.to_string()),
        stat_line("Sessions", stats.sessions.to_string()),
        stat_line(
            "Total Time",
            format_duration(stats.alltime_seconds as u64),
        ),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ALL TIME ")
            .title_alignment(Alignment::Center),
    )
}

fn footer() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        "q / Esc / Ctrl+C to stop and save",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<14}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value),
    ])
}
