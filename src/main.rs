use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

mod app;
mod config;
mod listener;
mod logger;
mod metrics;
mod store;
mod ui;

use crate::app::AppState;
use crate::config::Config;
use crate::logger::FileLogger;
use crate::ui::DashboardStats;

fn main() -> Result<()> {
    let log_path = FileLogger::init()?;
    log::info!("Starting scroll tracker, logging to {}", log_path.display());

    let config = Config::load()?;
    let state = AppState::initialize(&config)?;
    log::info!("Totals file: {}", state.store.path().display());

    listener::spawn(Arc::clone(&state));

    let rt = Runtime::new()?;
    let ui_result = rt.block_on(run(Arc::clone(&state), &config));

    // Merge and save even if the UI loop failed, then surface its error.
    let session = state.session.snapshot();
    let elapsed = state.started_at.elapsed();
    let ended_at = chrono::Local::now().to_rfc3339();

    let mut totals = state.totals.clone();
    totals.absorb(&session, elapsed, &ended_at);
    state.store.save(&totals)?;
    log::info!(
        "Session saved: {} up, {} down over {}",
        session.scroll_up,
        session.scroll_down,
        ui::format_duration(elapsed.as_secs())
    );

    ui_result?;

    println!();
    println!("  Session saved!");
    println!(
        "  You scrolled {} times in {}.",
        session.total(),
        ui::format_duration(elapsed.as_secs())
    );
    println!(
        "  (Up: {}  Down: {})",
        session.scroll_up, session.scroll_down
    );
    println!();
    println!("  Data stored in: {}", state.store.path().display());

    Ok(())
}

/// Render loop: redraw on every tick, quit on a quit key or SIGINT. The
/// terminal is restored before errors propagate.
async fn run(state: Arc<AppState>, config: &Config) -> Result<()> {
    let mut terminal = ui::init_terminal()?;
    let mut keys = spawn_key_reader();
    let mut tick =
        tokio::time::interval(Duration::from_millis(config.refresh_interval_ms.max(1)));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            _ = tick.tick() => {
                let stats = DashboardStats::collect(&state);
                if let Err(e) = terminal.draw(|frame| ui::draw(frame, &stats)) {
                    break Err(e.into());
                }
            }
            Some(key) = keys.recv() => {
                if is_quit_key(&key) {
                    break Ok(());
                }
            }
            _ = &mut ctrl_c => break Ok(()),
        }
    };

    ui::restore_terminal(&mut terminal)?;
    result
}

/// Terminal key events, read on a dedicated thread because crossterm's
/// polling API blocks.
fn spawn_key_reader() -> mpsc::Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || loop {
        if crossterm::event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(Event::Key(key)) = crossterm::event::read() {
                if tx.blocking_send(key).is_err() {
                    break;
                }
            }
        } else if tx.is_closed() {
            break;
        }
    });

    rx
}

/// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key event.
fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys_are_recognized() {
        assert!(is_quit_key(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&press(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn other_keys_keep_the_app_running() {
        assert!(!is_quit_key(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&press(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&press(KeyCode::Up, KeyModifiers::NONE)));
    }
}
