//! Live dashboard command

use crate::client::FeedClient;
use crate::config::Config;
use crate::poller::{start_event_poller, start_log_poller, FeedMessage};
use crate::tui::DashboardApp;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the dashboard until the user quits
pub async fn run(config: Config) -> Result<()> {
    let client = FeedClient::new(&config);
    let period = Duration::from_millis(config.poll_interval_ms);

    // One channel, two independent pollers. Results arrive in completion
    // order; a fetch slower than the period is never aborted.
    let (tx, mut rx) = mpsc::channel::<FeedMessage>(100);
    let event_poller = start_event_poller(client.clone(), period, tx.clone());
    let log_poller = start_log_poller(client, period, tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new();
    let result = run_loop(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    event_poller.stop();
    log_poller.stop();

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    rx: &mut mpsc::Receiver<FeedMessage>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| crate::tui::draw(f, app))?;

        tokio::select! {
            // Handle keyboard events (non-blocking)
            _ = tick_interval.tick() => {
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        app.handle_key(key);
                        if app.should_quit {
                            return Ok(());
                        }
                    }
                }
            }

            // Handle fetch results from the pollers
            message = rx.recv() => {
                match message {
                    Some(message) => app.handle_message(message),
                    None => return Ok(()),
                }
            }
        }
    }
}
