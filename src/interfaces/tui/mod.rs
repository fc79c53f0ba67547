//! Terminal User Interface (TUI) module
//!
//! Interactive front end over [`LookupController`](crate::controller::LookupController):
//! search box, recent-search dropdown, result panel and history drawer.

use std::io::{self, Stderr};

use anyhow::{Result, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
};
use tracing::info;

mod app;
mod constants;
mod event_handler;
mod ui;

use crate::runtime::lifetime::startup::ClientContext;
use app::App;
use constants::EVENT_POLL_INTERVAL;
use ui::ui;

/// Run the TUI application
///
/// 需要已登录；未登录时直接返回错误，不进入界面
pub async fn run_tui(ctx: ClientContext) -> Result<()> {
    if let Err(e) = ctx.session.require_token() {
        bail!("{}", e.message());
    }

    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx.controller, ctx.session);
    app.mount();
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI closed");
    res
}

/// Main application loop
///
/// 查询在后台任务中执行，每轮轮询之间让出运行时
async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(EVENT_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && event_handler::handle_key_event(app, key.code, key.modifiers)
        {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
