mod common;
mod confirm;
mod drawer;
mod result_panel;
mod search;
pub mod widgets;

pub use common::{draw_footer, draw_status_bar, draw_title_bar};
pub use confirm::{draw_clear_confirm_screen, draw_exiting_screen};
pub use drawer::draw_history_drawer;
pub use result_panel::draw_result_panel;
pub use search::draw_search_panel;

use super::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Main UI rendering entry point
pub fn ui(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, main_chunks[0]);

    // 左侧搜索 + 下拉预览，右侧结果
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    draw_search_panel(frame, app, content_chunks[0]);
    draw_result_panel(frame, app, content_chunks[1]);

    match app.current_screen {
        CurrentScreen::Main => {}
        CurrentScreen::Drawer => draw_history_drawer(frame, app, main_chunks[1]),
        CurrentScreen::ClearConfirm => {
            if app.view.drawer_open {
                draw_history_drawer(frame, app, main_chunks[1]);
            }
            draw_clear_confirm_screen(frame, app, main_chunks[1]);
        }
        CurrentScreen::Exiting => draw_exiting_screen(frame, main_chunks[1]),
    }

    draw_status_bar(frame, app, main_chunks[2]);
    draw_footer(frame, app, main_chunks[3]);
}
