//! Event handling for TUI
//!
//! Handles keyboard events per screen. Returns `true` when the app should exit.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::interfaces::tui::app::{App, CurrentScreen, Focus};

pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return true;
    }

    match app.current_screen {
        CurrentScreen::Main => handle_main_screen(app, code, modifiers),
        CurrentScreen::Drawer => handle_drawer_screen(app, code),
        CurrentScreen::ClearConfirm => handle_clear_confirm_screen(app, code),
        CurrentScreen::Exiting => handle_exiting_screen(app, code),
    }
}

/// 主屏幕：搜索框输入 + 下拉历史预览
fn handle_main_screen(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('l') => app.clear_search(),
            KeyCode::Char('o') => return app.logout(),
            _ => {}
        }
        return false;
    }

    match code {
        KeyCode::Esc => {
            if app.focus == Focus::Dropdown {
                app.focus = Focus::Search;
            } else if app.view.error.is_some() || !app.status_message.is_empty() {
                app.clear_messages();
            } else {
                app.current_screen = CurrentScreen::Exiting;
            }
        }
        KeyCode::Enter => match app.focus {
            Focus::Search => app.submit_search(),
            Focus::Dropdown => app.select_dropdown_entry(),
        },
        KeyCode::Tab => app.open_drawer(),
        KeyCode::Down => app.move_dropdown(true),
        KeyCode::Up => app.move_dropdown(false),
        KeyCode::Backspace => {
            app.focus = Focus::Search;
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.focus = Focus::Search;
            app.search_input.push(c);
        }
        _ => {}
    }
    false
}

/// 历史抽屉：勾选、删除、清空
fn handle_drawer_screen(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_drawer(),
        KeyCode::Up | KeyCode::Char('k') => app.drawer_up(),
        KeyCode::Down | KeyCode::Char('j') => app.drawer_down(),
        KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Char('a') => app.toggle_all(),
        KeyCode::Char('d') => app.delete_current(),
        KeyCode::Char('D') => app.delete_selected(),
        KeyCode::Char('c') => {
            if !app.history().is_empty() {
                app.current_screen = CurrentScreen::ClearConfirm;
            }
        }
        KeyCode::Enter => {
            app.select_current();
            app.close_drawer();
        }
        _ => {}
    }
    false
}

fn handle_clear_confirm_screen(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.clear_history(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.current_screen = if app.view.drawer_open {
                CurrentScreen::Drawer
            } else {
                CurrentScreen::Main
            };
        }
        _ => {}
    }
    false
}

fn handle_exiting_screen(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.current_screen = CurrentScreen::Main;
            false
        }
        _ => false,
    }
}
