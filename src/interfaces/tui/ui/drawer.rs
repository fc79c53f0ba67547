use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::interfaces::tui::app::App;
use crate::interfaces::tui::constants::{colors, popup};
use crate::interfaces::tui::ui::widgets::Popup;

/// 历史抽屉：复选框列表 + 全选状态
pub fn draw_history_drawer(frame: &mut Frame, app: &App, area: Rect) {
    let inner = Popup::new(" Search history ", popup::HISTORY_DRAWER).render(frame, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let history = app.history();
    let selection = &app.view.selection;
    let all_selected = selection.is_all_selected(history);

    let header = Line::from(vec![
        Span::styled(
            if all_selected { "[x] " } else { "[ ] " },
            Style::default().fg(colors::WARNING),
        ),
        Span::styled("Select all", Style::default().bold()),
        Span::styled(
            format!("   {} of {} selected", selection.len(), history.len()),
            Style::default().fg(colors::MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    if history.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No search history",
                Style::default().fg(colors::MUTED),
            )),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .map(|entry| {
            let checked = selection.contains(&entry.ip);
            ListItem::new(Line::from(vec![
                Span::styled(
                    if checked { "[x] " } else { "[ ] " },
                    Style::default().fg(if checked {
                        colors::SUCCESS
                    } else {
                        colors::MUTED
                    }),
                ),
                Span::styled(format!("{:<40}", entry.ip), Style::default().fg(colors::PRIMARY)),
                Span::styled(
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    Style::default().fg(colors::MUTED),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(colors::HIGHLIGHT_BG)
            .fg(colors::HIGHLIGHT_FG)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.drawer_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
