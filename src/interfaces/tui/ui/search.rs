use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::interfaces::tui::app::{App, Focus};
use crate::interfaces::tui::constants::colors;

/// 搜索框 + 最近 5 条历史
pub fn draw_search_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let focused = app.focus == Focus::Search;
    let border = if focused { colors::WARNING } else { colors::MUTED };
    let title = if app.view.searching {
        " IP address (searching...) "
    } else {
        " IP address "
    };

    let mut text = vec![Span::raw(app.search_input.as_str())];
    if focused {
        text.push(Span::styled("█", Style::default().fg(colors::WARNING)));
    }
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, chunks[0]);

    let preview = app.preview();
    let block = Block::default()
        .title(" Recent searches ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::MUTED));

    if preview.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No recent searches",
            Style::default().fg(colors::MUTED),
        )))
        .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = preview
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(entry.ip.clone(), Style::default().fg(colors::PRIMARY)),
                Span::styled(
                    format!("  {}", entry.timestamp.format("%m-%d %H:%M")),
                    Style::default().fg(colors::MUTED),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(colors::HIGHLIGHT_BG)
            .fg(colors::HIGHLIGHT_FG)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if app.focus == Focus::Dropdown {
        state.select(Some(app.dropdown_index));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
