use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::app::{App, CurrentScreen};
use crate::interfaces::tui::constants::colors;

/// Draw title bar with version, user and history size
pub fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("geolookup", Style::default().fg(colors::PRIMARY).bold()),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors::MUTED),
        ),
        Span::styled("| ", Style::default().fg(colors::MUTED)),
        Span::styled(
            format!("History: {} ", app.history().len()),
            Style::default().fg(colors::WARNING),
        ),
    ];
    if !app.user_name.is_empty() {
        spans.push(Span::styled("| ", Style::default().fg(colors::MUTED)));
        spans.push(Span::styled(
            app.user_name.clone(),
            Style::default().fg(colors::SUCCESS),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors::PRIMARY)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

/// Draw status bar
///
/// 控制器错误优先于本地提示
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(error) = &app.view.error {
        (
            format!("[ERROR] {}", error),
            Style::default().fg(Color::White).bg(colors::ERROR).bold(),
        )
    } else if !app.status_message.is_empty() {
        (
            format!("[OK] {}", app.status_message),
            Style::default().fg(Color::Black).bg(colors::SUCCESS).bold(),
        )
    } else if app.view.searching || app.view.initial_loading {
        ("Searching...".to_string(), Style::default().fg(colors::WARNING))
    } else {
        ("Ready".to_string(), Style::default().fg(colors::PRIMARY))
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center);

    frame.render_widget(status, area);
}

/// Draw footer with keyboard shortcuts
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_screen {
        CurrentScreen::Main => vec![
            ("Enter", "Search", colors::SUCCESS),
            ("Up/Down", "Recent", colors::PRIMARY),
            ("Tab", "History", colors::PRIMARY),
            ("Ctrl+L", "My IP", colors::WARNING),
            ("Ctrl+O", "Logout", Color::Magenta),
            ("Esc", "Quit", colors::ERROR),
        ],
        CurrentScreen::Drawer => vec![
            ("Space", "Select", colors::PRIMARY),
            ("a", "All", colors::PRIMARY),
            ("Enter", "Look up", colors::SUCCESS),
            ("d", "Delete", colors::ERROR),
            ("D", "Delete selected", colors::ERROR),
            ("c", "Clear all", Color::Magenta),
            ("Esc", "Close", colors::WARNING),
        ],
        CurrentScreen::ClearConfirm | CurrentScreen::Exiting => {
            vec![("y", "Yes", colors::SUCCESS), ("n", "No", colors::ERROR)]
        }
    };

    let mut spans = Vec::new();
    for (i, (key, desc, color)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(colors::MUTED)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(*color).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
