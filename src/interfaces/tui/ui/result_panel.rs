use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::interfaces::tui::app::App;
use crate::interfaces::tui::constants::colors;

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(colors::MUTED)),
        Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

/// 查询结果与坐标
///
/// 失败时保留上一次结果，只在状态栏显示错误
pub fn draw_result_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Location ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::PRIMARY));

    let lines = match &app.view.result {
        None if app.view.initial_loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Locating your address...",
                Style::default().fg(colors::WARNING),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "No location to show",
                Style::default().fg(colors::MUTED),
            )),
        ],
        Some(result) => {
            let mut lines = vec![
                field_line("IP", &result.ip),
                field_line("City", &result.city),
                field_line("Region", &result.region),
                field_line("Country", &result.country),
                field_line("Postal", &result.postal),
                field_line("Timezone", &result.timezone),
                field_line("Org", &result.org),
                Line::from(""),
            ];
            match result.coordinates() {
                Some((lat, lon)) => lines.push(Line::from(vec![
                    Span::styled("Map       ", Style::default().fg(colors::MUTED)),
                    Span::styled(
                        format!("◉ {:.4}, {:.4}", lat, lon),
                        Style::default().fg(colors::SUCCESS).bold(),
                    ),
                ])),
                None => lines.push(field_line("Map", "-")),
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
