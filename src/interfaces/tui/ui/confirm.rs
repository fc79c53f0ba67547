use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::interfaces::tui::app::App;
use crate::interfaces::tui::constants::{colors, popup};
use crate::interfaces::tui::ui::widgets::Popup;

pub fn draw_clear_confirm_screen(frame: &mut Frame, app: &App, area: Rect) {
    let inner = Popup::new(" Clear history ", popup::CLEAR_CONFIRM)
        .theme_color(colors::ERROR)
        .render(frame, area);

    let text = vec![
        Line::from(format!(
            "Remove all {} history entries?",
            app.history().len()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This cannot be undone. (y/n)",
            Style::default().fg(colors::WARNING),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

pub fn draw_exiting_screen(frame: &mut Frame, area: Rect) {
    let inner = Popup::new(" Quit ", popup::EXITING)
        .theme_color(colors::WARNING)
        .render(frame, area);

    frame.render_widget(
        Paragraph::new("Quit geolookup? (y/n)").alignment(Alignment::Center),
        inner,
    );
}
