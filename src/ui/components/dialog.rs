//! Error dialog component

use crate::ui::layout::centered;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

const DIALOG_WIDTH: u16 = 60;

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]);

    // Rough line count after wrapping inside borders and padding
    let inner_width = (DIALOG_WIDTH - 4) as usize;
    let message_lines: u16 = error_message
        .split('\n')
        .map(|l| (l.chars().count() / inner_width + 1) as u16)
        .sum();
    let height = message_lines + 4;

    let area = centered(frame.area(), DIALOG_WIDTH, height);
    frame.render_widget(Clear, area);

    let mut content: Vec<Line> = error_message
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    content.push(Line::from(""));
    content.push(hint);

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    " Error ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .padding(Padding::horizontal(1)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, area);
}
