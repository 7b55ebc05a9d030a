//! Dashboard view: greeting and notification list

use crate::app::App;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let name = app
        .state
        .session
        .as_ref()
        .map(|s| s.user.display_name().to_string())
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Welcome to Your Dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {name}"), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    draw_notifications(frame, chunks[1], app);
}

fn draw_notifications(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Notifications ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(error) = &app.state.notifications_error {
        let content = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    if app.state.notifications.is_empty() {
        let content = Paragraph::new("No notifications yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = app
        .state
        .notifications
        .iter()
        .map(|n| {
            ListItem::new(Line::from(vec![
                Span::styled(&n.sender, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" shared "),
                Span::styled(&n.subject, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  {}", n.age_label(now)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    // Keeps the selected row scrolled into view
    let mut list_state = ListState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}
