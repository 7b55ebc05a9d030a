//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar and return the content area
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Key hints for the current view
pub fn get_view_hints(view: &View) -> &'static str {
    match view {
        View::Login => "Tab:next  Enter:sign in  ^N:sign up  ^R:register  ^F:forgot password  Esc:quit",
        View::SignUp => "Tab:next  Enter:submit  ^L:sign in  Esc:back",
        View::Registration => "Tab:next  Enter:submit  Esc:back",
        View::Profile => "Tab:next  Enter:save  Esc:dashboard",
        View::Dashboard => "j/k:move  p:profile  r:refresh  l:logout  q:quit",
    }
}

/// Draw the status bar at the bottom of the screen
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session status
    let session_status = match &app.state.session {
        Some(session) => Span::styled(
            format!(" ● {} ", session.user.email),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" ○ signed out ", Style::default().fg(Color::Red)),
    };
    spans.push(session_status);

    spans.push(Span::raw("| "));
    spans.push(Span::styled(
        get_view_hints(&app.state.current_view),
        Style::default().fg(Color::Black),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}
