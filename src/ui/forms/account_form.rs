//! Account form rendering (login, sign-up, registration, profile)

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{AccountForm, FormKind, FormNotice};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FORM_WIDTH: u16 = 60;

/// Draw whichever form the current view holds
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.form else {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    };

    let field_count = form.controller.len() as u16;
    let notice_rows = if app.state.form_notice.is_some() { 2 } else { 0 };
    // borders + subtitle + blank + notice + fields + button + footer
    let height = 2 + 2 + notice_rows + field_count * FIELD_HEIGHT + BUTTON_HEIGHT + 1;
    let form_area = centered(area, FORM_WIDTH, height);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.kind.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut constraints = vec![Constraint::Length(2), Constraint::Length(notice_rows)];
    constraints.extend((0..field_count).map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let subtitle = Paragraph::new(subtitle(form, app)).style(Style::default().fg(Color::Gray));
    frame.render_widget(subtitle, chunks[0]);

    if let Some(notice) = &app.state.form_notice {
        draw_notice(frame, chunks[1], notice);
    }

    for (i, field) in form.controller.fields().iter().enumerate() {
        draw_field(
            frame,
            chunks[2 + i],
            field,
            form.active_field_index == i,
        );
    }

    let button_index = 2 + field_count as usize;
    let label = if form.busy {
        form.kind.busy_label()
    } else {
        form.kind.submit_label()
    };
    render_button(
        frame,
        chunks[button_index],
        label,
        form.is_submit_row_active(),
        form.can_submit(),
        Color::Green,
    );

    let footer = Paragraph::new(footer(form))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[button_index + 1]);
}

fn subtitle(form: &AccountForm, app: &App) -> String {
    match form.kind {
        FormKind::Login => "Sign in to continue".to_string(),
        FormKind::SignUp => "Signup now and get full access to our app.".to_string(),
        FormKind::Registration => "Tell us your name and where to reach you.".to_string(),
        FormKind::Profile => match &app.state.session {
            Some(session) => format!("Signed in as {}", session.user.email),
            None => String::new(),
        },
    }
}

fn footer(form: &AccountForm) -> &'static str {
    if form.controller.has_visible_errors() {
        return "Fix the highlighted fields and submit again";
    }
    match form.kind {
        FormKind::Login => "No account? ^N sign up · Forgot your password? ^F",
        FormKind::SignUp => "Already have an account? ^L sign in",
        FormKind::Registration | FormKind::Profile => "Esc to go back",
    }
}

fn draw_notice(frame: &mut Frame, area: Rect, notice: &FormNotice) {
    let color = if notice.is_error() {
        Color::Red
    } else {
        Color::Green
    };
    let paragraph = Paragraph::new(notice.text().to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleTable;
    use std::sync::Arc;

    #[test]
    fn test_footer_switches_to_fix_hint_after_blocked_submit() {
        let mut form = AccountForm::new(FormKind::Login, Arc::new(RuleTable::default()));
        assert!(footer(&form).contains("^N"));

        assert!(form.submit().is_err());
        assert_eq!(footer(&form), "Fix the highlighted fields and submit again");
    }
}
