//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Dashboard => dashboard::draw(frame, main_area, app),
        View::Login | View::SignUp | View::Registration | View::Profile => {
            forms::draw_form(frame, main_area, app)
        }
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Error dialog sits on top of everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
