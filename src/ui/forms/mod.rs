//! Form rendering module
//!
//! - `field_renderer`: one input box with its inline error
//! - `account_form`: the login, sign-up, registration and profile forms

mod account_form;
mod field_renderer;

pub use account_form::draw_form;
