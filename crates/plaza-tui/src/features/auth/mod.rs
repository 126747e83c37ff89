//! Sign-in / sign-up screen.
//!
//! One form with two modes. Field-level errors come from the client-side
//! validators; server failures are shown as a banner above the form.

mod render;
mod update;

use plaza_core::validate::{AuthField, AuthForm, AuthMode, FieldErrors};
pub use render::render_auth;
pub use update::{handle_auth_result, handle_key};

use crate::common::TextField;

#[derive(Debug, Default)]
pub struct AuthState {
    pub mode: AuthMode,
    name: TextField,
    username: TextField,
    email: TextField,
    password: TextField,
    /// Index into `mode.fields()`.
    pub focus: usize,
    pub errors: FieldErrors<AuthField>,
    /// Last server error, shown until the next edit or submit.
    pub banner: Option<String>,
}

impl AuthState {
    pub fn field(&self, field: AuthField) -> &TextField {
        match field {
            AuthField::Name => &self.name,
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: AuthField) -> &mut TextField {
        match field {
            AuthField::Name => &mut self.name,
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn focused_field(&self) -> AuthField {
        let fields = self.mode.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        let field = self.focused_field();
        self.field_mut(field)
    }

    /// Snapshot of the raw values for validation and submission.
    pub fn form(&self) -> AuthForm {
        AuthForm {
            name: self.name.value().to_string(),
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    /// Switches between sign-in and sign-up, keeping typed values.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.focus = 0;
        self.errors = FieldErrors::default();
        self.banner = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.mode.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.mode.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn focus_field(&mut self, field: AuthField) {
        if let Some(index) = self.mode.fields().iter().position(|f| *f == field) {
            self.focus = index;
        }
    }
}
