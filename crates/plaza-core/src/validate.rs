//! Form validation.
//!
//! Every validator is a pure function returning `None` when the value is
//! acceptable or `Some(message)` with a human-readable error. Validators for
//! one field run in order and the first error wins, so presence is always
//! reported before format.

use std::sync::LazyLock;

use regex::Regex;

/// A single field check.
pub type Validator = fn(&str) -> Option<String>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("username pattern compiles"));

pub const PASSWORD_MIN_LEN: usize = 6;
pub const NAME_MAX_LEN: usize = 50;
pub const BIO_MAX_LEN: usize = 160;

/// Rejects empty and whitespace-only values.
pub fn required(value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "This field is required".to_string())
}

/// Checks the character count is within `min..=max`.
pub fn length(value: &str, min: usize, max: usize) -> Option<String> {
    let count = value.chars().count();
    if count < min {
        Some(format!("Must be at least {min} characters"))
    } else if count > max {
        Some(format!("Must be at most {max} characters"))
    } else {
        None
    }
}

pub fn email(value: &str) -> Option<String> {
    (!EMAIL_RE.is_match(value.trim())).then(|| "Enter a valid email address".to_string())
}

/// 3–20 characters: letters, digits and underscore.
pub fn username(value: &str) -> Option<String> {
    (!USERNAME_RE.is_match(value))
        .then(|| "Username must be 3-20 letters, numbers or underscores".to_string())
}

pub fn password(value: &str) -> Option<String> {
    (value.chars().count() < PASSWORD_MIN_LEN)
        .then(|| format!("Password must be at least {PASSWORD_MIN_LEN} characters"))
}

pub fn name(value: &str) -> Option<String> {
    length(value.trim(), 1, NAME_MAX_LEN)
}

pub fn bio(value: &str) -> Option<String> {
    length(value, 0, BIO_MAX_LEN)
}

/// Runs `validators` in order and returns the first error.
pub fn first_error(value: &str, validators: &[Validator]) -> Option<String> {
    validators.iter().find_map(|validate| validate(value))
}

/// Post and comment bodies must contain something other than whitespace.
pub fn content(value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "Write something first".to_string())
}

// ============================================================================
// Field errors
// ============================================================================

/// Per-field error messages, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    errors: Vec<(F, String)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<F: Copy + PartialEq> FieldErrors<F> {
    fn check(&mut self, field: F, value: &str, validators: &[Validator]) {
        if let Some(message) = first_error(value, validators) {
            self.errors.push((field, message));
        }
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self, field: F) {
        self.errors.retain(|(f, _)| *f != field);
    }
}

// ============================================================================
// Auth form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    /// Fields shown (and validated) in this mode, in display order.
    pub fn fields(self) -> &'static [AuthField] {
        match self {
            AuthMode::SignIn => &[AuthField::Username, AuthField::Password],
            AuthMode::SignUp => &[
                AuthField::Name,
                AuthField::Username,
                AuthField::Email,
                AuthField::Password,
            ],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Sign up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Name,
    Username,
    Email,
    Password,
}

impl AuthField {
    pub fn label(self) -> &'static str {
        match self {
            AuthField::Name => "Name",
            AuthField::Username => "Username",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }
}

/// Raw values of the sign-in / sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    /// Validates the fields `mode` uses.
    ///
    /// Sign-in only checks presence so existing accounts are never locked
    /// out by newer format rules; sign-up enforces every format.
    pub fn validate(&self, mode: AuthMode) -> FieldErrors<AuthField> {
        let mut errors = FieldErrors::default();
        for &field in mode.fields() {
            let validators: &[Validator] = match (mode, field) {
                (AuthMode::SignIn, _) => &[required],
                (AuthMode::SignUp, AuthField::Name) => &[required, name],
                (AuthMode::SignUp, AuthField::Username) => &[required, username],
                (AuthMode::SignUp, AuthField::Email) => &[required, email],
                (AuthMode::SignUp, AuthField::Password) => &[required, password],
            };
            errors.check(field, self.value(field), validators);
        }
        errors
    }
}

// ============================================================================
// Profile form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Bio,
}

/// Validates a profile edit draft.
pub fn profile(name_value: &str, bio_value: &str) -> FieldErrors<ProfileField> {
    let mut errors = FieldErrors::default();
    errors.check(ProfileField::Name, name_value, &[required, name]);
    errors.check(ProfileField::Bio, bio_value, &[bio]);
    errors
}
