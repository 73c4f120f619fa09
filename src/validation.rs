//! Form Validation
//!
//! Inline feedback for the account and builder forms. A field is either invalid,
//! carrying the message to show under it, or cleared.
//!
//! In the browser the validity comes from the element's own `ValidityState`; natively
//! [`FieldConstraints`] reproduces the subset of constraint validation the forms use.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// CSS class toggled on an invalid field
pub const INVALID_CLASS: &str = "is-invalid";

/// Message shown when the repeated password differs
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Anything that can report constraint validity the way an `<input>` does
pub trait FieldValidity {
    fn is_valid(&self) -> bool;
    fn validation_message(&self) -> String;
}

/// What to show for one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFeedback {
    /// Whether the field carries [`INVALID_CLASS`]
    pub invalid: bool,
    /// Text for the feedback element, empty when cleared
    pub message: String,
}

impl FieldFeedback {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            invalid: true,
            message: message.into(),
        }
    }
}

/// Feedback for a field from its current validity
pub fn input_feedback(field: &impl FieldValidity) -> FieldFeedback {
    if field.is_valid() {
        FieldFeedback::cleared()
    } else {
        FieldFeedback::invalid(field.validation_message())
    }
}

/// Feedback for the repeat-password field
///
/// Mismatch is only reported once something has been typed into `repeat`.
pub fn password_feedback(real: &str, repeat: &str) -> FieldFeedback {
    if real != repeat && !repeat.is_empty() {
        FieldFeedback::invalid(PASSWORD_MISMATCH)
    } else {
        FieldFeedback::cleared()
    }
}

/// Input types the forms use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    /// Host name with optional `:port`
    Host,
}

/// Outcome of checking a value against [`FieldConstraints`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    ValueMissing,
    TooShort { min: usize, current: usize },
    TooLong { max: usize, current: usize },
    TypeMismatch(FieldKind),
}

impl FieldValidity for Validity {
    fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    fn validation_message(&self) -> String {
        match self {
            Validity::Valid => String::new(),
            Validity::ValueMissing => "Please fill out this field.".to_string(),
            Validity::TooShort { min, current } => format!(
                "Please lengthen this text to {} characters or more (you are currently using {} characters).",
                min, current
            ),
            Validity::TooLong { max, current } => format!(
                "Please shorten this text to {} characters or less (you are currently using {} characters).",
                max, current
            ),
            Validity::TypeMismatch(FieldKind::Host) => "Please enter a valid host name.".to_string(),
            Validity::TypeMismatch(_) => "Please match the requested format.".to_string(),
        }
    }
}

/// `required` / `minlength` / `maxlength` / `type` attributes of an input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConstraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub kind: FieldKind,
}

impl FieldConstraints {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Check a value. Empty optional fields are always valid.
    pub fn check(&self, value: &str) -> Validity {
        if value.is_empty() {
            return if self.required {
                Validity::ValueMissing
            } else {
                Validity::Valid
            };
        }

        let current = value.chars().count();
        if let Some(min) = self.min_length {
            if current < min {
                return Validity::TooShort { min, current };
            }
        }
        if let Some(max) = self.max_length {
            if current > max {
                return Validity::TooLong { max, current };
            }
        }
        if self.kind == FieldKind::Host && !is_valid_host(value) {
            return Validity::TypeMismatch(FieldKind::Host);
        }

        Validity::Valid
    }

    /// Feedback for a value, as the `input` handler would show it
    pub fn feedback(&self, value: &str) -> FieldFeedback {
        input_feedback(&self.check(value))
    }
}

fn is_valid_host(value: &str) -> bool {
    let (host, port) = match value.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (value, None),
    };

    if let Some(port) = port {
        if port.parse::<u16>().map(|p| p == 0).unwrap_or(true) {
            return false;
        }
    }

    !host.is_empty()
        && host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Constraints of the username field on the login and register pages
pub fn username_constraints() -> FieldConstraints {
    FieldConstraints::new(FieldKind::Text)
        .required()
        .min_length(4)
        .max_length(64)
}

/// Constraints of the password fields
pub fn password_constraints() -> FieldConstraints {
    FieldConstraints::new(FieldKind::Password)
        .required()
        .min_length(6)
        .max_length(128)
}

/// Constraints of the login fields: present, nothing more
///
/// Length limits apply to new accounts only, so older accounts can still log in.
pub fn credential_constraints(kind: FieldKind) -> FieldConstraints {
    FieldConstraints::new(kind).required()
}

/// Constraints of the builder host field
pub fn host_constraints() -> FieldConstraints {
    FieldConstraints::new(FieldKind::Host).required()
}

/// Login page fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username_feedback(&self) -> FieldFeedback {
        credential_constraints(FieldKind::Text).feedback(&self.username)
    }

    pub fn password_feedback(&self) -> FieldFeedback {
        credential_constraints(FieldKind::Password).feedback(&self.password)
    }

    pub fn is_valid(&self) -> bool {
        !self.username_feedback().invalid && !self.password_feedback().invalid
    }
}

/// Registration page fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_repeat: String,
}

impl RegisterForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        password_repeat: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            password_repeat: password_repeat.into(),
        }
    }

    pub fn username_feedback(&self) -> FieldFeedback {
        username_constraints().feedback(&self.username)
    }

    pub fn password_feedback(&self) -> FieldFeedback {
        password_constraints().feedback(&self.password)
    }

    pub fn repeat_feedback(&self) -> FieldFeedback {
        password_feedback(&self.password, &self.password_repeat)
    }

    /// Ready to submit: every field valid and the repeat typed and matching
    pub fn validate(&self) -> DashboardResult<()> {
        let username = self.username_feedback();
        if username.invalid {
            return Err(DashboardError::InvalidForm(format!("username: {}", username.message)));
        }
        let password = self.password_feedback();
        if password.invalid {
            return Err(DashboardError::InvalidForm(format!("password: {}", password.message)));
        }
        if self.password_repeat.is_empty() || self.repeat_feedback().invalid {
            return Err(DashboardError::InvalidForm(PASSWORD_MISMATCH.to_string()));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// "Add builder" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderForm {
    pub host: String,
}

impl BuilderForm {
    pub fn host_feedback(&self) -> FieldFeedback {
        host_constraints().feedback(&self.host)
    }

    /// The form is only submitted when the host is valid
    pub fn is_valid(&self) -> bool {
        !self.host_feedback().invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty_is_invalid() {
        for constraints in [username_constraints(), password_constraints(), host_constraints()] {
            let feedback = constraints.feedback("");
            assert!(feedback.invalid);
            assert!(!feedback.message.is_empty());
        }
    }

    #[test]
    fn test_valid_value_clears() {
        assert_eq!(username_constraints().feedback("ikey"), FieldFeedback::cleared());
        assert_eq!(password_constraints().feedback("hunter22"), FieldFeedback::cleared());
        assert_eq!(host_constraints().feedback("builder.example.com:8081"), FieldFeedback::cleared());
    }

    #[test]
    fn test_length_messages() {
        let validity = username_constraints().check("abc");
        assert_eq!(validity, Validity::TooShort { min: 4, current: 3 });
        assert!(validity.validation_message().contains("4 characters or more"));

        let long = "x".repeat(65);
        assert_eq!(
            username_constraints().check(&long),
            Validity::TooLong { max: 64, current: 65 }
        );
    }

    #[test]
    fn test_optional_empty_is_valid() {
        let constraints = FieldConstraints::new(FieldKind::Text).min_length(3);
        assert_eq!(constraints.check(""), Validity::Valid);
    }

    #[test]
    fn test_host_validation() {
        let c = host_constraints();
        assert!(c.check("localhost").is_valid());
        assert!(c.check("10.0.0.4:8080").is_valid());
        assert!(!c.check("bad host").is_valid());
        assert!(!c.check("-lead.example").is_valid());
        assert!(!c.check("host:0").is_valid());
        assert!(!c.check("host:port").is_valid());
        assert!(!c.check("a..b").is_valid());
    }

    #[test]
    fn test_password_mismatch_rule() {
        let cases = [
            ("secret", "", false),
            ("secret", "secre", true),
            ("secret", "secret", false),
            ("", "x", true),
            ("", "", false),
        ];
        for (a, b, flagged) in cases {
            let feedback = password_feedback(a, b);
            assert_eq!(feedback.invalid, flagged, "({:?}, {:?})", a, b);
            if flagged {
                assert_eq!(feedback.message, PASSWORD_MISMATCH);
            } else {
                assert!(feedback.message.is_empty());
            }
        }
    }

    #[test]
    fn test_register_form_validate() {
        assert!(RegisterForm::new("ikey", "hunter22", "hunter22").is_valid());

        let err = RegisterForm::new("ikey", "hunter22", "hunter23").validate().unwrap_err();
        assert_eq!(err, DashboardError::InvalidForm(PASSWORD_MISMATCH.to_string()));

        // Untouched repeat field shows no feedback but still blocks submission
        let form = RegisterForm::new("ikey", "hunter22", "");
        assert!(!form.repeat_feedback().invalid);
        assert!(!form.is_valid());

        assert!(!RegisterForm::new("", "hunter22", "hunter22").is_valid());
    }

    #[test]
    fn test_login_and_builder_forms() {
        assert!(LoginForm::new("ikey", "hunter22").is_valid());
        assert!(!LoginForm::new("ikey", "").is_valid());
        assert!(LoginForm::new("bob", "pw").is_valid());
        assert!(BuilderForm { host: "build01".into() }.is_valid());
        assert!(!BuilderForm::default().is_valid());
    }

    #[test]
    fn test_builder_port_range() {
        let valid = |host: &str| BuilderForm { host: host.into() }.is_valid();
        assert!(valid("build01:1"));
        assert!(valid("build01:65535"));
        assert!(!valid("build01:0"));
        assert!(!valid("build01:99999"));
        assert!(!valid("build01:"));
        let feedback = BuilderForm { host: "build01:99999".into() }.host_feedback();
        assert!(feedback.invalid);
        assert!(!feedback.message.is_empty());
    }
}
