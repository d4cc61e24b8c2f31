use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_password_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a registration form, returning one error per failing rule in
/// field order. Empty means the form may be submitted.
pub fn validate_registration(form: &RegistrationForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&form.full_name) {
        errors.push(ValidationError::new(
            Field::FullName,
            "Please enter your full name!",
        ));
    }

    if is_blank(&form.email) {
        errors.push(ValidationError::new(Field::Email, "Please enter your email!"));
    } else if !is_valid_email(&form.email) {
        errors.push(ValidationError::new(
            Field::Email,
            "Email must be a valid address!",
        ));
    }

    if is_blank(&form.password) {
        errors.push(ValidationError::new(
            Field::Password,
            "Please enter a password!",
        ));
    } else if !is_valid_password(&form.password) {
        errors.push(ValidationError::new(
            Field::Password,
            "Password must be at least 8 characters!",
        ));
    }

    if is_blank(&form.confirm_password) {
        errors.push(ValidationError::new(
            Field::ConfirmPassword,
            "Please confirm your password!",
        ));
    } else if !is_password_match(&form.password, &form.confirm_password) {
        errors.push(ValidationError::new(
            Field::ConfirmPassword,
            "Confirmation must match the password!",
        ));
    }

    errors
}

pub fn has_errors(errors: &[ValidationError]) -> bool {
    !errors.is_empty()
}

/// First message reported for `field`
pub fn field_error(errors: &[ValidationError], field: Field) -> Option<&'static str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}

/// All messages, one per line
pub fn display_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate_registration(&form("Ann Lee", "ann@example.com", "12345678", "12345678"));
        assert!(errors.is_empty());
        assert!(!has_errors(&errors));
    }

    #[test]
    fn test_missing_full_name() {
        let errors = validate_registration(&form("", "a@b.com", "12345678", "12345678"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::FullName);

        let errors = validate_registration(&form("   ", "a@b.com", "12345678", "12345678"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::FullName);
    }

    #[test]
    fn test_short_password_with_matching_confirm() {
        let errors = validate_registration(&form("Ann", "a@b.com", "short", "short"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Password);
        assert_eq!(field_error(&errors, Field::ConfirmPassword), None);
    }

    #[test]
    fn test_email_shape() {
        assert!(!is_valid_email("not-an-email"));
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_errors_come_in_field_order() {
        let errors = validate_registration(&form("", "bad", "", "x"));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::FullName, Field::Email, Field::Password, Field::ConfirmPassword]
        );
        assert_eq!(errors[1].message, "Email must be a valid address!");
        assert_eq!(display_errors(&errors).lines().count(), 4);
    }

    #[test]
    fn test_confirm_mismatch() {
        let errors = validate_registration(&form("Ann", "a@b.com", "12345678", "12345679"));
        assert_eq!(
            field_error(&errors, Field::ConfirmPassword),
            Some("Confirmation must match the password!")
        );
        assert_eq!(errors.len(), 1);
    }
}
