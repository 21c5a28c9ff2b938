//! Client-side validation of the login and registration forms.
//!
//! A form that fails validation is never sent to a collaborator.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use strum::Display;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex")
});

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

/// Form field an error message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    TermsAccepted,
}

/// Per-field error messages, rendered inline next to each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Keep the email for the next visit
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn remember(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.add(Field::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(Field::Password, "Password must be at least 6 characters");
        }
        errors.into_result()
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add(Field::Name, "Name is required");
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.add(Field::Name, "Name must be at least 2 characters");
        }

        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.add(Field::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(Field::Password, "Password must be at least 6 characters");
        } else if !is_mixed_password(&self.password) {
            errors.add(
                Field::Password,
                "Password must contain uppercase, lowercase, and number",
            );
        }

        if self.confirm_password.is_empty() {
            errors.add(Field::ConfirmPassword, "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add(Field::ConfirmPassword, "Passwords do not match");
        }

        if !self.terms_accepted {
            errors.add(
                Field::TermsAccepted,
                "You must accept the Terms and Conditions",
            );
        }

        errors.into_result()
    }
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    if email.is_empty() {
        errors.add(Field::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.add(Field::Email, "Email is invalid");
    }
}

fn is_mixed_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
            terms_accepted: true,
        }
    }

    #[test]
    fn test_valid_login() {
        assert!(LoginForm::new("ada@example.com", "hunter2").validate().is_ok());
    }

    #[test]
    fn test_login_requires_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn test_login_rejects_bad_email_and_short_password() {
        let errors = LoginForm::new("ada.example.com", "abc").validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_valid_registration() {
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn test_registration_name_is_trimmed() {
        let mut form = register_form();
        form.name = "  A  ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 2 characters")
        );

        form.name = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_registration_password_rules() {
        let mut form = register_form();
        form.password = "password1".to_string();
        form.confirm_password = "password1".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must contain uppercase, lowercase, and number")
        );

        let mut form = register_form();
        form.confirm_password = "Secret124".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_registration_requires_terms() {
        let mut form = register_form();
        form.terms_accepted = false;
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().starts_with("terms_accepted:"));
    }
}
