//! Library staff who open and close loans.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::text::{self, TextViolation};
use super::{EmployeeId, RecordKey};

pub const EMPLOYEE_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;

/// Validation errors raised when building an [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyName,
    NameTooLong { max: usize },
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyPassword,
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Lower-cased email address; equality is therefore case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmployeeValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmployeeValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmployeeValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential digest produced by a
/// [`CredentialHasher`](crate::domain::ports::CredentialHasher).
///
/// Deliberately not `Serialize` and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated name and email shared by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    name: String,
    email: EmailAddress,
}

impl EmployeeProfile {
    pub fn new(name: &str, email: &str) -> Result<Self, EmployeeValidationError> {
        let name = text::required(name, EMPLOYEE_NAME_MAX).map_err(|v| match v {
            TextViolation::Blank => EmployeeValidationError::EmptyName,
            TextViolation::TooLong => EmployeeValidationError::NameTooLong {
                max: EMPLOYEE_NAME_MAX,
            },
        })?;
        Ok(Self {
            name,
            email: EmailAddress::new(email)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(skip)]
    key: Option<RecordKey>,
    id: EmployeeId,
    name: String,
    email: EmailAddress,
    #[serde(skip)]
    password_hash: PasswordHash,
    active: bool,
}

impl Employee {
    /// Build a new, active employee.
    pub fn new(profile: EmployeeProfile, password_hash: PasswordHash) -> Self {
        Self {
            key: None,
            id: EmployeeId::random(),
            name: profile.name,
            email: profile.email,
            password_hash,
            active: true,
        }
    }

    pub fn key(&self) -> Option<RecordKey> {
        self.key
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Only active employees may open or close loans.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace name and email.
    pub fn apply_profile(&mut self, profile: EmployeeProfile) {
        self.name = profile.name;
        self.email = profile.email;
    }

    pub fn set_password_hash(&mut self, hash: PasswordHash) {
        self.password_hash = hash;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn assign_key(&mut self, key: RecordKey) {
        self.key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Maria@Library.ORG", "maria@library.org")]
    #[case("  joao@example.com ", "joao@example.com")]
    fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("two@@example.com")]
    #[case("spaces in@example.com")]
    #[case("")]
    fn email_rejects_malformed_input(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw),
            Err(EmployeeValidationError::InvalidEmail)
        );
    }

    #[rstest]
    fn profile_rejects_blank_name() {
        let err = EmployeeProfile::new("  ", "a@b.co").expect_err("blank name");
        assert_eq!(err, EmployeeValidationError::EmptyName);
    }

    #[rstest]
    fn new_employees_are_active_and_hide_their_hash() {
        let profile = EmployeeProfile::new("Maria", "maria@library.org").expect("profile");
        let employee = Employee::new(profile, PasswordHash::new("$2b$secret"));
        assert!(employee.is_active());

        let json = serde_json::to_value(&employee).expect("serialise employee");
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "maria@library.org");
        assert!(!format!("{employee:?}").contains("$2b$secret"));
    }
}
