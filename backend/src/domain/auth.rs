//! Employee login credentials and plaintext password handling.
//!
//! Plaintext secrets are held in [`Zeroizing`] buffers and never leave the
//! domain except through a [`CredentialHasher`](crate::domain::ports::CredentialHasher).

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, EmployeeValidationError};

/// Plaintext password supplied by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a non-empty password. Whitespace is kept as given.
    pub fn new(raw: &str) -> Result<Self, EmployeeValidationError> {
        if raw.is_empty() {
            return Err(EmployeeValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated login credentials used by employee authentication.
///
/// # Examples
/// ```
/// use library_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ana@Library.org ", "secret")
///     .expect("valid credentials");
/// assert_eq!(creds.email().as_str(), "ana@library.org");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, EmployeeValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", EmployeeValidationError::InvalidEmail)]
    #[case("not-an-email", "pw", EmployeeValidationError::InvalidEmail)]
    #[case("ana@library.org", "", EmployeeValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: EmployeeValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_keeps_whitespace_and_redacts_debug() {
        let password = Password::new(" spaced out ").expect("non-empty");
        assert_eq!(password.expose(), " spaced out ");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
