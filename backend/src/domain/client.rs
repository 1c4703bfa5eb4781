//! Library clients (borrowers).

use std::fmt;

use serde::Serialize;

use super::text::{self, TextViolation};
use super::{ClientId, RecordKey};

pub const CLIENT_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 15;
pub const ADDRESS_MAX: usize = 255;
/// National IDs are fixed-length digit strings.
pub const NATIONAL_ID_LEN: usize = 11;

/// Validation errors raised when building a [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    EmptyName,
    NameTooLong { max: usize },
    InvalidNationalId,
    PhoneTooLong { max: usize },
    AddressTooLong { max: usize },
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidNationalId => write!(
                f,
                "national id must be exactly {NATIONAL_ID_LEN} digits"
            ),
            Self::PhoneTooLong { max } => write!(f, "phone must be at most {max} characters"),
            Self::AddressTooLong { max } => {
                write!(f, "address must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ClientValidationError {}

/// Fixed-length numeric national identity number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Validate and wrap a national identity number.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ClientValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.len() != NATIONAL_ID_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClientValidationError::InvalidNationalId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable client fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub national_id: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(skip)]
    key: Option<RecordKey>,
    id: ClientId,
    name: String,
    national_id: NationalId,
    phone: Option<String>,
    address: Option<String>,
}

impl Client {
    pub fn new(draft: ClientDraft) -> Result<Self, ClientValidationError> {
        Self::with_id(ClientId::random(), draft)
    }

    /// Build a client with a known identifier, as used for full updates.
    pub fn with_id(id: ClientId, draft: ClientDraft) -> Result<Self, ClientValidationError> {
        let name = text::required(&draft.name, CLIENT_NAME_MAX).map_err(|v| match v {
            TextViolation::Blank => ClientValidationError::EmptyName,
            TextViolation::TooLong => ClientValidationError::NameTooLong {
                max: CLIENT_NAME_MAX,
            },
        })?;
        let national_id = NationalId::new(&draft.national_id)?;
        let phone = text::optional(draft.phone.as_deref(), PHONE_MAX)
            .map_err(|_| ClientValidationError::PhoneTooLong { max: PHONE_MAX })?;
        let address = text::optional(draft.address.as_deref(), ADDRESS_MAX)
            .map_err(|_| ClientValidationError::AddressTooLong { max: ADDRESS_MAX })?;
        Ok(Self {
            key: None,
            id,
            name,
            national_id,
            phone,
            address,
        })
    }

    pub fn key(&self) -> Option<RecordKey> {
        self.key
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub(crate) fn assign_key(&mut self, key: RecordKey) {
        self.key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> ClientDraft {
        ClientDraft {
            name: "Ana Souza".to_owned(),
            national_id: "12345678901".to_owned(),
            phone: Some("11999990000".to_owned()),
            address: None,
        }
    }

    #[rstest]
    fn builds_valid_client(draft: ClientDraft) {
        let client = Client::new(draft).expect("valid client");
        assert_eq!(client.national_id().as_str(), "12345678901");
        assert_eq!(client.phone(), Some("11999990000"));
    }

    #[rstest]
    #[case("1234567890")]
    #[case("123456789012")]
    #[case("1234567890a")]
    fn rejects_malformed_national_ids(mut draft: ClientDraft, #[case] national_id: &str) {
        draft.national_id = national_id.to_owned();
        let err = Client::new(draft).expect_err("invalid national id");
        assert_eq!(err, ClientValidationError::InvalidNationalId);
    }

    #[rstest]
    fn rejects_long_phone(mut draft: ClientDraft) {
        draft.phone = Some("1".repeat(PHONE_MAX + 1));
        let err = Client::new(draft).expect_err("phone too long");
        assert_eq!(err, ClientValidationError::PhoneTooLong { max: PHONE_MAX });
    }

    #[rstest]
    fn with_id_keeps_identifier(draft: ClientDraft) {
        let id = ClientId::random();
        let client = Client::with_id(id, draft).expect("valid client");
        assert_eq!(client.id(), id);
    }
}
