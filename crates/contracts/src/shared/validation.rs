use thiserror::Error;

use super::messages::{self, Message};

/// Form a validation error originates from; selects the notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Artist,
    Space,
    Registration,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields {
        form: FormKind,
        fields: Vec<&'static str>,
    },

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    #[error("invalid Omani phone number")]
    InvalidPhone { form: FormKind },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("wilayat {wilayat:?} is not part of governorate {governorate:?}")]
    WilayatOutsideGovernorate {
        wilayat: String,
        governorate: String,
    },
}

impl ValidationError {
    pub fn message(&self) -> Message {
        match self {
            ValidationError::MissingFields { form, .. } => match form {
                FormKind::Registration | FormKind::Profile => {
                    messages::MISSING_REGISTRATION_FIELDS
                }
                FormKind::Artist | FormKind::Space => messages::MISSING_ENTITY_FIELDS,
            },
            ValidationError::InvalidPrice(_) => messages::INVALID_PRICE,
            ValidationError::UnknownLocation(_) => messages::UNKNOWN_LOCATION,
            ValidationError::InvalidPhone { form } => match form {
                FormKind::Profile => messages::INVALID_PHONE_PROFILE,
                _ => messages::INVALID_PHONE_REGISTRATION,
            },
            ValidationError::PasswordMismatch => messages::PASSWORD_MISMATCH,
            ValidationError::WilayatOutsideGovernorate { .. } => {
                messages::WILAYAT_OUTSIDE_GOVERNORATE
            }
        }
    }
}

/// Collects the names of blank required fields, in declaration order.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(name);
        }
        self
    }

    pub fn present<T>(mut self, name: &'static str, value: Option<&T>) -> Self {
        if value.is_none() {
            self.missing.push(name);
        }
        self
    }

    pub fn check(self, form: FormKind) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                form,
                fields: self.missing,
            })
        }
    }
}

// ============================================================================
// Phone
// ============================================================================

/// Remove every whitespace character (spaces, tabs, non-breaking spaces)
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Omani mobile number: optional `+968`/`968` prefix, then 8 digits starting
/// with 7 or 9. Whitespace anywhere is ignored.
pub fn is_valid_omani_phone(raw: &str) -> bool {
    let phone = normalize_phone(raw);

    // Без префикса проверяем первым: "96812345" это локальный номер на 9
    is_local_number(&phone)
        || phone.strip_prefix("+968").is_some_and(is_local_number)
        || phone.strip_prefix("968").is_some_and(is_local_number)
}

fn is_local_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 8
        && matches!(bytes[0], b'7' | b'9')
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

pub fn validate_phone(raw: &str, form: FormKind) -> Result<(), ValidationError> {
    if is_valid_omani_phone(raw) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone { form })
    }
}
