//! Sign-up flow.
//!
//! ```text
//! CollectingInput --submit--> Validating --ok--> Submitting --complete(ok)--> Success
//!        ^                        |                   |
//!        +------- invalid --------+                   +--complete(err)--> Failed
//!        +------------------- acknowledge ----------------------------------+
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::a003_user_profile::aggregate::{AccountType, UserProfile};
use crate::shared::locations;
use crate::shared::messages::Message;
use crate::shared::validation::{validate_phone, FormKind, RequiredFields, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub governorate: String,
    pub wilayat: String,
    pub account_type: Option<AccountType>,
}

/// Registration input that passed every local rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub governorate: String,
    pub wilayat: String,
    pub account_type: AccountType,
}

impl RegistrationForm {
    /// Rules run in order and the first violation wins
    pub fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        RequiredFields::new()
            .text("full_name", &self.full_name)
            .text("email", &self.email)
            .text("phone", &self.phone)
            .text("password", &self.password)
            .present("account_type", self.account_type.as_ref())
            .check(FormKind::Registration)?;

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        validate_phone(&self.phone, FormKind::Registration)?;

        let governorate = self.governorate.trim().to_string();
        let wilayat = self.wilayat.trim().to_string();
        if !governorate.is_empty() && locations::governorate(&governorate).is_none() {
            return Err(ValidationError::UnknownLocation(governorate));
        }
        if !wilayat.is_empty() && !locations::wilayat_belongs_to(&wilayat, &governorate) {
            return Err(ValidationError::WilayatOutsideGovernorate {
                wilayat,
                governorate,
            });
        }

        let account_type = match self.account_type {
            Some(t) => t,
            None => {
                return Err(ValidationError::MissingFields {
                    form: FormKind::Registration,
                    fields: vec!["account_type"],
                })
            }
        };

        Ok(ValidRegistration {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
            governorate,
            wilayat,
            account_type,
        })
    }
}

impl ValidRegistration {
    /// Profile record to write once sign-up returned a user id
    pub fn profile(&self, uid: &str) -> UserProfile {
        UserProfile {
            uid: uid.to_string(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            location: self.wilayat.clone(),
            governorate: self.governorate.clone(),
            account_type: self.account_type,
            created_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// State machine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    CollectingInput,
    Validating,
    Submitting,
    Success,
    Failed(Message),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("a registration is already in progress")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no submission is in flight")]
    NotSubmitting,
}

#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    state: RegistrationState,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self {
            state: RegistrationState::CollectingInput,
        }
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// True while a submission is being validated or sent
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            RegistrationState::Validating | RegistrationState::Submitting
        )
    }

    /// Validate `form` and move to Submitting.
    ///
    /// Only accepted while collecting input. A validation failure returns the
    /// flow to CollectingInput.
    pub fn submit(&mut self, form: &RegistrationForm) -> Result<ValidRegistration, RegistrationError> {
        if self.state != RegistrationState::CollectingInput {
            return Err(RegistrationError::Busy);
        }

        self.state = RegistrationState::Validating;
        match form.validate() {
            Ok(valid) => {
                self.state = RegistrationState::Submitting;
                Ok(valid)
            }
            Err(e) => {
                self.state = RegistrationState::CollectingInput;
                Err(e.into())
            }
        }
    }

    /// Record the outcome of sign-up plus profile write
    pub fn complete(&mut self, outcome: Result<(), Message>) -> Result<&RegistrationState, RegistrationError> {
        if self.state != RegistrationState::Submitting {
            return Err(RegistrationError::NotSubmitting);
        }
        self.state = match outcome {
            Ok(()) => RegistrationState::Success,
            Err(message) => RegistrationState::Failed(message),
        };
        Ok(&self.state)
    }

    /// Dismiss a failure and go back to editing
    pub fn acknowledge(&mut self) {
        if matches!(self.state, RegistrationState::Failed(_)) {
            self.state = RegistrationState::CollectingInput;
        }
    }
}
