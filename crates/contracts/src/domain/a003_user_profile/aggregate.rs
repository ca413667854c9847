use serde::{Deserialize, Serialize};

use crate::shared::form::non_blank;
use crate::shared::locations;
use crate::shared::validation::{validate_phone, FormKind, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Client,
    Artist,
    Owner,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Client => "client",
            AccountType::Artist => "artist",
            AccountType::Owner => "owner",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "client" => Some(AccountType::Client),
            "artist" => Some(AccountType::Artist),
            "owner" => Some(AccountType::Owner),
            _ => None,
        }
    }

    /// Arabic label shown on the profile badge
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountType::Client => "عميل",
            AccountType::Artist => "ميكب آرتست",
            AccountType::Owner => "مالك مساحة",
        }
    }
}

/// Profile record written once at registration, keyed by the auth user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    /// Wilayat code, empty when not chosen
    pub location: String,
    /// Governorate code, empty when not chosen
    pub governorate: String,
    pub account_type: AccountType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    pub fn location_name(&self) -> Option<&'static str> {
        locations::wilayat(&self.location).map(|(_, w)| w.name)
    }

    pub fn governorate_name(&self) -> Option<&'static str> {
        locations::governorate(&self.governorate).map(|g| g.name)
    }
}

/// Editable part of a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEdit {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub governorate: Option<String>,
}

impl ProfileEdit {
    /// Validate against the stored profile; fields left out keep their value
    pub fn validate(&self, current: &UserProfile) -> Result<UserProfile, ValidationError> {
        let mut next = current.clone();

        if let Some(full_name) = non_blank(&self.full_name) {
            next.full_name = full_name;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone, FormKind::Profile)?;
            next.phone = phone.trim().to_string();
        }
        if let Some(governorate) = &self.governorate {
            next.governorate = governorate.trim().to_string();
        }
        if let Some(location) = &self.location {
            next.location = location.trim().to_string();
        }

        if !next.location.is_empty()
            && !locations::wilayat_belongs_to(&next.location, &next.governorate)
        {
            return Err(ValidationError::WilayatOutsideGovernorate {
                wilayat: next.location,
                governorate: next.governorate,
            });
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            uid: "u1".into(),
            email: "fatima@example.com".into(),
            full_name: "فاطمة الحراصية".into(),
            phone: "+968 92345678".into(),
            location: "seeb".into(),
            governorate: "muscat".into(),
            account_type: AccountType::Client,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn edit_rejects_bad_phone_with_profile_wording() {
        let edit = ProfileEdit {
            phone: Some("12345678".into()),
            ..Default::default()
        };
        let err = edit.validate(&profile()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhone { form: FormKind::Profile });
        assert_eq!(
            err.message().description.ar,
            "يرجى إدخال رقم هاتف عماني صحيح"
        );
    }

    #[test]
    fn edit_applies_present_fields_only() {
        let edit = ProfileEdit {
            full_name: Some("  ".into()),
            phone: Some("9 1234567".into()),
            ..Default::default()
        };
        let next = edit.validate(&profile()).unwrap();
        assert_eq!(next.full_name, "فاطمة الحراصية");
        assert_eq!(next.phone, "9 1234567");
        assert_eq!(next.location, "seeb");
    }

    #[test]
    fn edit_checks_wilayat_against_governorate() {
        let edit = ProfileEdit {
            governorate: Some("dhofar".into()),
            ..Default::default()
        };
        assert!(matches!(
            edit.validate(&profile()),
            Err(ValidationError::WilayatOutsideGovernorate { .. })
        ));
    }

    #[test]
    fn account_type_codes() {
        assert_eq!(AccountType::from_code("owner"), Some(AccountType::Owner));
        assert_eq!(AccountType::from_code("admin"), None);
        assert_eq!(AccountType::Artist.display_name(), "ميكب آرتست");
        assert_eq!(profile().location_name(), Some("السيب"));
    }
}
