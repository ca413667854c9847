use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_root::contains_folded;
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::form::{ListInput, PriceInput};
use crate::shared::locations;
use crate::shared::validation::{FormKind, RequiredFields, ValidationError};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_aggregate_id!(
    /// Unique space identifier
    SpaceId
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    #[default]
    Available,
    Rented,
}

impl SpaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceStatus::Available => "available",
            SpaceStatus::Rented => "rented",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "available" => Some(SpaceStatus::Available),
            "rented" => Some(SpaceStatus::Rented),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Rentable work space; `price` is per rental time unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub owner_user_id: String,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: SpaceStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSpace {
    pub owner_user_id: String,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: SpaceStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<SpaceStatus>,
}

impl AggregateRoot for Space {
    type Id = SpaceId;
    type New = NewSpace;
    type Patch = SpacePatch;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn assemble(id: SpaceId, new: NewSpace) -> Self {
        Self {
            id,
            owner_user_id: new.owner_user_id,
            name: new.name,
            location: new.location,
            price: new.price,
            description: new.description,
            amenities: new.amenities,
            images: new.images,
            status: new.status,
            metadata: EntityMetadata::new(),
        }
    }

    fn apply(&mut self, patch: &SpacePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(amenities) = &patch.amenities {
            self.amenities = amenities.clone();
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.metadata.touch();
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_folded(&self.name, term) || contains_folded(&self.location, term)
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "spaces"
    }

    fn element_name() -> &'static str {
        "مساحة"
    }

    fn list_name() -> &'static str {
        "المساحات"
    }

    fn table_name() -> String {
        format!("{}_space", Self::aggregate_index())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceForm {
    pub name: String,
    pub location: String,
    pub price: PriceInput,
    pub description: String,
    pub amenities: ListInput,
    pub images: ListInput,
    /// Only honoured on update; new spaces always start as available
    pub status: Option<SpaceStatus>,
}

impl SpaceForm {
    fn check(&self) -> Result<NewSpace, ValidationError> {
        RequiredFields::new()
            .text("name", &self.name)
            .text("location", &self.location)
            .present("price", (!self.price.is_blank()).then_some(&self.price))
            .text("description", &self.description)
            .check(FormKind::Space)?;

        let price = self.price.parse()?;
        let location = self.location.trim().to_string();
        if locations::resolve(&location).is_none() {
            return Err(ValidationError::UnknownLocation(location));
        }

        Ok(NewSpace {
            owner_user_id: String::new(),
            name: self.name.trim().to_string(),
            location,
            price,
            description: self.description.trim().to_string(),
            amenities: self.amenities.normalize(),
            images: self.images.normalize(),
            status: SpaceStatus::Available,
        })
    }

    pub fn validate_new(&self, owner_user_id: &str) -> Result<NewSpace, ValidationError> {
        let mut new = self.check()?;
        new.owner_user_id = owner_user_id.to_string();
        Ok(new)
    }

    pub fn validate_patch(&self) -> Result<SpacePatch, ValidationError> {
        let checked = self.check()?;
        Ok(SpacePatch {
            name: Some(checked.name),
            location: Some(checked.location),
            price: Some(checked.price),
            description: Some(checked.description),
            amenities: Some(checked.amenities),
            images: Some(checked.images),
            status: self.status,
        })
    }
}

impl From<&Space> for SpaceForm {
    fn from(s: &Space) -> Self {
        Self {
            name: s.name.clone(),
            location: s.location.clone(),
            price: PriceInput::Number(s.price),
            description: s.description.clone(),
            amenities: ListInput::Items(s.amenities.clone()),
            images: ListInput::Items(s.images.clone()),
            status: Some(s.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{filter_by_search, AggregateId};

    fn form() -> SpaceForm {
        SpaceForm {
            name: "استوديو اللؤلؤة".into(),
            location: "محافظة مسقط".into(),
            price: "20".into(),
            description: "غرفة مجهزة بالكامل".into(),
            amenities: "wifi, مرايا, ,".into(),
            images: ListInput::Items(vec![" https://img/1.jpg ".into(), "".into()]),
            status: Some(SpaceStatus::Rented),
        }
    }

    #[test]
    fn description_is_required() {
        let f = SpaceForm {
            description: " ".into(),
            ..form()
        };
        assert!(matches!(
            f.validate_new("admin"),
            Err(ValidationError::MissingFields { form: FormKind::Space, .. })
        ));
    }

    #[test]
    fn new_space_starts_available_with_clean_lists() {
        let new = form().validate_new("uid").unwrap();
        assert_eq!(new.status, SpaceStatus::Available);
        assert_eq!(new.amenities, vec!["wifi", "مرايا"]);
        assert_eq!(new.images, vec!["https://img/1.jpg"]);
        assert_eq!(new.owner_user_id, "uid");
    }

    #[test]
    fn patch_can_change_status() {
        let mut space = Space::assemble(SpaceId::generate(), form().validate_new("uid").unwrap());
        space.apply(&form().validate_patch().unwrap());
        assert_eq!(space.status, SpaceStatus::Rented);

        let keep_status = SpaceForm {
            status: None,
            ..form()
        };
        space.apply(&keep_status.validate_patch().unwrap());
        assert_eq!(space.status, SpaceStatus::Rented);
    }

    #[test]
    fn search_matches_name_or_location() {
        let space = Space::assemble(SpaceId::generate(), form().validate_new("uid").unwrap());
        let items = vec![space];
        assert_eq!(filter_by_search(&items, "مسقط").len(), 1);
        assert_eq!(filter_by_search(&items, "اللؤلؤة").len(), 1);
        assert!(filter_by_search(&items, "مجهزة").is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SpaceStatus::Rented).unwrap(),
            "\"rented\""
        );
        assert_eq!(SpaceStatus::from_code("available"), Some(SpaceStatus::Available));
        assert_eq!(SpaceStatus::from_code("sold"), None);
    }
}
