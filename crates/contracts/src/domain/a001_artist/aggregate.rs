use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_root::contains_folded;
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::form::{non_blank, ListInput, PriceInput};
use crate::shared::locations;
use crate::shared::validation::{FormKind, RequiredFields, ValidationError};

/// Image used when an artist is created without one
pub const DEFAULT_ARTIST_IMAGE: &str =
    "https://images.unsplash.com/photo-1580618672591-eb180b1a973f?w=400";

/// Rating every new artist starts with
pub const INITIAL_RATING: f64 = 5.0;

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_aggregate_id!(
    /// Unique artist identifier
    ArtistId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Makeup / beauty professional listed on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub owner_user_id: String,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub price: f64,
    pub image: String,
    pub bio: Option<String>,
    pub services: Vec<String>,
    pub rating: f64,
    pub reviews: u32,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// Validated insert payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub owner_user_id: String,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub price: f64,
    pub image: String,
    pub bio: Option<String>,
    pub services: Vec<String>,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    /// `Some(None)` clears the bio
    pub bio: Option<Option<String>>,
    pub services: Option<Vec<String>>,
}

impl AggregateRoot for Artist {
    type Id = ArtistId;
    type New = NewArtist;
    type Patch = ArtistPatch;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn assemble(id: ArtistId, new: NewArtist) -> Self {
        Self {
            id,
            owner_user_id: new.owner_user_id,
            name: new.name,
            specialty: new.specialty,
            location: new.location,
            price: new.price,
            image: new.image,
            bio: new.bio,
            services: new.services,
            rating: INITIAL_RATING,
            reviews: 0,
            metadata: EntityMetadata::new(),
        }
    }

    fn apply(&mut self, patch: &ArtistPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(specialty) = &patch.specialty {
            self.specialty = specialty.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(bio) = &patch.bio {
            self.bio = bio.clone();
        }
        if let Some(services) = &patch.services {
            self.services = services.clone();
        }
        self.metadata.touch();
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_folded(&self.name, term) || contains_folded(&self.specialty, term)
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "artists"
    }

    fn element_name() -> &'static str {
        "آرتست"
    }

    fn list_name() -> &'static str {
        "الآرتست"
    }

    fn table_name() -> String {
        format!("{}_artist", Self::aggregate_index())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Artist form as submitted by the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub price: PriceInput,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub services: ListInput,
}

struct CheckedArtistForm {
    name: String,
    specialty: String,
    location: String,
    price: f64,
    image: Option<String>,
    bio: Option<String>,
    services: Vec<String>,
}

impl ArtistForm {
    fn check(&self) -> Result<CheckedArtistForm, ValidationError> {
        // Обязательные поля проверяются первыми, до цены и локации
        RequiredFields::new()
            .text("name", &self.name)
            .text("specialty", &self.specialty)
            .text("location", &self.location)
            .present("price", (!self.price.is_blank()).then_some(&self.price))
            .check(FormKind::Artist)?;

        let price = self.price.parse()?;
        let location = self.location.trim().to_string();
        if locations::resolve(&location).is_none() {
            return Err(ValidationError::UnknownLocation(location));
        }

        Ok(CheckedArtistForm {
            name: self.name.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            location,
            price,
            image: non_blank(&self.image),
            bio: non_blank(&self.bio),
            services: self.services.normalize(),
        })
    }

    /// Validate for insert; a missing image falls back to the placeholder
    pub fn validate_new(&self, owner_user_id: &str) -> Result<NewArtist, ValidationError> {
        let checked = self.check()?;
        Ok(NewArtist {
            owner_user_id: owner_user_id.to_string(),
            name: checked.name,
            specialty: checked.specialty,
            location: checked.location,
            price: checked.price,
            image: checked
                .image
                .unwrap_or_else(|| DEFAULT_ARTIST_IMAGE.to_string()),
            bio: checked.bio,
            services: checked.services,
        })
    }

    /// Validate for update; a blank image keeps the stored one, a blank bio clears it
    pub fn validate_patch(&self) -> Result<ArtistPatch, ValidationError> {
        let checked = self.check()?;
        Ok(ArtistPatch {
            name: Some(checked.name),
            specialty: Some(checked.specialty),
            location: Some(checked.location),
            price: Some(checked.price),
            image: checked.image,
            bio: Some(checked.bio),
            services: Some(checked.services),
        })
    }
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: a.name.clone(),
            specialty: a.specialty.clone(),
            location: a.location.clone(),
            price: PriceInput::Number(a.price),
            image: Some(a.image.clone()),
            bio: a.bio.clone(),
            services: ListInput::Items(a.services.clone()),
        }
    }
}
