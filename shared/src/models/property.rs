//! Property Model

use super::ranked::{Collection, Ranked, ensure_non_negative, field_contains};
use crate::error::ValidationResult;
use serde::{Deserialize, Serialize};

/// Real-estate listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Villa, apartment, land, shop, duplex
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Sale or rent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    /// Area in square metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

impl Property {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.display_order = Some(rank);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>, location: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.location = Some(location.into());
        self
    }
}

/// Create property payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCreate {
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Update property payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Ranked for Property {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> i64 {
        self.display_order.unwrap_or(0)
    }

    fn set_rank(&mut self, rank: i64) {
        self.display_order = Some(rank);
    }
}

impl Collection for Property {
    type Patch = PropertyUpdate;
    type Draft = PropertyCreate;

    const PATH: &'static str = "properties";
    const REORDER_ID_FIELD: &'static str = "propertyId";
    const DISPLAY_NAME: &'static str = "Property";

    fn matches_lowercase(&self, needle: &str) -> bool {
        field_contains(&self.title, needle)
            || field_contains(&self.location, needle)
            || field_contains(&self.description, needle)
    }

    fn apply_patch(&mut self, patch: PropertyUpdate) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(kind) = patch.kind {
            self.kind = Some(kind);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(purpose) = patch.purpose {
            self.purpose = Some(purpose);
        }
        if let Some(area) = patch.area {
            self.area = Some(area);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }

    fn from_draft(id: String, draft: PropertyCreate) -> Self {
        Self {
            id,
            title: Some(draft.title),
            kind: draft.kind,
            location: draft.location,
            purpose: draft.purpose,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            area: draft.area,
            price: draft.price,
            images: draft.images,
            description: draft.description,
            featured: draft.featured,
            display_order: None,
        }
    }

    fn validate_draft(draft: &PropertyCreate) -> ValidationResult<()> {
        ensure_non_negative(Self::PATH, "price", draft.price)?;
        ensure_non_negative(Self::PATH, "area", draft.area)
    }
}
