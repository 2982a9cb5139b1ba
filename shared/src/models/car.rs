//! Car Model

use super::ranked::{Collection, Ranked, ensure_non_negative, field_contains};
use crate::error::ValidationResult;
use serde::{Deserialize, Serialize};

/// Car listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Mileage in kilometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

impl Car {
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

    pub fn with_brand(mut self, brand: impl Into<String>, model: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self.model = Some(model.into());
        self
    }
}

/// Create car payload
///
/// Images are uploaded separately; the draft carries their URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Update car payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Ranked for Car {
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

impl Collection for Car {
    type Patch = CarUpdate;
    type Draft = CarCreate;

    const PATH: &'static str = "cars";
    const REORDER_ID_FIELD: &'static str = "carId";
    const DISPLAY_NAME: &'static str = "Car";

    fn matches_lowercase(&self, needle: &str) -> bool {
        field_contains(&self.brand, needle)
            || field_contains(&self.model, needle)
            || field_contains(&self.description, needle)
    }

    fn apply_patch(&mut self, patch: CarUpdate) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(brand) = patch.brand {
            self.brand = Some(brand);
        }
        if let Some(model) = patch.model {
            self.model = Some(model);
        }
        if let Some(year) = patch.year {
            self.year = Some(year);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(km) = patch.km {
            self.km = Some(km);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }

    fn from_draft(id: String, draft: CarCreate) -> Self {
        Self {
            id,
            title: Some(draft.title),
            brand: draft.brand,
            model: draft.model,
            year: draft.year,
            price: draft.price,
            km: draft.km,
            transmission: draft.transmission,
            fuel: draft.fuel,
            images: draft.images,
            description: draft.description,
            featured: draft.featured,
            display_order: None,
        }
    }

    fn validate_draft(draft: &CarCreate) -> ValidationResult<()> {
        ensure_non_negative(Self::PATH, "price", draft.price)?;
        ensure_non_negative(Self::PATH, "km", draft.km)
    }
}
