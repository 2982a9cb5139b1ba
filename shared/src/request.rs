//! Request bodies sent to the listing API

use serde::Deserialize;
use serde_json::{Map, Value};

/// Persist a new rank for one record
///
/// The backend names the id field after the collection (`carId`,
/// `propertyId`), so serialization goes through [`ReorderRequest::to_body`]
/// with the collection's field name. Deserialization accepts any of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReorderRequest {
    #[serde(alias = "carId", alias = "propertyId", rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "newOrder")]
    pub new_order: i64,
}

impl ReorderRequest {
    pub fn new(item_id: impl Into<String>, new_order: i64) -> Self {
        Self {
            item_id: item_id.into(),
            new_order,
        }
    }

    /// JSON body with the id under `id_field`
    pub fn to_body(&self, id_field: &str) -> Value {
        let mut body = Map::new();
        body.insert(id_field.to_string(), Value::String(self.item_id.clone()));
        body.insert("newOrder".to_string(), Value::from(self.new_order));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_uses_collection_field() {
        let req = ReorderRequest::new("c1", 3);
        assert_eq!(req.to_body("carId"), json!({ "carId": "c1", "newOrder": 3 }));
        assert_eq!(
            req.to_body("propertyId"),
            json!({ "propertyId": "c1", "newOrder": 3 })
        );
    }

    #[test]
    fn test_accepts_any_id_field() {
        let car: ReorderRequest =
            serde_json::from_value(json!({ "carId": "a", "newOrder": 1 })).unwrap();
        let prop: ReorderRequest =
            serde_json::from_value(json!({ "propertyId": "b", "newOrder": 0 })).unwrap();
        let generic: ReorderRequest =
            serde_json::from_value(json!({ "itemId": "c", "newOrder": -2 })).unwrap();

        assert_eq!(car, ReorderRequest::new("a", 1));
        assert_eq!(prop, ReorderRequest::new("b", 0));
        assert_eq!(generic, ReorderRequest::new("c", -2));
    }

    #[test]
    fn test_missing_order_rejected() {
        let res = serde_json::from_value::<ReorderRequest>(json!({ "carId": "a" }));
        assert!(res.is_err());
    }
}
