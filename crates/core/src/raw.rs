//! Raw backend payloads.
//!
//! The backend is inconsistent about field naming: some endpoints answer in
//! camelCase, others in snake_case, and optional fields may be missing or
//! `null`. Each raw type keeps both spellings as separate fields and every
//! value as an untyped [`Value`], so deserializing a raw record never fails
//! on shape. All interpretation happens in [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: Option<Value>,
    pub email: Option<Value>,
    pub role: Option<Value>,
    pub phone: Option<Value>,

    #[serde(rename = "firstName")]
    pub first_name_camel: Option<Value>,
    #[serde(rename = "first_name")]
    pub first_name_snake: Option<Value>,

    #[serde(rename = "lastName")]
    pub last_name_camel: Option<Value>,
    #[serde(rename = "last_name")]
    pub last_name_snake: Option<Value>,

    #[serde(rename = "isVerified")]
    pub is_verified_camel: Option<Value>,
    #[serde(rename = "is_verified")]
    pub is_verified_snake: Option<Value>,

    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<Value>,
    #[serde(rename = "created_at")]
    pub created_at_snake: Option<Value>,

    #[serde(rename = "updatedAt")]
    pub updated_at_camel: Option<Value>,
    #[serde(rename = "updated_at")]
    pub updated_at_snake: Option<Value>,
}

/// A project as returned by the backend.
///
/// Display names may arrive flat (`clientName`) or as nested objects
/// (`client: { firstName, lastName }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProject {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub status: Option<Value>,
    pub progress: Option<Value>,
    pub amount: Option<Value>,

    #[serde(rename = "serviceId")]
    pub service_id_camel: Option<Value>,
    #[serde(rename = "service_id")]
    pub service_id_snake: Option<Value>,

    #[serde(rename = "clientId")]
    pub client_id_camel: Option<Value>,
    #[serde(rename = "client_id")]
    pub client_id_snake: Option<Value>,

    #[serde(rename = "controllerId")]
    pub controller_id_camel: Option<Value>,
    #[serde(rename = "controller_id")]
    pub controller_id_snake: Option<Value>,

    #[serde(rename = "amountDescription")]
    pub amount_description_camel: Option<Value>,
    #[serde(rename = "amount_description")]
    pub amount_description_snake: Option<Value>,

    #[serde(rename = "requirementsPdf")]
    pub requirements_pdf_camel: Option<Value>,
    #[serde(rename = "requirements_pdf")]
    pub requirements_pdf_snake: Option<Value>,

    #[serde(rename = "clientName")]
    pub client_name_camel: Option<Value>,
    #[serde(rename = "client_name")]
    pub client_name_snake: Option<Value>,

    #[serde(rename = "controllerName")]
    pub controller_name_camel: Option<Value>,
    #[serde(rename = "controller_name")]
    pub controller_name_snake: Option<Value>,

    #[serde(rename = "serviceName")]
    pub service_name_camel: Option<Value>,
    #[serde(rename = "service_name")]
    pub service_name_snake: Option<Value>,

    /// Nested client object, when the backend joins it.
    pub client: Option<Value>,
    /// Nested controller object, when the backend joins it.
    pub controller: Option<Value>,
    /// Nested service object, when the backend joins it.
    pub service: Option<Value>,

    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<Value>,
    #[serde(rename = "created_at")]
    pub created_at_snake: Option<Value>,

    #[serde(rename = "updatedAt")]
    pub updated_at_camel: Option<Value>,
    #[serde(rename = "updated_at")]
    pub updated_at_snake: Option<Value>,
}

/// A catalogue service as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawService {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub category: Option<Value>,
    pub price: Option<Value>,

    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<Value>,
    #[serde(rename = "created_at")]
    pub created_at_snake: Option<Value>,

    #[serde(rename = "updatedAt")]
    pub updated_at_camel: Option<Value>,
    #[serde(rename = "updated_at")]
    pub updated_at_snake: Option<Value>,
}

/// A notification as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNotification {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub message: Option<Value>,

    #[serde(rename = "type")]
    pub kind: Option<Value>,

    #[serde(rename = "userId")]
    pub user_id_camel: Option<Value>,
    #[serde(rename = "user_id")]
    pub user_id_snake: Option<Value>,

    #[serde(rename = "isRead")]
    pub is_read_camel: Option<Value>,
    #[serde(rename = "is_read")]
    pub is_read_snake: Option<Value>,

    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<Value>,
    #[serde(rename = "created_at")]
    pub created_at_snake: Option<Value>,

    #[serde(rename = "updatedAt")]
    pub updated_at_camel: Option<Value>,
    #[serde(rename = "updated_at")]
    pub updated_at_snake: Option<Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_both_spellings_deserialize_side_by_side() {
        let raw: RawUser = serde_json::from_value(json!({
            "id": 1,
            "firstName": "Ada",
            "first_name": "Augusta",
            "unknown_key": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(raw.first_name_camel, Some(json!("Ada")));
        assert_eq!(raw.first_name_snake, Some(json!("Augusta")));
    }

    #[test]
    fn test_unexpected_types_do_not_fail() {
        let raw: RawProject = serde_json::from_value(json!({
            "id": "12",
            "progress": "40",
            "amount": null,
            "client": { "firstName": "Grace" }
        }))
        .unwrap();

        assert_eq!(raw.id, Some(json!("12")));
        assert_eq!(raw.amount, None);
        assert!(raw.client.is_some());
    }
}
