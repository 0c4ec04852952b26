//! Raw payload to canonical record conversion.
//!
//! For every canonical field the normalizer tries the camelCase key, then the
//! snake_case key, then a type-appropriate default. A key that is present but
//! `null` counts as absent. Normalization is pure and total: it never fails
//! and never mutates its input.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::raw::{RawNotification, RawProject, RawService, RawUser};
use crate::records::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use crate::types::{
    NotificationId, NotificationType, ProjectId, ProjectStatus, ServiceId, UserId, UserRole,
};

/// A canonical record and the raw payload it is normalized from.
pub trait Canonical: Sized {
    /// Loosely-typed backend shape.
    type Raw: DeserializeOwned + Serialize + Default + Send;

    /// Build the canonical record. Must not fail on missing keys.
    fn from_raw(raw: &Self::Raw) -> Self;
}

/// Normalize one raw record.
#[must_use]
pub fn normalize<C: Canonical>(raw: &C::Raw) -> C {
    C::from_raw(raw)
}

/// Normalize a JSON value that should hold one record.
///
/// A value that is not an object (or otherwise fails to deserialize) yields
/// the all-defaults record rather than an error.
#[must_use]
pub fn normalize_value<C: Canonical>(value: Value) -> C {
    let raw = serde_json::from_value::<C::Raw>(value).unwrap_or_default();
    C::from_raw(&raw)
}

/// Normalize a list of JSON values, preserving order.
#[must_use]
pub fn normalize_values<C: Canonical>(values: Vec<Value>) -> Vec<C> {
    values.into_iter().map(normalize_value).collect()
}

// =============================================================================
// Field lookup and coercion
// =============================================================================

/// camelCase value if present and non-null, else the snake_case value.
#[must_use]
pub fn pick<'a>(camel: Option<&'a Value>, snake: Option<&'a Value>) -> Option<&'a Value> {
    camel
        .filter(|v| !v.is_null())
        .or_else(|| snake.filter(|v| !v.is_null()))
}

/// String coercion; absent or `null` becomes `""`.
#[must_use]
pub fn text(value: Option<&Value>) -> String {
    opt_text(value).unwrap_or_default()
}

/// String coercion that keeps absence as `None`.
#[must_use]
pub fn opt_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Integer coercion; anything unparseable becomes 0.
#[must_use]
pub fn integer(value: Option<&Value>) -> i64 {
    opt_integer(value).unwrap_or(0)
}

/// Integer coercion keeping absence (and garbage) as `None`.
///
/// Numeric strings are accepted and fractional values are truncated.
#[must_use]
pub fn opt_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)] // saturating cast is the intended behaviour
fn truncate(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.trunc() as i64)
}

/// Decimal coercion from a JSON number or numeric string.
#[must_use]
pub fn decimal(value: Option<&Value>) -> Option<Decimal> {
    let raw = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Truthiness: `false`, `0`, `""` and `null` are false, everything else true.
///
/// This is how `0`/`1` verification flags become strict booleans.
#[must_use]
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Timestamp coercion.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[T| ]HH:MM:SS[.fff]` (read as UTC), a
/// bare `YYYY-MM-DD`, or a number of epoch milliseconds. Anything else is
/// `None`, which renders as "N/A" and sorts as the epoch.
#[must_use]
pub fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_timestamp(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Display name of a nested `{ name }` / `{ firstName, lastName }` object.
fn nested_name(value: Option<&Value>) -> Option<String> {
    let object = value?.as_object()?;
    if let Some(name) = opt_text(object.get("name")).filter(|s| !s.is_empty()) {
        return Some(name);
    }

    let first = text(pick(object.get("firstName"), object.get("first_name")));
    let last = text(pick(object.get("lastName"), object.get("last_name")));
    let full = format!("{} {}", first.trim(), last.trim());
    let full = full.trim();
    if !full.is_empty() {
        return Some(full.to_string());
    }

    opt_text(object.get("email")).filter(|s| !s.is_empty())
}

// =============================================================================
// Entity normalizers
// =============================================================================

impl Canonical for UserRecord {
    type Raw = RawUser;

    fn from_raw(raw: &RawUser) -> Self {
        Self {
            id: UserId::new(integer(raw.id.as_ref())),
            email: text(raw.email.as_ref()),
            role: UserRole::parse(&text(raw.role.as_ref())),
            first_name: opt_text(pick(
                raw.first_name_camel.as_ref(),
                raw.first_name_snake.as_ref(),
            )),
            last_name: opt_text(pick(
                raw.last_name_camel.as_ref(),
                raw.last_name_snake.as_ref(),
            )),
            phone: opt_text(raw.phone.as_ref()),
            is_verified: flag(pick(
                raw.is_verified_camel.as_ref(),
                raw.is_verified_snake.as_ref(),
            )),
            created_at: timestamp(pick(
                raw.created_at_camel.as_ref(),
                raw.created_at_snake.as_ref(),
            )),
            updated_at: timestamp(pick(
                raw.updated_at_camel.as_ref(),
                raw.updated_at_snake.as_ref(),
            )),
        }
    }
}

impl Canonical for ProjectRecord {
    type Raw = RawProject;

    fn from_raw(raw: &RawProject) -> Self {
        let status = opt_text(raw.status.as_ref())
            .filter(|s| !s.is_empty())
            .map_or_else(ProjectStatus::default, |s| ProjectStatus::parse(&s));

        Self {
            id: ProjectId::new(integer(raw.id.as_ref())),
            title: text(raw.title.as_ref()),
            description: text(raw.description.as_ref()),
            service_id: ServiceId::new(integer(pick(
                raw.service_id_camel.as_ref(),
                raw.service_id_snake.as_ref(),
            ))),
            client_id: UserId::new(integer(pick(
                raw.client_id_camel.as_ref(),
                raw.client_id_snake.as_ref(),
            ))),
            controller_id: opt_integer(pick(
                raw.controller_id_camel.as_ref(),
                raw.controller_id_snake.as_ref(),
            ))
            .map(UserId::new),
            status,
            progress: integer(raw.progress.as_ref()),
            amount: decimal(raw.amount.as_ref()),
            amount_description: opt_text(pick(
                raw.amount_description_camel.as_ref(),
                raw.amount_description_snake.as_ref(),
            )),
            requirements_pdf: opt_text(pick(
                raw.requirements_pdf_camel.as_ref(),
                raw.requirements_pdf_snake.as_ref(),
            )),
            client_name: opt_text(pick(
                raw.client_name_camel.as_ref(),
                raw.client_name_snake.as_ref(),
            ))
            .or_else(|| nested_name(raw.client.as_ref())),
            controller_name: opt_text(pick(
                raw.controller_name_camel.as_ref(),
                raw.controller_name_snake.as_ref(),
            ))
            .or_else(|| nested_name(raw.controller.as_ref())),
            service_name: opt_text(pick(
                raw.service_name_camel.as_ref(),
                raw.service_name_snake.as_ref(),
            ))
            .or_else(|| nested_name(raw.service.as_ref())),
            created_at: timestamp(pick(
                raw.created_at_camel.as_ref(),
                raw.created_at_snake.as_ref(),
            )),
            updated_at: timestamp(pick(
                raw.updated_at_camel.as_ref(),
                raw.updated_at_snake.as_ref(),
            )),
        }
    }
}

impl Canonical for ServiceRecord {
    type Raw = RawService;

    fn from_raw(raw: &RawService) -> Self {
        Self {
            id: ServiceId::new(integer(raw.id.as_ref())),
            name: text(raw.name.as_ref()),
            description: text(raw.description.as_ref()),
            category: text(raw.category.as_ref()),
            price: decimal(raw.price.as_ref()),
            created_at: timestamp(pick(
                raw.created_at_camel.as_ref(),
                raw.created_at_snake.as_ref(),
            )),
            updated_at: timestamp(pick(
                raw.updated_at_camel.as_ref(),
                raw.updated_at_snake.as_ref(),
            )),
        }
    }
}

impl Canonical for NotificationRecord {
    type Raw = RawNotification;

    fn from_raw(raw: &RawNotification) -> Self {
        let kind = opt_text(raw.kind.as_ref())
            .filter(|s| !s.is_empty())
            .map_or_else(NotificationType::default, |s| NotificationType::parse(&s));

        Self {
            id: NotificationId::new(integer(raw.id.as_ref())),
            user_id: UserId::new(integer(pick(
                raw.user_id_camel.as_ref(),
                raw.user_id_snake.as_ref(),
            ))),
            title: text(raw.title.as_ref()),
            message: text(raw.message.as_ref()),
            kind,
            is_read: flag(pick(raw.is_read_camel.as_ref(), raw.is_read_snake.as_ref())),
            created_at: timestamp(pick(
                raw.created_at_camel.as_ref(),
                raw.created_at_snake.as_ref(),
            )),
            updated_at: timestamp(pick(
                raw.updated_at_camel.as_ref(),
                raw.updated_at_snake.as_ref(),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn renormalize<C: Canonical + Serialize>(record: &C) -> C {
        normalize_value(serde_json::to_value(record).unwrap())
    }

    #[test]
    fn test_camel_case_wins_over_snake_case() {
        let user: UserRecord = normalize_value(json!({
            "id": 3,
            "firstName": "Ada",
            "first_name": "Augusta",
            "last_name": "Lovelace"
        }));
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_null_camel_falls_through_to_snake() {
        let project: ProjectRecord = normalize_value(json!({
            "clientId": null,
            "client_id": 9
        }));
        assert_eq!(project.client_id, UserId::new(9));
    }

    #[test]
    fn test_empty_object_is_total() {
        let user: UserRecord = normalize_value(json!({}));
        assert_eq!(user.id, UserId::new(0));
        assert_eq!(user.email, "");
        assert_eq!(user.role, UserRole::Other(String::new()));
        assert!(!user.is_verified);
        assert!(user.created_at.is_none());

        let project: ProjectRecord = normalize_value(json!({}));
        assert_eq!(project.title, "");
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.progress, 0);
        assert!(project.controller_id.is_none());
        assert!(project.amount.is_none());

        let service: ServiceRecord = normalize_value(json!({}));
        assert_eq!(service.category, "");
        assert!(service.price.is_none());

        let notification: NotificationRecord = normalize_value(json!({}));
        assert_eq!(notification.kind, NotificationType::Message);
        assert!(!notification.is_read);
    }

    #[test]
    fn test_non_object_normalizes_to_defaults() {
        let service: ServiceRecord = normalize_value(json!("not a record"));
        assert_eq!(service, ServiceRecord::default());
    }

    #[test]
    fn test_numeric_flags_become_booleans() {
        let verified: UserRecord = normalize_value(json!({ "is_verified": 1 }));
        assert!(verified.is_verified);

        let unverified: UserRecord = normalize_value(json!({ "is_verified": 0 }));
        assert!(!unverified.is_verified);

        let read: NotificationRecord = normalize_value(json!({ "isRead": "yes" }));
        assert!(read.is_read);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let project: ProjectRecord = normalize_value(json!({
            "id": "12",
            "service_id": "4",
            "progress": "37.9",
            "amount": "1500.50",
            "controller_id": "not-a-number"
        }));
        assert_eq!(project.id, ProjectId::new(12));
        assert_eq!(project.service_id, ServiceId::new(4));
        assert_eq!(project.progress, 37);
        assert_eq!(project.amount, Some(Decimal::new(150_050, 2)));
        assert!(project.controller_id.is_none());
    }

    #[test]
    fn test_progress_is_not_clamped() {
        let project: ProjectRecord = normalize_value(json!({ "progress": 250 }));
        assert_eq!(project.progress, 250);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).single();

        for value in [
            json!("2025-01-15T09:30:00Z"),
            json!("2025-01-15T11:30:00+02:00"),
            json!("2025-01-15T09:30:00"),
            json!("2025-01-15 09:30:00"),
            json!(1_736_933_400_000_i64),
        ] {
            assert_eq!(timestamp(Some(&value)), expected, "value: {value}");
        }

        let with_fraction = timestamp(Some(&json!("2025-01-15T09:30:00.250")));
        assert!(with_fraction.is_some());

        let date_only = timestamp(Some(&json!("2025-01-15")));
        assert_eq!(date_only, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).single());

        assert_eq!(timestamp(Some(&json!("yesterday"))), None);
    }

    #[test]
    fn test_nested_display_names() {
        let project: ProjectRecord = normalize_value(json!({
            "client": { "first_name": "Grace", "last_name": "Hopper" },
            "controller": { "email": "ops@studio.io" },
            "service": { "name": "Web Design" }
        }));
        assert_eq!(project.client_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(project.controller_name.as_deref(), Some("ops@studio.io"));
        assert_eq!(project.service_name.as_deref(), Some("Web Design"));
    }

    #[test]
    fn test_flat_display_name_beats_nested() {
        let project: ProjectRecord = normalize_value(json!({
            "client_name": "Flat Name",
            "client": { "name": "Nested Name" }
        }));
        assert_eq!(project.client_name.as_deref(), Some("Flat Name"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let user: UserRecord = normalize_value(json!({
            "id": 1,
            "email": "ada@studio.io",
            "role": "controller",
            "first_name": "Ada",
            "is_verified": 1,
            "created_at": "2025-01-15T09:30:00.123Z"
        }));
        assert_eq!(renormalize(&user), user);

        let project: ProjectRecord = normalize_value(json!({
            "id": 2,
            "title": "Website",
            "service_id": 1,
            "client_id": 2,
            "controller_id": 5,
            "status": "inProgress",
            "progress": 40,
            "amount": 1200.5,
            "amount_description": "Deposit",
            "client": { "name": "Grace" }
        }));
        assert_eq!(renormalize(&project), project);

        let service: ServiceRecord = normalize_value(json!({
            "id": 3, "name": "SEO", "category": "seo", "price": "99.90"
        }));
        assert_eq!(renormalize(&service), service);

        let notification: NotificationRecord = normalize_value(json!({
            "id": 4, "user_id": 1, "title": "JS Bug", "type": "warning", "is_read": 1
        }));
        assert_eq!(renormalize(&notification), notification);
    }

    #[test]
    fn test_normalize_does_not_mutate_input() {
        let raw: RawUser = serde_json::from_value(json!({ "id": 1, "email": "a@b.c" })).unwrap();
        let before = raw.clone();
        let _user: UserRecord = normalize(&raw);
        assert_eq!(raw, before);
    }
}
