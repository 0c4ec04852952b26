//! Entity forms and the payloads they validate into.
//!
//! Forms hold exactly what the user typed. `validate` runs the local shape
//! checks (required fields, numbers that parse, progress in range) and
//! builds the typed payload sent to the collaborator. Optional fields left
//! blank are omitted from create payloads entirely.

use std::str::FromStr;

use atrium_core::{
    Email, NotificationRecord, NotificationType, ProjectRecord, ProjectStatus, ServiceId,
    ServiceRecord, UserId, UserRecord, UserRole,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConsoleError, ValidationError};

/// Minimum password length accepted on account creation.
pub const MIN_PASSWORD_LEN: usize = 8;

const PROGRESS_MIN: i64 = 0;
const PROGRESS_MAX: i64 = 100;

/// A form that creates and edits one kind of record.
pub trait RecordForm {
    type Record;

    /// Pre-populate the form from an existing record.
    fn from_record(record: &Self::Record) -> Self;

    /// Payload for a create call.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` if the form fails its local checks.
    fn create_payload(&self) -> Result<Value, ConsoleError>;

    /// Payload for an update call, restricted to the fields `role` may edit.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` if the form fails its local checks
    /// or `role` may not edit this record.
    fn update_payload(&self, role: &UserRole) -> Result<Value, ConsoleError>;
}

// =============================================================================
// Field Parsing
// =============================================================================

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn required_id<T: From<i64>>(value: &str, field: &'static str) -> Result<T, ValidationError> {
    optional_id(value, field)?.ok_or(ValidationError::Required(field))
}

fn optional_id<T: From<i64>>(value: &str, field: &'static str) -> Result<Option<T>, ValidationError> {
    let Some(value) = optional(value) else {
        return Ok(None);
    };
    value
        .parse::<i64>()
        .map(|id| Some(T::from(id)))
        .map_err(|_| ValidationError::NotAnInteger(field))
}

fn optional_amount(value: &str, field: &'static str) -> Result<Option<Decimal>, ValidationError> {
    let Some(value) = optional(value) else {
        return Ok(None);
    };
    match Decimal::from_str(&value) {
        Ok(amount) if amount.is_sign_negative() => Err(ValidationError::NotAnAmount(field)),
        Ok(amount) => Ok(Some(amount)),
        Err(_) => Err(ValidationError::NotAnAmount(field)),
    }
}

fn progress(value: &str) -> Result<i64, ValidationError> {
    let Some(value) = optional(value) else {
        return Ok(PROGRESS_MIN);
    };
    let progress = value
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger("Progress"))?;
    if !(PROGRESS_MIN..=PROGRESS_MAX).contains(&progress) {
        return Err(ValidationError::OutOfRange {
            field: "Progress",
            min: PROGRESS_MIN,
            max: PROGRESS_MAX,
        });
    }
    Ok(progress)
}

fn project_status(value: &str) -> Result<ProjectStatus, ValidationError> {
    match optional(value).map(|s| ProjectStatus::parse(&s)) {
        None => Ok(ProjectStatus::default()),
        Some(ProjectStatus::Other(value)) => Err(ValidationError::UnknownValue {
            field: "status",
            value,
        }),
        Some(status) => Ok(status),
    }
}

fn user_role(value: &str) -> Result<UserRole, ValidationError> {
    match optional(value).map(|s| UserRole::parse(&s)) {
        None => Ok(UserRole::default()),
        Some(UserRole::Other(value)) => Err(ValidationError::UnknownValue {
            field: "role",
            value,
        }),
        Some(role) => Ok(role),
    }
}

fn notification_type(value: &str) -> Result<NotificationType, ValidationError> {
    match optional(value).map(|s| NotificationType::parse(&s)) {
        None => Ok(NotificationType::default()),
        Some(NotificationType::Other(value)) => Err(ValidationError::UnknownValue {
            field: "type",
            value,
        }),
        Some(kind) => Ok(kind),
    }
}

fn password(value: &str) -> Result<String, ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(value.to_string())
}

fn admin_only(role: &UserRole) -> Result<(), ValidationError> {
    match role {
        UserRole::Admin => Ok(()),
        _ => Err(ValidationError::Forbidden),
    }
}

fn decimal_text(value: Option<Decimal>) -> String {
    value.map(|d| d.normalize().to_string()).unwrap_or_default()
}

/// Serialize an editable amount: omitted when untouched, `null` when cleared.
#[allow(clippy::ref_option)]
fn serialize_cleared_amount<S: Serializer>(
    value: &Option<Option<Decimal>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(Some(amount)) => rust_decimal::serde::float::serialize(amount, serializer),
        _ => serializer.serialize_none(),
    }
}

fn to_payload<T: Serialize>(payload: &T) -> Result<Value, ConsoleError> {
    Ok(serde_json::to_value(payload)?)
}

// =============================================================================
// Projects
// =============================================================================

/// Project form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub service_id: String,
    pub client_id: String,
    pub controller_id: String,
    pub status: String,
    pub progress: String,
    pub amount: String,
    pub amount_description: String,
}

/// Validated project create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    pub service_id: ServiceId,
    pub client_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<UserId>,
    pub status: ProjectStatus,
    pub progress: i64,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_description: Option<String>,
}

/// Project update payload. `None` leaves a field untouched; for clearable
/// fields `Some(None)` sends `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<Option<UserId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_cleared_amount"
    )]
    pub amount: Option<Option<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_description: Option<Option<String>>,
}

impl ProjectForm {
    /// Run the local checks and build the create payload.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<ProjectPayload, ValidationError> {
        Ok(ProjectPayload {
            title: required(&self.title, "Title")?,
            description: self.description.trim().to_string(),
            service_id: required_id(&self.service_id, "Service")?,
            client_id: required_id(&self.client_id, "Client")?,
            controller_id: optional_id(&self.controller_id, "Controller")?,
            status: project_status(&self.status)?,
            progress: progress(&self.progress)?,
            amount: optional_amount(&self.amount, "Amount")?,
            amount_description: optional(&self.amount_description),
        })
    }

    /// Build an update containing only what `role` may change.
    ///
    /// Controllers may change status, progress, amount, amount description,
    /// and description. Admins may change everything. Clients may not edit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Forbidden` for roles without edit rights,
    /// or the first failing editable field.
    pub fn to_update(&self, role: &UserRole) -> Result<ProjectUpdate, ValidationError> {
        match role {
            UserRole::Admin => {
                let payload = self.validate()?;
                Ok(ProjectUpdate {
                    title: Some(payload.title),
                    description: Some(payload.description),
                    service_id: Some(payload.service_id),
                    client_id: Some(payload.client_id),
                    controller_id: Some(payload.controller_id),
                    status: Some(payload.status),
                    progress: Some(payload.progress),
                    amount: Some(payload.amount),
                    amount_description: Some(payload.amount_description),
                })
            }
            UserRole::Controller => Ok(ProjectUpdate {
                description: Some(self.description.trim().to_string()),
                status: Some(project_status(&self.status)?),
                progress: Some(progress(&self.progress)?),
                amount: Some(optional_amount(&self.amount, "Amount")?),
                amount_description: Some(optional(&self.amount_description)),
                ..ProjectUpdate::default()
            }),
            UserRole::Client | UserRole::Other(_) => Err(ValidationError::Forbidden),
        }
    }
}

impl RecordForm for ProjectForm {
    type Record = ProjectRecord;

    fn from_record(record: &ProjectRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            service_id: record.service_id.to_string(),
            client_id: record.client_id.to_string(),
            controller_id: record
                .controller_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: record.status.as_str().to_string(),
            progress: record.progress.to_string(),
            amount: decimal_text(record.amount),
            amount_description: record.amount_description.clone().unwrap_or_default(),
        }
    }

    fn create_payload(&self) -> Result<Value, ConsoleError> {
        to_payload(&self.validate()?)
    }

    fn update_payload(&self, role: &UserRole) -> Result<Value, ConsoleError> {
        to_payload(&self.to_update(role)?)
    }
}

// =============================================================================
// Users
// =============================================================================

/// User form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserForm {
    pub email: String,
    /// Required on create; blank on edit keeps the current password.
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Validated user payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserForm {
    /// Validate for account creation.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<UserPayload, ValidationError> {
        let mut payload = self.validate_profile()?;
        payload.password = Some(password(&self.password)?);
        Ok(payload)
    }

    /// Validate for an edit. A blank password is left out.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate_update(&self) -> Result<UserPayload, ValidationError> {
        let mut payload = self.validate_profile()?;
        if !self.password.is_empty() {
            payload.password = Some(password(&self.password)?);
        }
        Ok(payload)
    }

    fn validate_profile(&self) -> Result<UserPayload, ValidationError> {
        let email = required(&self.email, "Email")?;
        Ok(UserPayload {
            email: Email::parse(&email)?,
            password: None,
            role: user_role(&self.role)?,
            first_name: optional(&self.first_name),
            last_name: optional(&self.last_name),
            phone: optional(&self.phone),
        })
    }
}

impl RecordForm for UserForm {
    type Record = UserRecord;

    fn from_record(record: &UserRecord) -> Self {
        Self {
            email: record.email.clone(),
            password: String::new(),
            role: record.role.as_str().to_string(),
            first_name: record.first_name.clone().unwrap_or_default(),
            last_name: record.last_name.clone().unwrap_or_default(),
            phone: record.phone.clone().unwrap_or_default(),
        }
    }

    fn create_payload(&self) -> Result<Value, ConsoleError> {
        to_payload(&self.validate()?)
    }

    fn update_payload(&self, role: &UserRole) -> Result<Value, ConsoleError> {
        admin_only(role)?;
        to_payload(&self.validate_update()?)
    }
}

// =============================================================================
// Services
// =============================================================================

/// Service form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Blank means "price on request".
    pub price: String,
}

/// Validated service payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
}

impl ServiceForm {
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<ServicePayload, ValidationError> {
        Ok(ServicePayload {
            name: required(&self.name, "Name")?,
            description: self.description.trim().to_string(),
            category: required(&self.category, "Category")?,
            price: optional_amount(&self.price, "Price")?,
        })
    }
}

impl RecordForm for ServiceForm {
    type Record = ServiceRecord;

    fn from_record(record: &ServiceRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            price: decimal_text(record.price),
        }
    }

    fn create_payload(&self) -> Result<Value, ConsoleError> {
        to_payload(&self.validate()?)
    }

    fn update_payload(&self, role: &UserRole) -> Result<Value, ConsoleError> {
        admin_only(role)?;
        let payload = self.validate()?;
        let mut value = to_payload(&payload)?;
        // A cleared price goes back to "on request".
        if payload.price.is_none()
            && let Value::Object(map) = &mut value
        {
            map.insert("price".to_string(), Value::Null);
        }
        Ok(value)
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationForm {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Validated notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
}

impl NotificationForm {
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<NotificationPayload, ValidationError> {
        Ok(NotificationPayload {
            user_id: required_id(&self.user_id, "Recipient")?,
            title: required(&self.title, "Title")?,
            message: required(&self.message, "Message")?,
            kind: notification_type(&self.kind)?,
        })
    }
}

impl RecordForm for NotificationForm {
    type Record = NotificationRecord;

    fn from_record(record: &NotificationRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            title: record.title.clone(),
            message: record.message.clone(),
            kind: record.kind.as_str().to_string(),
        }
    }

    fn create_payload(&self) -> Result<Value, ConsoleError> {
        to_payload(&self.validate()?)
    }

    fn update_payload(&self, role: &UserRole) -> Result<Value, ConsoleError> {
        match role {
            UserRole::Admin | UserRole::Controller => to_payload(&self.validate()?),
            UserRole::Client | UserRole::Other(_) => Err(ValidationError::Forbidden.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atrium_core::ProjectId;
    use serde_json::json;

    use super::*;

    fn website() -> ProjectForm {
        ProjectForm {
            title: "Website".to_string(),
            description: "New site".to_string(),
            service_id: "1".to_string(),
            client_id: "2".to_string(),
            progress: "0".to_string(),
            ..ProjectForm::default()
        }
    }

    #[test]
    fn test_project_payload_omits_blank_optionals() {
        let payload = website().create_payload().unwrap();
        assert_eq!(
            payload,
            json!({
                "title": "Website",
                "description": "New site",
                "serviceId": 1,
                "clientId": 2,
                "status": "pending",
                "progress": 0
            })
        );
        let object = payload.as_object().unwrap();
        assert!(!object.contains_key("controllerId"));
        assert!(!object.contains_key("amount"));
        assert!(!object.contains_key("amountDescription"));
    }

    #[test]
    fn test_project_amount_serializes_as_number() {
        let form = ProjectForm {
            amount: "1250.50".to_string(),
            controller_id: "9".to_string(),
            ..website()
        };
        let payload = form.create_payload().unwrap();
        assert_eq!(payload["amount"], json!(1250.5));
        assert_eq!(payload["controllerId"], json!(9));
    }

    #[test]
    fn test_project_required_fields() {
        let form = ProjectForm {
            title: "  ".to_string(),
            ..website()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Title")));

        let form = ProjectForm {
            service_id: String::new(),
            ..website()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Service")));

        let form = ProjectForm {
            client_id: "abc".to_string(),
            ..website()
        };
        assert_eq!(form.validate(), Err(ValidationError::NotAnInteger("Client")));
    }

    #[test]
    fn test_project_progress_range() {
        for (input, ok) in [("0", true), ("100", true), ("", true), ("101", false), ("-1", false)] {
            let form = ProjectForm {
                progress: input.to_string(),
                ..website()
            };
            assert_eq!(form.validate().is_ok(), ok, "progress {input:?}");
        }
        let form = ProjectForm {
            progress: "half".to_string(),
            ..website()
        };
        assert_eq!(form.validate(), Err(ValidationError::NotAnInteger("Progress")));
    }

    #[test]
    fn test_project_rejects_bad_amount_and_status() {
        let form = ProjectForm {
            amount: "12,5".to_string(),
            ..website()
        };
        assert_eq!(form.validate(), Err(ValidationError::NotAnAmount("Amount")));

        let form = ProjectForm {
            status: "archived".to_string(),
            ..website()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::UnknownValue { field: "status", .. })
        ));
    }

    #[test]
    fn test_controller_update_is_scoped() {
        let form = ProjectForm {
            status: "development".to_string(),
            progress: "40".to_string(),
            client_id: "77".to_string(),
            ..website()
        };
        let payload = form.update_payload(&UserRole::Controller).unwrap();
        let object = payload.as_object().unwrap();
        assert_eq!(payload["status"], json!("development"));
        assert_eq!(payload["progress"], json!(40));
        assert_eq!(payload["amount"], Value::Null);
        assert!(!object.contains_key("clientId"));
        assert!(!object.contains_key("serviceId"));
        assert!(!object.contains_key("title"));
    }

    #[test]
    fn test_controller_update_skips_locked_field_validation() {
        let form = ProjectForm {
            title: String::new(),
            service_id: "not a number".to_string(),
            progress: "10".to_string(),
            ..ProjectForm::default()
        };
        assert!(form.to_update(&UserRole::Controller).is_ok());
        assert!(form.to_update(&UserRole::Admin).is_err());
    }

    #[test]
    fn test_client_cannot_update_project() {
        assert_eq!(
            website().to_update(&UserRole::Client),
            Err(ValidationError::Forbidden)
        );
    }

    #[test]
    fn test_admin_update_clears_controller() {
        let payload = website().update_payload(&UserRole::Admin).unwrap();
        assert_eq!(payload["controllerId"], Value::Null);
        assert_eq!(payload["serviceId"], json!(1));
    }

    #[test]
    fn test_project_form_from_record() {
        let record = ProjectRecord {
            id: ProjectId::new(3),
            title: "Shop".to_string(),
            service_id: ServiceId::new(4),
            client_id: UserId::new(5),
            status: ProjectStatus::Testing,
            progress: 80,
            amount: Some(Decimal::new(150_000, 2)),
            ..ProjectRecord::default()
        };
        let form = ProjectForm::from_record(&record);
        assert_eq!(form.service_id, "4");
        assert_eq!(form.controller_id, "");
        assert_eq!(form.status, "testing");
        assert_eq!(form.amount, "1500");
        assert_eq!(form.validate().unwrap().amount, Some(Decimal::from(1500)));
    }

    #[test]
    fn test_user_create_requires_password() {
        let form = UserForm {
            email: "ada@studio.io".to_string(),
            password: "short".to_string(),
            ..UserForm::default()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );

        let form = UserForm {
            password: "long enough".to_string(),
            ..form
        };
        let payload = form.create_payload().unwrap();
        assert_eq!(payload["role"], json!("client"));
        assert_eq!(payload["password"], json!("long enough"));
        assert!(payload.get("firstName").is_none());
    }

    #[test]
    fn test_user_update_keeps_password_when_blank() {
        let form = UserForm {
            email: "ada@studio.io".to_string(),
            role: "controller".to_string(),
            ..UserForm::default()
        };
        let payload = form.update_payload(&UserRole::Admin).unwrap();
        assert!(payload.get("password").is_none());
        assert_eq!(payload["role"], json!("controller"));

        assert!(matches!(
            form.update_payload(&UserRole::Controller),
            Err(ConsoleError::Validation(ValidationError::Forbidden))
        ));
    }

    #[test]
    fn test_user_invalid_email() {
        let form = UserForm {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            ..UserForm::default()
        };
        assert!(matches!(form.validate(), Err(ValidationError::Email(_))));
    }

    #[test]
    fn test_service_price_optional() {
        let form = ServiceForm {
            name: "Landing page".to_string(),
            category: "web".to_string(),
            ..ServiceForm::default()
        };
        let payload = form.create_payload().unwrap();
        assert!(payload.get("price").is_none());

        let update = form.update_payload(&UserRole::Admin).unwrap();
        assert_eq!(update["price"], Value::Null);

        let form = ServiceForm {
            price: "499.50".to_string(),
            ..form
        };
        assert_eq!(form.create_payload().unwrap()["price"], json!(499.5));
    }

    #[test]
    fn test_service_requires_category() {
        let form = ServiceForm {
            name: "SEO audit".to_string(),
            ..ServiceForm::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Category")));
    }

    #[test]
    fn test_notification_defaults_to_message() {
        let form = NotificationForm {
            user_id: "12".to_string(),
            title: "Heads up".to_string(),
            message: "Invoice sent".to_string(),
            ..NotificationForm::default()
        };
        assert_eq!(
            form.create_payload().unwrap(),
            json!({
                "userId": 12,
                "title": "Heads up",
                "message": "Invoice sent",
                "type": "message"
            })
        );
        assert!(form.update_payload(&UserRole::Controller).is_ok());
        assert!(form.update_payload(&UserRole::Client).is_err());
    }

    #[test]
    fn test_form_deserializes_from_camel_case() {
        let form: ProjectForm = serde_json::from_value(json!({
            "title": "Website",
            "serviceId": "1",
            "clientId": "2"
        }))
        .unwrap();
        assert_eq!(form.service_id, "1");
        assert!(form.amount.is_empty());
    }
}
