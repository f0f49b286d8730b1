//! Contact Submission Validation
//!
//! Validates the demo-request form posted to the contact endpoint. Every
//! field is checked and the first failing rule of each is reported, so a
//! client can mark all bad fields at once.
//!
//! Issues use the field-error shape web form libraries expect:
//! `{code, path, message}` plus the rule's parameters (`expected` and
//! `received` for type errors, `minimum` for length errors, `validation` for
//! format errors). A missing required field is an `invalid_type` issue with
//! the message `Required`. Unknown keys are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful submission response
pub const ACCEPTED_MESSAGE: &str = "Thank you! We'll be in touch shortly.";

/// Body of a validation failure response
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed.";

/// Body of any other failure response
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
const PHARMACY_REQUIRED: &str = "Pharmacy name is required.";
const INVALID_EMAIL: &str = "Invalid email address.";

// Local part may not start with '.' or contain "..": checked separately.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A validated demo request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Contact name
    pub name: String,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Reply address
    pub email: String,
    /// Pharmacy or group name
    pub pharmacy: String,
    /// Country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Free-text message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether a demo was requested
    #[serde(rename = "wantsDemo")]
    pub wants_demo: bool,
}

/// Kind of validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Missing, or the wrong JSON type
    InvalidType,
    /// String shorter than its minimum
    TooSmall,
    /// String failed a format check
    InvalidString,
}

/// One field-level validation issue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFieldError {
    /// Issue kind
    pub code: IssueCode,
    /// Path to the offending value; empty for the body itself
    pub path: Vec<String>,
    /// User-facing message
    pub message: String,
    /// Expected JSON type (`invalid_type`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// JSON type received (`invalid_type`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    /// Minimum length (`too_small`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    /// Value type the minimum applies to (`too_small`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Whether the minimum is inclusive (`too_small`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    /// Failed format check (`invalid_string`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}

impl ContactFieldError {
    fn bare(code: IssueCode, path: &[&str], message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.iter().map(|p| (*p).to_string()).collect(),
            message: message.into(),
            expected: None,
            received: None,
            minimum: None,
            value_type: None,
            inclusive: None,
            validation: None,
        }
    }

    fn invalid_type(path: &[&str], expected: &str, received: &str) -> Self {
        let message = if received == "undefined" {
            "Required".to_string()
        } else {
            format!("Expected {expected}, received {received}")
        };
        Self {
            expected: Some(expected.to_string()),
            received: Some(received.to_string()),
            ..Self::bare(IssueCode::InvalidType, path, message)
        }
    }

    fn too_small(field: &str, minimum: usize, message: &str) -> Self {
        Self {
            minimum: Some(minimum),
            value_type: Some("string".to_string()),
            inclusive: Some(true),
            ..Self::bare(IssueCode::TooSmall, &[field], message)
        }
    }

    fn invalid_string(field: &str, validation: &str, message: &str) -> Self {
        Self {
            validation: Some(validation.to_string()),
            ..Self::bare(IssueCode::InvalidString, &[field], message)
        }
    }
}

/// Response body of the contact endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    /// Whether the submission was accepted
    pub success: bool,
    /// User-facing message
    pub message: String,
    /// Field issues, on validation failure only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ContactFieldError>>,
}

impl ContactResponse {
    /// 200 body
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: ACCEPTED_MESSAGE.to_string(),
            errors: None,
        }
    }

    /// 400 body
    #[must_use]
    pub fn invalid(errors: Vec<ContactFieldError>) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            errors: Some(errors),
        }
    }

    /// 500 body
    #[must_use]
    pub fn unexpected() -> Self {
        Self {
            success: false,
            message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            errors: None,
        }
    }
}

/// JSON type name as reported in `invalid_type` issues
fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// String length in UTF-16 code units, as browsers count it
fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Whether `email` is a plausible address
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.')
        && !email.contains("..")
        && EMAIL_RE.is_match(email)
}

struct Fields<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<ContactFieldError>,
}

impl<'a> Fields<'a> {
    fn required_string(&mut self, field: &str) -> Option<&'a str> {
        match self.body.get(field) {
            Some(Value::String(s)) => Some(s.as_str()),
            other => {
                self.errors.push(ContactFieldError::invalid_type(
                    &[field],
                    "string",
                    type_name(other),
                ));
                None
            }
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.body.get(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.errors.push(ContactFieldError::invalid_type(
                    &[field],
                    "string",
                    type_name(Some(other)),
                ));
                None
            }
        }
    }

    fn min_length(&mut self, field: &str, minimum: usize, message: &str) -> Option<String> {
        let value = self.required_string(field)?;
        if text_len(value) < minimum {
            self.errors
                .push(ContactFieldError::too_small(field, minimum, message));
            return None;
        }
        Some(value.to_string())
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let value = self.required_string(field)?;
        if !is_valid_email(value) {
            self.errors.push(ContactFieldError::invalid_string(
                field,
                "email",
                INVALID_EMAIL,
            ));
            return None;
        }
        Some(value.to_string())
    }

    fn required_bool(&mut self, field: &str) -> Option<bool> {
        match self.body.get(field) {
            Some(Value::Bool(b)) => Some(*b),
            other => {
                self.errors.push(ContactFieldError::invalid_type(
                    &[field],
                    "boolean",
                    type_name(other),
                ));
                None
            }
        }
    }
}

/// Validate a parsed request body
///
/// # Errors
///
/// Returns every field issue found, in schema field order.
pub fn validate_contact(body: &Value) -> Result<ContactSubmission, Vec<ContactFieldError>> {
    let Value::Object(map) = body else {
        return Err(vec![ContactFieldError::invalid_type(
            &[],
            "object",
            type_name(Some(body)),
        )]);
    };

    let mut fields = Fields {
        body: map,
        errors: Vec::new(),
    };

    let name = fields.min_length("name", 2, NAME_TOO_SHORT);
    let role = fields.optional_string("role");
    let email = fields.email("email");
    let pharmacy = fields.min_length("pharmacy", 2, PHARMACY_REQUIRED);
    let country = fields.optional_string("country");
    let message = fields.optional_string("message");
    let wants_demo = fields.required_bool("wantsDemo");

    match (name, email, pharmacy, wants_demo) {
        (Some(name), Some(email), Some(pharmacy), Some(wants_demo)) if fields.errors.is_empty() => {
            Ok(ContactSubmission {
                name,
                role,
                email,
                pharmacy,
                country,
                message,
                wants_demo,
            })
        }
        _ => Err(fields.errors),
    }
}
