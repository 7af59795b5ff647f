//! Payload validation for video create/update requests
//!
//! Request bodies are accepted as loosely typed JSON so that wrong types are
//! reported as field errors instead of failing deserialization. Every check
//! runs; errors accumulate in field order and are returned together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{
    MAX_AGE_RESTRICTION, MAX_AUTHOR_LENGTH, MAX_TITLE_LENGTH, MIN_AGE_RESTRICTION,
};
use crate::models::{NewVideo, Resolution, VideoUpdate};

/// Body of `POST /videos`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub available_resolutions: Option<Value>,
}

/// Body of `PUT /videos/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub available_resolutions: Option<Value>,
    pub can_be_downloaded: Option<Value>,
    pub min_age_restriction: Option<Value>,
    pub publication_date: Option<Value>,
}

/// How `minAgeRestriction` bounds are enforced on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeRestrictionCheck {
    /// Reject anything outside `[1, 18]`.
    #[default]
    Strict,
    /// Only reject values above 18. Values below 1 are stored as given,
    /// matching the behaviour of earlier deployments.
    Legacy,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

/// Ordered list of field errors, serialized as `{"errorsMessages": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("validation failed with {} error(s)", .errors_messages.len())]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub errors_messages: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors_messages.push(FieldError {
            message: message.into(),
            field: field.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors_messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors_messages.len()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors_messages.iter().map(|e| e.field.as_str()).collect()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Create and update report the same problems with different wording.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    Update,
}

impl Operation {
    fn message(self, field: &str) -> String {
        match self {
            Operation::Create => format!("Invalid {}", field),
            Operation::Update => format!("Incorrect {}", field),
        }
    }
}

struct Checker {
    op: Operation,
    errors: ValidationErrors,
}

impl Checker {
    fn new(op: Operation) -> Self {
        Self {
            op,
            errors: ValidationErrors::new(),
        }
    }

    fn reject(&mut self, field: &str) {
        let message = self.op.message(field);
        self.errors.push(field, message);
    }

    /// Required string whose trimmed length lies in `1..=max`.
    /// The untrimmed value is what gets stored.
    fn bounded_text(&mut self, field: &str, value: Option<&Value>, max: usize) -> String {
        match value.and_then(Value::as_str) {
            Some(text) if (1..=max).contains(&text.trim().chars().count()) => text.to_string(),
            _ => {
                self.reject(field);
                String::new()
            }
        }
    }

    /// Arrays are checked element by element, one error per bad element.
    /// Anything that is not an array becomes an empty list.
    fn resolutions(&mut self, value: Option<&Value>) -> Vec<Resolution> {
        let Some(Value::Array(items)) = value else {
            return Vec::new();
        };

        let mut resolutions = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str().and_then(|s| s.parse::<Resolution>().ok()) {
                Some(resolution) => resolutions.push(resolution),
                None => self.reject("availableResolutions"),
            }
        }
        resolutions
    }

    fn min_age_restriction(
        &mut self,
        value: Option<&Value>,
        check: AgeRestrictionCheck,
    ) -> Option<i64> {
        let value = value.filter(|v| !is_falsy(v))?;

        let Some(age) = value.as_i64() else {
            self.reject("minAgeRestriction");
            return None;
        };

        let out_of_range = match check {
            AgeRestrictionCheck::Strict => {
                !(MIN_AGE_RESTRICTION..=MAX_AGE_RESTRICTION).contains(&age)
            }
            AgeRestrictionCheck::Legacy => age > MAX_AGE_RESTRICTION,
        };

        if out_of_range {
            self.reject("minAgeRestriction");
            return None;
        }
        Some(age)
    }

    fn publication_date(&mut self, value: Option<&Value>) -> Option<DateTime<Utc>> {
        let value = value.filter(|v| !is_falsy(v))?;

        match value.as_str().map(DateTime::parse_from_rfc3339) {
            Some(Ok(date)) => Some(date.with_timezone(&Utc)),
            _ => {
                self.reject("publicationDate");
                None
            }
        }
    }
}

/// Never rejected: non-boolean values collapse to their truthiness.
fn can_be_downloaded(value: Option<&Value>) -> bool {
    match value {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => !is_falsy(other),
    }
}

/// JSON values that count as "not provided" for optional fields.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Validate the body of a create request.
pub fn validate_create(req: &CreateVideoRequest) -> Result<NewVideo, ValidationErrors> {
    let mut checker = Checker::new(Operation::Create);

    let title = checker.bounded_text("title", req.title.as_ref(), MAX_TITLE_LENGTH);
    let author = checker.bounded_text("author", req.author.as_ref(), MAX_AUTHOR_LENGTH);
    let available_resolutions = checker.resolutions(req.available_resolutions.as_ref());

    checker.errors.into_result(NewVideo {
        title,
        author,
        available_resolutions,
    })
}

/// Validate the body of an update request.
pub fn validate_update(
    req: &UpdateVideoRequest,
    age_check: AgeRestrictionCheck,
) -> Result<VideoUpdate, ValidationErrors> {
    let mut checker = Checker::new(Operation::Update);

    let title = checker.bounded_text("title", req.title.as_ref(), MAX_TITLE_LENGTH);
    let author = checker.bounded_text("author", req.author.as_ref(), MAX_AUTHOR_LENGTH);
    let available_resolutions = checker.resolutions(req.available_resolutions.as_ref());
    let can_be_downloaded = can_be_downloaded(req.can_be_downloaded.as_ref());
    let min_age_restriction =
        checker.min_age_restriction(req.min_age_restriction.as_ref(), age_check);
    let publication_date = checker.publication_date(req.publication_date.as_ref());

    checker.errors.into_result(VideoUpdate {
        title,
        author,
        available_resolutions,
        can_be_downloaded,
        min_age_restriction,
        publication_date,
    })
}
