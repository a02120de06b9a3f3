//! Request validation for video create and update.
//!
//! Validation semantics:
//! - Every field is checked; failures accumulate, nothing short-circuits
//! - At most one error per field, reported in declaration order
//! - No coercion: a number is never accepted where a string is expected
//! - Lengths are measured on the trimmed value, in characters
//!
//! On success the candidate is narrowed to a typed input. The stored text is
//! the value as sent, not the trimmed one.

use serde_json::Value;

use super::errors::ValidationErrors;
use super::resolution::Resolution;
use super::types::{CreateVideoInput, UpdateVideoInput, VideoCandidate};

pub const TITLE_MAX_LEN: usize = 40;
pub const AUTHOR_MAX_LEN: usize = 20;
pub const MIN_AGE_LOWER: i64 = 1;
pub const MIN_AGE_UPPER: i64 = 18;

/// Validates a create request.
///
/// Only `title`, `author` and `availableResolutions` are inspected. Create
/// requires at least one resolution.
pub fn validate_create(candidate: &VideoCandidate) -> Result<CreateVideoInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = record(&mut errors, "title", check_text("title", &candidate.title, TITLE_MAX_LEN));
    let author = record(&mut errors, "author", check_text("author", &candidate.author, AUTHOR_MAX_LEN));
    let available_resolutions = record(
        &mut errors,
        "availableResolutions",
        check_resolutions(&candidate.available_resolutions, false),
    );

    match (title, author, available_resolutions) {
        (Some(title), Some(author), Some(available_resolutions)) if errors.is_empty() => {
            Ok(CreateVideoInput {
                title,
                author,
                available_resolutions,
            })
        }
        _ => Err(errors),
    }
}

/// Validates an update request.
///
/// `minAgeRestriction` and `publicationDate` are mandatory here even though
/// a freshly created record carries no age restriction. An empty resolution
/// list is accepted. An absent `canBeDownloaded` resolves to `false`.
pub fn validate_update(candidate: &VideoCandidate) -> Result<UpdateVideoInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = record(&mut errors, "title", check_text("title", &candidate.title, TITLE_MAX_LEN));
    let author = record(&mut errors, "author", check_text("author", &candidate.author, AUTHOR_MAX_LEN));
    let available_resolutions = record(
        &mut errors,
        "availableResolutions",
        check_resolutions(&candidate.available_resolutions, true),
    );
    let can_be_downloaded = record(
        &mut errors,
        "canBeDownloaded",
        check_download_flag(&candidate.can_be_downloaded),
    );
    let min_age_restriction = record(
        &mut errors,
        "minAgeRestriction",
        check_min_age(&candidate.min_age_restriction),
    );
    let publication_date = record(
        &mut errors,
        "publicationDate",
        check_publication_date(&candidate.publication_date),
    );

    match (
        title,
        author,
        available_resolutions,
        can_be_downloaded,
        min_age_restriction,
        publication_date,
    ) {
        (
            Some(title),
            Some(author),
            Some(available_resolutions),
            Some(can_be_downloaded),
            Some(min_age_restriction),
            Some(publication_date),
        ) if errors.is_empty() => Ok(UpdateVideoInput {
            title,
            author,
            available_resolutions,
            can_be_downloaded,
            min_age_restriction,
            publication_date,
        }),
        _ => Err(errors),
    }
}

/// Moves a field failure into the error list and keeps the value otherwise.
fn record<T>(errors: &mut ValidationErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn check_text(field: &str, value: &Option<Value>, max_len: usize) -> Result<String, String> {
    let value = value.as_ref().ok_or_else(|| format!("{} is required", field))?;
    let text = value
        .as_str()
        .ok_or_else(|| format!("{} must be a string, got {}", field, json_type_name(value)))?;

    let trimmed_len = text.trim().chars().count();
    if trimmed_len == 0 {
        return Err(format!("{} must not be empty", field));
    }
    if trimmed_len > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }

    Ok(text.to_string())
}

fn check_resolutions(value: &Option<Value>, allow_empty: bool) -> Result<Vec<Resolution>, String> {
    let value = value
        .as_ref()
        .ok_or_else(|| "availableResolutions is required".to_string())?;
    let items = value.as_array().ok_or_else(|| {
        format!(
            "availableResolutions must be an array, got {}",
            json_type_name(value)
        )
    })?;

    if items.is_empty() && !allow_empty {
        return Err("availableResolutions must contain at least one resolution".to_string());
    }

    items
        .iter()
        .map(|item| {
            item.as_str().and_then(Resolution::parse).ok_or_else(|| {
                format!("availableResolutions contains an unknown resolution: {}", item)
            })
        })
        .collect()
}

fn check_download_flag(value: &Option<Value>) -> Result<bool, String> {
    match value {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(format!(
            "canBeDownloaded must be a boolean, got {}",
            json_type_name(other)
        )),
    }
}

fn check_min_age(value: &Option<Value>) -> Result<u8, String> {
    let value = value
        .as_ref()
        .ok_or_else(|| "minAgeRestriction is required".to_string())?;

    // as_i64 is None for floats, so 5.0 is rejected along with 5.5
    let age = value.as_i64().ok_or_else(|| {
        format!(
            "minAgeRestriction must be an integer, got {}",
            json_type_name(value)
        )
    })?;

    if !(MIN_AGE_LOWER..=MIN_AGE_UPPER).contains(&age) {
        return Err(format!(
            "minAgeRestriction must be between {} and {}",
            MIN_AGE_LOWER, MIN_AGE_UPPER
        ));
    }

    u8::try_from(age).map_err(|_| "minAgeRestriction is out of range".to_string())
}

fn check_publication_date(value: &Option<Value>) -> Result<String, String> {
    let value = value
        .as_ref()
        .ok_or_else(|| "publicationDate is required".to_string())?;
    let text = value.as_str().ok_or_else(|| {
        format!(
            "publicationDate must be a string, got {}",
            json_type_name(value)
        )
    })?;

    if text.is_empty() {
        return Err("publicationDate must not be empty".to_string());
    }

    Ok(text.to_string())
}

/// Returns the JSON type name of a value.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
