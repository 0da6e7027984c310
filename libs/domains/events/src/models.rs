//! Event domain models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use validator::Validate;

use crate::rules::ValidationError;

/// Publication status of an event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Newly created, not visible to attendees
    #[default]
    Draft,
    /// Visible, enrollment not yet open
    Published,
    /// Enrollment window is open
    BeganEnrollment,
}

/// Caller-supplied event representation.
///
/// Required values are optional at the type level so that a missing field is
/// reported as a violation instead of failing deserialization. Server-owned
/// properties (`id`, `free`, `offline`, `eventStatus`) are rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDto {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required)]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    #[validate(required)]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    #[validate(required)]
    pub begin_event_date_time: Option<NaiveDateTime>,
    #[validate(required)]
    pub end_event_date_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub base_price: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_price: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub limit_of_enrollment: i32,
}

impl EventDto {
    /// Check required fields and numeric ranges, producing an [`EventInput`]
    /// whose derived flags are still unset.
    pub fn into_input(self) -> Result<EventInput, Vec<ValidationError>> {
        if let Err(errors) = self.validate() {
            return Err(presence_violations(&errors));
        }

        match (
            self.name,
            self.description,
            self.begin_enrollment_date_time,
            self.close_enrollment_date_time,
            self.begin_event_date_time,
            self.end_event_date_time,
        ) {
            (
                Some(name),
                Some(description),
                Some(begin_enrollment_date_time),
                Some(close_enrollment_date_time),
                Some(begin_event_date_time),
                Some(end_event_date_time),
            ) => Ok(EventInput {
                name,
                description,
                begin_enrollment_date_time,
                close_enrollment_date_time,
                begin_event_date_time,
                end_event_date_time,
                location: self.location,
                base_price: self.base_price,
                max_price: self.max_price,
                limit_of_enrollment: self.limit_of_enrollment,
                free: false,
                offline: false,
            }),
            _ => Err(vec![ValidationError::global(
                "required",
                "Required event fields are missing",
            )]),
        }
    }
}

/// Event fields after the presence contract holds.
///
/// `free` and `offline` are owned by [`crate::EventRuleEngine::derive`] and are
/// overwritten on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub free: bool,
    pub offline: bool,
}

/// Accepted event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Identifier assigned by the repository
    pub id: i32,
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    /// No charge at all: both prices are zero
    pub free: bool,
    /// Held at a physical location
    pub offline: bool,
    pub event_status: EventStatus,
}

impl Event {
    /// Create a draft event from an accepted input
    pub fn new(id: i32, input: EventInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            begin_enrollment_date_time: input.begin_enrollment_date_time,
            close_enrollment_date_time: input.close_enrollment_date_time,
            begin_event_date_time: input.begin_event_date_time,
            end_event_date_time: input.end_event_date_time,
            location: input.location,
            base_price: input.base_price,
            max_price: input.max_price,
            limit_of_enrollment: input.limit_of_enrollment,
            free: input.free,
            offline: input.offline,
            event_status: EventStatus::Draft,
        }
    }

    /// Replace every caller-owned field; `id` and `event_status` are kept
    pub fn apply_update(&mut self, input: EventInput) {
        self.name = input.name;
        self.description = input.description;
        self.begin_enrollment_date_time = input.begin_enrollment_date_time;
        self.close_enrollment_date_time = input.close_enrollment_date_time;
        self.begin_event_date_time = input.begin_event_date_time;
        self.end_event_date_time = input.end_event_date_time;
        self.location = input.location;
        self.base_price = input.base_price;
        self.max_price = input.max_price;
        self.limit_of_enrollment = input.limit_of_enrollment;
        self.free = input.free;
        self.offline = input.offline;
    }
}

/// Convert `validator` failures into field-scoped violations, ordered by field name
fn presence_violations(errors: &validator::ValidationErrors) -> Vec<ValidationError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = camel_case(&field);
            field_errors.iter().map(move |err| {
                let message = err
                    .message
                    .clone()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|| default_message(&err.code));
                let rejected_value = err.params.get("value").map(|value| match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
                ValidationError::field(&field, err.code.as_ref(), message, rejected_value)
            })
        })
        .collect()
}

fn default_message(code: &str) -> String {
    match code {
        "required" => "must not be null".to_string(),
        "length" => "must not be empty".to_string(),
        "range" => "must be greater than or equal to 0".to_string(),
        other => format!("is invalid ({other})"),
    }
}

/// `begin_event_date_time` -> `beginEventDateTime`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
