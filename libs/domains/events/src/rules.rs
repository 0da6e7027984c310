//! Derivation and validation rules for submitted events.
//!
//! [`EventRuleEngine`] owns the two computed flags of an event and the
//! cross-field constraints that the presence contract on
//! [`crate::EventDto`] cannot express:
//!
//! | Rule                 | Scope                   | Code         |
//! |----------------------|-------------------------|--------------|
//! | event window order   | `endEventDateTime`      | `wrongValue` |
//! | price ordering       | whole object            | `wrongPrice` |
//!
//! Every rule is evaluated on every pass so a caller can report all problems
//! in one response. Field-scoped violations come first, then global ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::EventInput;

/// Name reported as `objectName` on every violation
pub const OBJECT_NAME: &str = "eventDto";

/// Code for an inconsistent price range
pub const WRONG_PRICE: &str = "wrongPrice";

/// Code for an event that ends too early
pub const WRONG_VALUE: &str = "wrongValue";

/// Rendering of rejected timestamps; sub-second digits appear only when present
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single rule violation.
///
/// Global violations have no `field`; field-scoped ones name the field and echo
/// the rejected value back.
///
/// ```json
/// {
///   "objectName": "eventDto",
///   "field": "endEventDateTime",
///   "code": "wrongValue",
///   "defaultMessage": "Values for endEventDateTime are wrong",
///   "rejectedValue": "2020-07-02T10:30:00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub object_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub default_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

impl ValidationError {
    /// Violation not attributable to a single field
    pub fn global(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            object_name: OBJECT_NAME.to_string(),
            field: None,
            code: code.into(),
            default_message: message.into(),
            rejected_value: None,
        }
    }

    /// Violation on one named field
    pub fn field(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        rejected_value: Option<String>,
    ) -> Self {
        Self {
            object_name: OBJECT_NAME.to_string(),
            field: Some(field.into()),
            code: code.into(),
            default_message: message.into(),
            rejected_value,
        }
    }

    pub fn is_global(&self) -> bool {
        self.field.is_none()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "{}.{}: {} ({})",
                self.object_name, field, self.default_message, self.code
            ),
            None => write!(
                f,
                "{}: {} ({})",
                self.object_name, self.default_message, self.code
            ),
        }
    }
}

/// Stateless derivation and validation of [`EventInput`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct EventRuleEngine;

impl EventRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute `free` and `offline` from the primary fields
    pub fn derive(&self, mut input: EventInput) -> EventInput {
        input.free = input.base_price == 0 && input.max_price == 0;
        input.offline = input
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty());
        input
    }

    /// Evaluate every rule and collect the violations; empty means acceptable
    pub fn validate(&self, input: &EventInput) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // Field-scoped violations are listed before global ones.
        // Enrollment start is not compared against the event end.
        let end = input.end_event_date_time;
        if end < input.begin_event_date_time || end < input.close_enrollment_date_time {
            errors.push(ValidationError::field(
                "endEventDateTime",
                WRONG_VALUE,
                "Values for endEventDateTime are wrong",
                Some(end.format(DATE_TIME_FORMAT).to_string()),
            ));
        }

        // A zero ceiling means the price is negotiable
        if input.max_price != 0 && input.base_price > input.max_price {
            errors.push(ValidationError::global(
                WRONG_PRICE,
                "Values for Prices are wrong",
            ));
        }

        debug!(violations = errors.len(), "Evaluated event rules");
        errors
    }
}
