//! Shared test utilities for event testing
//!
//! This crate provides reusable test infrastructure for the event crates:
//! - `TestDataBuilder`: Deterministic test data generation
//! - `EventDocument`: JSON event submissions, complete by default
//! - `assertions`: Assertion helpers over serialized violations
//!
//! Documents are plain `serde_json::Value`s so that any crate, including the
//! CLI fixtures, can consume them without depending on the domain types.
//!
//! # Usage
//!
//! ```
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let body = builder
//!     .event("main")
//!     .prices(10000, 200)
//!     .without("location")
//!     .build();
//!
//! assert_eq!(body["basePrice"], 10000);
//! assert!(body.get("location").is_none());
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value, json};

/// Wire format of every event timestamp
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving all values from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).name("event", "main");
    /// assert_eq!(name, "test-event-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A complete, acceptable event named after this builder's seed
    pub fn event(&self, suffix: &str) -> EventDocument {
        EventDocument::sample().name(&self.name("event", suffix))
    }
}

/// Anchor of the sample schedule: 2020-06-03 10:30
pub fn sample_anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 6, 3)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .unwrap_or_default()
}

/// Format a timestamp the way event documents carry it
pub fn format_date_time(at: NaiveDateTime) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

/// JSON event submission under construction
#[derive(Debug, Clone)]
pub struct EventDocument {
    fields: Map<String, Value>,
}

impl EventDocument {
    /// Paid, offline, one-month event that passes every rule
    pub fn sample() -> Self {
        let mut doc = Self { fields: Map::new() };
        doc.fields.insert("name".into(), json!("Spring"));
        doc.fields.insert(
            "description".into(),
            json!("REST API Development with Spring"),
        );
        doc.fields.insert("location".into(), json!("Gangnam station D2 startup factory"));
        doc.fields.insert("basePrice".into(), json!(100));
        doc.fields.insert("maxPrice".into(), json!(200));
        doc.fields.insert("limitOfEnrollment".into(), json!(100));
        doc.schedule(sample_anchor(), Duration::days(30))
    }

    pub fn name(self, name: &str) -> Self {
        self.with("name", json!(name))
    }

    pub fn prices(self, base_price: i64, max_price: i64) -> Self {
        self.with("basePrice", json!(base_price))
            .with("maxPrice", json!(max_price))
    }

    pub fn location(self, location: &str) -> Self {
        self.with("location", json!(location))
    }

    /// Enrollment and the event both open at `start` and close after `length`
    pub fn schedule(self, start: NaiveDateTime, length: Duration) -> Self {
        let end = format_date_time(start + length);
        let start = format_date_time(start);
        self.with("beginEnrollmentDateTime", json!(start))
            .with("closeEnrollmentDateTime", json!(end))
            .with("beginEventDateTime", json!(start))
            .with("endEventDateTime", json!(end))
    }

    pub fn end_event_date_time(self, at: NaiveDateTime) -> Self {
        self.with("endEventDateTime", json!(format_date_time(at)))
    }

    /// Set any property, including ones the event model does not accept
    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn without(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Codes of a serialized violation list, in order
    pub fn violation_codes(errors: &Value) -> Vec<String> {
        errors
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["code"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assert that a serialized violation list contains `code` on `field`
    /// (`None` for an object-level violation)
    pub fn assert_violation(errors: &Value, code: &str, field: Option<&str>) {
        let found = errors.as_array().is_some_and(|errors| {
            errors
                .iter()
                .any(|e| e["code"] == code && e.get("field").and_then(Value::as_str) == field)
        });
        assert!(
            found,
            "expected violation {code} on {field:?}, got {}",
            errors
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.name("event", "test"), builder2.name("event", "test"));
        assert_eq!(builder1.event("a").build(), builder2.event("a").build());
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        // Different test names should generate different data
        assert_ne!(builder1.name("event", "x"), builder2.name("event", "x"));
    }

    #[test]
    fn test_sample_schedule() {
        let body = EventDocument::sample().build();

        assert_eq!(body["beginEventDateTime"], "2020-06-03T10:30:00");
        assert_eq!(body["endEventDateTime"], "2020-07-03T10:30:00");
        assert_eq!(body["closeEnrollmentDateTime"], body["endEventDateTime"]);
    }

    #[test]
    fn test_end_event_override() {
        let body = EventDocument::sample()
            .end_event_date_time(sample_anchor() - Duration::days(1))
            .build();
        assert_eq!(body["endEventDateTime"], "2020-06-02T10:30:00");
    }

    #[test]
    fn test_violation_helpers() {
        let errors = json!([
            { "objectName": "eventDto", "code": "wrongPrice", "defaultMessage": "x" },
            { "objectName": "eventDto", "field": "endEventDateTime", "code": "wrongValue", "defaultMessage": "y" },
        ]);

        assert_eq!(violation_codes(&errors), vec!["wrongPrice", "wrongValue"]);
        assert_violation(&errors, "wrongPrice", None);
        assert_violation(&errors, "wrongValue", Some("endEventDateTime"));
    }

    #[test]
    #[should_panic(expected = "expected violation")]
    fn test_assert_violation_fails_on_wrong_field() {
        let errors = json!([{ "code": "wrongPrice" }]);
        assert_violation(&errors, "wrongPrice", Some("basePrice"));
    }
}
