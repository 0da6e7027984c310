//! Reading event documents and running them through the event service

use domain_events::{Event, EventDto, EventError, EventRepository, EventService, ValidationError};
use eyre::{Result, WrapErr};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// Source name used for standard input
pub const STDIN: &str = "-";

/// Verdict for one submitted document
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Accepted {
        source: String,
        event: Event,
    },
    Rejected {
        source: String,
        errors: Vec<ValidationError>,
    },
    /// The document is not an event object at all
    Malformed { source: String, message: String },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// Read a whole input; `-` is standard input
pub fn read_source(source: &str) -> Result<String> {
    if source == STDIN {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("Failed to read standard input")?;
        return Ok(buf);
    }

    std::fs::read_to_string(Path::new(source))
        .wrap_err_with(|| format!("Failed to read {source}"))
}

/// Split one input into labelled documents.
///
/// A top-level array yields one document per element (`file[0]`, `file[1]`, ...);
/// anything else is a single document. Text that is not JSON at all becomes one
/// `Err` entry.
pub fn split_documents(source: &str, text: &str) -> Vec<(String, Result<Value, String>)> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (format!("{source}[{i}]"), Ok(item)))
            .collect(),
        Ok(value) => vec![(source.to_string(), Ok(value))],
        Err(e) => vec![(source.to_string(), Err(e.to_string()))],
    }
}

/// Runs documents through an [`EventService`]
pub struct Checker<R: EventRepository> {
    service: EventService<R>,
}

impl<R: EventRepository> Checker<R> {
    pub fn new(service: EventService<R>) -> Self {
        Self { service }
    }

    #[instrument(skip(self, document))]
    pub async fn check(&self, source: String, document: Result<Value, String>) -> Result<Outcome> {
        let dto = match document.and_then(|v| serde_json::from_value::<EventDto>(v).map_err(|e| e.to_string())) {
            Ok(dto) => dto,
            Err(message) => {
                debug!(%message, "Malformed document");
                return Ok(Outcome::Malformed { source, message });
            }
        };

        match self.service.create_event(dto).await {
            Ok(event) => Ok(Outcome::Accepted { source, event }),
            Err(EventError::Invalid(errors)) => Ok(Outcome::Rejected { source, errors }),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to store {source}")),
        }
    }
}
