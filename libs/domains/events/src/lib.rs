//! Events Domain
//!
//! Accepts event submissions, derives their computed flags, and enforces the
//! cross-field rules that a plain presence check cannot express.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Event Submission                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  EventDto ──► presence contract (validator)                   │
//! │                    │                                          │
//! │                    ▼                                          │
//! │               EventInput ──► EventRuleEngine::derive          │
//! │                                   │   (free, offline)         │
//! │                                   ▼                           │
//! │                          EventRuleEngine::validate            │
//! │                            │                  │               │
//! │                     violations           no violations        │
//! │                            │                  │               │
//! │                            ▼                  ▼               │
//! │               EventError::Invalid     EventRepository         │
//! │                                                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use domain_events::{EventDto, EventService, InMemoryEventRepository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = EventService::new(InMemoryEventRepository::new());
//!
//! let dto: EventDto = serde_json::from_value(serde_json::json!({
//!     "name": "Spring",
//!     "description": "REST API Development with Spring",
//!     "beginEnrollmentDateTime": "2020-06-03T10:30:00",
//!     "closeEnrollmentDateTime": "2020-07-03T10:30:00",
//!     "beginEventDateTime": "2020-06-03T10:30:00",
//!     "endEventDateTime": "2020-07-03T10:30:00",
//!     "basePrice": 0,
//!     "maxPrice": 0,
//! }))
//! .unwrap();
//!
//! let event = service.create_event(dto).await.unwrap();
//! assert!(event.free);
//! assert!(!event.offline);
//! # }
//! ```

mod error;
mod models;
mod repository;
mod rules;
mod service;

pub use error::{EventError, EventResult};
pub use models::{Event, EventDto, EventInput, EventStatus};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use rules::{EventRuleEngine, OBJECT_NAME, ValidationError, WRONG_PRICE, WRONG_VALUE};
pub use service::EventService;

