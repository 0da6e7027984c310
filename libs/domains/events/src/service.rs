use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventDto, EventInput};
use crate::repository::EventRepository;
use crate::rules::EventRuleEngine;

/// Service layer for event creation and updates
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    engine: EventRuleEngine,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            engine: EventRuleEngine::new(),
        }
    }

    /// Validate, derive and store a new draft event
    #[instrument(skip(self, dto), fields(event_name = dto.name.as_deref().unwrap_or_default()))]
    pub async fn create_event(&self, dto: EventDto) -> EventResult<Event> {
        let input = self.accept(dto)?;
        self.repository.create(input).await
    }

    /// Get an event by id
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: i32) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// List all events ordered by id
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.list().await
    }

    /// Replace an existing event.
    ///
    /// A missing id is reported before any validation problem.
    #[instrument(skip(self, dto))]
    pub async fn update_event(&self, id: i32, dto: EventDto) -> EventResult<Event> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(EventError::NotFound(id));
        }

        let input = self.accept(dto)?;
        self.repository.update(id, input).await
    }

    /// Presence contract, then derivation and the rule engine
    fn accept(&self, dto: EventDto) -> EventResult<EventInput> {
        let input = dto.into_input().map_err(|errors| {
            info!(violations = errors.len(), "Event rejected: required fields");
            EventError::Invalid(errors)
        })?;

        let input = self.engine.derive(input);
        let errors = self.engine.validate(&input);
        if !errors.is_empty() {
            info!(violations = errors.len(), "Event rejected: domain rules");
            return Err(EventError::Invalid(errors));
        }

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEventRepository;
    use crate::rules::{WRONG_PRICE, WRONG_VALUE};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, month, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn dto() -> EventDto {
        EventDto {
            name: Some("Spring".to_string()),
            description: Some("REST API Development with Spring".to_string()),
            begin_enrollment_date_time: Some(at(6, 3)),
            close_enrollment_date_time: Some(at(7, 3)),
            begin_event_date_time: Some(at(6, 3)),
            end_event_date_time: Some(at(7, 3)),
            location: Some("Gangnam station".to_string()),
            base_price: 100,
            max_price: 200,
            limit_of_enrollment: 100,
        }
    }

    #[tokio::test]
    async fn test_create_stores_derived_input() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| !input.free && input.offline)
            .times(1)
            .returning(|input| Ok(Event::new(1, input)));

        let service = EventService::new(mock_repo);
        let event = service.create_event(dto()).await.unwrap();

        assert_eq!(event.id, 1);
        assert!(!event.free);
        assert!(event.offline);
    }

    #[tokio::test]
    async fn test_create_rejects_without_touching_repository() {
        // No expectations: any repository call fails the test
        let service = EventService::new(MockEventRepository::new());

        let mut bad = dto();
        bad.base_price = 10000;
        bad.end_event_date_time = Some(at(7, 2));

        let err = service.create_event(bad).await.unwrap_err();
        let codes: Vec<_> = err.violations().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![WRONG_VALUE, WRONG_PRICE]);
    }

    #[tokio::test]
    async fn test_create_reports_missing_fields() {
        let service = EventService::new(MockEventRepository::new());

        let err = service.create_event(EventDto::default()).await.unwrap_err();
        assert!(matches!(err, EventError::Invalid(_)));
        assert!(err.violations().iter().all(|e| e.code == "required"));
    }

    #[tokio::test]
    async fn test_update_missing_wins_over_invalid_input() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(5))
            .returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service.update_event(5, EventDto::default()).await.unwrap_err();

        assert!(matches!(err, EventError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_update_existing_with_invalid_input() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(Event::new(id, dto().into_input().unwrap()))));

        let service = EventService::new(mock_repo);
        let mut bad = dto();
        bad.max_price = 50;

        let err = service.update_event(3, bad).await.unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.violations()[0].is_global());
    }

    #[tokio::test]
    async fn test_update_recomputes_flags() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(Event::new(id, dto().into_input().unwrap()))));
        mock_repo
            .expect_update()
            .withf(|id, input| *id == 3 && input.free && !input.offline)
            .returning(|id, input| Ok(Event::new(id, input)));

        let service = EventService::new(mock_repo);
        let mut free_online = dto();
        free_online.base_price = 0;
        free_online.max_price = 0;
        free_online.location = Some("   ".to_string());

        let event = service.update_event(3, free_online).await.unwrap();
        assert!(event.free);
        assert!(!event.offline);
    }

    #[tokio::test]
    async fn test_get_missing_event() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        assert!(matches!(
            service.get_event(1).await,
            Err(EventError::NotFound(1))
        ));
    }
}
