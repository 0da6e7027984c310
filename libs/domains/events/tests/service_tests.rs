//! Service tests against the in-memory repository.

use chrono::Duration;
use domain_events::{
    EventDto, EventError, EventService, EventStatus, InMemoryEventRepository, WRONG_PRICE,
    WRONG_VALUE,
};
use serde_json::Value;
use test_utils::assertions::assert_some;
use test_utils::{EventDocument, TestDataBuilder, sample_anchor};

fn service() -> EventService<InMemoryEventRepository> {
    EventService::new(InMemoryEventRepository::new())
}

fn dto(body: Value) -> EventDto {
    serde_json::from_value(body).expect("fixture must deserialize")
}

#[tokio::test]
async fn create_derives_flags_and_starts_as_draft() {
    let builder = TestDataBuilder::from_test_name("create_derives_flags_and_starts_as_draft");
    let service = service();

    let event = service
        .create_event(dto(builder.event("paid").build()))
        .await
        .unwrap();

    assert_eq!(event.id, 1);
    assert_eq!(event.name, builder.name("event", "paid"));
    assert!(!event.free);
    assert!(event.offline);
    assert_eq!(event.event_status, EventStatus::Draft);
}

#[tokio::test]
async fn free_online_event() {
    let body = EventDocument::sample()
        .prices(0, 0)
        .location("   ")
        .build();

    let event = service().create_event(dto(body)).await.unwrap();
    assert!(event.free);
    assert!(!event.offline);
}

#[tokio::test]
async fn unlimited_max_price_is_accepted() {
    let body = EventDocument::sample().prices(100, 0).build();

    let event = service().create_event(dto(body)).await.unwrap();
    assert!(!event.free);
}

#[tokio::test]
async fn wrong_input_is_rejected_and_not_stored() {
    let service = service();
    let body = EventDocument::sample()
        .prices(10000, 200)
        .end_event_date_time(sample_anchor() - Duration::days(1))
        .build();

    let err = service.create_event(dto(body)).await.unwrap_err();

    let codes: Vec<_> = err.violations().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec![WRONG_VALUE, WRONG_PRICE]);
    assert_eq!(
        err.violations()[0].rejected_value.as_deref(),
        Some("2020-06-02T10:30:00")
    );
    assert!(service.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_reported_by_name() {
    let body = EventDocument::sample()
        .without("name")
        .without("endEventDateTime")
        .build();

    let err = service().create_event(dto(body)).await.unwrap_err();
    let fields: Vec<_> = err
        .violations()
        .iter()
        .filter_map(|e| e.field.as_deref())
        .collect();
    assert_eq!(fields, vec!["endEventDateTime", "name"]);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let builder = TestDataBuilder::new(3);
    let service = service();
    for suffix in ["a", "b", "c"] {
        service
            .create_event(dto(builder.event(suffix).build()))
            .await
            .unwrap();
    }

    let names: Vec<_> = service
        .list_events()
        .await
        .unwrap()
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();
    assert_eq!(
        names,
        vec![
            (1, builder.name("event", "a")),
            (2, builder.name("event", "b")),
            (3, builder.name("event", "c")),
        ]
    );
}

#[tokio::test]
async fn update_replaces_fields_and_recomputes_flags() {
    let service = service();
    let created = service
        .create_event(dto(EventDocument::sample().build()))
        .await
        .unwrap();

    let body = EventDocument::sample()
        .name("Renamed")
        .prices(0, 0)
        .without("location")
        .build();
    let updated = service.update_event(created.id, dto(body)).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Renamed");
    assert!(updated.free);
    assert!(!updated.offline);
    assert_eq!(updated.event_status, EventStatus::Draft);

    let fetched = service.get_event(created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let err = service()
        .update_event(404, dto(EventDocument::sample().build()))
        .await
        .unwrap_err();
    assert!(matches!(err, EventError::NotFound(404)));
}

#[tokio::test]
async fn update_unknown_id_wins_over_invalid_body() {
    let body = EventDocument::sample().prices(10000, 200).build();
    let err = service().update_event(1, dto(body)).await.unwrap_err();
    assert!(matches!(err, EventError::NotFound(1)));
}

#[tokio::test]
async fn rejected_update_leaves_event_unchanged() {
    let service = service();
    let created = service
        .create_event(dto(EventDocument::sample().build()))
        .await
        .unwrap();

    let body = EventDocument::sample().name("Bad").prices(500, 100).build();
    let err = service.update_event(created.id, dto(body)).await.unwrap_err();
    assert!(matches!(err, EventError::Invalid(_)));

    let fetched = assert_some(
        service.list_events().await.unwrap().into_iter().next(),
        "stored event",
    );
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    assert!(matches!(
        service().get_event(7).await,
        Err(EventError::NotFound(7))
    ));
}
