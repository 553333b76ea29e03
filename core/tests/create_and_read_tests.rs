// tests/create_and_read_tests.rs
mod common;

use clayjar::{ErrorKind, JarEventKind, JarService, ServiceError, ValidationError};
use common::*;
use std::collections::HashSet;
use std::sync::Arc;

fn service() -> (JarService, Arc<RecordingStore>, Arc<RecordingPublisher>) {
  setup_tracing();
  let store = Arc::new(RecordingStore::new());
  let publisher = Arc::new(RecordingPublisher::new());
  let service = JarService::new(store.clone(), publisher.clone());
  (service, store, publisher)
}

#[tokio::test]
async fn create_assigns_identity_and_echoes_fields() {
  let (service, _store, _publisher) = service();
  let req = amber_crock();

  let jar = service.create_jar(req.clone()).await.unwrap();

  assert!(jar.id.is_some());
  assert!(!jar.id_string().is_empty());
  assert_eq!(jar.created_at, jar.updated_at);
  assert_eq!(jar.name, req.name);
  assert_eq!(jar.description, req.description);
  assert_eq!(jar.category, req.category);
  assert_eq!(jar.price, req.price);
  assert_eq!(jar.stock_qty, req.stock_qty);
  assert_eq!(jar.image_url, req.image_url);
  assert_eq!(jar.attributes, req.attributes);
}

#[tokio::test]
async fn created_ids_are_unique() {
  let (service, store, _publisher) = service();
  let mut ids = HashSet::new();
  for _ in 0..20 {
    ids.insert(service.create_jar(amber_crock()).await.unwrap().id.unwrap());
  }
  assert_eq!(ids.len(), 20);
  assert_eq!(store.len(), 20);
}

#[tokio::test]
async fn amber_crock_scenario_publishes_created_event() {
  let (service, _store, publisher) = service();

  let jar = service.create_jar(amber_crock()).await.unwrap();

  let events = publisher.events();
  assert_eq!(events.len(), 1);
  let event = &events[0];
  assert_eq!(event.kind, JarEventKind::Created);
  assert_eq!(event.jar_id, jar.id_string());
  assert_eq!(event.timestamp, jar.created_at);
  let payload = event.payload.as_ref().unwrap();
  assert_eq!(payload, &jar);
  assert_eq!(payload.attributes.clay_type, "stoneware");
  assert_eq!(payload.attributes.production_type, "wheel-thrown");
  assert!(payload.attributes.food_safe && payload.attributes.microwave_safe);
  assert!(!payload.attributes.dishwasher_safe);
}

#[tokio::test]
async fn empty_name_is_rejected_without_side_effects() {
  let (service, store, publisher) = service();
  let req = request_with(|r| {
    r.name.clear();
    r.price = 10.0;
    r.stock_qty = 1;
  });

  let err = service.create_jar(req).await.unwrap_err();

  assert!(matches!(err, ServiceError::Validation(ValidationError::NameMissing)));
  assert_eq!(ValidationError::NameMissing.to_string(), "Name attribute is mandatory");
  assert!(store.calls().is_empty());
  assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn every_bound_violation_is_a_validation_error_and_touches_nothing() {
  let (service, store, publisher) = service();
  let invalid = vec![
    request_with(|r| r.name.clear()),
    request_with(|r| r.name = "x".repeat(201)),
    request_with(|r| r.price = 0.0),
    request_with(|r| r.price = 0.009),
    request_with(|r| r.price = 10_000.5),
    request_with(|r| r.stock_qty = -1),
    request_with(|r| r.stock_qty = 100_001),
  ];

  for req in invalid {
    let err = service.create_jar(req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation, "got {err}");
  }
  assert!(store.mutations().is_empty());
  assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn name_rule_is_reported_before_price_rule() {
  let (service, _store, _publisher) = service();
  let req = request_with(|r| {
    r.name.clear();
    r.price = 0.0;
  });

  let err = service.create_jar(req).await.unwrap_err();
  assert!(matches!(err, ServiceError::Validation(ValidationError::NameMissing)));
}

#[tokio::test]
async fn store_failure_aborts_before_publishing() {
  let (service, store, publisher) = service();
  store.fail_with_backend_error();

  let err = service.create_jar(amber_crock()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Persistence);
  assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn publish_failure_after_create_leaves_record_stored() {
  let (service, store, publisher) = service();
  publisher.fail_deliveries();

  let err = service.create_jar(amber_crock()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Publish);
  let ServiceError::Publish { event_type, jar_id, .. } = err else {
    panic!("expected a publish error");
  };
  assert_eq!(event_type, "jar.created");
  assert_eq!(store.len(), 1);

  let stored = service.get_jar(&jar_id).await.unwrap();
  assert_eq!(stored.name, "Amber Crock");
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
  let (service, _store, _publisher) = service();

  let missing = uuid::Uuid::new_v4().to_string();
  let err = service.get_jar(&missing).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);

  let err = service.get_jar("not-a-uuid").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn get_during_store_outage_is_persistence_failure() {
  let (service, store, _publisher) = service();
  let jar = service.create_jar(amber_crock()).await.unwrap();
  store.fail_with_backend_error();

  let err = service.get_jar(&jar.id_string()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[tokio::test]
async fn list_clamps_paging_before_reaching_the_store() {
  let (service, store, _publisher) = service();

  service.list_jars(0, 0).await.unwrap();
  service.list_jars(500, 0).await.unwrap();
  service.list_jars(20, -5).await.unwrap();

  let scans: Vec<StoreCall> = store
    .calls()
    .into_iter()
    .filter(|c| matches!(c, StoreCall::FindAll { .. }))
    .collect();
  assert_eq!(
    scans,
    vec![
      StoreCall::FindAll { limit: 10, offset: 0 },
      StoreCall::FindAll { limit: 100, offset: 0 },
      StoreCall::FindAll { limit: 20, offset: 0 },
    ]
  );
}

#[tokio::test]
async fn list_returns_newest_first_and_empty_when_past_the_end() {
  let (service, _store, _publisher) = service();
  for name in ["first", "second", "third"] {
    service.create_jar(request_with(|r| r.name = name.into())).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  }

  let jars = service.list_jars(10, 0).await.unwrap();
  let names: Vec<&str> = jars.iter().map(|j| j.name.as_str()).collect();
  assert_eq!(names, vec!["third", "second", "first"]);

  let page = service.list_jars(1, 1).await.unwrap();
  assert_eq!(page.len(), 1);
  assert_eq!(page[0].name, "second");

  assert!(service.list_jars(10, 50).await.unwrap().is_empty());
}
