use std::sync::Arc;

use rstest::rstest;

use modelkit::{CacheService, CacheStatus, ElementId, ModelKitError, Repository};

use crate::helpers::fixtures::*;

fn bound_cache(parallel: bool) -> (CacheService, Arc<crate::helpers::repository::ScriptedRepository>) {
    let repository = vehicle_repository();
    let cache = CacheService::with_parallel_lookup(parallel);
    cache.initialize(repository.clone());
    (cache, repository)
}

#[rstest]
#[case(MAX_SPEED, 1)]
#[case(VEHICLE, 2)]
#[case(ENGINE, 1)]
#[case(WHEEL, 0)]
fn test_tagged_values_per_element(#[case] element: i32, #[case] expected: usize) {
    let (cache, _) = bound_cache(false);
    let tagged_values = cache.tagged_values(ElementId(element)).unwrap();
    assert_eq!(tagged_values.len(), expected);
    assert!(tagged_values.iter().all(|tv| tv.container_id == ElementId(element)));
}

#[rstest]
fn test_tagged_values_for_many(#[values(false, true)] parallel: bool) {
    let (cache, _) = bound_cache(parallel);
    let ids = [ElementId(MAX_SPEED), ElementId(VEHICLE), ElementId(ENGINE)];

    let mut tagged_values: Vec<(i32, String, String)> = cache
        .tagged_values_for(&ids)
        .unwrap()
        .into_iter()
        .map(|tv| (tv.container_id.get(), tv.name, tv.value))
        .collect();
    tagged_values.sort();

    assert_eq!(
        tagged_values,
        vec![
            (MAX_SPEED, "Priority".to_string(), "High".to_string()),
            (VEHICLE, "Color".to_string(), "Red".to_string()),
            (VEHICLE, "Mass".to_string(), "1500".to_string()),
            (ENGINE, "Mass".to_string(), "300".to_string()),
        ]
    );
}

#[test]
fn test_initialize_is_lazy() {
    let (cache, repository) = bound_cache(false);
    assert_eq!(cache.status(), CacheStatus::Dirty);
    assert_eq!(repository.sql_calls(), 0);

    cache.tagged_values(ElementId(VEHICLE)).unwrap();
    assert_eq!(cache.status(), CacheStatus::Clean);
    assert_eq!(repository.tagged_value_queries(), 1);

    cache.tagged_values(ElementId(ENGINE)).unwrap();
    cache.tagged_values_for(&[ElementId(MAX_SPEED)]).unwrap();
    assert_eq!(repository.tagged_value_queries(), 1);
}

#[test]
fn test_invalidate_then_query_sees_edit() {
    let (cache, repository) = bound_cache(false);
    assert_eq!(cache.tagged_values(ElementId(WHEEL)).unwrap().len(), 0);

    repository.edit(|model| {
        model
            .tagged_values
            .push((WHEEL, "Diameter".to_string(), "18in".to_string()));
    });

    // Not yet invalidated: the old index is still served.
    assert_eq!(cache.tagged_values(ElementId(WHEEL)).unwrap().len(), 0);

    cache.initialize(repository.clone());
    let tagged_values = cache.tagged_values(ElementId(WHEEL)).unwrap();
    assert_eq!(tagged_values.len(), 1);
    assert_eq!(tagged_values[0].value, "18in");
    assert_eq!(repository.tagged_value_queries(), 2);
}

#[test]
fn test_query_before_initialize_fails() {
    let cache = CacheService::new();
    let result = cache.tagged_values(ElementId(VEHICLE));
    assert!(matches!(result, Err(ModelKitError::DataSource(_))));
}

#[test]
fn test_associated_connectors_from_both_ends() {
    let (cache, _) = bound_cache(false);

    let vehicle = cache.associated_connectors(ElementId(VEHICLE)).unwrap();
    assert_eq!(vehicle.len(), 3);
    assert!(vehicle.iter().all(|c| c.source_id() == ElementId(VEHICLE)));

    let engine = cache.associated_connectors(ElementId(ENGINE)).unwrap();
    assert_eq!(engine.len(), 1);
    assert_eq!(
        engine[0].connector_kind_full_name(ElementId(ENGINE)).unwrap(),
        "Association With Source block"
    );

    assert!(cache.associated_connectors(ElementId(RANGE)).unwrap().is_empty());
}

#[test]
fn test_associated_connectors_are_memoized() {
    let (cache, repository) = bound_cache(false);

    let first = cache.associated_connectors(ElementId(VEHICLE)).unwrap();
    let resolved = repository.connector_calls();
    assert_eq!(resolved, 3);
    assert_eq!(cache.cached_connector_count(), 3);

    let second = cache.associated_connectors(ElementId(VEHICLE)).unwrap();
    assert_eq!(repository.connector_calls(), resolved);
    assert_eq!(first.len(), second.len());
    assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));

    // The engine's only connector is shared with the vehicle.
    cache.associated_connectors(ElementId(ENGINE)).unwrap();
    assert_eq!(repository.connector_calls(), resolved);
}

#[test]
fn test_new_connector_picked_up_without_invalidation() {
    let (cache, repository) = bound_cache(false);
    assert_eq!(cache.associated_connectors(ElementId(WHEEL)).unwrap().len(), 1);

    repository.edit(|model| {
        model.connectors.push(connector(103, "Dependency", ENGINE, WHEEL));
    });

    let wheel = cache.associated_connectors(ElementId(WHEEL)).unwrap();
    assert_eq!(wheel.len(), 2);
    assert_eq!(repository.connector_calls(), 2);
}

#[test]
fn test_invalidation_drops_cached_connectors() {
    let (cache, repository) = bound_cache(false);
    cache.associated_connectors(ElementId(VEHICLE)).unwrap();
    assert_eq!(cache.cached_connector_count(), 3);

    cache.initialize(repository.clone());
    cache.associated_connectors(ElementId(VEHICLE)).unwrap();
    assert_eq!(repository.connector_calls(), 6);
}

#[test]
fn test_connector_with_missing_endpoint_fails() {
    let (cache, repository) = bound_cache(false);
    repository.edit(|model| {
        model.connectors.push(connector(104, "Dependency", WHEEL, 999));
    });

    let result = cache.associated_connectors(ElementId(WHEEL));
    assert!(matches!(result, Err(ModelKitError::DataSource(_))));
}

#[test]
fn test_failed_rebuild_stays_dirty_and_retries() {
    let (cache, repository) = bound_cache(false);
    assert_eq!(cache.tagged_values(ElementId(VEHICLE)).unwrap().len(), 2);

    cache.initialize(repository.clone());
    repository.set_failing(true);

    let result = cache.tagged_values(ElementId(VEHICLE));
    assert!(matches!(result, Err(ModelKitError::DataSource(_))));
    assert_eq!(cache.status(), CacheStatus::Dirty);

    repository.set_failing(false);
    assert_eq!(cache.tagged_values(ElementId(VEHICLE)).unwrap().len(), 2);
    assert_eq!(cache.status(), CacheStatus::Clean);
}

#[test]
fn test_rebind_to_other_repository() {
    let (cache, _) = bound_cache(false);
    assert_eq!(cache.tagged_values(ElementId(VEHICLE)).unwrap().len(), 2);

    let other = Arc::new(crate::helpers::repository::ScriptedRepository::new(
        vehicle_model().tagged_value(VEHICLE, "Owner", "ACME"),
    ));
    cache.initialize(other.clone() as Arc<dyn Repository>);

    assert_eq!(cache.tagged_values(ElementId(VEHICLE)).unwrap().len(), 3);
    assert_eq!(other.tagged_value_queries(), 1);
}

#[test]
fn test_concurrent_readers_rebuild_once() {
    let (cache, repository) = bound_cache(true);

    std::thread::scope(|scope| {
        for element in [MAX_SPEED, VEHICLE, ENGINE, WHEEL] {
            let cache = &cache;
            scope.spawn(move || cache.tagged_values(ElementId(element)).unwrap());
        }
    });

    assert_eq!(repository.tagged_value_queries(), 1);
    assert_eq!(cache.status(), CacheStatus::Clean);
}
