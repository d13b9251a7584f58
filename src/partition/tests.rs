//! Tests for partition module

use super::*;
use serde_json::json;

// ============================================================================
// PartitionValue Tests
// ============================================================================

#[test]
fn test_partition_value_new() {
    let pv = PartitionValue::new("test-id");
    assert_eq!(pv.id, "test-id");
    assert!(pv.values.is_empty());
}

#[test]
fn test_partition_value_with_value() {
    let pv = PartitionValue::new("id1")
        .with_value("key1", "value1")
        .with_value("key2", 42);

    assert_eq!(pv.get("key1"), Some(&json!("value1")));
    assert_eq!(pv.get("key2"), Some(&json!(42)));
}

#[test]
fn test_partition_value_with_string() {
    let pv = PartitionValue::new("id1").with_string("job_id", "4123");

    assert_eq!(pv.get_string("job_id"), Some("4123"));
}

// ============================================================================
// SingleSliceRouter Tests
// ============================================================================

#[test]
fn test_single_slice_router() {
    let router = SingleSliceRouter;
    let partitions = router.partitions().unwrap();

    assert_eq!(partitions.len(), 1);
    assert!(partitions[0].values.is_empty());
    assert_eq!(router.partition_field(), "");
}

// ============================================================================
// ListRouter Tests
// ============================================================================

#[test]
fn test_list_router() {
    let router = ListRouter::new(
        vec!["active".to_string(), "closed".to_string()],
        "status".to_string(),
    );
    let partitions = router.partitions().unwrap();

    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].id, "active");
    assert_eq!(partitions[0].get_string("status"), Some("active"));
    assert_eq!(partitions[1].get_string("status"), Some("closed"));
    assert_eq!(router.partition_field(), "status");
}

#[test]
fn test_list_router_empty() {
    let router = ListRouter::new(vec![], "status");
    let partitions = router.partitions().unwrap();
    assert!(partitions.is_empty());
}

// ============================================================================
// ParentRouter Tests
// ============================================================================

#[test]
fn test_parent_router_basic() {
    let parent_records = vec![
        json!({"id": 4123, "name": "Backend Engineer"}),
        json!({"id": 4124, "name": "Recruiter"}),
    ];
    let router = ParentRouter::new(parent_records, "id", "job_id");

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].id, "4123");
    assert_eq!(partitions[0].get_string("job_id"), Some("4123"));
    assert_eq!(partitions[1].get_string("job_id"), Some("4124"));
    assert_eq!(router.partition_field(), "job_id");
}

#[test]
fn test_parent_router_deduplicates() {
    let parent_records = vec![
        json!({"id": "a"}),
        json!({"id": "b"}),
        json!({"id": "a"}),
        json!({"id": "b"}),
    ];
    let router = ParentRouter::new(parent_records, "id", "parent_id");

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].id, "a");
    assert_eq!(partitions[1].id, "b");
}

#[test]
fn test_parent_router_skips_missing_key() {
    let parent_records = vec![
        json!({"id": 1}),
        json!({"name": "no id here"}),
        json!({"id": 2}),
    ];
    let router = ParentRouter::new(parent_records, "id", "parent_id");

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 2);
}

#[test]
fn test_parent_router_nested_key() {
    let parent_records = vec![json!({"data": {"id": "nested-1"}})];
    let router = ParentRouter::new(parent_records, "data.id", "parent_id");

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 1);
    assert_eq!(partitions[0].id, "nested-1");
}

#[test]
fn test_parent_router_deferred_records() {
    let mut router = ParentRouter::empty("id", "job_id");
    assert!(router.partitions().unwrap().is_empty());

    router.set_records(vec![json!({"id": 7})]);
    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 1);
    assert_eq!(partitions[0].get_string("job_id"), Some("7"));
}

// ============================================================================
// PartitionConfig Tests
// ============================================================================

#[test]
fn test_partition_config_default_is_none() {
    let config = PartitionConfig::default();
    assert!(matches!(config, PartitionConfig::None));
}

#[test]
fn test_partition_config_parent() {
    let config = PartitionConfig::parent("jobs", "id", "job_id");
    if let PartitionConfig::Parent {
        parent_stream,
        parent_key,
        partition_field,
    } = config
    {
        assert_eq!(parent_stream, "jobs");
        assert_eq!(parent_key, "id");
        assert_eq!(partition_field, "job_id");
    } else {
        panic!("Expected Parent");
    }
}

#[test]
fn test_partition_config_list() {
    let config = PartitionConfig::list(vec!["a".to_string()], "region");
    assert!(matches!(config, PartitionConfig::List { .. }));
}
