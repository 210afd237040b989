//! Integration test for a resource instance's full lifecycle.
//!
//! Walks one resource kind through composition, validation, create, read
//! and update, using only the public library API.

use serde_json::json;

use token_fields::catalog::TokenField;
use token_fields::policy::ConflictPolicy;
use token_fields::projection::{project, project_for_create, project_for_update, RemoteResponse};
use token_fields::schema::{compose, FieldSchema, FieldSet};
use token_fields::state::{LocalConfig, ResourceState};
use token_fields::validate::validate;
use token_fields::value::{FieldValue, ValueType};

fn role_fields() -> FieldSet {
    let mut fields = FieldSet::new();
    fields.insert(
        "role_name".to_string(),
        FieldSchema::required(ValueType::String, "Name of the role"),
    );
    fields.insert(
        "policies".to_string(),
        FieldSchema::optional(ValueType::StringSet, "Deprecated, use token_policies"),
    );
    fields
}

fn role_policy() -> ConflictPolicy {
    ConflictPolicy::builder()
        .conflicts(TokenField::Policies, ["policies"])
        .token_type_default("service")
        .build()
        .expect("valid policy")
}

fn as_object(value: serde_json::Value) -> RemoteResponse {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_resource_lifecycle() {
    let policy = role_policy();
    let fields = compose(&role_fields(), &policy).expect("composition succeeds");

    // Create
    let mut state = ResourceState::new().with_defaults(&fields);
    state.set("role_name", FieldValue::String("app".to_string()));
    state.set("token_policies", FieldValue::string_set(["admin"]));
    state.set("token_ttl", FieldValue::Int(3600));
    validate(&fields, &state, state.present_names()).expect("valid configuration");

    let create = project_for_create(&state, &policy);
    let create_keys: Vec<&str> = create.keys().map(String::as_str).collect();
    assert_eq!(
        create_keys,
        vec![
            "token_no_default_policy",
            "token_policies",
            "token_ttl",
            "token_type"
        ]
    );
    assert_eq!(create["token_type"], FieldValue::String("service".to_string()));
    state.mark_synced(&create);

    // Read back what the remote system stored
    let response = as_object(json!({
        "role_name": "app",
        "token_policies": ["admin"],
        "token_ttl": 3600,
        "token_max_ttl": 0,
        "token_no_default_policy": false,
        "token_type": "service",
    }));
    let read = project(Some(&response)).expect("response present");
    assert_eq!(read["token_period"], serde_json::Value::Null);
    state.apply_read(&read).expect("remote values have catalog types");
    assert_eq!(state.synced.get("token_max_ttl"), Some(&FieldValue::Int(0)));

    // The remote side echoed the create, with zero values for the rest
    assert!(!state.has_change("token_max_ttl"));
    assert!(project_for_update(&state, &policy).is_empty());

    // Update
    state.set("token_max_ttl", FieldValue::Int(7200));
    let update = project_for_update(&state, &policy);
    assert_eq!(update.len(), 1);
    assert_eq!(update["token_max_ttl"], FieldValue::Int(7200));
    state.mark_synced(&update);
    assert!(project_for_update(&state, &policy).is_empty());

    // Switching to the legacy field suppresses token_policies
    state.unset("token_policies");
    state.set("policies", FieldValue::string_set(["legacy"]));
    validate(&fields, &state, state.present_names()).expect("still valid");
    let update = project_for_update(&state, &policy);
    assert!(!update.contains_key("token_policies"));
}

#[test]
fn test_conflicting_configuration_is_rejected_before_projection() {
    let policy = role_policy();
    let fields = compose(&role_fields(), &policy).unwrap();

    let mut state = ResourceState::new().with_defaults(&fields);
    state.set("role_name", FieldValue::String("app".to_string()));
    state.set("policies", FieldValue::string_set(["legacy"]));
    state.set("token_policies", FieldValue::string_set(["admin"]));

    let err = validate(&fields, &state, state.present_names()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"token_policies\": conflicts with policies"
    );
}

#[test]
fn test_deleted_resource_read() {
    assert!(project(None).is_err());
}
