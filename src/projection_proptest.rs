//! Property-based tests for write and read projection.
//!
//! These tests use proptest to generate random conflict policies and local
//! configurations and verify that the projection invariants hold for all of
//! them.

#[cfg(test)]
mod proptest_tests {
    use crate::catalog::TokenField;
    use crate::policy::ConflictPolicy;
    use crate::projection::{
        project, project_all, project_for_create, project_for_update, RemoteResponse,
    };
    use crate::state::{LocalConfig, ResourceState};
    use crate::value::{FieldValue, ValueType};
    use proptest::prelude::*;

    const PARTNERS: [&str; 5] = ["lease_duration", "ttl", "max_ttl", "policies", "period"];

    fn value_for(value_type: ValueType) -> BoxedStrategy<FieldValue> {
        match value_type {
            ValueType::Bool => any::<bool>().prop_map(FieldValue::Bool).boxed(),
            ValueType::Int => (0i64..100_000).prop_map(FieldValue::Int).boxed(),
            ValueType::String => "[a-z]{0,8}".prop_map(FieldValue::String).boxed(),
            ValueType::StringSet => prop::collection::btree_set("[a-z]{1,6}", 0..4)
                .prop_map(FieldValue::StringSet)
                .boxed(),
        }
    }

    fn token_values() -> impl Strategy<Value = Vec<Option<FieldValue>>> {
        TokenField::ALL
            .iter()
            .map(|field| prop::option::of(value_for(field.value_type())))
            .collect::<Vec<_>>()
    }

    fn policy() -> impl Strategy<Value = ConflictPolicy> {
        let conflictable: Vec<TokenField> = TokenField::ALL
            .into_iter()
            .filter(|f| f.accepts_conflicts())
            .collect();
        prop::collection::vec(
            prop::sample::subsequence(PARTNERS.to_vec(), 0..=2),
            conflictable.len(),
        )
        .prop_map(move |sets| {
            let mut builder = ConflictPolicy::builder();
            for (field, partners) in conflictable.iter().zip(sets) {
                if !partners.is_empty() {
                    builder = builder.conflicts(*field, partners);
                }
            }
            builder.build().unwrap()
        })
    }

    fn state() -> impl Strategy<Value = ResourceState> {
        (
            token_values(),
            token_values(),
            prop::sample::subsequence(PARTNERS.to_vec(), 0..=PARTNERS.len()),
        )
            .prop_map(|(desired, synced, partners)| {
                let mut state = ResourceState::new();
                for (field, value) in TokenField::ALL.iter().zip(desired) {
                    if let Some(value) = value {
                        state.set(field.name(), value);
                    }
                }
                for (field, value) in TokenField::ALL.iter().zip(synced) {
                    if let Some(value) = value {
                        state.synced.insert(field.name().to_string(), value);
                    }
                }
                for partner in partners {
                    state.set(partner, FieldValue::Int(1));
                }
                state
            })
    }

    fn has_present_partner(
        state: &ResourceState,
        policy: &ConflictPolicy,
        field: TokenField,
    ) -> bool {
        policy
            .conflicts_for(field)
            .iter()
            .any(|partner| state.is_present(partner))
    }

    // ============================================================================
    // Write projection
    // ============================================================================

    proptest! {
        /// Property: an attribute with a present partner is never projected
        #[test]
        fn conflicted_attributes_are_never_projected(state in state(), policy in policy()) {
            let bags = [
                project_for_create(&state, &policy),
                project_for_update(&state, &policy),
                project_all(&state, &policy),
            ];
            for field in TokenField::ALL {
                if has_present_partner(&state, &policy, field) {
                    for bag in &bags {
                        prop_assert!(
                            !bag.contains_key(field.name()),
                            "{} projected although a partner is present",
                            field
                        );
                    }
                }
            }
        }

        /// Property: an attribute without conflicts is projected whenever it was supplied (create)
        /// or has changed (update)
        #[test]
        fn unconflicted_attributes_are_projected(state in state()) {
            let policy = ConflictPolicy::empty();
            let create = project_for_create(&state, &policy);
            let update = project_for_update(&state, &policy);
            for field in TokenField::ALL {
                if let Some(value) = state.get_if_present(field.name()) {
                    prop_assert_eq!(create.get(field.name()), Some(&value));
                }
                prop_assert_eq!(
                    update.contains_key(field.name()),
                    state.has_change(field.name())
                );
            }
        }

        /// Property: the create payload always carries token_no_default_policy
        #[test]
        fn create_always_includes_no_default_policy(state in state(), policy in policy()) {
            let bag = project_for_create(&state, &policy);
            let expected = state
                .get_if_present("token_no_default_policy")
                .unwrap_or(FieldValue::Bool(false));
            prop_assert_eq!(bag.get("token_no_default_policy"), Some(&expected));
        }

        /// Property: nothing changed since the last sync means an empty update
        #[test]
        fn update_after_sync_is_empty(mut state in state(), policy in policy()) {
            let sent = project_for_create(&state, &policy);
            state.mark_synced(&sent);
            prop_assert!(project_for_update(&state, &policy).is_empty());
        }

        /// Property: reading back what create stored leaves nothing to update
        #[test]
        fn update_after_echoed_read_is_empty(mut state in state(), policy in policy()) {
            let sent = project_for_create(&state, &policy);
            state.mark_synced(&sent);

            let mut response = RemoteResponse::new();
            for field in TokenField::ALL {
                let stored = state
                    .synced
                    .get(field.name())
                    .cloned()
                    .unwrap_or_else(|| FieldValue::zero(field.value_type()));
                response.insert(field.name().to_string(), serde_json::to_value(stored).unwrap());
            }
            state.apply_read(&project(Some(&response)).unwrap()).unwrap();

            let update = project_for_update(&state, &policy);
            prop_assert!(update.is_empty(), "unexpected update {:?}", update.keys());
        }

        /// Property: payloads only ever contain shared attribute names
        #[test]
        fn payloads_only_contain_catalog_names(state in state(), policy in policy()) {
            for key in project_all(&state, &policy).keys() {
                prop_assert!(TokenField::from_name(key).is_some(), "unexpected key {}", key);
            }
        }
    }

    // ============================================================================
    // Read projection
    // ============================================================================

    proptest! {
        /// Property: a response carrying all nine keys is copied unmodified
        #[test]
        fn read_copies_concrete_values(values in TokenField::ALL
            .iter()
            .map(|field| value_for(field.value_type()))
            .collect::<Vec<_>>())
        {
            let mut response = RemoteResponse::new();
            for (field, value) in TokenField::ALL.iter().zip(&values) {
                response.insert(field.name().to_string(), serde_json::to_value(value).unwrap());
            }
            response.insert("unrelated".to_string(), serde_json::json!("ignored"));

            let bag = project(Some(&response)).unwrap();
            prop_assert_eq!(bag.len(), 9);
            for field in TokenField::ALL {
                prop_assert_eq!(bag.get(field.name()), response.get(field.name()));
            }

            let mut state = ResourceState::new();
            state.apply_read(&bag).unwrap();
            for (field, value) in TokenField::ALL.iter().zip(values) {
                prop_assert_eq!(state.synced.get(field.name()), Some(&value));
            }
        }
    }
}
