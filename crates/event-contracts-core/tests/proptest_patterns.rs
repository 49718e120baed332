//! Randomized checks of descriptor pattern invariants.
// crates/event-contracts-core/tests/proptest_patterns.rs
// ============================================================================
// Module: Pattern Derivation Property-Based Tests
// Description: Randomized checks of descriptor pattern invariants.
// Purpose: Ensure derived patterns mirror inputs for arbitrary sources and types.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use event_contracts_core::ContractDescriptor;
use event_contracts_core::ContractRegistry;
use event_contracts_core::ContractsManifest;
use event_contracts_core::PayloadSchema;
use proptest::prelude::*;

fn descriptor(sources: &[String], event_type: &str) -> ContractDescriptor {
    ContractDescriptor::new("contract", sources.to_vec(), event_type, PayloadSchema::Absent)
}

proptest! {
    #[test]
    fn sources_are_mirrored_in_both_patterns(
        sources in prop::collection::vec(".{0,24}", 1 .. 8),
        event_type in ".{0,32}",
    ) {
        let descriptor = descriptor(&sources, &event_type);
        prop_assert_eq!(descriptor.sources(), &sources[..]);
        prop_assert_eq!(&descriptor.native_pattern().source, &sources);
        prop_assert_eq!(descriptor.pattern().source.as_ref(), Some(&sources));
    }

    #[test]
    fn detail_type_is_single_event_type(
        sources in prop::collection::vec("[a-z.-]{1,16}", 0 .. 4),
        event_type in ".{0,32}",
    ) {
        let descriptor = descriptor(&sources, &event_type);
        prop_assert_eq!(&descriptor.native_pattern().detail_type, &vec![event_type.clone()]);
        prop_assert_eq!(descriptor.pattern().detail_type.as_ref(), Some(&vec![event_type]));
    }

    #[test]
    fn native_pattern_matches_every_declared_source(
        sources in prop::collection::vec("[a-z.-]{1,16}", 1 .. 6),
        event_type in "[A-Za-z]{1,16}",
    ) {
        let descriptor = descriptor(&sources, &event_type);
        for source in &sources {
            prop_assert!(descriptor.native_pattern().matches(source, &event_type));
            prop_assert!(descriptor.pattern().matches(source, &event_type));
        }
    }

    #[test]
    fn manifest_digest_is_deterministic(
        sources in prop::collection::vec("[a-z.-]{1,16}", 0 .. 4),
        event_type in "[A-Za-z]{1,16}",
        commit in "[0-9a-f]{40}",
    ) {
        let build = || {
            let registry = ContractRegistry::from_descriptors([descriptor(&sources, &event_type)])
                .unwrap();
            ContractsManifest::new(&registry, commit.clone()).render().unwrap()
        };
        prop_assert_eq!(build(), build());
    }
}
