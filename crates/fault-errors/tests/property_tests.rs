// Property-based tests for resolution and normalization laws

use fault_errors::capability::ErrorCauses;
use fault_errors::{facet, impl_inspect, AnyError, Fault, FaultBuilder};
use proptest::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("composite")]
struct Composite(Vec<AnyError>);

impl ErrorCauses for Composite {
    fn error_causes(&self) -> Vec<AnyError> {
        self.0.clone()
    }
}

impl_inspect!(Composite: causes);

#[derive(Debug, Error)]
#[error("opaque")]
struct Opaque;

impl_inspect!(Opaque);

/// Exit status of a cause, `None` for a cause without the capability
fn cause_strategy() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![Just(None), (1i32..256).prop_map(Some)]
}

fn build_cause(status: Option<i32>) -> AnyError {
    match status {
        Some(status) => Fault::builder().exit_status(status).msg("cause").into(),
        None => AnyError::new(Opaque),
    }
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["db", "net", "auth", "io", "api"]).prop_map(String::from)
}

proptest! {
    #[test]
    fn test_exit_status_is_max_of_capable_causes(statuses in prop::collection::vec(cause_strategy(), 0..8)) {
        let err = Composite(statuses.iter().copied().map(build_cause).collect());
        let expected = statuses.iter().flatten().copied().fold(1, i32::max);
        prop_assert_eq!(facet::exit_status(Some(&err)), expected);
    }
}

proptest! {
    #[test]
    fn test_record_without_exit_status_takes_max_of_causes(statuses in prop::collection::vec(cause_strategy(), 0..8)) {
        let fault = FaultBuilder::new()
            .causes(statuses.iter().copied().map(build_cause))
            .msg("outer");
        let expected = statuses.iter().flatten().copied().fold(1, i32::max);
        prop_assert_eq!(facet::exit_status(Some(&fault)), expected);
    }
}

proptest! {
    #[test]
    fn test_capability_value_wins_over_causes(
        own in 1i32..256,
        statuses in prop::collection::vec(cause_strategy(), 0..8),
    ) {
        let fault = FaultBuilder::new()
            .exit_status(own)
            .causes(statuses.into_iter().map(build_cause))
            .msg("outer");
        prop_assert_eq!(facet::exit_status(Some(&fault)), own);
    }
}

proptest! {
    #[test]
    fn test_tags_never_duplicate(tags in prop::collection::vec(tag_strategy(), 0..20)) {
        let fault = FaultBuilder::new().tags(tags.clone()).msg("x");
        let extracted = facet::tags(Some(&fault));
        let unique: std::collections::BTreeSet<_> = tags.into_iter().collect();
        prop_assert_eq!(extracted, unique);
    }
}

proptest! {
    #[test]
    fn test_invalid_exit_status_is_noop(status in i32::MIN..=0) {
        let fault = FaultBuilder::new().exit_status(7).exit_status(status).msg("x");
        prop_assert_eq!(fault.exit_status(), 7);
    }
}

proptest! {
    #[test]
    fn test_http_status_outside_error_range_is_noop(status in prop_oneof![0u16..400, 600u16..=u16::MAX]) {
        let fault = FaultBuilder::new().http_status(status).msg("x");
        prop_assert_eq!(fault.http_status(), 500);
    }
}

proptest! {
    #[test]
    fn test_attribute_merge_last_write_wins(first in any::<i64>(), second in any::<i64>()) {
        let fault = FaultBuilder::new()
            .attribute("user_id", first)
            .attributes([("user_id", second)])
            .msg("x");
        prop_assert_eq!(fault.attribute("user_id"), Some(&serde_json::Value::from(second)));
    }
}
