//! Test assertions for results.

use std::fmt::Debug;

use crate::outcome::{DomainResult, Outcome};

/// Asserts that the result is on the success track.
pub fn assert_success<T: Debug>(result: &DomainResult<T>) {
    assert!(
        result.is_success(),
        "Expected success, got: {:?}",
        result
    );
}

/// Asserts that the result failed with the given error kind name.
pub fn assert_error_kind<T: Debug>(result: &DomainResult<T>, expected: &str) {
    let actual = result.error().map(crate::errors::ErrorKind::kind_name);
    assert_eq!(
        actual,
        Some(expected),
        "Expected {} error, got: {:?}",
        expected,
        result
    );
}

/// Asserts that the outcome is on the success track.
pub fn assert_outcome_success<T: Debug>(outcome: &Outcome<T>) {
    assert!(
        outcome.is_success(),
        "Expected success, got: {:?}",
        outcome
    );
}

/// Asserts that the outcome failed with the given error kind name.
pub fn assert_outcome_error_kind<T: Debug>(outcome: &Outcome<T>, expected: &str) {
    let actual = outcome.error().map(crate::errors::ErrorKind::kind_name);
    assert_eq!(
        actual,
        Some(expected),
        "Expected {} error, got: {:?}",
        expected,
        outcome
    );
}
