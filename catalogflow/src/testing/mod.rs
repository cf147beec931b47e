//! Testing utilities for catalogflow.
//!
//! This module provides:
//! - A scripted stub transport
//! - Assertions for result tracks and error kinds
//! - Sample catalog fixtures

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_error_kind, assert_outcome_error_kind, assert_outcome_success, assert_success,
};
pub use fixtures::{sample_page, sample_shows, stub_all_categories};
pub use mocks::{StubFailure, StubTransport};
