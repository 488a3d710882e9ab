//! Crate-level tests for argument building and executable assembly.

mod support;
mod unit;
