//! Unit test entry point.
//!
//! Cargo builds this directory as a single test target (see `[[test]]`
//! in Cargo.toml), so each suite lives in its own module file.

mod global_dictionary_tests;
mod translate_tests;
