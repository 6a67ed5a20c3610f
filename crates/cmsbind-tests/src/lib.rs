//! # cmsbind-tests
//!
//! Integration testing support for cmsbind.
//!
//! This crate provides:
//! - A counting mock engine for lifecycle properties
//! - Reference pixels computed with the `lcms2` crate
//! - ICC fixture files written into temporary directories
//!
//! ## Test Categories
//!
//! 1. **Lifecycle**: capsule release counts, kind checks, use after release
//! 2. **Format tags**: alias resolution and fallback
//! 3. **Parity**: binding output against `lcms2` for the same engine
//! 4. **Profiles**: file loading, text fields, failure reporting
//! 5. **Host surface**: dynamic calls, argument validation
//! 6. **Compat**: python-lcms behaviour and messages

pub mod fixtures;
pub mod mock;
pub mod reference;

pub use fixtures::Fixtures;
pub use mock::CountingEngine;
