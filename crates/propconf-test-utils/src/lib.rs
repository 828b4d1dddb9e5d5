//! Shared test utilities for the propconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixture`] — [`fixture::TestDir`] for properties-file scenarios
//! - [`resources`] — locations of the checked-in sample resources

pub mod fixture;
pub mod resources;
