// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Bazaar lifecycle tests.
//!
//! Provides a scriptable in-memory [`MockRegistry`] standing in for the host
//! runtime's plugin registry, and a zip fixture builder for install tests.

pub mod fixture;
pub mod mock_registry;

pub use fixture::{write_zip, zip_bytes};
pub use mock_registry::MockRegistry;
