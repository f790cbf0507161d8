// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the lifecycle service and its external collaborators.

pub mod registry;

pub use registry::HostRegistry;
