// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Zedny integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a backend.
//!
//! # Components
//!
//! - [`MockClassifier`] - Mock classifier with scripted outcomes and an optional gate
//! - [`MockTicketFeed`] - Mock ticket feed with scripted poll results

pub mod harness;
pub mod mock_classifier;
pub mod mock_feed;

pub use harness::TestHarness;
pub use mock_classifier::MockClassifier;
pub use mock_feed::MockTicketFeed;
