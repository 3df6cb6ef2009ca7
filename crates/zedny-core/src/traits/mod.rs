// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the backend collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod classifier;
pub mod ticket_feed;

pub use adapter::PluginAdapter;
pub use classifier::ClassifierAdapter;
pub use ticket_feed::TicketFeedAdapter;
