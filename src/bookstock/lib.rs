//! # Bookstock Architecture
//!
//! Bookstock is a small book-inventory tracker: one JSON document on disk,
//! edited from a browser front end through a tiny HTTP API. The interesting
//! part is the **extensible-schema record store**: every record carries a
//! fixed set of fields plus an administrator-declared set of tracking
//! columns that grows and shrinks over the life of the dataset.
//!
//! ## Layers
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (server.rs, wired by main.rs)                  │
//! │  - Routing, CORS, static assets, JSON envelopes            │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                        │
//! │  - Thin facade, generic over the storage backend           │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                             │
//! │  - The three merge policies: replace, row save, import     │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                    │
//! │  - DataStore trait, FileStore / InMemoryStore              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Consistency Model
//!
//! Saves rewrite the whole document; there is no per-record durability and
//! no cross-request state. Every read and write path re-runs
//! [`model::Dataset::reconcile`] so a record's dynamic columns always match
//! the dataset's declaration, no matter how stale the stored record is.
//!
//! ## Module Overview
//!
//! - [`api`]: entry point for all operations
//! - [`commands`]: merge policies for the three write endpoints
//! - [`store`]: whole-document persistence
//! - [`model`]: `Book`, `Dataset`, wire serialization, reconciliation
//! - [`schema`]: the versioned schema descriptor
//! - [`config`]: configuration management
//! - [`server`]: HTTP routing and static files (not part of the core)
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod server;
pub mod store;
