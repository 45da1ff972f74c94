//! # Chardex Architecture
//!
//! Chardex is a **UI-agnostic character catalog library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the client and the state services       │
//! │  - Wires remote fetches to client-side sorting              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain Layers                                              │
//! │  - remote: HTTP client with cancellation                    │
//! │  - service: reducer-driven favorites and notes state        │
//! │  - repo: envelope persistence + validation                  │
//! │  - sort / query / debounce / export: pure helpers           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait                             │
//! │  - FileStore (production), MemoryStore (fallback, testing)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, never writes to stdout/stderr, never calls
//! `std::process::exit`, and never assumes a terminal. The same core could
//! serve a TUI, a web service, or any other UI.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`remote`]: Read-only HTTP client for the remote character catalog
//! - [`service`]: Reducer-driven state stores for favorites and notes
//! - [`repo`]: Persistence envelopes and note validation
//! - [`store`]: Storage abstraction and implementations
//! - [`sort`]: Pluggable client-side ordering
//! - [`query`]: URL-shaped filter state and the search debounce
//! - [`debounce`]: Trailing-edge debouncer used by the query layer
//! - [`export`]: JSON and CSV favorites export
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod api;
pub mod debounce;
pub mod error;
pub mod export;
pub mod model;
pub mod query;
pub mod remote;
pub mod repo;
pub mod service;
pub mod sort;
pub mod store;

#[cfg(test)]
pub mod test_utils;
