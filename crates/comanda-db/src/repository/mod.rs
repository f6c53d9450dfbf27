//! # Repository Module
//!
//! Database repository implementations for Comanda.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.tabs().checkout(tab_id)                                     │
//! │       ▼                                                                 │
//! │  TabRepository                                                         │
//! │  ├── open(&self, client_id)                                            │
//! │  ├── get(&self, tab_id)                                                │
//! │  ├── checkout(&self, tab_id)                                           │
//! │  └── delete(&self, tab_id)                                             │
//! │       │                                                                 │
//! │       │  SQL inside one transaction per mutation                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • State-machine checks and writes share a commit boundary             │
//! │  • SQL is isolated in one place                                        │
//! │  • Easy to test against an in-memory database                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`client::ClientRepository`] - Client registration and lookup
//! - [`tab::TabRepository`] - Tab lifecycle (open, checkout, delete)
//! - [`item::ItemRepository`] - Line items and the running total

pub mod client;
pub mod item;
pub mod tab;
