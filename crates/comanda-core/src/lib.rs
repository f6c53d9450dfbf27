//! # comanda-core: Pure Business Logic for Comanda
//!
//! This crate is the **heart** of the tab-management backend. It contains
//! the domain model and every business rule as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comanda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Clients (any)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    comanda-api (axum)                           │   │
//! │  │    register_client, open_tab, add_item, checkout_tab, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comanda-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   error   │  │ validation│                  │   │
//! │  │   │  Client   │  │  Domain   │  │   rules   │                  │   │
//! │  │   │  Tab/Item │  │  errors   │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    comanda-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Tab, LineItem, TabStatus)
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **One-way lifecycle**: `Open → Paid` is the only tab transition, and
//!    `Paid` is terminal
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::types::{Tab, TabStatus};
//! use comanda_core::line_total;
//! use chrono::Utc;
//!
//! let tab = Tab {
//!     id: 1,
//!     client_id: 7,
//!     status: TabStatus::Open,
//!     total: 0.0,
//!     created_at: Utc::now(),
//! };
//!
//! // An open tab accepts items and checkout
//! assert!(tab.ensure_open().is_ok());
//!
//! // Line totals are plain f64 accumulation (two-decimal formatting
//! // happens only at display boundaries)
//! assert_eq!(line_total(2, 10.0), 20.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use comanda_core::Tab` instead of
// `use comanda_core::types::Tab`

pub use error::{DomainError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a client or product name
///
/// ## Business Reason
/// Keeps display names printable on receipts and list views.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a national id ("CPF")
///
/// ## Business Reason
/// The national id is an opaque identifying string; no digit-level format
/// is enforced, only a sane upper bound.
pub const MAX_NATIONAL_ID_LEN: usize = 32;

/// Computes the total for one line: `quantity × unit_price`.
///
/// Quantities below 1 are not rejected here; the observed write path never
/// enforced a minimum and the running total stays the exact sum either way.
#[inline]
pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
    quantity as f64 * unit_price
}
