//! # Domain Types
//!
//! Core domain types used throughout Comanda.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │      Tab        │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │◄──│  client_id (FK) │◄──│  tab_id (FK)    │       │
//! │  │  national_id    │   │  status         │   │  product_name   │       │
//! │  │  phone/email    │   │  total (f64)    │   │  quantity       │       │
//! │  └─────────────────┘   │  created_at     │   │  unit_price     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Ownership: Tab exclusively owns its LineItems (cascade delete).       │
//! │  Tab holds a non-owning reference to exactly one Client.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity uses a system-assigned `i64` identifier (SQLite rowid).
//! The client additionally carries a unique business key: `national_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// =============================================================================
// Tab Status
// =============================================================================

/// The lifecycle status of a tab.
///
/// ## State Machine
/// ```text
/// Open ──checkout──► Paid (terminal)
/// ```
/// There is no cancelled or suspended state. `Paid` is terminal: no further
/// status transition and no further line items may attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum TabStatus {
    /// Tab is accepting line items.
    Open,
    /// Tab has been checked out and settled.
    Paid,
}

impl Default for TabStatus {
    fn default() -> Self {
        TabStatus::Open
    }
}

impl std::fmt::Display for TabStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabStatus::Open => write!(f, "OPEN"),
            TabStatus::Paid => write!(f, "PAID"),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered client of the venue.
///
/// Clients are created once and never mutated or deleted in the core flows;
/// tabs reference them, never own them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    /// System-assigned identifier.
    pub id: i64,

    /// Display name (required).
    pub name: String,

    /// National id ("CPF") - unique across all clients.
    pub national_id: String,

    /// Contact phone (optional).
    pub phone: Option<String>,

    /// Contact email (optional).
    pub email: Option<String>,
}

/// Input for registering a new client.
///
/// The identifier is assigned by the store, never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub national_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Tab
// =============================================================================

/// An open running account ("comanda") associated with one client.
///
/// The `total` field is a plain floating-point accumulator: it always equals
/// the sum of `quantity × unit_price` over all currently attached line items.
/// Two-decimal monetary truncation is a display concern only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tab {
    /// System-assigned identifier.
    pub id: i64,

    /// Owning client (non-owning reference).
    pub client_id: i64,

    /// Lifecycle status: Open (initial) or Paid (terminal).
    pub status: TabStatus,

    /// Running total over attached line items.
    pub total: f64,

    /// Assigned at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

impl Tab {
    /// Guards operations that require an open tab (add item, checkout).
    ///
    /// ## Errors
    /// `DomainError::TabNotOpen` with the current status when the tab has
    /// already been paid. A second checkout is a reported error, not a no-op.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.status != TabStatus::Open {
            return Err(DomainError::TabNotOpen {
                tab_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Guards tab deletion.
    ///
    /// ## Rules
    /// - Any Paid tab may be deleted (regardless of total)
    /// - An Open tab may be deleted only when its total is zero
    /// - An Open tab with accrued value is blocked until settled
    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.status != TabStatus::Paid && self.total > 0.0 {
            return Err(DomainError::TabHasPendingTotal {
                tab_id: self.id,
                status: self.status,
                total: self.total,
            });
        }
        Ok(())
    }

    /// Formats the running total with two-decimal monetary semantics.
    ///
    /// Internally the total stays a raw f64; truncation happens only here,
    /// at the display boundary.
    pub fn display_total(&self) -> String {
        format!("{:.2}", self.total)
    }
}

/// Input for opening a new tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTab {
    pub client_id: i64,
}

// =============================================================================
// Line Item
// =============================================================================

/// A single priced product entry attached to a tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    /// System-assigned identifier.
    pub id: i64,

    /// Owning tab.
    pub tab_id: i64,

    /// Product name/description, e.g. "Beer" or "Tilapia KG".
    pub product_name: String,

    /// Quantity (≥ 1 implied; not enforced by the write path).
    pub quantity: i64,

    /// Unit price, ≥ 0 enforced at creation.
    pub unit_price: f64,
}

impl LineItem {
    /// Returns `quantity × unit_price` for this line.
    #[inline]
    pub fn line_total(&self) -> f64 {
        crate::line_total(self.quantity, self.unit_price)
    }
}

/// Input for recording a new line item on a tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineItem {
    pub tab_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
