//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── DomainError      - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comanda-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP API errors (in app)                                              │
//! │  └── ApiError         - What callers see (status + JSON body)          │
//! │                                                                         │
//! │  Flow: ValidationError → DomainError → DbError → ApiError → Caller     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! Every failure falls into one of four caller-visible categories:
//! - not-found: a referenced entity does not exist
//! - conflict: a uniqueness violation (duplicate national id)
//! - invalid-state: the operation is not permitted in the current tab state
//! - validation: malformed or out-of-range input
//!
//! None of these are retried; all are detected before or during the mutation
//! attempt and surfaced immediately.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, status, total)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::TabStatus;

// =============================================================================
// Domain Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or missing entities.
/// They are surfaced to the caller with a short human-readable reason and
/// never retried.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Client cannot be found.
    ///
    /// ## When This Occurs
    /// - Looking up a client by id that was never registered
    /// - Opening a tab against a dangling client reference
    #[error("Client not found: {0}")]
    ClientNotFound(i64),

    /// Tab cannot be found.
    #[error("Tab not found: {0}")]
    TabNotFound(i64),

    /// Line item cannot be found.
    #[error("Line item not found: {0}")]
    ItemNotFound(i64),

    /// The tab is not in the Open state.
    ///
    /// ## When This Occurs
    /// - Adding an item to a paid tab
    /// - Checking out a tab twice (checkout is one-way)
    /// - Removing an item from a paid tab
    #[error("Tab {tab_id} is already {status}")]
    TabNotOpen { tab_id: i64, status: TabStatus },

    /// The tab still carries accrued, unsettled value.
    ///
    /// ## When This Occurs
    /// - Deleting an Open tab whose total is greater than zero.
    ///   Paid tabs (any total) and zero-total Open tabs delete fine.
    #[error("Tab {tab_id} is {status} with pending total {total:.2}; settle before deleting")]
    TabHasPendingTotal {
        tab_id: i64,
        status: TabStatus,
        total: f64,
    },

    /// Uniqueness violation on the client national id.
    #[error("National id '{0}' is already registered")]
    DuplicateNationalId(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A monetary amount is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: String, value: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DomainError.
pub type DomainResult<T> = Result<T, DomainError>;

// =============================================================================
// Unit Tests
// =============================================================================
