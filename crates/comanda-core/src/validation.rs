//! # Validation Module
//!
//! Input validation utilities for Comanda.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP request (axum)                                          │
//! │  ├── Type validation (JSON deserialization into typed structs)        │
//! │  └── Missing/mistyped fields rejected before the core runs            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required strings non-empty, length bounds                        │
//! │  └── unit_price ≥ 0                                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraint on national_id                                  │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  A failing check in any layer prevents the write entirely.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewClient, NewLineItem};
use crate::{MAX_NAME_LEN, MAX_NATIONAL_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client or product display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_name;
///
/// assert!(validate_name("name", "Tilapia KG").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a national id ("CPF").
///
/// ## Rules
/// - Must not be empty
/// - Must be at most [`MAX_NATIONAL_ID_LEN`] characters
///
/// No digit-level format check: the national id is an opaque uniqueness key,
/// and uniqueness itself is enforced by the store.
pub fn validate_national_id(national_id: &str) -> ValidationResult<()> {
    let national_id = national_id.trim();

    if national_id.is_empty() {
        return Err(ValidationError::Required {
            field: "national_id".to_string(),
        });
    }

    if national_id.len() > MAX_NATIONAL_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "national_id".to_string(),
            max: MAX_NATIONAL_ID_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0.0)
/// - Zero is allowed (courtesy items)
///
/// Quantity is deliberately NOT validated here: a minimum of 1 is implied by
/// the domain but the write path never enforced it.
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(10.0).is_ok());
/// assert!(validate_unit_price(0.0).is_ok());
/// assert!(validate_unit_price(-5.0).is_err());
/// ```
pub fn validate_unit_price(unit_price: f64) -> ValidationResult<()> {
    if unit_price < 0.0 {
        return Err(ValidationError::NegativeAmount {
            field: "unit_price".to_string(),
            value: unit_price,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a client registration payload.
pub fn validate_new_client(client: &NewClient) -> ValidationResult<()> {
    validate_name("name", &client.name)?;
    validate_national_id(&client.national_id)?;
    Ok(())
}

/// Validates a new line item payload.
///
/// Runs before any write: a failing check here means no item row is created
/// and the tab total is untouched.
pub fn validate_new_item(item: &NewLineItem) -> ValidationResult<()> {
    validate_name("product_name", &item.product_name)?;
    validate_unit_price(item.unit_price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
