//! # Validation Module
//!
//! Input validation for the points where data enters the system: products
//! loaded into the inventory and checkouts handed to the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout session                                             │
//! │  ├── Quantity clamped to [1, stock] by the +/− controls                │
//! │  └── "Complete Sale" gated by can_checkout()                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store boundary (PosService)                                  │
//! │  └── THIS MODULE: quantities, discount, tender                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Billing engine                                               │
//! │  └── Accepts anything; clamps taxable value and profit base at 0       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickbill_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Organic Tea").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartItem, Discount, PaymentMethod, Product};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id: non-empty, at most 64 characters.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::OutOfRange {
            field: "id length".to_string(),
            min: 1,
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
///
/// ## Example
/// ```rust
/// use quickbill_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Fresh Milk 1L").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::OutOfRange {
            field: "name length".to_string(),
            min: 1,
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity: 1 to [`MAX_ITEM_QUANTITY`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price: zero is allowed (free items), negative is not.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount at the store boundary.
///
/// ## Rules
/// - Value must not be negative
/// - Percentage must be at most 100
/// - A flat amount larger than the subtotal is allowed; the billing engine
///   floors the taxable value at zero
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    if discount.value() < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "discount".to_string(),
        });
    }

    if let Discount::Percentage(pct) = discount {
        if *pct > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "discount percentage".to_string(),
                min: 0,
                max: 100,
            });
        }
    }

    Ok(())
}

/// Validates a product before it enters the inventory.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price("cost price", product.cost_price)?;
    validate_price("selling price", product.selling_price)?;

    if product.gst_rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "gst".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the shape of a checkout: at least one line, every quantity in
/// range, every product snapshot well-formed, and a sane discount.
pub fn validate_checkout(items: &[CartItem], discount: &Discount) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    for item in items {
        validate_quantity(item.quantity)?;
        validate_product(&item.product)?;
    }

    validate_discount(discount)?;
    Ok(())
}

/// Validates that cash received covers the payable amount.
///
/// Only cash payments carry a tender; UPI and card always pass.
pub fn validate_tender(method: PaymentMethod, cash_given: Money, payable: Money) -> CoreResult<()> {
    match method {
        PaymentMethod::Cash if cash_given < payable => Err(CoreError::InsufficientTender {
            given: cash_given,
            payable,
        }),
        PaymentMethod::Cash | PaymentMethod::Upi | PaymentMethod::Card => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
