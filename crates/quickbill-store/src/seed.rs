//! # Starter Catalog
//!
//! The six demo products a fresh till opens with.
//!
//! | id | name          | category   | cost | price | stock | GST |
//! |----|---------------|------------|------|-------|-------|-----|
//! | 1  | Premium Rice  | Grains     | 40   | 50    | 100   | 5%  |
//! | 2  | Fresh Milk 1L | Dairy      | 50   | 60    | 50    | 0%  |
//! | 3  | Artisan Soap  | Hygiene    | 25   | 40    | 200   | 12% |
//! | 4  | Cooking Oil   | Essentials | 140  | 180   | 30    | 5%  |
//! | 5  | Organic Tea   | Beverage   | 80   | 120   | 75    | 18% |
//! | 6  | Refined Sugar | Essentials | 35   | 45    | 120   | 5%  |

use quickbill_core::{Money, Product, TaxRate};

/// (id, name, category, cost, price, stock, gst %)
const STARTER_PRODUCTS: &[(&str, &str, &str, i64, i64, i64, u32)] = &[
    ("1", "Premium Rice", "Grains", 40, 50, 100, 5),
    ("2", "Fresh Milk 1L", "Dairy", 50, 60, 50, 0),
    ("3", "Artisan Soap", "Hygiene", 25, 40, 200, 12),
    ("4", "Cooking Oil", "Essentials", 140, 180, 30, 5),
    ("5", "Organic Tea", "Beverage", 80, 120, 75, 18),
    ("6", "Refined Sugar", "Essentials", 35, 45, 120, 5),
];

/// Builds the starter catalog.
pub fn starter_products() -> Vec<Product> {
    STARTER_PRODUCTS
        .iter()
        .map(|&(id, name, category, cost, price, stock, gst)| {
            Product::new(id, name, category)
                .with_prices(Money::from_major(cost), Money::from_major(price))
                .with_stock(stock)
                .with_tax_rate(TaxRate::from_percent(gst))
        })
        .collect()
}
