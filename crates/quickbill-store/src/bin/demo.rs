//! # Scripted Checkout Demo
//!
//! Opens the till with the starter catalog, rings up two sales, refunds one
//! and prints the resulting state as JSON.
//!
//! ## Usage
//! ```bash
//! cargo run -p quickbill-store --bin demo
//!
//! # Custom config file
//! cargo run -p quickbill-store --bin demo -- --config ./quickbill.toml
//!
//! # Quieter logs
//! RUST_LOG=warn cargo run -p quickbill-store --bin demo
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use rust_decimal::Decimal;
use tracing::{error, info};

use quickbill_core::{CheckoutSession, Discount, Money, PaymentMethod};
use quickbill_store::{init_tracing, PosService, StoreConfig, StoreResult};

fn main() -> ExitCode {
    init_tracing();

    let config_path = parse_config_arg();
    let config = StoreConfig::load_or_default(config_path);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Demo failed");
            ExitCode::FAILURE
        }
    }
}

fn parse_config_arg() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn run(config: StoreConfig) -> StoreResult<()> {
    let service = PosService::with_starter_catalog(config)?;
    let cfg = service.config().clone();

    // Sale 1: two bags of rice, cash.
    let mut session = CheckoutSession::new();
    if let Some(rice) = service.product("1") {
        session.add_product(&rice)?;
        session.add_product(&rice)?;
    }
    session.set_cash_given(Money::from_major(200));
    print_preview(&cfg, &session);

    if let Some(sale) = service.checkout(&mut session)? {
        info!(sale = %sale.summary(), "Rang up sale");
    }

    // Sale 2: milk + soap with 10% off, UPI.
    for id in ["2", "3"] {
        if let Some(product) = service.product(id) {
            session.add_product(&product)?;
        }
    }
    session.set_discount(Discount::percentage(Decimal::TEN));
    session.set_payment_method(PaymentMethod::Upi);
    print_preview(&cfg, &session);

    let second = service.checkout(&mut session)?;

    // Refund the second sale.
    if let Some(sale) = second {
        service.refund_sale(&sale.id);
    }

    let stats = service.stats();
    println!(
        "{}: {} bill(s), sales {}, GST {}, profit {}",
        cfg.store_name,
        stats.total_bills,
        cfg.format_currency(stats.total_sales),
        cfg.format_currency(stats.total_tax),
        cfg.format_currency(stats.total_profit)
    );

    println!("{}", service.snapshot_json()?);
    Ok(())
}

fn print_preview(cfg: &StoreConfig, session: &CheckoutSession) {
    let totals = session.totals();
    println!(
        "subtotal {} | discount {} | GST {} | payable {} | change {}",
        cfg.format_currency(totals.sub_total),
        cfg.format_currency(totals.discount_amount),
        cfg.format_currency(totals.tax_amount),
        cfg.format_currency(totals.final_amount),
        cfg.format_currency(totals.balance)
    );
}
