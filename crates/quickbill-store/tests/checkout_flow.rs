//! End-to-end flow: checkout → dashboard → refund.

use quickbill_core::{CartItem, CheckoutSession, DashboardStats, Discount, Money, PaymentMethod, Product, TaxRate};
use quickbill_store::{InventoryStore, PosService, StoreConfig};
use rust_decimal_macros::dec;

fn single_product_service(stock: i64) -> PosService {
    let product = Product::new("p1", "Basmati Rice 5kg", "Grains")
        .with_prices(Money::from_major(40), Money::from_major(50))
        .with_stock(stock)
        .with_tax_rate(TaxRate::from_percent(5));
    let inventory = InventoryStore::from_products(vec![product]).unwrap();
    PosService::new(StoreConfig::default(), inventory)
}

#[test]
fn commit_then_refund_restores_stock_and_ledger() {
    let service = single_product_service(5);
    let product = service.product("p1").unwrap();

    let sale = service
        .commit_sale(vec![CartItem::new(product, 1)], Discount::none(), PaymentMethod::Card, Money::zero())
        .unwrap();

    assert_eq!(service.product("p1").unwrap().stock, 4);
    assert_eq!(service.sales().len(), 1);

    let refunded = service.refund_sale(&sale.id).unwrap();
    assert_eq!(refunded.id, sale.id);
    assert_eq!(service.product("p1").unwrap().stock, 5);
    assert!(service.sales().is_empty());
    assert_eq!(service.stats(), DashboardStats::default());
}

#[test]
fn refund_unknown_sale_is_noop() {
    let service = single_product_service(5);
    assert!(service.refund_sale("does-not-exist").is_none());
    assert_eq!(service.product("p1").unwrap().stock, 5);
}

#[test]
fn dashboard_tracks_sales() {
    let service = PosService::with_starter_catalog(StoreConfig::default()).unwrap();
    let mut session = CheckoutSession::new();

    // 2 × rice at 5% GST, cash 105 exact.
    let rice = service.product("1").unwrap();
    session.add_product(&rice).unwrap();
    session.add_product(&rice).unwrap();
    session.set_cash_given(Money::from_major(105));
    let first = service.checkout(&mut session).unwrap().unwrap();
    assert_eq!(first.final_amount, Money::from_major(105));
    assert_eq!(first.change_due, Some(Money::zero()));

    // Milk + soap, 10% off, card.
    session.add_product(&service.product("2").unwrap()).unwrap();
    session.add_product(&service.product("3").unwrap()).unwrap();
    session.set_discount(Discount::percentage(dec!(10)));
    session.set_payment_method(PaymentMethod::Card);
    let second = service.checkout(&mut session).unwrap().unwrap();
    assert_eq!(second.final_amount, Money::from_major(94));

    let stats = service.stats();
    assert_eq!(stats.total_bills, 2);
    assert_eq!(stats.total_sales, Money::from_major(199));
    assert_eq!(stats.total_tax, Money::from_minor(932));
    // (100 - 80) + (90 - 75)
    assert_eq!(stats.total_profit, Money::from_major(35));

    let flow = service.recent_flow();
    assert_eq!(flow.len(), 2);
    assert_eq!(flow[0].amount, Money::from_major(105));
    assert_eq!(flow[1].label, "Sale 2");

    // Newest first in the ledger.
    assert_eq!(service.sales()[0].id, second.id);

    service.refund_sale(&first.id).unwrap();
    let stats = service.stats();
    assert_eq!(stats.total_bills, 1);
    assert_eq!(stats.total_sales, Money::from_major(94));
    assert_eq!(service.product("1").unwrap().stock, 100);
}
