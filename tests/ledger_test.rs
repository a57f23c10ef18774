//! The customer balance must always equal the sum of that customer's
//! sale totals minus the sum of their payments, no matter which
//! sequence of mutations produced it.

mod common;

use chrono::NaiveDate;
use common::TestApp;
use farmledger_api::services::{
    customers::CustomerInput, ledger::Ledger, payments::PaymentInput, sales::SaleInput,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, n).expect("valid date")
}

async fn new_customer(app: &TestApp, name: &str) -> i32 {
    app.state
        .services
        .customers
        .create_customer(CustomerInput {
            name: name.to_string(),
            contact_info: None,
        })
        .await
        .expect("create customer")
        .id
}

async fn stored_balance(app: &TestApp, customer_id: i32) -> Decimal {
    app.state
        .services
        .customers
        .get_customer(customer_id)
        .await
        .expect("customer exists")
        .balance
}

async fn assert_ledger_holds(app: &TestApp, customer_id: i32) {
    let stored = stored_balance(app, customer_id).await;
    let derived = Ledger::derived_balance(app.state.db.as_ref(), customer_id)
        .await
        .expect("derive balance");
    assert_eq!(stored, derived, "stored balance drifted from transactions");
}

#[tokio::test]
async fn sale_charges_the_customer() {
    let app = TestApp::new().await;
    let customer_id = new_customer(&app, "Asha Dairy Stop").await;

    let sale = app
        .state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id,
            date: day(1),
            quantity_liters: dec!(10),
            unit_price: dec!(500),
            is_paid: false,
        })
        .await
        .expect("create sale");

    assert_eq!(sale.total_amount, dec!(5000));
    assert_eq!(stored_balance(&app, customer_id).await, dec!(5000));
    assert_ledger_holds(&app, customer_id).await;
}

#[tokio::test]
async fn payment_credits_the_customer() {
    let app = TestApp::new().await;
    let customer_id = new_customer(&app, "Village Tea House").await;

    app.state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id,
            date: day(1),
            quantity_liters: dec!(10),
            unit_price: dec!(500),
            is_paid: false,
        })
        .await
        .expect("create sale");
    app.state
        .services
        .payments
        .create_payment(PaymentInput {
            customer_id,
            date: day(2),
            amount_received: dec!(2000),
            description: Some("partial settlement".to_string()),
        })
        .await
        .expect("create payment");

    assert_eq!(stored_balance(&app, customer_id).await, dec!(3000));
    assert_ledger_holds(&app, customer_id).await;
}

#[tokio::test]
async fn deleting_a_sale_refunds_the_charge() {
    let app = TestApp::new().await;
    let customer_id = new_customer(&app, "Hilltop Kitchen").await;

    let sale = app
        .state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id,
            date: day(3),
            quantity_liters: dec!(4.5),
            unit_price: dec!(60),
            is_paid: false,
        })
        .await
        .expect("create sale");
    app.state
        .services
        .sales
        .delete_sale(sale.id)
        .await
        .expect("delete sale");

    assert_eq!(stored_balance(&app, customer_id).await, Decimal::ZERO);
    assert_ledger_holds(&app, customer_id).await;
}

#[tokio::test]
async fn deleting_a_payment_restores_the_debt() {
    let app = TestApp::new().await;
    let customer_id = new_customer(&app, "Corner Grocer").await;

    app.state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id,
            date: day(1),
            quantity_liters: dec!(20),
            unit_price: dec!(55),
            is_paid: false,
        })
        .await
        .expect("create sale");
    let payment = app
        .state
        .services
        .payments
        .create_payment(PaymentInput {
            customer_id,
            date: day(2),
            amount_received: dec!(600),
            description: None,
        })
        .await
        .expect("create payment");
    app.state
        .services
        .payments
        .delete_payment(payment.id)
        .await
        .expect("delete payment");

    assert_eq!(stored_balance(&app, customer_id).await, dec!(1100));
    assert_ledger_holds(&app, customer_id).await;
}

#[tokio::test]
async fn editing_a_sale_moves_the_debt_between_customers() {
    let app = TestApp::new().await;
    let first = new_customer(&app, "First Buyer").await;
    let second = new_customer(&app, "Second Buyer").await;

    let sale = app
        .state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id: first,
            date: day(5),
            quantity_liters: dec!(8),
            unit_price: dec!(50),
            is_paid: false,
        })
        .await
        .expect("create sale");

    app.state
        .services
        .sales
        .update_sale(
            sale.id,
            SaleInput {
                customer_id: second,
                date: day(5),
                quantity_liters: dec!(6),
                unit_price: dec!(70),
                is_paid: true,
            },
        )
        .await
        .expect("reassign sale");

    assert_eq!(stored_balance(&app, first).await, Decimal::ZERO);
    assert_eq!(stored_balance(&app, second).await, dec!(420));
    assert_ledger_holds(&app, first).await;
    assert_ledger_holds(&app, second).await;
}

#[tokio::test]
async fn sale_against_unknown_customer_changes_nothing() {
    let app = TestApp::new().await;
    let customer_id = new_customer(&app, "Real Customer").await;

    let result = app
        .state
        .services
        .sales
        .create_sale(SaleInput {
            customer_id: customer_id + 100,
            date: day(1),
            quantity_liters: dec!(1),
            unit_price: dec!(50),
            is_paid: false,
        })
        .await;

    assert!(result.is_err());
    assert_eq!(stored_balance(&app, customer_id).await, Decimal::ZERO);
    let sales = app
        .state
        .services
        .sales
        .list_sales()
        .await
        .expect("list sales");
    assert!(sales.is_empty(), "failed sale must not leave a row behind");
}


// Operations reference customers and live rows by index so any
// generated sequence stays applicable: `customer` picks one of the
// seeded accounts, `pick` selects among the rows alive at that point
// and is ignored while none exist.
#[derive(Debug, Clone)]
enum LedgerOp {
    Sale { customer: usize, liters: u32, price: u32 },
    Payment { customer: usize, amount: u32 },
    EditSale { pick: usize, customer: usize, liters: u32, price: u32 },
    EditPayment { pick: usize, customer: usize, amount: u32 },
    DeleteSale { pick: usize },
    DeletePayment { pick: usize },
}

const PROPERTY_CUSTOMERS: usize = 3;

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    let customer = 0..PROPERTY_CUSTOMERS;
    prop_oneof![
        (customer.clone(), 1u32..200, 1u32..1000)
            .prop_map(|(customer, liters, price)| LedgerOp::Sale { customer, liters, price }),
        (customer.clone(), 1u32..50_000)
            .prop_map(|(customer, amount)| LedgerOp::Payment { customer, amount }),
        (any::<usize>(), customer.clone(), 1u32..200, 1u32..1000).prop_map(
            |(pick, customer, liters, price)| LedgerOp::EditSale { pick, customer, liters, price }
        ),
        (any::<usize>(), customer, 1u32..50_000)
            .prop_map(|(pick, customer, amount)| LedgerOp::EditPayment { pick, customer, amount }),
        any::<usize>().prop_map(|pick| LedgerOp::DeleteSale { pick }),
        any::<usize>().prop_map(|pick| LedgerOp::DeletePayment { pick }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // Any sequence of sale and payment creates, edits (including
    // reassignment to another customer) and deletes leaves every
    // stored balance equal to the balance recomputed from that
    // customer's surviving rows.
    #[test]
    fn random_mutation_sequences_preserve_the_ledger(ops in prop::collection::vec(ledger_op_strategy(), 1..20)) {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        runtime.block_on(async move {
            let app = TestApp::new().await;
            let mut customers = Vec::with_capacity(PROPERTY_CUSTOMERS);
            for n in 0..PROPERTY_CUSTOMERS {
                customers.push(new_customer(&app, &format!("Property Buyer {}", n)).await);
            }

            let mut sale_ids: Vec<i32> = Vec::new();
            let mut payment_ids: Vec<i32> = Vec::new();

            for op in ops {
                match op {
                    LedgerOp::Sale { customer, liters, price } => {
                        let sale = app.state
                            .services
                            .sales
                            .create_sale(SaleInput {
                                customer_id: customers[customer],
                                date: day(10),
                                quantity_liters: Decimal::from(liters),
                                unit_price: Decimal::from(price),
                                is_paid: false,
                            })
                            .await
                            .expect("create sale");
                        sale_ids.push(sale.id);
                    }
                    LedgerOp::Payment { customer, amount } => {
                        let payment = app.state
                            .services
                            .payments
                            .create_payment(PaymentInput {
                                customer_id: customers[customer],
                                date: day(11),
                                amount_received: Decimal::from(amount),
                                description: None,
                            })
                            .await
                            .expect("create payment");
                        payment_ids.push(payment.id);
                    }
                    LedgerOp::EditSale { pick, customer, liters, price } => {
                        if sale_ids.is_empty() {
                            continue;
                        }
                        let id = sale_ids[pick % sale_ids.len()];
                        app.state
                            .services
                            .sales
                            .update_sale(
                                id,
                                SaleInput {
                                    customer_id: customers[customer],
                                    date: day(12),
                                    quantity_liters: Decimal::from(liters),
                                    unit_price: Decimal::from(price),
                                    is_paid: false,
                                },
                            )
                            .await
                            .expect("edit sale");
                    }
                    LedgerOp::EditPayment { pick, customer, amount } => {
                        if payment_ids.is_empty() {
                            continue;
                        }
                        let id = payment_ids[pick % payment_ids.len()];
                        app.state
                            .services
                            .payments
                            .update_payment(
                                id,
                                PaymentInput {
                                    customer_id: customers[customer],
                                    date: day(13),
                                    amount_received: Decimal::from(amount),
                                    description: None,
                                },
                            )
                            .await
                            .expect("edit payment");
                    }
                    LedgerOp::DeleteSale { pick } => {
                        if sale_ids.is_empty() {
                            continue;
                        }
                        let id = sale_ids.remove(pick % sale_ids.len());
                        app.state
                            .services
                            .sales
                            .delete_sale(id)
                            .await
                            .expect("delete sale");
                    }
                    LedgerOp::DeletePayment { pick } => {
                        if payment_ids.is_empty() {
                            continue;
                        }
                        let id = payment_ids.remove(pick % payment_ids.len());
                        app.state
                            .services
                            .payments
                            .delete_payment(id)
                            .await
                            .expect("delete payment");
                    }
                }
            }

            for customer_id in customers {
                assert_ledger_holds(&app, customer_id).await;
            }
        });
    }
}
