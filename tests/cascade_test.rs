//! Deleting a cow or a customer must take every dependent record with
//! it, in one transaction, and leave unrelated rows alone.

mod common;

use chrono::NaiveDate;
use common::TestApp;
use farmledger_api::entities::{cow::CowStatus, vaccination::VaccinationStatus};
use farmledger_api::errors::ServiceError;
use farmledger_api::services::{
    customers::CustomerInput, health::HealthRecordInput, herd::CowInput, milk::MilkLogInput,
    payments::PaymentInput, sales::SaleInput, vaccinations::VaccinationInput,
};
use rust_decimal_macros::dec;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, d).expect("valid date")
}

#[tokio::test]
async fn deleting_a_cow_removes_its_records() {
    let app = TestApp::new().await;
    let herd = &app.state.services.herd;

    let doomed = herd
        .create_cow(CowInput {
            tag: "D-01".to_string(),
            name: "Doomed".to_string(),
            breed: Some("Jersey".to_string()),
            date_of_birth: None,
            is_pregnant: false,
            expected_calving_date: None,
            status: CowStatus::Active,
        })
        .await
        .expect("create cow");
    let survivor = herd
        .create_cow(CowInput {
            tag: "S-01".to_string(),
            name: "Survivor".to_string(),
            breed: None,
            date_of_birth: None,
            is_pregnant: false,
            expected_calving_date: None,
            status: CowStatus::Active,
        })
        .await
        .expect("create cow");

    for cow_id in [doomed.id, survivor.id] {
        app.state
            .services
            .milk
            .log_production(MilkLogInput {
                cow_id,
                date: date(1),
                morning_qty: dec!(6),
                evening_qty: dec!(4),
            })
            .await
            .expect("log milk");
        app.state
            .services
            .health
            .add_record(HealthRecordInput {
                cow_id,
                date: date(2),
                description: "Routine checkup".to_string(),
                treatment: None,
                veterinarian: None,
            })
            .await
            .expect("health record");
        app.state
            .services
            .vaccinations
            .add_vaccination(VaccinationInput {
                cow_id,
                vaccine_name: "FMD".to_string(),
                administered_on: date(3),
                next_due_on: None,
                notes: None,
                status: VaccinationStatus::Completed,
            })
            .await
            .expect("vaccination");
    }

    herd.delete_cow(doomed.id).await.expect("delete cow");

    assert!(matches!(
        herd.get_cow(doomed.id).await,
        Err(ServiceError::NotFound(_))
    ));
    let milk = app
        .state
        .services
        .milk
        .list_history()
        .await
        .expect("milk history");
    assert_eq!(milk.len(), 1);
    assert_eq!(milk[0].0.cow_id, survivor.id);
    let records = app
        .state
        .services
        .health
        .list_records()
        .await
        .expect("health records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0.cow_id, survivor.id);
    let shots = app
        .state
        .services
        .vaccinations
        .list_vaccinations()
        .await
        .expect("vaccinations");
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].0.cow_id, survivor.id);
}

#[tokio::test]
async fn deleting_a_customer_removes_their_transactions() {
    let app = TestApp::new().await;
    let customers = &app.state.services.customers;

    let doomed = customers
        .create_customer(CustomerInput {
            name: "Closing Shop".to_string(),
            contact_info: None,
        })
        .await
        .expect("create customer");
    let survivor = customers
        .create_customer(CustomerInput {
            name: "Staying Open".to_string(),
            contact_info: None,
        })
        .await
        .expect("create customer");

    for customer_id in [doomed.id, survivor.id] {
        app.state
            .services
            .sales
            .create_sale(SaleInput {
                customer_id,
                date: date(5),
                quantity_liters: dec!(10),
                unit_price: dec!(50),
                is_paid: false,
            })
            .await
            .expect("sale");
        app.state
            .services
            .payments
            .create_payment(PaymentInput {
                customer_id,
                date: date(6),
                amount_received: dec!(100),
                description: None,
            })
            .await
            .expect("payment");
    }

    customers
        .delete_customer(doomed.id)
        .await
        .expect("delete customer");

    assert!(matches!(
        customers.get_customer(doomed.id).await,
        Err(ServiceError::NotFound(_))
    ));
    let sales = app
        .state
        .services
        .sales
        .list_sales()
        .await
        .expect("sales");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].0.customer_id, survivor.id);
    let payments = app
        .state
        .services
        .payments
        .list_payments()
        .await
        .expect("payments");
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].0.customer_id, survivor.id);
}

#[tokio::test]
async fn duplicate_cow_tags_are_rejected() {
    let app = TestApp::new().await;
    let herd = &app.state.services.herd;

    let input = CowInput {
        tag: "T-01".to_string(),
        name: "First".to_string(),
        breed: None,
        date_of_birth: None,
        is_pregnant: false,
        expected_calving_date: None,
        status: CowStatus::Active,
    };
    herd.create_cow(input.clone()).await.expect("first cow");

    let duplicate = herd
        .create_cow(CowInput {
            name: "Second".to_string(),
            ..input
        })
        .await;
    assert!(matches!(duplicate, Err(ServiceError::ValidationError(_))));
    assert_eq!(herd.list_cows().await.expect("list").len(), 1);
}
