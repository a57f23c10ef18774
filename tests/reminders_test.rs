mod common;

use chrono::{Duration, NaiveDate};
use common::TestApp;
use farmledger_api::entities::{cow::CowStatus, vaccination::VaccinationStatus};
use farmledger_api::services::{herd::CowInput, vaccinations::VaccinationInput};

fn cow_input(tag: &str, pregnant: bool, calving: Option<NaiveDate>) -> CowInput {
    CowInput {
        tag: tag.to_string(),
        name: format!("Cow {}", tag),
        breed: None,
        date_of_birth: None,
        is_pregnant: pregnant,
        expected_calving_date: calving,
        status: CowStatus::Active,
    }
}

fn shot(cow_id: i32, vaccine: &str, due: Option<NaiveDate>, status: VaccinationStatus) -> VaccinationInput {
    VaccinationInput {
        cow_id,
        vaccine_name: vaccine.to_string(),
        administered_on: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        next_due_on: due,
        notes: None,
        status,
    }
}

#[tokio::test]
async fn vaccination_reminders_include_overdue_and_upcoming() {
    let app = TestApp::new().await;
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");

    let cow = app
        .state
        .services
        .herd
        .create_cow(cow_input("C-01", false, None))
        .await
        .expect("create cow");

    let vaccinations = &app.state.services.vaccinations;
    // Overdue, inside the window, past the window, already completed.
    vaccinations
        .add_vaccination(shot(cow.id, "FMD", Some(today - Duration::days(3)), VaccinationStatus::Pending))
        .await
        .expect("overdue shot");
    vaccinations
        .add_vaccination(shot(cow.id, "Brucellosis", Some(today + Duration::days(10)), VaccinationStatus::Pending))
        .await
        .expect("upcoming shot");
    vaccinations
        .add_vaccination(shot(cow.id, "Anthrax", Some(today + Duration::days(90)), VaccinationStatus::Pending))
        .await
        .expect("distant shot");
    vaccinations
        .add_vaccination(shot(cow.id, "HS", Some(today + Duration::days(5)), VaccinationStatus::Completed))
        .await
        .expect("completed shot");

    let reminders = app
        .state
        .services
        .reminders
        .upcoming(today)
        .await
        .expect("reminders");

    let names: Vec<&str> = reminders
        .vaccinations
        .iter()
        .map(|r| r.vaccine_name.as_str())
        .collect();
    assert_eq!(names, vec!["FMD", "Brucellosis"]);
    assert!(reminders.vaccinations[0].overdue);
    assert!(!reminders.vaccinations[1].overdue);
}

#[tokio::test]
async fn calving_reminders_only_cover_pregnant_active_cows_in_window() {
    let app = TestApp::new().await;
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");
    let herd = &app.state.services.herd;

    herd.create_cow(cow_input("P-01", true, Some(today + Duration::days(2))))
        .await
        .expect("due soon");
    herd.create_cow(cow_input("P-02", true, Some(today + Duration::days(30))))
        .await
        .expect("due later");
    herd.create_cow(cow_input("P-03", false, Some(today + Duration::days(2))))
        .await
        .expect("not pregnant");
    let mut sold = cow_input("P-04", true, Some(today + Duration::days(1)));
    sold.status = CowStatus::Sold;
    herd.create_cow(sold).await.expect("sold cow");

    let reminders = app
        .state
        .services
        .reminders
        .upcoming(today)
        .await
        .expect("reminders");

    assert_eq!(reminders.calvings.len(), 1);
    assert_eq!(reminders.calvings[0].cow_tag, "P-01");
}

#[tokio::test]
async fn vaccination_without_due_date_is_never_reminded() {
    let app = TestApp::new().await;
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");

    let cow = app
        .state
        .services
        .herd
        .create_cow(cow_input("C-02", false, None))
        .await
        .expect("create cow");
    app.state
        .services
        .vaccinations
        .add_vaccination(shot(cow.id, "BQ", None, VaccinationStatus::Pending))
        .await
        .expect("one-off shot");

    let reminders = app
        .state
        .services
        .reminders
        .upcoming(today)
        .await
        .expect("reminders");
    assert!(reminders.vaccinations.is_empty());
}
