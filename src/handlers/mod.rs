use crate::auth::SessionService;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::{
    customers::CustomerService, expenses::ExpenseService, export::ExportService,
    health::HealthService, herd::HerdService, milk::MilkService, payments::PaymentService,
    reminders::ReminderService, reports::ReportService, sales::SaleService, users::UserService,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

pub mod auth;
pub mod cows;
pub mod customers;
pub mod dashboard;
pub mod expenses;
pub mod exports;
pub mod health;
pub mod milk;
pub mod payments;
pub mod reports;
pub mod sales;
pub mod vaccinations;

/// Aggregated services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub herd: HerdService,
    pub milk: MilkService,
    pub health: HealthService,
    pub vaccinations: crate::services::vaccinations::VaccinationService,
    pub customers: CustomerService,
    pub sales: SaleService,
    pub payments: PaymentService,
    pub expenses: ExpenseService,
    pub reports: ReportService,
    pub reminders: ReminderService,
    pub export: ExportService,
    pub users: UserService,
    pub sessions: Arc<SessionService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            herd: HerdService::new(db.clone()),
            milk: MilkService::new(db.clone()),
            health: HealthService::new(db.clone()),
            vaccinations: crate::services::vaccinations::VaccinationService::new(db.clone()),
            customers: CustomerService::new(db.clone()),
            sales: SaleService::new(db.clone()),
            payments: PaymentService::new(db.clone()),
            expenses: ExpenseService::new(db.clone()),
            reports: ReportService::new(db.clone()),
            reminders: ReminderService::new(
                db.clone(),
                config.vaccination_reminder_days,
                config.calving_reminder_days,
            ),
            export: ExportService::new(db.clone()),
            users: UserService::new(db.clone()),
            sessions: Arc::new(SessionService::new(db, config.session_ttl_hours)),
        }
    }
}

/// Parse a `YYYY-MM-DD` form field. Anything else is a recoverable
/// validation error, never a crash.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ServiceError::ValidationError(format!(
            "{}: invalid date format, please use YYYY-MM-DD",
            field
        ))
    })
}

/// Parse an optional date field; empty strings count as absent.
pub fn parse_opt_date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>, ServiceError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(field, raw).map(Some),
    }
}

/// Parse a decimal quantity or amount field.
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ServiceError> {
    Decimal::from_str(value.trim())
        .map_err(|_| ServiceError::ValidationError(format!("{}: must be a number", field)))
}

/// HTML checkboxes arrive as "on" when ticked and are absent otherwise;
/// API clients send true/1.
pub fn checkbox(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("on") | Some("true") | Some("1")
    )
}

/// Normalize an optional free-text field; empty strings become None.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn date_parsing_accepts_calendar_format_only() {
        assert_eq!(
            parse_date("date", "2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("date", "29/02/2024").is_err());
        assert!(parse_date("date", "not-a-date").is_err());
    }

    #[test]
    fn optional_dates_treat_empty_as_absent() {
        assert_eq!(parse_opt_date("d", &None).unwrap(), None);
        assert_eq!(parse_opt_date("d", &Some("".into())).unwrap(), None);
        assert!(parse_opt_date("d", &Some("junk".into())).is_err());
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal("qty", "10.5").unwrap(), dec!(10.5));
        assert!(parse_decimal("qty", "ten").is_err());
    }

    #[test]
    fn checkbox_values() {
        assert!(checkbox(&Some("on".into())));
        assert!(checkbox(&Some("true".into())));
        assert!(!checkbox(&Some("off".into())));
        assert!(!checkbox(&None));
    }
}
