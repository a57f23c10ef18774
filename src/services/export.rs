//! Spreadsheet export.
//!
//! Renders full tables as CSV with fixed, human-readable column sets.
//! Read-only and unpaginated: every export walks the whole table.

use crate::db::DbPool;
use crate::entities::vaccination::VaccinationStatus;
use crate::entities::{cow, customer, expense, health_record, milk_production, payment, sale};
use crate::errors::ServiceError;
use chrono::{NaiveDate, Utc};
use sea_orm::{EntityTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A rendered download: filename plus CSV bytes.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService {
    db: Arc<DbPool>,
}

impl ExportService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn milk_production(&self) -> Result<ExportFile, ServiceError> {
        let rows = milk_production::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_asc(milk_production::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "Date",
                "Cow Name",
                "Cow ID",
                "Morning Qty (L)",
                "Evening Qty (L)",
                "Total Qty (L)",
                "Logged At",
            ])
            .map_err(csv_error)?;
        for (log, owner) in rows {
            let (name, tag) = cow_label(owner);
            writer
                .write_record([
                    log.date.to_string(),
                    name,
                    tag,
                    log.morning_qty.to_string(),
                    log.evening_qty.to_string(),
                    log.total().to_string(),
                    log.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "milk_production")
    }

    #[instrument(skip(self))]
    pub async fn health_records(&self) -> Result<ExportFile, ServiceError> {
        let rows = health_record::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_asc(health_record::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "Date",
                "Cow Name",
                "Cow ID",
                "Description",
                "Treatment",
                "Veterinarian",
                "Logged At",
            ])
            .map_err(csv_error)?;
        for (record, owner) in rows {
            let (name, tag) = cow_label(owner);
            writer
                .write_record([
                    record.date.to_string(),
                    name,
                    tag,
                    record.description,
                    record.treatment.unwrap_or_default(),
                    record.veterinarian.unwrap_or_default(),
                    record.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "health_records")
    }

    #[instrument(skip(self))]
    pub async fn sales(&self) -> Result<ExportFile, ServiceError> {
        let rows = sale::Entity::find()
            .find_also_related(customer::Entity)
            .order_by_asc(sale::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "Date",
                "Customer Name",
                "Milk Qty (L)",
                "Price/L",
                "Total Amount",
                "Is Paid",
                "Logged At",
            ])
            .map_err(csv_error)?;
        for (row, buyer) in rows {
            writer
                .write_record([
                    row.date.to_string(),
                    buyer.map(|c| c.name).unwrap_or_default(),
                    row.quantity_liters.to_string(),
                    row.unit_price.to_string(),
                    row.total_amount.to_string(),
                    if row.is_paid { "Yes" } else { "No" }.to_string(),
                    row.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "sales_history")
    }

    #[instrument(skip(self))]
    pub async fn payments(&self) -> Result<ExportFile, ServiceError> {
        let rows = payment::Entity::find()
            .find_also_related(customer::Entity)
            .order_by_asc(payment::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "Date",
                "Customer Name",
                "Amount Received",
                "Description",
                "Logged At",
            ])
            .map_err(csv_error)?;
        for (row, payer) in rows {
            writer
                .write_record([
                    row.date.to_string(),
                    payer.map(|c| c.name).unwrap_or_default(),
                    row.amount_received.to_string(),
                    row.description.unwrap_or_default(),
                    row.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "payments_history")
    }

    #[instrument(skip(self))]
    pub async fn expenses(&self) -> Result<ExportFile, ServiceError> {
        let rows = expense::Entity::find()
            .order_by_asc(expense::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record(["Date", "Category", "Amount", "Description", "Logged At"])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([
                    row.date.to_string(),
                    row.category,
                    row.amount.to_string(),
                    row.description.unwrap_or_default(),
                    row.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "expenses_history")
    }

    #[instrument(skip(self))]
    pub async fn vaccinations(&self) -> Result<ExportFile, ServiceError> {
        let rows = crate::entities::vaccination::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_asc(crate::entities::vaccination::Column::AdministeredOn)
            .all(self.db.as_ref())
            .await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "Cow Name",
                "Cow ID",
                "Vaccine Name",
                "Vaccination Date",
                "Next Due Date",
                "Status",
                "Notes",
                "Logged At",
            ])
            .map_err(csv_error)?;
        for (shot, owner) in rows {
            let (name, tag) = cow_label(owner);
            writer
                .write_record([
                    name,
                    tag,
                    shot.vaccine_name,
                    shot.administered_on.to_string(),
                    shot.next_due_on
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                    match shot.status {
                        VaccinationStatus::Pending => "Pending".to_string(),
                        VaccinationStatus::Completed => "Completed".to_string(),
                    },
                    shot.notes.unwrap_or_default(),
                    shot.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ])
                .map_err(csv_error)?;
        }
        finish(writer, "vaccinations")
    }
}

fn cow_label(owner: Option<cow::Model>) -> (String, String) {
    match owner {
        Some(cow) => (cow.name, cow.tag),
        None => (String::new(), String::new()),
    }
}

fn csv_error(err: csv::Error) -> ServiceError {
    ServiceError::InternalError(format!("CSV serialization failed: {}", err))
}

fn finish(writer: csv::Writer<Vec<u8>>, stem: &str) -> Result<ExportFile, ServiceError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::InternalError(format!("CSV flush failed: {}", e)))?;
    Ok(ExportFile {
        filename: export_filename(stem, Utc::now().date_naive()),
        bytes,
    })
}

fn export_filename(stem: &str, on: NaiveDate) -> String {
    format!("{}_{}.csv", stem, on.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_carry_the_export_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_filename("sales_history", date),
            "sales_history_20240309.csv"
        );
    }
}
