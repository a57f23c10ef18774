use crate::db::DbPool;
use crate::entities::cow::{self, CowStatus};
use crate::entities::vaccination::{self, VaccinationStatus};
use crate::errors::ServiceError;
use chrono::{Duration, NaiveDate};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, Serialize)]
pub struct VaccinationReminder {
    pub vaccination_id: i32,
    pub cow_id: i32,
    pub cow_name: String,
    pub cow_tag: String,
    pub vaccine_name: String,
    pub due_on: NaiveDate,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalvingReminder {
    pub cow_id: i32,
    pub cow_name: String,
    pub cow_tag: String,
    pub due_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reminders {
    pub vaccinations: Vec<VaccinationReminder>,
    pub calvings: Vec<CalvingReminder>,
}

/// Scans upcoming due dates. A pure read: nothing here mutates state.
#[derive(Clone)]
pub struct ReminderService {
    db: Arc<DbPool>,
    vaccination_window_days: i64,
    calving_window_days: i64,
}

impl ReminderService {
    pub fn new(db: Arc<DbPool>, vaccination_window_days: i64, calving_window_days: i64) -> Self {
        Self {
            db,
            vaccination_window_days,
            calving_window_days,
        }
    }

    /// Everything due on or before `today + window`, including overdue
    /// vaccinations from before `today`. Both lists ascend by due date.
    /// `today` is a parameter so the scan is deterministic under test.
    #[instrument(skip(self))]
    pub async fn upcoming(&self, today: NaiveDate) -> Result<Reminders, ServiceError> {
        let vaccination_horizon = today + Duration::days(self.vaccination_window_days);
        let calving_horizon = today + Duration::days(self.calving_window_days);

        let due_shots = vaccination::Entity::find()
            .find_also_related(cow::Entity)
            .filter(vaccination::Column::Status.ne(VaccinationStatus::Completed))
            .filter(vaccination::Column::NextDueOn.is_not_null())
            .filter(vaccination::Column::NextDueOn.lte(vaccination_horizon))
            .order_by_asc(vaccination::Column::NextDueOn)
            .all(self.db.as_ref())
            .await?;

        let vaccinations = due_shots
            .into_iter()
            .filter_map(|(shot, owner)| {
                let due_on = shot.next_due_on?;
                let owner = owner?;
                Some(VaccinationReminder {
                    vaccination_id: shot.id,
                    cow_id: owner.id,
                    cow_name: owner.name,
                    cow_tag: owner.tag,
                    vaccine_name: shot.vaccine_name,
                    due_on,
                    overdue: due_on < today,
                })
            })
            .collect();

        let expecting = cow::Entity::find()
            .filter(cow::Column::IsPregnant.eq(true))
            .filter(cow::Column::Status.eq(CowStatus::Active))
            .filter(cow::Column::ExpectedCalvingDate.is_not_null())
            .filter(cow::Column::ExpectedCalvingDate.gte(today))
            .filter(cow::Column::ExpectedCalvingDate.lte(calving_horizon))
            .order_by_asc(cow::Column::ExpectedCalvingDate)
            .all(self.db.as_ref())
            .await?;

        let calvings = expecting
            .into_iter()
            .filter_map(|cow| {
                Some(CalvingReminder {
                    due_on: cow.expected_calving_date?,
                    cow_id: cow.id,
                    cow_name: cow.name,
                    cow_tag: cow.tag,
                })
            })
            .collect();

        Ok(Reminders {
            vaccinations,
            calvings,
        })
    }
}
