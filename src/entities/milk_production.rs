use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One milking log for a cow. A cow may have several logs on the same
/// date; nothing deduplicates them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milk_productions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub cow_id: i32,

    pub date: NaiveDate,

    /// Morning yield in liters
    pub morning_qty: Decimal,

    /// Evening yield in liters
    pub evening_qty: Decimal,

    /// When the log was entered
    pub recorded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cow::Entity",
        from = "Column::CowId",
        to = "super::cow::Column::Id"
    )]
    Cow,
}

impl Related<super::cow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Total daily yield, derived from the two milkings
    pub fn total(&self) -> Decimal {
        self.morning_qty + self.evening_qty
    }
}
