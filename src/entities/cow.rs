use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an animal in the herd
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum CowStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Sold")]
    Sold,
    #[sea_orm(string_value = "Deceased")]
    Deceased,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// External herd tag, unique across the farm (ear tag or registry code)
    #[sea_orm(unique)]
    pub tag: String,

    pub name: String,

    pub breed: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    pub is_pregnant: bool,

    /// Expected calving date, only meaningful while `is_pregnant` is set
    pub expected_calving_date: Option<NaiveDate>,

    pub status: CowStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::milk_production::Entity")]
    MilkProductions,
    #[sea_orm(has_many = "super::health_record::Entity")]
    HealthRecords,
    #[sea_orm(has_many = "super::vaccination::Entity")]
    Vaccinations,
}

impl Related<super::milk_production::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MilkProductions.def()
    }
}

impl Related<super::health_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HealthRecords.def()
    }
}

impl Related<super::vaccination::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vaccinations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == CowStatus::Active
    }
}
