use crate::db::DbPool;
use crate::entities::{customer, expense, sale};
use crate::errors::ServiceError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// One line in the merged profit/loss transaction view.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionEntry {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Customer name for sales, expense category for expenses
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Sale,
    Expense,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
    /// Matching sales and expenses merged, date descending
    pub transactions: Vec<TransactionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_cows: u64,
    pub active_cows: u64,
    pub today_milk_total: Decimal,
    /// Sum of positive customer balances
    pub total_receivable: Decimal,
    pub recent_sales: Vec<sale::Model>,
    pub recent_expenses: Vec<expense::Model>,
}

#[derive(Clone)]
pub struct ReportService {
    db: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Income and expenses over an inclusive date window; either bound
    /// may be absent, leaving that side unbounded.
    #[instrument(skip(self))]
    pub async fn profit_loss(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ProfitLossReport, ServiceError> {
        let mut sales_query = sale::Entity::find().find_also_related(customer::Entity);
        if let Some(start) = start_date {
            sales_query = sales_query.filter(sale::Column::Date.gte(start));
        }
        if let Some(end) = end_date {
            sales_query = sales_query.filter(sale::Column::Date.lte(end));
        }
        let sales = sales_query
            .order_by_desc(sale::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let mut expense_query = expense::Entity::find();
        if let Some(start) = start_date {
            expense_query = expense_query.filter(expense::Column::Date.gte(start));
        }
        if let Some(end) = end_date {
            expense_query = expense_query.filter(expense::Column::Date.lte(end));
        }
        let expenses = expense_query
            .order_by_desc(expense::Column::Date)
            .all(self.db.as_ref())
            .await?;

        let total_income: Decimal = sales.iter().map(|(s, _)| s.total_amount).sum();
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

        let mut transactions: Vec<TransactionEntry> = sales
            .into_iter()
            .map(|(s, c)| TransactionEntry {
                date: s.date,
                kind: TransactionKind::Sale,
                label: c.map(|c| c.name).unwrap_or_default(),
                amount: s.total_amount,
            })
            .chain(expenses.into_iter().map(|e| TransactionEntry {
                date: e.date,
                kind: TransactionKind::Expense,
                label: e.category,
                amount: e.amount,
            }))
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(ProfitLossReport {
            start_date,
            end_date,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            transactions,
        })
    }

    /// Customers who currently owe the farm, ordered by name. Trusts
    /// the stored balance column; the ledger keeps it honest.
    pub async fn receivables(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let rows = customer::Entity::find()
            .filter(customer::Column::Balance.gt(Decimal::ZERO))
            .order_by_asc(customer::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// The landing-page summary figures.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary, ServiceError> {
        use sea_orm::PaginatorTrait;

        let total_cows = crate::entities::cow::Entity::find()
            .count(self.db.as_ref())
            .await?;
        let active_cows = crate::entities::cow::Entity::find()
            .filter(crate::entities::cow::Column::Status.eq(crate::entities::cow::CowStatus::Active))
            .count(self.db.as_ref())
            .await?;

        let today_milk_total: Decimal = crate::entities::milk_production::Entity::find()
            .filter(crate::entities::milk_production::Column::Date.eq(today))
            .all(self.db.as_ref())
            .await?
            .iter()
            .map(|log| log.total())
            .sum();

        let total_receivable: Decimal = self
            .receivables()
            .await?
            .iter()
            .map(|c| c.balance)
            .sum();

        let recent_sales = sale::Entity::find()
            .order_by_desc(sale::Column::RecordedAt)
            .limit(5)
            .all(self.db.as_ref())
            .await?;
        let recent_expenses = expense::Entity::find()
            .order_by_desc(expense::Column::RecordedAt)
            .limit(5)
            .all(self.db.as_ref())
            .await?;

        Ok(DashboardSummary {
            total_cows,
            active_cows,
            today_milk_total,
            total_receivable,
            recent_sales,
            recent_expenses,
        })
    }
}
