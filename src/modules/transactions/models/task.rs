use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{validation, Result};

/// A to-do item on a transaction
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionTask {
    pub id: i64,
    pub transaction_id: i64,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub sort_order: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub sort_order: u16,
}

impl TaskInput {
    pub fn validate(mut self) -> Result<Self> {
        self.description = validation::required("description", &self.description, 255)?;
        Ok(self)
    }
}
