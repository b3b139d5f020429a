use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::parse_stored;
use crate::core::{validation, Result};

crate::choice_enum! {
    pub enum MilestoneKind {
        Listing => ("listing", "Listing"),
        ContractAgreement => ("contract_agreement", "Contract Agreement"),
        Offer => ("offer", "Offer"),
        OfferExpiration => ("offer_expiration", "Offer Expiration"),
        ExpirationReminder => ("expiration_reminder", "Expiration Reminder"),
        Inspection => ("inspection", "Inspection"),
        Appraisal => ("appraisal", "Appraisal"),
        Closing => ("closing", "Closing"),
        Expiration => ("expiration", "Expiration"),
        Other => ("other", "Other"),
    }
    default Other
}

crate::choice_enum! {
    pub enum MilestoneStatus {
        Pending => ("pending", "Pending"),
        Completed => ("completed", "Completed"),
        Overdue => ("overdue", "Overdue"),
    }
    default Pending
}

/// A key date in the deal (inspection, closing, ...)
#[derive(Debug, Clone, Serialize)]
pub struct TransactionMilestone {
    pub id: i64,
    pub transaction_id: i64,
    pub kind: MilestoneKind,
    pub label: String,
    /// `label` when set, otherwise the kind's label
    pub display_label: String,
    pub date: NaiveDate,
    pub status: MilestoneStatus,
    pub is_critical: bool,
    pub sort_order: u16,
}

#[derive(Debug, Clone, FromRow)]
pub struct TransactionMilestoneRow {
    pub id: i64,
    pub transaction_id: i64,
    pub kind: String,
    pub label: String,
    pub date: NaiveDate,
    pub status: String,
    pub is_critical: bool,
    pub sort_order: u16,
}

impl From<TransactionMilestoneRow> for TransactionMilestone {
    fn from(row: TransactionMilestoneRow) -> Self {
        let kind: MilestoneKind = parse_stored("transaction_milestones.kind", &row.kind);
        let display_label = if row.label.is_empty() {
            kind.label().to_string()
        } else {
            row.label.clone()
        };

        Self {
            id: row.id,
            transaction_id: row.transaction_id,
            kind,
            label: row.label,
            display_label,
            date: row.date,
            status: parse_stored("transaction_milestones.status", &row.status),
            is_critical: row.is_critical,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneInput {
    #[serde(default)]
    pub kind: MilestoneKind,
    pub label: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub sort_order: u16,
}

impl MilestoneInput {
    /// Trims and bounds the label; returns the cleaned input
    pub fn validate(mut self) -> Result<Self> {
        self.label = Some(validation::optional("label", self.label.as_deref(), 100)?);
        Ok(self)
    }
}
