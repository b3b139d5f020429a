// Real estate transaction: one deal on one property.
//
// Tenancy is inherited from the property; a transaction has no user column.
// GCI is derived, never stored.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::parse_stored;
use crate::core::{validation, AppError, Result};
use crate::modules::transactions::services::commission_calculator;

/// Deal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "active")]
    Active,

    #[serde(rename = "pending")]
    Pending,

    #[serde(rename = "under_contract")]
    UnderContract,

    /// Only closed deals earn commission
    #[serde(rename = "closed")]
    Closed,

    #[serde(rename = "canceled")]
    Canceled,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Active
    }
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Active => "active",
            TransactionStatus::Pending => "pending",
            TransactionStatus::UnderContract => "under_contract",
            TransactionStatus::Closed => "closed",
            TransactionStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(TransactionStatus::Active),
            "pending" => Ok(TransactionStatus::Pending),
            "under_contract" => Ok(TransactionStatus::UnderContract),
            "closed" => Ok(TransactionStatus::Closed),
            "canceled" => Ok(TransactionStatus::Canceled),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// The agent's role in the deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Representation {
    #[serde(rename = "buyer")]
    Buyer,

    #[serde(rename = "seller")]
    Seller,

    #[serde(rename = "dual")]
    Dual,
}

impl Default for Representation {
    fn default() -> Self {
        Representation::Buyer
    }
}

impl Representation {
    pub const ALL: [Representation; 3] = [
        Representation::Buyer,
        Representation::Seller,
        Representation::Dual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Buyer => "buyer",
            Representation::Seller => "seller",
            Representation::Dual => "dual",
        }
    }

    /// Role a stored value is aggregated under.
    ///
    /// Values outside buyer/seller/dual are counted as buyer so that every
    /// closed deal lands in exactly one role.
    pub fn bucket_for(stored: &str) -> Representation {
        stored.parse().unwrap_or(Representation::Buyer)
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Representation::Buyer),
            "seller" => Ok(Representation::Seller),
            "dual" => Ok(Representation::Dual),
            _ => Err(format!("Invalid representation: {}", s)),
        }
    }
}

/// A transaction as stored.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub property_id: i64,
    pub status: TransactionStatus,
    /// Stored code; may be a legacy value outside [`Representation`]
    pub representation: String,
    /// Agreed commission in percent (5.00 means 5%)
    pub commission_percentage: Option<Decimal>,
    pub final_sales_price: Option<Decimal>,
    pub file_number: String,
    pub lockbox_code: String,
    pub showing_instructions: String,
    pub listing_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every edit; dashboard months are keyed on this
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Gross Commission Income; `None` unless closed with both price fields set.
    pub fn gci(&self) -> Option<Decimal> {
        commission_calculator::gross_commission_income(
            self.status,
            self.commission_percentage,
            self.final_sales_price,
        )
    }

    /// Role used for dashboard aggregation
    pub fn role(&self) -> Representation {
        Representation::bucket_for(&self.representation)
    }

    pub fn is_closed(&self) -> bool {
        self.status == TransactionStatus::Closed
    }
}

/// Raw row; status is text so legacy codes can be read
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: i64,
    pub property_id: i64,
    pub status: String,
    pub representation: String,
    pub commission_percentage: Option<Decimal>,
    pub final_sales_price: Option<Decimal>,
    pub file_number: String,
    pub lockbox_code: String,
    pub showing_instructions: String,
    pub listing_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            status: parse_stored("transactions.status", &row.status),
            representation: row.representation,
            commission_percentage: row.commission_percentage,
            final_sales_price: row.final_sales_price,
            file_number: row.file_number,
            lockbox_code: row.lockbox_code,
            showing_instructions: row.showing_instructions,
            listing_date: row.listing_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create / update payload
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInput {
    pub property_id: i64,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub representation: Representation,
    pub commission_percentage: Option<Decimal>,
    pub final_sales_price: Option<Decimal>,
    pub file_number: Option<String>,
    pub lockbox_code: Option<String>,
    pub showing_instructions: Option<String>,
    pub listing_date: Option<NaiveDate>,
}

/// Validated payload ready for the repository
#[derive(Debug, Clone)]
pub struct TransactionChanges {
    pub property_id: i64,
    pub status: TransactionStatus,
    pub representation: Representation,
    pub commission_percentage: Option<Decimal>,
    pub final_sales_price: Option<Decimal>,
    pub file_number: String,
    pub lockbox_code: String,
    pub showing_instructions: String,
    pub listing_date: Option<NaiveDate>,
}

impl TransactionInput {
    pub fn validate(self) -> Result<TransactionChanges> {
        if let Some(pct) = self.commission_percentage {
            commission_calculator::validate_commission_percentage(pct)?;
        }
        if let Some(price) = self.final_sales_price {
            commission_calculator::validate_sales_price(price)?;
        }
        if self.property_id <= 0 {
            return Err(AppError::validation("property_id is required"));
        }

        Ok(TransactionChanges {
            property_id: self.property_id,
            status: self.status,
            representation: self.representation,
            commission_percentage: self.commission_percentage,
            final_sales_price: self.final_sales_price,
            file_number: validation::optional("file_number", self.file_number.as_deref(), 50)?,
            lockbox_code: validation::optional(
                "lockbox_code",
                self.lockbox_code.as_deref(),
                50,
            )?,
            showing_instructions: validation::optional(
                "showing_instructions",
                self.showing_instructions.as_deref(),
                10_000,
            )?,
            listing_date: self.listing_date,
        })
    }
}

/// List filters for GET /transactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub representation: Option<String>,
    pub page: Option<u32>,
}

/// List row: transaction plus the property it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub property_title: String,
    pub property_address: String,
    pub gci: Option<Decimal>,
}
