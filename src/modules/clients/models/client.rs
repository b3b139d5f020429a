use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::parse_stored;
use crate::core::csv_io::{cell, optional_cell, Columns, ImportRow};
use crate::core::{money, validation, AppError, Result};
use crate::modules::notes::Note;

crate::choice_enum! {
    pub enum ClientType {
        Buyer => ("buyer", "Buyer"),
        Seller => ("seller", "Seller"),
        Both => ("both", "Buyer & Seller"),
    }
    default Buyer
}

crate::choice_enum! {
    pub enum ClientStatus {
        Potential => ("potential", "Potential"),
        Active => ("active", "Active"),
        Closed => ("closed", "Closed"),
        Lost => ("lost", "Lost"),
        Inactive => ("inactive", "Inactive"),
    }
    default Potential
}

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub spouse_first_name: String,
    pub spouse_last_name: String,
    /// Empty when no spouse name is recorded
    pub spouse_full_name: String,
    pub spouse_email: String,
    pub spouse_phone: String,
    pub client_type: ClientType,
    pub status: ClientStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const EXPORT_COLUMNS: Columns = &[
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("spouse_first_name", "Spouse First Name"),
    ("spouse_last_name", "Spouse Last Name"),
    ("spouse_email", "Spouse Email"),
    ("spouse_phone", "Spouse Phone"),
    ("client_type", "Client Type"),
    ("status", "Status"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("zip_code", "Zip Code"),
    ("budget_min", "Budget Min"),
    ("budget_max", "Budget Max"),
    ("notes", "Notes"),
];

impl Client {
    pub fn export_row(&self) -> Vec<String> {
        vec![
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
            cell(&self.phone),
            cell(&self.spouse_first_name),
            cell(&self.spouse_last_name),
            cell(&self.spouse_email),
            cell(&self.spouse_phone),
            cell(self.client_type.as_str()),
            cell(self.status.as_str()),
            cell(&self.address),
            cell(&self.city),
            cell(&self.state),
            cell(&self.zip_code),
            optional_cell(self.budget_min),
            optional_cell(self.budget_max),
            cell(&self.notes),
        ]
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub spouse_first_name: String,
    pub spouse_last_name: String,
    pub spouse_email: String,
    pub spouse_phone: String,
    pub client_type: String,
    pub status: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        let full_name = format!("{} {}", row.first_name, row.last_name);
        let spouse_full_name = format!("{} {}", row.spouse_first_name, row.spouse_last_name)
            .trim()
            .to_string();

        Self {
            id: row.id,
            full_name,
            spouse_full_name,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            spouse_first_name: row.spouse_first_name,
            spouse_last_name: row.spouse_last_name,
            spouse_email: row.spouse_email,
            spouse_phone: row.spouse_phone,
            client_type: parse_stored("clients.client_type", &row.client_type),
            status: parse_stored("clients.status", &row.status),
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            budget_min: row.budget_min,
            budget_max: row.budget_max,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create / update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub spouse_first_name: Option<String>,
    pub spouse_last_name: Option<String>,
    pub spouse_email: Option<String>,
    pub spouse_phone: Option<String>,
    #[serde(default)]
    pub client_type: ClientType,
    #[serde(default)]
    pub status: ClientStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub spouse_first_name: String,
    pub spouse_last_name: String,
    pub spouse_email: String,
    pub spouse_phone: String,
    pub client_type: ClientType,
    pub status: ClientStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub notes: String,
}

impl ClientInput {
    pub fn validate(self) -> Result<ClientChanges> {
        money::validate_non_negative("budget_min", self.budget_min).map_err(AppError::Validation)?;
        money::validate_non_negative("budget_max", self.budget_max).map_err(AppError::Validation)?;
        if let (Some(min), Some(max)) = (self.budget_min, self.budget_max) {
            if min > max {
                return Err(AppError::validation(
                    "budget_min cannot exceed budget_max",
                ));
            }
        }

        Ok(ClientChanges {
            first_name: validation::required("first_name", &self.first_name, 100)?,
            last_name: validation::required("last_name", &self.last_name, 100)?,
            email: validation::optional_email("email", self.email.as_deref())?,
            phone: validation::optional("phone", self.phone.as_deref(), 20)?,
            spouse_first_name: validation::optional(
                "spouse_first_name",
                self.spouse_first_name.as_deref(),
                100,
            )?,
            spouse_last_name: validation::optional(
                "spouse_last_name",
                self.spouse_last_name.as_deref(),
                100,
            )?,
            spouse_email: validation::optional_email("spouse_email", self.spouse_email.as_deref())?,
            spouse_phone: validation::optional("spouse_phone", self.spouse_phone.as_deref(), 20)?,
            client_type: self.client_type,
            status: self.status,
            address: validation::optional("address", self.address.as_deref(), 2_000)?,
            city: validation::optional("city", self.city.as_deref(), 100)?,
            state: validation::optional("state", self.state.as_deref(), 50)?,
            zip_code: validation::optional("zip_code", self.zip_code.as_deref(), 10)?,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            notes: validation::optional("notes", self.notes.as_deref(), 10_000)?,
        })
    }
}

impl ClientInput {
    pub fn from_import_row(row: &ImportRow) -> Result<Self> {
        Ok(Self {
            first_name: row.text("first_name").unwrap_or_default(),
            last_name: row.text("last_name").unwrap_or_default(),
            email: row.text("email"),
            phone: row.text("phone"),
            spouse_first_name: row.text("spouse_first_name"),
            spouse_last_name: row.text("spouse_last_name"),
            spouse_email: row.text("spouse_email"),
            spouse_phone: row.text("spouse_phone"),
            client_type: row
                .choice("client_type", ClientType::from_code_or_label)?
                .unwrap_or_default(),
            status: row
                .choice("status", ClientStatus::from_code_or_label)?
                .unwrap_or_default(),
            address: row.text("address"),
            city: row.text("city"),
            state: row.text("state"),
            zip_code: row.text("zip_code"),
            budget_min: row.decimal("budget_min"),
            budget_max: row.decimal("budget_max"),
            notes: row.text("notes"),
        })
    }
}

pub fn parse_import(row: &ImportRow) -> Result<ClientChanges> {
    ClientInput::from_import_row(row)?.validate()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientListQuery {
    pub q: Option<String>,
    pub client_type: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub note_history: Vec<Note>,
}
