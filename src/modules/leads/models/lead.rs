use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::{parse_stored, parse_stored_optional};
use crate::core::csv_io::{cell, optional_cell, Columns, ImportRow};
use crate::core::{validation, Result};
use crate::modules::clients::models::{ClientChanges, ClientStatus, ClientType};
use crate::modules::notes::Note;

crate::choice_enum! {
    /// Where a lead came from
    pub enum LeadReferral {
        OfficeLead => ("office_lead", "Office Lead"),
        Facebook => ("facebook", "Facebook"),
        Instagram => ("instagram", "Instagram"),
        Telephone => ("telephone", "Telephone"),
        Postcard => ("postcard", "Postcard"),
        OpenHouse => ("open_house", "Open House"),
        WalkIn => ("walk_in", "Walk-in"),
        Website => ("website", "Website"),
        Email => ("email", "Email"),
        Phone => ("phone", "Phone"),
        Text => ("text", "Text"),
        Other => ("other", "Other"),
    }
}

crate::choice_enum! {
    pub enum LeadStatus {
        New => ("new", "New"),
        Attempted => ("attempted", "Attempted"),
        InProgress => ("in_progress", "In Progress"),
        Connected => ("connected", "Connected"),
        Unqualified => ("unqualified", "Unqualified"),
        BadTiming => ("bad_timing", "Bad Timing"),
    }
    default New
}

#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub referral: Option<LeadReferral>,
    pub status: LeadStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
    pub converted_to_client_id: Option<i64>,
    pub is_converted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Client record a conversion creates from this lead
    pub fn to_client_changes(&self) -> ClientChanges {
        ClientChanges {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            spouse_first_name: String::new(),
            spouse_last_name: String::new(),
            spouse_email: String::new(),
            spouse_phone: String::new(),
            client_type: ClientType::Buyer,
            status: ClientStatus::Potential,
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            budget_min: None,
            budget_max: None,
            notes: self.notes.clone(),
        }
    }
}

pub const EXPORT_COLUMNS: Columns = &[
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("referral", "Referral"),
    ("status", "Status"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("zip_code", "Zip Code"),
    ("notes", "Notes"),
];

impl Lead {
    /// Cells in `EXPORT_COLUMNS` order
    pub fn export_row(&self) -> Vec<String> {
        vec![
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
            cell(&self.phone),
            optional_cell(self.referral),
            cell(self.status.as_str()),
            cell(&self.address),
            cell(&self.city),
            cell(&self.state),
            cell(&self.zip_code),
            cell(&self.notes),
        ]
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub referral: String,
    pub status: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
    pub converted_to_client_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Self {
            id: row.id,
            full_name: format!("{} {}", row.first_name, row.last_name),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            referral: parse_stored_optional("leads.referral", &row.referral),
            status: parse_stored("leads.status", &row.status),
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            notes: row.notes,
            is_converted: row.converted_to_client_id.is_some(),
            converted_to_client_id: row.converted_to_client_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referral: Option<LeadReferral>,
    #[serde(default)]
    pub status: LeadStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeadChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub referral: Option<LeadReferral>,
    pub status: LeadStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
}

impl LeadChanges {
    /// Stored code; blank when no referral source
    pub fn referral_code(&self) -> &'static str {
        self.referral.map(|r| r.as_str()).unwrap_or("")
    }
}

impl LeadInput {
    pub fn validate(self) -> Result<LeadChanges> {
        Ok(LeadChanges {
            first_name: validation::required("first_name", &self.first_name, 100)?,
            last_name: validation::required("last_name", &self.last_name, 100)?,
            email: validation::optional_email("email", self.email.as_deref())?,
            phone: validation::optional("phone", self.phone.as_deref(), 20)?,
            referral: self.referral,
            status: self.status,
            address: validation::optional("address", self.address.as_deref(), 2_000)?,
            city: validation::optional("city", self.city.as_deref(), 100)?,
            state: validation::optional("state", self.state.as_deref(), 50)?,
            zip_code: validation::optional("zip_code", self.zip_code.as_deref(), 10)?,
            notes: validation::optional("notes", self.notes.as_deref(), 10_000)?,
        })
    }
}

impl LeadInput {
    pub fn from_import_row(row: &ImportRow) -> Result<Self> {
        Ok(Self {
            first_name: row.text("first_name").unwrap_or_default(),
            last_name: row.text("last_name").unwrap_or_default(),
            email: row.text("email"),
            phone: row.text("phone"),
            referral: row.choice("referral", LeadReferral::from_code_or_label)?,
            status: row
                .choice("status", LeadStatus::from_code_or_label)?
                .unwrap_or_default(),
            address: row.text("address"),
            city: row.text("city"),
            state: row.text("state"),
            zip_code: row.text("zip_code"),
            notes: row.text("notes"),
        })
    }
}

/// Imported rows go through the same checks as the JSON form
pub fn parse_import(row: &ImportRow) -> Result<LeadChanges> {
    LeadInput::from_import_row(row)?.validate()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub referral: Option<String>,
    /// Include converted leads; `1`, `true`, `on` or `yes`
    pub show_all: Option<String>,
    pub page: Option<u32>,
}

impl LeadListQuery {
    pub fn show_all(&self) -> bool {
        matches!(
            self.show_all.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("1" | "true" | "on" | "yes")
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadDetail {
    #[serde(flatten)]
    pub lead: Lead,
    pub note_history: Vec<Note>,
}
