use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::parse_stored;
use crate::core::csv_io::{cell, Columns, ImportRow};
use crate::core::{validation, Result};
use crate::modules::notes::Note;

crate::choice_enum! {
    pub enum ContactType {
        Vendor => ("vendor", "Vendor"),
        Lender => ("lender", "Lender"),
        Agent => ("agent", "Agent"),
        TitleCompany => ("title_company", "Title Company"),
        Inspector => ("inspector", "Inspector"),
        Attorney => ("attorney", "Attorney"),
        Other => ("other", "Other"),
    }
    default Other
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub contact_type: ContactType,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const EXPORT_COLUMNS: Columns = &[
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("contact_type", "Contact Type"),
    ("company", "Company"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("zip_code", "Zip Code"),
    ("notes", "Notes"),
];

impl Contact {
    pub fn export_row(&self) -> Vec<String> {
        vec![
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
            cell(&self.phone),
            cell(self.contact_type.as_str()),
            cell(&self.company),
            cell(&self.address),
            cell(&self.city),
            cell(&self.state),
            cell(&self.zip_code),
            cell(&self.notes),
        ]
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub contact_type: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            full_name: format!("{} {}", row.first_name, row.last_name),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            contact_type: parse_stored("contacts.contact_type", &row.contact_type),
            company: row.company,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_type: ContactType,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub contact_type: ContactType,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub notes: String,
}

impl ContactInput {
    pub fn validate(self) -> Result<ContactChanges> {
        Ok(ContactChanges {
            first_name: validation::required("first_name", &self.first_name, 100)?,
            last_name: validation::required("last_name", &self.last_name, 100)?,
            email: validation::optional_email("email", self.email.as_deref())?,
            phone: validation::optional("phone", self.phone.as_deref(), 20)?,
            contact_type: self.contact_type,
            company: validation::optional("company", self.company.as_deref(), 200)?,
            address: validation::optional("address", self.address.as_deref(), 2_000)?,
            city: validation::optional("city", self.city.as_deref(), 100)?,
            state: validation::optional("state", self.state.as_deref(), 50)?,
            zip_code: validation::optional("zip_code", self.zip_code.as_deref(), 10)?,
            notes: validation::optional("notes", self.notes.as_deref(), 10_000)?,
        })
    }
}

impl ContactInput {
    pub fn from_import_row(row: &ImportRow) -> Result<Self> {
        Ok(Self {
            first_name: row.text("first_name").unwrap_or_default(),
            last_name: row.text("last_name").unwrap_or_default(),
            email: row.text("email"),
            phone: row.text("phone"),
            contact_type: row
                .choice("contact_type", ContactType::from_code_or_label)?
                .unwrap_or_default(),
            company: row.text("company"),
            address: row.text("address"),
            city: row.text("city"),
            state: row.text("state"),
            zip_code: row.text("zip_code"),
            notes: row.text("notes"),
        })
    }
}

pub fn parse_import(row: &ImportRow) -> Result<ContactChanges> {
    ContactInput::from_import_row(row)?.validate()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListQuery {
    pub q: Option<String>,
    pub contact_type: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub note_history: Vec<Note>,
}
