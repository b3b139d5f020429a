use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::{parse_stored, parse_stored_optional};
use crate::core::csv_io::{cell, flag_cell, optional_cell, Columns, ImportRow};
use crate::core::{money, validation, AppError, Result};
use crate::modules::notes::Note;

crate::choice_enum! {
    pub enum PropertyType {
        Apartment => ("apartment", "Apartment"),
        Commercial => ("commercial", "Commercial"),
        Condo => ("condo", "Condo"),
        Duplex => ("duplex", "Duplex"),
        Fourplex => ("fourplex", "Fourplex"),
        Land => ("land", "Land"),
        MobileHome => ("mobile_home", "Mobile Home"),
        SingleFamily => ("single_family", "Single Family"),
        Townhouse => ("townhouse", "Townhouse"),
        Triplex => ("triplex", "Triplex"),
    }
    default SingleFamily
}

crate::choice_enum! {
    pub enum PropertyStatus {
        Available => ("available", "Available"),
        UnderContract => ("under_contract", "Under Contract"),
        Sold => ("sold", "Sold"),
        OffMarket => ("off_market", "Off Market"),
    }
    default Available
}

crate::choice_enum! {
    pub enum MlsService {
        Bareis => ("bareis", "BAREIS"),
        Paragon => ("paragon", "Paragon"),
        Matrix => ("matrix", "Matrix"),
        MlsListings => ("mlslistings", "MLSListings"),
        Redfin => ("redfin", "Redfin"),
        Zillow => ("zillow", "Zillow"),
        Realtor => ("realtor", "Realtor.com"),
        Other => ("other", "Other"),
    }
}

/// Shown in place of a missing price
pub const NO_PRICE: &str = "—";

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Option<Decimal>,
    pub formatted_price: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<Decimal>,
    pub square_feet: Option<u32>,
    pub lot_size: Option<Decimal>,
    pub year_built: Option<u32>,
    pub mls_number: String,
    pub mls_service: Option<MlsService>,
    pub mls_url: String,
    pub description: String,
    pub features: String,
    pub owner_client_id: Option<i64>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `$1,250,000`, or a dash when no price is recorded
pub fn formatted_price(price: Option<Decimal>) -> String {
    price
        .map(money::format_usd_whole)
        .unwrap_or_else(|| NO_PRICE.to_string())
}

pub const EXPORT_COLUMNS: Columns = &[
    ("title", "Title"),
    ("property_type", "Property Type"),
    ("status", "Status"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("zip_code", "Zip Code"),
    ("price", "Price"),
    ("bedrooms", "Bedrooms"),
    ("bathrooms", "Bathrooms"),
    ("square_feet", "Square Feet"),
    ("lot_size", "Lot Size"),
    ("year_built", "Year Built"),
    ("mls_number", "MLS Number"),
    ("mls_service", "MLS Service"),
    ("mls_url", "MLS URL"),
    ("description", "Description"),
    ("features", "Features"),
    ("featured", "Featured"),
];

impl Property {
    /// Raw price rather than `formatted_price`, so the file re-imports cleanly
    pub fn export_row(&self) -> Vec<String> {
        vec![
            cell(&self.title),
            cell(self.property_type.as_str()),
            cell(self.status.as_str()),
            cell(&self.address),
            cell(&self.city),
            cell(&self.state),
            cell(&self.zip_code),
            optional_cell(self.price),
            optional_cell(self.bedrooms),
            optional_cell(self.bathrooms),
            optional_cell(self.square_feet),
            optional_cell(self.lot_size),
            optional_cell(self.year_built),
            cell(&self.mls_number),
            optional_cell(self.mls_service),
            cell(&self.mls_url),
            cell(&self.description),
            cell(&self.features),
            flag_cell(self.featured),
        ]
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: i64,
    pub title: String,
    pub property_type: String,
    pub status: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Option<Decimal>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<Decimal>,
    pub square_feet: Option<u32>,
    pub lot_size: Option<Decimal>,
    pub year_built: Option<u32>,
    pub mls_number: String,
    pub mls_service: String,
    pub mls_url: String,
    pub description: String,
    pub features: String,
    pub owner_client_id: Option<i64>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            property_type: parse_stored("properties.property_type", &row.property_type),
            status: parse_stored("properties.status", &row.status),
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            formatted_price: formatted_price(row.price),
            price: row.price,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            square_feet: row.square_feet,
            lot_size: row.lot_size,
            year_built: row.year_built,
            mls_number: row.mls_number,
            mls_service: parse_stored_optional("properties.mls_service", &row.mls_service),
            mls_url: row.mls_url,
            description: row.description,
            features: row.features,
            owner_client_id: row.owner_client_id,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyInput {
    pub title: String,
    pub property_type: PropertyType,
    #[serde(default)]
    pub status: PropertyStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Option<Decimal>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<Decimal>,
    pub square_feet: Option<u32>,
    pub lot_size: Option<Decimal>,
    pub year_built: Option<u32>,
    pub mls_number: Option<String>,
    pub mls_service: Option<MlsService>,
    pub mls_url: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub owner_client_id: Option<i64>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanges {
    pub title: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Option<Decimal>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<Decimal>,
    pub square_feet: Option<u32>,
    pub lot_size: Option<Decimal>,
    pub year_built: Option<u32>,
    pub mls_number: String,
    pub mls_service: Option<MlsService>,
    pub mls_url: String,
    pub description: String,
    pub features: String,
    pub owner_client_id: Option<i64>,
    pub featured: bool,
}

impl PropertyChanges {
    /// Stored code; blank when no MLS service is set
    pub fn mls_service_code(&self) -> &'static str {
        self.mls_service.map(|s| s.as_str()).unwrap_or("")
    }
}

impl PropertyInput {
    pub fn validate(self) -> Result<PropertyChanges> {
        for (field, amount) in [
            ("price", self.price),
            ("bathrooms", self.bathrooms),
            ("lot_size", self.lot_size),
        ] {
            money::validate_non_negative(field, amount).map_err(AppError::Validation)?;
        }
        if let Some(year) = self.year_built {
            if !(1600..=2200).contains(&year) {
                return Err(AppError::validation(format!(
                    "year_built must be between 1600 and 2200, got {}",
                    year
                )));
            }
        }

        Ok(PropertyChanges {
            title: validation::required("title", &self.title, 200)?,
            property_type: self.property_type,
            status: self.status,
            address: validation::required("address", &self.address, 2_000)?,
            city: validation::required("city", &self.city, 100)?,
            state: validation::required("state", &self.state, 50)?,
            zip_code: validation::required("zip_code", &self.zip_code, 10)?,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            lot_size: self.lot_size,
            year_built: self.year_built,
            mls_number: validation::optional("mls_number", self.mls_number.as_deref(), 50)?,
            mls_service: self.mls_service,
            mls_url: validation::optional("mls_url", self.mls_url.as_deref(), 200)?,
            description: validation::optional("description", self.description.as_deref(), 10_000)?,
            features: validation::optional("features", self.features.as_deref(), 10_000)?,
            owner_client_id: self.owner_client_id,
            featured: self.featured,
        })
    }
}

impl PropertyInput {
    /// A row without an address is filed under its title.
    pub fn from_import_row(row: &ImportRow) -> Result<Self> {
        let title = row.text("title").unwrap_or_default();
        Ok(Self {
            property_type: row
                .choice("property_type", PropertyType::from_code_or_label)?
                .unwrap_or_default(),
            status: row
                .choice("status", PropertyStatus::from_code_or_label)?
                .unwrap_or_default(),
            address: row.text("address").unwrap_or_else(|| title.clone()),
            city: row.text("city").unwrap_or_default(),
            state: row.text("state").unwrap_or_default(),
            zip_code: row.text("zip_code").unwrap_or_default(),
            price: row.decimal("price"),
            bedrooms: row.whole("bedrooms"),
            bathrooms: row.decimal("bathrooms"),
            square_feet: row.whole("square_feet"),
            lot_size: row.decimal("lot_size"),
            year_built: row.whole("year_built"),
            mls_number: row.text("mls_number"),
            mls_service: row.choice("mls_service", MlsService::from_code_or_label)?,
            mls_url: row.text("mls_url"),
            description: row.text("description"),
            features: row.text("features"),
            owner_client_id: None,
            featured: row.flag("featured"),
            title,
        })
    }
}

pub fn parse_import(row: &ImportRow) -> Result<PropertyChanges> {
    PropertyInput::from_import_row(row)?.validate()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyListQuery {
    pub q: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub note_history: Vec<Note>,
}
