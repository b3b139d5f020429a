use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::choices::parse_stored;
use crate::core::{validation, Result};

crate::choice_enum! {
    /// Role a party plays in the deal
    pub enum PartyRole {
        PrimaryBuyer => ("primary_buyer", "Primary Buyer"),
        PrimarySeller => ("primary_seller", "Primary Seller"),
        BuyersAgent => ("buyers_agent", "Buyer's Agent"),
        SellersAgent => ("sellers_agent", "Seller's Agent"),
        HomeInspector => ("home_inspector", "Home Inspector"),
        SellersLawyer => ("sellers_lawyer", "Seller's Lawyer"),
        BuyersLawyer => ("buyers_lawyer", "Buyer's Lawyer"),
        Lender => ("lender", "Lender"),
        TitleCompany => ("title_company", "Title Company"),
        Other => ("other", "Other"),
    }
    default Other
}

/// A person attached to a transaction, either a client record or free-form.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionParty {
    pub id: i64,
    pub transaction_id: i64,
    pub client_id: Option<i64>,
    pub role: PartyRole,
    pub role_label: &'static str,
    pub full_name: String,
    pub display_email: String,
    pub display_phone: String,
}

/// Party joined with the linked client's contact fields (all NULL when unlinked)
#[derive(Debug, Clone, FromRow)]
pub struct TransactionPartyRow {
    pub id: i64,
    pub transaction_id: i64,
    pub client_id: Option<i64>,
    pub role: String,
    pub display_name: String,
    pub email: String,
    pub phone: String,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TransactionPartyRow> for TransactionParty {
    fn from(row: TransactionPartyRow) -> Self {
        let role: PartyRole = parse_stored("transaction_parties.role", &row.role);

        // Linked client details win over the free-form fields
        let full_name = match (&row.client_first_name, &row.client_last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => non_blank(Some(row.display_name.clone())).unwrap_or_else(|| "—".to_string()),
        };
        let display_email = non_blank(row.client_email)
            .or_else(|| non_blank(Some(row.email)))
            .unwrap_or_else(|| "—".to_string());
        let display_phone = non_blank(row.client_phone)
            .or_else(|| non_blank(Some(row.phone)))
            .unwrap_or_else(|| "—".to_string());

        Self {
            id: row.id,
            transaction_id: row.transaction_id,
            client_id: row.client_id,
            role,
            role_label: role.label(),
            full_name,
            display_email,
            display_phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartyInput {
    pub role: PartyRole,
    pub client_id: Option<i64>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewParty {
    pub role: PartyRole,
    pub client_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    pub phone: String,
}

impl PartyInput {
    pub fn validate(self) -> Result<NewParty> {
        let display_name = validation::optional("display_name", self.display_name.as_deref(), 200)?;
        if self.client_id.is_none() && display_name.is_empty() {
            return Err(crate::core::AppError::validation(
                "Either client_id or display_name is required",
            ));
        }

        Ok(NewParty {
            role: self.role,
            client_id: self.client_id,
            display_name,
            email: validation::optional_email("email", self.email.as_deref())?,
            phone: validation::optional("phone", self.phone.as_deref(), 20)?,
        })
    }
}
