use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{validation, Result};

/// Record kinds that carry a note history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTarget {
    Client,
    Lead,
    Contact,
    Property,
    Transaction,
}

impl NoteTarget {
    /// Notes table for this record kind
    pub fn table(&self) -> &'static str {
        match self {
            NoteTarget::Client => "client_notes",
            NoteTarget::Lead => "lead_notes",
            NoteTarget::Contact => "contact_notes",
            NoteTarget::Property => "property_notes",
            NoteTarget::Transaction => "transaction_notes",
        }
    }

    /// Foreign key column in the notes table
    pub fn parent_column(&self) -> &'static str {
        match self {
            NoteTarget::Client => "client_id",
            NoteTarget::Lead => "lead_id",
            NoteTarget::Contact => "contact_id",
            NoteTarget::Property => "property_id",
            NoteTarget::Transaction => "transaction_id",
        }
    }

    /// Query returning one row when the parent exists and belongs to the tenant.
    /// Binds: parent id, tenant id.
    pub fn ownership_query(&self) -> &'static str {
        match self {
            NoteTarget::Client => "SELECT id FROM clients WHERE id = ? AND user_id = ?",
            NoteTarget::Lead => "SELECT id FROM leads WHERE id = ? AND user_id = ?",
            NoteTarget::Contact => "SELECT id FROM contacts WHERE id = ? AND user_id = ?",
            NoteTarget::Property => "SELECT id FROM properties WHERE id = ? AND user_id = ?",
            NoteTarget::Transaction => {
                "SELECT t.id FROM transactions t \
                 INNER JOIN properties p ON p.id = t.property_id \
                 WHERE t.id = ? AND p.user_id = ?"
            }
        }
    }

    pub fn resource_name(&self) -> &'static str {
        match self {
            NoteTarget::Client => "Client",
            NoteTarget::Lead => "Lead",
            NoteTarget::Contact => "Contact",
            NoteTarget::Property => "Property",
            NoteTarget::Transaction => "Transaction",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteInput {
    pub body: String,
}

impl NoteInput {
    pub fn validate(&self) -> Result<String> {
        validation::required("body", &self.body, 10_000)
    }
}
