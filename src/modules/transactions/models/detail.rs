use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::notes::Note;
use crate::modules::transactions::models::{
    Transaction, TransactionMilestone, TransactionParty, TransactionTask,
};

/// Transaction with everything the detail screen shows
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub gci: Option<Decimal>,
    pub property_title: String,
    pub property_address: String,
    pub parties: Vec<TransactionParty>,
    pub milestones: Vec<TransactionMilestone>,
    pub tasks: Vec<TransactionTask>,
    pub notes: Vec<Note>,
}
