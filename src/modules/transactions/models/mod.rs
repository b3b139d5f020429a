mod detail;
mod milestone;
mod party;
mod task;
mod transaction;

pub use detail::TransactionDetail;
pub use milestone::{
    MilestoneInput, MilestoneKind, MilestoneStatus, TransactionMilestone, TransactionMilestoneRow,
};
pub use party::{NewParty, PartyInput, PartyRole, TransactionParty, TransactionPartyRow};
pub use task::{TaskInput, TransactionTask};
pub use transaction::{
    Representation, Transaction, TransactionChanges, TransactionInput, TransactionListQuery,
    TransactionRow, TransactionStatus, TransactionSummary,
};
