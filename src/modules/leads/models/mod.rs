mod lead;

pub use lead::{
    parse_import, Lead, LeadChanges, LeadDetail, LeadInput, LeadListQuery, LeadReferral, LeadRow,
    LeadStatus, EXPORT_COLUMNS,
};
