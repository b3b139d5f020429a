mod contact;

pub use contact::{
    parse_import, Contact, ContactChanges, ContactDetail, ContactInput, ContactListQuery,
    ContactRow, ContactType, EXPORT_COLUMNS,
};
