mod client;

pub use client::{
    parse_import, Client, ClientChanges, ClientDetail, ClientInput, ClientListQuery, ClientRow,
    ClientStatus, ClientType, EXPORT_COLUMNS,
};
