// Notes shared by clients, leads, contacts, properties and transactions

pub mod models;
pub mod repositories;

pub use models::{Note, NoteInput, NoteTarget};
pub use repositories::NoteRepository;
