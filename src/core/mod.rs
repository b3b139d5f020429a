pub mod choices;
pub mod csv_io;
pub mod error;
pub mod money;
pub mod pagination;
pub mod timezone;
pub mod validation;

pub use error::{AppError, Result};
pub use pagination::Page;
pub use timezone::{AppTimezone, YearMonth};
