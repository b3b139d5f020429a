pub mod commission_calculator;
pub mod transaction_service;

pub use transaction_service::TransactionService;
