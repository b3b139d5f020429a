pub mod lead_service;

pub use lead_service::{LeadConversion, LeadService};
