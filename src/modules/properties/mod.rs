// Properties module: listings and records the agent tracks

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{MlsService, Property, PropertyStatus, PropertyType};
pub use repositories::PropertyRepository;
pub use services::PropertyService;
