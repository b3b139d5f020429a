mod app_settings;

pub use app_settings::{AppSettings, ChartColors, DEFAULT_BUYER_COLOR, DEFAULT_DUAL_COLOR, DEFAULT_SELLER_COLOR};
