pub mod app_config;
pub mod config;
pub mod geo;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use geo::GeoSample;
pub use types::{BusinessDetail, BusinessSummary, Review};
