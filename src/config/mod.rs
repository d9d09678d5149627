//! Per-user credential storage.

pub mod credential;
pub mod store;

pub use credential::validate_api_key;
pub use store::{CONFIG_DIR_ENV_VAR, Config, ConfigStore};
