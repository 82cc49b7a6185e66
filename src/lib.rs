pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpDirectoryStore;
pub use config::settings::DirectorySettings;
pub use core::controller::{AddOutcome, DirectoryController, FetchState};
pub use domain::model::{DeveloperDraft, DeveloperRecord, Role, RoleFilter};
pub use utils::error::{DirectoryError, Result};
