pub mod controller;
pub mod filter;
pub mod validator;

pub use crate::domain::model::{DeveloperDraft, DeveloperRecord, FilterState, NewDeveloper};
pub use crate::domain::ports::{ConfigProvider, DirectoryStore};
pub use crate::utils::error::Result;
