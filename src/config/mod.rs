//! Configuration module for trello2md
//!
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::Trello2MdPaths;
pub use settings::Settings;
