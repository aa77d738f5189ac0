//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CertPaths;
pub use settings::Settings;
