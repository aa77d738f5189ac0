//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod certificate;
pub mod export;
pub mod prefix;
pub mod reference;
pub mod user;

pub use audit::{handle_audit_command, AuditCommands};
pub use certificate::{handle_certificate_command, CertificateCommands};
pub use export::{handle_export_command, ExportCommands};
pub use prefix::{handle_prefix_command, PrefixCommands};
pub use reference::{handle_reference_command, ReferenceCommands};
pub use user::{handle_user_command, UserCommands};
