//! certdesk - Terminal-based quality-certificate records management
//!
//! This library provides the core functionality for certdesk: staff create,
//! search, amend, print, and export quality-certificate records backed by a
//! local JSON record store, with append-only audit logging and role-based
//! authorization.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (certificates, editions, prefixes, users)
//! - `storage`: JSON file storage layer and number allocation
//! - `services`: Business logic layer (lifecycle, allocation, lookups)
//! - `audit`: Append-only audit logging with field-level diffs
//! - `render`: Certificate form rendering
//! - `export`: CSV and JSON export
//! - `display`: Terminal output formatting
//! - `cli`: clap command handlers

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod services;
pub mod storage;

pub use error::{CertError, CertResult};
