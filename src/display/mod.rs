//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and detail views.

pub mod certificate;
pub mod prefix;

pub use certificate::{format_certificate_details, format_edition_list, format_search_results};
pub use prefix::{format_prefix_list, format_user_list};
