//! Core data models for certdesk
//!
//! This module contains all the data structures that represent the
//! certificate domain: certificate records and editions, year prefixes,
//! users, part numbers, and search criteria.

pub mod certificate;
pub mod criteria;
pub mod number;
pub mod part_number;
pub mod prefix;
pub mod user;

pub use certificate::{CertState, CertificateFields, CertificateRecord, ValidatedFields};
pub use criteria::SearchCriteria;
pub use number::{CertificateNumber, Edition};
pub use part_number::PartNumber;
pub use prefix::YearPrefix;
pub use user::{RequestContext, Role, User};
