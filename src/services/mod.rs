//! Business logic services for certdesk
//!
//! Services own the rules; repositories own the bytes. Each service borrows
//! the storage coordinator and is created per invocation.

pub mod allocator;
pub mod certificate;
pub mod lookup;

pub use allocator::AllocatorService;
pub use certificate::{CertificateService, UpdateOutcome};
pub use lookup::{LookupCache, LookupService};
