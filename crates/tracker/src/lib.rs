//! Bug tracker client.
//!
//! Fetches the new bugs assigned to an account from a Bugzilla-style REST
//! endpoint and attaches a browser link to each one. Connection problems are
//! logged and reported as "no new bugs".

pub mod client;
pub mod error;
pub mod types;

pub use client::{BugSource, BugzillaClient};
pub use error::TrackerError;
pub use types::Bug;
