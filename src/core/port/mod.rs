//! Port ownership: applications are bound to ports through the router, and
//! every channel or packet message authenticates port ownership by looking
//! the port up there. This module only contributes the failure modes.

pub mod error;

pub use error::PortError;
