//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod council_gateway;
pub mod session_observer;
pub mod transcript_logger;
