//! Base types, error taxonomy, and developer diagnostics.
//!
//! - [`ConsentError`](error::ConsentError): decode and configuration failure
//!   codes with human-readable display strings
//! - [`DiagnosticsRegistry`](diagnostics::DiagnosticsRegistry): resettable
//!   warn-once channel for developer guidance

pub mod diagnostics;
pub mod error;
