// Utility functions
// Signature computation and verification

pub mod signature;

pub use signature::{sign, verify, SIGNATURE_HEADER};
