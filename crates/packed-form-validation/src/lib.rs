//! Packed-Form-Validation Core
//!
//! Pure Rust validation functions compatible with both std and no_std environments.
//! The field handlers of `packed-form` build their constraints out of these.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod email;
pub mod numeric;
pub mod string;

// Re-export all validators
pub use email::*;
pub use numeric::*;
pub use string::*;

/// Message used for a mandatory field left empty
pub const REQUIRED_MESSAGE: &str = "This field is required";
