//! Authentication primitives.
//!
//! - [`claims`] -- gateway token claims and unverified decoding.

pub mod claims;
