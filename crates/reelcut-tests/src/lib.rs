//! Integration test crate for Reelcut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple reelcut crates to verify they work together.

#[cfg(test)]
mod support;

#[cfg(test)]
mod session;
