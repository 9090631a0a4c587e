//! Miscellaneous utilities for ils.
//!
//! Holds the [cli] submodule with the flag grammar and argument collection.

pub mod cli;

pub use cli::{Flags, ListingRequest};
