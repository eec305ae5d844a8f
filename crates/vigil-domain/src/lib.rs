//! Domain layer for Vigil
//!
//! Pure types shared by every other crate: the error taxonomy, the
//! validated [`Name`](value_objects::Name) identifier used to key provider
//! factories and registered services, and the process-wide
//! [`BuildInfo`](value_objects::BuildInfo) metadata.
//!
//! This crate performs no I/O and has no async surface.

pub mod error;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{BuildInfo, Name, Variant};
