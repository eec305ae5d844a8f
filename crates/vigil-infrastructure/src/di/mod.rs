//! Composition Root
//!
//! The bootstrap sequence that selects, constructs, and wires every
//! provider into one assembled [`Platform`] object.

pub mod bootstrap;

pub use bootstrap::{
    bootstrap, AlertEngineFactoriesBuilder, BootstrapArgs, Platform, QueryEngineFactoriesBuilder,
};
