//! Application layer for Vigil
//!
//! Defines the port traits for every pluggable component, the generic
//! provider-factory and selection machinery used to construct them by name,
//! the `Service` lifecycle capability, the migration port, and the
//! pure-composition business modules assembled at the end of bootstrap.
//!
//! Concrete provider implementations live in `vigil-providers`; the
//! composition root that wires everything together lives in
//! `vigil-infrastructure`.

pub mod ports;
pub mod use_cases;

pub use ports::registry::{
    NamedFactoryMap, ProviderFactory, ProviderSettings, SelectedProvider, resolve_provider,
    resolve_selected,
};
