//! Infrastructure layer for Vigil
//!
//! Cross-cutting technical concerns and the composition root:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | Typed configuration and the figment-based loader |
//! | [`logging`] | Tracing subscriber setup |
//! | [`instrumentation`] | First bootstrap step: logging + metrics + build info |
//! | [`metrics`] | In-process counter collector |
//! | [`lifecycle`] | Ordered start/stop service registry |
//! | [`migrate`] | Idempotent schema migration engine |
//! | [`di`] | The bootstrap sequence assembling the [`di::Platform`] |

pub mod config;
pub mod constants;
pub mod di;
pub mod instrumentation;
pub mod lifecycle;
pub mod logging;
pub mod metrics;
pub mod migrate;

pub use di::{bootstrap, BootstrapArgs, Platform};
pub use lifecycle::ServiceRegistry;
pub use migrate::Migrator;
