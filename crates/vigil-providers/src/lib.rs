//! Provider implementations for Vigil
//!
//! One module per pluggable component, each with its concrete named
//! providers, their factories, and a `factories()` constructor returning
//! the component's standard `NamedFactoryMap`. Callers assembling a
//! non-standard platform (tests, stripped-down builds) pass their own maps
//! to the bootstrap instead.
//!
//! | Module | Providers |
//! |--------|-----------|
//! | [`cache`] | `memory` (Moka), `redis`, `noop` |
//! | [`storage`] | `memory`, `postgres` |
//! | [`telemetry`] | `memory`, `noop` |
//! | [`web`] | `filesystem`, `noop` |
//! | [`email`] | `webhook`, `noop` |
//! | [`query`] | `basic` (dynamic over the telemetry store) |
//! | [`alerting`] | `builtin` (dynamic over storage) |
//! | [`licensing`] | `community`, `enterprise` (factory callback) |
//! | [`control_plane`] | `http`, `noop` (single variant-chosen factory) |
//! | [`migrations`] | the ordered default schema migration steps |

pub mod alerting;
pub mod cache;
pub mod control_plane;
pub mod email;
pub mod licensing;
pub mod migrations;
pub mod query;
pub mod storage;
pub mod telemetry;
pub mod web;
