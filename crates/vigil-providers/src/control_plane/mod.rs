//! Control Plane Client Implementations
//!
//! The client is chosen by build variant, not by configuration, so there is
//! no factory map here: the caller injects exactly one of these factories
//! into the bootstrap.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`HttpControlPlaneClient`] | Talks to the hosted licensing authority |
//! | [`NoopControlPlaneClient`] | Community builds and tests |

pub mod http;
pub mod noop;

pub use http::{HttpControlPlaneClient, HttpControlPlaneClientFactory};
pub use noop::{NoopControlPlaneClient, NoopControlPlaneClientFactory};
