//! Email Provider Implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`WebhookEmailSender`] | Posts messages to an HTTP delivery gateway |
//! | [`NoopEmailSender`] | Drops messages, logging them at debug level |

pub mod noop;
pub mod webhook;

pub use noop::{NoopEmailSender, NoopEmailSenderFactory};
pub use webhook::{WebhookEmailSender, WebhookEmailSenderFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{EmailConfig, EmailSender};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// The standard email factory map
pub fn factories() -> Result<NamedFactoryMap<dyn EmailSender, EmailConfig>> {
    let list: Vec<Arc<dyn ProviderFactory<dyn EmailSender, EmailConfig>>> = vec![
        Arc::new(WebhookEmailSenderFactory::new()),
        Arc::new(NoopEmailSenderFactory::new()),
    ];
    NamedFactoryMap::new("email", list)
}
