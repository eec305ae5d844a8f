//! Business Modules
//!
//! Pure composition over already-constructed providers. Modules perform no
//! I/O at construction time; the bootstrap assembles them after every
//! provider exists and exposes them on the platform object.

pub mod dashboards;
pub mod invites;
pub mod usage;

use std::sync::Arc;

use crate::ports::providers::{Cache, ControlPlaneClient, EmailSender, Storage};
use crate::ports::registry::ProviderSettings;

pub use dashboards::{Dashboard, DashboardModule};
pub use invites::InviteModule;
pub use usage::UsageModule;

/// All business modules, composed once at the end of bootstrap
#[derive(Clone)]
pub struct Modules {
    /// Dashboard management over storage + cache
    pub dashboards: Arc<DashboardModule>,
    /// Member invitations over storage + email
    pub invites: Arc<InviteModule>,
    /// Anonymous usage reporting over storage + control plane
    pub usage: Arc<UsageModule>,
}

impl Modules {
    /// Compose the modules over their providers
    pub fn new(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn Cache>,
        email: Arc<dyn EmailSender>,
        control_plane: Arc<dyn ControlPlaneClient>,
        settings: &ProviderSettings,
    ) -> Self {
        let dashboards = Arc::new(DashboardModule::new(storage.clone(), cache));
        let invites = Arc::new(InviteModule::new(storage.clone(), email));
        let usage = Arc::new(UsageModule::new(
            storage,
            control_plane,
            settings.build.version.clone(),
        ));
        Self {
            dashboards,
            invites,
            usage,
        }
    }
}

/// Request handlers over the business modules
///
/// Handlers translate between wire-shaped JSON values and module calls.
/// Construction is pure composition, like the modules themselves.
#[derive(Clone)]
pub struct Handlers {
    /// Dashboard read/write handler
    pub dashboards: Arc<dashboards::DashboardHandler>,
    /// Invitation handler
    pub invites: Arc<invites::InviteHandler>,
}

impl Handlers {
    /// Compose the handlers over the modules
    pub fn new(modules: &Modules) -> Self {
        Self {
            dashboards: Arc::new(dashboards::DashboardHandler::new(modules.dashboards.clone())),
            invites: Arc::new(invites::InviteHandler::new(modules.invites.clone())),
        }
    }
}
