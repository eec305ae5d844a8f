//! Licensing Provider Implementations
//!
//! Licensing's construction strategy varies by build variant, so the
//! bootstrap takes a factory *callback* `(Storage, ControlPlaneClient) →
//! ProviderFactory` rather than a static map. [`community_factory_callback`]
//! and [`enterprise_factory_callback`] are the two standard strategies.

pub mod community;
pub mod enterprise;

pub use community::{CommunityLicensing, CommunityLicensingFactory};
pub use enterprise::{EnterpriseLicensing, EnterpriseLicensingFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{ControlPlaneClient, LicensingFactoryCallback, Storage};

/// Community strategy: licensing ignores storage and the control plane
pub fn community_factory_callback() -> LicensingFactoryCallback {
    Box::new(|_storage: Arc<dyn Storage>, _control_plane: Arc<dyn ControlPlaneClient>| {
        Arc::new(CommunityLicensingFactory::new()) as _
    })
}

/// Enterprise strategy: licensing validates against the control plane and
/// journals license state in storage
pub fn enterprise_factory_callback() -> LicensingFactoryCallback {
    Box::new(|storage: Arc<dyn Storage>, control_plane: Arc<dyn ControlPlaneClient>| {
        Arc::new(EnterpriseLicensingFactory::new(storage, control_plane)) as _
    })
}
