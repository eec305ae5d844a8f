//! Member invitation module

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use vigil_domain::error::{Error, Result};

use crate::ports::providers::{EmailMessage, EmailSender, Storage};

/// Issues invitation tokens and delivers them by email
pub struct InviteModule {
    storage: Arc<dyn Storage>,
    email: Arc<dyn EmailSender>,
}

impl InviteModule {
    /// Compose the module over its providers
    pub fn new(storage: Arc<dyn Storage>, email: Arc<dyn EmailSender>) -> Self {
        Self { storage, email }
    }

    /// Invite `address`, returning the issued token
    pub async fn invite(&self, address: &str) -> Result<Uuid> {
        if !address.contains('@') {
            return Err(Error::configuration(format!(
                "invalid invite address: {address}"
            )));
        }

        let token = Uuid::new_v4();
        self.storage
            .put(
                "invites",
                &token.to_string(),
                serde_json::json!({
                    "email": address,
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        self.email
            .send(&EmailMessage {
                to: address.to_string(),
                subject: "You have been invited to Vigil".to_string(),
                body: format!("Use token {token} to join your team's workspace."),
            })
            .await?;

        info!(invitee = address, "invitation sent");
        Ok(token)
    }

    /// Whether `token` identifies a pending invitation
    pub async fn is_pending(&self, token: Uuid) -> Result<bool> {
        let record = self.storage.get("invites", &token.to_string()).await?;
        Ok(record.is_some())
    }
}

/// Thin request handler over [`InviteModule`]
pub struct InviteHandler {
    module: Arc<InviteModule>,
}

impl InviteHandler {
    /// Compose the handler
    pub fn new(module: Arc<InviteModule>) -> Self {
        Self { module }
    }

    /// Issue an invitation, returning the token as a JSON value
    pub async fn invite(&self, address: &str) -> Result<serde_json::Value> {
        let token = self.module.invite(address).await?;
        Ok(serde_json::json!({ "token": token }))
    }
}
