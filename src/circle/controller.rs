//! Circle membership state controller.
//!
//! Owns two independently fetched lists: the viewer's circle roster and
//! the pending invitations the viewer has received. Mutations follow the
//! backend's lead: inviting and removing reload from the server, while a
//! responded invitation is dropped from the local pending list by id.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::error::InviteError;
use crate::api::types::{CircleMember, Invitation, InvitationAction, InvitationId, UserId};
use crate::api::{self, CircleApi};
use crate::validate;

#[derive(Debug, Default)]
struct RosterState {
    members: Vec<CircleMember>,
    invitations: Vec<Invitation>,
    members_error: Option<String>,
    invitations_error: Option<String>,
}

/// Controller for the circle membership screen.
pub struct MembershipController {
    api: Arc<dyn CircleApi>,
    state: Arc<RwLock<RosterState>>,
}

impl MembershipController {
    /// Creates a controller with empty lists. Nothing is fetched until the
    /// load methods are called.
    #[must_use]
    pub fn new(api: Arc<dyn CircleApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(RosterState::default())),
        }
    }

    /// Returns the current member roster.
    pub async fn members(&self) -> Vec<CircleMember> {
        self.state.read().await.members.clone()
    }

    /// Returns the pending invitations the viewer has received.
    pub async fn invitations(&self) -> Vec<Invitation> {
        self.state.read().await.invitations.clone()
    }

    /// Returns the last roster fetch error, if any.
    pub async fn members_error(&self) -> Option<String> {
        self.state.read().await.members_error.clone()
    }

    /// Returns the last invitation fetch error, if any.
    pub async fn invitations_error(&self) -> Option<String> {
        self.state.read().await.invitations_error.clone()
    }

    /// Fetches the member roster.
    pub async fn load_members(&self) {
        debug!("loading circle members");
        let result = self.api.list_members().await;

        let mut state = self.state.write().await;
        match result {
            Ok(members) => {
                state.members = members;
                state.members_error = None;
            }
            Err(e) => {
                warn!(error = %e, "member load failed");
                state.members_error = Some(e.to_string());
            }
        }
    }

    /// Fetches the pending invitations the viewer has received.
    pub async fn load_invitations(&self) {
        debug!("loading received invitations");
        let result = self.api.list_invitations().await;

        let mut state = self.state.write().await;
        match result {
            Ok(invitations) => {
                state.invitations = invitations;
                state.invitations_error = None;
            }
            Err(e) => {
                warn!(error = %e, "invitation load failed");
                state.invitations_error = Some(e.to_string());
            }
        }
    }

    /// Invites a user to the viewer's circle by email.
    ///
    /// # Errors
    ///
    /// Returns an [`InviteError`] carrying the copy the form shows inline;
    /// the variant is picked from the typed rejection code.
    pub async fn invite(&self, email: &str) -> Result<Invitation, InviteError> {
        validate::invite_email(email).map_err(|e| InviteError::Other(e.to_string()))?;

        self.api
            .invite_member(email)
            .await
            .map_err(|e| InviteError::from_api(&e, email))
    }

    /// Accepts or declines a received invitation.
    ///
    /// On success the invitation is removed from the local pending list;
    /// it is not moved to a responded state.
    ///
    /// # Errors
    ///
    /// Returns the API error when the call fails; the pending list is left
    /// untouched in that case.
    pub async fn respond(&self, id: InvitationId, action: InvitationAction) -> api::Result<()> {
        self.api.respond_invitation(id, action).await?;

        let mut state = self.state.write().await;
        state.invitations.retain(|i| i.id != id);
        Ok(())
    }

    /// Removes a member from the viewer's circle, then refetches the
    /// roster.
    ///
    /// Confirmation prompting belongs to the UI and happens before this is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns the API error when the delete fails.
    pub async fn remove_member(&self, member_id: UserId) -> api::Result<()> {
        self.api.remove_member(member_id).await?;
        self.load_members().await;
        Ok(())
    }
}
