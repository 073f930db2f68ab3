//! Port abstraction for invitation persistence.
//!
//! Mutations address a single row by id. Callers resolve which row to change
//! with [`InvitationRepository::find_latest_for`] first, so adapters never
//! decide targeting themselves. None of the update operations may touch the
//! share code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    HashCode, Invitation, InvitationAddress, InvitationId, InvitationWords, TemplateId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by invitation repository adapters.
    pub enum InvitationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "invitation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "invitation repository query failed: {message}",
        /// The targeted row no longer exists.
        Missing { id: i64 } => "invitation {id} does not exist",
    }
}

/// Port for reading and mutating invitations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Most recently created invitation for a `(user, template)` pair.
    async fn find_latest_for(
        &self,
        user_id: UserId,
        template_id: TemplateId,
    ) -> Result<Option<Invitation>, InvitationRepositoryError>;

    /// Invitation carrying `hash_code`, if any.
    async fn find_by_hash_code(
        &self,
        hash_code: &HashCode,
    ) -> Result<Option<Invitation>, InvitationRepositoryError>;

    /// Replace the title and body of one invitation.
    async fn update_words(
        &self,
        id: InvitationId,
        words: &InvitationWords,
    ) -> Result<(), InvitationRepositoryError>;

    /// Replace the event time of one invitation.
    async fn update_time(
        &self,
        id: InvitationId,
        time: Option<DateTime<Utc>>,
    ) -> Result<(), InvitationRepositoryError>;

    /// Replace every address field of one invitation at once.
    async fn update_address(
        &self,
        id: InvitationId,
        address: &InvitationAddress,
    ) -> Result<(), InvitationRepositoryError>;
}
