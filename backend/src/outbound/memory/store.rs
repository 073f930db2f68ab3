//! Lock-guarded in-process store implementing the persistence ports.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    InvitationImageRepository, InvitationImageRepositoryError, InvitationRepository,
    InvitationRepositoryError, ProvisionedUser, TemplateCatalogueSeedError,
    TemplateCatalogueSeeder, TemplateRepository, TemplateRepositoryError, TemplateSeedSummary,
    UserPersistenceError, UserProvisioningRepository, UserProvisioningRepositoryError,
    UserRepository,
};
use crate::domain::{
    DeviceIdentifier, HashAssigner, HashCode, ImageUrl, Invitation, InvitationAddress,
    InvitationId, InvitationImage, InvitationImageId, InvitationWords, Template, TemplateId, User,
    UserId,
};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    templates: BTreeMap<i64, Template>,
    invitations: BTreeMap<i64, Invitation>,
    images: BTreeMap<i64, InvitationImage>,
    last_user_id: i64,
    last_invitation_id: i64,
    last_image_id: i64,
}

impl State {
    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    fn next_invitation_id(&mut self) -> InvitationId {
        self.last_invitation_id += 1;
        InvitationId::new(self.last_invitation_id)
    }

    fn next_image_id(&mut self) -> InvitationImageId {
        self.last_image_id += 1;
        InvitationImageId::new(self.last_image_id)
    }

    fn invitation_mut(
        &mut self,
        id: InvitationId,
    ) -> Result<&mut Invitation, InvitationRepositoryError> {
        self.invitations
            .get_mut(&id.get())
            .ok_or_else(|| InvitationRepositoryError::missing(id.get()))
    }

    fn hash_code_taken(&self, code: &HashCode) -> bool {
        self.invitations
            .values()
            .any(|invitation| invitation.hash_code.as_ref() == Some(code))
    }
}

/// Process-local implementation of all persistence ports.
///
/// Identifiers come from per-table sequences starting at 1. Every operation
/// takes the same lock, so multi-entity writes are atomic.
///
/// # Examples
///
/// ```
/// use invitation_backend::domain::{Template, TemplateId};
/// use invitation_backend::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::with_templates(vec![
///     Template::new(TemplateId::new(1), "bg.png", "party"),
/// ]);
/// assert_eq!(store.invitation_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose catalogue already holds `templates`.
    pub fn with_templates(templates: Vec<Template>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for template in templates {
                state.templates.insert(template.id.get(), template);
            }
        }
        store
    }

    /// Number of provisioned users.
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Number of invitation rows across all users.
    pub fn invitation_count(&self) -> usize {
        self.lock().invitations.len()
    }

    /// Every invitation owned by `user_id`, in creation order.
    pub fn invitations_of(&self, user_id: UserId) -> Vec<Invitation> {
        self.lock()
            .invitations
            .values()
            .filter(|invitation| invitation.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Add another invitation for an existing `(user, template)` pair.
    ///
    /// The new row becomes the pair's latest invitation. Used to reproduce
    /// data created before drafts were unique per pair.
    pub fn insert_invitation(
        &self,
        user_id: UserId,
        template_id: TemplateId,
        hash_assigner: &dyn HashAssigner,
    ) -> Invitation {
        let mut state = self.lock();
        let id = state.next_invitation_id();
        let mut invitation = Invitation::draft(id, user_id, template_id);
        invitation.hash_code = Some(hash_assigner.assign(id));
        state.invitations.insert(id.get(), invitation.clone());
        invitation
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_device_identifier(
        &self,
        device: &DeviceIdentifier,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.device_identifier() == device)
            .cloned())
    }
}

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, TemplateRepositoryError> {
        Ok(self.lock().templates.get(&id.get()).cloned())
    }

    async fn exists_by_id(&self, id: TemplateId) -> Result<bool, TemplateRepositoryError> {
        Ok(self.lock().templates.contains_key(&id.get()))
    }

    async fn find_all(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        Ok(self.lock().templates.values().cloned().collect())
    }
}

#[async_trait]
impl TemplateCatalogueSeeder for InMemoryStore {
    async fn seed(
        &self,
        templates: &[Template],
    ) -> Result<TemplateSeedSummary, TemplateCatalogueSeedError> {
        let mut state = self.lock();
        let mut summary = TemplateSeedSummary::default();
        for template in templates {
            if state.templates.contains_key(&template.id.get()) {
                summary.skipped += 1;
            } else {
                state.templates.insert(template.id.get(), template.clone());
                summary.inserted += 1;
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl InvitationRepository for InMemoryStore {
    async fn find_latest_for(
        &self,
        user_id: UserId,
        template_id: TemplateId,
    ) -> Result<Option<Invitation>, InvitationRepositoryError> {
        Ok(self
            .lock()
            .invitations
            .values()
            .rev()
            .find(|invitation| {
                invitation.user_id == user_id && invitation.template_id == template_id
            })
            .cloned())
    }

    async fn find_by_hash_code(
        &self,
        hash_code: &HashCode,
    ) -> Result<Option<Invitation>, InvitationRepositoryError> {
        Ok(self
            .lock()
            .invitations
            .values()
            .find(|invitation| invitation.hash_code.as_ref() == Some(hash_code))
            .cloned())
    }

    async fn update_words(
        &self,
        id: InvitationId,
        words: &InvitationWords,
    ) -> Result<(), InvitationRepositoryError> {
        self.lock().invitation_mut(id)?.words = words.clone();
        Ok(())
    }

    async fn update_time(
        &self,
        id: InvitationId,
        time: Option<DateTime<Utc>>,
    ) -> Result<(), InvitationRepositoryError> {
        self.lock().invitation_mut(id)?.time = time;
        Ok(())
    }

    async fn update_address(
        &self,
        id: InvitationId,
        address: &InvitationAddress,
    ) -> Result<(), InvitationRepositoryError> {
        self.lock().invitation_mut(id)?.address = address.clone();
        Ok(())
    }
}

#[async_trait]
impl InvitationImageRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: InvitationImageId,
    ) -> Result<Option<InvitationImage>, InvitationImageRepositoryError> {
        Ok(self.lock().images.get(&id.get()).cloned())
    }

    async fn find_all_by_invitation_id(
        &self,
        invitation_id: InvitationId,
    ) -> Result<Vec<InvitationImage>, InvitationImageRepositoryError> {
        Ok(self
            .lock()
            .images
            .values()
            .filter(|image| image.invitation_id == invitation_id)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        invitation_id: InvitationId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError> {
        let mut state = self.lock();
        if !state.invitations.contains_key(&invitation_id.get()) {
            return Err(InvitationImageRepositoryError::query(format!(
                "invitation {invitation_id} does not exist"
            )));
        }
        let id = state.next_image_id();
        let image = InvitationImage {
            id,
            invitation_id,
            image_url: image_url.clone(),
        };
        state.images.insert(id.get(), image.clone());
        Ok(image)
    }

    async fn update_url(
        &self,
        id: InvitationImageId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError> {
        let mut state = self.lock();
        let image = state
            .images
            .get_mut(&id.get())
            .ok_or_else(|| InvitationImageRepositoryError::missing(id.get()))?;
        image.image_url = image_url.clone();
        Ok(image.clone())
    }

    async fn delete_by_id(
        &self,
        id: InvitationImageId,
    ) -> Result<(), InvitationImageRepositoryError> {
        self.lock()
            .images
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| InvitationImageRepositoryError::missing(id.get()))
    }
}

#[async_trait]
impl UserProvisioningRepository for InMemoryStore {
    async fn provision(
        &self,
        device: &DeviceIdentifier,
        hash_assigner: &dyn HashAssigner,
    ) -> Result<ProvisionedUser, UserProvisioningRepositoryError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|user| user.device_identifier() == device)
        {
            return Err(UserProvisioningRepositoryError::conflict(device.as_str()));
        }

        // Stage everything first so a failure leaves the state untouched.
        let mut staged = state.last_invitation_id;
        let user_id = UserId::new(state.last_user_id + 1);
        let template_ids: Vec<TemplateId> = state.templates.values().map(|t| t.id).collect();
        let mut drafts = Vec::with_capacity(template_ids.len());
        let mut codes = HashSet::with_capacity(template_ids.len());
        for template_id in template_ids {
            staged += 1;
            let id = InvitationId::new(staged);
            let code = hash_assigner.assign(id);
            if state.hash_code_taken(&code) || !codes.insert(code.clone()) {
                return Err(UserProvisioningRepositoryError::conflict(device.as_str()));
            }
            let mut draft = Invitation::draft(id, user_id, template_id);
            draft.hash_code = Some(code);
            drafts.push(draft);
        }

        let user = User::new(state.next_user_id(), device.clone());
        state.users.insert(user.id().get(), user.clone());
        state.last_invitation_id = staged;
        for draft in &drafts {
            state.invitations.insert(draft.id.get(), draft.clone());
        }

        Ok(ProvisionedUser {
            user,
            invitations: drafts,
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
