use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use linkwright_core::{
    AuthError, AuthStore, AuthStoreError, ConfirmationState, Email, EmailChangeRequest, Identity,
    IdentityId, LinkRole, LinkTarget, LinkToken, Redemption, RequestId, StoredIdentity,
    VerificationLink,
};

/// How long a spent or expired link keeps answering with its precise error
/// before it is forgotten and reads as unknown.
const LINK_RETENTION_IN_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Default)]
struct AuthState {
    identities: HashMap<IdentityId, StoredIdentity>,
    by_email: HashMap<Email, IdentityId>,
    signup_links: HashMap<IdentityId, LinkToken>,
    requests: HashMap<RequestId, EmailChangeRequest>,
    active_requests: HashMap<IdentityId, RequestId>,
    request_links: HashMap<RequestId, [LinkToken; 2]>,
    links: HashMap<LinkToken, VerificationLink>,
}

impl AuthState {
    fn revoke(&mut self, token: &LinkToken) {
        if let Some(link) = self.links.get_mut(token) {
            link.revoke();
        }
    }

    fn supersede(&mut self, identity_id: IdentityId, request_id: RequestId) {
        if let Some(previous) = self.active_requests.insert(identity_id, request_id) {
            self.retire(previous);
        }
    }

    /// Drops a finished request. Its links stay behind, used or revoked, so
    /// they keep reporting `LinkAlreadyUsed` or `LinkExpired`.
    fn retire(&mut self, request_id: RequestId) {
        let Some(request) = self.requests.remove(&request_id) else {
            return;
        };
        if let Some(tokens) = self.request_links.remove(&request_id) {
            tokens.iter().for_each(|token| self.revoke(token));
        }
        self.release(request.identity_id(), request_id);
    }

    fn sweep(&mut self, now: DateTime<Utc>) {
        let elapsed: Vec<RequestId> = self
            .requests
            .iter()
            .filter(|(_, request)| !request.is_active(now))
            .map(|(id, _)| *id)
            .collect();
        elapsed.into_iter().for_each(|id| self.retire(id));

        let retention = TimeDelta::seconds(LINK_RETENTION_IN_SECONDS);
        self.links.retain(|_, link| {
            link.expires_at()
                .checked_add_signed(retention)
                .is_none_or(|forget_at| now < forget_at)
        });
        let links = &self.links;
        self.signup_links.retain(|_, token| links.contains_key(token));
    }

    fn release(&mut self, identity_id: IdentityId, request_id: RequestId) {
        if self.active_requests.get(&identity_id) == Some(&request_id) {
            self.active_requests.remove(&identity_id);
        }
    }

    fn owner_of(&self, email: &Email) -> Option<IdentityId> {
        self.by_email.get(email).copied()
    }

    fn confirm_signup(&mut self, identity_id: IdentityId) -> Result<Redemption, AuthStoreError> {
        let stored = self
            .identities
            .get_mut(&identity_id)
            .ok_or(AuthError::InvalidLink)?;
        let email = stored.identity.email().clone();
        stored.identity = Identity::new(identity_id, email.clone(), true);
        self.signup_links.remove(&identity_id);

        Ok(Redemption::SignupConfirmed { identity_id, email })
    }

    fn confirm_change(
        &mut self,
        request_id: RequestId,
        role: LinkRole,
        now: DateTime<Utc>,
    ) -> Result<Redemption, AuthStoreError> {
        let request = self
            .requests
            .get_mut(&request_id)
            .ok_or(AuthError::InvalidLink)?;
        let identity_id = request.identity_id();
        let new_email = request.new_email().clone();

        // The new address may have been claimed while the request was open
        let claimed_by_other = self
            .by_email
            .get(&new_email)
            .is_some_and(|owner| *owner != identity_id);
        if role == LinkRole::EmailChangeNew
            && request.state() == ConfirmationState::CurrentConfirmed
            && claimed_by_other
        {
            self.retire(request_id);
            return Err(AuthError::LinkExpired.into());
        }

        let state = match request.confirm(role, now) {
            Ok(state) => state,
            Err(e) => {
                if request.state() == ConfirmationState::Expired {
                    self.retire(request_id);
                }
                return Err(e.into());
            }
        };

        if state == ConfirmationState::CurrentConfirmed {
            return Ok(Redemption::CurrentConfirmed {
                request_id,
                email: request.current_email().clone(),
            });
        }

        let current_email = request.current_email().clone();
        self.by_email.remove(&current_email);
        self.by_email.insert(new_email.clone(), identity_id);
        if let Some(stored) = self.identities.get_mut(&identity_id) {
            stored.identity = Identity::new(identity_id, new_email.clone(), true);
        }
        self.retire(request_id);

        Ok(Redemption::Completed {
            request_id,
            email: new_email,
        })
    }
}

/// In-memory store; one lock guards all tables so every operation is atomic.
#[derive(Default, Clone)]
pub struct HashMapAuthStore {
    state: Arc<RwLock<AuthState>>,
}

impl HashMapAuthStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AuthStore for HashMapAuthStore {
    async fn register_pending(
        &self,
        email: Email,
        password_hash: String,
        link_expires_at: DateTime<Utc>,
    ) -> Result<VerificationLink, AuthStoreError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.sweep(Utc::now());

        let identity_id = match state.by_email.get(&email) {
            Some(id) => {
                let stored = state.identities.get_mut(id).ok_or_else(|| {
                    AuthStoreError::UnexpectedError("email index out of sync".to_string())
                })?;
                if stored.identity.is_confirmed() {
                    return Err(AuthStoreError::IdentityAlreadyExists);
                }
                stored.password_hash = password_hash;
                *id
            }
            None => {
                let id = IdentityId::new();
                state.identities.insert(
                    id,
                    StoredIdentity {
                        identity: Identity::new(id, email.clone(), false),
                        password_hash,
                    },
                );
                state.by_email.insert(email, id);
                id
            }
        };

        if let Some(previous) = state.signup_links.remove(&identity_id) {
            state.revoke(&previous);
        }

        let link = VerificationLink::for_signup(identity_id, link_expires_at);
        state
            .signup_links
            .insert(identity_id, link.token().clone());
        state.links.insert(link.token().clone(), link.clone());

        Ok(link)
    }

    async fn find_by_email(&self, email: &Email) -> Result<StoredIdentity, AuthStoreError> {
        let state = self.state.read().await;
        state
            .by_email
            .get(email)
            .and_then(|id| state.identities.get(id))
            .cloned()
            .ok_or(AuthStoreError::IdentityNotFound)
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<StoredIdentity, AuthStoreError> {
        let state = self.state.read().await;
        state
            .identities
            .get(&id)
            .cloned()
            .ok_or(AuthStoreError::IdentityNotFound)
    }

    async fn open_email_change(
        &self,
        request: EmailChangeRequest,
        links: [VerificationLink; 2],
    ) -> Result<(), AuthStoreError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.sweep(Utc::now());

        let identity_id = request.identity_id();
        let stored = state
            .identities
            .get(&identity_id)
            .ok_or(AuthStoreError::IdentityNotFound)?;
        if !stored.identity.is_confirmed() || stored.identity.email() != request.current_email() {
            return Err(AuthError::LinkGenerationFailed(
                "Current email address does not match the account".to_string(),
            )
            .into());
        }
        if state
            .owner_of(request.new_email())
            .is_some_and(|owner| owner != identity_id)
        {
            return Err(AuthStoreError::EmailTaken);
        }

        let request_id = request.id();
        state.supersede(identity_id, request_id);

        let tokens = [links[0].token().clone(), links[1].token().clone()];
        for link in links {
            state.links.insert(link.token().clone(), link);
        }
        state.request_links.insert(request_id, tokens);
        state.requests.insert(request_id, request);

        Ok(())
    }

    async fn redeem(
        &self,
        token: &LinkToken,
        role: LinkRole,
        now: DateTime<Utc>,
    ) -> Result<Redemption, AuthStoreError> {
        let mut state = self.state.write().await;

        let target = {
            let link = state.links.get(token).ok_or(AuthError::InvalidLink)?;
            if link.role() != role {
                return Err(AuthError::InvalidLink.into());
            }
            link.ensure_redeemable(now)?;
            link.target()
        };

        let redemption = match target {
            LinkTarget::Signup(identity_id) => state.confirm_signup(identity_id)?,
            LinkTarget::EmailChange(request_id) => state.confirm_change(request_id, role, now)?,
        };

        if let Some(link) = state.links.get_mut(token) {
            link.mark_used();
        }

        Ok(redemption)
    }
}
