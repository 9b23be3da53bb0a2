//! First-time role setup and login verification for staff roles.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Credential, StaffRole};
use crate::records::Collection;
use crate::traits::RecordStore;

/// Manages the single credential held by each staff role.
pub struct AuthService {
    store: Arc<dyn RecordStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The stored credential for `role`, if one has been set up.
    pub fn credential(&self, role: StaffRole) -> Result<Option<Credential>, StoreError> {
        let collection = Collection::credentials(role);
        if !self.store.exists(collection)? {
            return Ok(None);
        }
        Ok(self
            .store
            .read_all(collection)?
            .iter()
            .find_map(|line| Credential::decode(role, line)))
    }

    /// True iff no credential exists for `role`.
    pub fn needs_setup(&self, role: StaffRole) -> Result<bool, StoreError> {
        Ok(self.credential(role)?.is_none())
    }

    /// Store the credential for `role`, replacing any previous one.
    ///
    /// Callers only offer this while `needs_setup` is true; there is no
    /// reset path once a credential exists. Setup does not log anyone in.
    pub fn setup(&self, role: StaffRole, username: &str, password: &str) -> Result<(), StoreError> {
        let credential = Credential {
            role,
            username: username.to_string(),
            password: password.to_string(),
        };
        self.store
            .reset_and_write(Collection::credentials(role), &[credential.encode()])?;
        tracing::info!(%role, username, "credential created");
        Ok(())
    }

    /// Check a username/password pair against the stored credential.
    ///
    /// Returns `false` both for a mismatch and for a role that was never set up.
    pub fn login(&self, role: StaffRole, username: &str, password: &str) -> Result<bool, StoreError> {
        let ok = self
            .credential(role)?
            .is_some_and(|cred| cred.matches(username, password));
        if ok {
            tracing::info!(%role, username, "login succeeded");
        } else {
            tracing::debug!(%role, username, "login rejected");
        }
        Ok(ok)
    }
}
