//! # Session
//!
//! The credential the console acts with, kept in the same key/value storage the
//! draft uses. Logging in stores it, logging out removes it; the role and the
//! capabilities are derived from whatever is stored at the time of the call.

use crate::backend::{ApiError, BackendApi};
use crate::capability::{resolve_role, Capabilities, Role};
use crate::messages;
use crate::storage::{KeyValueStore, StorageError, CREDENTIAL_KEY};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("login request failed: {0}")]
    Api(#[source] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ApiError> for SessionError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => SessionError::InvalidCredentials,
            other => SessionError::Api(other),
        }
    }
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials => messages::LOGIN_INVALID,
            _ => messages::LOGIN_FAILED,
        }
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored credential. Unreadable storage counts as logged out.
    pub fn credential(&self) -> Option<String> {
        self.store.get(CREDENTIAL_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read credential");
            None
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    pub fn role(&self) -> Role {
        resolve_role(self.credential().as_deref())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.role())
    }

    /// Exchanges username and password for a credential and stores it.
    #[instrument(skip(self, backend, password))]
    pub async fn login(
        &self,
        backend: &dyn BackendApi,
        username: &str,
        password: &str,
    ) -> Result<Role, SessionError> {
        let token = backend
            .login(username.to_string(), password.to_string())
            .await
            .inspect_err(|e| warn!(error = %e, "Login rejected"))?;
        self.store.set(CREDENTIAL_KEY, &token)?;

        let role = resolve_role(Some(&token));
        info!(%role, "Logged in");
        Ok(role)
    }

    /// Removes the stored credential. The draft is left alone.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(CREDENTIAL_KEY)?;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendApi;
    use crate::capability::role::token_with_payload;
    use crate::capability::Section;
    use crate::storage::{MemoryStore, CART_KEY};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_login_stores_token_and_resolves_role() {
        let token = token_with_payload(r#"{"sub":"ana","role":"almacen"}"#);
        let returned = token.clone();
        let mut backend = MockBackendApi::new();
        backend
            .expect_login()
            .with(eq("ana".to_string()), eq("secreto".to_string()))
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());

        let role = session.login(&backend, "ana", "secreto").await.unwrap();
        assert_eq!(role, Role::Almacen);
        assert_eq!(store.get(CREDENTIAL_KEY).unwrap(), Some(token));
        assert!(session.capabilities().can_open(Section::Categories));
    }

    #[tokio::test]
    async fn test_login_401_maps_to_credentials_message() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_login()
            .returning(|_, _| Err(ApiError::Unauthorized));
        let session = Session::new(Arc::new(MemoryStore::new()));

        let err = session.login(&backend, "ana", "mal").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));
        assert_eq!(err.user_message(), "Verificar tu correo o contraseña.");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_removes_only_the_credential() {
        let store = Arc::new(MemoryStore::new());
        store.set(CREDENTIAL_KEY, "tok").unwrap();
        store.set(CART_KEY, "[]").unwrap();
        let session = Session::new(store.clone());

        session.logout().unwrap();
        assert_eq!(session.credential(), None);
        assert_eq!(session.role(), Role::Unknown);
        assert!(store.get(CART_KEY).unwrap().is_some());
    }
}
