//! User management use-case service.
//!
//! # Responsibility
//! - Translate load/create/update/delete actions into remote + store calls.
//! - Validate candidates before any remote write.
//! - Assign identifiers with explicit provenance on create.
//!
//! # Invariants
//! - A failed remote call leaves the store unchanged.
//! - Local-only ids are never sent to the remote collection.
//! - Methods take `&mut self`, so one logical flow runs at a time.

use crate::model::user::{NewUserInput, RecordId, User};
use crate::model::validation::InvalidRecordError;
use crate::remote::user_api::{RemoteSyncError, UserRemote};
use crate::store::user_store::{SortDirection, SortField, StoreCount, UserStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, UserServiceError>;

/// Service error for user use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    /// Candidate failed validation or store shape checks.
    Invalid(InvalidRecordError),
    /// Remote call failed (status or transport).
    Remote(RemoteSyncError),
    /// Target user is not held by the store.
    NotFound(RecordId),
    /// Target user has no id yet.
    MissingId,
    /// Target user exists only locally and cannot be addressed remotely.
    LocalOnly(RecordId),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::MissingId => write!(f, "user has no id"),
            Self::LocalOnly(id) => write!(f, "user {id} exists only locally"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidRecordError> for UserServiceError {
    fn from(value: InvalidRecordError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RemoteSyncError> for UserServiceError {
    fn from(value: RemoteSyncError) -> Self {
        Self::Remote(value)
    }
}

/// Facade owning the user store and the remote collection client.
pub struct UserService<R: UserRemote> {
    remote: R,
    store: UserStore,
}

impl<R: UserRemote> UserService<R> {
    /// Creates a service with an empty store.
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            store: UserStore::new(),
        }
    }

    /// Read access to the store for rendering.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Replaces the store content with the remote collection.
    ///
    /// The current filter term survives the reload. Returns the number of
    /// users loaded.
    ///
    /// # Errors
    /// - `Remote` when the fetch fails.
    /// - `Invalid` when the payload repeats an id.
    ///
    /// The store is unchanged on any error.
    pub async fn load_users(&mut self) -> ServiceResult<usize> {
        let users = self.remote.fetch_all().await.inspect_err(|err| {
            warn!("event=users_load module=service status=error error={err}");
        })?;

        let mut next = UserStore::new();
        next.set_filter(self.store.filter_term());
        for user in users {
            next.add(user)?;
        }

        let count = next.len();
        self.store = next;
        info!("event=users_load module=service status=ok count={count}");
        Ok(count)
    }

    /// Validates, creates remotely and adds one user.
    ///
    /// The remote id is kept when present and not already held. Otherwise a
    /// fresh `RecordId::Local` is assigned; this is the only place local ids
    /// are minted.
    pub async fn create_user(&mut self, input: NewUserInput) -> ServiceResult<User> {
        let candidate = User::from_input(input);
        candidate.validate()?;

        let created = self.remote.create(&candidate).await.inspect_err(|err| {
            warn!("event=user_create module=service status=error error={err}");
        })?;

        let id = match created.id {
            Some(id @ RecordId::Remote(_)) if !self.store.contains(&id) => id,
            other => {
                let local = RecordId::new_local();
                warn!(
                    "event=user_create module=service status=fallback_id remote_id={} local_id={}",
                    other.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string()),
                    local
                );
                local
            }
        };

        let user = candidate.with_id(id.clone());
        self.store.add(user.clone())?;
        info!(
            "event=user_create module=service status=ok id={} remote={}",
            id,
            id.is_remote()
        );
        Ok(user)
    }

    /// Validates and updates one held user.
    ///
    /// Local-only users are updated in the store without a remote call.
    pub async fn update_user(&mut self, user: User) -> ServiceResult<()> {
        let id = user.id.clone().ok_or(UserServiceError::MissingId)?;
        if !self.store.contains(&id) {
            return Err(UserServiceError::NotFound(id));
        }
        user.validate()?;

        if let RecordId::Remote(remote_id) = &id {
            self.remote.update(remote_id, &user).await.inspect_err(|err| {
                warn!("event=user_update module=service status=error id={id} error={err}");
            })?;
        }

        self.store.replace(user);
        info!("event=user_update module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes one held user remotely (remote ids only) and locally.
    pub async fn delete_user(&mut self, id: &RecordId) -> ServiceResult<()> {
        if !self.store.contains(id) {
            return Err(UserServiceError::NotFound(id.clone()));
        }

        if let RecordId::Remote(remote_id) = id {
            self.remote.delete(remote_id).await.inspect_err(|err| {
                warn!("event=user_delete module=service status=error id={id} error={err}");
            })?;
        }

        self.store.remove(id);
        info!("event=user_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Fetches the remote copy of one user without touching the store.
    pub async fn fetch_user(&self, id: &RecordId) -> ServiceResult<User> {
        match id {
            RecordId::Remote(remote_id) => Ok(self.remote.fetch_by_id(remote_id).await?),
            RecordId::Local(_) => Err(UserServiceError::LocalOnly(id.clone())),
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.store.set_filter(term);
    }

    pub fn sort(&mut self, field: SortField, direction: SortDirection) {
        self.store.sort(field, direction);
    }

    pub fn count(&self) -> StoreCount {
        self.store.count()
    }
}
