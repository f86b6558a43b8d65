//! Core domain logic for the user manager.
//! Holds the user store, validation rules and the remote collection adapter.

pub mod logging;
pub mod model;
pub mod remote;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{
    CompanyInfo, NewUserInput, ParseRemoteIdError, RecordId, RemoteId, User,
};
pub use model::validation::{validate_user, InvalidRecordError, ValidationRule};
pub use remote::config::{RemoteConfig, DEFAULT_BASE_URL};
pub use remote::user_api::{HttpUserRemote, RemoteResult, RemoteSyncError, UserRemote};
pub use service::user_service::{ServiceResult, UserService, UserServiceError};
pub use store::user_store::{ParseSortError, SortDirection, SortField, StoreCount, UserStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
