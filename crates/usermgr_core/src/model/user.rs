//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user record exchanged with the remote collection.
//! - Carry identifier provenance explicitly (remote vs locally generated).
//! - Provide read-only presentation helpers that callers use for display.
//!
//! # Invariants
//! - `id` is `None` only while a record has not been created remotely yet.
//! - Ids decoded from remote payloads are always `RecordId::Remote`.
//! - `address` and `company` are carried opaquely; core never rewrites them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned by the remote collection.
///
/// Carried exactly as the remote sent it: a JSON number or a JSON string.
/// Numbers sort before text; numbers compare numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(u64),
    Text(String),
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for RemoteId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Blank text cannot address a remote user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRemoteIdError;

impl Display for ParseRemoteIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "user id must not be empty")
    }
}

impl Error for ParseRemoteIdError {}

impl FromStr for RemoteId {
    type Err = ParseRemoteIdError;

    /// Digits parse as a numeric id, any other non-blank text as a text id.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ParseRemoteIdError);
        }
        Ok(trimmed
            .parse::<u64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(trimmed.to_string())))
    }
}

/// Identifier of one user record.
///
/// Provenance is decided by who assigned the id, never by its shape: every
/// id read from the wire is `Remote`, and `Local` ids are minted only when
/// a create call returns no usable id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Authoritative identifier assigned by the remote collection.
    Remote(RemoteId),
    /// Locally-unique placeholder used when the remote returned no usable id.
    Local(Uuid),
}

impl RecordId {
    /// Wraps an identifier assigned by the remote collection.
    pub fn remote(id: impl Into<RemoteId>) -> Self {
        Self::Remote(id.into())
    }

    /// Generates a fresh local identifier.
    pub fn new_local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    /// Returns whether this id was assigned by the remote collection.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<RemoteId> for RecordId {
    fn from(value: RemoteId) -> Self {
        Self::Remote(value)
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Remote(a), Self::Remote(b)) => a.cmp(b),
            (Self::Local(a), Self::Local(b)) => a.cmp(b),
            (Self::Remote(_), Self::Local(_)) => Ordering::Less,
            (Self::Local(_), Self::Remote(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(id) => write!(f, "{id}"),
            Self::Local(id) => write!(f, "{id}"),
        }
    }
}

/// Wire form of `User::id`.
///
/// Decoding always yields `RecordId::Remote`. Local ids are never sent, so
/// they encode as `null` like an unassigned id.
mod wire_id {
    use super::{RecordId, RemoteId};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        id: &Option<RecordId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match id {
            Some(RecordId::Remote(remote)) => serializer.serialize_some(remote),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RecordId>, D::Error> {
        Ok(Option::<RemoteId>::deserialize(deserializer)?.map(RecordId::Remote))
    }
}

/// Canonical user record.
///
/// Missing string fields decode as empty strings so partially populated
/// remote payloads still produce a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// `None` until the record has been created remotely.
    #[serde(with = "wire_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// Free-form postal address object.
    pub address: Map<String, Value>,
    /// Free-form company object.
    pub company: Map<String, Value>,
}

/// Form input for a user that does not exist remotely yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUserInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// Company projection extracted from the opaque `company` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    /// Read from `company.catchPhrase`.
    pub slogan: String,
    /// Read from `company.bs`.
    pub business: String,
}

impl User {
    /// Builds an unassigned user from form input.
    ///
    /// `username` is derived from `name`: lowercased, whitespace removed.
    pub fn from_input(input: NewUserInput) -> Self {
        let username = derive_username(&input.name);
        Self {
            id: None,
            name: input.name,
            username,
            email: input.email,
            phone: input.phone,
            website: input.website,
            address: Map::new(),
            company: Map::new(),
        }
    }

    /// Returns a copy of this user carrying `id`.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Name used for display; falls back to `username`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }

    /// Phone number with every non-digit character removed.
    pub fn clean_phone(&self) -> String {
        self.phone.chars().filter(char::is_ascii_digit).collect()
    }

    /// Website as an absolute URL (`https://` added when no scheme is set).
    pub fn website_url(&self) -> String {
        if self.website.is_empty() {
            return String::new();
        }
        if self.website.starts_with("http://") || self.website.starts_with("https://") {
            return self.website.clone();
        }
        format!("https://{}", self.website)
    }

    /// Formats `street[, suite], city zipcode`.
    ///
    /// Returns `None` when the address has no street.
    pub fn full_address(&self) -> Option<String> {
        let street = object_str(&self.address, "street").filter(|value| !value.is_empty())?;
        let mut line = street.to_string();
        if let Some(suite) = object_str(&self.address, "suite").filter(|value| !value.is_empty()) {
            line.push_str(", ");
            line.push_str(suite);
        }
        let city = object_str(&self.address, "city").unwrap_or_default();
        let zipcode = object_str(&self.address, "zipcode").unwrap_or_default();
        line.push_str(&format!(", {city} {zipcode}"));
        Some(line)
    }

    /// Extracts company name, slogan and business line.
    ///
    /// Returns `None` when the company has no name.
    pub fn company_info(&self) -> Option<CompanyInfo> {
        let name = object_str(&self.company, "name").filter(|value| !value.is_empty())?;
        Some(CompanyInfo {
            name: name.to_string(),
            slogan: object_str(&self.company, "catchPhrase")
                .unwrap_or_default()
                .to_string(),
            business: object_str(&self.company, "bs")
                .unwrap_or_default()
                .to_string(),
        })
    }
}

fn derive_username(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn object_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}
