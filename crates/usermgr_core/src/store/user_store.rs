//! In-memory user store with a derived filtered view.
//!
//! # Responsibility
//! - Hold the authoritative insertion-ordered user sequence.
//! - Maintain the filtered view for the current search term.
//! - Provide lookup, replace and sort over both views.
//!
//! # Invariants
//! - Assigned ids are unique among held users.
//! - After every mutating call the filtered view is exactly the subsequence
//!   of the full sequence matching the current term.
//! - Failed operations leave both views untouched.

use crate::model::user::{RecordId, User};
use crate::model::validation::InvalidRecordError;
use log::debug;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sortable user field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Username,
    Email,
    Phone,
    Website,
    Id,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Rejected sort field or direction name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSortError {
    UnknownField(String),
    UnknownDirection(String),
}

impl Display for ParseSortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(value) => write!(
                f,
                "unknown sort field `{value}`; expected name|username|email|phone|website|id"
            ),
            Self::UnknownDirection(value) => {
                write!(f, "unknown sort direction `{value}`; expected asc|desc")
            }
        }
    }
}

impl Error for ParseSortError {}

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "website" => Ok(Self::Website),
            "id" => Ok(Self::Id),
            other => Err(ParseSortError::UnknownField(other.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseSortError::UnknownDirection(other.to_string())),
        }
    }
}

/// Sizes of the full sequence and the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCount {
    pub total: usize,
    pub filtered: usize,
}

/// Authoritative in-memory user collection.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
    /// Indices into `users`, ascending.
    filtered: Vec<usize>,
    /// Lowercase search term; empty means no filter.
    filter_term: String,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one user and refreshes the filtered view.
    ///
    /// # Errors
    /// - Returns `InvalidRecordError::DuplicateId` when the user's assigned id
    ///   is already held. The store is unchanged in that case.
    pub fn add(&mut self, user: User) -> Result<(), InvalidRecordError> {
        if let Some(id) = &user.id {
            if self.position(id).is_some() {
                return Err(InvalidRecordError::DuplicateId(id.clone()));
            }
        }

        self.users.push(user);
        self.apply_filter();
        debug!(
            "event=user_add module=store status=ok total={}",
            self.users.len()
        );
        Ok(())
    }

    /// Removes the first user with `id`.
    ///
    /// Returns `false` and leaves the store unchanged when `id` is not held.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.users.remove(index);
        self.apply_filter();
        debug!(
            "event=user_remove module=store status=ok total={}",
            self.users.len()
        );
        true
    }

    /// Replaces the held user carrying the same id, keeping its position.
    ///
    /// Returns `false` when `user` has no id or the id is not held.
    pub fn replace(&mut self, user: User) -> bool {
        let Some(index) = user.id.as_ref().and_then(|id| self.position(id)) else {
            return false;
        };

        self.users[index] = user;
        self.apply_filter();
        true
    }

    /// Looks up one user by id.
    pub fn get_by_id(&self, id: &RecordId) -> Option<&User> {
        self.users.iter().find(|user| user.id.as_ref() == Some(id))
    }

    /// Sets the search term and recomputes the filtered view.
    ///
    /// Matching is case-insensitive substring containment against name,
    /// email and phone. An empty term disables filtering.
    pub fn set_filter(&mut self, term: &str) {
        self.filter_term = term.to_lowercase();
        self.apply_filter();
    }

    /// Returns the current lowercase search term.
    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    /// Empties both views. The search term is kept.
    pub fn clear(&mut self) {
        self.users.clear();
        self.filtered.clear();
    }

    /// Sorts both views by `field`.
    ///
    /// String fields compare case-insensitively. The sort is stable, so
    /// equal keys keep their relative order.
    pub fn sort(&mut self, field: SortField, direction: SortDirection) {
        self.users.sort_by(|a, b| {
            let ordering = compare_by(field, a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        self.apply_filter();
    }

    pub fn count(&self) -> StoreCount {
        StoreCount {
            total: self.users.len(),
            filtered: self.filtered.len(),
        }
    }

    /// Full sequence in current order.
    pub fn all(&self) -> &[User] {
        &self.users
    }

    /// Filtered view in current order.
    pub fn filtered(&self) -> Vec<&User> {
        self.filtered
            .iter()
            .map(|&index| &self.users[index])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns whether `id` is held.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.users
            .iter()
            .position(|user| user.id.as_ref() == Some(id))
    }

    fn apply_filter(&mut self) {
        let term = self.filter_term.as_str();
        self.filtered = self
            .users
            .iter()
            .enumerate()
            .filter(|(_, user)| term.is_empty() || matches_term(user, term))
            .map(|(index, _)| index)
            .collect();
    }
}

fn matches_term(user: &User, term: &str) -> bool {
    [&user.name, &user.email, &user.phone]
        .into_iter()
        .any(|value| value.to_lowercase().contains(term))
}

fn compare_by(field: SortField, a: &User, b: &User) -> Ordering {
    let text = |user: &User| -> String {
        match field {
            SortField::Name => user.name.to_lowercase(),
            SortField::Username => user.username.to_lowercase(),
            SortField::Email => user.email.to_lowercase(),
            SortField::Phone => user.phone.to_lowercase(),
            SortField::Website => user.website.to_lowercase(),
            SortField::Id => String::new(),
        }
    };

    match field {
        SortField::Id => a.id.cmp(&b.id),
        _ => text(a).cmp(&text(b)),
    }
}
