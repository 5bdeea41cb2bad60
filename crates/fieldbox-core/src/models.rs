//! Domain models for the fieldbox knowledge portal.
//!
//! The catalog side (documents, drafts, updates) and the portal side
//! (accounts, sessions, conversation turns, explanations) share this module
//! so every crate speaks the same types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// =============================================================================
// EQUIPMENT CATEGORIES
// =============================================================================

/// Closed enumeration of equipment categories a document can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentCategory {
    Server,
    Storage,
    Network,
    /// Tape libraries
    Library,
    General,
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "SERVER"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Network => write!(f, "NETWORK"),
            Self::Library => write!(f, "LIBRARY"),
            Self::General => write!(f, "GENERAL"),
        }
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SERVER" => Ok(Self::Server),
            "STORAGE" => Ok(Self::Storage),
            "NETWORK" => Ok(Self::Network),
            "LIBRARY" => Ok(Self::Library),
            "GENERAL" => Ok(Self::General),
            other => Err(Error::InvalidInput(format!(
                "Unknown equipment category: {}",
                other
            ))),
        }
    }
}

/// Which documents are visible before text search is applied.
///
/// `ALL` and `FAVORITES` are view selectors, not equipment categories, and
/// are never matched against [`Document::category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Favorites,
    Equipment(EquipmentCategory),
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Favorites => write!(f, "FAVORITES"),
            Self::Equipment(category) => write!(f, "{}", category),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "FAVORITES" => Ok(Self::Favorites),
            other => other.parse::<EquipmentCategory>().map(Self::Equipment),
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// One maintenance procedure in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque stable id, unique, assigned at creation, never reused.
    pub id: String,
    pub title: String,
    pub category: EquipmentCategory,
    pub manufacturer: String,
    pub model_series: String,
    /// Opaque URL into the external document storage.
    pub box_link: String,
    /// Calendar date of the last content mutation (no time component).
    pub last_updated: NaiveDate,
    pub is_favorite: bool,
    /// Ordered free-text tags; case-sensitive as stored, matched
    /// case-insensitively. May be empty.
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a document; the store assigns `id`, `last_updated`,
/// and `is_favorite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub category: EquipmentCategory,
    pub manufacturer: String,
    pub model_series: String,
    pub box_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The full set of mutable content fields; an update replaces them all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub title: String,
    pub category: EquipmentCategory,
    pub manufacturer: String,
    pub model_series: String,
    pub box_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Portal user role. Fixed at account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    General,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::General => write!(f, "GENERAL"),
        }
    }
}

/// A portal user account, including the login secret.
///
/// Credentials are stored in plain text in process memory for the lifetime
/// of the process; [`Profile`] is the projection served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Login key. Expected unique; uniqueness is not actively enforced.
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload for creating an account; the store assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Client-facing account projection without the secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for Profile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

// =============================================================================
// CONVERSATION
// =============================================================================

/// Which side of the conversation produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSpeaker {
    User,
    Assistant,
}

/// One turn in the assistant conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: ChatSpeaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: ChatSpeaker::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: ChatSpeaker::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// GROUNDED EXPLANATIONS
// =============================================================================

/// A source the model consulted for a grounded explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// A rendered term explanation: text plus a uri-unique, order-preserving
/// source list. Ephemeral; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub sources: Vec<Source>,
}

/// A raw grounding citation as returned by the model boundary. The title is
/// optional on the wire; the uri is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: String,
}

/// Raw result of a search-grounded generation call, before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundedReply {
    pub text: Option<String>,
    pub citations: Vec<Citation>,
}
