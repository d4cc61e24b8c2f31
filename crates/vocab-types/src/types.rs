use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
///
/// Depending on the backing store ids come back either as JSON numbers or
/// as strings, so both are accepted. Equality goes through the textual
/// form: `Id::Num(3) == Id::Text("3")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(u64),
    Text(String),
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Id::Num(a), Id::Num(b)) => a == b,
            (Id::Text(a), Id::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id::Num(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        match value.parse::<u64>() {
            Ok(n) => Id::Num(n),
            Err(_) => Id::Text(value.to_string()),
        }
    }
}

/// Lifecycle step of a collection request, used to pick a fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// A record kept in a remote collection and mirrored locally
pub trait Entity: Clone + Send + Sync + DeserializeOwned + Serialize + 'static {
    /// Body sent on create and update
    type Draft: Serialize + Send + Sync + Clone;

    /// Path segment under the API base url
    const RESOURCE: &'static str;

    fn id(&self) -> &Id;

    /// Message shown when the server gives no reason for a failure
    fn default_error(op: Operation) -> &'static str;
}

/// Stored user record as returned by `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub full_name: String,
    pub email: String,
    /// PHC-formatted password hash
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Registration body for `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Public part of a user, the only thing kept in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Id,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Id,
    pub name: String,
    #[serde(default, alias = "topic")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Copy with surrounding whitespace stripped from both fields
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

impl Entity for Category {
    type Draft = CategoryDraft;

    const RESOURCE: &'static str = "categories";

    fn id(&self) -> &Id {
        &self.id
    }

    fn default_error(op: Operation) -> &'static str {
        match op {
            Operation::List => "Failed to load categories!",
            Operation::Create => "Failed to add category!",
            Operation::Update => "Failed to update category!",
            Operation::Delete => "Failed to delete category!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: Id,
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub is_learned: bool,
}

impl Word {
    /// Draft carrying every field of this word unchanged
    pub fn to_draft(&self) -> WordDraft {
        WordDraft {
            word: self.word.clone(),
            meaning: self.meaning.clone(),
            topic: self.topic.clone(),
            category_id: self.category_id.clone(),
            is_learned: self.is_learned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDraft {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub is_learned: bool,
}

impl WordDraft {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category_id: impl Into<Id>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

impl Entity for Word {
    type Draft = WordDraft;

    const RESOURCE: &'static str = "vocab";

    fn id(&self) -> &Id {
        &self.id
    }

    fn default_error(op: Operation) -> &'static str {
        match op {
            Operation::List => "Failed to load words!",
            Operation::Create => "Failed to add word!",
            Operation::Update => "Failed to update word!",
            Operation::Delete => "Failed to delete word!",
        }
    }
}

/// Category restriction used by the word list and the flashcard deck
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Id),
}

impl CategoryFilter {
    pub fn matches(&self, word: &Word) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => word.category_id.as_ref() == Some(id),
        }
    }
}
