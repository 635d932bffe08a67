//! Strongly-typed identifiers: rule-language names and pool slot handles.

use std::fmt;
use std::sync::Arc;

/// The rule-language sentence naming a proposition.
///
/// Sentences are the externally-visible identity of propositions: the
/// circuit's base and input views are keyed by them, and the caller
/// addresses proposition values through them. Cloning is cheap (shared
/// `Arc<str>`); equality and hashing are by text.
///
/// There is no interning table — two sentences built from the same text
/// compare equal regardless of provenance. Interning, if wanted, belongs
/// to the rule-parsing layer that produces the reference network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sentence(Arc<str>);

impl Sentence {
    /// Create a sentence from its rule-language text.
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// The sentence text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sentence {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Sentence {
    fn from(text: String) -> Self {
        Self(Arc::from(text.as_str()))
    }
}

/// A player role named by the game rules.
///
/// Same representation and semantics as [`Sentence`]; kept as a distinct
/// type so legal/goal views cannot be keyed by the wrong kind of name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(Arc<str>);

impl Role {
    /// Create a role from its rule-language name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The role name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Index handle naming a slot in a [`Pool`](crate::Pool).
///
/// This is the reframed pointer of the pooled designs: items never move
/// while allocated, so a slot index identifies an item for the life of the
/// pool, and "dereferencing" happens through `Pool::get`/`get_mut`. Handles
/// are plain data — copying one does not confer access, and using a handle
/// after freeing its slot is a caller contract violation caught by the
/// pool's liveness tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotRef(pub u32);

impl SlotRef {
    /// The slot index as a `usize`, for direct indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotRef {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
