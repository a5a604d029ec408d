//! Ordered anonymous-participant name pool.
//!
//! The bundle's `names` payload is a comma-separated ordered sequence of
//! display names. Order defines assignment priority: the first unused
//! name goes to the next anonymous participant. The pool is finite and
//! does not define an exhaustion fallback; callers get `None` and decide
//! (cycle, number, prompt) on their side.

use std::fmt;

/// Defects found while parsing a raw name-pool payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePoolError {
    /// The payload contained no entries at all.
    Empty,
    /// An entry was empty after trimming.
    EmptyEntry {
        /// Zero-based position of the offending entry.
        index: usize,
    },
    /// The same name appeared more than once.
    Duplicate(String),
}

impl fmt::Display for NamePoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name pool is empty"),
            Self::EmptyEntry { index } => {
                write!(f, "name pool entry {index} is empty after trimming")
            }
            Self::Duplicate(name) => write!(f, "duplicate name in pool: '{name}'"),
        }
    }
}

impl std::error::Error for NamePoolError {}

/// A finite ordered pool of anonymous display names.
#[derive(Debug, Clone)]
pub struct NamePool {
    names: Vec<String>,
    used: Vec<bool>,
}

impl NamePool {
    /// Parse a comma-separated payload into a pool.
    ///
    /// Entries are trimmed. Empty entries and duplicates are authoring
    /// defects and rejected.
    pub fn parse(raw: &str) -> Result<Self, NamePoolError> {
        let mut names: Vec<String> = Vec::new();
        for (index, entry) in raw.split(',').enumerate() {
            let entry = entry.trim();
            if entry.is_empty() {
                // A lone empty payload reads as "no entries", not a
                // malformed one.
                if index == 0 && raw.trim().is_empty() {
                    return Err(NamePoolError::Empty);
                }
                return Err(NamePoolError::EmptyEntry { index });
            }
            if names.iter().any(|n| n == entry) {
                return Err(NamePoolError::Duplicate(entry.to_string()));
            }
            names.push(entry.to_string());
        }
        let used = vec![false; names.len()];
        Ok(Self { names, used })
    }

    /// Assign the first unused name, in pool order.
    ///
    /// Returns `None` when every name is taken.
    pub fn assign(&mut self) -> Option<&str> {
        let index = self.used.iter().position(|taken| !taken)?;
        self.used[index] = true;
        Some(self.names[index].as_str())
    }

    /// Return a previously assigned name to the pool.
    ///
    /// Returns `true` if the name was found and was assigned.
    pub fn release(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(index) if self.used[index] => {
                self.used[index] = false;
                true
            }
            _ => false,
        }
    }

    /// Total pool size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the pool holds no names at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of names still available.
    #[must_use]
    pub fn available(&self) -> usize {
        self.used.iter().filter(|taken| !**taken).count()
    }

    /// Iterate over all names in assignment order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
