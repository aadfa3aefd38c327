//! Process-wide holder for the active vocabulary bundle.
//!
//! This module provides [`VocabularyRegistry`], which publishes a
//! [`Vocabularies`] bundle to any number of concurrent validations and lets
//! an operator replace it at runtime without blocking readers for longer
//! than an `Arc` clone.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::vocabulary::{Vocabularies, VocabularyError};

/// A thread-safe, swappable reference to the current vocabularies.
///
/// # Thread Safety
///
/// The registry stores `Arc<Vocabularies>` behind a `RwLock`:
/// - Readers take a [`snapshot`](Self::snapshot) and release the lock at once,
///   so a validation sees one bundle from start to finish
/// - [`replace`](Self::replace) swaps the whole bundle; nothing is mutated in place
///
/// Clones share the same slot, so a replacement is visible through every clone.
///
/// # Example
///
/// ```rust
/// use classroll::{Vocabularies, VocabularyKind, VocabularyRegistry};
///
/// let registry = VocabularyRegistry::new();
/// let before = registry.snapshot();
///
/// registry.replace(Vocabularies::from_json_str(r#"{"sports": ["chess"]}"#).unwrap());
///
/// assert!(!before.get(VocabularyKind::Sports).contains("chess"));
/// assert!(registry.snapshot().get(VocabularyKind::Sports).contains("chess"));
/// ```
#[derive(Clone)]
pub struct VocabularyRegistry {
    current: Arc<RwLock<Arc<Vocabularies>>>,
}

impl VocabularyRegistry {
    /// Creates a registry holding the built-in vocabularies.
    pub fn new() -> Self {
        Self::with_vocabularies(Vocabularies::builtin())
    }

    pub fn with_vocabularies(vocabularies: Arc<Vocabularies>) -> Self {
        Self {
            current: Arc::new(RwLock::new(vocabularies)),
        }
    }

    /// The bundle in effect right now.
    pub fn snapshot(&self) -> Arc<Vocabularies> {
        Arc::clone(&self.current.read())
    }

    /// Publishes a new bundle, returning the one it replaced.
    pub fn replace(&self, vocabularies: Vocabularies) -> Arc<Vocabularies> {
        let next = Arc::new(vocabularies);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("vocabularies replaced");
        previous
    }

    /// Restores the built-in vocabularies.
    pub fn reset(&self) {
        *self.current.write() = Vocabularies::builtin();
    }

    /// Reads a JSON vocabulary config from disk and publishes it.
    ///
    /// On any error the current bundle stays in effect.
    ///
    /// # Errors
    ///
    /// Returns `VocabularyError::Io` if the file cannot be read, `Parse` if it
    /// is not a valid config document, or the invariant violations found in
    /// the supplied token lists.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(), VocabularyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VocabularyError::Io(path.to_path_buf(), e))?;

        match Vocabularies::from_json_str(&content) {
            Ok(vocabularies) => {
                self.replace(vocabularies);
                info!(path = %path.display(), "loaded vocabulary config");
                Ok(())
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "rejected vocabulary config");
                Err(error)
            }
        }
    }
}

impl Default for VocabularyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VocabularyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyRegistry")
            .field("current", &*self.current.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::VocabularyKind;
    use std::io::Write;

    #[test]
    fn test_new_uses_builtins() {
        let registry = VocabularyRegistry::new();
        assert!(Arc::ptr_eq(&registry.snapshot(), &Vocabularies::builtin()));
    }

    #[test]
    fn test_replace_is_visible_through_clones() {
        let registry = VocabularyRegistry::new();
        let clone = registry.clone();

        let previous =
            registry.replace(Vocabularies::from_json_str(r#"{"hobbies": ["knitting"]}"#).unwrap());

        assert!(previous.get(VocabularyKind::Hobbies).contains("gaming"));
        assert!(clone.snapshot().get(VocabularyKind::Hobbies).contains("knitting"));

        clone.reset();
        assert!(registry.snapshot().get(VocabularyKind::Hobbies).contains("gaming"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"subjects": ["math", "latin"]}}"#).unwrap();

        let registry = VocabularyRegistry::new();
        registry.load_file(file.path()).unwrap();

        let subjects = registry.snapshot();
        assert!(subjects.get(VocabularyKind::Subjects).contains("latin"));
        assert_eq!(subjects.get(VocabularyKind::Subjects).len(), 2);
    }

    #[test]
    fn test_load_file_failure_keeps_current() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"subjects": ["Math"]}}"#).unwrap();

        let registry = VocabularyRegistry::new();
        assert!(registry.load_file(file.path()).is_err());
        assert!(Arc::ptr_eq(&registry.snapshot(), &Vocabularies::builtin()));

        let missing = registry.load_file("/nonexistent/vocabularies.json");
        assert!(matches!(missing, Err(VocabularyError::Io(..))));
    }
}
