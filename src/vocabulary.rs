//! Controlled vocabularies for multi-select and subject fields.
//!
//! A [`Vocabulary`] is an immutable, named, ordered set of lowercase tokens.
//! The four built-in sets live in constants; [`Vocabularies`] bundles one of
//! each so a validation call consults a single consistent snapshot.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;
use serde::Deserialize;

pub const SPORTS: &[&str] = &[
    "soccer",
    "basketball",
    "volleyball",
    "tennis",
    "swimming",
    "rowing",
    "running",
    "cycling",
    "skiing",
    "martial_arts",
    "none",
];

pub const MUSIC_GENRES: &[&str] = &[
    "pop",
    "rock",
    "hip_hop",
    "rap",
    "edm",
    "classical",
    "jazz",
    "r_and_b",
    "country",
    "metal",
    "indie",
    "latin",
    "kpop",
    "other",
];

pub const HOBBIES: &[&str] = &[
    "gaming",
    "reading",
    "cooking",
    "photography",
    "art",
    "music",
    "travel",
    "hiking",
    "movies",
    "anime",
    "programming",
    "hackathons",
    "fashion",
    "fitness",
    "social_media",
    "podcasts",
    "crafts",
    "volunteering",
    "languages",
    "writing",
    "none",
];

pub const SUBJECTS: &[&str] = &[
    "math",
    "physics",
    "chemistry",
    "biology",
    "computer_science",
    "literature",
    "history",
    "art",
    "music",
    "economics",
    "philosophy",
    "physical_education",
    "foreign_languages",
    "engineering",
    "other",
];

/// Names one of the four vocabularies a field can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    Sports,
    MusicGenres,
    Hobbies,
    Subjects,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 4] = [
        VocabularyKind::Sports,
        VocabularyKind::MusicGenres,
        VocabularyKind::Hobbies,
        VocabularyKind::Subjects,
    ];

    /// The key used for this vocabulary in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            VocabularyKind::Sports => "sports",
            VocabularyKind::MusicGenres => "music_genres",
            VocabularyKind::Hobbies => "hobbies",
            VocabularyKind::Subjects => "subjects",
        }
    }

    /// What one member of this vocabulary is called in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            VocabularyKind::Sports => "sport",
            VocabularyKind::MusicGenres => "music genre",
            VocabularyKind::Hobbies => "hobby",
            VocabularyKind::Subjects => "subject",
        }
    }

    fn builtin_tokens(&self) -> &'static [&'static str] {
        match self {
            VocabularyKind::Sports => SPORTS,
            VocabularyKind::MusicGenres => MUSIC_GENRES,
            VocabularyKind::Hobbies => HOBBIES,
            VocabularyKind::Subjects => SUBJECTS,
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable named set of allowed tokens.
///
/// Tokens are distinct, lowercase and trimmed. Lookups are exact; callers
/// normalize input with [`normalize_scalar`](crate::normalize_scalar) first.
///
/// # Example
///
/// ```rust
/// use classroll::Vocabulary;
///
/// let colors = Vocabulary::new("colors", ["red", "green"]).unwrap();
/// assert!(colors.contains("red"));
/// assert!(!colors.contains("Red"));
///
/// assert!(Vocabulary::new("colors", ["Red"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    tokens: IndexSet<String>,
}

impl Vocabulary {
    /// Builds a vocabulary, checking every token against the invariant.
    ///
    /// All violations are reported together.
    pub fn new<I, S>(name: impl Into<String>, tokens: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = IndexSet::new();
        let mut problems = Vec::new();

        for token in tokens {
            let token = token.into();
            if token.trim() != token || token.to_lowercase() != token || token.is_empty() {
                problems.push(VocabularyError::NotNormalized {
                    vocabulary: name.clone(),
                    token,
                });
            } else if set.contains(&token) {
                problems.push(VocabularyError::Duplicate {
                    vocabulary: name.clone(),
                    token,
                });
            } else {
                set.insert(token);
            }
        }

        if set.is_empty() && problems.is_empty() {
            problems.push(VocabularyError::Empty {
                vocabulary: name.clone(),
            });
        }

        match problems.len() {
            0 => Ok(Self { name, tokens: set }),
            1 => Err(problems.remove(0)),
            _ => Err(VocabularyError::Multiple(problems)),
        }
    }

    fn builtin(kind: VocabularyKind) -> Self {
        Self {
            name: kind.name().to_string(),
            tokens: kind
                .builtin_tokens()
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Allowed tokens in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The whole set rendered for diagnostics, e.g. `[pop, rock, jazz]`.
    pub fn allowed_list(&self) -> String {
        format!("[{}]", self.tokens.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
    }
}

/// One vocabulary of each kind, observed together by a validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabularies {
    sports: Vocabulary,
    music_genres: Vocabulary,
    hobbies: Vocabulary,
    subjects: Vocabulary,
}

static BUILTIN: OnceLock<Arc<Vocabularies>> = OnceLock::new();

impl Vocabularies {
    /// The built-in bundle, constructed once per process.
    pub fn builtin() -> Arc<Vocabularies> {
        Arc::clone(BUILTIN.get_or_init(|| {
            Arc::new(Vocabularies {
                sports: Vocabulary::builtin(VocabularyKind::Sports),
                music_genres: Vocabulary::builtin(VocabularyKind::MusicGenres),
                hobbies: Vocabulary::builtin(VocabularyKind::Hobbies),
                subjects: Vocabulary::builtin(VocabularyKind::Subjects),
            })
        }))
    }

    pub fn get(&self, kind: VocabularyKind) -> &Vocabulary {
        match kind {
            VocabularyKind::Sports => &self.sports,
            VocabularyKind::MusicGenres => &self.music_genres,
            VocabularyKind::Hobbies => &self.hobbies,
            VocabularyKind::Subjects => &self.subjects,
        }
    }

    /// Builds a bundle from configuration, keeping built-ins for absent keys.
    ///
    /// Every supplied list is checked; all problems across all lists are
    /// returned together.
    pub fn from_config(config: &VocabularyConfig) -> Result<Self, VocabularyError> {
        let mut problems = Vec::new();
        let mut build = |kind: VocabularyKind, tokens: &Option<Vec<String>>| match tokens {
            None => Some(Vocabulary::builtin(kind)),
            Some(tokens) => match Vocabulary::new(kind.name(), tokens.iter().cloned()) {
                Ok(vocabulary) => Some(vocabulary),
                Err(VocabularyError::Multiple(errors)) => {
                    problems.extend(errors);
                    None
                }
                Err(error) => {
                    problems.push(error);
                    None
                }
            },
        };

        let sports = build(VocabularyKind::Sports, &config.sports);
        let music_genres = build(VocabularyKind::MusicGenres, &config.music_genres);
        let hobbies = build(VocabularyKind::Hobbies, &config.hobbies);
        let subjects = build(VocabularyKind::Subjects, &config.subjects);

        match (sports, music_genres, hobbies, subjects) {
            (Some(sports), Some(music_genres), Some(hobbies), Some(subjects)) => Ok(Self {
                sports,
                music_genres,
                hobbies,
                subjects,
            }),
            _ if problems.len() == 1 => Err(problems.remove(0)),
            _ => Err(VocabularyError::Multiple(problems)),
        }
    }

    /// Parses a JSON configuration document and builds a bundle from it.
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let config: VocabularyConfig = serde_json::from_str(json).map_err(VocabularyError::Parse)?;
        Self::from_config(&config)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Vocabularies>();
    assert_sync::<Vocabularies>();
};

/// Vocabulary overrides as read from a JSON file.
///
/// ```json
/// { "sports": ["soccer", "tennis", "none"] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub sports: Option<Vec<String>>,
    #[serde(default)]
    pub music_genres: Option<Vec<String>>,
    #[serde(default)]
    pub hobbies: Option<Vec<String>>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

/// Errors building or loading vocabularies.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("vocabulary '{vocabulary}' has no tokens")]
    Empty { vocabulary: String },

    #[error("vocabulary '{vocabulary}': token '{token}' must be non-empty, lowercase and trimmed")]
    NotNormalized { vocabulary: String, token: String },

    #[error("vocabulary '{vocabulary}': token '{token}' appears more than once")]
    Duplicate { vocabulary: String, token: String },

    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("parse error in vocabulary config: {0}")]
    Parse(serde_json::Error),

    #[error("{} vocabulary problems: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<VocabularyError>),
}

fn join_errors(errors: &[VocabularyError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
