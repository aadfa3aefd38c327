//! The five groups that make up a student record.
//!
//! Each group is an immutable value with a `'static` field table. Fields are
//! private; the only way to obtain a group is through validation.

use serde::Serialize;

use crate::error::FieldErrors;
use crate::schema::{
    BestWorkTime, ClassSection, FieldSpec, FieldValues, HumorStyle, IntegerLiteral, NestedSchema,
    TextLiteral, WeekendStyle,
};
use crate::vocabulary::VocabularyKind;

/// Who the student is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demographics {
    alias: String,
    siblings: i64,
    commute_time_min: i64,
    class_section: ClassSection,
    hometown: String,
}

impl Demographics {
    /// Self-chosen alias only the student will recognize.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn siblings(&self) -> i64 {
        self.siblings
    }

    /// One-way commute to school, in minutes.
    pub fn commute_time_min(&self) -> i64 {
        self.commute_time_min
    }

    pub fn class_section(&self) -> ClassSection {
        self.class_section
    }

    pub fn hometown(&self) -> &str {
        &self.hometown
    }
}

impl NestedSchema for Demographics {
    const GROUP: &'static str = "demographics";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("alias", 3, 30),
        FieldSpec::integer("siblings", 0, 20),
        FieldSpec::integer("commute_time_min", 1, 180),
        FieldSpec::text_literal("class_section", ClassSection::TOKENS),
        FieldSpec::text("hometown", 2, 50),
    ];

    fn assemble(mut values: FieldValues) -> Result<Self, FieldErrors> {
        Ok(Self {
            alias: values.take_text("alias")?,
            siblings: values.take_integer("siblings")?,
            commute_time_min: values.take_integer("commute_time_min")?,
            class_section: values.take_literal("class_section")?,
            hometown: values.take_text("hometown")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Academics {
    academic_interest: i64,
    favorite_subject: String,
}

impl Academics {
    /// Self-reported interest in school work, 1 (low) to 5 (high).
    pub fn academic_interest(&self) -> i64 {
        self.academic_interest
    }

    /// A member of the subjects vocabulary.
    pub fn favorite_subject(&self) -> &str {
        &self.favorite_subject
    }
}

impl NestedSchema for Academics {
    const GROUP: &'static str = "academics";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::integer("academic_interest", 1, 5),
        FieldSpec::vocabulary_member("favorite_subject", VocabularyKind::Subjects),
    ];

    fn assemble(mut values: FieldValues) -> Result<Self, FieldErrors> {
        Ok(Self {
            academic_interest: values.take_integer("academic_interest")?,
            favorite_subject: values.take_text("favorite_subject")?,
        })
    }
}

/// Personality and habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Behavioral {
    social_style: i64,
    weekend_style: WeekendStyle,
    best_work_time: BestWorkTime,
    humor_style: HumorStyle,
}

impl Behavioral {
    /// 1 (introvert) to 5 (extrovert).
    pub fn social_style(&self) -> i64 {
        self.social_style
    }

    pub fn weekend_style(&self) -> WeekendStyle {
        self.weekend_style
    }

    pub fn best_work_time(&self) -> BestWorkTime {
        self.best_work_time
    }

    pub fn humor_style(&self) -> HumorStyle {
        self.humor_style
    }
}

impl NestedSchema for Behavioral {
    const GROUP: &'static str = "behavioral";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::integer("social_style", 1, 5),
        FieldSpec::text_literal("weekend_style", WeekendStyle::TOKENS),
        FieldSpec::integer_literal("best_work_time", BestWorkTime::VALUES),
        FieldSpec::text_literal("humor_style", HumorStyle::TOKENS),
    ];

    fn assemble(mut values: FieldValues) -> Result<Self, FieldErrors> {
        Ok(Self {
            social_style: values.take_integer("social_style")?,
            weekend_style: values.take_literal("weekend_style")?,
            best_work_time: values.take_integer_literal("best_work_time")?,
            humor_style: values.take_literal("humor_style")?,
        })
    }
}

/// Multi-select answers. Each list is non-empty; `"none"` is a valid answer
/// for sports and hobbies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activities {
    sports: Vec<String>,
    music_genres: Vec<String>,
    hobbies: Vec<String>,
}

impl Activities {
    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn music_genres(&self) -> &[String] {
        &self.music_genres
    }

    pub fn hobbies(&self) -> &[String] {
        &self.hobbies
    }
}

impl NestedSchema for Activities {
    const GROUP: &'static str = "activities";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::vocabulary_list("sports", VocabularyKind::Sports),
        FieldSpec::vocabulary_list("music_genres", VocabularyKind::MusicGenres),
        FieldSpec::vocabulary_list("hobbies", VocabularyKind::Hobbies),
    ];

    fn assemble(mut values: FieldValues) -> Result<Self, FieldErrors> {
        Ok(Self {
            sports: values.take_list("sports")?,
            music_genres: values.take_list("music_genres")?,
            hobbies: values.take_list("hobbies")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitalMetrics {
    avg_screen_time_min: i64,
    phone_pickups_daily: i64,
}

impl DigitalMetrics {
    /// Average daily screen time in minutes, at most a full day.
    pub fn avg_screen_time_min(&self) -> i64 {
        self.avg_screen_time_min
    }

    pub fn phone_pickups_daily(&self) -> i64 {
        self.phone_pickups_daily
    }
}

impl NestedSchema for DigitalMetrics {
    const GROUP: &'static str = "digital_metrics";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::integer("avg_screen_time_min", 0, 1440),
        FieldSpec::integer("phone_pickups_daily", 0, 500),
    ];

    fn assemble(mut values: FieldValues) -> Result<Self, FieldErrors> {
        Ok(Self {
            avg_screen_time_min: values.take_integer("avg_screen_time_min")?,
            phone_pickups_daily: values.take_integer("phone_pickups_daily")?,
        })
    }
}
