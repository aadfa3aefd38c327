//! Closed literal sets as Rust enums.
//!
//! Each enum lists its tokens once; the field table uses that list for the
//! membership check and assembly parses the checked token back into the enum
//! with an exhaustive match.

use std::fmt;

use serde::{Serialize, Serializer};

/// An enum whose variants are spelled as lowercase string tokens.
pub trait TextLiteral: Sized + Copy + 'static {
    /// Every accepted token, in declaration order.
    const TOKENS: &'static [&'static str];

    fn as_str(&self) -> &'static str;

    /// Parses an already-normalized token.
    fn parse(token: &str) -> Option<Self>;
}

/// An enum whose variants are spelled as integers.
pub trait IntegerLiteral: Sized + Copy + 'static {
    const VALUES: &'static [i64];

    fn as_i64(&self) -> i64;

    fn from_i64(value: i64) -> Option<Self>;
}

macro_rules! text_literal {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl TextLiteral for $name {
            const TOKENS: &'static [&'static str] = &[$($token),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            fn parse(token: &str) -> Option<Self> {
                match token {
                    $($token => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

text_literal! {
    /// Class section a student is enrolled in.
    pub enum ClassSection {
        A => "a",
        B => "b",
        C => "c",
        D => "d",
        E => "e",
    }
}

text_literal! {
    /// Preferred way to spend a weekend.
    pub enum WeekendStyle {
        Chill => "chill",
        Party => "party",
        Explore => "explore",
        Study => "study",
    }
}

text_literal! {
    pub enum HumorStyle {
        Dry => "dry",
        Quirky => "quirky",
        Dark => "dark",
        Basic => "basic",
    }
}

/// Time of day a student works best, answered on the survey as 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BestWorkTime {
    Morning,
    Midday,
    Evening,
    Night,
}

impl IntegerLiteral for BestWorkTime {
    const VALUES: &'static [i64] = &[1, 2, 3, 4];

    fn as_i64(&self) -> i64 {
        match self {
            BestWorkTime::Morning => 1,
            BestWorkTime::Midday => 2,
            BestWorkTime::Evening => 3,
            BestWorkTime::Night => 4,
        }
    }

    fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(BestWorkTime::Morning),
            2 => Some(BestWorkTime::Midday),
            3 => Some(BestWorkTime::Evening),
            4 => Some(BestWorkTime::Night),
            _ => None,
        }
    }
}

impl fmt::Display for BestWorkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl Serialize for BestWorkTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}
