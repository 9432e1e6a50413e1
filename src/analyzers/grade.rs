use serde::{Deserialize, Serialize};
use std::fmt;

/// A letter grade as printed on the transcript.
///
/// The thirteen named variants are the recognised vocabulary. Anything else
/// that still looks like a grade token (for instance `I`) is carried verbatim
/// in [`Grade::Other`] so later stages can decide what to do with it.
///
/// | Token    | Points |
/// |----------|--------|
/// | S        | 10     |
/// | A+       | 9      |
/// | A        | 8.5    |
/// | B+       | 8      |
/// | B        | 7.5    |
/// | C+       | 7      |
/// | C        | 6.5    |
/// | D        | 6      |
/// | P        | 5.5    |
/// | F        | 0      |
/// | FE       | 0      |
/// | Absent   | 0      |
/// | Withheld | 0      |
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    S,
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    P,
    F,
    FE,
    Absent,
    Withheld,
    Other(String),
}

impl Grade {
    /// The recognised vocabulary, best grade first.
    pub const VOCABULARY: [Grade; 13] = [
        Grade::S,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::P,
        Grade::F,
        Grade::FE,
        Grade::Absent,
        Grade::Withheld,
    ];

    pub fn from_token(token: &str) -> Self {
        match token {
            "S" => Grade::S,
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "D" => Grade::D,
            "P" => Grade::P,
            "F" => Grade::F,
            "FE" => Grade::FE,
            "Absent" => Grade::Absent,
            "Withheld" => Grade::Withheld,
            other => Grade::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::P => "P",
            Grade::F => "F",
            Grade::FE => "FE",
            Grade::Absent => "Absent",
            Grade::Withheld => "Withheld",
            Grade::Other(token) => token,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Grade::Other(_))
    }

    /// Grades that make a student ineligible for an SGPA.
    ///
    /// Includes the `I` token but not `FE`; this differs from
    /// [`Grade::is_failing`] and the two must stay separate.
    pub fn blocks_sgpa(&self) -> bool {
        match self {
            Grade::F | Grade::Absent | Grade::Withheld => true,
            Grade::Other(token) => token == "I",
            _ => false,
        }
    }

    /// Grades counted as a failed subject in reports and pass/fail tallies.
    pub fn is_failing(&self) -> bool {
        matches!(self, Grade::F | Grade::FE | Grade::Absent | Grade::Withheld)
    }

    /// Default grade-point value, `None` for tokens outside the vocabulary.
    pub fn default_points(&self) -> Option<f64> {
        let points = match self {
            Grade::S => 10.0,
            Grade::APlus => 9.0,
            Grade::A => 8.5,
            Grade::BPlus => 8.0,
            Grade::B => 7.5,
            Grade::CPlus => 7.0,
            Grade::C => 6.5,
            Grade::D => 6.0,
            Grade::P => 5.5,
            Grade::F | Grade::FE | Grade::Absent | Grade::Withheld => 0.0,
            Grade::Other(_) => return None,
        };
        Some(points)
    }
}

impl From<String> for Grade {
    fn from(token: String) -> Self {
        Grade::from_token(&token)
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.label().to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
