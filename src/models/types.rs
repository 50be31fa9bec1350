//! Common domain type definitions
//!
//! This module contains the enum types and identifiers shared by the
//! registry, the inference engine and the presenters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StemmaError;

/// Identifier of a person
///
/// Identifiers coming from the source data are positive. Negative identifiers
/// are reserved for placeholder persons synthesized while filling gaps in
/// family trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
    /// Raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this identifier belongs to a synthesized placeholder
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for PersonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Male gender
    Male,
    /// Female gender
    Female,
    /// Unknown or not specified
    #[default]
    Unknown,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        let s = s.trim().to_lowercase();
        // DPRR exports use entity URIs such as `.../Sex/Female`
        let s = s.rsplit('/').next().unwrap_or_default();
        match s {
            "m" | "male" | "1" => Self::Male,
            "f" | "female" | "2" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Highest political or religious distinction held by a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Office {
    /// Held the consulship
    Consul,
    /// Held the censorship
    Censor,
    /// Held the praetorship
    Praetor,
    /// Celebrated a triumph
    Triumphator,
}

impl Office {
    /// Parse an office label.
    ///
    /// Accepts the DPRR "highest office" strings, which start with the
    /// abbreviated office (`cos. 509`, `cens. 443`, `pr. 366`), as well as the
    /// plain lowercase names. Anything else means no ranked office.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.starts_with("cos.") {
            return Some(Self::Consul);
        }
        if label.starts_with("cens.") {
            return Some(Self::Censor);
        }
        if label.starts_with("pr.") {
            return Some(Self::Praetor);
        }
        match label.to_lowercase().as_str() {
            "consul" => Some(Self::Consul),
            "censor" => Some(Self::Censor),
            "praetor" => Some(Self::Praetor),
            "triumphator" => Some(Self::Triumphator),
            _ => None,
        }
    }

    /// Resolve the best office from a label and a triumph flag.
    ///
    /// A triumph outranks every office.
    #[must_use]
    pub fn resolve(label: Option<&str>, is_triumphator: bool) -> Option<Self> {
        if is_triumphator {
            return Some(Self::Triumphator);
        }
        label.and_then(Self::from_label)
    }

    /// Lowercase name of the office
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consul => "consul",
            Self::Censor => "censor",
            Self::Praetor => "praetor",
            Self::Triumphator => "triumphator",
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toga icon used by the visualizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconCategory {
    /// Toga praetexta (consuls and praetors)
    #[serde(rename = "Praetexta.png")]
    Praetexta,
    /// Toga purpurea (censors)
    #[serde(rename = "Purpurea.png")]
    Purpurea,
    /// Toga picta (triumphators)
    #[serde(rename = "Picta.png")]
    Picta,
    /// Man without a ranked office
    #[serde(rename = "NoPosition.png")]
    NoPosition,
    /// Woman without a ranked office
    #[serde(rename = "Woman.png")]
    Woman,
}

impl IconCategory {
    /// Icon for an office, as used in the funeral visualizations
    #[must_use]
    pub const fn for_office(office: Option<Office>) -> Self {
        match office {
            Some(Office::Consul | Office::Praetor) => Self::Praetexta,
            Some(Office::Censor) => Self::Purpurea,
            Some(Office::Triumphator) => Self::Picta,
            None => Self::NoPosition,
        }
    }

    /// Icon for an office, distinguishing women without office
    #[must_use]
    pub fn for_person(office: Option<Office>, gender: Gender) -> Self {
        match (office, gender) {
            (None, Gender::Female) => Self::Woman,
            (office, _) => Self::for_office(office),
        }
    }

    /// Image file name
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Praetexta => "Praetexta.png",
            Self::Purpurea => "Purpurea.png",
            Self::Picta => "Picta.png",
            Self::NoPosition => "NoPosition.png",
            Self::Woman => "Woman.png",
        }
    }
}

/// Type of a relation, naming the role of the related person
///
/// `A -Father-> B` means B is the father of A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// Related person is the father
    Father,
    /// Related person is the paternal grandfather
    Grandfather,
    /// Related person is a son
    Son,
    /// Related person is a daughter
    Daughter,
    /// Related person is a spouse
    Spouse,
    /// Related person is a divorced spouse
    Divorced,
}

impl RelationType {
    /// Relation describing a child of the given gender
    #[must_use]
    pub const fn child_of_gender(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self::Daughter,
            Gender::Male | Gender::Unknown => Self::Son,
        }
    }

    /// Whether the related person is a child
    #[must_use]
    pub const fn is_child(self) -> bool {
        matches!(self, Self::Son | Self::Daughter)
    }

    /// Whether the relation is a marriage, current or dissolved
    #[must_use]
    pub const fn is_marriage(self) -> bool {
        matches!(self, Self::Spouse | Self::Divorced)
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Grandfather => "grandfather",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Spouse => "spouse",
            Self::Divorced => "divorced",
        }
    }
}

impl FromStr for RelationType {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "father" => Ok(Self::Father),
            "grandfather" => Ok(Self::Grandfather),
            "son" => Ok(Self::Son),
            "daughter" => Ok(Self::Daughter),
            "spouse" => Ok(Self::Spouse),
            "divorced" => Ok(Self::Divorced),
            _ => Err(StemmaError::UnknownRelationType(s.to_string())),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How aggressively missing ancestry is inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertaintyModel {
    /// Only attested fathers and grandfathers
    Conservative,
    /// Additionally guess fathers sharing nomen and cognomen
    Aggressive,
    /// Additionally guess fathers sharing only the nomen
    Hyperaggressive,
}

impl CertaintyModel {
    /// All models, from least to most aggressive
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Aggressive, Self::Hyperaggressive];

    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Aggressive => "aggressive",
            Self::Hyperaggressive => "hyperaggressive",
        }
    }

    /// Whether nomen/cognomen guessing is allowed at all
    #[must_use]
    pub const fn allows_guessing(self) -> bool {
        !matches!(self, Self::Conservative)
    }
}

impl FromStr for CertaintyModel {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" | "0" => Ok(Self::Conservative),
            "aggressive" | "1" => Ok(Self::Aggressive),
            "hyperaggressive" | "2" => Ok(Self::Hyperaggressive),
            _ => Err(StemmaError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for CertaintyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a lineage node was reached from its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The queried person
    Subject,
    /// Father attested with certainty
    Attested,
    /// Father attested but marked uncertain
    AttestedUncertain,
    /// Grandfather used, eliding one generation
    Grandfather,
    /// Father guessed from nomen and cognomen
    CognomenGuess,
    /// Father guessed from nomen only
    NomenGuess,
}

impl Provenance {
    /// Whether the link was guessed rather than attested
    #[must_use]
    pub const fn is_guess(self) -> bool {
        matches!(self, Self::CognomenGuess | Self::NomenGuess)
    }

    /// Whether the link comes from a relation marked certain
    #[must_use]
    pub const fn is_certain(self) -> bool {
        matches!(self, Self::Subject | Self::Attested)
    }

    /// Marker used in verbose text output
    #[must_use]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::CognomenGuess => Some("(Cognomen guess)"),
            Self::NomenGuess => Some("(Nomen guess)"),
            Self::Grandfather => Some("(Grandfather)"),
            Self::AttestedUncertain => Some("(Uncertain)"),
            Self::Subject | Self::Attested => None,
        }
    }
}
