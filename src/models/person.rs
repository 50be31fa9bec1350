//! Person entity model
//!
//! A `Person` is any individual of the prosopography. Persons own their typed
//! relations to other persons; the registry owns the persons.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::error::{Result, StemmaError};
use crate::models::lenient;
use crate::models::types::{Gender, IconCategory, Office, PersonId, RelationType};

/// A typed, directed relation from the owning person to `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Role of the target relative to the owner
    pub kind: RelationType,
    /// Related person
    pub target: PersonId,
    /// Whether the source marks the relation as certain
    pub certain: bool,
}

impl Relation {
    /// Create a new relation
    #[must_use]
    pub const fn new(kind: RelationType, target: PersonId, certain: bool) -> Self {
        Self {
            kind,
            target,
            certain,
        }
    }
}

/// Core Person entity
#[derive(Debug, Clone)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,
    /// Full display name
    pub name: String,
    /// Family (gens) name
    pub nomen: Option<String>,
    /// Branch name within the gens
    pub cognomen: Option<String>,
    /// Gender of the person
    pub gender: Gender,
    /// Birth year, negative for BCE
    pub birth: Option<i32>,
    /// Death year, negative for BCE
    pub death: Option<i32>,
    /// Highest ranked office held
    pub best_office: Option<Office>,
    /// Whether the person is attested (false for synthesized placeholders)
    pub is_certain: bool,
    relations: SmallVec<[Relation; 4]>,
}

impl Person {
    /// Create a new Person with minimal required information
    #[must_use]
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nomen: None,
            cognomen: None,
            gender: Gender::Unknown,
            birth: None,
            death: None,
            best_office: None,
            is_certain: true,
            relations: SmallVec::new(),
        }
    }

    /// Set the nomen
    #[must_use]
    pub fn with_nomen(mut self, nomen: impl Into<String>) -> Self {
        self.nomen = Some(nomen.into());
        self
    }

    /// Set the cognomen
    #[must_use]
    pub fn with_cognomen(mut self, cognomen: impl Into<String>) -> Self {
        self.cognomen = Some(cognomen.into());
        self
    }

    /// Set the gender
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Set birth and death years
    #[must_use]
    pub const fn with_years(mut self, birth: Option<i32>, death: Option<i32>) -> Self {
        self.birth = birth;
        self.death = death;
        self
    }

    /// Set the best office
    #[must_use]
    pub const fn with_office(mut self, office: Option<Office>) -> Self {
        self.best_office = office;
        self
    }

    /// Build a person from a parsed source record
    ///
    /// Fails when the identifier is missing or negative (negative ids belong
    /// to placeholders); every other malformed field is treated as unknown.
    pub fn from_record(record: &PersonRecord) -> Result<Self> {
        let id = record
            .id
            .ok_or_else(|| StemmaError::invalid_record("person record without an id"))?;
        if id < 0 {
            return Err(StemmaError::invalid_record(format!(
                "person id {id} is reserved for placeholders"
            )));
        }

        let is_triumphator = record.is_triumphator.unwrap_or(false);

        Ok(Self {
            id: PersonId(id),
            name: record.name.clone().unwrap_or_default(),
            nomen: record.nomen.clone(),
            cognomen: record.cognomen.clone(),
            gender: record
                .gender
                .as_deref()
                .map(Gender::from)
                .unwrap_or_default(),
            birth: record.birth,
            death: record.death,
            best_office: Office::resolve(record.best_office.as_deref(), is_triumphator),
            is_certain: record.is_certain.unwrap_or(true),
            relations: SmallVec::new(),
        })
    }

    /// All relations in insertion order
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// First relation of the given kind
    #[must_use]
    pub fn relation(&self, kind: RelationType) -> Option<&Relation> {
        self.relations.iter().find(|r| r.kind == kind)
    }

    /// All relations of the given kind
    pub fn relations_of(&self, kind: RelationType) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.kind == kind)
    }

    /// Whether a relation of this kind to `target` exists
    #[must_use]
    pub fn has_relation(&self, kind: RelationType, target: PersonId) -> bool {
        self.relations
            .iter()
            .any(|r| r.kind == kind && r.target == target)
    }

    pub(crate) fn push_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub(crate) fn retain_relations<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Relation) -> bool,
    {
        let before = self.relations.len();
        self.relations.retain(|relation| keep(relation));
        before - self.relations.len()
    }

    /// Toga icon for the funeral visualizations
    #[must_use]
    pub const fn icon(&self) -> IconCategory {
        IconCategory::for_office(self.best_office)
    }

    /// Label used by the autocomplete lookup, e.g. `"Q. Fabius Maximus, d. -203"`
    #[must_use]
    pub fn lookup_label(&self) -> String {
        match self.death {
            Some(death) => format!("{}, d. {death}", self.name),
            None => format!("{}, d. ?", self.name),
        }
    }

    /// Whether both persons share the same cognomen (both absent counts as equal)
    #[must_use]
    pub fn shares_cognomen(&self, other: &Self) -> bool {
        self.cognomen == other.cognomen
    }
}

/// Raw person record as delivered by the data exports
///
/// Field names follow the JSON exports; aliases cover the flattened SPARQL
/// rows (`highestOffice`, `triumphator`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Identifier (required)
    #[serde(default, deserialize_with = "lenient::lenient_i64")]
    pub id: Option<i64>,
    /// Display name
    #[serde(default, deserialize_with = "lenient::lenient_string")]
    pub name: Option<String>,
    /// Nomen
    #[serde(default, deserialize_with = "lenient::lenient_string")]
    pub nomen: Option<String>,
    /// Cognomen
    #[serde(default, deserialize_with = "lenient::lenient_string")]
    pub cognomen: Option<String>,
    /// Gender label or URI
    #[serde(default, deserialize_with = "lenient::lenient_string")]
    pub gender: Option<String>,
    /// Birth year
    #[serde(default, deserialize_with = "lenient::lenient_year")]
    pub birth: Option<i32>,
    /// Death year
    #[serde(default, deserialize_with = "lenient::lenient_year")]
    pub death: Option<i32>,
    /// Best office label (plain name or DPRR string)
    #[serde(
        default,
        alias = "highestOffice",
        deserialize_with = "lenient::lenient_string"
    )]
    pub best_office: Option<String>,
    /// Whether the person celebrated a triumph
    #[serde(default, alias = "triumphator", deserialize_with = "lenient::presence_flag")]
    pub is_triumphator: Option<bool>,
    /// Whether the person is attested
    #[serde(default, deserialize_with = "lenient::lenient_bool")]
    pub is_certain: Option<bool>,
    /// Inline father identifier
    #[serde(
        default,
        rename = "fatherID",
        alias = "fatherId",
        deserialize_with = "lenient::lenient_i64"
    )]
    pub father_id: Option<i64>,
    /// Whether the inline father is uncertain
    #[serde(default, deserialize_with = "lenient::lenient_bool")]
    pub father_is_uncertain: Option<bool>,
    /// Inline grandfather identifier
    #[serde(
        default,
        rename = "grandfatherID",
        alias = "grandfatherId",
        deserialize_with = "lenient::lenient_i64"
    )]
    pub grandfather_id: Option<i64>,
    /// Whether the inline grandfather is uncertain
    #[serde(default, deserialize_with = "lenient::lenient_bool")]
    pub grandfather_is_uncertain: Option<bool>,
}

impl PersonRecord {
    /// Minimal record, mostly useful for tests and synthetic data
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Relation records implied by the inline father/grandfather fields
    ///
    /// A grandfather equal to the father is ignored.
    #[must_use]
    pub fn inline_relations(&self) -> Vec<RelationRecord> {
        let Some(id) = self.id else {
            return Vec::new();
        };

        let mut relations = Vec::with_capacity(2);
        if let Some(father) = self.father_id {
            relations.push(RelationRecord::new(
                id,
                father,
                RelationType::Father,
                !self.father_is_uncertain.unwrap_or(false),
            ));
        }
        if let Some(grandfather) = self.grandfather_id {
            if self.father_id != Some(grandfather) {
                relations.push(RelationRecord::new(
                    id,
                    grandfather,
                    RelationType::Grandfather,
                    !self.grandfather_is_uncertain.unwrap_or(false),
                ));
            }
        }
        relations
    }
}

/// Raw relation record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRecord {
    /// Person the relation belongs to
    #[serde(
        default,
        alias = "aboutPerson",
        alias = "about_person",
        deserialize_with = "lenient::lenient_i64"
    )]
    pub about_person_id: Option<i64>,
    /// Person on the other side of the relation
    #[serde(
        default,
        alias = "relatedPerson",
        alias = "related_person",
        deserialize_with = "lenient::lenient_i64"
    )]
    pub related_person_id: Option<i64>,
    /// Relation type label
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    /// Certainty, defaults to certain
    #[serde(default, deserialize_with = "lenient::lenient_bool")]
    pub certain: Option<bool>,
}

impl RelationRecord {
    /// Create a relation record
    #[must_use]
    pub fn new(about: i64, related: i64, kind: RelationType, certain: bool) -> Self {
        Self {
            about_person_id: Some(about),
            related_person_id: Some(related),
            kind: kind.as_str().to_string(),
            certain: Some(certain),
        }
    }

    /// Validate the record into a typed link request
    pub fn parse(&self) -> Result<RelationLink> {
        let about = self
            .about_person_id
            .ok_or_else(|| StemmaError::invalid_record("relation without aboutPersonId"))?;
        let related = self
            .related_person_id
            .ok_or_else(|| StemmaError::invalid_record("relation without relatedPersonId"))?;
        let kind = self.kind.parse::<RelationType>()?;

        Ok(RelationLink {
            about: PersonId(about),
            related: PersonId(related),
            kind,
            certain: self.certain.unwrap_or(true),
        })
    }
}

/// A validated relation, ready to be linked into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationLink {
    /// Owner of the relation
    pub about: PersonId,
    /// Target of the relation
    pub related: PersonId,
    /// Role of the target
    pub kind: RelationType,
    /// Certainty flag
    pub certain: bool,
}
