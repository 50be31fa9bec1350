//! Domain models
//!
//! Persons, their typed relations and the raw records they are built from.

pub mod lenient;
pub mod person;
pub mod types;

pub use person::{Person, PersonRecord, Relation, RelationLink, RelationRecord};
pub use types::{
    CertaintyModel, Gender, IconCategory, Office, PersonId, Provenance, RelationType,
};
