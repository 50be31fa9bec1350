//! Reconstruction of Roman Republican family lineages.
//!
//! Loads person and relation records, builds a person graph, infers paternal
//! ancestry under three certainty models and aggregates the results into the
//! data files consumed by the funeral, network and family-tree
//! visualizations.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod output;
pub mod utils;

// Core types
pub use collections::{NomenIndex, PersonRegistry};
pub use config::{FamilyTreeConfig, InferenceConfig, PeriodConfig, StemmaConfig};
pub use error::{Result, StemmaError};
pub use models::{
    CertaintyModel, Gender, IconCategory, Office, Person, PersonId, PersonRecord, Provenance,
    RelationRecord, RelationType,
};

// Graph construction and inference
pub use algorithm::{
    AncestryEngine, DescendantForest, FamilyForest, FamilyTreeBuilder, FuneralReport,
    GraphBuilder, Lineage, LineageAggregator, LineageNode, LoadReport, NetworkBuilder,
    NetworkGraph, NetworkScope, build_graph,
};

// Loading and output
pub use loader::{DatasetPaths, load_dataset};
pub use output::{write_family_tree_files, write_funeral_data_file, write_json_file};
