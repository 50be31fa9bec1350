//! Configuration for lineage inference and the presenters.
//!
//! Every section is optional in the JSON file; missing fields fall back to the
//! values in [`defaults`].

pub mod defaults;

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::open_file;
use crate::error::{Result, StemmaError};
use crate::models::types::PersonId;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemmaConfig {
    /// Ancestor inference settings
    pub inference: InferenceConfig,
    /// Aggregation period settings
    pub periods: PeriodConfig,
    /// Family tree settings
    pub family_tree: FamilyTreeConfig,
    /// Whether to draw progress bars for long-running phases
    pub show_progress: bool,
}

impl StemmaConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = open_file(path, "configuration")?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.periods.period_width <= 0 {
            return Err(StemmaError::config(format!(
                "period_width must be positive, got {}",
                self.periods.period_width
            )));
        }
        if self.inference.min_generation_gap < 0 {
            return Err(StemmaError::config(format!(
                "min_generation_gap must not be negative, got {}",
                self.inference.min_generation_gap
            )));
        }
        if let Some(final_year) = self.periods.final_year {
            if final_year < self.periods.start_year {
                return Err(StemmaError::config(format!(
                    "final_year {final_year} lies before start_year {}",
                    self.periods.start_year
                )));
            }
        }
        Ok(())
    }
}

/// Settings of the ancestor inference engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Minimum years between a guessed father's birth and the subject's
    #[serde(default = "defaults::min_generation_gap")]
    pub min_generation_gap: i32,

    /// Persons whose missing father is never guessed
    #[serde(default = "defaults::stop_ids")]
    pub stop_ids: Vec<i64>,

    /// `(subject, candidate)` pairs never linked by a guess
    #[serde(default = "defaults::exclusions")]
    pub exclusions: Vec<(i64, i64)>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_generation_gap: defaults::min_generation_gap(),
            stop_ids: defaults::stop_ids(),
            exclusions: defaults::exclusions(),
        }
    }
}

impl InferenceConfig {
    /// Create a new builder starting from the defaults
    #[must_use]
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::new()
    }

    /// Configuration without stop ids or exclusions
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            min_generation_gap: defaults::MIN_GENERATION_GAP,
            stop_ids: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Whether guessing stops at this person
    #[must_use]
    pub fn is_stop(&self, id: PersonId) -> bool {
        self.stop_ids.contains(&id.get())
    }

    /// Whether `candidate` must never be guessed as an ancestor of `subject`
    #[must_use]
    pub fn is_excluded(&self, subject: PersonId, candidate: PersonId) -> bool {
        self.exclusions
            .iter()
            .any(|&(s, c)| s == subject.get() && c == candidate.get())
    }
}

/// Builder for [`InferenceConfig`]
#[derive(Debug, Clone, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum generation gap
    #[must_use]
    pub const fn min_generation_gap(mut self, years: i32) -> Self {
        self.config.min_generation_gap = years;
        self
    }

    /// Replace the stop ids
    #[must_use]
    pub fn stop_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.config.stop_ids = ids.into_iter().collect();
        self
    }

    /// Replace the exclusion pairs
    #[must_use]
    pub fn exclusions(mut self, pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        self.config.exclusions = pairs.into_iter().collect();
        self
    }

    /// Add one exclusion pair
    #[must_use]
    pub fn exclude(mut self, subject: i64, candidate: i64) -> Self {
        self.config.exclusions.push((subject, candidate));
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

/// Aggregation period settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    /// First year of the first period
    #[serde(default = "defaults::start_year")]
    pub start_year: i32,
    /// Deaths after this year are excluded
    #[serde(default = "defaults::final_year")]
    pub final_year: Option<i32>,
    /// Width of each period in years
    #[serde(default = "defaults::period_width")]
    pub period_width: i32,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            start_year: defaults::START_YEAR,
            final_year: Some(defaults::FINAL_YEAR),
            period_width: defaults::PERIOD_WIDTH,
        }
    }
}

impl PeriodConfig {
    /// Index of the period a death year falls into
    ///
    /// Years before `start_year` belong to the first period.
    #[must_use]
    pub fn period_index(&self, year: i32) -> usize {
        let offset = (i64::from(year) - i64::from(self.start_year))
            .div_euclid(i64::from(self.period_width.max(1)));
        usize::try_from(offset).unwrap_or(0)
    }

    /// First and last year of a period, saturating at the `i32` range
    #[must_use]
    pub fn bounds(&self, index: usize) -> (i32, i32) {
        let width = i64::from(self.period_width);
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        let start = i64::from(self.start_year).saturating_add(width.saturating_mul(index));
        let end = start.saturating_add(width - 1);
        (saturate(start), saturate(end))
    }

    /// Whether a death year lies beyond the last aggregated year
    #[must_use]
    pub const fn is_after_final(&self, year: i32) -> bool {
        match self.final_year {
            Some(final_year) => year > final_year,
            None => false,
        }
    }

    /// Display label of a period, e.g. `"600–576 BCE"`
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        let (start, end) = self.bounds(index);
        let era = if end < 0 { "BCE" } else { "CE" };
        format!("{}–{} {era}", start.unsigned_abs(), end.unsigned_abs())
    }
}

/// Family tree settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTreeConfig {
    /// Persons born after this year are excluded; `None` keeps everybody
    #[serde(default = "defaults::max_birth_year")]
    pub max_birth_year: Option<i32>,
}

impl Default for FamilyTreeConfig {
    fn default() -> Self {
        Self {
            max_birth_year: Some(defaults::MAX_BIRTH_YEAR),
        }
    }
}

fn saturate(year: i64) -> i32 {
    i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX })
}
