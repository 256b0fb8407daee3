//! Scoring configuration and `.ferro-splice.toml` support.
//!
//! # Example Configuration
//!
//! ```toml
//! [scoring]
//! distance = 50
//! mask = true
//! score_cutoff = 0.2
//! context_groups = "0,1"   # or "all"
//! reduction = "replicate-mean"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-splice.toml` in current directory
//! 2. `~/.config/ferro-splice/config.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SpliceError;
use crate::score::ReportMode;

/// Default number of bases scored on each side of a variant
pub const DEFAULT_DISTANCE: usize = 50;

/// Which context groups of the ensemble are consulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelection {
    /// Groups by position in the ensemble
    Indices(Vec<usize>),
    /// Every group
    All,
}

impl Default for GroupSelection {
    /// The first group only
    fn default() -> Self {
        GroupSelection::Indices(vec![0])
    }
}

impl FromStr for GroupSelection {
    type Err = SpliceError;

    /// Parse `all` or a comma-separated list of group indices
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(GroupSelection::All);
        }

        let indices = s
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|_| SpliceError::Config {
                    msg: format!("invalid context group index '{}'", part.trim()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GroupSelection::Indices(indices))
    }
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSelection::All => write!(f, "all"),
            GroupSelection::Indices(indices) => {
                let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// How member deltas are combined before taking the loss/gain extremes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reduction {
    /// Min/max over every consulted member
    #[default]
    PerMember,
    /// Average replicates within each group, then min/max over groups
    ReplicateMean,
}

/// Settings of the scoring pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Bases scored on each side of the variant
    pub distance: usize,
    /// Clamp gains at annotated sites and losses elsewhere
    pub mask: bool,
    /// Report every site at or beyond this magnitude instead of the top hits
    pub score_cutoff: Option<f32>,
    pub context_groups: GroupSelection,
    pub reduction: Reduction,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            mask: false,
            score_cutoff: None,
            context_groups: GroupSelection::default(),
            reduction: Reduction::default(),
        }
    }
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_score_cutoff(mut self, cutoff: Option<f32>) -> Self {
        self.score_cutoff = cutoff;
        self
    }

    pub fn with_context_groups(mut self, groups: GroupSelection) -> Self {
        self.context_groups = groups;
        self
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Report mode implied by the cutoff
    pub fn report_mode(&self) -> ReportMode {
        ReportMode::from_cutoff(self.score_cutoff)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SpliceError> {
        if let Some(cutoff) = self.score_cutoff {
            if !cutoff.is_finite() || cutoff <= 0.0 {
                return Err(SpliceError::Config {
                    msg: format!("score cutoff must be a positive number, got {}", cutoff),
                });
            }
        }
        if matches!(&self.context_groups, GroupSelection::Indices(i) if i.is_empty()) {
            return Err(SpliceError::Config {
                msg: "at least one context group must be selected".to_string(),
            });
        }
        Ok(())
    }
}

/// Parsed `.ferro-splice.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub scoring: ScoringSection,
}

/// `[scoring]` section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringSection {
    pub distance: Option<usize>,
    pub mask: Option<bool>,
    pub score_cutoff: Option<f32>,
    pub context_groups: Option<String>,
    pub reduction: Option<Reduction>,
}

/// Scoring settings given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub distance: Option<usize>,
    pub mask: bool,
    pub score_cutoff: Option<f32>,
    pub context_groups: Option<GroupSelection>,
    pub replicate_mean: bool,
}

impl FileConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-splice.toml` in current directory
    /// 2. `~/.config/ferro-splice/config.toml`
    pub fn load() -> Result<Option<Self>, SpliceError> {
        let cwd_config = PathBuf::from(".ferro-splice.toml");
        if cwd_config.exists() {
            return Self::load_from_path(&cwd_config).map(Some);
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro-splice").join("config.toml");
            if home_config.exists() {
                return Self::load_from_path(&home_config).map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, SpliceError> {
        let content = fs::read_to_string(path).map_err(|e| SpliceError::Config {
            msg: format!("failed to read {}: {}", path.display(), e),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, SpliceError> {
        toml::from_str(content).map_err(|e| SpliceError::Config { msg: e.to_string() })
    }

    /// Scoring configuration from file values over the defaults
    pub fn to_scoring_config(&self) -> Result<ScoringConfig, SpliceError> {
        let section = &self.scoring;
        let mut config = ScoringConfig::default();

        if let Some(distance) = section.distance {
            config.distance = distance;
        }
        if let Some(mask) = section.mask {
            config.mask = mask;
        }
        if section.score_cutoff.is_some() {
            config.score_cutoff = section.score_cutoff;
        }
        if let Some(groups) = &section.context_groups {
            config.context_groups = groups.parse()?;
        }
        if let Some(reduction) = section.reduction {
            config.reduction = reduction;
        }

        Ok(config)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Result<ScoringConfig, SpliceError> {
        let mut config = self.to_scoring_config()?;

        if let Some(distance) = cli.distance {
            config.distance = distance;
        }
        if cli.mask {
            config.mask = true;
        }
        if cli.score_cutoff.is_some() {
            config.score_cutoff = cli.score_cutoff;
        }
        if let Some(groups) = &cli.context_groups {
            config.context_groups = groups.clone();
        }
        if cli.replicate_mean {
            config.reduction = Reduction::ReplicateMean;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
