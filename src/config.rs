//! # Engine Configuration
//!
//! Tunable constants of the engine, loaded from YAML. Every field is optional;
//! anything left out keeps its default.
//!
//! ```yaml
//! barre:
//!   same-fret-min-strings: 3
//!   same-fret-min-strings-short: 2
//!   a-shape-min-higher-strings: 2
//! document:
//!   max-reviewers: 12
//! shapes:
//!   cache: true
//! ```
//!
//! The barre thresholds are heuristics tuned against real chord shapes, which
//! is why they are exposed here rather than fixed in code.

use crate::error::CifraError;
use serde::Deserialize;

/// Thresholds used by barre detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarreRules {
    /// Strings sharing the lowest fret needed to call a barre on 6-string instruments
    pub same_fret_min_strings: usize,
    /// Same, for instruments with fewer strings
    pub same_fret_min_strings_short: usize,
    /// Strings 2-4 fretted above the barre needed for the A-shape override
    pub a_shape_min_higher_strings: usize,
}

impl Default for BarreRules {
    fn default() -> Self {
        Self {
            same_fret_min_strings: 3,
            same_fret_min_strings_short: 2,
            a_shape_min_higher_strings: 2,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub barre: BarreRules,
    /// Cap on reviewer names read from a credits block
    pub max_reviewers: usize,
    /// Memoize shape lookups per chord and instrument
    pub cache_shapes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            barre: BarreRules::default(),
            max_reviewers: 12,
            cache_shapes: true,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    barre: Option<RawBarre>,
    document: Option<RawDocument>,
    shapes: Option<RawShapes>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawBarre {
    same_fret_min_strings: Option<usize>,
    same_fret_min_strings_short: Option<usize>,
    a_shape_min_higher_strings: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawDocument {
    max_reviewers: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawShapes {
    cache: Option<bool>,
}

impl EngineConfig {
    /// Parse a YAML configuration document.
    ///
    /// # Example
    /// ```
    /// use cifra::EngineConfig;
    ///
    /// let config = EngineConfig::from_yaml("barre:\n  same-fret-min-strings: 4\n")?;
    /// assert_eq!(config.barre.same_fret_min_strings, 4);
    /// assert_eq!(config.max_reviewers, 12);
    /// # Ok::<(), cifra::CifraError>(())
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, CifraError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| CifraError::ConfigError(e.to_string()))?;

        let mut config = Self::default();

        if let Some(barre) = raw.barre {
            let rules = &mut config.barre;
            if let Some(n) = barre.same_fret_min_strings {
                rules.same_fret_min_strings = positive("barre.same-fret-min-strings", n)?;
            }
            if let Some(n) = barre.same_fret_min_strings_short {
                rules.same_fret_min_strings_short =
                    positive("barre.same-fret-min-strings-short", n)?;
            }
            if let Some(n) = barre.a_shape_min_higher_strings {
                rules.a_shape_min_higher_strings =
                    positive("barre.a-shape-min-higher-strings", n)?;
            }
        }

        if let Some(document) = raw.document {
            if let Some(n) = document.max_reviewers {
                config.max_reviewers = positive("document.max-reviewers", n)?;
            }
        }

        if let Some(shapes) = raw.shapes {
            if let Some(cache) = shapes.cache {
                config.cache_shapes = cache;
            }
        }

        Ok(config)
    }
}

fn positive(field: &str, value: usize) -> Result<usize, CifraError> {
    if value == 0 {
        return Err(CifraError::ConfigError(format!(
            "{} must be at least 1",
            field
        )));
    }
    Ok(value)
}
