//! Shape lookup
//!
//! Finds a fretboard shape for a chord name. Shapes come from a
//! [`ShapeSource`]: the dataset bundled with the crate, a remote table supplied
//! by the host application, or both chained with [`FallbackSource`].

use super::types::{ChordShape, Instrument, ShapeRecord};
use crate::canonical::candidates;
use crate::error::CifraError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

const BUNDLED_SHAPES: &str = include_str!("../../data/shapes.yaml");

/// Somewhere chord shapes can be looked up.
///
/// `lookup` receives every candidate name at once and returns all records it
/// has for any of them; choosing between them is the resolver's job.
pub trait ShapeSource: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    fn lookup(
        &self,
        instrument: Instrument,
        names: &[String],
    ) -> Result<Vec<ShapeRecord>, CifraError>;
}

/// Shapes held in memory, by default the dataset compiled into the crate.
#[derive(Debug, Clone)]
pub struct BundledShapes {
    records: Vec<ShapeRecord>,
}

impl BundledShapes {
    /// Parse a YAML list of shape records.
    pub fn from_yaml(content: &str) -> Result<Self, CifraError> {
        let records: Vec<ShapeRecord> = serde_yaml::from_str(content)
            .map_err(|e| CifraError::ShapeDataError(e.to_string()))?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<ShapeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for BundledShapes {
    fn default() -> Self {
        match Self::from_yaml(BUNDLED_SHAPES) {
            Ok(shapes) => shapes,
            Err(e) => {
                tracing::error!(error = %e, "Bundled shape data is unreadable");
                Self { records: Vec::new() }
            }
        }
    }
}

impl ShapeSource for BundledShapes {
    fn name(&self) -> &str {
        "bundled"
    }

    fn lookup(
        &self,
        instrument: Instrument,
        names: &[String],
    ) -> Result<Vec<ShapeRecord>, CifraError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.instrument == instrument && names.contains(&r.name))
            .cloned()
            .collect())
    }
}

/// Ask `primary` first; use `secondary` when it fails or has nothing.
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P: ShapeSource, S: ShapeSource> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: ShapeSource, S: ShapeSource> ShapeSource for FallbackSource<P, S> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn lookup(
        &self,
        instrument: Instrument,
        names: &[String],
    ) -> Result<Vec<ShapeRecord>, CifraError> {
        match self.primary.lookup(instrument, names) {
            Ok(records) if !records.is_empty() => return Ok(records),
            Ok(_) => {
                tracing::debug!(
                    source = self.primary.name(),
                    fallback = self.secondary.name(),
                    "No shapes found, trying fallback"
                );
            }
            Err(e) => {
                tracing::warn!(
                    source = self.primary.name(),
                    fallback = self.secondary.name(),
                    error = %e,
                    "Shape source failed, trying fallback"
                );
            }
        }
        self.secondary.lookup(instrument, names)
    }
}

type CacheKey = (Instrument, String);
type CacheSlot = Arc<Mutex<Option<Option<ChordShape>>>>;

/// Resolves chord names to shapes, memoizing results per instrument and name.
///
/// Each cache key has its own slot lock, held while the source is consulted,
/// so concurrent callers asking for the same chord wait for one lookup instead
/// of repeating it. Failed lookups are not cached.
pub struct ShapeResolver {
    source: Box<dyn ShapeSource>,
    cache: Option<Mutex<HashMap<CacheKey, CacheSlot>>>,
}

impl ShapeResolver {
    pub fn new(source: impl ShapeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Some(Mutex::new(HashMap::new())),
        }
    }

    /// A resolver that consults the source on every call.
    pub fn uncached(source: impl ShapeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: None,
        }
    }

    /// Find the shape for a chord name, or `None` when no diagram exists.
    ///
    /// # Example
    /// ```
    /// use cifra::diagram::{BundledShapes, Instrument, ShapeResolver};
    ///
    /// let resolver = ShapeResolver::new(BundledShapes::default());
    /// let shape = resolver.resolve("C", Instrument::Guitar).unwrap();
    /// assert_eq!(shape.positions, vec![-1, 3, 2, 0, 1, 0]);
    ///
    /// assert!(resolver.resolve("Xyz", Instrument::Guitar).is_none());
    /// ```
    pub fn resolve(&self, name: &str, instrument: Instrument) -> Option<ChordShape> {
        let names = candidates(name);
        if names.iter().all(|n| n.is_empty()) {
            return None;
        }

        let Some(cache) = &self.cache else {
            return self.lookup_logged(instrument, &names);
        };

        let key = (instrument, names.join("|"));
        let slot = {
            let mut map = cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(key).or_default())
        };

        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(shape) = slot.as_ref() {
            tracing::debug!(chord = name, instrument = instrument.name(), "Shape cache hit");
            return shape.clone();
        }

        match self.lookup(instrument, &names) {
            Ok(shape) => {
                *slot = Some(shape.clone());
                shape
            }
            Err(e) => {
                tracing::warn!(chord = name, error = %e, "Shape lookup failed");
                None
            }
        }
    }

    fn lookup_logged(&self, instrument: Instrument, names: &[String]) -> Option<ChordShape> {
        self.lookup(instrument, names).unwrap_or_else(|e| {
            tracing::warn!(chords = ?names, error = %e, "Shape lookup failed");
            None
        })
    }

    /// Query the source and pick a shape: first candidate with records wins,
    /// and within a candidate the lowest base fret.
    fn lookup(
        &self,
        instrument: Instrument,
        names: &[String],
    ) -> Result<Option<ChordShape>, CifraError> {
        tracing::debug!(source = self.source.name(), chords = ?names, "Looking up shapes");
        let records = self.source.lookup(instrument, names)?;

        for name in names {
            let mut shapes = Vec::new();
            let mut known_without_diagram = false;

            for record in records
                .iter()
                .filter(|r| &r.name == name && r.instrument == instrument)
            {
                match record.to_shape() {
                    Ok(Some(shape)) => shapes.push(shape),
                    Ok(None) => known_without_diagram = true,
                    Err(reason) => {
                        tracing::warn!(chord = %record.name, %reason, "Skipping malformed shape record");
                    }
                }
            }

            if let Some(best) = shapes.into_iter().min_by_key(|s| s.base_fret) {
                return Ok(Some(best));
            }
            if known_without_diagram {
                return Ok(None);
            }
        }

        Ok(None)
    }
}
