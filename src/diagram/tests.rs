use super::*;
use crate::error::CifraError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Source that counts lookups and can be told to fail.
struct CountingSource {
    inner: BundledShapes,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingSource {
    fn new(calls: Arc<AtomicUsize>) -> Self {
        Self { inner: BundledShapes::default(), calls, fail: false }
    }

    fn failing(calls: Arc<AtomicUsize>) -> Self {
        Self { inner: BundledShapes::from_records(vec![]), calls, fail: true }
    }
}

impl ShapeSource for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn lookup(
        &self,
        instrument: Instrument,
        names: &[String],
    ) -> Result<Vec<ShapeRecord>, CifraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Widen the window for concurrent callers
        thread::sleep(Duration::from_millis(20));
        if self.fail {
            return Err(CifraError::ShapeSourceError {
                source_name: "counting".to_string(),
                message: "offline".to_string(),
            });
        }
        self.inner.lookup(instrument, names)
    }
}

fn resolver() -> ShapeResolver {
    ShapeResolver::new(BundledShapes::default())
}

#[test]
fn test_bundled_dataset_is_well_formed() {
    let shapes = BundledShapes::default();
    assert!(shapes.len() > 40);
    let names = vec!["C".to_string(), "Am".to_string()];
    for instrument in [Instrument::Guitar, Instrument::Ukulele] {
        let records = shapes.lookup(instrument, &names).unwrap();
        assert!(!records.is_empty());
        for record in records {
            assert!(record.to_shape().unwrap().is_some(), "{}", record.name);
        }
    }
}

#[test]
fn test_lowest_base_fret_wins() {
    let shape = resolver().resolve("C", Instrument::Guitar).unwrap();
    assert_eq!(shape.base_fret, 1);
    assert_eq!(shape.positions, vec![-1, 3, 2, 0, 1, 0]);
}

#[test]
fn test_spelling_variants_resolve_to_same_shape() {
    let r = resolver();
    let a = r.resolve("Cmaj7", Instrument::Guitar).unwrap();
    assert_eq!(r.resolve("C7M", Instrument::Guitar), Some(a.clone()));
    assert_eq!(r.resolve("CM7", Instrument::Guitar), Some(a));
    assert_eq!(
        r.resolve("B°", Instrument::Guitar),
        r.resolve("Bdim", Instrument::Guitar)
    );
    let half_diminished = r.resolve("Bm7b5", Instrument::Guitar);
    assert!(half_diminished.is_some());
    assert_eq!(r.resolve("Bø7", Instrument::Guitar), half_diminished);
}

#[test]
fn test_slash_chord_specific_shape() {
    let shape = resolver().resolve("D/F#", Instrument::Guitar).unwrap();
    assert_eq!(shape.positions, vec![2, -1, 0, 2, 3, 2]);
}

#[test]
fn test_slash_chord_falls_back_to_plain_chord() {
    let r = resolver();
    assert_eq!(
        r.resolve("A/C#", Instrument::Guitar),
        r.resolve("A", Instrument::Guitar)
    );
}

#[test]
fn test_enharmonic_fallback() {
    let r = resolver();
    assert_eq!(r.resolve("A#", Instrument::Guitar), r.resolve("Bb", Instrument::Guitar));
    assert!(r.resolve("Db", Instrument::Guitar).is_some());
}

#[test]
fn test_instruments_are_separate() {
    let r = resolver();
    let uke = r.resolve("C", Instrument::Ukulele).unwrap();
    assert_eq!(uke.positions, vec![0, 0, 0, 3]);
    assert_eq!(uke.instrument, Instrument::Ukulele);
    assert!(r.resolve("Cmaj7", Instrument::Ukulele).is_none());
}

#[test]
fn test_unknown_chord_is_none() {
    assert!(resolver().resolve("Hm", Instrument::Guitar).is_none());
    assert!(resolver().resolve("", Instrument::Guitar).is_none());
}

#[test]
fn test_record_without_positions_is_none() {
    let shapes = BundledShapes::from_yaml(
        r#"
- name: "E/G#"
  instrument: guitar
  positions: []
- name: "E"
  instrument: guitar
  positions: [0, 2, 2, 1, 0, 0]
"#,
    )
    .unwrap();
    let r = ShapeResolver::new(shapes);
    assert!(r.resolve("E/G#", Instrument::Guitar).is_none());
    assert!(r.resolve("E", Instrument::Guitar).is_some());
}

#[test]
fn test_malformed_records_are_skipped() {
    let shapes = BundledShapes::from_yaml(
        r#"
- name: "G"
  instrument: guitar
  positions: [3, 2, 0, 0]
- name: "G"
  instrument: guitar
  positions: [3, 5, 5, 4, 3, 3]
  base-fret: 3
"#,
    )
    .unwrap();
    let shape = ShapeResolver::new(shapes).resolve("G", Instrument::Guitar).unwrap();
    assert_eq!(shape.base_fret, 3);
}

#[test]
fn test_invalid_shape_yaml() {
    let result = BundledShapes::from_yaml("- name: C\n  instrument: banjo\n");
    assert!(matches!(result, Err(CifraError::ShapeDataError(_))));
}

#[test]
fn test_cache_looks_up_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let r = ShapeResolver::new(CountingSource::new(Arc::clone(&calls)));
    let first = r.resolve("Am", Instrument::Guitar);
    let second = r.resolve("Am", Instrument::Guitar);
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Misses are cached too
    r.resolve("Xyz", Instrument::Guitar);
    r.resolve("Xyz", Instrument::Guitar);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // A different instrument is a different key
    r.resolve("Am", Instrument::Ukulele);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_concurrent_callers_share_one_lookup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let r = ShapeResolver::new(CountingSource::new(Arc::clone(&calls)));

    let results: Vec<Option<ChordShape>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| r.resolve("G", Instrument::Guitar)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|shape| shape == &results[0]));
    assert!(results[0].is_some());
}

#[test]
fn test_uncached_resolver_always_looks_up() {
    let calls = Arc::new(AtomicUsize::new(0));
    let r = ShapeResolver::uncached(CountingSource::new(Arc::clone(&calls)));
    r.resolve("Am", Instrument::Guitar);
    r.resolve("Am", Instrument::Guitar);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failures_are_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let r = ShapeResolver::new(CountingSource::failing(Arc::clone(&calls)));
    assert!(r.resolve("Am", Instrument::Guitar).is_none());
    assert!(r.resolve("Am", Instrument::Guitar).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_fallback_source_on_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = FallbackSource::new(
        CountingSource::failing(Arc::clone(&calls)),
        BundledShapes::default(),
    );
    let r = ShapeResolver::new(source);
    let shape = r.resolve("Em", Instrument::Guitar).unwrap();
    assert_eq!(shape.positions, vec![0, 2, 2, 0, 0, 0]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fallback_source_when_primary_is_empty() {
    let remote = BundledShapes::from_yaml(
        r#"
- name: "Em"
  instrument: guitar
  positions: [0, 2, 2, 0, 3, 0]
"#,
    )
    .unwrap();
    let r = ShapeResolver::new(FallbackSource::new(remote, BundledShapes::default()));
    // Primary answers Em itself
    assert_eq!(
        r.resolve("Em", Instrument::Guitar).unwrap().positions,
        vec![0, 2, 2, 0, 3, 0]
    );
    // Primary has nothing for Am, bundled data does
    assert!(r.resolve("Am", Instrument::Guitar).is_some());
}

#[test]
fn test_build_diagram_a_shape_without_fingers() {
    let r = resolver();
    let diagram = build_diagram(&r, &BarreRules::default(), "B", Instrument::Guitar).unwrap();
    assert_eq!(
        diagram.barre,
        Some(Barre { fret: 2, first_string: 1, last_string: 5, finger: 1 })
    );
    assert_eq!(diagram.fingers, vec![0, 1, 2, 3, 4, 1]);
}

#[test]
fn test_build_diagram_open_chord() {
    let r = resolver();
    let diagram = build_diagram(&r, &BarreRules::default(), "Am", Instrument::Guitar).unwrap();
    assert!(diagram.barre.is_none());
    assert_eq!(diagram.fingers, vec![0, 0, 2, 3, 1, 0]);
    assert_eq!(diagram.name, "Am");
}

#[test]
fn test_build_diagram_unknown() {
    let r = resolver();
    assert!(build_diagram(&r, &BarreRules::default(), "Zz", Instrument::Guitar).is_none());
}
