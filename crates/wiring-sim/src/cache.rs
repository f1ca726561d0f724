//! The feature-fetch cache boundary (§5, §10.7).
//!
//! `FeatureSource` is the seam an external WFS-backed cache would implement;
//! this module ships only an in-memory reference implementation suitable for
//! tests and the demo binary, not the transport itself (out of scope per the
//! Non-goals). Concurrent lookups for the same bounding box must coalesce to
//! a single fetch — a bare `Mutex<HashMap<_, Vec<_>>>` cannot guarantee that
//! (two threads can both miss and both fetch), so each slot is instead an
//! `Arc<OnceLock<_>>`: the first thread to see an empty slot installs one and
//! races to fill it via `OnceLock::get_or_init`, and every other thread that
//! finds the same slot blocks on that same `get_or_init` call until the first
//! fetch completes.
//!
//! Eviction is LRU by entry count rather than a true memory budget — this
//! reference implementation never has to hold enough data for the
//! distinction to matter.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock};

use wiring_features::RawRecord;
use wiring_spatial::Rect;

/// Something that can answer "give me the raw features in this bounding
/// box" — the trait a WFS client would implement in production.
pub trait FeatureSource {
    type Error;

    fn fetch(&self, bbox: Rect) -> Result<Vec<RawRecord>, Self::Error>;
}

/// Quantized bounding box used as the cache key — callers rarely request the
/// exact same `f64` bounds twice, so keys are rounded to the metre.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct BboxKey(i64, i64, i64, i64);

impl BboxKey {
    fn quantize(bbox: Rect) -> Self {
        Self(bbox.min.x.round() as i64, bbox.min.y.round() as i64, bbox.max.x.round() as i64, bbox.max.y.round() as i64)
    }
}

type Slot<E> = Arc<OnceLock<Result<Vec<RawRecord>, E>>>;

/// An in-memory, coalescing, LRU-by-entry-count cache in front of a
/// [`FeatureSource`] (§5's "at-most-one fetch in flight per key").
pub struct CoalescingFeatureCache<S: FeatureSource> {
    source: S,
    capacity: usize,
    entries: Mutex<HashMap<BboxKey, Slot<S::Error>>>,
    lru: Mutex<VecDeque<BboxKey>>,
}

impl<S: FeatureSource> CoalescingFeatureCache<S>
where
    S::Error: Clone,
{
    pub fn new(source: S, capacity: usize) -> Self {
        Self { source, capacity: capacity.max(1), entries: Mutex::new(HashMap::new()), lru: Mutex::new(VecDeque::new()) }
    }

    /// Fetch `bbox`, coalescing concurrent lookups for the same key and
    /// serving repeat lookups from cache. The cache never mutates a cached
    /// value once a fetch completes.
    pub fn fetch(&self, bbox: Rect) -> Result<Vec<RawRecord>, S::Error> {
        let key = BboxKey::quantize(bbox);

        let slot = {
            let mut entries = self.entries.lock().unwrap();
            entries.entry(key).or_insert_with(|| Arc::new(OnceLock::new())).clone()
        };

        let result = slot.get_or_init(|| self.source.fetch(bbox)).clone();
        self.touch(key);
        result
    }

    fn touch(&self, key: BboxKey) {
        let mut lru = self.lru.lock().unwrap();
        lru.retain(|k| *k != key);
        lru.push_back(key);

        if lru.len() > self.capacity {
            if let Some(evict) = lru.pop_front() {
                self.entries.lock().unwrap().remove(&evict);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wiring_core::Point;
    use wiring_features::{FeatureKind, RawGeometry};

    use super::*;

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl FeatureSource for CountingSource {
        type Error = String;

        fn fetch(&self, _bbox: Rect) -> Result<Vec<RawRecord>, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RawRecord::new(FeatureKind::Pole, "P1", RawGeometry::Point(Point::new(0.0, 0.0)))])
        }
    }

    fn bbox() -> Rect {
        Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
    }

    #[test]
    fn repeat_fetch_hits_cache() {
        let cache = CoalescingFeatureCache::new(CountingSource { calls: AtomicUsize::new(0) }, 8);
        cache.fetch(bbox()).unwrap();
        cache.fetch(bbox()).unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_bboxes_each_fetch_once() {
        let cache = CoalescingFeatureCache::new(CountingSource { calls: AtomicUsize::new(0) }, 8);
        cache.fetch(bbox()).unwrap();
        cache.fetch(Rect::new(Point::new(100.0, 100.0), Point::new(110.0, 110.0))).unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn eviction_respects_capacity() {
        let cache = CoalescingFeatureCache::new(CountingSource { calls: AtomicUsize::new(0) }, 1);
        cache.fetch(bbox()).unwrap();
        assert_eq!(cache.len(), 1);
        cache.fetch(Rect::new(Point::new(100.0, 100.0), Point::new(110.0, 110.0))).unwrap();
        assert_eq!(cache.len(), 1);
    }
}
