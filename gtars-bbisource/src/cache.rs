use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fxhash::FxHashMap;
use log::debug;

use gtars_core::models::LocusScore;

use crate::errors::Result;
use crate::models::{DataTile, RawDataInterval, WindowFunction};

/// A poisoned lock still guards consistent data here: slots are only ever replaced
/// whole, after the new value is fully built.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-slot cache of the most recently fetched raw interval.
#[derive(Debug, Default)]
pub struct RawTileCache {
    slot: Mutex<Option<RawDataInterval>>,
}

impl RawTileCache {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Return the cached tile if it covers `[start, end]` on `chr`, otherwise run
    /// `fetch`, store its tile as the new slot content and return it.
    ///
    /// The slot lock is held from the containment check until the new tile is
    /// published, so concurrent callers never see a half-replaced slot and a miss
    /// fetches only once. If `fetch` fails the previous slot is kept.
    ///
    pub fn get_or_replace<F>(&self, chr: &str, start: u32, end: u32, fetch: F) -> Result<Arc<DataTile>>
    where
        F: FnOnce() -> Result<DataTile>,
    {
        let mut slot = lock(&self.slot);

        if let Some(cached) = slot.as_ref() {
            if cached.contains(chr, start, end) {
                debug!("raw tile cache hit for {}:{}-{}", chr, start, end);
                return Ok(Arc::clone(&cached.tile));
            }
        }

        debug!("raw tile cache miss for {}:{}-{}", chr, start, end);
        let tile = Arc::new(fetch()?);
        *slot = Some(RawDataInterval::new(chr, start, end, Arc::clone(&tile)));
        Ok(tile)
    }

    /// The currently cached interval, if any.
    pub fn current(&self) -> Option<RawDataInterval> {
        lock(&self.slot).clone()
    }

    pub fn clear(&self) {
        lock(&self.slot).take();
    }
}

/// Whole-genome score sequences, built at most once per window function.
#[derive(Debug, Default)]
pub struct WholeGenomeCache {
    entries: Mutex<FxHashMap<WindowFunction, Arc<Vec<LocusScore>>>>,
}

impl WholeGenomeCache {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Return the memoized scores for `function`, building them with `build` on first
    /// use. The memo lock is held while building so that concurrent first calls
    /// build once. A failed build memoizes nothing.
    ///
    pub fn get_or_build<F>(&self, function: WindowFunction, build: F) -> Result<Arc<Vec<LocusScore>>>
    where
        F: FnOnce() -> Result<Vec<LocusScore>>,
    {
        let mut entries = lock(&self.entries);

        if let Some(scores) = entries.get(&function) {
            debug!("whole genome cache hit for {}", function);
            return Ok(Arc::clone(scores));
        }

        let scores = Arc::new(build()?);
        entries.insert(function, Arc::clone(&scores));
        Ok(scores)
    }

    pub fn contains(&self, function: WindowFunction) -> bool {
        lock(&self.entries).contains_key(&function)
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}
