//! Source-keyed cache of loaded price series.
//!
//! Each workbook sheet is read and loaded once, then served from memory.
//! An entry remembers the file's size and modification time at load; when
//! either changes the entry is stale and the next access reloads it.
//! Entries can also be dropped explicitly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::loader;
use crate::models::PriceSeries;
use crate::source::{self, Fingerprint, SourceKey, SourceSpec};

struct Entry {
    series: Arc<PriceSeries>,
    fingerprint: Fingerprint,
}

/// Loads price series from workbooks and keeps them keyed by source.
#[derive(Default)]
pub struct SourceCache {
    entries: HashMap<SourceKey, Entry>,
    loads: usize,
}

impl SourceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached series for `spec`, loading it if absent or stale.
    pub fn get_or_load(&mut self, spec: &SourceSpec) -> Result<Arc<PriceSeries>> {
        let key = spec.key();

        if let Some(entry) = self.entries.get(&key) {
            if Fingerprint::of(&key.path)? == entry.fingerprint {
                return Ok(entry.series.clone());
            }
            tracing::warn!(path = %key.path.display(), sheet = %key.sheet, "source changed on disk, reloading");
        }

        self.load(spec, key)
    }

    /// Check whether the cached entry for `spec` no longer matches the file.
    ///
    /// Returns `true` if nothing is cached for it, or if the file's size or
    /// modification time changed since it was loaded.
    pub fn is_stale(&self, spec: &SourceSpec) -> Result<bool> {
        let key = spec.key();
        match self.entries.get(&key) {
            None => Ok(true),
            Some(entry) => Ok(Fingerprint::of(&key.path)? != entry.fingerprint),
        }
    }

    /// Whether a series is cached for `spec`, stale or not.
    pub fn contains(&self, spec: &SourceSpec) -> bool {
        self.entries.contains_key(&spec.key())
    }

    /// Drop the entry for `spec`. Returns `true` if one was cached.
    pub fn invalidate(&mut self, spec: &SourceSpec) -> bool {
        let key = spec.key();
        let removed = self.entries.remove(&key).is_some();
        if removed {
            tracing::info!(path = %key.path.display(), sheet = %key.sheet, "invalidated cached source");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times a workbook has been read since this cache was created.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn load(&mut self, spec: &SourceSpec, key: SourceKey) -> Result<Arc<PriceSeries>> {
        // Taken before the read so an edit during it leaves the entry stale.
        let fingerprint = Fingerprint::of(&key.path)?;
        let raw = source::read_sheet(&spec.path, &spec.sheet)?;
        let series = Arc::new(loader::load_prices(&raw, spec.skip_rows)?);
        self.loads += 1;

        tracing::info!(
            path = %key.path.display(),
            sheet = %key.sheet,
            kept = series.report.kept,
            dropped = series.report.dropped(),
            "loaded price table"
        );

        self.entries.insert(
            key,
            Entry {
                series: series.clone(),
                fingerprint,
            },
        );
        Ok(series)
    }
}
