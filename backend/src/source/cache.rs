//! Process-lifetime memoization of the loaded dataset.

use parking_lot::Mutex;
use std::sync::Arc;

use super::memory::InMemorySource;
use super::DatasetSource;
use crate::error::PipelineResult;
use crate::models::Dataset;

/// Loads the dataset once and hands out shared read-only references.
///
/// The first caller loads under the lock; concurrent first requests wait for
/// it instead of loading twice. A failed load leaves the slot empty so the
/// next request retries.
pub struct DatasetCache {
    source: Arc<dyn DatasetSource>,
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Cache that already holds `dataset`.
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            source: Arc::new(InMemorySource::from_dataset(&dataset)),
            slot: Mutex::new(Some(Arc::new(dataset))),
        }
    }

    /// Shared dataset, loading it on first use.
    pub fn get(&self) -> PipelineResult<Arc<Dataset>> {
        let mut slot = self.slot.lock();
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        log::debug!("Loading dataset from {}", self.source.describe());
        let dataset = Arc::new(self.source.load()?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.lock().is_some()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::models::PriceRecord;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
        fail_first: bool,
    }

    impl CountingSource {
        fn new(fail_first: bool) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail_first,
            }
        }
    }

    impl DatasetSource for CountingSource {
        fn load(&self) -> PipelineResult<Dataset> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && attempt == 0 {
                return Err(PipelineError::configuration("first load fails"));
            }
            let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            Ok(Dataset::from_records(vec![PriceRecord::new(
                date, "NCR", "Rice", 40.0,
            )]))
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn test_loads_once() {
        let source = Arc::new(CountingSource::new(false));
        let cache = DatasetCache::new(source.clone());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_concurrent_first_requests_load_once() {
        let source = Arc::new(CountingSource::new(false));
        let cache = DatasetCache::new(source.clone());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(cache.get().unwrap().len(), 1);
                });
            }
        });

        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let source = Arc::new(CountingSource::new(true));
        let cache = DatasetCache::new(source.clone());

        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(cache.get().unwrap().len(), 1);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_preloaded() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let cache = DatasetCache::preloaded(Dataset::from_records(vec![
            PriceRecord::new(date, "NCR", "Rice", 40.0),
            PriceRecord::new(date, "CAR", "Corn", 20.0),
        ]));
        assert!(cache.is_loaded());
        assert_eq!(cache.get().unwrap().len(), 2);
        assert_eq!(cache.source_description(), "memory:2 records");
    }
}
