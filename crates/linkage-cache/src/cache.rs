use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex};

use access_common::{AccessError, AccessResult, CancellationToken};
use lru::LruCache;
use tokio::sync::Mutex as AsyncMutex;

use crate::context::LinkageContext;
use crate::key::LinkageKey;

const DEFAULT_CAPACITY: usize = 9;

type BuildLock = Arc<AsyncMutex<()>>;

/// Per-network cache of `(PointSet, StreetLayer, Mode) -> Linkage`.
///
/// Holds a bounded LRU for ordinary linkages plus an unevictable map for
/// linkages that must persist for the process lifetime (e.g. walk
/// linkages for the full network, serialized with the network itself).
/// Concurrent lookups for distinct keys proceed in parallel; concurrent
/// lookups for the same key share a single build via a per-key lock.
pub struct LinkageCache<L, C: LinkageContext<L>> {
    context: C,
    unevictable: StdMutex<HashMap<LinkageKey, Arc<L>>>,
    lru: StdMutex<LruCache<LinkageKey, Arc<L>>>,
    build_locks: StdMutex<HashMap<LinkageKey, BuildLock>>,
}

impl<L, C: LinkageContext<L>> LinkageCache<L, C> {
    pub fn new(context: C) -> Self {
        Self::with_capacity(context, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(context: C, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            context,
            unevictable: StdMutex::new(HashMap::new()),
            lru: StdMutex::new(LruCache::new(capacity)),
            build_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, building it on miss per the cache's build policy. Builds
    /// for distinct keys run concurrently; concurrent lookups of the same
    /// key share one build. `cancel` is checked at each major phase
    /// boundary (lock acquisition, each build step) and aborts with
    /// `AccessError::Cancelled`.
    pub async fn get(&self, key: LinkageKey, cancel: &CancellationToken) -> AccessResult<Arc<L>>
    where
        L: Send + Sync + 'static,
        C: Sync,
    {
        cancel.check()?;

        if let Some(linkage) = self.peek(&key) {
            return Ok(linkage);
        }

        let build_lock = {
            let mut locks = self.build_locks.lock().unwrap();
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let _guard = build_lock.lock().await;
        cancel.check()?;

        // Another task may have finished the build while we waited for the
        // lock; re-check before doing the work ourselves.
        if let Some(linkage) = self.peek(&key) {
            return Ok(linkage);
        }

        let built = Arc::new(self.build(key, cancel).await?);
        self.insert(key, built.clone());

        // Best-effort cleanup: drop the per-key lock entry now that the
        // build is published, so the map doesn't grow with every distinct
        // key ever requested.
        self.build_locks.lock().unwrap().remove(&key);

        Ok(built)
    }

    /// Eagerly build and register `key` as unevictable. Re-registering an
    /// already-registered key is a programming error and fails fast.
    pub fn register_unevictable(
        &self,
        key: LinkageKey,
        cancel: &CancellationToken,
    ) -> AccessResult<()>
    where
        C: Sync,
    {
        cancel.check()?;
        let mut unevictable = self.unevictable.lock().unwrap();
        if unevictable.contains_key(&key) {
            return Err(AccessError::InvariantViolation(format!(
                "linkage key {key:?} already registered as unevictable"
            )));
        }
        let built = self.context.build_from_scratch(key)?;
        unevictable.insert(key, Arc::new(built));
        Ok(())
    }

    fn peek(&self, key: &LinkageKey) -> Option<Arc<L>> {
        if let Some(linkage) = self.unevictable.lock().unwrap().get(key) {
            return Some(linkage.clone());
        }
        self.lru.lock().unwrap().get(key).cloned()
    }

    fn insert(&self, key: LinkageKey, linkage: Arc<L>) {
        let mut lru = self.lru.lock().unwrap();
        if lru.len() >= lru.cap().get() && !lru.contains(&key) {
            if let Some((evicted_key, _)) = lru.pop_lru() {
                tracing::info!(key = ?evicted_key, cause = "cache full", "evicting linkage");
            }
        }
        lru.put(key, linkage);
    }

    fn build<'a>(
        &'a self,
        key: LinkageKey,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = AccessResult<L>> + Send + 'a>>
    where
        L: Send + Sync + 'static,
        C: Sync,
    {
        Box::pin(async move {
            cancel.check()?;

            if let Some(parent_id) = self.context.parent_pointset(key.pointset) {
                let parent_key = key.with_pointset(parent_id);
                if let Some(parent_linkage) = self.peek(&parent_key) {
                    cancel.check()?;
                    return self.context.crop_sub_linkage(&parent_linkage, key);
                }
            }

            if let Some(base_layer) = self.context.scenario_base(key.street_layer) {
                let base_key = key.with_street_layer(base_layer);
                let base_linkage = self.get(base_key, cancel).await?;
                cancel.check()?;
                return self.context.build_scenario_overlay(&base_linkage, key);
            }

            self.context.build_from_scratch(key)
        })
    }
}
