//! Single-flight in-memory query cache with an unlimited freshness window.
//!
//! Each key is loaded at most once per cache lifetime. The first caller
//! spawns the loader on the runtime; everyone else who asks for the same key
//! attaches to that load. Settled entries (success or error) are never
//! re-fetched and there is no clear operation.

use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use super::types::{CacheStats, FetchError, QueryKey, QueryState};
use crate::error::AppError;

type Listener<T> = Arc<dyn Fn(&QueryKey, &QueryState<T>) + Send + Sync>;
type Slot<T> = Arc<watch::Sender<QueryState<T>>>;

struct Inner<T> {
    name: &'static str,
    entries: Mutex<HashMap<QueryKey, Slot<T>>>,
    listeners: Mutex<Vec<(u64, QueryKey, Listener<T>)>>,
    next_listener_id: AtomicU64,
    loads_started: AtomicU64,
}

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Inner<T> {
    fn notify(&self, key: &QueryKey, state: &QueryState<T>) {
        // Callbacks run outside the lock so they may subscribe or query again
        let listeners: Vec<Listener<T>> = lock(&self.listeners)
            .iter()
            .filter(|(_, listener_key, _)| listener_key == key)
            .map(|(_, _, callback)| Arc::clone(callback))
            .collect();

        for callback in listeners {
            callback(key, state);
        }
    }
}

/// Memoizing cache for one kind of remote list.
pub struct QueryCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Creates an empty cache; `name` only shows up in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                entries: Mutex::new(HashMap::new()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                loads_started: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the latest known state for `key`, starting the load if the key
    /// has never been requested. Must be called within a Tokio runtime.
    pub fn query<F, Fut>(&self, key: QueryKey, loader: F) -> QueryState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        self.slot(key, loader).borrow().clone()
    }

    /// Like [`QueryCache::query`] but waits until the entry has settled.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> QueryState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let slot = self.slot(key, loader);
        let mut receiver = slot.subscribe();
        let settled = match receiver.wait_for(|state| state.is_settled()).await {
            Ok(state) => state.clone(),
            Err(_) => slot.borrow().clone(),
        };
        settled
    }

    /// Returns the state for `key` without starting a load.
    pub fn peek(&self, key: &QueryKey) -> Option<QueryState<T>> {
        lock(&self.inner.entries)
            .get(key)
            .map(|slot| slot.borrow().clone())
    }

    /// Registers `callback` for every state transition of `key`. Dropping the
    /// returned handle unsubscribes.
    pub fn subscribe<C>(&self, key: QueryKey, callback: C) -> Subscription<T>
    where
        C: Fn(&QueryKey, &QueryState<T>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        debug!(cache = self.inner.name, key = %key, id, "Subscribing to cache key");
        lock(&self.inner.listeners).push((id, key, Arc::new(callback)));

        Subscription {
            id,
            cache: Arc::downgrade(&self.inner),
        }
    }

    /// Number of loader invocations so far
    pub fn loads_started(&self) -> u64 {
        self.inner.loads_started.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts entries per status for monitoring purposes
    pub fn stats(&self) -> CacheStats {
        let entries = lock(&self.inner.entries);
        let mut stats = CacheStats::default();
        for slot in entries.values() {
            match &*slot.borrow() {
                QueryState::Success(_) => stats.success += 1,
                QueryState::Error(_) => stats.error += 1,
                QueryState::Pending | QueryState::Idle => stats.pending += 1,
            }
        }
        stats
    }

    fn slot<F, Fut>(&self, key: QueryKey, loader: F) -> Slot<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let mut entries = lock(&self.inner.entries);
        if let Some(slot) = entries.get(&key) {
            trace!(cache = self.inner.name, key = %key, "Cache hit");
            return Arc::clone(slot);
        }

        let (sender, _) = watch::channel(QueryState::Pending);
        let slot = Arc::new(sender);
        entries.insert(key.clone(), Arc::clone(&slot));
        drop(entries);

        self.inner.loads_started.fetch_add(1, Ordering::Relaxed);
        info!(cache = self.inner.name, key = %key, "Cache miss, starting load");
        self.inner.notify(&key, &QueryState::Pending);

        let load = loader();
        let inner = Arc::clone(&self.inner);
        let task_slot = Arc::clone(&slot);
        // Runs to completion even if every caller has gone away
        tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(load).catch_unwind().await {
                Ok(Ok(value)) => {
                    debug!(cache = inner.name, key = %key, "Load succeeded");
                    QueryState::Success(Arc::new(value))
                }
                Ok(Err(e)) => {
                    warn!(cache = inner.name, key = %key, "Load failed: {e}");
                    QueryState::Error(FetchError::from(&e))
                }
                Err(_) => {
                    error!(cache = inner.name, key = %key, "Loader panicked");
                    QueryState::Error(FetchError::new("An unexpected error occurred"))
                }
            };
            task_slot.send_replace(outcome.clone());
            inner.notify(&key, &outcome);
        });

        slot
    }
}

/// Handle returned by [`QueryCache::subscribe`].
pub struct Subscription<T> {
    id: u64,
    cache: Weak<Inner<T>>,
}

impl<T> Subscription<T> {
    /// Explicitly stop receiving notifications
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.cache.upgrade() {
            lock(&inner.listeners).retain(|(id, _, _)| *id != self.id);
        }
    }
}
