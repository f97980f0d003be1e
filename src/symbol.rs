//! Global symbol-name interning.
//!
//! Every `Symbol` terminal stores its name as an `Arc<str>` handed out by a
//! process-wide pool, so repeated construction of the same name shares one
//! allocation and cloning expression handles stays cheap. The pool only
//! caches names; it never caches evaluation results.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashSet;

static POOL: OnceLock<RwLock<FxHashSet<Arc<str>>>> = OnceLock::new();

fn pool() -> &'static RwLock<FxHashSet<Arc<str>>> {
    POOL.get_or_init(|| RwLock::new(FxHashSet::default()))
}

/// Look up or insert `name`, returning the pool's shared handle.
pub(crate) fn get_or_intern(name: &str) -> Arc<str> {
    {
        let read = pool().read().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = read.get(name) {
            return Arc::clone(existing);
        }
    }

    let mut write = pool().write().unwrap_or_else(PoisonError::into_inner);
    // Racing writers may have inserted between the read and write locks.
    if let Some(existing) = write.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    write.insert(Arc::clone(&interned));
    interned
}
