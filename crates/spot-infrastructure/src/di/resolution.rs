//! Re-entrancy and coalescing guards for lookups
//!
//! [`ResolutionGuard`] tracks, per thread, which addresses are being
//! instantiated so that an injection cycle fails fast instead of recursing
//! without bound. [`AddressLocks`] serializes builds of the same address
//! across threads so at most one instance is ever cached per address.

use std::cell::RefCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use spot_domain::{Address, Error, Result};

thread_local! {
    static RESOLVING: RefCell<Vec<(usize, Address)>> = const { RefCell::new(Vec::new()) };
}

/// Marks an address as being resolved on the current thread until dropped
#[derive(Debug)]
pub struct ResolutionGuard {
    container_id: usize,
}

impl ResolutionGuard {
    /// Enter `address` for container `container_id`
    ///
    /// Fails with [`Error::DependencyCycle`] if the address is already being
    /// resolved further up the current call stack.
    pub fn enter(container_id: usize, address: &Address) -> Result<Self> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            let start = stack
                .iter()
                .position(|(id, entered)| *id == container_id && entered == address);
            if let Some(start) = start {
                let chain = stack[start..]
                    .iter()
                    .filter(|(id, _)| *id == container_id)
                    .map(|(_, entered)| entered.to_string())
                    .chain(std::iter::once(address.to_string()));
                return Err(Error::dependency_cycle(chain));
            }
            stack.push((container_id, address.clone()));
            Ok(Self { container_id })
        })
    }

    /// Number of addresses currently being resolved on this thread
    pub fn depth(container_id: usize) -> usize {
        RESOLVING.with(|stack| {
            stack
                .borrow()
                .iter()
                .filter(|(id, _)| *id == container_id)
                .count()
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(last) = stack.iter().rposition(|(id, _)| *id == self.container_id) {
                stack.remove(last);
            }
        });
    }
}

/// One mutex per address, created on demand
///
/// Entries for builds that failed are released again, so the table only
/// holds addresses that were built successfully or are being built.
#[derive(Debug, Default)]
pub struct AddressLocks {
    locks: DashMap<Address, Arc<Mutex<()>>>,
}

impl AddressLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `address`
    pub fn lock_for(&self, address: &Address) -> Arc<Mutex<()>> {
        self.locks.entry(address.clone()).or_default().clone()
    }

    /// Drop the entry for `address` unless another caller still holds `lock`
    pub fn release(&self, address: &Address, lock: &Arc<Mutex<()>>) {
        // The table's copy plus the caller's
        self.locks.remove_if(address, |_, held| {
            Arc::ptr_eq(held, lock) && Arc::strong_count(held) == 2
        });
    }

    /// Number of addresses with a lock
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no lock exists
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Acquire `lock`; poisoning is ignored since the lock guards no data
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
