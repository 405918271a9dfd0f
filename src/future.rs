use std::fmt;
use std::mem;
use std::future::IntoFuture;
use std::sync::Arc;
use std::task::Waker;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::{Error, Result, Wait};

/// Where a [`Future`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Pending,
    Resolved,
    Rejected,
}

#[derive(Debug)]
pub(crate) enum Slot<T, E> {
    Pending,
    Resolved(T),
    Rejected(E),
}

impl<T, E> Slot<T, E> {
    fn state(&self) -> State {
        match self {
            Slot::Pending => State::Pending,
            Slot::Resolved(_) => State::Resolved,
            Slot::Rejected(_) => State::Rejected,
        }
    }

    /// Clones the settled payload out, `None` while pending.
    pub(crate) fn outcome(&self) -> Option<std::result::Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        match self {
            Slot::Pending => None,
            Slot::Resolved(value) => Some(Ok(value.clone())),
            Slot::Rejected(err) => Some(Err(err.clone())),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Inner<T, E> {
    pub(crate) slot: Slot<T, E>,
    /// Async waiters keyed by the `Wait` that registered them. Drained by the
    /// settle, pruned when a `Wait` is dropped.
    pub(crate) waker: Vec<(usize, Waker)>,
    pub(crate) next_key: usize,
}

#[derive(Debug)]
pub(crate) struct Shared<T, E> {
    pub(crate) inner: Mutex<Inner<T, E>>,
    condvar: Condvar,
}

/// A write-once result slot shared between producers and any number of
/// waiters.
///
/// Cloning a `Future` clones the handle, not the slot: every clone settles
/// and observes the same state.
///
/// # Examples
///
/// ```
/// use promise_future::{Error, Future};
/// use std::thread;
///
/// let future = Future::<u32, String>::new();
/// let waiters: Vec<_> = (0..4)
///     .map(|_| {
///         let future = future.clone();
///         thread::spawn(move || future.wait())
///     })
///     .collect();
///
/// future.reject("💥".into()).unwrap();
/// assert_eq!(future.resolve(1), Err(Error::AlreadyRejected));
/// for waiter in waiters {
///     assert_eq!(waiter.join().unwrap(), Err("💥".to_string()));
/// }
/// ```
pub struct Future<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Future<T, E> {
    /// A pending future.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    slot: Slot::Pending,
                    waker: vec![],
                    next_key: 0,
                }),
                condvar: Condvar::new(),
            }),
        }
    }

    /// A future that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        let future = Self::new();
        future.must_resolve(value);
        future
    }

    /// A future that is already rejected with `err`.
    pub fn rejected(err: E) -> Self {
        let future = Self::new();
        future.must_reject(err);
        future
    }

    /// Settles the future with `value` and wakes every waiter.
    ///
    /// Only the first settle succeeds. Later calls leave the future untouched
    /// and report how it was settled.
    pub fn resolve(&self, value: T) -> Result<()> {
        self.settle(Slot::Resolved(value))
    }

    /// Settles the future with `err` and wakes every waiter.
    pub fn reject(&self, err: E) -> Result<()> {
        self.settle(Slot::Rejected(err))
    }

    /// Like [`resolve`](Self::resolve), for call sites that know the future
    /// is fresh.
    ///
    /// # Panics
    ///
    /// Panics if the future is already settled.
    pub fn must_resolve(&self, value: T) {
        if let Err(err) = self.resolve(value) {
            panic!("must_resolve on a settled future: {err}");
        }
    }

    /// Like [`reject`](Self::reject), for call sites that know the future is
    /// fresh.
    ///
    /// # Panics
    ///
    /// Panics if the future is already settled.
    pub fn must_reject(&self, err: E) {
        if let Err(err) = self.reject(err) {
            panic!("must_reject on a settled future: {err}");
        }
    }

    pub fn state(&self) -> State {
        self.shared.inner.lock().slot.state()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == State::Pending
    }

    pub fn is_resolved(&self) -> bool {
        self.state() == State::Resolved
    }

    pub fn is_rejected(&self) -> bool {
        self.state() == State::Rejected
    }

    /// Blocks the calling thread until the future settles, then returns the
    /// stored value or error.
    ///
    /// The result is cloned out, so waiting again returns the same outcome
    /// without blocking.
    pub fn wait(&self) -> std::result::Result<T, E>
    where
        T: Clone,
        E: Clone,
    {
        let mut inner = self.shared.inner.lock();
        loop {
            if let Some(outcome) = inner.slot.outcome() {
                return outcome;
            }
            trace!("parking until the future settles");
            self.shared.condvar.wait(&mut inner);
        }
    }

    /// Returns the outcome without blocking, or [`Error::StillPending`].
    pub fn try_wait(&self) -> Result<std::result::Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.shared
            .inner
            .lock()
            .slot
            .outcome()
            .ok_or(Error::StillPending)
    }

    /// An async view of this future. Every `Wait` completes once the future
    /// settles.
    pub fn wait_async(&self) -> Wait<T, E> {
        Wait::new(Arc::clone(&self.shared))
    }

    fn settle(&self, slot: Slot<T, E>) -> Result<()> {
        let mut inner = self.shared.inner.lock();
        let err = match inner.slot {
            Slot::Pending => None,
            Slot::Resolved(_) => Some(Error::AlreadyResolved),
            Slot::Rejected(_) => Some(Error::AlreadyRejected),
        };
        if let Some(err) = err {
            debug!(attempted = ?slot.state(), "settle lost: {err}");
            return Err(err);
        }

        trace!(state = ?slot.state(), waiters = inner.waker.len(), "future settled");
        inner.slot = slot;
        self.shared.condvar.notify_all();
        // Wakers may call back into this future.
        let wakers = mem::take(&mut inner.waker);
        drop(inner);
        for (_, waker) in wakers {
            waker.wake()
        }
        Ok(())
    }
}

impl<T, E> Default for Future<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Future<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Future<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("state", &self.state())
            .finish()
    }
}

impl<T: Clone, E: Clone> IntoFuture for Future<T, E> {
    type Output = std::result::Result<T, E>;
    type IntoFuture = Wait<T, E>;

    fn into_future(self) -> Self::IntoFuture {
        Wait::new(self.shared)
    }
}
