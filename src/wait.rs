use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::future::Shared;

/// Resolves to the outcome of a [`Future`](crate::Future) once it settles.
///
/// Any number of `Wait`s may be polled at once, from any executor. They are
/// all woken by the settle and all complete with the same outcome.
///
/// # Examples
///
/// ```
/// use promise_future::Future;
/// use futures::executor::block_on;
/// use std::thread;
///
/// let future = Future::<String, ()>::new();
/// let waiter = future.wait_async();
/// let task = thread::spawn(move || block_on(waiter));
///
/// future.resolve("Hi".into()).unwrap();
/// assert_eq!(task.join().unwrap(), Ok("Hi".to_string()));
/// ```
pub struct Wait<T, E> {
    shared: Arc<Shared<T, E>>,
    /// Slot in the future's waker list, once polled while pending.
    key: Option<usize>,
}

impl<T, E> Wait<T, E> {
    pub(crate) fn new(shared: Arc<Shared<T, E>>) -> Self {
        Self { shared, key: None }
    }
}

impl<T, E> Clone for Wait<T, E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.shared))
    }
}

impl<T, E> fmt::Debug for Wait<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wait").finish_non_exhaustive()
    }
}

impl<T: Clone, E: Clone> std::future::Future for Wait<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut inner = this.shared.inner.lock();
        if let Some(outcome) = inner.slot.outcome() {
            this.key = None;
            return Poll::Ready(outcome);
        }

        let registered = this
            .key
            .and_then(|key| inner.waker.iter().position(|(k, _)| *k == key));
        match registered {
            Some(index) => {
                let waker = &mut inner.waker[index].1;
                if !waker.will_wake(cx.waker()) {
                    *waker = cx.waker().clone();
                }
            }
            None => {
                let key = inner.next_key;
                inner.next_key = inner.next_key.wrapping_add(1);
                inner.waker.push((key, cx.waker().clone()));
                this.key = Some(key);
            }
        }
        Poll::Pending
    }
}

impl<T, E> Drop for Wait<T, E> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.shared.inner.lock().waker.retain(|(k, _)| *k != key);
        }
    }
}
