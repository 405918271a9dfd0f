//! A single-slot future that is settled exactly once and read any number of
//! times.
//!
//! A [`Future`] starts out pending. The first call to [`Future::resolve`] or
//! [`Future::reject`] settles it; every later attempt fails with
//! [`Error::AlreadyResolved`] or [`Error::AlreadyRejected`]. Readers either
//! block a thread with [`Future::wait`] or await a [`Wait`] obtained from
//! [`Future::wait_async`].
//!
//! ```
//! use promise_future::Future;
//! use std::thread;
//!
//! let future = Future::<String, String>::new();
//! let reader = future.clone();
//! let task = thread::spawn(move || reader.wait());
//!
//! future.resolve("🍓".into()).unwrap();
//! assert_eq!(task.join().unwrap(), Ok("🍓".to_string()));
//! ```
#![forbid(unsafe_code)]

mod future;
mod wait;

pub use crate::future::{Future, State};
pub use crate::wait::Wait;

/// Errors reported by the future itself, as opposed to the rejection payload
/// a producer stores in it.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("already resolved")]
    AlreadyResolved,
    #[error("already rejected")]
    AlreadyRejected,
    #[error("still pending")]
    StillPending,
}

impl Error {
    /// True for the errors a losing settle attempt receives.
    pub fn is_already_settled(&self) -> bool {
        matches!(self, Error::AlreadyResolved | Error::AlreadyRejected)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
