//! Timeout specifiers and error types.
//!
//! See [Timeout](Timeout) and [PopError](PopError).

use std::time::{Duration, Instant};

use thiserror::Error;

/// A timeout (or lack thereof) describing how a blocking pop should behave on an empty queue.
///
/// # Example
///
/// ```
/// # use safe_queue::{PopError, PopResult, SafeQueue, Timeout};
/// let queue = SafeQueue::<u32>::new();
/// let result: PopResult<u32> = queue.wait_pop_with_timeout(Timeout::block_for_millis(1));
/// assert_eq!(result, Err(PopError::TimedOut));
/// ```
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Timeout {
    /// Disallows blocking for an element.
    DontBlock,
    /// Allows blocking for an element until the given time has passed.
    BlockUntil(Instant),
    /// Allows blocking for an element indefinitely.
    BlockIndefinitely,
}

impl Timeout {
    /// Creates a new timeout that lasts for the provided duration, starting now.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::timeout::Timeout;
    /// # use std::time::{Instant, Duration};
    /// let first_timeout = Timeout::BlockUntil(Instant::now());
    /// let second_timeout = Timeout::block_for(Duration::from_secs(1));
    /// assert!(first_timeout < second_timeout);
    /// ```
    pub fn block_for(duration: Duration) -> Self {
        Self::BlockUntil(Instant::now() + duration)
    }

    /// Creates a new timeout that lasts for the provided number of milliseconds, starting now.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::timeout::Timeout;
    /// # use std::time::Instant;
    /// let first_timeout = Timeout::BlockUntil(Instant::now());
    /// let second_timeout = Timeout::block_for_millis(1000);
    /// assert!(first_timeout < second_timeout);
    /// ```
    pub fn block_for_millis(millis: u64) -> Self {
        Self::block_for(Duration::from_millis(millis))
    }

    pub(crate) fn deadline(self) -> Option<Instant> {
        match self {
            Timeout::BlockUntil(deadline) => Some(deadline),
            Timeout::DontBlock | Timeout::BlockIndefinitely => None,
        }
    }
}

/// The result of a pop that may block, which either produced an element or failed.
pub type PopResult<T> = Result<T, PopError>;

/// The reason a pop that may block returned without an element.
#[derive(Error, Debug, Clone, Copy, Ord, PartialOrd, Hash, Eq, PartialEq)]
pub enum PopError {
    /// The queue stayed empty until the [Timeout](Timeout) expired.
    #[error("timed out waiting for an element")]
    TimedOut,
    /// The queue was closed and every element has already been popped.
    #[error("queue is closed and drained")]
    Closed,
}

#[cfg(test)]
mod test {
    use std::time::{Duration, Instant};

    use crate::{PopError, Timeout};

    #[test]
    fn ordering_is_correct() {
        let now = Instant::now();

        let in_the_future = Timeout::BlockUntil(now + Duration::from_secs(1));
        let in_the_past = Timeout::BlockUntil(now - Duration::from_secs(1));

        let mut timeouts = vec![
            Timeout::BlockIndefinitely,
            in_the_future,
            in_the_past,
            Timeout::DontBlock,
        ];

        timeouts.sort();

        assert_eq!(
            timeouts,
            vec![
                Timeout::DontBlock,
                in_the_past,
                in_the_future,
                Timeout::BlockIndefinitely,
            ]
        );
    }

    #[test]
    fn only_block_until_has_a_deadline() {
        let now = Instant::now();

        assert_eq!(Timeout::BlockUntil(now).deadline(), Some(now));
        assert_eq!(Timeout::DontBlock.deadline(), None);
        assert_eq!(Timeout::BlockIndefinitely.deadline(), None);
    }

    #[test]
    fn errors_have_messages() {
        assert_eq!(
            PopError::TimedOut.to_string(),
            "timed out waiting for an element"
        );
        assert_eq!(PopError::Closed.to_string(), "queue is closed and drained");
    }

    #[test]
    fn implements_error() {
        let error = PopError::Closed;
        &error as &dyn std::error::Error;
    }
}
