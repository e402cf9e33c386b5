#![doc = include_str!("documentation.md")]
#![warn(missing_docs)]

use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::iter::FromIterator;
use std::panic::{RefUnwindSafe, UnwindSafe};

use crossbeam_utils::CachePadded;
use log::{debug, trace};

use crate::iter::{IntoIter, Iter, TryIter};
pub use crate::timeout::*;
use crate::util::sync::condvar::{Condvar, WaitResult};
use crate::util::sync::mutex::Mutex;

pub mod iter;
#[cfg(all(test, loom))]
mod loom;
pub mod timeout;
mod util;

#[doc = include_str!("documentation.md")]
pub struct SafeQueue<Element> {
    state: CachePadded<Mutex<State<Element>>>,
    // Signalled whenever an element is pushed or the queue is closed
    available: Condvar,
}

struct State<Element> {
    elements: VecDeque<Element>,
    closed: bool,
    // Threads currently suspended in a blocking pop, pushes skip notifying when this is zero
    waiters: usize,
}

impl<Element> SafeQueue<Element> {
    /// Creates a new, empty queue.
    pub fn new() -> Self {
        Self::from_deque(VecDeque::new())
    }

    /// Creates a new, empty queue with space for at least `capacity` elements before it needs to
    /// reallocate. The queue is still unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::with_capacity(16);
    /// queue.push(42);
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_deque(VecDeque::with_capacity(capacity))
    }

    fn from_deque(elements: VecDeque<Element>) -> Self {
        Self {
            state: CachePadded::new(Mutex::new(State {
                elements,
                closed: false,
                waiters: 0,
            })),
            available: Condvar::new(),
        }
    }

    /// Pushes an element onto the back of the queue, waking one consumer blocked in a pop if
    /// there is one.
    ///
    /// This never blocks for longer than it takes to acquire the internal lock. Elements pushed
    /// after the queue is [closed](SafeQueue::close) are still delivered.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// queue.push(42);
    /// assert_eq!(queue.try_pop(), Some(42));
    /// ```
    pub fn push(&self, element: Element) {
        let mut state = self.state.lock();
        state.elements.push_back(element);
        let has_waiters = state.waiters > 0;
        drop(state);

        if has_waiters {
            self.available.notify_one();
        }
    }

    /// Pushes every element of an iterator onto the back of the queue, in order, without
    /// interleaving pushes from other threads.
    ///
    /// The iterator is exhausted before the internal lock is taken.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// queue.push(1);
    /// queue.push_all(vec![2, 3]);
    /// assert_eq!(queue.try_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn push_all<Elements>(&self, elements: Elements)
    where
        Elements: IntoIterator<Item = Element>,
    {
        let elements: Vec<_> = elements.into_iter().collect();
        let count = elements.len();

        if count == 0 {
            return;
        }

        let mut state = self.state.lock();
        state.elements.extend(elements);
        let has_waiters = state.waiters > 0;
        drop(state);

        if has_waiters {
            if count == 1 {
                self.available.notify_one();
            } else {
                self.available.notify_all();
            }
        }
    }

    /// Pops the element at the front of the queue, blocking until one is pushed if the queue is
    /// empty.
    ///
    /// Returns `None` only once the queue has been [closed](SafeQueue::close) and every element
    /// has been popped. A queue that is never closed makes this wait indefinitely.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// # use std::sync::Arc;
    /// # use std::thread;
    /// let queue = Arc::new(SafeQueue::new());
    ///
    /// let producer = {
    ///     let queue = queue.clone();
    ///     thread::spawn(move || queue.push(42))
    /// };
    ///
    /// assert_eq!(queue.wait_pop(), Some(42));
    /// producer.join().unwrap();
    /// ```
    pub fn wait_pop(&self) -> Option<Element> {
        self.wait_pop_with_timeout(Timeout::BlockIndefinitely).ok()
    }

    /// Pops the element at the front of the queue, blocking until one is pushed or the given
    /// timeout expires.
    ///
    /// Fails with [PopError::TimedOut](PopError::TimedOut) if the queue stayed empty for the whole
    /// timeout, or with [PopError::Closed](PopError::Closed) if the queue is closed and has no
    /// elements left. [Timeout::DontBlock](Timeout::DontBlock) checks the queue once without
    /// waiting.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::{PopError, SafeQueue};
    /// # use safe_queue::Timeout::{self, DontBlock};
    /// let queue = SafeQueue::new();
    /// assert_eq!(queue.wait_pop_with_timeout(DontBlock), Err(PopError::TimedOut));
    /// assert_eq!(
    ///     queue.wait_pop_with_timeout(Timeout::block_for_millis(10)),
    ///     Err(PopError::TimedOut)
    /// );
    ///
    /// queue.push(42);
    /// assert_eq!(queue.wait_pop_with_timeout(DontBlock), Ok(42));
    ///
    /// queue.close();
    /// assert_eq!(queue.wait_pop_with_timeout(DontBlock), Err(PopError::Closed));
    /// ```
    pub fn wait_pop_with_timeout(&self, timeout: Timeout) -> PopResult<Element> {
        let mut state = self.state.lock();

        loop {
            if let Some(result) = Self::pop_ready(&mut state) {
                return result;
            }

            if timeout == Timeout::DontBlock {
                return Err(PopError::TimedOut);
            }

            state.waiters += 1;
            let wait_result = self.available.wait(&mut state, timeout.deadline());
            state.waiters -= 1;

            // A push may have landed between the deadline passing and the lock being reacquired
            if let WaitResult::TimedOut = wait_result {
                return Self::pop_ready(&mut state).unwrap_or_else(|| {
                    trace!("timed out waiting for an element");
                    Err(PopError::TimedOut)
                });
            }
        }
    }

    fn pop_ready(state: &mut State<Element>) -> Option<PopResult<Element>> {
        match state.elements.pop_front() {
            Some(element) => Some(Ok(element)),
            None if state.closed => Some(Err(PopError::Closed)),
            None => None,
        }
    }

    /// Pops the element at the front of the queue if there is one, without blocking.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// assert_eq!(queue.try_pop(), None);
    ///
    /// queue.push(42);
    /// assert_eq!(queue.try_pop(), Some(42));
    /// ```
    pub fn try_pop(&self) -> Option<Element> {
        self.state.lock().elements.pop_front()
    }

    /// Closes the queue, waking every consumer blocked in a pop.
    ///
    /// Elements already in the queue, or pushed later, are still delivered. Once the queue is
    /// empty, blocking pops return instead of waiting. Closing a closed queue does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// queue.push(42);
    /// queue.close();
    ///
    /// assert_eq!(queue.wait_pop(), Some(42));
    /// assert_eq!(queue.wait_pop(), None);
    /// ```
    pub fn close(&self) {
        let mut state = self.state.lock();

        if state.closed {
            return;
        }

        state.closed = true;
        let waiters = state.waiters;
        drop(state);

        debug!("queue closed, releasing {} waiting consumers", waiters);
        self.available.notify_all();
    }

    /// Determines whether the queue has been [closed](SafeQueue::close).
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Determines whether the queue is empty.
    ///
    /// The result may already be stale by the time it is returned if other threads are using the
    /// queue.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// assert!(queue.is_empty());
    ///
    /// queue.push(42);
    /// assert!(!queue.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.state.lock().elements.is_empty()
    }

    /// Returns the number of elements in the queue. Like [is_empty](SafeQueue::is_empty), this is
    /// only a snapshot.
    pub fn len(&self) -> usize {
        self.state.lock().elements.len()
    }

    /// Returns the number of threads currently blocked waiting for an element. This is only a
    /// snapshot.
    pub fn waiters(&self) -> usize {
        self.state.lock().waiters
    }

    /// Creates an iterator which pops elements with [wait_pop](SafeQueue::wait_pop), ending once
    /// the queue is closed and empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// queue.push_all(vec![1, 2, 3]);
    /// queue.close();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, Element> {
        Iter::new(self)
    }

    /// Creates an iterator which pops elements with [try_pop](SafeQueue::try_pop), ending once
    /// the queue is empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use safe_queue::SafeQueue;
    /// let queue = SafeQueue::new();
    /// queue.push_all(vec![1, 2, 3]);
    /// assert_eq!(queue.try_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert!(queue.is_empty());
    /// ```
    pub fn try_iter(&self) -> TryIter<'_, Element> {
        TryIter::new(self)
    }

    pub(crate) fn into_elements(self) -> VecDeque<Element> {
        CachePadded::into_inner(self.state).into_inner().elements
    }
}

impl<Element> Default for SafeQueue<Element> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Element> Debug for SafeQueue<Element> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let state = self.state.lock();

        f.debug_struct("SafeQueue")
            .field("len", &state.elements.len())
            .field("closed", &state.closed)
            .finish()
    }
}

impl<Element> Extend<Element> for SafeQueue<Element> {
    fn extend<Elements: IntoIterator<Item = Element>>(&mut self, elements: Elements) {
        self.push_all(elements)
    }
}

impl<Element> FromIterator<Element> for SafeQueue<Element> {
    fn from_iter<Elements: IntoIterator<Item = Element>>(elements: Elements) -> Self {
        Self::from_deque(elements.into_iter().collect())
    }
}

impl<Element> IntoIterator for SafeQueue<Element> {
    type Item = Element;
    type IntoIter = IntoIter<Element>;

    fn into_iter(self) -> IntoIter<Element> {
        IntoIter::new(self)
    }
}

impl<'a, Element> IntoIterator for &'a SafeQueue<Element> {
    type Item = Element;
    type IntoIter = Iter<'a, Element>;

    fn into_iter(self) -> Iter<'a, Element> {
        self.iter()
    }
}

impl<Element: UnwindSafe> UnwindSafe for SafeQueue<Element> {}

impl<Element: RefUnwindSafe> RefUnwindSafe for SafeQueue<Element> {}
