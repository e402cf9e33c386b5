//! Iterator implementations for [SafeQueue](crate::SafeQueue).

use std::collections::vec_deque;
use std::iter::FusedIterator;

use crate::SafeQueue;

/// A blocking iterator over a [SafeQueue](crate::SafeQueue), popping each element it yields.
///
/// Each call to `next` behaves like [wait_pop](crate::SafeQueue::wait_pop), so iteration ends
/// once the queue is closed and empty. Elements pushed after that point will be yielded if `next`
/// is called again, so this is not fused.
///
/// # Example
///
/// ```
/// # use safe_queue::SafeQueue;
/// let queue = SafeQueue::new();
/// queue.push(42);
/// queue.close();
///
/// let mut iter = queue.iter();
/// assert_eq!(iter.next(), Some(42));
/// assert_eq!(iter.next(), None);
/// ```
pub struct Iter<'a, Element> {
    queue: &'a SafeQueue<Element>,
}

impl<'a, Element> Iter<'a, Element> {
    pub(crate) fn new(queue: &'a SafeQueue<Element>) -> Self {
        Self { queue }
    }
}

impl<'a, Element> Iterator for Iter<'a, Element> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        self.queue.wait_pop()
    }
}

/// A non-blocking iterator over a [SafeQueue](crate::SafeQueue), popping each element it yields.
///
/// Each call to `next` behaves like [try_pop](crate::SafeQueue::try_pop), so iteration ends as
/// soon as the queue is empty.
///
/// # Example
///
/// ```
/// # use safe_queue::SafeQueue;
/// let queue = SafeQueue::new();
/// queue.push(42);
///
/// let mut iter = queue.try_iter();
/// assert_eq!(iter.next(), Some(42));
/// assert_eq!(iter.next(), None);
/// ```
pub struct TryIter<'a, Element> {
    queue: &'a SafeQueue<Element>,
}

impl<'a, Element> TryIter<'a, Element> {
    pub(crate) fn new(queue: &'a SafeQueue<Element>) -> Self {
        Self { queue }
    }
}

impl<'a, Element> Iterator for TryIter<'a, Element> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        self.queue.try_pop()
    }
}

/// An owned iterator over the elements left in a [SafeQueue](crate::SafeQueue), in the order
/// they were pushed.
///
/// # Example
///
/// ```
/// # use safe_queue::SafeQueue;
/// let queue = SafeQueue::new();
/// queue.push(1);
/// queue.push(2);
///
/// let mut iter = queue.into_iter();
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next(), Some(2));
/// assert!(iter.next().is_none());
/// ```
pub struct IntoIter<Element> {
    inner: vec_deque::IntoIter<Element>,
}

impl<Element> IntoIter<Element> {
    /// Creates an owned iterator over a [SafeQueue](crate::SafeQueue).
    pub fn new(queue: SafeQueue<Element>) -> Self {
        Self {
            inner: queue.into_elements().into_iter(),
        }
    }
}

impl<Element> Iterator for IntoIter<Element> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<Element> ExactSizeIterator for IntoIter<Element> {}

impl<Element> FusedIterator for IntoIter<Element> {}
