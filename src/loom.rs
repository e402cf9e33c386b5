use loom::model;
use loom::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use loom::sync::Arc;
use loom::thread;
use loom::thread::JoinHandle;

use crate::SafeQueue;

#[test]
fn wait_pop_receives_elements_in_push_order() {
    model(|| {
        let queue = Arc::new(SafeQueue::<u32>::new());

        let producer = spawn(queue.clone(), |queue| {
            queue.push(1);
            queue.push(2);
        });

        assert_eq!(queue.wait_pop(), Some(1));
        assert_eq!(queue.wait_pop(), Some(2));
        producer.join().unwrap();
    });
}

#[test]
fn try_pop_delivers_an_element_once() {
    model(|| {
        let queue = Arc::new(SafeQueue::<u32>::new());
        queue.push(42);

        let first = spawn(queue.clone(), |queue| queue.try_pop());
        let second = spawn(queue.clone(), |queue| queue.try_pop());

        let mut results = vec![first.join().unwrap(), second.join().unwrap()];
        results.sort();

        assert_eq!(results, vec![None, Some(42)]);
    });
}

#[test]
fn single_push_releases_one_of_two_waiters() {
    model(|| {
        let queue = Arc::new(SafeQueue::<u32>::new());
        let popped = Arc::new(AtomicUsize::new(0));

        let consumers: Vec<_> = (0..2)
            .map(|_| {
                spawn((queue.clone(), popped.clone()), |(queue, popped)| {
                    let element = queue.wait_pop();
                    if element.is_some() {
                        popped.fetch_add(1, Ordering::SeqCst);
                    }
                    element
                })
            })
            .collect();

        queue.push(42);
        queue.close();

        let mut results: Vec<_> = consumers
            .into_iter()
            .map(|consumer| consumer.join().unwrap())
            .collect();
        results.sort();

        assert_eq!(results, vec![None, Some(42)]);
        assert_eq!(popped.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn wait_pop_waits_for_push() {
    model(|| {
        let queue = Arc::new(SafeQueue::<u32>::new());
        let flag = Arc::new(AtomicBool::new(false));

        let consumer = spawn((queue.clone(), flag.clone()), |(queue, flag)| {
            let element = queue.wait_pop();
            flag.store(true, Ordering::SeqCst);
            element
        });

        assert!(!flag.load(Ordering::SeqCst));

        queue.push(42);
        assert_eq!(consumer.join().unwrap(), Some(42));
    });
}

#[test]
fn close_releases_waiter() {
    model(|| {
        let queue = Arc::new(SafeQueue::<u32>::new());

        let consumer = spawn(queue.clone(), |queue| queue.wait_pop());

        queue.close();
        assert_eq!(consumer.join().unwrap(), None);
    });
}

fn spawn<T: 'static, U: 'static>(param: U, f: impl FnOnce(U) -> T + 'static) -> JoinHandle<T> {
    thread::spawn(move || f(param))
}
