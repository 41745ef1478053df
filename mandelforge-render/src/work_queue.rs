use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// A shared FIFO of work items plus quiescence detection for a pool of `N`
/// workers (§4.4, Design A — producer/consumer counting).
///
/// Workers dequeue via [`pop`](Self::pop), which blocks until either an
/// item is available or every worker has gone idle with nothing left to
/// do, at which point it returns `None` to every waiter. A worker that
/// pops a work item may push more (e.g. the Mariani–Silver subdivider
/// pushing child tiles), so quiescence is "queue empty AND all workers
/// idle", not just "queue empty".
pub struct WorkQueue<T> {
    workers: usize,
    state: Mutex<State<T>>,
    cv: Condvar,
}

struct State<T> {
    queue: VecDeque<T>,
    /// Workers that are not currently blocked waiting for work.
    active: usize,
    done: bool,
}

impl<T> WorkQueue<T> {
    /// Create a queue seeded with `initial` and sized for `workers` threads.
    pub fn new(workers: usize, initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            workers,
            state: Mutex::new(State {
                queue: initial.into_iter().collect(),
                active: workers,
                done: false,
            }),
            cv: Condvar::new(),
        }
    }

    /// Push an item and wake one waiting worker.
    pub fn push(&self, item: T) {
        let mut state = self.state.lock().unwrap();
        state.queue.push_back(item);
        self.cv.notify_one();
    }

    /// Push several items and wake enough waiters to drain them.
    pub fn push_all(&self, items: impl IntoIterator<Item = T>) {
        let mut state = self.state.lock().unwrap();
        state.queue.extend(items);
        self.cv.notify_all();
    }

    /// Dequeue the next item, blocking until one is available or the pool
    /// has reached quiescence (queue empty and every worker idle), in
    /// which case every waiter is released with `None`.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.queue.pop_front() {
                return Some(item);
            }
            if state.done {
                return None;
            }
            // This worker has nothing to do right now.
            state.active -= 1;
            if state.active == 0 {
                // Every worker is idle and the queue is empty: quiescent.
                state.done = true;
                self.cv.notify_all();
                return None;
            }
            state = self.cv.wait(state).unwrap();
            // Woken either by a push or by the quiescence signal; re-join
            // the active pool before re-checking the queue.
            if !state.done {
                state.active += 1;
            }
        }
    }

    /// Number of workers this queue was sized for.
    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn single_worker_drains_then_terminates() {
        let q: Arc<WorkQueue<i32>> = Arc::new(WorkQueue::new(1, [1, 2, 3]));
        let mut seen = Vec::new();
        while let Some(v) = q.pop() {
            seen.push(v);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn empty_queue_terminates_immediately() {
        let q: WorkQueue<i32> = WorkQueue::new(2, []);
        assert_eq!(q.pop(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn worker_can_push_more_work_before_others_quiesce() {
        let q: Arc<WorkQueue<i32>> = Arc::new(WorkQueue::new(2, [10]));
        let total = Arc::new(std::sync::atomic::AtomicI32::new(0));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let q = Arc::clone(&q);
            let total = Arc::clone(&total);
            handles.push(thread::spawn(move || {
                while let Some(item) = q.pop() {
                    total.fetch_add(item, std::sync::atomic::Ordering::SeqCst);
                    if item > 0 {
                        q.push(item - 10);
                    }
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(total.load(std::sync::atomic::Ordering::SeqCst), 10);
    }

    #[test]
    fn all_items_are_eventually_consumed_across_workers() {
        let items: Vec<i32> = (0..200).collect();
        let q: Arc<WorkQueue<i32>> = Arc::new(WorkQueue::new(4, items.clone()));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let q = Arc::clone(&q);
            let seen = Arc::clone(&seen);
            handles.push(thread::spawn(move || {
                while let Some(v) = q.pop() {
                    seen.lock().unwrap().push(v);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let mut seen = seen.lock().unwrap();
        seen.sort_unstable();
        assert_eq!(*seen, items);
    }
}
