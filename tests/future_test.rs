#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use promise_future::{Error, Future, State};
    use std::{sync::Arc, sync::Barrier, thread, time::Duration};

    #[test]
    fn test_resolve_scenario() {
        let future = Future::<&str, String>::new();
        assert!(future.is_pending());
        assert_eq!(future.resolve("ok"), Ok(()));
        assert!(future.is_resolved());
        assert_eq!(future.wait(), Ok("ok"));
        assert_eq!(future.wait(), Ok("ok"));
        assert_eq!(future.reject("err".into()), Err(Error::AlreadyResolved));
    }

    #[test]
    fn test_reject_from_other_thread() {
        let future = Future::<String, String>::new();
        let waiter = future.clone();
        let task = thread::spawn(move || waiter.wait());

        thread::sleep(Duration::from_millis(50));
        future.reject("E".into()).unwrap();

        assert_eq!(task.join().expect("The waiter thread has panicked"), Err("E".into()));
        assert!(future.is_rejected());
    }

    #[test]
    fn test_future_shared_through_arc() {
        let future = Arc::new(Future::<i32, ()>::new());
        let producer = Arc::clone(&future);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.resolve(42).unwrap();
        });

        assert_eq!(future.wait(), Ok(42));
        assert_eq!(future.state(), State::Resolved);
    }

    #[test]
    fn test_blocking_and_async_waiters_agree() {
        let future = Future::<u64, String>::new();
        let blocking: Vec<_> = (0..4)
            .map(|_| {
                let future = future.clone();
                thread::spawn(move || future.wait())
            })
            .collect();
        let asynchronous: Vec<_> = (0..4)
            .map(|_| {
                let wait = future.wait_async();
                thread::spawn(move || block_on(wait))
            })
            .collect();

        thread::sleep(Duration::from_millis(10));
        future.resolve(7).unwrap();

        for task in blocking.into_iter().chain(asynchronous) {
            assert_eq!(task.join().expect("A waiter thread has panicked"), Ok(7));
        }
    }

    #[test]
    fn test_presettled_matches_settled_later() {
        let early = Future::<i32, i32>::resolved(1);
        let late = Future::<i32, i32>::new();
        late.resolve(1).unwrap();
        assert_eq!(early.state(), late.state());
        assert_eq!(early.wait(), late.wait());
        assert_eq!(early.reject(2), late.reject(2));

        let early = Future::<i32, i32>::rejected(1);
        let late = Future::<i32, i32>::new();
        late.reject(1).unwrap();
        assert_eq!(early.state(), late.state());
        assert_eq!(early.wait(), late.wait());
        assert_eq!(early.resolve(2), late.resolve(2));
    }

    #[test]
    fn test_racing_settlers_and_waiters() {
        const SETTLERS: usize = 8;
        const WAITERS: usize = 8;
        let future = Future::<usize, usize>::new();
        let barrier = Arc::new(Barrier::new(SETTLERS + WAITERS));

        let waiters: Vec<_> = (0..WAITERS)
            .map(|_| {
                let future = future.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    future.wait()
                })
            })
            .collect();
        let settlers: Vec<_> = (0..SETTLERS)
            .map(|i| {
                let future = future.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    if i % 2 == 0 {
                        future.resolve(i)
                    } else {
                        future.reject(i)
                    }
                })
            })
            .collect();

        let wins = settlers
            .into_iter()
            .map(|task| task.join().expect("A settler thread has panicked"))
            .filter(Result::is_ok)
            .count();
        assert_eq!(wins, 1);

        let outcome = future.try_wait().expect("future is settled");
        for task in waiters {
            assert_eq!(task.join().expect("A waiter thread has panicked"), outcome);
        }
    }
}
