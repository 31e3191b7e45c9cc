//! Integration tests for the retry service
//!
//! Exercises factories, strategies and the service together on real threads:
//! blocking backoff, cross-thread interruption, caller-defined error types
//! and concurrent calls sharing one factory.

use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use steadfast_retry::{
    interrupt, InterruptedSleep, RetryError, RetryService, RetryStrategyFactory,
};

fn factory(retries: u32, delay: Duration) -> RetryStrategyFactory {
    RetryStrategyFactory::builder().max_retry_count(retries).delay(delay).build()
}

#[derive(Debug)]
enum FetchError {
    NotReady(String),
    Cancelled(InterruptedSleep),
}

impl From<InterruptedSleep> for FetchError {
    fn from(err: InterruptedSleep) -> Self {
        Self::Cancelled(err)
    }
}

/// Ensures a single failure followed by success completes after one blocking
/// backoff.
#[test]
fn test_fails_once_then_succeeds() {
    let service = RetryService::new();
    let attempts = AtomicU32::new(0);
    let start = Instant::now();

    let result = service.run(&factory(1, Duration::from_millis(20)), || {
        if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(io::Error::other("blah"))
        } else {
            Ok(())
        }
    });

    assert!(result.is_ok());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() >= Duration::from_millis(20));
}

/// Validates that an exhausted budget surfaces the operation's own error,
/// unwrapped, after `N + 1` attempts.
#[test]
fn test_always_failing_operation_surfaces_unwrapped_error() {
    let attempts = AtomicU32::new(0);

    let err = RetryService::new()
        .call(&factory(2, Duration::from_millis(1)), || -> Result<u8, io::Error> {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::ConnectionRefused, "blah"))
        })
        .expect_err("budget should run out");

    assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
    assert_eq!(err.to_string(), "blah");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

/// Confirms a caller-defined error type flows through untouched and only
/// gains the interruption through its own `From` impl.
#[test]
fn test_caller_error_type_is_not_wrapped() {
    let result: Result<(), FetchError> = RetryService::new()
        .call(&factory(1, Duration::ZERO), || Err(FetchError::NotReady("blah".into())));

    match result {
        Err(FetchError::NotReady(message)) => assert_eq!(message, "blah"),
        other => panic!("expected NotReady, got {other:?}"),
    }
}

/// Verifies `anyhow::Error` works as the operation error type.
#[test]
fn test_anyhow_error_type() {
    let attempts = AtomicU32::new(0);

    let value = RetryService::new()
        .call(&factory(3, Duration::ZERO), || {
            if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                Err(anyhow::anyhow!("not yet"))
            } else {
                Ok("ready")
            }
        })
        .expect("fourth attempt succeeds");

    assert_eq!(value, "ready");
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

/// Ensures an interrupt raised from another thread aborts a long backoff,
/// surfaces as the interruption and never re-attempts the operation.
#[test]
fn test_interrupt_from_other_thread_aborts_backoff() {
    let (tx, rx) = mpsc::channel();
    let attempts = Arc::new(AtomicU32::new(0));
    let attempts_in_worker = Arc::clone(&attempts);

    let worker = thread::spawn(move || {
        tx.send(interrupt::current()).expect("main thread is listening");
        let start = Instant::now();
        let result: Result<(), FetchError> =
            RetryService::new().run(&factory(5, Duration::from_secs(30)), || {
                attempts_in_worker.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::NotReady("blah".into()))
            });
        (result, start.elapsed())
    });

    let handle = rx.recv().expect("worker sends its handle");
    thread::sleep(Duration::from_millis(20));
    handle.interrupt();

    let (result, elapsed) = worker.join().expect("worker should not panic");
    match result {
        Err(FetchError::Cancelled(err)) => assert_eq!(err.delay(), Duration::from_secs(30)),
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(elapsed < Duration::from_secs(30));
}

/// Validates that an interrupt pending before the call cuts the first
/// backoff short and maps to `io::ErrorKind::Interrupted`.
#[test]
fn test_pending_interrupt_maps_to_io_interrupted() {
    interrupt::current().interrupt();
    let attempts = AtomicU32::new(0);

    let err = RetryService::new()
        .run(&factory(3, Duration::from_secs(30)), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::other("blah"))
        })
        .expect_err("interrupt aborts the call");

    assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(!interrupt::take());
}

/// Verifies an interrupt is ignored while attempts succeed and no backoff
/// happens.
#[test]
fn test_interrupt_without_backoff_is_not_observed() {
    let handle = interrupt::current();
    handle.interrupt();

    let result: Result<u8, RetryError<io::Error>> =
        RetryService::new().call(&factory(3, Duration::from_secs(30)), || Ok(7));

    assert_eq!(result.ok(), Some(7));
    assert!(handle.is_interrupted());
    assert!(interrupt::take());
}

/// Confirms concurrent calls on one shared factory keep independent budgets.
#[test]
fn test_concurrent_calls_share_factory_not_budget() {
    let shared = Arc::new(factory(2, Duration::from_millis(1)));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let factory = Arc::clone(&shared);
            thread::spawn(move || {
                let mut attempts = 0u32;
                let result = RetryService::new().run(&*factory, || {
                    attempts += 1;
                    Err(io::Error::other("blah"))
                });
                (result.is_err(), attempts)
            })
        })
        .collect();

    for worker in workers {
        let (failed, attempts) = worker.join().expect("worker should not panic");
        assert!(failed);
        assert_eq!(attempts, 3);
    }
}

/// Ensures a zero retry budget attempts exactly once without sleeping.
#[test]
fn test_zero_retries_attempts_once() {
    let attempts = AtomicU32::new(0);
    let start = Instant::now();

    let result = RetryService::new().run(&factory(0, Duration::from_secs(30)), || {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("blah"))
    });

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(30));
}
