use free_threading_mutex::{FreeThreadingMutex, OsLock, RawLock};
use std::cell::UnsafeCell;
use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

struct Counter {
    lock: FreeThreadingMutex<OsLock>,
    value: UnsafeCell<usize>,
}

// Safety: `value` is only touched while `lock` is held.
unsafe impl Sync for Counter {}

impl Counter {
    fn new() -> Self {
        Self {
            lock: FreeThreadingMutex::default(),
            value: UnsafeCell::new(0),
        }
    }

    fn increment(&self) {
        let _guard = self.lock.lock();
        // Safety: guarded by `lock`.
        unsafe {
            let current = *self.value.get();
            thread::yield_now();
            *self.value.get() = current + 1;
        }
    }

    fn get(&self) -> usize {
        let _guard = self.lock.lock();
        // Safety: guarded by `lock`.
        unsafe { *self.value.get() }
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_os_lock_enforces() {
    assert!(OsLock::ENFORCING);
    assert!(FreeThreadingMutex::<OsLock>::default().is_enforcing());
}

#[test]
fn test_two_threads_no_lost_updates() {
    init_logger();

    let counter = Arc::new(Counter::new());

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    counter.increment();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.get(), 1_000);
}

#[test]
fn test_many_threads_no_lost_updates() {
    init_logger();

    let counter = Arc::new(Counter::new());
    let num_threads = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .max(2);

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    counter.increment();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.get(), num_threads * 200);
}

#[test]
fn test_acquire_blocks_until_release() {
    init_logger();

    let mutex = Arc::new(FreeThreadingMutex::<OsLock>::default());
    let released = Arc::new(AtomicBool::new(false));

    mutex.acquire();

    let remote = mutex.clone();
    let flag = released.clone();
    let handle = thread::spawn(move || {
        remote.acquire();
        // Ordered by the mutex, not by the atomic.
        let seen = flag.load(Ordering::Relaxed);
        // SAFETY: acquired just above on this thread.
        unsafe { remote.release() };
        seen
    });

    thread::sleep(Duration::from_millis(50));
    released.store(true, Ordering::Relaxed);
    // SAFETY: acquired at the start of the test on this thread.
    unsafe { mutex.release() };

    assert!(
        handle.join().unwrap(),
        "Second thread should only acquire after the first release"
    );
}

#[test]
fn test_try_lock_fails_while_held_elsewhere() {
    init_logger();

    let mutex = Arc::new(FreeThreadingMutex::<OsLock>::default());
    let guard = mutex.lock();

    let remote = mutex.clone();
    let held = thread::spawn(move || remote.try_lock().is_none());
    assert!(held.join().unwrap(), "try_lock should fail while held");

    drop(guard);

    let remote = mutex.clone();
    let free = thread::spawn(move || remote.try_lock().is_some());
    assert!(free.join().unwrap(), "try_lock should succeed after release");
}

#[test]
fn test_try_acquire_fails_while_held_elsewhere() {
    let mutex = Arc::new(FreeThreadingMutex::<OsLock>::default());

    mutex.acquire();

    let remote = mutex.clone();
    let held = thread::spawn(move || remote.try_acquire());
    assert!(!held.join().unwrap(), "try_acquire should fail while held");

    // SAFETY: acquired at the start of the test on this thread.
    unsafe { mutex.release() };

    let remote = mutex.clone();
    let free = thread::spawn(move || {
        let acquired = remote.try_acquire();
        if acquired {
            // SAFETY: acquired by `try_acquire` above.
            unsafe { remote.release() };
        }
        acquired
    });
    assert!(free.join().unwrap(), "try_acquire should succeed after release");
}

#[test]
fn test_moved_os_lock_stays_usable() {
    let mutex = FreeThreadingMutex::<OsLock>::default();
    drop(mutex.lock());

    let moved = Box::new(mutex);
    assert!(moved.try_acquire());
    // SAFETY: acquired by `try_acquire` above.
    unsafe { moved.release() };
}

#[test]
fn test_drop_while_locked_does_not_hang() {
    init_logger();

    let mutex = FreeThreadingMutex::<OsLock>::default();
    mem::forget(mutex.lock());

    drop(mutex);
}

#[test]
fn test_os_lock_debug() {
    let lock = OsLock::new();

    assert_eq!(format!("{:?}", lock), "OsLock { .. }");
}
