use chrono::{Local, NaiveDateTime};
use hui_application::{Clock, IdGenerator};
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Millisecond-timestamp ids, bumped when two are requested within the same
/// millisecond so they stay unique per process.
#[derive(Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    fn next_stamp(&self, now: i64) -> i64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let stamp = self.next_stamp(Local::now().timestamp_millis());
        format!("{prefix}-{stamp}")
    }
}
