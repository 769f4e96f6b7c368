use chrono::{DateTime, Utc};

/// Wall-clock capability. Injected rather than read from a process global so
/// "start must be in the future" validation is deterministic under test.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
