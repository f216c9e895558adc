use chrono::Utc;
use tokio::time::Instant;

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// Seconds left until `expiration` (unix seconds), zero once it has passed.
pub fn seconds_until(expiration: i64) -> u64 {
    (expiration - now_i64()).max(0) as u64
}
