use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;

pub const UNIQUE_ID_PREFIX: &str = "droplets-";

static ID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Opaque snapshot identifier: prefix, UTC timestamp, then a process-wide counter.
pub fn unique_id() -> String {
    prefixed_unique_id(UNIQUE_ID_PREFIX)
}

/// Same as [`unique_id`] with a caller-chosen prefix.
///
/// The counter is bumped on every call, so ids from the same process never
/// collide even within one microsecond.
pub fn prefixed_unique_id(prefix: &str) -> String {
    let counter = ID_COUNTER.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
    let timestamp = Utc::now().format("%Y%m%d%H%M%S%6f");
    format!("{}{}{:08x}", prefix, timestamp, counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_shape() {
        let id = unique_id();
        assert!(id.starts_with(UNIQUE_ID_PREFIX));
        let rest = &id[UNIQUE_ID_PREFIX.len()..];
        // 14 digit timestamp + 6 digit micros + 8 hex counter
        assert_eq!(rest.len(), 28);
        assert!(rest[..20].chars().all(|c| c.is_ascii_digit()));
        assert!(rest[20..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_ids_differ() {
        let a = prefixed_unique_id("x-");
        let b = prefixed_unique_id("x-");
        assert_ne!(a, b);
    }
}
