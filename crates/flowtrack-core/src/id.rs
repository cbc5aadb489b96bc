//! Identifier generation.
//!
//! IDs are random v4 UUIDs drawn from the operating system's secure source.
//! If that source fails, a time-and-counter identifier is used instead; it is
//! weaker but still unique within the process.

use rand::rngs::OsRng;
use rand::TryRngCore;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

static FALLBACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a new process-unique identifier. Never fails.
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    let entropy = OsRng.try_fill_bytes(&mut bytes).map(|()| bytes);
    id_from_entropy(entropy)
}

fn id_from_entropy<E: Display>(entropy: Result<[u8; 16], E>) -> String {
    match entropy {
        Ok(bytes) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(err) => {
            warn!(error = %err, "Secure random source unavailable, using fallback identifier");
            fallback_id()
        }
    }
}

fn fallback_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seq = FALLBACK_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", to_base36(nanos), to_base36(seq))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
