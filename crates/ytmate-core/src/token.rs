//! Placeholder `cftoken` generator
//!
//! The analyze endpoint expects a Cloudflare Turnstile token in the
//! `cftoken` form field. This module does NOT solve any challenge: it
//! produces a random-looking opaque string of the same rough shape
//! (base-36 noise followed by base-36 epoch millis). Whether the
//! upstream accepts it is entirely up to the upstream.

use chrono::Utc;
use uuid::Uuid;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of base-36 digits kept from the seed
const SEED_DIGITS: usize = 11;

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Builds a token from a seed and a timestamp
///
/// Pure: the same inputs always give the same token.
///
/// # Example
/// ```
/// use ytmate_core::token::generate;
/// assert_eq!(generate(35, 0), "z0");
/// assert_eq!(generate(42, 1_700_000_000_000), generate(42, 1_700_000_000_000));
/// ```
pub fn generate(seed: u128, timestamp_ms: i64) -> String {
    let noise = to_base36(seed);
    let noise = &noise[..noise.len().min(SEED_DIGITS)];
    let stamp = to_base36(u128::from(timestamp_ms.max(0).unsigned_abs()));
    format!("{noise}{stamp}")
}

/// Builds a token from a fresh v4 UUID seed and the current time
pub fn fresh() -> String {
    generate(Uuid::new_v4().as_u128(), Utc::now().timestamp_millis())
}
