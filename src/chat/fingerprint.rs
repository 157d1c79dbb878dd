//! Session fingerprint
//!
//! Identity for the quota record is derived once per session from a
//! composite of low-entropy host signals reduced to a short hash. It is
//! a storage partition key only: not cryptographic, trivially evadable,
//! and enforcement built on it is advisory UX throttling.

use tracing::debug;

/// A fixed pseudo-render signature standing in for a canvas fingerprint:
/// stable per build, mixed into the composite like any other signal.
const RENDER_SIGNATURE: &str = "folio-glyph:▀▄█⠿|v1";

/// Signals feeding the fingerprint hash
#[derive(Debug, Clone)]
pub struct FingerprintSignals {
    pub host: String,
    pub user: String,
    pub locale: String,
    pub terminal_size: (u16, u16),
    pub timezone_offset_minutes: i32,
    pub render_signature: String,
}

impl FingerprintSignals {
    /// Collect signals from the current environment
    pub fn collect() -> Self {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown-host".to_string());

        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown-user".to_string());

        let locale = std::env::var("LANG").unwrap_or_else(|_| "C".to_string());

        let terminal_size = crossterm::terminal::size().unwrap_or((80, 24));

        let timezone_offset_minutes = chrono::Local::now().offset().local_minus_utc() / 60;

        Self {
            host,
            user,
            locale,
            terminal_size,
            timezone_offset_minutes,
            render_signature: RENDER_SIGNATURE.to_string(),
        }
    }

    /// Join the signals into the composite string that gets hashed
    fn composite(&self) -> String {
        format!(
            "{}|{}|{}|{}x{}|{}|{}",
            self.host,
            self.user,
            self.locale,
            self.terminal_size.0,
            self.terminal_size.1,
            self.timezone_offset_minutes,
            self.render_signature
        )
    }
}

/// Derive the session fingerprint from the current environment
pub fn generate_fingerprint() -> String {
    let signals = FingerprintSignals::collect();
    let fingerprint = fingerprint_from_signals(&signals);
    debug!("Session fingerprint: {}", fingerprint);
    fingerprint
}

/// Derive a fingerprint from explicit signals (deterministic)
pub fn fingerprint_from_signals(signals: &FingerprintSignals) -> String {
    to_base36(rolling_hash(&signals.composite()))
}

/// Rolling bit-shift hash over the input, truncated to 32 bits.
///
/// `h = (h << 5) - h + c` per character, matching the shape of the
/// classic 31x string hash. Collision behavior is not a contract.
fn rolling_hash(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for ch in input.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash.unsigned_abs()
}

/// Lowercase base-36 rendering of a 32-bit value
fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
