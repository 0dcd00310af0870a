//! HMAC-SHA256 webhook signatures.
//!
//! A signature header has the form `t=<unix-seconds>,v1=<hex-digest>`. The
//! digest is computed over `"<t>.<raw-body>"`, where `<t>` is the timestamp
//! text exactly as it appears in the header, so the exact bytes received
//! must be the exact bytes verified.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::time::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Default allowed skew between signing and verification, in seconds.
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// A parsed `t=..,v1=..` signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    timestamp: i64,
    // Digits as received; the digest covers this text, not a re-rendering.
    timestamp_text: String,
    digest: String,
}

impl Signature {
    /// Unix seconds the signature claims it was produced at.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Hex-encoded digest as it appeared in the header.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={},v1={}", self.timestamp_text, self.digest)
    }
}

/// Why a signature header could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSignatureError {
    #[error("missing t= field")]
    MissingTimestamp,

    #[error("missing v1= field")]
    MissingDigest,

    #[error("timestamp is not a decimal integer")]
    InvalidTimestamp,
}

impl FromStr for Signature {
    type Err = ParseSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut timestamp = None;
        let mut digest = None;

        for part in s.split(',') {
            if let Some(value) = part.strip_prefix("t=") {
                timestamp = Some(value);
            } else if let Some(value) = part.strip_prefix("v1=") {
                digest = Some(value);
            }
        }

        let timestamp = timestamp.ok_or(ParseSignatureError::MissingTimestamp)?;
        let digest = digest.ok_or(ParseSignatureError::MissingDigest)?;

        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSignatureError::InvalidTimestamp);
        }
        let timestamp_text = timestamp.to_string();
        let timestamp = timestamp
            .parse()
            .map_err(|_| ParseSignatureError::InvalidTimestamp)?;

        Ok(Self {
            timestamp,
            timestamp_text,
            digest: digest.to_string(),
        })
    }
}

fn mac_for(payload: &[u8], secret: &[u8], timestamp: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Signs `payload` with `secret` as of `timestamp`.
///
/// # Example
///
/// ```
/// use inkress::webhook::sign;
///
/// let sig = sign(b"{}", b"whsec_test", 1_700_000_000);
/// assert!(sig.to_string().starts_with("t=1700000000,v1="));
/// ```
#[must_use]
pub fn sign(payload: &[u8], secret: &[u8], timestamp: i64) -> Signature {
    let timestamp_text = timestamp.to_string();
    let digest = hex::encode(
        mac_for(payload, secret, &timestamp_text)
            .finalize()
            .into_bytes(),
    );
    Signature {
        timestamp,
        timestamp_text,
        digest,
    }
}

/// Signs `payload` with `secret` as of the current system time.
#[must_use]
pub fn generate_signature(payload: &[u8], secret: &[u8]) -> String {
    sign(payload, secret, SystemClock.unix_seconds()).to_string()
}

/// Verifies `header` against `payload` using the current system time.
///
/// Returns `false` on any failure: malformed header, a timestamp outside
/// `tolerance` seconds of now, or a digest mismatch.
#[must_use]
pub fn verify(payload: &[u8], header: &str, secret: &[u8], tolerance: u64) -> bool {
    verify_at(payload, header, secret, tolerance, SystemClock.unix_seconds())
}

/// Same as [`verify`] with an explicit "now" in Unix seconds.
#[must_use]
pub fn verify_at(payload: &[u8], header: &str, secret: &[u8], tolerance: u64, now: i64) -> bool {
    match check(payload, header, secret, tolerance, now) {
        Ok(()) => true,
        Err(reason) => {
            tracing::debug!(reason, "Webhook signature rejected");
            false
        }
    }
}

fn check(
    payload: &[u8],
    header: &str,
    secret: &[u8],
    tolerance: u64,
    now: i64,
) -> Result<(), &'static str> {
    let signature: Signature = header.parse().map_err(|_| "malformed header")?;

    if now.abs_diff(signature.timestamp) > tolerance {
        return Err("timestamp outside tolerance");
    }

    // Digests are emitted lowercase; anything else was not produced by `sign`.
    if !signature
        .digest
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return Err("digest is not lowercase hex");
    }
    let expected = hex::decode(&signature.digest).map_err(|_| "digest is not hex")?;

    mac_for(payload, secret, &signature.timestamp_text)
        .verify_slice(&expected)
        .map_err(|_| "digest mismatch")
}
