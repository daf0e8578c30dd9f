use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the request-body signature in both directions.
pub const SIGNATURE_HEADER: &str = "X-Sakura-Signature";

/// Hex-encoded length of an HMAC-SHA1 digest.
const SIGNATURE_LENGTH: usize = 40;

/// Compute the HMAC-SHA1 signature of `body` under `secret`, hex-encoded
/// lowercase. Pure function, identical on both ends of the exchange.
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a claimed signature against `body`.
///
/// Returns a uniform `false` for every failure mode (wrong length, malformed
/// hex, digest mismatch) so the caller leaks nothing about *why* an
/// attacker-supplied signature was rejected. The length check runs before any
/// crypto work; the digest comparison is constant-time.
pub fn verify(secret: &[u8], claimed: &str, body: &[u8]) -> bool {
    if claimed.len() != SIGNATURE_LENGTH {
        return false;
    }

    let mut claimed_raw = [0u8; SIGNATURE_LENGTH / 2];
    if hex::decode_to_slice(claimed, &mut claimed_raw).is_err() {
        return false;
    }

    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&claimed_raw).is_ok()
}
