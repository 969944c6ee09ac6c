//! Stable reviewer pseudo-identifiers.
//!
//! Reviews are attributed to a deterministic identifier derived from the
//! Auth0 subject, so the raw subject string never reaches Supabase. The
//! derivation must stay byte-for-byte stable: it is the join key for every
//! review already stored upstream.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derive the stable pseudo-identifier for an identity-provider subject.
///
/// SHA-256 of the subject, truncated to 16 bytes, with the version nibble
/// forced to `4` and formatted as a hyphenated 8-4-4-4-12 string. The
/// variant bits are left as the hash produced them, so despite its looks
/// this is not an RFC 4122 identifier and carries no namespace salt; treat
/// it as an opaque join key, not a collision-proof UUID.
pub fn derive_stable_id(subject: &str) -> String {
    let digest = Sha256::digest(subject.as_bytes());

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    bytes[6] = 0x40 | (bytes[6] & 0x0f);

    Uuid::from_bytes(bytes).hyphenated().to_string()
}
