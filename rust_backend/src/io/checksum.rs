//! Checksum calculation for artifact fingerprinting.

use sha2::{Digest, Sha256};

/// Calculate a SHA-256 checksum over several byte buffers.
///
/// Each buffer is length-prefixed so that moving bytes between adjacent
/// buffers changes the digest.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
