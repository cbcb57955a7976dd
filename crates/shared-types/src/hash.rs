//! Record key derivation.
//!
//! Keys are produced by Bob Jenkins' one-at-a-time hash over the raw UTF-8
//! bytes of the name. The exact bit sequence is part of the output contract:
//! result lines and `hash.log` both print the key, and the store orders
//! records by it.

use crate::entities::Key;

/// Jenkins one-at-a-time hash of `name`.
///
/// All arithmetic wraps at 32 bits. No terminator byte is mixed in, so the
/// empty name hashes to `0`.
pub fn hash_key(name: &str) -> Key {
    let mut hash: u32 = 0;
    for &byte in name.as_bytes() {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
