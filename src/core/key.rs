use sha1::{Digest, Sha1};

const KEY_LEN: usize = 8;

/// Storage key for an encoded image: the leading hex digits of its SHA-1.
pub fn key_of(data: &[u8]) -> String {
    let digest = Sha1::digest(data);
    let mut key = hex::encode(digest);
    key.truncate(KEY_LEN);
    key
}

/// Keys are only ever produced by `key_of`, so anything else is rejected
/// before it reaches the store.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LEN && key.bytes().all(|b| b.is_ascii_hexdigit())
}
