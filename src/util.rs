use crate::{Error, Result};

/// Longest key the host format can store, in modified UTF-8 bytes.
pub const MAX_KEY_LEN: usize = u16::MAX as usize;

#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

/// Checks that `key` is non-empty and fits the host format's 16-bit length
/// prefix once encoded as modified UTF-8.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || simd_cesu8::mutf8::encode(key).len() > MAX_KEY_LEN {
        cold_path();
        return Err(Error::InvalidKey(key.to_owned()));
    }
    Ok(())
}
