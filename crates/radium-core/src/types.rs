//! Core identifier types.

use std::fmt;
use std::str::FromStr;

use crate::error::HashError;

/// A 32-byte block hash.
///
/// Bytes are held in display order: the first byte is the first two hex
/// characters of the rendered hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Parse a 64-character hex string, with or without a `0x` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use radium_core::types::Hash256;
    /// let h = Hash256::from_hex("0x00000000000000000000000000000000000000000000000000000000000000ff").unwrap();
    /// assert_eq!(h.0[31], 0xff);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| HashError::InvalidLength(len))?;
        Ok(Self(arr))
    }

    /// Lowercase hex rendering, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
