//! Ledger identifiers.
//!
//! Object ids and account addresses share one textual form: `0x` followed by
//! up to 64 hex digits (a 32-byte value, leading zeros optional). Both types
//! store the lowercase literal as given, so `0x6` stays `0x6` rather than
//! being expanded to the full 64-digit form.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::IdError;

/// Maximum number of hex digits after the `0x` prefix.
pub const MAX_HEX_DIGITS: usize = 64;

/// Parse and normalize a `0x`-prefixed hex literal.
fn parse_hex_literal(input: &str) -> Result<String, IdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }

    let Some(digits) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) else {
        return Err(IdError::MissingPrefix);
    };

    if digits.is_empty() {
        return Err(IdError::NoDigits);
    }

    if let Some((offset, ch)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(IdError::InvalidHex { ch, position: offset + 2 });
    }

    if digits.len() > MAX_HEX_DIGITS {
        return Err(IdError::TooLong { len: digits.len(), max: MAX_HEX_DIGITS });
    }

    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}

/// Compile-time check used by `from_static`: lowercase, prefixed, in range.
const fn is_canonical(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    if bytes.len() < 3 || bytes.len() > 2 + MAX_HEX_DIGITS {
        return false;
    }
    if bytes[0] != b'0' || bytes[1] != b'x' {
        return false;
    }

    let mut i = 2;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' | b'a'..=b'f' => {},
            _ => return false,
        }
        i += 1;
    }
    true
}

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Build from a literal known at compile time.
            ///
            /// The literal must already be canonical (lowercase, `0x`
            /// prefixed). Used in a `const` item, a bad literal fails the
            /// build instead of surfacing at runtime.
            pub const fn from_static(literal: &'static str) -> Self {
                assert!(is_canonical(literal), "identifier literal is not canonical 0x-hex");
                Self(Cow::Borrowed(literal))
            }

            /// The normalized `0x`-prefixed literal.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex_literal(s).map(|literal| Self(Cow::Owned(literal)))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.into_owned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

hex_id! {
    /// Identifier of an on-chain object (a device, a coin, a package).
    ObjectId
}

hex_id! {
    /// Account address of the connected wallet.
    Address
}

impl ObjectId {
    /// The shared system clock object read by the rental contract.
    pub const CLOCK: Self = Self::from_static("0x6");
}

/// Digest identifying a submitted transaction.
///
/// Digests are base58 on IOTA; the front-end treats them as opaque and only
/// requires them to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionDigest(String);

impl TransactionDigest {
    /// The digest text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionDigest {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for TransactionDigest {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionDigest> for String {
    fn from(digest: TransactionDigest) -> Self {
        digest.0
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
