use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque name of a caller or a deployed resource.
///
/// Identifiers carry no structure beyond equality. Two live resources never
/// share one. `Identifier::NONE` is the distinguished "unset" value used for
/// satellites a Controller was never configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Uuid);

impl Identifier {
    /// The "unset" identifier.
    pub const NONE: Identifier = Identifier(Uuid::nil());

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic identifier derived from a label.
    ///
    /// The same label always yields the same identifier, which lets scripts
    /// and tests name parties (`alice`, `treasury`) without bookkeeping.
    pub fn derive(label: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        // Domain separation tag
        hasher.update(b"warden-identifier-v1:");
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash.as_bytes()[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_nil()
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// `Some(self)` unless this is `NONE`.
    pub fn get(self) -> Option<Identifier> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.0.hyphenated())
        }
    }
}

impl FromStr for Identifier {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::NONE);
        }
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for Identifier {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
