//! Version tag written into every serialized suite report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `major.minor.patch` version of a report layout.
///
/// The major component changes whenever the checker order, the draw recipes,
/// or a field name changes, since any of those alters the bytes produced for a
/// given seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Breaking layout or stream changes.
    pub major: u32,
    /// Added fields.
    pub minor: u32,
    /// Fixes that leave the bytes unchanged.
    pub patch: u32,
}

impl SchemaVersion {
    /// Builds a version in const context.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
