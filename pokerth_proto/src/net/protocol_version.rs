//! Protocol versioning for server compatibility checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::messages::Version;

/// PokerTH network protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    pub const CURRENT: Self = Self { major: 5, minor: 1 };

    /// Get the protocol version this client speaks
    #[must_use]
    pub const fn current() -> Self {
        Self::CURRENT
    }

    /// Minor revisions only add message types, so the major version decides.
    #[must_use]
    pub const fn is_compatible_with(&self, other: &Self) -> bool {
        self.major == other.major
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl From<Version> for ProtocolVersion {
    fn from(value: Version) -> Self {
        Self {
            major: value.major_version,
            minor: value.minor_version,
        }
    }
}

impl From<ProtocolVersion> for Version {
    fn from(value: ProtocolVersion) -> Self {
        Self {
            major_version: value.major,
            minor_version: value.minor,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version() {
        assert_eq!(ProtocolVersion::current(), ProtocolVersion { major: 5, minor: 1 });
        assert_eq!(ProtocolVersion::current().to_string(), "5.1");
    }

    #[test]
    fn test_compatibility() {
        let current = ProtocolVersion::current();
        assert!(current.is_compatible_with(&ProtocolVersion { major: 5, minor: 0 }));
        assert!(current.is_compatible_with(&ProtocolVersion { major: 5, minor: 9 }));
        assert!(!current.is_compatible_with(&ProtocolVersion { major: 4, minor: 1 }));
    }

    #[test]
    fn test_wire_version_conversion() {
        let wire = Version {
            major_version: 5,
            minor_version: 2,
        };
        let version = ProtocolVersion::from(wire);
        assert_eq!(version, ProtocolVersion { major: 5, minor: 2 });
        assert_eq!(Version::from(version), wire);
    }
}
