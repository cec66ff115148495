//! Feed service identifier type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a service identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service id: {reason}")]
pub struct InvalidServiceId {
    reason: &'static str,
}

/// An opaque identifier naming a weekly or ad hoc operating pattern.
///
/// Feeds use the same identifier in the calendar, the calendar exceptions
/// and the trips that reference them. The value is kept verbatim, surrounding
/// whitespace included; the only requirement is that it is not blank.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::ServiceId;
///
/// let id = ServiceId::new("WEEKDAY".to_string()).unwrap();
/// assert_eq!(id.as_str(), "WEEKDAY");
///
/// // Blank identifiers are rejected
/// assert!(ServiceId::new("".to_string()).is_err());
/// assert!(ServiceId::new("   ".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a new service id from a string.
    ///
    /// Returns an error if the string is empty or only whitespace.
    pub fn new(s: String) -> Result<Self, InvalidServiceId> {
        if s.trim().is_empty() {
            return Err(InvalidServiceId {
                reason: "service id cannot be empty",
            });
        }
        Ok(ServiceId(s))
    }

    /// Returns the service id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ServiceId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId({})", self.0)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ServiceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ServiceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ServiceId::new(s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any string with a non-whitespace character is a valid id
        #[test]
        fn nonblank_always_valid(s in "[A-Za-z0-9_:-]{1,16}") {
            prop_assert!(ServiceId::new(s).is_ok());
        }

        /// Roundtrip: new then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_:-]{1,16}") {
            let id = ServiceId::new(s.clone()).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
