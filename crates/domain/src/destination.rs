//! Destination addresses and registry parsing
//!
//! A destination is one addressable endpoint (device) plus sub-endpoint
//! (module) pair that a method invocation can target. The registry is parsed
//! once at service start from a comma-delimited configuration string; a
//! malformed entry is a configuration error surfaced at parse time, and it
//! never blocks the well-formed entries around it.

use crate::error::DestinationParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One addressable `device/module` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    /// Outer endpoint identifier
    pub device_id: String,
    /// Inner sub-endpoint identifier
    pub module_id: String,
}

impl Destination {
    /// Create a destination from already-validated parts.
    pub fn new(device_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            module_id: module_id.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device_id, self.module_id)
    }
}

impl FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let device_id = parts.next().unwrap_or_default().trim();
        let module_id = parts.next().unwrap_or_default().trim();

        if parts.next().is_some() {
            return Err(DestinationParseError::MalformedEntry {
                entry: s.to_string(),
            });
        }
        if device_id.is_empty() || module_id.is_empty() {
            return Err(DestinationParseError::MalformedEntry {
                entry: s.to_string(),
            });
        }

        Ok(Destination::new(device_id, module_id))
    }
}

/// Validated, ordered registry of distinct destinations.
///
/// Parsed once at startup from a delimited configuration string such as
/// `"dev1/mod1,dev2/mod2"`. Malformed and duplicate entries are collected,
/// not fatal: the well-formed remainder still fans out, and the rejects are
/// reported exactly once by whoever loaded the configuration.
#[derive(Debug, Clone, Default)]
pub struct DestinationRegistry {
    destinations: Vec<Destination>,
    rejected: Vec<DestinationParseError>,
}

impl DestinationRegistry {
    /// Parse the delimited configuration string.
    pub fn parse(raw: &str) -> Self {
        let mut destinations: Vec<Destination> = Vec::new();
        let mut rejected = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<Destination>() {
                Ok(destination) => {
                    if destinations.contains(&destination) {
                        rejected.push(DestinationParseError::DuplicateEntry {
                            entry: destination.to_string(),
                        });
                    } else {
                        destinations.push(destination);
                    }
                }
                Err(err) => rejected.push(err),
            }
        }

        Self {
            destinations,
            rejected,
        }
    }

    /// The usable destinations, in configured order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Entries that failed validation, in configured order.
    pub fn rejected(&self) -> &[DestinationParseError] {
        &self.rejected
    }

    /// Whether no usable destination survived parsing.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Consume the registry, keeping only the usable destinations.
    pub fn into_destinations(self) -> Vec<Destination> {
        self.destinations
    }
}
