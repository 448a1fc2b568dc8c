/*
    msid-limits, telemetry limit resolution for spacecraft monitoring
    Copyright (C) 2024-onwards the msid-limits contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::limits::LimitError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A spacecraft telemetry channel identifier.
///
/// MSID names are case-insensitive: the limit store keys them lowercase
/// while telemetry servers key them uppercase. `Msid` stores the lowercase
/// canonical form so that equality, hashing, and ordering never depend on
/// the case of the source data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msid(String);

impl Msid {
    /// Builds an MSID from any casing of its name. Empty names are rejected.
    pub fn new<S: AsRef<str>>(name: S) -> Result<Self, LimitError> {
        let canonical = name.as_ref().trim().to_lowercase();
        if canonical.is_empty() {
            return Err(LimitError::EmptyMsid);
        }
        Ok(Self(canonical))
    }

    /// The lowercase canonical form, as keyed by the limit store.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The uppercase form, as keyed by telemetry fetch servers.
    pub fn telemetry_key(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for Msid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Msid {
    type Err = LimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Msid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Msid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(D::Error::custom)
    }
}
