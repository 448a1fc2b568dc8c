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

//! The limit store timestamps its rows in mission-elapsed seconds: SI
//! seconds past 1997:365:23:58:56.816 UTC, which is 1998-01-01T00:00:00 TT.
//! These helpers bridge those floats to absolute [`Epoch`]s.

use crate::time::{Epoch, Unit};

/// Offset of the mission epoch from the Unix epoch, in seconds, ignoring
/// leap seconds. Matches the constant used by ground tooling to shift
/// mission-elapsed seconds onto naive timestamps.
pub const MISSION_TO_UNIX_OFFSET_S: f64 = 883_612_736.816;

/// The mission reference epoch, 1997:365:23:58:56.816 UTC.
pub fn mission_epoch() -> Epoch {
    Epoch::from_gregorian_utc(1997, 12, 31, 23, 58, 56, 816_000_000)
}

/// Converts mission-elapsed seconds into an absolute epoch.
pub fn epoch_from_mission_seconds(seconds: f64) -> Epoch {
    mission_epoch() + seconds * Unit::Second
}

/// Converts an absolute epoch into mission-elapsed seconds.
pub fn mission_seconds(epoch: Epoch) -> f64 {
    (epoch - mission_epoch()).to_seconds()
}
