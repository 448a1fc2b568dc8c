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

use crate::io::ConfigRepr;
use crate::time::{Epoch, Unit};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CommError {
    #[snafu(display("clock-of-day `{clock}` is not a valid HHMM time"))]
    InvalidClock { clock: String },
    #[snafu(display("comm pass stops ({stop}) at or before it starts ({start})"))]
    InvertedPass { start: Epoch, stop: Epoch },
    #[snafu(display("comm event source failed: {source}"))]
    EventSource {
        source: Box<dyn Error + Send + Sync>,
    },
}

/// A 24-hour "HHMM" clock-of-day, as carried by pass records for the
/// beginning and end of track. Carries no date: the window calculator
/// anchors it to the calendar date of the pass boundary it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// The instant with this clock time on the same calendar date as `anchor`.
    pub fn on_date_of(self, anchor: Epoch) -> Epoch {
        let (year, month, day, ..) = anchor.to_gregorian_utc();
        Epoch::from_gregorian_utc(year, month, day, self.hour, self.minute, 0, 0)
    }
}

impl FromStr for ClockTime {
    type Err = CommError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidClockSnafu { clock: s }.build();
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = s[..2].parse().map_err(|_| invalid())?;
        let minute: u8 = s[2..].parse().map_err(|_| invalid())?;
        ensure!(hour < 24 && minute < 60, InvalidClockSnafu { clock: s });
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.minute)
    }
}

/// One ground-station contact record, as supplied by the external event
/// service. `bot`/`eot` ("beginning/end of track") are raw `"HHMM"` strings
/// relative to the calendar dates of `start`/`stop` respectively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommPass {
    #[serde(
        serialize_with = "crate::io::epoch_to_str",
        deserialize_with = "crate::io::epoch_from_str"
    )]
    pub start: Epoch,
    #[serde(
        serialize_with = "crate::io::epoch_to_str",
        deserialize_with = "crate::io::epoch_from_str"
    )]
    pub stop: Epoch,
    pub bot: String,
    pub eot: String,
    /// Receiving station, when the event service reports one (e.g. `DSS-24`).
    #[serde(default)]
    pub station: Option<String>,
}

impl ConfigRepr for CommPass {}

impl fmt::Display for CommPass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.station {
            Some(station) => write!(f, "{station} pass {} -> {}", self.start, self.stop),
            None => write!(f, "pass {} -> {}", self.start, self.stop),
        }
    }
}

/// Supplies the pass covering or nearest to a given instant. Implemented by
/// adapters over the external event service; `Ok(None)` means no pass record
/// brackets the instant, which callers must treat as "not in comm," not as a
/// fault.
pub trait CommEventSource {
    fn current_pass(&self, at: Epoch) -> Result<Option<CommPass>, CommError>;
}

/// The support and track windows of one comm pass, evaluated against a
/// reference instant. A pure value derived by [`CommWindow::compute`]; it
/// holds no reference back to the source pass and is never persisted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CommWindow {
    pub support_start: Epoch,
    pub support_stop: Epoch,
    pub track_start: Epoch,
    pub track_stop: Epoch,
    /// Whether the reference instant fell strictly inside the pass.
    pub in_support: bool,
    /// Whether the reference instant fell strictly inside the track window.
    pub in_track: bool,
}

impl CommWindow {
    /// Computes the track sub-window of `pass` and the membership of
    /// `reference` in both windows.
    ///
    /// The `bot`/`eot` clock strings carry no date and a pass may straddle
    /// midnight, so each candidate is anchored to the date of its pass
    /// boundary and then corrected: a track start before the pass start
    /// means the clock time falls after midnight (shift +1 day), and a track
    /// stop after the pass stop means the clock time falls before midnight
    /// (shift -1 day). This keeps the window from silently inverting.
    pub fn compute(pass: &CommPass, reference: Epoch) -> Result<Self, CommError> {
        ensure!(
            pass.start < pass.stop,
            InvertedPassSnafu {
                start: pass.start,
                stop: pass.stop
            }
        );

        let bot: ClockTime = pass.bot.parse()?;
        let eot: ClockTime = pass.eot.parse()?;

        let mut track_start = bot.on_date_of(pass.start);
        if track_start < pass.start {
            track_start += 1 * Unit::Day;
        }

        let mut track_stop = eot.on_date_of(pass.stop);
        if track_stop > pass.stop {
            track_stop -= 1 * Unit::Day;
        }

        Ok(Self {
            support_start: pass.start,
            support_stop: pass.stop,
            track_start,
            track_stop,
            in_support: pass.start < reference && reference < pass.stop,
            in_track: track_start < reference && reference < track_stop,
        })
    }
}

impl fmt::Display for CommWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "support {} -> {} (in: {}), track {} -> {} (in: {})",
            self.support_start,
            self.support_stop,
            self.in_support,
            self.track_start,
            self.track_stop,
            self.in_track
        )
    }
}
