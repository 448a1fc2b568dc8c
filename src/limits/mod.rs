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

use crate::msid::Msid;
use crate::time::Epoch;
use serde::{Deserializer, Serializer};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::Snafu;
use std::error::Error;
use std::fmt;

/// Provides the repository seam and the in-memory snapshot implementation.
pub mod repository;
pub use repository::{LimitRepository, LimitSnapshot};

/// Provides the time-versioned limit resolver and switch dependency discovery.
pub mod resolver;
pub use resolver::LimitResolver;

/// The spelling the limit store uses for "this row has no switch MSID".
pub(crate) const NO_SWITCH: &str = "none";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LimitError {
    #[snafu(display("MSID names cannot be empty"))]
    EmptyMsid,
    #[snafu(display("limit repository query failed: {source}"))]
    Repository {
        source: Box<dyn Error + Send + Sync>,
    },
}

/// One versioned limit-set definition for a channel, as stored in the limit
/// database. Rows are immutable once read: the resolver selects among them
/// but never constructs or mutates them.
///
/// For a fixed channel, several rows may share a `set_key` and differ by
/// `effective_at`; the row "current" at an instant is the one with the
/// largest `effective_at` at or before that instant, ties broken by the
/// largest `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitRow {
    /// Store row identifier, also the tie-break for identical `effective_at`.
    pub id: u64,
    pub msid: Msid,
    /// Set number allocated to each MSID/set pair in the limit database.
    pub set_key: u32,
    /// Instant from which this row describes its `(msid, set_key)` pair.
    #[serde(
        serialize_with = "crate::io::epoch_to_str",
        deserialize_with = "crate::io::epoch_from_str"
    )]
    pub effective_at: Epoch,
    /// Limit-database release that introduced this row.
    #[serde(default)]
    pub mod_version: u32,
    /// False means the MSID/set pair is deactivated from `effective_at` onward.
    pub enabled: bool,
    /// Consecutive out-of-band samples required before flagging a violation.
    pub glitch_tolerance: u32,
    /// The set to use when no switch-MSID state selects otherwise.
    pub default_set: u32,
    /// MSID whose state selects among this channel's limit sets, if any.
    #[serde(
        serialize_with = "switch_to_str",
        deserialize_with = "switch_from_str",
        default
    )]
    pub switch_msid: Option<Msid>,
    /// State of `switch_msid` for which this row's `set_key` applies.
    #[serde(default)]
    pub switch_state: Option<String>,
    pub caution_low: f64,
    pub caution_high: f64,
    pub warning_low: f64,
    pub warning_high: f64,
}

impl LimitRow {
    /// Classifies a sample against this row's bands, reporting the most
    /// severe violation (a warning violation always also breaches caution).
    pub fn classify(&self, value: f64) -> LimitState {
        if value < self.warning_low {
            LimitState::WarningLow
        } else if value > self.warning_high {
            LimitState::WarningHigh
        } else if value < self.caution_low {
            LimitState::CautionLow
        } else if value > self.caution_high {
            LimitState::CautionHigh
        } else {
            LimitState::Nominal
        }
    }

    /// Builds a [`GlitchFilter`] honoring this row's glitch tolerance.
    pub fn glitch_filter(&self) -> GlitchFilter {
        GlitchFilter::new(self.glitch_tolerance)
    }
}

impl fmt::Display for LimitRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} set {} @ {}: caution=[{:.3}, {:.3}] warning=[{:.3}, {:.3}]",
            self.msid,
            self.set_key,
            self.effective_at,
            self.caution_low,
            self.caution_high,
            self.warning_low,
            self.warning_high
        )
    }
}

/// Classification of one telemetry sample against a limit row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitState {
    Nominal,
    CautionLow,
    CautionHigh,
    WarningLow,
    WarningHigh,
}

impl LimitState {
    pub fn is_violation(self) -> bool {
        self != LimitState::Nominal
    }

    pub fn is_warning(self) -> bool {
        matches!(self, LimitState::WarningLow | LimitState::WarningHigh)
    }
}

impl fmt::Display for LimitState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            LimitState::Nominal => "nominal",
            LimitState::CautionLow => "caution low",
            LimitState::CautionHigh => "caution high",
            LimitState::WarningLow => "warning low",
            LimitState::WarningHigh => "warning high",
        };
        write!(f, "{repr}")
    }
}

/// Applies a row's glitch tolerance to a stream of classifications: a
/// violation is only flagged once the required number of consecutive
/// out-of-band samples has been observed, and any nominal sample resets the
/// count. A tolerance of zero flags on the first violation, same as one.
#[derive(Clone, Debug)]
pub struct GlitchFilter {
    tolerance: u32,
    streak: u32,
}

impl GlitchFilter {
    pub fn new(tolerance: u32) -> Self {
        Self {
            tolerance: tolerance.max(1),
            streak: 0,
        }
    }

    /// Feeds one classification; returns the state to flag, if any.
    pub fn observe(&mut self, state: LimitState) -> Option<LimitState> {
        if !state.is_violation() {
            self.streak = 0;
            return None;
        }
        self.streak = self.streak.saturating_add(1);
        if self.streak >= self.tolerance {
            Some(state)
        } else {
            None
        }
    }

    /// Consecutive violations observed since the last nominal sample.
    pub fn streak(&self) -> u32 {
        self.streak
    }
}

pub(crate) fn switch_to_str<S>(switch: &Option<Msid>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match switch {
        Some(msid) => serializer.serialize_str(msid.as_str()),
        None => serializer.serialize_str(NO_SWITCH),
    }
}

/// Deserializes a switch MSID, honoring the store's `"none"` sentinel.
pub(crate) fn switch_from_str<'de, D>(deserializer: D) -> Result<Option<Msid>, D::Error>
where
    D: Deserializer<'de>,
{
    let maybe: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match maybe {
        None => Ok(None),
        Some(s) if s.trim().eq_ignore_ascii_case(NO_SWITCH) => Ok(None),
        Some(s) => Msid::new(&s).map(Some).map_err(serde::de::Error::custom),
    }
}
