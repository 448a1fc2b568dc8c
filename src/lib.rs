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

/*! # msid-limits

A pure resolution layer for spacecraft telemetry monitoring: given the
versioned history of operational limit sets for a telemetry channel
("MSID"), determine which caution/warning thresholds apply at a given
instant, including the channel-to-channel indirection used to switch
between concurrent limit sets. Independently, compute whether an instant
falls inside a ground-station communication pass and inside its active
data-exchange ("track") sub-window.

This crate fetches nothing on its own: limit histories and pass records are
supplied through the [`limits::LimitRepository`] and
[`comm::CommEventSource`] seams, and every computation is a synchronous,
read-only function of its inputs.
*/

/// Channel ("MSID") identifiers in their case-insensitive canonical form.
pub mod msid;

/// Versioned limit-set rows, repositories, and the time-versioned resolver.
pub mod limits;

/// Comm pass records and the pass/track window calculator.
pub mod comm;

/// Conversions between mission-elapsed seconds and absolute epochs.
pub mod timebase;

/// YAML loading for limit snapshots and pass records.
pub mod io;

#[macro_use]
extern crate log;
extern crate hifitime;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

#[allow(unused_imports)]
pub mod prelude {
    pub use crate::comm::{ClockTime, CommError, CommEventSource, CommPass, CommWindow};
    pub use crate::io::ConfigRepr;
    pub use crate::limits::{
        GlitchFilter, LimitError, LimitRepository, LimitResolver, LimitRow, LimitSnapshot,
        LimitState,
    };
    pub use crate::msid::Msid;
    pub use crate::time::{Duration, Epoch, Unit};
}
