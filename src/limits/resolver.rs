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

use super::{LimitError, LimitRepository, LimitRow};
use crate::msid::Msid;
use crate::time::Epoch;
use indexmap::{IndexMap, IndexSet};

/// Resolves which limit row applies to a channel at a given instant, over an
/// injected [`LimitRepository`].
///
/// The resolver is stateless per call: it holds a borrow of its repository
/// and nothing else, so resolving many channels may fan out freely.
pub struct LimitResolver<'a, R: LimitRepository> {
    repo: &'a R,
}

impl<'a, R: LimitRepository> LimitResolver<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Returns the set of additional channels whose value must be known to
    /// disambiguate limit-set selection for the given channels.
    ///
    /// This is a static query over the channels' full row history: every
    /// non-sentinel switch MSID referenced by any row is collected,
    /// deduplicated in first-seen order. No telemetry is consulted, which
    /// lets a caller know what to fetch *before* fetching anything.
    pub fn switch_dependencies(&self, msids: &[Msid]) -> Result<IndexSet<Msid>, LimitError> {
        let mut dependencies = IndexSet::new();
        for (_, history) in self.repo.rows_for_msids(msids)? {
            for row in history {
                if let Some(switch) = row.switch_msid {
                    dependencies.insert(switch);
                }
            }
        }
        Ok(dependencies)
    }

    /// Returns the single limit row in effect for `msid` at `at`, or `None`
    /// when the channel has no history or no active row at that instant.
    ///
    /// `switch_value` is the state of the channel's switch MSID, already
    /// time-aligned by the caller; it selects among concurrent limit sets by
    /// exact, case-sensitive comparison against each candidate row's
    /// `switch_state`. When it is absent or matches nothing, the channel's
    /// default set applies.
    pub fn resolve_active(
        &self,
        msid: &Msid,
        at: Epoch,
        switch_value: Option<&str>,
    ) -> Result<Option<LimitRow>, LimitError> {
        let history = self.repo.rows_for_msid(msid)?;
        if history.is_empty() {
            debug!("{msid} has no limit history");
            return Ok(None);
        }

        // Current row per set: the history is ordered by (effective_at, id)
        // ascending, so the last qualifying row wins, which also settles
        // identical-epoch ties in favor of the highest id.
        let mut current: IndexMap<u32, &LimitRow> = IndexMap::new();
        for row in &history {
            if row.effective_at <= at {
                current.insert(row.set_key, row);
            }
        }

        // A set whose current row is disabled has no active row from that
        // row's effective_at onward.
        let active: IndexMap<u32, &LimitRow> = current
            .into_iter()
            .filter(|(_, row)| row.enabled)
            .collect();
        if active.is_empty() {
            debug!("{msid} has no active limit set at {at}");
            return Ok(None);
        }

        // Row-local default: read default_set from the active candidates
        // only, preferring the most recently effective one.
        let latest = active
            .values()
            .max_by_key(|row| (row.effective_at, row.id))
            .unwrap();
        if active
            .values()
            .any(|row| row.default_set != latest.default_set)
        {
            warn!(
                "{msid} active rows disagree on default_set at {at}, using {}",
                latest.default_set
            );
        }

        let selected = if active.values().any(|row| row.switch_msid.is_some()) {
            match switch_value
                .and_then(|value| active.values().find(|row| row.switch_state.as_deref() == Some(value)))
            {
                Some(row) => row.set_key,
                None => latest.default_set,
            }
        } else {
            latest.default_set
        };

        Ok(active.get(&selected).map(|row| (*row).clone()))
    }
}
