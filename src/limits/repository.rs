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

use super::{LimitError, LimitRow};
use crate::io::ConfigRepr;
use crate::msid::Msid;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

/// Read-only access to the versioned limit-row store.
///
/// Implementations are injected into [`super::LimitResolver`]; the resolver
/// never reaches for ambient connections or sessions. Upstream faults
/// (unreachable database, malformed store) surface as
/// [`LimitError::Repository`] and are passed through unchanged, never
/// retried.
pub trait LimitRepository {
    /// The full row history for a channel, ordered by `(effective_at, id)`
    /// ascending. An unknown channel yields an empty history, not an error.
    fn rows_for_msid(&self, msid: &Msid) -> Result<Vec<LimitRow>, LimitError>;

    /// Histories for several channels, keyed in query order. Duplicate
    /// queries collapse onto one entry.
    fn rows_for_msids(&self, msids: &[Msid]) -> Result<IndexMap<Msid, Vec<LimitRow>>, LimitError> {
        let mut histories = IndexMap::new();
        for msid in msids {
            if !histories.contains_key(msid) {
                histories.insert(msid.clone(), self.rows_for_msid(msid)?);
            }
        }
        Ok(histories)
    }
}

/// An in-memory, read-only snapshot of the limit store.
///
/// Rows are sorted on construction so that every per-channel history honors
/// the `(effective_at, id)` ordering the resolver relies on, regardless of
/// the order the source data arrived in. Loadable from YAML through
/// [`ConfigRepr`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LimitRow>", into = "Vec<LimitRow>")]
pub struct LimitSnapshot {
    rows: Vec<LimitRow>,
}

impl LimitSnapshot {
    pub fn from_rows(mut rows: Vec<LimitRow>) -> Self {
        rows.sort_by(|a, b| {
            a.msid
                .cmp(&b.msid)
                .then(a.effective_at.cmp(&b.effective_at))
                .then(a.id.cmp(&b.id))
        });
        Self { rows }
    }

    /// All rows in the snapshot, sorted by `(msid, effective_at, id)`.
    pub fn rows(&self) -> &[LimitRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl From<Vec<LimitRow>> for LimitSnapshot {
    fn from(rows: Vec<LimitRow>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<LimitSnapshot> for Vec<LimitRow> {
    fn from(snapshot: LimitSnapshot) -> Self {
        snapshot.rows
    }
}

impl ConfigRepr for LimitSnapshot {}

impl LimitRepository for LimitSnapshot {
    fn rows_for_msid(&self, msid: &Msid) -> Result<Vec<LimitRow>, LimitError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| &row.msid == msid)
            .cloned()
            .collect())
    }
}
