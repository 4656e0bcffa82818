//! Reconstruction of a nested object record from join-flattened rows.
//!
//! The detail query joins every one-to-many relation of an object in a single
//! statement, so the store returns the Cartesian product
//! `agents × nationalities-per-agent × classifiers × references` (times
//! places). [`Normalizer`] folds those rows back into one [`ObjectRecord`]
//! and an insertion-ordered map of [`AgentRecord`]s without losing a distinct
//! value and without counting any value twice.
//!
//! ```text
//! rows ──push──▶ ObjectRecord  (created from first row, then only extended)
//!         └────▶ IndexMap<AgentId, AgentRecord>  (first-seen order)
//!                        │
//!                        ▼ agent_rows(limit)
//!                 [part, name, timespan, "A|B"]
//! ```

mod timespan;

pub use timespan::{timespan, TimespanError};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::model::AgentId;

/// Separator between an agent's nationalities in a rendered row.
pub const NATIONALITY_SEPARATOR: &str = "|";

/// One flattened row of the detail query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailRow {
    pub label: Option<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub part: Option<String>,
    pub agent_name: Option<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub nationality: Option<String>,
    pub classifier: Option<String>,
    pub ref_type: Option<String>,
    pub ref_content: Option<String>,
    pub agent_id: Option<AgentId>,
}

/// The reconstructed object.
///
/// Null relations survive as `null` entries: an object without classifiers
/// has `classifier == [null]`, one without references has
/// `ref_type == ref_content == [null]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectRecord {
    pub label: Option<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub classifier: IndexSet<Option<String>>,
    /// Positionally aligned with `ref_content`.
    pub ref_type: Vec<Option<String>>,
    pub ref_content: IndexSet<Option<String>>,
}

impl ObjectRecord {
    fn from_row(row: &DetailRow) -> Self {
        Self {
            label: row.label.clone(),
            date: row.date.clone(),
            place: row.place.clone(),
            classifier: IndexSet::new(),
            ref_type: Vec::new(),
            ref_content: IndexSet::new(),
        }
    }

    fn absorb(&mut self, row: &DetailRow) {
        self.classifier.insert(row.classifier.clone());

        // A type is recorded only alongside a content value seen for the
        // first time. A second type sharing already-known content is dropped.
        if self.ref_content.insert(row.ref_content.clone()) {
            self.ref_type.push(row.ref_type.clone());
        }
    }
}

/// An agent that produced (part of) the object.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub part: Option<String>,
    pub name: Option<String>,
    pub timespan: String,
    pub nationalities: IndexSet<Option<String>>,
}

impl AgentRecord {
    fn from_row(row: &DetailRow) -> Result<Self, TimespanError> {
        Ok(Self {
            part: row.part.clone(),
            name: row.agent_name.clone(),
            timespan: timespan(row.begin_date.as_deref(), row.end_date.as_deref())?,
            nationalities: IndexSet::from([row.nationality.clone()]),
        })
    }

    /// Nationalities joined with `|`; empty when the agent has none.
    pub fn nationality_line(&self) -> String {
        match self.nationalities.first() {
            Some(Some(first)) if !first.is_empty() => self
                .nationalities
                .iter()
                .flatten()
                .filter(|n| !n.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(NATIONALITY_SEPARATOR),
            _ => String::new(),
        }
    }

    pub fn to_row(&self) -> AgentRow {
        AgentRow(
            self.part.clone(),
            self.name.clone(),
            self.timespan.clone(),
            self.nationality_line(),
        )
    }
}

/// Tabular agent row: `[part, name, timespan, nationalities]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRow(
    pub Option<String>,
    pub Option<String>,
    pub String,
    pub String,
);

/// Output of a completed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub object: ObjectRecord,
    pub agents: IndexMap<AgentId, AgentRecord>,
}

impl Normalized {
    /// Render at most `limit` agents, in first-seen order.
    pub fn agent_rows(&self, limit: usize) -> Vec<AgentRow> {
        self.agents
            .values()
            .take(limit)
            .map(AgentRecord::to_row)
            .collect()
    }
}

/// Incremental row folder.
#[derive(Debug, Default)]
pub struct Normalizer {
    object: Option<ObjectRecord>,
    agents: IndexMap<AgentId, AgentRecord>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row into the accumulators.
    pub fn push(&mut self, row: &DetailRow) -> Result<(), TimespanError> {
        self.object
            .get_or_insert_with(|| ObjectRecord::from_row(row))
            .absorb(row);

        let Some(agent_id) = row.agent_id else {
            return Ok(());
        };

        match self.agents.get_mut(&agent_id) {
            Some(agent) => {
                agent.nationalities.insert(row.nationality.clone());
            }
            None => {
                self.agents.insert(agent_id, AgentRecord::from_row(row)?);
            }
        }

        Ok(())
    }

    /// Finish; `None` when no row was pushed.
    pub fn finish(self) -> Option<Normalized> {
        self.object.map(|object| Normalized {
            object,
            agents: self.agents,
        })
    }
}

/// Fold a whole row set.
pub fn normalize<'a, I>(rows: I) -> Result<Option<Normalized>, TimespanError>
where
    I: IntoIterator<Item = &'a DetailRow>,
{
    let mut normalizer = Normalizer::new();
    for row in rows {
        normalizer.push(row)?;
    }
    Ok(normalizer.finish())
}
