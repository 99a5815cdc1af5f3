//! Save reconciliation.
//!
//! # Responsibility
//! - Merge the editor draft into the active note and move it to the front.
//! - Split the whole collection into upsert (`existing`) and insert (`fresh`)
//!   batches.
//! - Dispatch both batches and merge inserted identities back.
//!
//! # Invariants
//! - Every save re-offers all identity-less notes, not only the edited one.
//! - An empty batch is never dispatched.
//! - A failed write never rolls back the local commit.

use crate::model::collection::NoteCollection;
use crate::model::note::NoteRecord;
use crate::session::error::{SessionError, WriteError, WriteOp};
use crate::session::state::SessionState;
use crate::store::RemoteStore;
use log::{info, warn};
use std::time::Instant;

/// Write batches derived from one committed collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePlan {
    /// Notes with a remote identity, for `upsert_many`.
    pub existing: Vec<NoteRecord>,
    /// Collection positions of `existing`, in the same order.
    pub existing_positions: Vec<usize>,
    /// Notes without a remote identity, for `insert_many`.
    pub fresh: Vec<NoteRecord>,
    /// Collection positions of `fresh`, in the same order.
    pub fresh_positions: Vec<usize>,
}

impl SavePlan {
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.fresh.is_empty()
    }
}

/// Outcome of dispatching one `SavePlan`.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub upserted: usize,
    /// Rows returned by a successful insert, with assigned identities.
    pub inserted: Vec<NoteRecord>,
    pub errors: Vec<WriteError>,
}

impl DispatchReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Splits the collection by remote identity, keeping positions.
pub fn partition(notes: &NoteCollection) -> SavePlan {
    let mut plan = SavePlan::default();
    for (position, note) in notes.iter().enumerate() {
        if note.has_remote_identity() {
            plan.existing.push(note.clone());
            plan.existing_positions.push(position);
        } else {
            plan.fresh.push(note.clone());
            plan.fresh_positions.push(position);
        }
    }
    plan
}

impl SessionState {
    /// Commits the editor draft into the active note.
    ///
    /// The merged note moves to position 0, the active index resets to 0, and
    /// the returned plan covers the whole new collection.
    pub fn commit_edit(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(Self, SavePlan), SessionError> {
        self.ensure_loaded()?;
        let title: String = title.into();
        let content: String = content.into();
        let notes = self
            .notes
            .clone()
            .move_to_front_with(self.active_index, |note| note.with_draft(title, content))?;
        let plan = partition(&notes);
        Ok((
            Self {
                notes,
                active_index: 0,
                ..self.clone()
            },
            plan,
        ))
    }
}

/// Runs the plan's writes against `store`.
///
/// Upsert and insert are attempted independently; failures are collected in
/// the report and logged, never returned.
pub fn dispatch<S: RemoteStore + ?Sized>(store: &mut S, plan: &SavePlan) -> DispatchReport {
    let started_at = Instant::now();
    let mut report = DispatchReport::default();

    if !plan.existing.is_empty() {
        match store.upsert_many(&plan.existing) {
            Ok(()) => report.upserted = plan.existing.len(),
            Err(source) => report.errors.push(WriteError {
                op: WriteOp::Upsert,
                records: plan.existing.len(),
                source,
            }),
        }
    }

    if !plan.fresh.is_empty() {
        match store.insert_many(&plan.fresh) {
            Ok(inserted) => report.inserted = inserted,
            Err(source) => report.errors.push(WriteError {
                op: WriteOp::Insert,
                records: plan.fresh.len(),
                source,
            }),
        }
    }

    for err in &report.errors {
        warn!(
            "event=notes_dispatch module=session status=error op={} records={} error={}",
            err.op.as_str(),
            err.records,
            err.source
        );
    }
    info!(
        "event=notes_dispatch module=session status={} upserted={} inserted={} failed_batches={} duration_ms={}",
        if report.is_ok() { "ok" } else { "partial" },
        report.upserted,
        report.inserted.len(),
        report.errors.len(),
        started_at.elapsed().as_millis()
    );

    report
}

/// Merges identities returned by `insert_many` into the fresh positions.
///
/// A position is only updated when it still holds an identity-less note with
/// the same title and content as the inserted row. Returns the new state and
/// how many notes were updated.
pub fn assign_identities(
    state: &SessionState,
    positions: &[usize],
    inserted: &[NoteRecord],
) -> (SessionState, usize) {
    let mut records = state.notes.clone().into_vec();
    let mut merged = 0;
    for (&position, row) in positions.iter().zip(inserted) {
        let Some(current) = records.get_mut(position) else {
            continue;
        };
        if current.has_remote_identity()
            || current.title != row.title
            || current.content != row.content
        {
            continue;
        }
        current.id = row.id;
        current.created_at = row.created_at;
        merged += 1;
    }

    (
        SessionState {
            notes: NoteCollection::seeded(records),
            ..state.clone()
        },
        merged,
    )
}
