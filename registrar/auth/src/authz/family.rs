// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Family link lookup
//!
//! For important background, see the [`crate::authz`] module documentation.
//! We said there that in evaluating an authorization decision, the policy
//! winds up checking whether the record in question is reachable from the
//! actor's linked profile -- possibly through several relationship hops.
//!
//! To achieve this, before evaluating the policy, we load _all_ of the links
//! the actor has that might affect the decision: the Student or Parent
//! profile tied to the actor, the StudentParent rows fanning out from it, and
//! the Grades those Students belong to.  This isn't as large as it might
//! sound, since the graph around one family is small, but it does mean a few
//! storage queries per evaluation.  We accept that cost deliberately: links
//! are fetched fresh on every evaluation because an administrator may
//! reassign relationships between requests, and a stale allow decision is a
//! security defect.
//!
//! Once we've got the complete link set, the policy functions in
//! [`crate::authz::policy`] evaluate against this data structure alone --
//! they never reach back into storage, which keeps them pure and cheap to
//! test.

use crate::authn;
use crate::context::OpContext;
use crate::storage::Storage;
use registrar_common::api::external::Error;
use registrar_common::api::external::Role;
use slog::trace;
use std::collections::BTreeSet;
use uuid::Uuid;

/// The set of profiles an actor reaches through its family relationships,
/// used for quickly checking whether a particular record is within reach
///
/// For a student-role actor: their own Student profile, its Grade, and the
/// Parents linked to it.  For a parent-role actor: their own Parent profile,
/// every child Student linked through StudentParent rows, and the union of
/// those children's Grades.  For every other role the set stays empty -- the
/// policy for those roles never consults it.
#[derive(Clone, Debug, Default)]
pub struct FamilySet {
    students: BTreeSet<Uuid>,
    parents: BTreeSet<Uuid>,
    grades: BTreeSet<Uuid>,
}

impl FamilySet {
    pub fn new() -> FamilySet {
        FamilySet::default()
    }

    /// Student profiles within reach: the actor's own for a student, all
    /// linked children for a parent
    pub fn students(&self) -> &BTreeSet<Uuid> {
        &self.students
    }

    /// Parent profiles within reach: the actor's own for a parent, the
    /// linked parents of the actor's Student for a student
    pub fn parents(&self) -> &BTreeSet<Uuid> {
        &self.parents
    }

    /// Grades containing any Student within reach
    pub fn grades(&self) -> &BTreeSet<Uuid> {
        &self.grades
    }
}

/// Loads the family links that might affect an authorization decision for
/// the actor in `authn`
///
/// A missing profile link (e.g., a student-role actor with no Student row)
/// is not an error: the family set simply stays empty and every
/// relationship-derived decision fails closed.
pub async fn load_family_for_actor(
    opctx: &OpContext,
    datastore: &dyn Storage,
    authn: &authn::Context,
    family: &mut FamilySet,
) -> Result<(), Error> {
    // If the actor is unauthenticated, there is nothing to load.
    let Some(actor) = authn.actor() else {
        return Ok(());
    };

    match actor.role() {
        Role::Student => {
            trace!(opctx.log, "loading family links";
                "actor_id" => actor.id().to_string(),
                "role" => %actor.role(),
            );
            if let Some(student_id) =
                datastore.student_for_actor(opctx, actor.id()).await?
            {
                family.students.insert(student_id);
                for parent_id in
                    datastore.parents_of_student(opctx, student_id).await?
                {
                    family.parents.insert(parent_id);
                }
                if let Some(grade_id) =
                    datastore.grade_of_student(opctx, student_id).await?
                {
                    family.grades.insert(grade_id);
                }
            }
        }

        Role::Parent => {
            trace!(opctx.log, "loading family links";
                "actor_id" => actor.id().to_string(),
                "role" => %actor.role(),
            );
            if let Some(parent_id) =
                datastore.parent_for_actor(opctx, actor.id()).await?
            {
                family.parents.insert(parent_id);
                for student_id in
                    datastore.students_of_parent(opctx, parent_id).await?
                {
                    family.students.insert(student_id);
                    // A parent with several children sees the union of the
                    // children's grades.
                    if let Some(grade_id) =
                        datastore.grade_of_student(opctx, student_id).await?
                    {
                        family.grades.insert(grade_id);
                    }
                }
            }
        }

        // Admins and teachers are not scoped by family links, and pending
        // actors have no reach at all.
        Role::Admin | Role::Teacher | Role::Pending => (),
    }

    Ok(())
}
