// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The access policy itself
//!
//! Everything here is a pure function of the actor's role, the family links
//! prefetched for the actor, and the record's scope key.  The two consumers
//! -- the scoping path that computes a whole visible set and the
//! object-authorization path that decides one access -- are both derived from
//! [`scope_for`] plus [`Scope::allows`], so a record is readable if and only
//! if it is a member of the actor's visible set.  Keeping a single source of
//! truth here is what prevents the two paths from drifting apart.

use super::actor::AnyActor;
use super::family::FamilySet;
use registrar_common::api::external::ResourceType;
use registrar_common::api::external::Role;
use std::collections::BTreeSet;
use uuid::Uuid;

/// An operation on a resource that requires authorization
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Read,
    ListChildren,
    CreateChild,
    Modify,
    Delete,
}

impl Action {
    /// Every action is either safe/idempotent (a query) or a mutation.  The
    /// policy only distinguishes these two classes per role; the finer action
    /// is still useful for logging and for the capability gate.
    pub fn class(&self) -> MethodClass {
        match self {
            Action::Read | Action::ListChildren => MethodClass::Read,
            Action::CreateChild | Action::Modify | Action::Delete => {
                MethodClass::Write
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MethodClass {
    Read,
    Write,
}

/// How a particular record is matched against an actor's visible set
///
/// Every record resolves to exactly one of these, in exactly one place (the
/// datastore's per-entity `scope_key` helpers).  Dependent records resolve to
/// `Anchored` by walking their anchor chain to the owning Student -- for
/// Payment that is two hops (Payment→Invoice→Student), and a broken chain
/// surfaces as `Anchored(None)`, which no non-admin scope admits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeKey {
    /// a Student record; matched by its own id
    Student(Uuid),
    /// a Parent record; matched by its own id
    Parent(Uuid),
    /// a Grade record; matched by its own id
    Grade(Uuid),
    /// a dependent record; matched by the id of its anchoring Student
    Anchored(Option<Uuid>),
    /// a record visible to every authenticated, non-pending actor
    Public,
}

/// The visible set of one entity type for one actor, as a declarative
/// predicate
///
/// The datastore applies this in a single filtering pass over a collection;
/// the object-authorization engine applies it to a single record's key.  It
/// deliberately carries no record data, so it can translate to a single
/// storage-level query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Scope {
    /// every record of the entity type
    All,
    /// records whose scope key matches one of these ids
    Ids(BTreeSet<Uuid>),
    /// no records at all
    Empty,
}

impl Scope {
    /// Returns whether a record with the given key is a member of this
    /// visible set
    pub fn allows(&self, key: &ScopeKey) -> bool {
        match self {
            Scope::All => true,
            Scope::Empty => false,
            Scope::Ids(ids) => match key {
                ScopeKey::Student(id)
                | ScopeKey::Parent(id)
                | ScopeKey::Grade(id) => ids.contains(id),
                ScopeKey::Anchored(Some(student_id)) => {
                    ids.contains(student_id)
                }
                // A dependent record with a broken anchor chain is invisible
                // to everyone but an administrator.
                ScopeKey::Anchored(None) => false,
                // Public records are never matched against an id set.
                ScopeKey::Public => false,
            },
        }
    }
}

/// Returns whether financial records of this type are restricted to
/// administrators and the student's own family
fn is_financial(resource_type: ResourceType) -> bool {
    matches!(resource_type, ResourceType::Invoice | ResourceType::Payment)
}

/// The capability gate: whether a role has any standing at all to attempt the
/// given action on the given entity family
///
/// This is a static table, independent of which specific record is involved,
/// so callers use it as a cheap short-circuit before the finer engines run.
/// It never substitutes for them: a role permitted to list Students still
/// only sees its scoped subset.
pub fn can_reach(
    role: Role,
    resource_type: ResourceType,
    action: Action,
) -> bool {
    match role {
        Role::Admin => true,
        Role::Pending => false,
        Role::Teacher | Role::Student | Role::Parent => match action.class() {
            // Mutations are administrative operations everywhere.
            MethodClass::Write => false,
            // Everyone else may attempt reads and lists, except that
            // financial families exclude teachers outright.
            MethodClass::Read => {
                !(role == Role::Teacher && is_financial(resource_type))
            }
        },
    }
}

/// Computes the visible set of `resource_type` for an actor with the given
/// role and family links
pub fn scope_for(
    role: Role,
    family: &FamilySet,
    resource_type: ResourceType,
) -> Scope {
    match role {
        Role::Admin => Scope::All,
        Role::Pending => Scope::Empty,
        Role::Teacher => {
            // Financial data is admin-and-family only; teachers are excluded
            // entirely, not merely filtered.
            if is_financial(resource_type) {
                Scope::Empty
            } else {
                Scope::All
            }
        }
        Role::Student | Role::Parent => {
            // These roles imply a linked profile.  An actor whose profile
            // link is missing gets nothing at all -- not even the globally
            // visible families -- rather than an error.
            let linked = match role {
                Role::Student => !family.students().is_empty(),
                _ => !family.parents().is_empty(),
            };
            if !linked {
                return Scope::Empty;
            }
            match resource_type {
                ResourceType::Teacher | ResourceType::Subject => Scope::All,
                ResourceType::Student
                | ResourceType::StudentParent
                | ResourceType::Performance
                | ResourceType::Attendance
                | ResourceType::Invoice
                | ResourceType::Payment
                | ResourceType::Enrollment => {
                    Scope::Ids(family.students().clone())
                }
                ResourceType::Parent => Scope::Ids(family.parents().clone()),
                ResourceType::Grade => Scope::Ids(family.grades().clone()),
            }
        }
    }
}

/// Decides whether `actor` may perform `action` on a record of
/// `resource_type` with the given scope key
///
/// The Read branch is, by construction, a membership test against the same
/// visible set the scoping path computes.
pub fn is_allowed(
    actor: &AnyActor,
    action: Action,
    resource_type: ResourceType,
    key: &ScopeKey,
) -> bool {
    // An unauthenticated actor is denied unconditionally.
    let Some(role) = actor.role() else {
        return false;
    };

    match role {
        Role::Admin => true,
        Role::Pending => false,
        Role::Teacher | Role::Student | Role::Parent => match action.class() {
            MethodClass::Write => false,
            MethodClass::Read => {
                scope_for(role, actor.family(), resource_type).allows(key)
            }
        },
    }
}
