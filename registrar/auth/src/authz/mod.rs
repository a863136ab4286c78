// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Authorization subsystem
//!
//! ## Authorization basics
//!
//! Access policy here is role-based (RBAC), but visibility is
//! relationship-indexed rather than row-owned: an *actor* can perform an
//! *action* on a *record* if the actor's *role* grants it, and -- for the
//! family-scoped roles -- if the record is reachable from the actor's linked
//! profile through the relationship graph.  Let's unpack that.
//!
//! - **actor** is an authenticated identity plus the role claim the external
//!   identity provider resolved for it.
//! - **record** is a row in the system of record, like a Student or an
//!   Invoice.
//! - **action** is one of a handful of things like "read", "modify", or
//!   "create a child record".  The set of actions is fixed by the system.
//! - **role** is exactly one of Admin, Teacher, Student, Parent, or Pending.
//!   Roles are mutually exclusive, not a capability set, and anything
//!   unrecognized is treated as Pending (which is denied everything).
//!
//! The policy determines what roles grant what access.  It is baked into
//! this crate (see the `policy` submodule) and cannot be changed at runtime.
//! In outline:
//!
//! - an administrator can do anything to any record;
//! - a teacher can read any record except financial ones (Invoice and
//!   Payment are admin-and-family only -- teachers are excluded outright);
//! - a student can read their own records; a parent can read their
//!   children's;
//! - nobody else can write anything, and a pending actor can read nothing.
//!
//! "Their own records" is where the relationship graph comes in.  A Parent
//! does not own student records directly: they reach them transitively,
//! through StudentParent join rows to a Student, and from the Student to the
//! dependent records anchored to it.  Suppose we have:
//!
//! - a Student "alice", whose Grade is "4-west"
//! - a Parent "bob", linked to alice by a StudentParent row
//! - a Performance record for alice's math final
//!
//! Bob can read the Performance record, but the path to determining that
//! takes three hops: the Parent profile linked to Bob's actor, the
//! StudentParent row from that profile to alice, and the Performance
//! record's anchor back to alice.  Payment records take one hop more: a
//! Payment anchors to an Invoice, and only the Invoice anchors to a Student.
//! Every decision about a dependent record walks its full anchor chain; no
//! record caches a denormalized owner.
//!
//! ## Link lookup
//!
//! Actors, profiles, and the StudentParent rows connecting them are stored
//! in the system of record.  Before evaluating the policy we load everything
//! the decision might consult -- the actor's linked profile and the family
//! fanning out from it -- into a [`FamilySet`].  See the `family` submodule
//! for why we prefetch rather than querying lazily.
//!
//! ## Scoped listings
//!
//! Listing endpoints must only show an actor the records they could read
//! individually.  Rather than implement that twice, the policy expresses a
//! visible set as a declarative [`Scope`] predicate, and the object check
//! for a Read *is* a membership test against that same predicate.  A record
//! is returned by a scoped listing if and only if reading it directly would
//! be allowed; the two cannot drift apart because there is nothing separate
//! to drift.
//!
//! ## Authorization control flow
//!
//! Suppose we receive a request from Bob to read a Performance record.  The
//! record fetch code looks up the record, resolves its anchor chain to build
//! an authz [`Record`] handle, and checks whether the actor can perform
//! [`Action::Read`] on it.  Then:
//!
//! 1. The authorization subsystem loads Bob's family links (fresh -- an
//!    administrator may have reassigned a relationship since the last
//!    request).
//! 2. The policy evaluates role, action class, and scope membership.
//! 3. On denial, the caller reports the record as not found.  An actor must
//!    not be able to distinguish a record outside their visible set from a
//!    record that does not exist.

mod actor;
pub use actor::AnyActor;

mod context;
pub use context::Authz;
pub use context::Context;

mod family;
pub use family::FamilySet;
pub use family::load_family_for_actor;

mod policy;
pub use policy::Action;
pub use policy::MethodClass;
pub use policy::Scope;
pub use policy::ScopeKey;
pub use policy::can_reach;
pub use policy::is_allowed;
pub use policy::scope_for;

mod resources;
pub use resources::*;
