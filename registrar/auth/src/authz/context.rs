// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry points for authorization checks

use super::actor::AnyActor;
use super::family::FamilySet;
use super::family::load_family_for_actor;
use super::policy;
use super::policy::Action;
use super::policy::Scope;
use super::resources::Record;
use crate::authn;
use crate::context::OpContext;
use crate::storage::Storage;
use registrar_common::api::external::Error;
use registrar_common::api::external::ResourceType;
use slog::Logger;
use slog::o;
use slog::trace;
use std::sync::Arc;

/// Server-wide authorization context
///
/// This carries no mutable state: the policy is baked in (see
/// [`crate::authz::policy`]) and cannot change at runtime.
pub struct Authz {
    log: Logger,
}

impl Authz {
    pub fn new(log: &Logger) -> Authz {
        Authz { log: log.new(o!("component" => "authz")) }
    }

    /// Asks the policy whether `actor` may perform `action` on `resource`
    pub fn is_allowed(
        &self,
        actor: &AnyActor,
        action: Action,
        resource: &Record,
    ) -> bool {
        let allowed = policy::is_allowed(
            actor,
            action,
            resource.resource_type(),
            resource.key(),
        );
        trace!(self.log, "authz check";
            "actor" => ?actor.actor_id(),
            "action" => ?action,
            "resource_type" => %resource.resource_type(),
            "allowed" => allowed,
        );
        allowed
    }
}

/// Operation-specific authorization context
///
/// This is the primary external interface for the authorization subsystem,
/// through [`Context::authorize()`] (one actor acting on one record),
/// [`Context::visible_scope()`] (the subset of a collection an actor may
/// enumerate), and [`Context::check_capability()`] (the coarse role gate).
/// Each call is a pure function of the actor, the request parameters, and
/// the current state of the relationship graph, fetched fresh from the
/// system of record -- decisions are never cached across requests.
pub struct Context {
    authn: Arc<authn::Context>,
    authz: Arc<Authz>,
    datastore: Arc<dyn Storage>,
}

impl Context {
    pub fn new(
        authn: Arc<authn::Context>,
        authz: Arc<Authz>,
        datastore: Arc<dyn Storage>,
    ) -> Context {
        Context { authn, authz, datastore }
    }

    /// Checks whether the actor behind `self` may perform `action` on
    /// `resource`
    ///
    /// On failure, the returned error does not distinguish a record the
    /// actor may not see from a record that does not exist: a denied Read --
    /// and a denied mutation of a record the actor cannot even read -- comes
    /// back as "not found".  A denied mutation of a record the actor *can*
    /// read comes back as `Forbidden`.
    pub async fn authorize(
        &self,
        opctx: &OpContext,
        action: Action,
        resource: &Record,
    ) -> Result<(), Error> {
        let mut family = FamilySet::new();
        load_family_for_actor(opctx, &*self.datastore, &self.authn, &mut family)
            .await?;
        let actor = AnyActor::new(&self.authn, family);

        if self.authz.is_allowed(&actor, action, resource) {
            return Ok(());
        }

        if action == Action::Read {
            return Err(resource.not_found());
        }

        // The actor failed an authz check for a mutation.  If they can't even
        // read this record, we should produce a 404-shaped error rather than
        // a 403-shaped one.
        if self.authz.is_allowed(&actor, Action::Read, resource) {
            Err(Error::Forbidden)
        } else {
            Err(resource.not_found())
        }
    }

    /// Computes the visible set of `resource_type` for the actor behind
    /// `self`, as a predicate for the datastore to apply
    ///
    /// The capability gate runs first: a role with no standing to list this
    /// entity family at all (a pending actor anywhere, a teacher on
    /// financial families) is rejected before any links are loaded.
    pub async fn visible_scope(
        &self,
        opctx: &OpContext,
        resource_type: ResourceType,
    ) -> Result<Scope, Error> {
        let actor = self.authn.actor_required()?;
        if !policy::can_reach(actor.role(), resource_type, Action::ListChildren)
        {
            return Err(Error::Forbidden);
        }

        let mut family = FamilySet::new();
        load_family_for_actor(opctx, &*self.datastore, &self.authn, &mut family)
            .await?;
        Ok(policy::scope_for(actor.role(), &family, resource_type))
    }

    /// The coarse role gate: checks whether the actor's role has any
    /// standing to perform `action` on the `resource_type` family
    ///
    /// This is row-independent and cheap; callers use it to fail fast before
    /// fetching anything.  It never substitutes for [`Context::authorize()`]
    /// or [`Context::visible_scope()`].
    pub fn check_capability(
        &self,
        resource_type: ResourceType,
        action: Action,
    ) -> Result<(), Error> {
        let actor = self.authn.actor_required()?;
        if policy::can_reach(actor.role(), resource_type, action) {
            Ok(())
        } else {
            Err(Error::Forbidden)
        }
    }
}
