// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication facilities
//!
//! Every operation in the system carries an authentication context that
//! describes who (or what) is performing it.  This module provides the
//! HTTP-agnostic representation of that context.
//!
//! Credential verification itself is delegated to an external identity
//! provider: by the time a [`Context`] exists, the provider has already
//! resolved the request to a stable identity and a role claim.  Subsystems
//! could also create contexts for purposes unrelated to HTTP requests (e.g.,
//! background jobs).

use registrar_common::api::external::Error;
use registrar_common::api::external::Role;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Describes how the actor performing the current operation is authenticated
///
/// This is HTTP-agnostic.
#[derive(Clone, Debug)]
pub struct Context {
    /// Describes whether the user is authenticated and provides more
    /// information that's specific to whether they're authenticated or not
    kind: Kind,
}

impl Context {
    /// Returns the authenticated actor, if any
    pub fn actor(&self) -> Option<&Actor> {
        self.actor_required().ok()
    }

    /// Returns the authenticated actor if present or an Unauthenticated error
    /// otherwise
    pub fn actor_required(&self) -> Result<&Actor, Error> {
        match &self.kind {
            Kind::Authenticated(Details { actor }) => Ok(actor),
            Kind::Unauthenticated => Err(Error::Unauthenticated {
                internal_message: "Actor required".to_string(),
            }),
        }
    }

    /// Returns an unauthenticated context
    pub fn unauthenticated() -> Context {
        Context { kind: Kind::Unauthenticated }
    }

    /// Returns an authenticated context for the actor that the external
    /// identity provider resolved for this request
    pub fn for_actor(actor: Actor) -> Context {
        Context { kind: Kind::Authenticated(Details { actor }) }
    }

    /// Returns an authenticated context for a specific identity and role.
    /// Not marked as #[cfg(test)] so that this is available in integration
    /// tests.
    pub fn for_test_actor(actor_id: Uuid, role: Role) -> Context {
        Context::for_actor(Actor::new(actor_id, role))
    }
}

/// Describes whether the user is authenticated and provides more information
/// that's specific to whether they're authenticated (or not)
#[derive(Clone, Debug, Deserialize, Serialize)]
enum Kind {
    /// Client did not attempt to authenticate
    Unauthenticated,
    /// Client successfully authenticated
    Authenticated(Details),
}

/// Describes the actor that was authenticated
///
/// This could eventually include other information used during authorization,
/// like a remote IP, the time of authentication, etc.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Details {
    /// the actor performing the request
    actor: Actor,
}

/// Who is performing an operation
///
/// The role claim is resolved through [`Role::parse`] at the identity
/// provider boundary, so by construction it is a member of the closed role
/// enumeration; anything the provider could not recognize arrives here as
/// [`Role::Pending`].
#[derive(Clone, Copy, Deserialize, Eq, PartialEq, Serialize)]
pub struct Actor {
    actor_id: Uuid,
    role: Role,
}

impl Actor {
    pub fn new(actor_id: Uuid, role: Role) -> Actor {
        Actor { actor_id, role }
    }

    pub fn id(&self) -> Uuid {
        self.actor_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // This `Debug` impl is approximately the same as what we'd get by
        // deriving it.  We impl it by hand so that adding fields to `Actor`
        // doesn't result in them showing up in `Debug` output (e.g., log
        // messages) unless someone explicitly adds them here.
        //
        // Do NOT include sensitive fields (e.g., a bearer token) in this
        // output!
        f.debug_struct("Actor")
            .field("actor_id", &self.actor_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
