// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actor types used when evaluating the policy

use super::family::FamilySet;
use crate::authn;
use registrar_common::api::external::Role;
use uuid::Uuid;

/// Represents an [`authn::Context`] (which is either an authenticated or
/// unauthenticated actor) for policy evaluation, along with the family links
/// prefetched for it
#[derive(Clone, Debug)]
pub struct AnyActor {
    actor_id: Option<Uuid>,
    role: Option<Role>,
    family: FamilySet,
}

impl AnyActor {
    pub fn new(authn: &authn::Context, family: FamilySet) -> AnyActor {
        let actor = authn.actor();
        AnyActor {
            actor_id: actor.map(|a| a.id()),
            role: actor.map(|a| a.role()),
            family,
        }
    }

    /// Returns the actor's role claim, or `None` if unauthenticated
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn actor_id(&self) -> Option<Uuid> {
        self.actor_id
    }

    pub fn family(&self) -> &FamilySet {
        &self.family
    }
}

impl PartialEq for AnyActor {
    fn eq(&self, other: &Self) -> bool {
        self.actor_id == other.actor_id
    }
}

impl Eq for AnyActor {}
