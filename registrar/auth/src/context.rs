// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared state used during the execution of one operation

use crate::authn;
use crate::authz;
use crate::storage::Storage;
use registrar_common::api::external::Error;
use registrar_common::api::external::ResourceType;
use slog::Logger;
use slog::o;
use std::sync::Arc;

/// Provides context for the execution of one operation
///
/// Every datastore entry point takes one of these.  It ties together the
/// authentication context the identity provider resolved for the request,
/// the authorization machinery, and a request-scoped log.  The request layer
/// constructs one per inbound request; background work constructs its own.
pub struct OpContext {
    pub log: Logger,
    pub authn: Arc<authn::Context>,
    authz: authz::Context,
}

impl OpContext {
    pub fn new(
        log: &Logger,
        authn: authn::Context,
        authz: Arc<authz::Authz>,
        datastore: Arc<dyn Storage>,
    ) -> OpContext {
        let authn = Arc::new(authn);
        let authz =
            authz::Context::new(Arc::clone(&authn), authz, datastore);
        OpContext { log: log.new(o!()), authn, authz }
    }

    /// Returns an `OpContext` suitable for tests, wiring up a fresh `Authz`
    /// around the given authentication context and datastore
    pub fn for_tests(
        log: &Logger,
        authn: authn::Context,
        datastore: Arc<dyn Storage>,
    ) -> OpContext {
        let authz = Arc::new(authz::Authz::new(log));
        OpContext::new(log, authn, authz, datastore)
    }

    /// Check whether the actor performing this request is authorized to
    /// perform `action` on `resource`
    pub async fn authorize(
        &self,
        action: authz::Action,
        resource: &authz::Record,
    ) -> Result<(), Error> {
        self.authz.authorize(self, action, resource).await
    }

    /// Compute the subset of `resource_type` this request's actor may
    /// enumerate, as a predicate over the collection
    pub async fn visible_scope(
        &self,
        resource_type: ResourceType,
    ) -> Result<authz::Scope, Error> {
        self.authz.visible_scope(self, resource_type).await
    }

    /// Check whether this request's actor has any standing to perform
    /// `action` on the `resource_type` family at all, independent of any
    /// specific record
    pub fn check_capability(
        &self,
        resource_type: ResourceType,
        action: authz::Action,
    ) -> Result<(), Error> {
        self.authz.check_capability(resource_type, action)
    }
}
