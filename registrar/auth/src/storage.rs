// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for access to the relationship graph
//!
//! The authorization subsystem does not access the system of record directly.
//! It asks these questions of whoever owns the data (in practice,
//! `registrar_db_queries::DataStore`), which keeps this crate free of any
//! dependency on the storage implementation.  Each method is a single join
//! resolution over the relationship graph; none of them caches, because role
//! and relationship data can change between requests and a stale allow
//! decision is a security defect.

use crate::context::OpContext;
use registrar_common::api::external::Error;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Return the Student profile linked to the given actor, if any
    async fn student_for_actor(
        &self,
        opctx: &OpContext,
        actor_id: Uuid,
    ) -> Result<Option<Uuid>, Error>;

    /// Return the Parent profile linked to the given actor, if any
    async fn parent_for_actor(
        &self,
        opctx: &OpContext,
        actor_id: Uuid,
    ) -> Result<Option<Uuid>, Error>;

    /// Return the Students reachable from the given Parent through
    /// StudentParent rows
    async fn students_of_parent(
        &self,
        opctx: &OpContext,
        parent_id: Uuid,
    ) -> Result<Vec<Uuid>, Error>;

    /// Return the Parents reachable from the given Student through
    /// StudentParent rows
    async fn parents_of_student(
        &self,
        opctx: &OpContext,
        student_id: Uuid,
    ) -> Result<Vec<Uuid>, Error>;

    /// Return the Grade the given Student currently belongs to, if any
    async fn grade_of_student(
        &self,
        opctx: &OpContext,
        student_id: Uuid,
    ) -> Result<Option<Uuid>, Error>;
}
