// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Implements the [Storage] interface for [registrar_auth] integration.

use registrar_auth::context::OpContext;
use registrar_auth::storage::Storage;
use registrar_common::api::external::Error;
use uuid::Uuid;

#[async_trait::async_trait]
impl Storage for super::DataStore {
    /// Return the Student profile linked to the given actor, if any
    ///
    /// There is no authorization check here because resolving one's own
    /// family links is the prerequisite for any authorization check.
    async fn student_for_actor(
        &self,
        _opctx: &OpContext,
        actor_id: Uuid,
    ) -> Result<Option<Uuid>, Error> {
        let tables = self.tables.lock().await;
        // At most one Student is expected to reference a given actor; if
        // data ever violates that, the first in id order wins
        // deterministically.
        Ok(tables
            .students
            .values()
            .find(|row| row.user_id == Some(actor_id))
            .map(|row| row.id))
    }

    /// Return the Parent profile linked to the given actor, if any
    async fn parent_for_actor(
        &self,
        _opctx: &OpContext,
        actor_id: Uuid,
    ) -> Result<Option<Uuid>, Error> {
        let tables = self.tables.lock().await;
        Ok(tables
            .parents
            .values()
            .find(|row| row.user_id == Some(actor_id))
            .map(|row| row.id))
    }

    /// Return the Students reachable from the given Parent through
    /// StudentParent rows
    async fn students_of_parent(
        &self,
        _opctx: &OpContext,
        parent_id: Uuid,
    ) -> Result<Vec<Uuid>, Error> {
        let tables = self.tables.lock().await;
        Ok(tables
            .student_parents
            .values()
            .filter(|row| row.parent_id == parent_id)
            .map(|row| row.student_id)
            .collect())
    }

    /// Return the Parents reachable from the given Student through
    /// StudentParent rows
    async fn parents_of_student(
        &self,
        _opctx: &OpContext,
        student_id: Uuid,
    ) -> Result<Vec<Uuid>, Error> {
        let tables = self.tables.lock().await;
        Ok(tables
            .student_parents
            .values()
            .filter(|row| row.student_id == student_id)
            .map(|row| row.parent_id)
            .collect())
    }

    /// Return the Grade the given Student currently belongs to, if any
    async fn grade_of_student(
        &self,
        _opctx: &OpContext,
        student_id: Uuid,
    ) -> Result<Option<Uuid>, Error> {
        let tables = self.tables.lock().await;
        Ok(tables.students.get(&student_id).and_then(|row| row.grade_id))
    }
}
