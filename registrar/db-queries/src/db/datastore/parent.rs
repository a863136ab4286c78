// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Parent`]s and the [`StudentParent`] rows
//! linking them to Students

use super::DataStore;
use crate::db::pagination::paginated_by_id;
use registrar_auth::authz;
use registrar_auth::context::OpContext;
use registrar_common::api::external::CreateResult;
use registrar_common::api::external::DataPageParams;
use registrar_common::api::external::DeleteResult;
use registrar_common::api::external::Error;
use registrar_common::api::external::ListResultVec;
use registrar_common::api::external::LookupResult;
use registrar_common::api::external::ResourceType;
use registrar_common::api::external::UpdateResult;
use registrar_db_model::Parent;
use registrar_db_model::StudentParent;
use uuid::Uuid;

impl DataStore {
    /// Creates a new Parent record (administrators only)
    pub async fn parent_create(
        &self,
        opctx: &OpContext,
        parent: Parent,
    ) -> CreateResult<Parent> {
        opctx
            .check_capability(ResourceType::Parent, authz::Action::CreateChild)?;

        let mut tables = self.tables.lock().await;
        if tables.parents.contains_key(&parent.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Parent,
                object_name: parent.id.to_string(),
            });
        }
        tables.parents.insert(parent.id, parent.clone());
        Ok(parent)
    }

    /// Lists the Parents within the caller's visible set
    ///
    /// For a parent that's themselves; for a student it's the Parents linked
    /// to their own Student profile.
    pub async fn parents_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Parent> {
        let scope = opctx.visible_scope(ResourceType::Parent).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .parents
            .values()
            .filter(|row| scope.allows(&authz::ScopeKey::Parent(row.id)))
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Parent by id
    pub async fn parent_fetch(
        &self,
        opctx: &OpContext,
        parent_id: Uuid,
    ) -> LookupResult<(authz::Parent, Parent)> {
        let authz_parent = authz::Record::parent(parent_id);
        opctx.authorize(authz::Action::Read, &authz_parent).await?;

        let tables = self.tables.lock().await;
        let row = tables
            .parents
            .get(&parent_id)
            .cloned()
            .ok_or_else(|| authz_parent.not_found())?;
        Ok((authz_parent, row))
    }

    /// Replaces a Parent record (administrators only)
    pub async fn parent_update(
        &self,
        opctx: &OpContext,
        parent_id: Uuid,
        update: Parent,
    ) -> UpdateResult<Parent> {
        let authz_parent = authz::Record::parent(parent_id);
        opctx.authorize(authz::Action::Modify, &authz_parent).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .parents
            .get_mut(&parent_id)
            .ok_or_else(|| authz_parent.not_found())?;
        *row = Parent { id: parent_id, ..update };
        Ok(row.clone())
    }

    /// Deletes a Parent along with its StudentParent links
    ///
    /// Students are never deleted this way; only the links go.
    pub async fn parent_delete(
        &self,
        opctx: &OpContext,
        parent_id: Uuid,
    ) -> DeleteResult {
        let authz_parent = authz::Record::parent(parent_id);
        opctx.authorize(authz::Action::Delete, &authz_parent).await?;

        let mut tables = self.tables.lock().await;
        if tables.parents.remove(&parent_id).is_none() {
            return Err(authz_parent.not_found());
        }
        tables.student_parents.retain(|_, row| row.parent_id != parent_id);
        Ok(())
    }

    /// Creates a StudentParent link (administrators only)
    ///
    /// This is the only way a Parent gains reach to a Student; there is no
    /// direct Parent→Student reference to set anywhere else.
    pub async fn student_parent_create(
        &self,
        opctx: &OpContext,
        link: StudentParent,
    ) -> CreateResult<StudentParent> {
        opctx.check_capability(
            ResourceType::StudentParent,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.students.contains_key(&link.student_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Student,
                &link.student_id,
            ));
        }
        if !tables.parents.contains_key(&link.parent_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Parent,
                &link.parent_id,
            ));
        }
        if tables.student_parents.contains_key(&link.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::StudentParent,
                object_name: link.id.to_string(),
            });
        }
        tables.student_parents.insert(link.id, link.clone());
        Ok(link)
    }

    /// Lists the StudentParent links within the caller's visible set
    /// (anchored to the Students within reach, like other dependent records)
    pub async fn student_parents_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<StudentParent> {
        let scope = opctx.visible_scope(ResourceType::StudentParent).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .student_parents
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(Some(row.student_id)))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one StudentParent link by id
    pub async fn student_parent_fetch(
        &self,
        opctx: &OpContext,
        link_id: Uuid,
    ) -> LookupResult<(authz::StudentParent, StudentParent)> {
        let (authz_link, row) = {
            let tables = self.tables.lock().await;
            let row = tables.student_parents.get(&link_id).cloned();
            let authz_link = authz::Record::student_anchored(
                ResourceType::StudentParent,
                link_id,
                row.as_ref().map(|row| row.student_id),
            );
            (authz_link, row)
        };
        opctx.authorize(authz::Action::Read, &authz_link).await?;
        let row = row.ok_or_else(|| authz_link.not_found())?;
        Ok((authz_link, row))
    }

    /// Removes a StudentParent link (administrators only)
    pub async fn student_parent_delete(
        &self,
        opctx: &OpContext,
        link_id: Uuid,
    ) -> DeleteResult {
        let (authz_link, exists) = {
            let tables = self.tables.lock().await;
            let row = tables.student_parents.get(&link_id);
            let authz_link = authz::Record::student_anchored(
                ResourceType::StudentParent,
                link_id,
                row.map(|row| row.student_id),
            );
            (authz_link, row.is_some())
        };
        opctx.authorize(authz::Action::Delete, &authz_link).await?;
        if !exists {
            return Err(authz_link.not_found());
        }

        let mut tables = self.tables.lock().await;
        tables.student_parents.remove(&link_id);
        Ok(())
    }
}
