// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Teacher`]s

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
use registrar_db_model::Teacher;
use uuid::Uuid;

impl DataStore {
    /// Creates a new Teacher record (administrators only)
    pub async fn teacher_create(
        &self,
        opctx: &OpContext,
        teacher: Teacher,
    ) -> CreateResult<Teacher> {
        opctx.check_capability(
            ResourceType::Teacher,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if tables.teachers.contains_key(&teacher.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Teacher,
                object_name: teacher.id.to_string(),
            });
        }
        tables.teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    /// Lists Teachers
    ///
    /// Teacher records are visible to every authenticated, non-pending
    /// actor, so the scope here is either everything or (for pending and
    /// unlinked actors) nothing.
    pub async fn teachers_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Teacher> {
        let scope = opctx.visible_scope(ResourceType::Teacher).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .teachers
            .values()
            .filter(|_| scope.allows(&authz::ScopeKey::Public))
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Teacher by id
    pub async fn teacher_fetch(
        &self,
        opctx: &OpContext,
        teacher_id: Uuid,
    ) -> LookupResult<(authz::Teacher, Teacher)> {
        let authz_teacher = authz::Record::teacher(teacher_id);
        opctx.authorize(authz::Action::Read, &authz_teacher).await?;

        let tables = self.tables.lock().await;
        let row = tables
            .teachers
            .get(&teacher_id)
            .cloned()
            .ok_or_else(|| authz_teacher.not_found())?;
        Ok((authz_teacher, row))
    }

    /// Replaces a Teacher record (administrators only)
    pub async fn teacher_update(
        &self,
        opctx: &OpContext,
        teacher_id: Uuid,
        update: Teacher,
    ) -> UpdateResult<Teacher> {
        let authz_teacher = authz::Record::teacher(teacher_id);
        opctx.authorize(authz::Action::Modify, &authz_teacher).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .teachers
            .get_mut(&teacher_id)
            .ok_or_else(|| authz_teacher.not_found())?;
        *row = Teacher { id: teacher_id, ..update };
        Ok(row.clone())
    }

    /// Deletes a Teacher, clearing the nullable references from Grades and
    /// Subjects
    ///
    /// Grades and Subjects are not owned by the Teacher, so they survive.
    pub async fn teacher_delete(
        &self,
        opctx: &OpContext,
        teacher_id: Uuid,
    ) -> DeleteResult {
        let authz_teacher = authz::Record::teacher(teacher_id);
        opctx.authorize(authz::Action::Delete, &authz_teacher).await?;

        let mut tables = self.tables.lock().await;
        if tables.teachers.remove(&teacher_id).is_none() {
            return Err(authz_teacher.not_found());
        }
        for grade in tables.grades.values_mut() {
            if grade.teacher_id == Some(teacher_id) {
                grade.teacher_id = None;
            }
        }
        for subject in tables.subjects.values_mut() {
            if subject.teacher_id == Some(teacher_id) {
                subject.teacher_id = None;
            }
        }
        Ok(())
    }
}
