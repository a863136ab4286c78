// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Grade`]s

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
use registrar_db_model::Grade;
use slog::debug;
use uuid::Uuid;

impl DataStore {
    /// Creates a new Grade (administrators only)
    pub async fn grade_create(
        &self,
        opctx: &OpContext,
        grade: Grade,
    ) -> CreateResult<Grade> {
        opctx
            .check_capability(ResourceType::Grade, authz::Action::CreateChild)?;

        let mut tables = self.tables.lock().await;
        if tables.grades.contains_key(&grade.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Grade,
                object_name: grade.id.to_string(),
            });
        }
        tables.grades.insert(grade.id, grade.clone());
        Ok(grade)
    }

    /// Lists the Grades within the caller's visible set
    ///
    /// A student sees the Grade containing their own Student; a parent sees
    /// the union of Grades containing any of their children.
    pub async fn grades_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Grade> {
        let scope = opctx.visible_scope(ResourceType::Grade).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .grades
            .values()
            .filter(|row| scope.allows(&authz::ScopeKey::Grade(row.id)))
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Grade by id
    pub async fn grade_fetch(
        &self,
        opctx: &OpContext,
        grade_id: Uuid,
    ) -> LookupResult<(authz::Grade, Grade)> {
        let authz_grade = authz::Record::grade(grade_id);
        opctx.authorize(authz::Action::Read, &authz_grade).await?;

        let tables = self.tables.lock().await;
        let row = tables
            .grades
            .get(&grade_id)
            .cloned()
            .ok_or_else(|| authz_grade.not_found())?;
        Ok((authz_grade, row))
    }

    /// Replaces a Grade record (administrators only)
    pub async fn grade_update(
        &self,
        opctx: &OpContext,
        grade_id: Uuid,
        update: Grade,
    ) -> UpdateResult<Grade> {
        let authz_grade = authz::Record::grade(grade_id);
        opctx.authorize(authz::Action::Modify, &authz_grade).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .grades
            .get_mut(&grade_id)
            .ok_or_else(|| authz_grade.not_found())?;
        *row = Grade { id: grade_id, ..update };
        Ok(row.clone())
    }

    /// Deletes a Grade, the Attendance and Enrollment rows anchored to it,
    /// and clears the (nullable) reference on Students that belonged to it
    pub async fn grade_delete(
        &self,
        opctx: &OpContext,
        grade_id: Uuid,
    ) -> DeleteResult {
        let authz_grade = authz::Record::grade(grade_id);
        opctx.authorize(authz::Action::Delete, &authz_grade).await?;

        let mut tables = self.tables.lock().await;
        if tables.grades.remove(&grade_id).is_none() {
            return Err(authz_grade.not_found());
        }

        tables.attendances.retain(|_, row| row.grade_id != grade_id);
        tables.enrollments.retain(|_, row| row.grade_id != grade_id);
        for student in tables.students.values_mut() {
            if student.grade_id == Some(grade_id) {
                student.grade_id = None;
            }
        }

        debug!(self.log, "deleted grade and anchored records";
            "grade_id" => grade_id.to_string());
        Ok(())
    }
}
