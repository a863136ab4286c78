// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Enrollment`]s

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
use registrar_db_model::Enrollment;
use uuid::Uuid;

impl DataStore {
    /// Records an Enrollment (administrators only)
    pub async fn enrollment_create(
        &self,
        opctx: &OpContext,
        enrollment: Enrollment,
    ) -> CreateResult<Enrollment> {
        opctx.check_capability(
            ResourceType::Enrollment,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.students.contains_key(&enrollment.student_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Student,
                &enrollment.student_id,
            ));
        }
        if !tables.grades.contains_key(&enrollment.grade_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Grade,
                &enrollment.grade_id,
            ));
        }
        if tables.enrollments.contains_key(&enrollment.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Enrollment,
                object_name: enrollment.id.to_string(),
            });
        }
        tables.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    /// Lists the Enrollments within the caller's visible set
    pub async fn enrollments_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Enrollment> {
        let scope = opctx.visible_scope(ResourceType::Enrollment).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .enrollments
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(Some(row.student_id)))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Enrollment by id
    pub async fn enrollment_fetch(
        &self,
        opctx: &OpContext,
        enrollment_id: Uuid,
    ) -> LookupResult<(authz::Enrollment, Enrollment)> {
        let (authz_enrollment, row) = {
            let tables = self.tables.lock().await;
            let row = tables.enrollments.get(&enrollment_id).cloned();
            let authz_enrollment = authz::Record::student_anchored(
                ResourceType::Enrollment,
                enrollment_id,
                row.as_ref().map(|row| row.student_id),
            );
            (authz_enrollment, row)
        };
        opctx.authorize(authz::Action::Read, &authz_enrollment).await?;
        let row = row.ok_or_else(|| authz_enrollment.not_found())?;
        Ok((authz_enrollment, row))
    }

    /// Replaces an Enrollment record (administrators only)
    ///
    /// `date_left` and `status` are free-form; no transition rules are
    /// enforced between Enrolled and Left.
    pub async fn enrollment_update(
        &self,
        opctx: &OpContext,
        enrollment_id: Uuid,
        update: Enrollment,
    ) -> UpdateResult<Enrollment> {
        let authz_enrollment = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Enrollment,
                enrollment_id,
                tables
                    .enrollments
                    .get(&enrollment_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Modify, &authz_enrollment).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .enrollments
            .get_mut(&enrollment_id)
            .ok_or_else(|| authz_enrollment.not_found())?;
        *row = Enrollment { id: enrollment_id, ..update };
        Ok(row.clone())
    }

    /// Deletes an Enrollment (administrators only)
    pub async fn enrollment_delete(
        &self,
        opctx: &OpContext,
        enrollment_id: Uuid,
    ) -> DeleteResult {
        let authz_enrollment = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Enrollment,
                enrollment_id,
                tables
                    .enrollments
                    .get(&enrollment_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Delete, &authz_enrollment).await?;

        let mut tables = self.tables.lock().await;
        tables
            .enrollments
            .remove(&enrollment_id)
            .map(|_| ())
            .ok_or_else(|| authz_enrollment.not_found())
    }
}
