// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Attendance`] records

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
use registrar_db_model::Attendance;
use uuid::Uuid;

impl DataStore {
    /// Records an Attendance mark (administrators only)
    pub async fn attendance_create(
        &self,
        opctx: &OpContext,
        attendance: Attendance,
    ) -> CreateResult<Attendance> {
        opctx.check_capability(
            ResourceType::Attendance,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.students.contains_key(&attendance.student_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Student,
                &attendance.student_id,
            ));
        }
        if !tables.grades.contains_key(&attendance.grade_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Grade,
                &attendance.grade_id,
            ));
        }
        if tables.attendances.contains_key(&attendance.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Attendance,
                object_name: attendance.id.to_string(),
            });
        }
        tables.attendances.insert(attendance.id, attendance.clone());
        Ok(attendance)
    }

    /// Lists the Attendance records within the caller's visible set
    pub async fn attendances_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Attendance> {
        let scope = opctx.visible_scope(ResourceType::Attendance).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .attendances
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(Some(row.student_id)))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Attendance record by id
    pub async fn attendance_fetch(
        &self,
        opctx: &OpContext,
        attendance_id: Uuid,
    ) -> LookupResult<(authz::Attendance, Attendance)> {
        let (authz_attendance, row) = {
            let tables = self.tables.lock().await;
            let row = tables.attendances.get(&attendance_id).cloned();
            let authz_attendance = authz::Record::student_anchored(
                ResourceType::Attendance,
                attendance_id,
                row.as_ref().map(|row| row.student_id),
            );
            (authz_attendance, row)
        };
        opctx.authorize(authz::Action::Read, &authz_attendance).await?;
        let row = row.ok_or_else(|| authz_attendance.not_found())?;
        Ok((authz_attendance, row))
    }

    /// Replaces an Attendance record (administrators only)
    pub async fn attendance_update(
        &self,
        opctx: &OpContext,
        attendance_id: Uuid,
        update: Attendance,
    ) -> UpdateResult<Attendance> {
        let authz_attendance = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Attendance,
                attendance_id,
                tables
                    .attendances
                    .get(&attendance_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Modify, &authz_attendance).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .attendances
            .get_mut(&attendance_id)
            .ok_or_else(|| authz_attendance.not_found())?;
        *row = Attendance { id: attendance_id, ..update };
        Ok(row.clone())
    }

    /// Deletes an Attendance record (administrators only)
    pub async fn attendance_delete(
        &self,
        opctx: &OpContext,
        attendance_id: Uuid,
    ) -> DeleteResult {
        let authz_attendance = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Attendance,
                attendance_id,
                tables
                    .attendances
                    .get(&attendance_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Delete, &authz_attendance).await?;

        let mut tables = self.tables.lock().await;
        tables
            .attendances
            .remove(&attendance_id)
            .map(|_| ())
            .ok_or_else(|| authz_attendance.not_found())
    }
}
