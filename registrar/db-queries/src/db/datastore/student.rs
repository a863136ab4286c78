// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Student`]s

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
use registrar_db_model::Student;
use slog::debug;
use std::collections::BTreeSet;
use uuid::Uuid;

impl DataStore {
    /// Creates a new Student record (administrators only)
    pub async fn student_create(
        &self,
        opctx: &OpContext,
        student: Student,
    ) -> CreateResult<Student> {
        opctx.check_capability(
            ResourceType::Student,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if tables.students.contains_key(&student.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Student,
                object_name: student.id.to_string(),
            });
        }
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    /// Lists the Students within the caller's visible set
    pub async fn students_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Student> {
        let scope = opctx.visible_scope(ResourceType::Student).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .students
            .values()
            .filter(|row| scope.allows(&authz::ScopeKey::Student(row.id)))
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Student by id
    ///
    /// An id outside the caller's visible set produces the same error as an
    /// id that matches nothing.
    pub async fn student_fetch(
        &self,
        opctx: &OpContext,
        student_id: Uuid,
    ) -> LookupResult<(authz::Student, Student)> {
        let authz_student = authz::Record::student(student_id);
        opctx.authorize(authz::Action::Read, &authz_student).await?;

        let tables = self.tables.lock().await;
        let row = tables
            .students
            .get(&student_id)
            .cloned()
            .ok_or_else(|| authz_student.not_found())?;
        Ok((authz_student, row))
    }

    /// Replaces a Student record (administrators only)
    pub async fn student_update(
        &self,
        opctx: &OpContext,
        student_id: Uuid,
        update: Student,
    ) -> UpdateResult<Student> {
        let authz_student = authz::Record::student(student_id);
        opctx.authorize(authz::Action::Modify, &authz_student).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .students
            .get_mut(&student_id)
            .ok_or_else(|| authz_student.not_found())?;
        *row = Student { id: student_id, ..update };
        Ok(row.clone())
    }

    /// Deletes a Student and everything anchored to them: StudentParent
    /// links, Performance, Attendance and Enrollment rows, and Invoices with
    /// their Payments
    pub async fn student_delete(
        &self,
        opctx: &OpContext,
        student_id: Uuid,
    ) -> DeleteResult {
        let authz_student = authz::Record::student(student_id);
        opctx.authorize(authz::Action::Delete, &authz_student).await?;

        let mut tables = self.tables.lock().await;
        if tables.students.remove(&student_id).is_none() {
            return Err(authz_student.not_found());
        }

        tables.student_parents.retain(|_, row| row.student_id != student_id);
        tables.performances.retain(|_, row| row.student_id != student_id);
        tables.attendances.retain(|_, row| row.student_id != student_id);
        tables.enrollments.retain(|_, row| row.student_id != student_id);

        // Payments hang off Invoices, so collect the doomed Invoices first.
        let invoice_ids: BTreeSet<Uuid> = tables
            .invoices
            .values()
            .filter(|row| row.student_id == student_id)
            .map(|row| row.id)
            .collect();
        tables.invoices.retain(|_, row| row.student_id != student_id);
        tables
            .payments
            .retain(|_, row| !invoice_ids.contains(&row.invoice_id));

        debug!(self.log, "deleted student and anchored records";
            "student_id" => student_id.to_string());
        Ok(())
    }
}
