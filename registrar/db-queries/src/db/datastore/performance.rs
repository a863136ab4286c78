// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Performance`] records

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
use registrar_db_model::Performance;
use uuid::Uuid;

impl DataStore {
    /// Records a new Performance (administrators only)
    pub async fn performance_create(
        &self,
        opctx: &OpContext,
        performance: Performance,
    ) -> CreateResult<Performance> {
        opctx.check_capability(
            ResourceType::Performance,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.students.contains_key(&performance.student_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Student,
                &performance.student_id,
            ));
        }
        if !tables.subjects.contains_key(&performance.subject_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Subject,
                &performance.subject_id,
            ));
        }
        if tables.performances.contains_key(&performance.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Performance,
                object_name: performance.id.to_string(),
            });
        }
        tables.performances.insert(performance.id, performance.clone());
        Ok(performance)
    }

    /// Lists the Performance records within the caller's visible set
    pub async fn performances_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Performance> {
        let scope = opctx.visible_scope(ResourceType::Performance).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .performances
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(Some(row.student_id)))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Performance record by id
    pub async fn performance_fetch(
        &self,
        opctx: &OpContext,
        performance_id: Uuid,
    ) -> LookupResult<(authz::Performance, Performance)> {
        let (authz_performance, row) = {
            let tables = self.tables.lock().await;
            let row = tables.performances.get(&performance_id).cloned();
            let authz_performance = authz::Record::student_anchored(
                ResourceType::Performance,
                performance_id,
                row.as_ref().map(|row| row.student_id),
            );
            (authz_performance, row)
        };
        opctx.authorize(authz::Action::Read, &authz_performance).await?;
        let row = row.ok_or_else(|| authz_performance.not_found())?;
        Ok((authz_performance, row))
    }

    /// Replaces a Performance record (administrators only)
    ///
    /// `date_entered` is set at creation and preserved here no matter what
    /// the update carries.
    pub async fn performance_update(
        &self,
        opctx: &OpContext,
        performance_id: Uuid,
        update: Performance,
    ) -> UpdateResult<Performance> {
        let authz_performance = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Performance,
                performance_id,
                tables
                    .performances
                    .get(&performance_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Modify, &authz_performance).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .performances
            .get_mut(&performance_id)
            .ok_or_else(|| authz_performance.not_found())?;
        *row = Performance {
            id: performance_id,
            date_entered: row.date_entered,
            ..update
        };
        Ok(row.clone())
    }

    /// Deletes a Performance record (administrators only)
    pub async fn performance_delete(
        &self,
        opctx: &OpContext,
        performance_id: Uuid,
    ) -> DeleteResult {
        let authz_performance = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Performance,
                performance_id,
                tables
                    .performances
                    .get(&performance_id)
                    .map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Delete, &authz_performance).await?;

        let mut tables = self.tables.lock().await;
        tables
            .performances
            .remove(&performance_id)
            .map(|_| ())
            .ok_or_else(|| authz_performance.not_found())
    }
}
