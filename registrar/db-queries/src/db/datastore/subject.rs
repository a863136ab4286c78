// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Subject`]s

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
use registrar_db_model::Subject;
use uuid::Uuid;

impl DataStore {
    /// Creates a new Subject (administrators only)
    pub async fn subject_create(
        &self,
        opctx: &OpContext,
        subject: Subject,
    ) -> CreateResult<Subject> {
        opctx.check_capability(
            ResourceType::Subject,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if tables.subjects.contains_key(&subject.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Subject,
                object_name: subject.id.to_string(),
            });
        }
        tables.subjects.insert(subject.id, subject.clone());
        Ok(subject)
    }

    /// Lists Subjects (visible to every authenticated, non-pending actor)
    pub async fn subjects_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Subject> {
        let scope = opctx.visible_scope(ResourceType::Subject).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .subjects
            .values()
            .filter(|_| scope.allows(&authz::ScopeKey::Public))
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Subject by id
    pub async fn subject_fetch(
        &self,
        opctx: &OpContext,
        subject_id: Uuid,
    ) -> LookupResult<(authz::Subject, Subject)> {
        let authz_subject = authz::Record::subject(subject_id);
        opctx.authorize(authz::Action::Read, &authz_subject).await?;

        let tables = self.tables.lock().await;
        let row = tables
            .subjects
            .get(&subject_id)
            .cloned()
            .ok_or_else(|| authz_subject.not_found())?;
        Ok((authz_subject, row))
    }

    /// Replaces a Subject record (administrators only)
    pub async fn subject_update(
        &self,
        opctx: &OpContext,
        subject_id: Uuid,
        update: Subject,
    ) -> UpdateResult<Subject> {
        let authz_subject = authz::Record::subject(subject_id);
        opctx.authorize(authz::Action::Modify, &authz_subject).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .subjects
            .get_mut(&subject_id)
            .ok_or_else(|| authz_subject.not_found())?;
        *row = Subject { id: subject_id, ..update };
        Ok(row.clone())
    }

    /// Deletes a Subject and the Performance records anchored to it
    pub async fn subject_delete(
        &self,
        opctx: &OpContext,
        subject_id: Uuid,
    ) -> DeleteResult {
        let authz_subject = authz::Record::subject(subject_id);
        opctx.authorize(authz::Action::Delete, &authz_subject).await?;

        let mut tables = self.tables.lock().await;
        if tables.subjects.remove(&subject_id).is_none() {
            return Err(authz_subject.not_found());
        }
        tables.performances.retain(|_, row| row.subject_id != subject_id);
        Ok(())
    }
}
