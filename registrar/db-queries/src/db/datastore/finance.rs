// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DataStore`] methods on [`Invoice`]s and [`Payment`]s
//!
//! Financial records are admin-and-family only.  Nothing in this file
//! special-cases that: the scopes and object checks come out of the policy
//! like everything else's, and the policy excludes teachers from these two
//! families outright.

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
use registrar_db_model::Invoice;
use registrar_db_model::Payment;
use uuid::Uuid;

impl DataStore {
    /// Issues a new Invoice (administrators only)
    pub async fn invoice_create(
        &self,
        opctx: &OpContext,
        invoice: Invoice,
    ) -> CreateResult<Invoice> {
        opctx.check_capability(
            ResourceType::Invoice,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.students.contains_key(&invoice.student_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Student,
                &invoice.student_id,
            ));
        }
        if tables.invoices.contains_key(&invoice.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Invoice,
                object_name: invoice.id.to_string(),
            });
        }
        tables.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    /// Lists the Invoices within the caller's visible set
    pub async fn invoices_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Invoice> {
        let scope = opctx.visible_scope(ResourceType::Invoice).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .invoices
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(Some(row.student_id)))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Invoice by id
    pub async fn invoice_fetch(
        &self,
        opctx: &OpContext,
        invoice_id: Uuid,
    ) -> LookupResult<(authz::Invoice, Invoice)> {
        let (authz_invoice, row) = {
            let tables = self.tables.lock().await;
            let row = tables.invoices.get(&invoice_id).cloned();
            let authz_invoice = authz::Record::student_anchored(
                ResourceType::Invoice,
                invoice_id,
                row.as_ref().map(|row| row.student_id),
            );
            (authz_invoice, row)
        };
        opctx.authorize(authz::Action::Read, &authz_invoice).await?;
        let row = row.ok_or_else(|| authz_invoice.not_found())?;
        Ok((authz_invoice, row))
    }

    /// Replaces an Invoice record (administrators only)
    ///
    /// `status` carries no transition rules; moving from Paid back to
    /// Pending is accepted.
    pub async fn invoice_update(
        &self,
        opctx: &OpContext,
        invoice_id: Uuid,
        update: Invoice,
    ) -> UpdateResult<Invoice> {
        let authz_invoice = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Invoice,
                invoice_id,
                tables.invoices.get(&invoice_id).map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Modify, &authz_invoice).await?;

        let mut tables = self.tables.lock().await;
        let row = tables
            .invoices
            .get_mut(&invoice_id)
            .ok_or_else(|| authz_invoice.not_found())?;
        *row = Invoice { id: invoice_id, ..update };
        Ok(row.clone())
    }

    /// Deletes an Invoice and the Payments made against it
    pub async fn invoice_delete(
        &self,
        opctx: &OpContext,
        invoice_id: Uuid,
    ) -> DeleteResult {
        let authz_invoice = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Invoice,
                invoice_id,
                tables.invoices.get(&invoice_id).map(|row| row.student_id),
            )
        };
        opctx.authorize(authz::Action::Delete, &authz_invoice).await?;

        let mut tables = self.tables.lock().await;
        if tables.invoices.remove(&invoice_id).is_none() {
            return Err(authz_invoice.not_found());
        }
        tables.payments.retain(|_, row| row.invoice_id != invoice_id);
        Ok(())
    }

    /// Records a Payment against an Invoice (administrators only)
    pub async fn payment_create(
        &self,
        opctx: &OpContext,
        payment: Payment,
    ) -> CreateResult<Payment> {
        opctx.check_capability(
            ResourceType::Payment,
            authz::Action::CreateChild,
        )?;

        let mut tables = self.tables.lock().await;
        if !tables.invoices.contains_key(&payment.invoice_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Invoice,
                &payment.invoice_id,
            ));
        }
        if tables.payments.contains_key(&payment.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Payment,
                object_name: payment.id.to_string(),
            });
        }
        tables.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    /// Lists the Payments within the caller's visible set
    ///
    /// Each row's owning Student is resolved through its Invoice -- both
    /// hops, every time.
    pub async fn payments_list(
        &self,
        opctx: &OpContext,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<Payment> {
        let scope = opctx.visible_scope(ResourceType::Payment).await?;

        let tables = self.tables.lock().await;
        let rows = tables
            .payments
            .values()
            .filter(|row| {
                scope.allows(&authz::ScopeKey::Anchored(
                    tables.payment_anchor(row),
                ))
            })
            .cloned()
            .collect();
        Ok(paginated_by_id(rows, pagparams, |row| row.id))
    }

    /// Fetches one Payment by id, resolving its anchor through the Invoice
    pub async fn payment_fetch(
        &self,
        opctx: &OpContext,
        payment_id: Uuid,
    ) -> LookupResult<(authz::Payment, Payment)> {
        let (authz_payment, row) = {
            let tables = self.tables.lock().await;
            let row = tables.payments.get(&payment_id).cloned();
            let authz_payment = authz::Record::student_anchored(
                ResourceType::Payment,
                payment_id,
                row.as_ref().and_then(|row| tables.payment_anchor(row)),
            );
            (authz_payment, row)
        };
        opctx.authorize(authz::Action::Read, &authz_payment).await?;
        let row = row.ok_or_else(|| authz_payment.not_found())?;
        Ok((authz_payment, row))
    }

    /// Deletes a Payment (administrators only)
    pub async fn payment_delete(
        &self,
        opctx: &OpContext,
        payment_id: Uuid,
    ) -> DeleteResult {
        let authz_payment = {
            let tables = self.tables.lock().await;
            authz::Record::student_anchored(
                ResourceType::Payment,
                payment_id,
                tables
                    .payments
                    .get(&payment_id)
                    .and_then(|row| tables.payment_anchor(row)),
            )
        };
        opctx.authorize(authz::Action::Delete, &authz_payment).await?;

        let mut tables = self.tables.lock().await;
        tables
            .payments
            .remove(&payment_id)
            .map(|_| ())
            .ok_or_else(|| authz_payment.not_found())
    }
}
