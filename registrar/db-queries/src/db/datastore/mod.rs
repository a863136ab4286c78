// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primary control plane interface for the system of record
//!
//! The structure here follows the authorization design: every entry point
//! takes an `OpContext` and checks authorization before touching any row.
//! Single-record operations build an `authz::Record` whose scope key is
//! resolved by the same per-entity helpers the scoped listings use, so the
//! object checks and the listings cannot disagree about what an actor may
//! see.
//!
//! Storage itself is an in-memory table set.  The interesting property it
//! must preserve is the filter semantics: a scoped listing applies the
//! actor's `authz::Scope` in a single pass over one table, the way a
//! database-backed implementation would translate it to a single query.
//!
//! The tables sit behind one async mutex.  Entry points authorize *before*
//! locking (authorization itself reads relationship tables through
//! [`registrar_auth::storage::Storage`]) and never hold the lock across an
//! await of anything but the lock itself.

use registrar_db_model::Attendance;
use registrar_db_model::Enrollment;
use registrar_db_model::Grade;
use registrar_db_model::Invoice;
use registrar_db_model::Parent;
use registrar_db_model::Payment;
use registrar_db_model::Performance;
use registrar_db_model::Student;
use registrar_db_model::StudentParent;
use registrar_db_model::Subject;
use registrar_db_model::Teacher;
use slog::Logger;
use slog::o;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use uuid::Uuid;

mod attendance;
mod auth;
mod enrollment;
mod finance;
mod grade;
mod parent;
mod performance;
mod student;
mod subject;
mod teacher;

#[cfg(test)]
pub(crate) mod test_utils;

/// The system of record
pub struct DataStore {
    log: Logger,
    tables: Mutex<Tables>,
}

impl DataStore {
    pub fn new(log: &Logger) -> DataStore {
        DataStore {
            log: log.new(o!("component" => "datastore")),
            tables: Mutex::new(Tables::default()),
        }
    }
}

/// The tables making up the relational domain, keyed by id
#[derive(Default)]
pub(super) struct Tables {
    pub students: BTreeMap<Uuid, Student>,
    pub parents: BTreeMap<Uuid, Parent>,
    pub student_parents: BTreeMap<Uuid, StudentParent>,
    pub grades: BTreeMap<Uuid, Grade>,
    pub teachers: BTreeMap<Uuid, Teacher>,
    pub subjects: BTreeMap<Uuid, Subject>,
    pub performances: BTreeMap<Uuid, Performance>,
    pub attendances: BTreeMap<Uuid, Attendance>,
    pub invoices: BTreeMap<Uuid, Invoice>,
    pub payments: BTreeMap<Uuid, Payment>,
    pub enrollments: BTreeMap<Uuid, Enrollment>,
}

impl Tables {
    /// Resolves the Student anchoring a Payment
    ///
    /// Payment is the one dependent record whose owning Student is reached
    /// via an extra hop (Payment→Invoice→Student), so both hops happen here,
    /// in the one place listings and lookups share.  A missing Invoice
    /// leaves the chain broken, which no non-admin scope admits.
    pub fn payment_anchor(&self, payment: &Payment) -> Option<Uuid> {
        self.invoices
            .get(&payment.invoice_id)
            .map(|invoice| invoice.student_id)
    }
}
