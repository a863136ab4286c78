// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Financial records
//!
//! Invoice anchors directly to a Student.  Payment anchors to an Invoice and
//! therefore reaches its Student via one additional hop; every authorization
//! rule touching Payment must perform both hops.

use super::Term;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A term invoice, anchored to exactly one Student
///
/// Amounts are in cents.  `status` carries no engine-enforced state machine:
/// moving backward from Paid to Pending is accepted.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Invoice {
    pub id: Uuid,
    pub student_id: Uuid,
    pub total_amount_cents: i64,
    pub amount_due_cents: i64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub academic_year: i32,
    pub term: Term,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
}

/// A payment against an Invoice
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount_paid_cents: i64,
    pub method: String,
    pub date: NaiveDate,
    pub reference: String,
}
