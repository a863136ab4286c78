// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Describes a student, as stored in the system of record
///
/// `user_id` is the optional back-reference to the actor representing this
/// student.  A Student may exist with no linked actor (e.g., data entered
/// before account creation); visibility for the linked actor is derived from
/// this reference and is empty while it is absent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub status: StudentStatus,
    pub date_of_admission: NaiveDate,
    /// nullable: an ungraded or transitional student
    pub grade_id: Option<Uuid>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StudentStatus {
    Enrolled,
    Expelled,
    Suspended,
    Alumni,
    Transferred,
}
