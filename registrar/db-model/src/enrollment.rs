// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// An enrollment of a Student into a Grade for an academic year
///
/// `date_left` and `status` are free-form: the engine enforces no transition
/// rules between Enrolled and Left.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub grade_id: Uuid,
    pub academic_year: i32,
    pub date_enrolled: NaiveDate,
    pub date_left: Option<NaiveDate>,
    pub status: EnrollmentStatus,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EnrollmentStatus {
    Enrolled,
    Left,
}
