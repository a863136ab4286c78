// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A daily attendance mark, anchored to exactly one Student and one Grade
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub grade_id: Uuid,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}
