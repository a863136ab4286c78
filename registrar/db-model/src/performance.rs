// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// An exam result, anchored to exactly one Student and one Subject
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Performance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub score: i32,
    pub exam_type: ExamType,
    pub academic_year: i32,
    pub term: Term,
    /// set at creation, immutable thereafter
    pub date_entered: NaiveDate,
}

impl Performance {
    pub fn new(
        id: Uuid,
        student_id: Uuid,
        subject_id: Uuid,
        score: i32,
        exam_type: ExamType,
        academic_year: i32,
        term: Term,
        date_entered: NaiveDate,
    ) -> Self {
        Performance {
            id,
            student_id,
            subject_id,
            score,
            exam_type,
            academic_year,
            term,
            date_entered,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ExamType {
    /// continuous assessment test
    Cat,
    /// random assessment test
    Rat,
    /// final exam
    Final,
}

/// Academic term, shared by Performance and Invoice
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Term {
    One,
    Two,
    Three,
}
