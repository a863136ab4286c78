// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structures stored in the system of record
//!
//! Every dependent record here (Performance, Attendance, Invoice, Payment,
//! Enrollment) resolves to exactly one Student through its anchor chain.
//! Visibility is always computed by walking that chain; none of these
//! structures carries a denormalized owner field.

mod attendance;
mod enrollment;
mod finance;
mod grade;
mod parent;
mod performance;
mod student;
mod teacher;

pub use attendance::*;
pub use enrollment::*;
pub use finance::*;
pub use grade::*;
pub use parent::*;
pub use performance::*;
pub use student::*;
pub use teacher::*;
