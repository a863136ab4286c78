// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Describes a parent or guardian, as stored in the system of record
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Parent {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
}

/// Links a Parent to a Student
///
/// These rows are the *only* path from a Parent to Student visibility: there
/// is no direct Parent→Student foreign key anywhere else.  A Student may have
/// several of these (co-parents) and a Parent may link to several Students
/// (siblings).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StudentParent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub parent_id: Uuid,
    pub relationship_type: RelationshipType,
    pub is_primary_guardian: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RelationshipType {
    Mother,
    Father,
    Guardian,
}
