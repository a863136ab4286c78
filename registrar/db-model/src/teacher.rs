// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Describes a teacher, as stored in the system of record
///
/// Teacher records are visible to every authenticated, non-pending actor.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

/// Describes a taught subject, as stored in the system of record
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    /// non-owning, nullable
    pub teacher_id: Option<Uuid>,
}
