// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Describes a class/cohort ("grade"), as stored in the system of record
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Grade {
    pub id: Uuid,
    pub name: String,
    pub stream: String,
    /// homeroom teacher; non-owning, nullable
    pub teacher_id: Option<Uuid>,
}
