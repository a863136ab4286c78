// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facilities for working with the system of record

pub mod datastore;
pub mod pagination;

pub use datastore::DataStore;
pub use registrar_db_model as model;
