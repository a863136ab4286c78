// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Registrar
//!
//! Registrar is the record-keeping core of a multi-tenant student records
//! system.  This crate implements common facilities used across the system.
//! Other top-level crates implement pieces of it (e.g., `registrar-auth`,
//! `registrar-db-queries`).
//!
//! Since this crate doesn't provide externally-consumable interfaces, the
//! rustdoc (generated with `--document-private-items`) is intended primarily
//! for engineers working on this crate.

// We only use rustdoc for internal documentation, including private items, so
// it's expected that we'll have links to private items in the docs.
#![allow(rustdoc::private_intra_doc_links)]

pub mod api;
