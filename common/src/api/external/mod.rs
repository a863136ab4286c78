// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data structures and related facilities for representing resources in the
//! API
//!
//! The contents here are all HTTP-agnostic.

mod error;
pub use error::*;

use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FormatResult;
use std::num::NonZeroU32;

// The type aliases below exist primarily to ensure consistency among return
// types for functions in `registrar_db_queries::DataStore`.

/// Result of a create operation for the specified type
pub type CreateResult<T> = Result<T, Error>;
/// Result of a delete operation for the specified type
pub type DeleteResult = Result<(), Error>;
/// Result of a list operation that returns a vector
pub type ListResultVec<T> = Result<Vec<T>, Error>;
/// Result of a lookup operation for the specified type
pub type LookupResult<T> = Result<T, Error>;
/// Result of an update operation for the specified type
pub type UpdateResult<T> = Result<T, Error>;

/// Parameters used to request a specific page of results when listing a
/// collection of objects
///
/// This is HTTP-agnostic: by the time this struct is constructed, we know the
/// type of the sort field and we can specialize `DataPageParams` to that
/// type.  Every collection here is sorted by id, so `MarkerType` is `Uuid` in
/// practice.
#[derive(Clone, Copy, Debug)]
pub struct DataPageParams<'a, MarkerType> {
    /// If present, this is the value of the sort field for the last object
    /// seen
    pub marker: Option<&'a MarkerType>,

    /// Whether the sort is in ascending order
    pub direction: PaginationOrder,

    /// This identifies how many results should be returned on this page.
    /// Backend implementations must provide this many results unless we're at
    /// the end of the scan.  The caller assumes that if we provide fewer
    /// results than this number, then we're done with the scan.
    pub limit: NonZeroU32,
}

/// The order in which a paginated scan walks its sort field
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PaginationOrder {
    Ascending,
    Descending,
}

/// Identifies a type of API resource
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum ResourceType {
    Student,
    Parent,
    StudentParent,
    Grade,
    Teacher,
    Subject,
    Performance,
    Attendance,
    Invoice,
    Payment,
    Enrollment,
}

impl ResourceType {
    /// Iterator over all resource types, used by policy tests to sweep the
    /// whole table
    pub fn all() -> impl Iterator<Item = ResourceType> {
        [
            ResourceType::Student,
            ResourceType::Parent,
            ResourceType::StudentParent,
            ResourceType::Grade,
            ResourceType::Teacher,
            ResourceType::Subject,
            ResourceType::Performance,
            ResourceType::Attendance,
            ResourceType::Invoice,
            ResourceType::Payment,
            ResourceType::Enrollment,
        ]
        .into_iter()
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(
            f,
            "{}",
            match self {
                ResourceType::Student => "student",
                ResourceType::Parent => "parent",
                ResourceType::StudentParent => "student parent link",
                ResourceType::Grade => "grade",
                ResourceType::Teacher => "teacher",
                ResourceType::Subject => "subject",
                ResourceType::Performance => "performance",
                ResourceType::Attendance => "attendance",
                ResourceType::Invoice => "invoice",
                ResourceType::Payment => "payment",
                ResourceType::Enrollment => "enrollment",
            }
        )
    }
}

/// The role claimed by an authenticated actor
///
/// Roles are mutually exclusive: an actor holds exactly one at a time.
/// Actors are created with [`Role::Pending`] at registration and only an
/// administrative action moves them to a terminal role.  Anything outside
/// this enumeration (including the absence of a recognized role) is treated
/// as `Pending`, which is denied everything.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
    Pending,
}

impl Role {
    /// Parses a role claim from the identity provider
    ///
    /// This is total: the match is case-insensitive and unrecognized values
    /// map to `Pending` rather than failing.  A malformed role must never
    /// grant standing, and it must never crash the policy engine either.
    pub fn parse(value: &str) -> Role {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "teacher" => Role::Teacher,
            "student" => Role::Student,
            "parent" => Role::Parent,
            _ => Role::Pending,
        }
    }

    /// Iterator over all roles, used by policy tests
    pub fn all() -> impl Iterator<Item = Role> {
        [
            Role::Admin,
            Role::Teacher,
            Role::Student,
            Role::Parent,
            Role::Pending,
        ]
        .into_iter()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(
            f,
            "{}",
            match self {
                Role::Admin => "admin",
                Role::Teacher => "teacher",
                Role::Student => "student",
                Role::Parent => "parent",
                Role::Pending => "pending",
            }
        )
    }
}
