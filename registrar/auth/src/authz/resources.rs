// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authz types for records in the system of record
//!
//! These are newtype-ish handles that capture just the parts of a record the
//! policy needs: what kind of record it is, how it is matched against a
//! visible set, and how it was looked up (so a denial can be reported as
//! "not found" without leaking that the record exists).  Consumers that want
//! to do an authz check almost always want to keep using the model row they
//! fetched; the datastore's lookup functions therefore return one of these
//! alongside the row.
//!
//! All record kinds are represented by the one [`Record`] struct: the scope
//! key already captures everything that distinguishes them for authorization
//! purposes.  The aliases below exist so that datastore signatures read as
//! `authz::Invoice` rather than `authz::Record`.

use super::policy::ScopeKey;
use registrar_common::api::external::Error;
use registrar_common::api::external::LookupType;
use registrar_common::api::external::ResourceType;
use uuid::Uuid;

/// Represents a record in the system of record for authz purposes
///
/// This object is used for authorization checks on a record by passing it as
/// the `resource` argument to [`crate::context::OpContext::authorize()`].
/// You typically construct one through the datastore's lookup functions,
/// which resolve the record's anchor chain; constructing one by hand with a
/// wrong scope key would make the object check disagree with the scoped
/// listings.
#[derive(Clone, Debug)]
pub struct Record {
    resource_type: ResourceType,
    key: ScopeKey,
    lookup_type: LookupType,
}

impl Record {
    pub fn new(
        resource_type: ResourceType,
        key: ScopeKey,
        lookup_type: LookupType,
    ) -> Record {
        Record { resource_type, key, lookup_type }
    }

    /// Returns an authz record for a Student row
    pub fn student(id: Uuid) -> Record {
        Record::new(
            ResourceType::Student,
            ScopeKey::Student(id),
            LookupType::ById(id),
        )
    }

    /// Returns an authz record for a Parent row
    pub fn parent(id: Uuid) -> Record {
        Record::new(
            ResourceType::Parent,
            ScopeKey::Parent(id),
            LookupType::ById(id),
        )
    }

    /// Returns an authz record for a Grade row
    pub fn grade(id: Uuid) -> Record {
        Record::new(
            ResourceType::Grade,
            ScopeKey::Grade(id),
            LookupType::ById(id),
        )
    }

    /// Returns an authz record for a Teacher row (globally visible)
    pub fn teacher(id: Uuid) -> Record {
        Record::new(
            ResourceType::Teacher,
            ScopeKey::Public,
            LookupType::ById(id),
        )
    }

    /// Returns an authz record for a Subject row (globally visible)
    pub fn subject(id: Uuid) -> Record {
        Record::new(
            ResourceType::Subject,
            ScopeKey::Public,
            LookupType::ById(id),
        )
    }

    /// Returns an authz record for a dependent record whose anchor chain was
    /// resolved to `student_id`
    ///
    /// The caller is the datastore, which resolves the chain with the same
    /// helper it uses to filter listings.  `student_id` is `None` only for a
    /// record whose chain is broken (e.g., a Payment whose Invoice is gone);
    /// such a record is invisible to everyone but an administrator.
    pub fn student_anchored(
        resource_type: ResourceType,
        id: Uuid,
        student_id: Option<Uuid>,
    ) -> Record {
        Record::new(
            resource_type,
            ScopeKey::Anchored(student_id),
            LookupType::ById(id),
        )
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn key(&self) -> &ScopeKey {
        &self.key
    }

    /// Returns an error as though this record were not found, suitable for
    /// use when an actor should not be able to see that this record exists
    pub fn not_found(&self) -> Error {
        self.lookup_type.clone().into_not_found(self.resource_type)
    }
}

pub type Student = Record;
pub type Parent = Record;
pub type StudentParent = Record;
pub type Grade = Record;
pub type Teacher = Record;
pub type Subject = Record;
pub type Performance = Record;
pub type Attendance = Record;
pub type Invoice = Record;
pub type Payment = Record;
pub type Enrollment = Record;
