// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared test setup: a small school with two families
//!
//! The graph is deliberately lopsided so that the interesting policy cases
//! all exist: a parent with two children in different grades, a student
//! with no linked actor, a student-role actor with no linked profile, and a
//! pending actor.
//!
//! ```text
//! actors:    admin  teacher-actor  alice-actor  bob-actor  dana-actor
//!            erin-actor  unlinked-student-actor  pending-actor
//!
//! teacher1 ── math (subject)
//!          ── grade4 (homeroom)
//!
//! bob ──┬── alice (grade4): perf, attendance, invoice+payment, enrollment
//!       └── carl  (grade5): enrollment
//! erin ──── dana  (grade4): perf, attendance, invoice+payment
//! (nobody) ─ frank (no grade, no actor)
//! ```

use super::DataStore;
use registrar_auth::authn;
use registrar_auth::context::OpContext;
use registrar_common::api::external::DataPageParams;
use registrar_common::api::external::PaginationOrder;
use registrar_common::api::external::Role;
use registrar_db_model::Attendance;
use registrar_db_model::AttendanceStatus;
use registrar_db_model::Enrollment;
use registrar_db_model::EnrollmentStatus;
use registrar_db_model::ExamType;
use registrar_db_model::Gender;
use registrar_db_model::Grade;
use registrar_db_model::Invoice;
use registrar_db_model::InvoiceStatus;
use registrar_db_model::Parent;
use registrar_db_model::Payment;
use registrar_db_model::Performance;
use registrar_db_model::RelationshipType;
use registrar_db_model::Student;
use registrar_db_model::StudentParent;
use registrar_db_model::StudentStatus;
use registrar_db_model::Subject;
use registrar_db_model::Teacher;
use registrar_db_model::Term;
use chrono::NaiveDate;
use slog::Logger;
use slog::o;
use std::num::NonZeroU32;
use std::sync::Arc;
use uuid::Uuid;

pub(crate) fn test_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// Page parameters big enough to see everything in one page
pub(crate) fn pagparams() -> DataPageParams<'static, Uuid> {
    DataPageParams {
        marker: None,
        direction: PaginationOrder::Ascending,
        limit: NonZeroU32::new(1000).unwrap(),
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn student(
    id: Uuid,
    user_id: Option<Uuid>,
    first_name: &str,
    last_name: &str,
    grade_id: Option<Uuid>,
) -> Student {
    Student {
        id,
        user_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: Gender::Other,
        date_of_birth: date(2012, 6, 15),
        address: "12 School Lane".to_string(),
        status: StudentStatus::Enrolled,
        date_of_admission: date(2024, 1, 8),
        grade_id,
    }
}

pub(crate) fn parent(id: Uuid, user_id: Option<Uuid>, name: &str) -> Parent {
    Parent {
        id,
        user_id,
        full_name: name.to_string(),
        address: "12 School Lane".to_string(),
        phone_number: "555-0100".to_string(),
    }
}

pub(crate) struct TestWorld {
    pub log: Logger,
    pub datastore: Arc<DataStore>,

    pub admin_user: Uuid,
    pub teacher_user: Uuid,
    pub alice_user: Uuid,
    pub bob_user: Uuid,
    pub dana_user: Uuid,
    pub erin_user: Uuid,
    pub unlinked_student_user: Uuid,
    pub pending_user: Uuid,

    pub grade4: Uuid,
    pub grade5: Uuid,
    pub teacher1: Uuid,
    pub math: Uuid,
    pub art: Uuid,

    pub alice: Uuid,
    pub carl: Uuid,
    pub dana: Uuid,
    pub frank: Uuid,
    pub bob: Uuid,
    pub erin: Uuid,

    pub sp_alice_bob: Uuid,
    pub sp_carl_bob: Uuid,
    pub sp_dana_erin: Uuid,

    pub perf_alice: Uuid,
    pub perf_dana: Uuid,
    pub att_alice: Uuid,
    pub att_dana: Uuid,
    pub inv_alice: Uuid,
    pub inv_dana: Uuid,
    pub pay_alice: Uuid,
    pub pay_dana: Uuid,
    pub enr_alice: Uuid,
    pub enr_carl: Uuid,
}

impl TestWorld {
    pub(crate) async fn setup() -> TestWorld {
        let log = test_logger();
        let datastore = Arc::new(DataStore::new(&log));

        let world = TestWorld {
            log,
            datastore,
            admin_user: Uuid::new_v4(),
            teacher_user: Uuid::new_v4(),
            alice_user: Uuid::new_v4(),
            bob_user: Uuid::new_v4(),
            dana_user: Uuid::new_v4(),
            erin_user: Uuid::new_v4(),
            unlinked_student_user: Uuid::new_v4(),
            pending_user: Uuid::new_v4(),
            grade4: Uuid::new_v4(),
            grade5: Uuid::new_v4(),
            teacher1: Uuid::new_v4(),
            math: Uuid::new_v4(),
            art: Uuid::new_v4(),
            alice: Uuid::new_v4(),
            carl: Uuid::new_v4(),
            dana: Uuid::new_v4(),
            frank: Uuid::new_v4(),
            bob: Uuid::new_v4(),
            erin: Uuid::new_v4(),
            sp_alice_bob: Uuid::new_v4(),
            sp_carl_bob: Uuid::new_v4(),
            sp_dana_erin: Uuid::new_v4(),
            perf_alice: Uuid::new_v4(),
            perf_dana: Uuid::new_v4(),
            att_alice: Uuid::new_v4(),
            att_dana: Uuid::new_v4(),
            inv_alice: Uuid::new_v4(),
            inv_dana: Uuid::new_v4(),
            pay_alice: Uuid::new_v4(),
            pay_dana: Uuid::new_v4(),
            enr_alice: Uuid::new_v4(),
            enr_carl: Uuid::new_v4(),
        };

        world.seed().await;
        world
    }

    async fn seed(&self) {
        let opctx = self.admin_opctx();
        let datastore = &self.datastore;

        datastore
            .teacher_create(
                &opctx,
                Teacher {
                    id: self.teacher1,
                    user_id: Some(self.teacher_user),
                    full_name: "Rahel Mwangi".to_string(),
                    phone_number: "555-0101".to_string(),
                    email: "rmwangi@example.edu".to_string(),
                },
            )
            .await
            .unwrap();

        for grade in [
            Grade {
                id: self.grade4,
                name: "Grade 4".to_string(),
                stream: "West".to_string(),
                teacher_id: Some(self.teacher1),
            },
            Grade {
                id: self.grade5,
                name: "Grade 5".to_string(),
                stream: "East".to_string(),
                teacher_id: None,
            },
        ] {
            datastore.grade_create(&opctx, grade).await.unwrap();
        }

        for subject in [
            Subject {
                id: self.math,
                name: "Mathematics".to_string(),
                teacher_id: Some(self.teacher1),
            },
            Subject {
                id: self.art,
                name: "Art".to_string(),
                teacher_id: None,
            },
        ] {
            datastore.subject_create(&opctx, subject).await.unwrap();
        }

        for row in [
            student(
                self.alice,
                Some(self.alice_user),
                "Alice",
                "Abara",
                Some(self.grade4),
            ),
            student(self.carl, None, "Carl", "Abara", Some(self.grade5)),
            student(
                self.dana,
                Some(self.dana_user),
                "Dana",
                "Duma",
                Some(self.grade4),
            ),
            student(self.frank, None, "Frank", "Farai", None),
        ] {
            datastore.student_create(&opctx, row).await.unwrap();
        }

        for row in [
            parent(self.bob, Some(self.bob_user), "Bob Abara"),
            parent(self.erin, Some(self.erin_user), "Erin Duma"),
        ] {
            datastore.parent_create(&opctx, row).await.unwrap();
        }

        for link in [
            StudentParent {
                id: self.sp_alice_bob,
                student_id: self.alice,
                parent_id: self.bob,
                relationship_type: RelationshipType::Father,
                is_primary_guardian: true,
            },
            StudentParent {
                id: self.sp_carl_bob,
                student_id: self.carl,
                parent_id: self.bob,
                relationship_type: RelationshipType::Father,
                is_primary_guardian: true,
            },
            StudentParent {
                id: self.sp_dana_erin,
                student_id: self.dana,
                parent_id: self.erin,
                relationship_type: RelationshipType::Mother,
                is_primary_guardian: true,
            },
        ] {
            datastore.student_parent_create(&opctx, link).await.unwrap();
        }

        for row in [
            Performance::new(
                self.perf_alice,
                self.alice,
                self.math,
                88,
                ExamType::Final,
                2025,
                Term::One,
                date(2025, 4, 2),
            ),
            Performance::new(
                self.perf_dana,
                self.dana,
                self.art,
                71,
                ExamType::Cat,
                2025,
                Term::One,
                date(2025, 3, 18),
            ),
        ] {
            datastore.performance_create(&opctx, row).await.unwrap();
        }

        for row in [
            Attendance {
                id: self.att_alice,
                student_id: self.alice,
                grade_id: self.grade4,
                status: AttendanceStatus::Present,
                date: date(2025, 5, 6),
            },
            Attendance {
                id: self.att_dana,
                student_id: self.dana,
                grade_id: self.grade4,
                status: AttendanceStatus::Absent,
                date: date(2025, 5, 6),
            },
        ] {
            datastore.attendance_create(&opctx, row).await.unwrap();
        }

        for row in [
            Invoice {
                id: self.inv_alice,
                student_id: self.alice,
                total_amount_cents: 150_000,
                amount_due_cents: 50_000,
                due_date: date(2025, 6, 1),
                status: InvoiceStatus::Pending,
                academic_year: 2025,
                term: Term::One,
            },
            Invoice {
                id: self.inv_dana,
                student_id: self.dana,
                total_amount_cents: 150_000,
                amount_due_cents: 0,
                due_date: date(2025, 6, 1),
                status: InvoiceStatus::Paid,
                academic_year: 2025,
                term: Term::One,
            },
        ] {
            datastore.invoice_create(&opctx, row).await.unwrap();
        }

        for row in [
            Payment {
                id: self.pay_alice,
                invoice_id: self.inv_alice,
                amount_paid_cents: 100_000,
                method: "mobile money".to_string(),
                date: date(2025, 5, 20),
                reference: "MM-77120".to_string(),
            },
            Payment {
                id: self.pay_dana,
                invoice_id: self.inv_dana,
                amount_paid_cents: 150_000,
                method: "bank transfer".to_string(),
                date: date(2025, 5, 11),
                reference: "BT-10291".to_string(),
            },
        ] {
            datastore.payment_create(&opctx, row).await.unwrap();
        }

        for row in [
            Enrollment {
                id: self.enr_alice,
                student_id: self.alice,
                grade_id: self.grade4,
                academic_year: 2025,
                date_enrolled: date(2025, 1, 6),
                date_left: None,
                status: EnrollmentStatus::Enrolled,
            },
            Enrollment {
                id: self.enr_carl,
                student_id: self.carl,
                grade_id: self.grade5,
                academic_year: 2025,
                date_enrolled: date(2025, 1, 6),
                date_left: None,
                status: EnrollmentStatus::Enrolled,
            },
        ] {
            datastore.enrollment_create(&opctx, row).await.unwrap();
        }
    }

    fn opctx(&self, authn: authn::Context) -> OpContext {
        OpContext::for_tests(&self.log, authn, self.datastore.clone())
    }

    pub(crate) fn admin_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(self.admin_user, Role::Admin))
    }

    pub(crate) fn teacher_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(
            self.teacher_user,
            Role::Teacher,
        ))
    }

    /// Alice's actor: a student linked to one Student profile
    pub(crate) fn student_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(
            self.alice_user,
            Role::Student,
        ))
    }

    /// Dana's actor: a student in the other family
    pub(crate) fn other_student_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(
            self.dana_user,
            Role::Student,
        ))
    }

    /// Bob's actor: a parent linked to two children in different grades
    pub(crate) fn parent_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(self.bob_user, Role::Parent))
    }

    /// Erin's actor: a parent linked to one child
    pub(crate) fn other_parent_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(self.erin_user, Role::Parent))
    }

    /// A student-role actor with no linked Student profile (fail-closed)
    pub(crate) fn unlinked_student_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(
            self.unlinked_student_user,
            Role::Student,
        ))
    }

    pub(crate) fn pending_opctx(&self) -> OpContext {
        self.opctx(authn::Context::for_test_actor(
            self.pending_user,
            Role::Pending,
        ))
    }

    pub(crate) fn unauthenticated_opctx(&self) -> OpContext {
        self.opctx(authn::Context::unauthenticated())
    }
}
