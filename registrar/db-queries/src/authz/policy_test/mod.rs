// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Verifies the policy across every actor and every record
//!
//! The tests here sweep the whole grid: for each actor in the test world and
//! each record of each entity family, the record must appear in the actor's
//! scoped listing exactly when fetching it directly succeeds.  The policy
//! derives both paths from one predicate, but that construction is an
//! implementation detail; this module checks the end-to-end behavior through
//! the datastore, where a regression in either path (or in the anchor
//! resolution feeding them) would surface.

use crate::db::DataStore;
use crate::db::datastore::test_utils::TestWorld;
use crate::db::datastore::test_utils::pagparams;
use registrar_auth::context::OpContext;
use registrar_common::api::external::Error;
use registrar_common::api::external::ResourceType;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Every record in the test world, by entity family
fn world_records(world: &TestWorld) -> Vec<(ResourceType, Uuid)> {
    vec![
        (ResourceType::Student, world.alice),
        (ResourceType::Student, world.carl),
        (ResourceType::Student, world.dana),
        (ResourceType::Student, world.frank),
        (ResourceType::Parent, world.bob),
        (ResourceType::Parent, world.erin),
        (ResourceType::StudentParent, world.sp_alice_bob),
        (ResourceType::StudentParent, world.sp_carl_bob),
        (ResourceType::StudentParent, world.sp_dana_erin),
        (ResourceType::Grade, world.grade4),
        (ResourceType::Grade, world.grade5),
        (ResourceType::Teacher, world.teacher1),
        (ResourceType::Subject, world.math),
        (ResourceType::Subject, world.art),
        (ResourceType::Performance, world.perf_alice),
        (ResourceType::Performance, world.perf_dana),
        (ResourceType::Attendance, world.att_alice),
        (ResourceType::Attendance, world.att_dana),
        (ResourceType::Invoice, world.inv_alice),
        (ResourceType::Invoice, world.inv_dana),
        (ResourceType::Payment, world.pay_alice),
        (ResourceType::Payment, world.pay_dana),
        (ResourceType::Enrollment, world.enr_alice),
        (ResourceType::Enrollment, world.enr_carl),
    ]
}

/// Fetches one record of the given family, discarding the body
async fn fetch_record(
    datastore: &DataStore,
    opctx: &OpContext,
    resource_type: ResourceType,
    id: Uuid,
) -> Result<(), Error> {
    match resource_type {
        ResourceType::Student => {
            datastore.student_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Parent => {
            datastore.parent_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::StudentParent => {
            datastore.student_parent_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Grade => {
            datastore.grade_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Teacher => {
            datastore.teacher_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Subject => {
            datastore.subject_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Performance => {
            datastore.performance_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Attendance => {
            datastore.attendance_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Invoice => {
            datastore.invoice_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Payment => {
            datastore.payment_fetch(opctx, id).await.map(|_| ())
        }
        ResourceType::Enrollment => {
            datastore.enrollment_fetch(opctx, id).await.map(|_| ())
        }
    }
}

/// Lists the ids of the records of the given family within the caller's
/// visible set
async fn list_ids(
    datastore: &DataStore,
    opctx: &OpContext,
    resource_type: ResourceType,
) -> Result<Vec<Uuid>, Error> {
    let pagparams = pagparams();
    match resource_type {
        ResourceType::Student => Ok(datastore
            .students_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Parent => Ok(datastore
            .parents_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::StudentParent => Ok(datastore
            .student_parents_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Grade => Ok(datastore
            .grades_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Teacher => Ok(datastore
            .teachers_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Subject => Ok(datastore
            .subjects_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Performance => Ok(datastore
            .performances_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Attendance => Ok(datastore
            .attendances_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Invoice => Ok(datastore
            .invoices_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Payment => Ok(datastore
            .payments_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
        ResourceType::Enrollment => Ok(datastore
            .enrollments_list(opctx, &pagparams)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect()),
    }
}

fn actors(world: &TestWorld) -> Vec<(&'static str, OpContext)> {
    vec![
        ("admin", world.admin_opctx()),
        ("teacher", world.teacher_opctx()),
        ("alice", world.student_opctx()),
        ("dana", world.other_student_opctx()),
        ("bob", world.parent_opctx()),
        ("erin", world.other_parent_opctx()),
        ("unlinked-student", world.unlinked_student_opctx()),
        ("pending", world.pending_opctx()),
        ("unauthenticated", world.unauthenticated_opctx()),
    ]
}

/// A record must be fetchable exactly when a scoped listing returns it, for
/// every actor and every record in the world.  A denied fetch must be
/// indistinguishable from a fetch of a record that does not exist.
#[tokio::test]
async fn test_listings_and_object_checks_agree() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    for (name, opctx) in actors(&world) {
        for resource_type in ResourceType::all() {
            // An actor denied the listing outright (pending everywhere, a
            // teacher on financial families, unauthenticated anywhere) has
            // an empty visible set.
            let visible: BTreeSet<Uuid> =
                match list_ids(datastore, &opctx, resource_type).await {
                    Ok(ids) => ids.into_iter().collect(),
                    Err(Error::Forbidden)
                    | Err(Error::Unauthenticated { .. }) => BTreeSet::new(),
                    Err(error) => {
                        panic!("unexpected listing error: {:?}", error)
                    }
                };

            for (record_type, id) in world_records(&world) {
                if record_type != resource_type {
                    continue;
                }
                let fetched =
                    fetch_record(datastore, &opctx, resource_type, id).await;
                assert_eq!(
                    fetched.is_ok(),
                    visible.contains(&id),
                    "{} fetch vs listing disagree for actor {:?} and {} {}",
                    resource_type,
                    name,
                    resource_type,
                    id,
                );
                if let Err(error) = fetched {
                    assert!(
                        matches!(error, Error::ObjectNotFound { .. }),
                        "denied fetch must look like a missing record, \
                         got {:?}",
                        error,
                    );
                }
            }
        }
    }
}

/// Administrators see everything (their listings cover every record in the
/// world) and may mutate anything.
#[tokio::test]
async fn test_admin_universality() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;
    let opctx = world.admin_opctx();

    for (resource_type, id) in world_records(&world) {
        fetch_record(datastore, &opctx, resource_type, id).await.unwrap();
        let visible = list_ids(datastore, &opctx, resource_type).await.unwrap();
        assert!(visible.contains(&id));
    }

    // A few representative mutations.
    let (_, mut alice) =
        datastore.student_fetch(&opctx, world.alice).await.unwrap();
    alice.address = "14 School Lane".to_string();
    datastore.student_update(&opctx, world.alice, alice).await.unwrap();
    datastore.payment_delete(&opctx, world.pay_dana).await.unwrap();
}

/// Teachers are excluded from financial records entirely, including reads,
/// regardless of any relationship; every other family stays fully readable.
#[tokio::test]
async fn test_teacher_financial_exclusion() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;
    let opctx = world.teacher_opctx();

    assert_eq!(
        datastore.invoices_list(&opctx, &pagparams()).await.unwrap_err(),
        Error::Forbidden
    );
    assert_eq!(
        datastore.payments_list(&opctx, &pagparams()).await.unwrap_err(),
        Error::Forbidden
    );

    for id in [world.inv_alice, world.inv_dana] {
        let error = datastore.invoice_fetch(&opctx, id).await.unwrap_err();
        assert!(matches!(error, Error::ObjectNotFound { .. }));
    }
    for id in [world.pay_alice, world.pay_dana] {
        let error = datastore.payment_fetch(&opctx, id).await.unwrap_err();
        assert!(matches!(error, Error::ObjectNotFound { .. }));
    }

    // Everything non-financial is readable.
    datastore.student_fetch(&opctx, world.alice).await.unwrap();
    datastore.performance_fetch(&opctx, world.perf_dana).await.unwrap();
    let students = datastore.students_list(&opctx, &pagparams()).await.unwrap();
    assert_eq!(students.len(), 4);
}

/// A parent reaches records only through StudentParent rows, transitively
/// through each linked Student -- including Payments, which take one hop
/// more.  A parent linked to several children sees the union of their
/// grades.
#[tokio::test]
async fn test_transitive_parent_visibility() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    let bob = world.parent_opctx();
    let performances =
        datastore.performances_list(&bob, &pagparams()).await.unwrap();
    assert_eq!(
        performances.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![world.perf_alice]
    );
    datastore.performance_fetch(&bob, world.perf_alice).await.unwrap();
    datastore.payment_fetch(&bob, world.pay_alice).await.unwrap();

    // Bob's children sit in different grades; he sees both.
    let grades: BTreeSet<Uuid> = datastore
        .grades_list(&bob, &pagparams())
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(
        grades,
        [world.grade4, world.grade5].into_iter().collect::<BTreeSet<_>>()
    );

    // Erin is not linked to alice or carl: none of their records exist for
    // her.
    let erin = world.other_parent_opctx();
    let error = datastore
        .performance_fetch(&erin, world.perf_alice)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::ObjectNotFound { .. }));
    let grades = datastore.grades_list(&erin, &pagparams()).await.unwrap();
    assert_eq!(
        grades.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![world.grade4]
    );
}

/// A student- or parent-role actor with no linked profile sees nothing and
/// can read nothing, but never gets an error for trying to list.
#[tokio::test]
async fn test_missing_profile_link_fails_closed() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;
    let opctx = world.unlinked_student_opctx();

    for resource_type in ResourceType::all() {
        let visible =
            list_ids(datastore, &opctx, resource_type).await.unwrap();
        assert!(
            visible.is_empty(),
            "unlinked actor should see no {}",
            resource_type
        );
    }
    for (resource_type, id) in world_records(&world) {
        let error = fetch_record(datastore, &opctx, resource_type, id)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::ObjectNotFound { .. }));
    }
}

/// Repeated evaluation with unchanged underlying data returns identical
/// results.
#[tokio::test]
async fn test_decisions_are_repeatable() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    for (_, opctx) in actors(&world) {
        for resource_type in ResourceType::all() {
            let first = list_ids(datastore, &opctx, resource_type).await;
            let second = list_ids(datastore, &opctx, resource_type).await;
            assert_eq!(first, second);
        }
    }

    let opctx = world.parent_opctx();
    let first = datastore.payment_fetch(&opctx, world.pay_alice).await;
    let second = datastore.payment_fetch(&opctx, world.pay_alice).await;
    assert_eq!(first.map(|(_, row)| row), second.map(|(_, row)| row));
}

/// The student/parent/bystander scenario end to end: a student and their
/// linked parent can both read the student's Performance record, neither
/// can write it, and an unrelated student can't even observe it.
#[tokio::test]
async fn test_family_scenario() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    let alice = world.student_opctx();
    let bob = world.parent_opctx();
    let dana = world.other_student_opctx();

    let (_, performance) =
        datastore.performance_fetch(&alice, world.perf_alice).await.unwrap();
    assert_eq!(performance.score, 88);
    datastore.performance_fetch(&bob, world.perf_alice).await.unwrap();

    // A mutation by a reader is Forbidden (they can see the record, so
    // there's nothing to hide).
    let error = datastore
        .performance_update(&alice, world.perf_alice, performance.clone())
        .await
        .unwrap_err();
    assert_eq!(error, Error::Forbidden);

    // A mutation by an actor who can't read the record reveals nothing.
    let error = datastore
        .performance_update(&dana, world.perf_alice, performance)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::ObjectNotFound { .. }));

    // And an unrelated student can't observe the record at all.
    let error = datastore
        .performance_fetch(&dana, world.perf_alice)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::ObjectNotFound { .. }));
    let visible = datastore
        .performances_list(&dana, &pagparams())
        .await
        .unwrap();
    assert_eq!(
        visible.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![world.perf_dana]
    );
}

/// An out-of-scope record and a nonexistent record produce the same error
/// shape.
#[tokio::test]
async fn test_denial_matches_absence() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;
    let opctx = world.student_opctx();

    let out_of_scope =
        datastore.invoice_fetch(&opctx, world.inv_dana).await.unwrap_err();
    let missing_id = Uuid::new_v4();
    let absent =
        datastore.invoice_fetch(&opctx, missing_id).await.unwrap_err();

    assert_eq!(
        out_of_scope,
        Error::not_found_by_id(ResourceType::Invoice, &world.inv_dana)
    );
    assert_eq!(
        absent,
        Error::not_found_by_id(ResourceType::Invoice, &missing_id)
    );
}

/// Listing without an authenticated actor is rejected as unauthenticated;
/// a pending actor is rejected by the capability gate.
#[tokio::test]
async fn test_listing_standing() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    let opctx = world.unauthenticated_opctx();
    let error =
        datastore.students_list(&opctx, &pagparams()).await.unwrap_err();
    assert!(matches!(error, Error::Unauthenticated { .. }));

    let opctx = world.pending_opctx();
    for resource_type in ResourceType::all() {
        let error =
            list_ids(datastore, &opctx, resource_type).await.unwrap_err();
        assert_eq!(error, Error::Forbidden);
    }
}

/// Mutations anywhere are rejected for every non-admin role by the
/// capability gate (creates) or the object check (updates/deletes).
#[tokio::test]
async fn test_mutations_are_admin_only() {
    let world = TestWorld::setup().await;
    let datastore = &world.datastore;

    for opctx in [
        world.teacher_opctx(),
        world.student_opctx(),
        world.parent_opctx(),
        world.pending_opctx(),
    ] {
        let error = datastore
            .grade_create(
                &opctx,
                crate::db::model::Grade {
                    id: Uuid::new_v4(),
                    name: "Grade 6".to_string(),
                    stream: "North".to_string(),
                    teacher_id: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(error, Error::Forbidden);
    }

    // Teachers can read a Performance record but not delete it.
    let opctx = world.teacher_opctx();
    let error = datastore
        .performance_delete(&opctx, world.perf_alice)
        .await
        .unwrap_err();
    assert_eq!(error, Error::Forbidden);
}
