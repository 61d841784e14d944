// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{january_2024, open_ledger, register_commercial, register_manager};
use crate::{Ledger, LedgerError, Persistence};
use agio_domain::{AssignmentCandidate, StaffRole};
use time::macros::date;

#[test]
fn test_no_managers_yields_no_candidates() {
    let mut ledger: Persistence = open_ledger();
    register_commercial(&mut ledger, "Ana");

    assert!(ledger.list_assignment_candidates().unwrap().is_empty());
}

#[test]
fn test_candidate_loads_count_owned_unarchived_contacts() {
    let mut ledger: Persistence = open_ledger();
    let bruno: i64 = register_manager(&mut ledger, "Bruno");
    let carla: i64 = register_manager(&mut ledger, "Carla");

    for _ in 0..3 {
        let contact_id: i64 = ledger.create_contact("Client").unwrap();
        ledger.record_assignment(contact_id, bruno).unwrap();
    }
    let archived: i64 = ledger.create_contact("Former client").unwrap();
    ledger.record_assignment(archived, bruno).unwrap();
    ledger.archive_contact(archived).unwrap();

    // Unowned contacts count toward nobody.
    ledger.create_contact("Prospect").unwrap();

    let candidates: Vec<AssignmentCandidate> = ledger.list_assignment_candidates().unwrap();
    assert_eq!(
        candidates,
        vec![
            AssignmentCandidate::new(bruno, 3),
            AssignmentCandidate::new(carla, 0),
        ]
    );
}

#[test]
fn test_inactive_managers_are_not_candidates() {
    let mut ledger: Persistence = open_ledger();
    let bruno: i64 = register_manager(&mut ledger, "Bruno");
    let carla: i64 = register_manager(&mut ledger, "Carla");
    ledger.set_staff_active(bruno, false).unwrap();

    let candidates: Vec<AssignmentCandidate> = ledger.list_assignment_candidates().unwrap();
    assert_eq!(candidates, vec![AssignmentCandidate::new(carla, 0)]);
}

#[test]
fn test_record_assignment_sets_owner() {
    let mut ledger: Persistence = open_ledger();
    let bruno: i64 = register_manager(&mut ledger, "Bruno");
    let contact_id: i64 = ledger.create_contact("Client").unwrap();

    ledger.record_assignment(contact_id, bruno).unwrap();
    assert_eq!(ledger.get_contact_owner(contact_id).unwrap(), Some(bruno));
}

#[test]
fn test_archived_contact_is_not_assignable() {
    let mut ledger: Persistence = open_ledger();
    let bruno: i64 = register_manager(&mut ledger, "Bruno");
    let contact_id: i64 = ledger.create_contact("Client").unwrap();
    ledger.archive_contact(contact_id).unwrap();

    let result = ledger.record_assignment(contact_id, bruno);
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[test]
fn test_assignment_to_unknown_contact_fails() {
    let mut ledger: Persistence = open_ledger();
    let bruno: i64 = register_manager(&mut ledger, "Bruno");

    let result = ledger.record_assignment(999, bruno);
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[test]
fn test_contract_counts_include_zero_contract_commercials() {
    let mut ledger: Persistence = open_ledger();
    let ana: i64 = register_commercial(&mut ledger, "Ana");
    let diego: i64 = register_commercial(&mut ledger, "Diego");

    for _ in 0..2 {
        ledger
            .record_validated_contract(ana, date!(2024 - 01 - 15))
            .unwrap();
    }

    let counts: Vec<(i64, u32)> = ledger.validated_contract_counts(&january_2024()).unwrap();
    assert_eq!(counts, vec![(ana, 2), (diego, 0)]);
}

#[test]
fn test_contract_counts_respect_inclusive_period_bounds() {
    let mut ledger: Persistence = open_ledger();
    let ana: i64 = register_commercial(&mut ledger, "Ana");

    ledger
        .record_validated_contract(ana, date!(2024 - 01 - 01))
        .unwrap();
    ledger
        .record_validated_contract(ana, date!(2024 - 01 - 31))
        .unwrap();
    ledger
        .record_validated_contract(ana, date!(2023 - 12 - 31))
        .unwrap();
    ledger
        .record_validated_contract(ana, date!(2024 - 02 - 01))
        .unwrap();

    let counts: Vec<(i64, u32)> = ledger.validated_contract_counts(&january_2024()).unwrap();
    assert_eq!(counts, vec![(ana, 2)]);
}

#[test]
fn test_contract_counts_exclude_inactive_and_non_commercial_staff() {
    let mut ledger: Persistence = open_ledger();
    let ana: i64 = register_commercial(&mut ledger, "Ana");
    let eva: i64 = register_commercial(&mut ledger, "Eva");
    register_manager(&mut ledger, "Bruno");
    ledger.set_staff_active(eva, false).unwrap();

    let counts: Vec<(i64, u32)> = ledger.validated_contract_counts(&january_2024()).unwrap();
    assert_eq!(counts, vec![(ana, 0)]);
}

#[test]
fn test_get_staff_role() {
    let mut ledger: Persistence = open_ledger();
    let ana: i64 = register_commercial(&mut ledger, "Ana");

    assert_eq!(
        ledger.get_staff_role(ana).unwrap(),
        Some(StaffRole::Commercial)
    );
    assert_eq!(ledger.get_staff_role(999).unwrap(), None);
}
