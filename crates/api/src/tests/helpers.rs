// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AuthenticatedActor, CommissionService, NotificationKind, Notifier};
use agio_audit::Cause;
use agio_domain::{Period, StaffRole};
use agio_ledger::Persistence;
use std::cell::RefCell;
use std::rc::Rc;
use time::macros::date;

/// A notifier that records every message for assertions.
///
/// Clones share the same buffer, so a test can keep one clone and hand
/// the other to the service.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub messages: Rc<RefCell<Vec<(NotificationKind, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.messages.borrow_mut().push((kind, message.to_string()));
    }
}

pub type TestService = CommissionService<Persistence, RecordingNotifier>;

pub fn create_test_service() -> TestService {
    CommissionService::new(
        Persistence::new_in_memory().unwrap(),
        RecordingNotifier::default(),
    )
    .unwrap()
}

pub fn create_test_service_with_notifier(notifier: RecordingNotifier) -> TestService {
    CommissionService::new(Persistence::new_in_memory().unwrap(), notifier).unwrap()
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(100, StaffRole::Admin)
}

pub fn commercial(staff_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(staff_id, StaffRole::Commercial)
}

pub fn manager(staff_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(staff_id, StaffRole::AccountManager)
}

pub fn january_2024() -> Period {
    Period::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).unwrap()
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Operator request"))
}

/// Registers a commercial and records the given number of validated
/// contracts inside January 2024.
pub fn seed_commercial(service: &mut TestService, name: &str, contracts: u32) -> i64 {
    let staff_id: i64 = service
        .ledger_mut()
        .register_staff(name, StaffRole::Commercial)
        .unwrap();
    for _ in 0..contracts {
        service
            .ledger_mut()
            .record_validated_contract(staff_id, date!(2024 - 01 - 15))
            .unwrap();
    }
    staff_id
}

pub fn seed_manager(service: &mut TestService, name: &str) -> i64 {
    service
        .ledger_mut()
        .register_staff(name, StaffRole::AccountManager)
        .unwrap()
}
