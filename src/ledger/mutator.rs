use tracing::debug;

use crate::ledger::date;
use crate::ledger::error::LedgerError;
use crate::ledger::store::{NewSalaryRecord, SalaryStore};

/// What `create_or_amend` did, for logging and assertions.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateOrAmendOutcome {
    /// An active record with the same effective date was corrected in place.
    MergedSameDay { record_id: u64 },
    /// A new record was opened; `closed` lists the records end-dated by it.
    Opened { record_id: u64, closed: Vec<u64> },
}

/// Assign or raise an employee's salary as of `effective_date`.
///
/// An active record already effective on that exact date is a same-day
/// amendment: its amount is corrected in place and nothing else moves.
/// Otherwise every currently-active record of the employee is closed
/// (`effective_to = effective_date`, `active = false`) and a fresh open
/// record is inserted. Closing all actives rather than "the" active one keeps
/// the postcondition (exactly one active record per employee) even when a
/// prior writer left stale duplicates behind.
///
/// Must run inside one store transaction together with the lookups that fed
/// it; see `MySqlSalaryStore`.
pub async fn create_or_amend<S: SalaryStore>(
    store: &mut S,
    employee_id: u64,
    amount: u64,
    effective_date: &str,
) -> Result<CreateOrAmendOutcome, LedgerError> {
    date::parse(effective_date)?;

    if let Some(mut same_day) = store
        .find_by_employee_and_effective_from(employee_id, effective_date)
        .await?
    {
        if same_day.active {
            same_day.amount = amount;
            store.save(&same_day).await?;
            debug!(record_id = same_day.id, employee_id, "merged same-day salary");
            return Ok(CreateOrAmendOutcome::MergedSameDay {
                record_id: same_day.id,
            });
        }
    }

    let mut closed = Vec::new();
    for mut record in store.find_by_employee(employee_id).await? {
        if record.active {
            record.effective_to = Some(effective_date.to_owned());
            record.active = false;
            store.save(&record).await?;
            closed.push(record.id);
        }
    }

    let record_id = store
        .create(NewSalaryRecord {
            employee_id,
            amount,
            effective_from: effective_date.to_owned(),
            effective_to: None,
            active: true,
        })
        .await?;

    debug!(record_id, employee_id, ?closed, "opened salary record");
    Ok(CreateOrAmendOutcome::Opened { record_id, closed })
}

/// Direct correction of an existing record, active or historical.
///
/// A supplied `effective_to` must not precede `effective_from` and closes the
/// record as a side effect. An omitted `effective_to` leaves `active` alone
/// and clears any stored end date: the edit replaces all three mutable
/// fields. Validation failures leave the record untouched.
///
/// No cross-record check is made against the employee's other records; an
/// edit that re-dates a historical record past the active one is trusted to
/// the admin issuing it.
pub async fn amend<S: SalaryStore>(
    store: &mut S,
    record_id: u64,
    amount: u64,
    effective_from: &str,
    effective_to: Option<&str>,
) -> Result<(), LedgerError> {
    let mut record = store
        .get(record_id)
        .await?
        .ok_or(LedgerError::NotExistSalary)?;

    let from = date::parse(effective_from)?;

    if let Some(to_text) = effective_to {
        let to = date::parse(to_text)?;
        if to < from {
            return Err(LedgerError::InvalidDateRange);
        }
        record.active = false;
    }

    record.amount = amount;
    record.effective_from = effective_from.to_owned();
    record.effective_to = effective_to.map(str::to_owned);
    store.save(&record).await?;

    debug!(record_id, "amended salary record");
    Ok(())
}

/// Soft-delete: stamp the end date with today and deactivate. The row stays.
///
/// Retiring an already-inactive record is an expected no-op failure
/// (`AlreadyRetired`), reported to the caller with no mutation.
pub async fn retire<S: SalaryStore>(
    store: &mut S,
    record_id: u64,
    today: &str,
) -> Result<(), LedgerError> {
    let mut record = store
        .get(record_id)
        .await?
        .ok_or(LedgerError::NotExistSalary)?;

    if !record.active {
        return Err(LedgerError::AlreadyRetired);
    }

    record.effective_to = Some(today.to_owned());
    record.active = false;
    store.save(&record).await?;

    debug!(record_id, "retired salary record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::testing::MemSalaryStore;

    const EMP: u64 = 3;

    #[actix_web::test]
    async fn first_create_opens_a_single_active_record() {
        let mut store = MemSalaryStore::new();

        let outcome = create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            CreateOrAmendOutcome::Opened { ref closed, .. } if closed.is_empty()
        ));
        assert_eq!(store.rows().len(), 1);
        let record = &store.rows()[0];
        assert!(record.active);
        assert_eq!(record.amount, 100);
        assert_eq!(record.effective_from, "01/01/2024");
        assert_eq!(record.effective_to, None);
    }

    #[actix_web::test]
    async fn same_day_create_merges_instead_of_duplicating() {
        let mut store = MemSalaryStore::new();

        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let outcome = create_or_amend(&mut store, EMP, 150, "01/01/2024")
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOrAmendOutcome::MergedSameDay { .. }));
        assert_eq!(store.rows().len(), 1);
        let record = &store.rows()[0];
        assert_eq!(record.amount, 150);
        assert!(record.active);
        assert_eq!(record.effective_to, None);
    }

    #[actix_web::test]
    async fn later_create_supersedes_and_end_dates_the_prior_record() {
        let mut store = MemSalaryStore::new();

        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        create_or_amend(&mut store, EMP, 150, "01/02/2024")
            .await
            .unwrap();

        assert_eq!(store.rows().len(), 2);
        let first = &store.rows()[0];
        assert!(!first.active);
        assert_eq!(first.effective_to.as_deref(), Some("01/02/2024"));
        let second = &store.rows()[1];
        assert!(second.active);
        assert_eq!(second.amount, 150);
        assert_eq!(second.effective_to, None);
    }

    #[actix_web::test]
    async fn at_most_one_active_record_after_any_sequence() {
        let mut store = MemSalaryStore::new();

        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        create_or_amend(&mut store, EMP, 120, "05/01/2024")
            .await
            .unwrap();
        create_or_amend(&mut store, EMP, 130, "05/01/2024")
            .await
            .unwrap();
        create_or_amend(&mut store, EMP, 140, "09/03/2024")
            .await
            .unwrap();

        assert_eq!(store.active_count(EMP), 1);

        let active_id = store
            .rows()
            .iter()
            .find(|r| r.active)
            .map(|r| r.id)
            .unwrap();
        retire(&mut store, active_id, "10/03/2024").await.unwrap();
        assert_eq!(store.active_count(EMP), 0);

        create_or_amend(&mut store, EMP, 150, "11/03/2024")
            .await
            .unwrap();
        assert_eq!(store.active_count(EMP), 1);
    }

    #[actix_web::test]
    async fn create_closes_stale_duplicate_actives() {
        let mut store = MemSalaryStore::new();

        // Two actives for one employee, as a concurrent writer could leave.
        store
            .create(NewSalaryRecord {
                employee_id: EMP,
                amount: 90,
                effective_from: "01/01/2023".into(),
                effective_to: None,
                active: true,
            })
            .await
            .unwrap();
        store
            .create(NewSalaryRecord {
                employee_id: EMP,
                amount: 95,
                effective_from: "01/06/2023".into(),
                effective_to: None,
                active: true,
            })
            .await
            .unwrap();

        create_or_amend(&mut store, EMP, 150, "01/02/2024")
            .await
            .unwrap();

        assert_eq!(store.active_count(EMP), 1);
        for record in store.rows().iter().filter(|r| !r.active) {
            assert_eq!(record.effective_to.as_deref(), Some("01/02/2024"));
        }
    }

    #[actix_web::test]
    async fn other_employees_are_untouched() {
        let mut store = MemSalaryStore::new();

        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        create_or_amend(&mut store, 4, 900, "01/02/2024")
            .await
            .unwrap();

        assert_eq!(store.active_count(EMP), 1);
        assert_eq!(store.active_count(4), 1);
    }

    #[actix_web::test]
    async fn create_rejects_unparseable_effective_date() {
        let mut store = MemSalaryStore::new();

        let result = create_or_amend(&mut store, EMP, 100, "2024-01-01").await;

        assert!(matches!(result, Err(LedgerError::DateFormat { .. })));
        assert!(store.rows().is_empty());
    }

    #[actix_web::test]
    async fn amend_rejects_end_date_before_effective_date() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let before = store.rows()[0].clone();

        let result = amend(&mut store, before.id, 100, "01/10/2024", Some("01/05/2024")).await;

        assert!(matches!(result, Err(LedgerError::InvalidDateRange)));
        assert_eq!(store.rows()[0], before);
    }

    #[actix_web::test]
    async fn amend_with_end_date_closes_the_record() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let id = store.rows()[0].id;

        amend(&mut store, id, 110, "01/01/2024", Some("01/03/2024"))
            .await
            .unwrap();

        let record = &store.rows()[0];
        assert!(!record.active);
        assert_eq!(record.amount, 110);
        assert_eq!(record.effective_to.as_deref(), Some("01/03/2024"));
    }

    #[actix_web::test]
    async fn amend_accepts_end_date_equal_to_effective_date() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let id = store.rows()[0].id;

        amend(&mut store, id, 100, "01/03/2024", Some("01/03/2024"))
            .await
            .unwrap();

        assert!(!store.rows()[0].active);
    }

    #[actix_web::test]
    async fn amend_without_end_date_keeps_active_and_clears_end() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let id = store.rows()[0].id;

        amend(&mut store, id, 130, "02/01/2024", None).await.unwrap();

        let record = &store.rows()[0];
        assert!(record.active);
        assert_eq!(record.amount, 130);
        assert_eq!(record.effective_from, "02/01/2024");
        assert_eq!(record.effective_to, None);
    }

    #[actix_web::test]
    async fn amend_missing_record_reports_not_exist() {
        let mut store = MemSalaryStore::new();

        let result = amend(&mut store, 42, 100, "01/01/2024", None).await;

        assert!(matches!(result, Err(LedgerError::NotExistSalary)));
    }

    #[actix_web::test]
    async fn retire_stamps_end_date_and_deactivates() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let id = store.rows()[0].id;

        retire(&mut store, id, "05/01/2024").await.unwrap();

        let record = &store.rows()[0];
        assert!(!record.active);
        assert_eq!(record.effective_to.as_deref(), Some("05/01/2024"));
    }

    #[actix_web::test]
    async fn second_retire_is_already_retired_and_mutates_nothing() {
        let mut store = MemSalaryStore::new();
        create_or_amend(&mut store, EMP, 100, "01/01/2024")
            .await
            .unwrap();
        let id = store.rows()[0].id;

        retire(&mut store, id, "05/01/2024").await.unwrap();
        let after_first = store.rows()[0].clone();

        let result = retire(&mut store, id, "09/01/2024").await;

        assert!(matches!(result, Err(LedgerError::AlreadyRetired)));
        assert_eq!(store.rows()[0], after_first);
    }

    #[actix_web::test]
    async fn retire_missing_record_reports_not_exist() {
        let mut store = MemSalaryStore::new();

        let result = retire(&mut store, 42, "05/01/2024").await;

        assert!(matches!(result, Err(LedgerError::NotExistSalary)));
    }
}
