use std::collections::HashMap;

use chrono::NaiveDate;

use crate::ledger::date;
use crate::ledger::error::LedgerError;
use crate::model::salary::SalaryRecord;

/// Reduce the full active set to the single latest-dated record per employee.
///
/// The input comes straight from `SalaryStore::find_active` and may carry
/// stale duplicates left behind by concurrent writers; this resolver is the
/// defensive read-side answer to that. Records with identical
/// `effective_from` for one employee are tied on the highest record id, a
/// deterministic stand-in for the secondary ordering key the data model does
/// not carry.
///
/// An `effective_from` that fails to parse aborts the whole resolution with
/// `DateFormat`. Skipping the row would hide ledger corruption from the admin
/// view, so it is surfaced instead.
///
/// The result is ordered by record id descending, newest rows first.
pub fn latest_active_per_employee(
    records: Vec<SalaryRecord>,
) -> Result<Vec<SalaryRecord>, LedgerError> {
    let mut latest: HashMap<u64, (NaiveDate, SalaryRecord)> = HashMap::new();

    for record in records {
        let effective = date::parse(&record.effective_from)?;

        let supersedes = match latest.get(&record.employee_id) {
            Some((current, held)) => {
                effective > *current || (effective == *current && record.id > held.id)
            }
            None => true,
        };

        if supersedes {
            latest.insert(record.employee_id, (effective, record));
        }
    }

    let mut result: Vec<SalaryRecord> = latest.into_values().map(|(_, r)| r).collect();
    result.sort_by(|a, b| b.id.cmp(&a.id));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, employee_id: u64, effective_from: &str, amount: u64) -> SalaryRecord {
        SalaryRecord {
            id,
            employee_id,
            amount,
            effective_from: effective_from.to_owned(),
            effective_to: None,
            active: true,
        }
    }

    #[test]
    fn picks_latest_record_for_each_employee() {
        let records = vec![
            record(1, 10, "01/01/2024", 100),
            record(2, 10, "01/03/2024", 120),
            record(3, 11, "15/02/2024", 200),
            record(4, 12, "01/01/2023", 300),
            record(5, 12, "31/12/2023", 310),
            record(6, 11, "01/01/2024", 210),
        ];

        let latest = latest_active_per_employee(records).unwrap();

        assert_eq!(latest.len(), 3);
        let by_employee: Vec<(u64, u64)> =
            latest.iter().map(|r| (r.employee_id, r.id)).collect();
        assert!(by_employee.contains(&(10, 2)));
        assert!(by_employee.contains(&(11, 6)));
        assert!(by_employee.contains(&(12, 5)));
    }

    #[test]
    fn identical_dates_tie_break_on_highest_id() {
        let records = vec![
            record(7, 10, "01/01/2024", 100),
            record(3, 10, "01/01/2024", 150),
        ];

        let latest = latest_active_per_employee(records).unwrap();

        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, 7);
    }

    #[test]
    fn orders_output_by_id_descending() {
        let records = vec![
            record(1, 10, "01/01/2024", 100),
            record(2, 11, "01/01/2024", 200),
            record(3, 12, "01/01/2024", 300),
        ];

        let latest = latest_active_per_employee(records).unwrap();

        let ids: Vec<u64> = latest.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn unparseable_date_fails_the_whole_resolution() {
        let records = vec![
            record(1, 10, "01/01/2024", 100),
            record(2, 11, "garbage", 200),
        ];

        assert!(matches!(
            latest_active_per_employee(records),
            Err(LedgerError::DateFormat { .. })
        ));
    }

    #[test]
    fn empty_input_resolves_to_empty_output() {
        assert!(latest_active_per_employee(Vec::new()).unwrap().is_empty());
    }
}
