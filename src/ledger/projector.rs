use crate::ledger::error::LedgerError;
use crate::ledger::store::EmployeeDirectory;
use crate::model::salary::{EmployeeSalaryView, SalaryRecord};

/// Map stored records into the caller-facing employee-salary view.
///
/// The owning employee is resolved per record at projection time so renamed
/// employees show their current name. A dangling `employee_id` fails the
/// whole projection with `NotExistEmployee`: an owning reference with no
/// owner is ledger corruption and skipping the row would mask it.
pub async fn project_all<D: EmployeeDirectory>(
    directory: &mut D,
    records: &[SalaryRecord],
) -> Result<Vec<EmployeeSalaryView>, LedgerError> {
    let mut views = Vec::with_capacity(records.len());

    for record in records {
        let contact = directory
            .find_by_id(record.employee_id)
            .await?
            .ok_or(LedgerError::NotExistEmployee)?;

        views.push(EmployeeSalaryView {
            employee: contact.full_name,
            email: contact.email,
            amount: record.amount,
            effective_from: record.effective_from.clone(),
            effective_to: record.effective_to.clone(),
        });
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::store::EmployeeContact;
    use crate::ledger::testing::MemEmployeeDirectory;

    fn contact(id: u64, name: &str, email: &str) -> EmployeeContact {
        EmployeeContact {
            id,
            full_name: name.to_owned(),
            email: email.to_owned(),
        }
    }

    fn record(id: u64, employee_id: u64, effective_to: Option<&str>) -> SalaryRecord {
        SalaryRecord {
            id,
            employee_id,
            amount: 100,
            effective_from: "01/01/2024".to_owned(),
            effective_to: effective_to.map(str::to_owned),
            active: effective_to.is_none(),
        }
    }

    #[actix_web::test]
    async fn copies_fields_and_resolves_contact_details() {
        let mut directory = MemEmployeeDirectory::new(vec![
            contact(3, "John Doe", "john.doe@company.com"),
            contact(4, "Jane Roe", "jane.roe@company.com"),
        ]);
        let records = vec![
            record(1, 3, Some("01/02/2024")),
            record(2, 4, None),
        ];

        let views = project_all(&mut directory, &records).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].employee, "John Doe");
        assert_eq!(views[0].email, "john.doe@company.com");
        assert_eq!(views[0].effective_to.as_deref(), Some("01/02/2024"));
        // absent stays absent, never an empty string
        assert_eq!(views[1].effective_to, None);
    }

    #[actix_web::test]
    async fn dangling_employee_reference_fails_the_whole_projection() {
        let mut directory =
            MemEmployeeDirectory::new(vec![contact(3, "John Doe", "john.doe@company.com")]);
        let records = vec![record(1, 3, None), record(2, 99, None)];

        let result = project_all(&mut directory, &records).await;

        assert!(matches!(result, Err(LedgerError::NotExistEmployee)));
    }

    #[actix_web::test]
    async fn empty_record_set_projects_to_empty_view() {
        let mut directory = MemEmployeeDirectory::new(Vec::new());

        let views = project_all(&mut directory, &[]).await.unwrap();

        assert!(views.is_empty());
    }
}
