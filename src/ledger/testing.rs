//! In-memory doubles for the store traits, shared by the ledger unit tests.

use crate::ledger::error::LedgerError;
use crate::ledger::store::{
    EmployeeContact, EmployeeDirectory, NewSalaryRecord, SalaryStore,
};
use crate::model::salary::SalaryRecord;

pub struct MemSalaryStore {
    rows: Vec<SalaryRecord>,
    next_id: u64,
}

impl MemSalaryStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn rows(&self) -> &[SalaryRecord] {
        &self.rows
    }

    pub fn active_count(&self, employee_id: u64) -> usize {
        self.rows
            .iter()
            .filter(|r| r.employee_id == employee_id && r.active)
            .count()
    }
}

impl SalaryStore for MemSalaryStore {
    async fn create(&mut self, record: NewSalaryRecord) -> Result<u64, LedgerError> {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(SalaryRecord {
            id,
            employee_id: record.employee_id,
            amount: record.amount,
            effective_from: record.effective_from,
            effective_to: record.effective_to,
            active: record.active,
        });
        Ok(id)
    }

    async fn get(&mut self, id: u64) -> Result<Option<SalaryRecord>, LedgerError> {
        Ok(self.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_employee(
        &mut self,
        employee_id: u64,
    ) -> Result<Vec<SalaryRecord>, LedgerError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn find_active(&mut self) -> Result<Vec<SalaryRecord>, LedgerError> {
        Ok(self.rows.iter().filter(|r| r.active).cloned().collect())
    }

    async fn find_by_employee_and_effective_from(
        &mut self,
        employee_id: u64,
        effective_from: &str,
    ) -> Result<Option<SalaryRecord>, LedgerError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.employee_id == employee_id && r.effective_from == effective_from)
            .max_by_key(|r| r.id)
            .cloned())
    }

    async fn save(&mut self, record: &SalaryRecord) -> Result<(), LedgerError> {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == record.id) {
            *row = record.clone();
        }
        Ok(())
    }
}

pub struct MemEmployeeDirectory {
    contacts: Vec<EmployeeContact>,
}

impl MemEmployeeDirectory {
    pub fn new(contacts: Vec<EmployeeContact>) -> Self {
        Self { contacts }
    }
}

impl EmployeeDirectory for MemEmployeeDirectory {
    async fn find_by_id(&mut self, id: u64) -> Result<Option<EmployeeContact>, LedgerError> {
        Ok(self.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<EmployeeContact>, LedgerError> {
        Ok(self.contacts.iter().find(|c| c.email == email).cloned())
    }
}
