use sqlx::MySqlConnection;

use crate::ledger::error::LedgerError;
use crate::model::salary::SalaryRecord;
use crate::utils::employee_cache;

/// Field set for a record about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewSalaryRecord {
    pub employee_id: u64,
    pub amount: u64,
    pub effective_from: String,
    pub effective_to: Option<String>,
    pub active: bool,
}

/// Persistence contract for salary records.
///
/// The store enforces nothing: no uniqueness, no one-active-row-per-employee.
/// All invariants belong to the mutator, which drives these primitives inside
/// one transaction per mutation. `None` is the not-found arm of every lookup;
/// the API layer lifts it into the typed taxonomy.
pub trait SalaryStore {
    async fn create(&mut self, record: NewSalaryRecord) -> Result<u64, LedgerError>;

    async fn get(&mut self, id: u64) -> Result<Option<SalaryRecord>, LedgerError>;

    /// All records ever written for one employee, in insertion order.
    async fn find_by_employee(&mut self, employee_id: u64)
    -> Result<Vec<SalaryRecord>, LedgerError>;

    /// Every record currently flagged active, across all employees.
    async fn find_active(&mut self) -> Result<Vec<SalaryRecord>, LedgerError>;

    /// Single-row lookup by owner and effective date. When duplicates exist
    /// (a retired same-day row shadowed by a recreated one) the highest-id
    /// row wins.
    async fn find_by_employee_and_effective_from(
        &mut self,
        employee_id: u64,
        effective_from: &str,
    ) -> Result<Option<SalaryRecord>, LedgerError>;

    /// Full replace by id.
    async fn save(&mut self, record: &SalaryRecord) -> Result<(), LedgerError>;
}

/// Contact details the ledger needs from the employee side: resolution of an
/// owning reference into the current display name and email.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EmployeeContact {
    pub id: u64,
    pub full_name: String,
    pub email: String,
}

/// Employee identity lookup consumed by the ledger.
pub trait EmployeeDirectory {
    async fn find_by_id(&mut self, id: u64) -> Result<Option<EmployeeContact>, LedgerError>;

    async fn find_by_email(&mut self, email: &str)
    -> Result<Option<EmployeeContact>, LedgerError>;
}

/// MySQL-backed salary store. Works over any live connection: a pooled one
/// for reads, a transaction for mutations. Mutator-path lookups lock the
/// matched rows (`FOR UPDATE`) so two concurrent mutations of the same
/// employee's ledger serialize on the store.
pub struct MySqlSalaryStore<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> MySqlSalaryStore<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }
}

impl SalaryStore for MySqlSalaryStore<'_> {
    async fn create(&mut self, record: NewSalaryRecord) -> Result<u64, LedgerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO salary (employee_id, amount, effective_from, effective_to, active)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.amount)
        .bind(&record.effective_from)
        .bind(&record.effective_to)
        .bind(record.active)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn get(&mut self, id: u64) -> Result<Option<SalaryRecord>, LedgerError> {
        let record = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT id, employee_id, amount, effective_from, effective_to, active
            FROM salary
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record)
    }

    async fn find_by_employee(
        &mut self,
        employee_id: u64,
    ) -> Result<Vec<SalaryRecord>, LedgerError> {
        let records = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT id, employee_id, amount, effective_from, effective_to, active
            FROM salary
            WHERE employee_id = ?
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(employee_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }

    async fn find_active(&mut self) -> Result<Vec<SalaryRecord>, LedgerError> {
        let records = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT id, employee_id, amount, effective_from, effective_to, active
            FROM salary
            WHERE active = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }

    async fn find_by_employee_and_effective_from(
        &mut self,
        employee_id: u64,
        effective_from: &str,
    ) -> Result<Option<SalaryRecord>, LedgerError> {
        let record = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT id, employee_id, amount, effective_from, effective_to, active
            FROM salary
            WHERE employee_id = ? AND effective_from = ?
            ORDER BY id DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(employee_id)
        .bind(effective_from)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record)
    }

    async fn save(&mut self, record: &SalaryRecord) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            UPDATE salary
            SET amount = ?, effective_from = ?, effective_to = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(record.amount)
        .bind(&record.effective_from)
        .bind(&record.effective_to)
        .bind(record.active)
        .bind(record.id)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }
}

/// MySQL-backed employee directory. Id lookups go through the contact cache
/// since projections tolerate a briefly stale name; email lookups always hit
/// the database because they sit on the mutation path.
pub struct MySqlEmployeeDirectory<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> MySqlEmployeeDirectory<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }
}

impl EmployeeDirectory for MySqlEmployeeDirectory<'_> {
    async fn find_by_id(&mut self, id: u64) -> Result<Option<EmployeeContact>, LedgerError> {
        if let Some(contact) = employee_cache::get(id).await {
            return Ok(Some(contact));
        }

        let contact = sqlx::query_as::<_, EmployeeContact>(
            r#"SELECT id, full_name, email FROM employees WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        if let Some(ref c) = contact {
            employee_cache::insert(c.clone()).await;
        }

        Ok(contact)
    }

    async fn find_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<EmployeeContact>, LedgerError> {
        let contact = sqlx::query_as::<_, EmployeeContact>(
            r#"SELECT id, full_name, email FROM employees WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(contact)
    }
}
