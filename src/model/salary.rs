use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the salary ledger. A record is opened when an admin assigns or
/// raises an employee's salary and closed (`effective_to` stamped,
/// `active = false`) when a later record supersedes it or it is retired.
/// Rows are never physically deleted; the full history stays for audit.
///
/// `id` and `employee_id` are immutable after creation. Dates are stored in
/// the ledger's textual form (see `ledger::date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "employee_id": 3,
        "amount": 52000,
        "effective_from": "01/01/2024",
        "effective_to": null,
        "active": true
    })
)]
pub struct SalaryRecord {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 3)]
    pub employee_id: u64,

    #[schema(example = 52000)]
    pub amount: u64,

    #[schema(example = "01/01/2024")]
    pub effective_from: String,

    #[schema(example = "01/02/2024", nullable = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<String>,

    pub active: bool,
}

/// Per-request projection of a salary record joined with its owning
/// employee's current contact details. Never persisted; names are resolved
/// at projection time because they can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmployeeSalaryView {
    #[schema(example = "John Doe")]
    pub employee: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = 52000)]
    pub amount: u64,

    #[schema(example = "01/01/2024")]
    pub effective_from: String,

    #[schema(example = "01/02/2024", nullable = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<String>,
}
