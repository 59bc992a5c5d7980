use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::ledger::error::LedgerError;
use crate::ledger::store::{
    EmployeeDirectory, MySqlEmployeeDirectory, MySqlSalaryStore, SalaryStore,
};
use crate::ledger::{date, mutator, projector, resolver};

#[derive(Deserialize, ToSchema)]
pub struct CreateSalaryRequest {
    #[schema(example = 52000)]
    pub amount: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct AmendSalaryRequest {
    #[schema(example = 55000)]
    pub amount: u64,

    /// New effective date for the record being corrected.
    #[schema(example = "01/01/2024")]
    pub effective_from: String,

    /// Optional end date; supplying one closes the record. An empty string
    /// counts as absent.
    #[schema(example = "01/02/2024", nullable = true)]
    pub effective_to: Option<String>,
}

/// Locates a record by its stored effective date (the date contains `/`, so
/// it travels as a query parameter rather than a path segment).
#[derive(Deserialize, IntoParams)]
pub struct EffectiveFromQuery {
    #[param(example = "01/01/2024")]
    pub effective_from: String,
}

fn today() -> String {
    date::format(Local::now().date_naive())
}

/// Assign or raise an employee's salary, effective today
#[utoipa::path(
    post,
    path = "/api/v1/salary/{email}",
    request_body = CreateSalaryRequest,
    params(
        ("email", Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Salary created or merged into today's record"),
        (status = 404, description = "Employee does not exist"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn create_salary(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<CreateSalaryRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let email = path.into_inner();
    let effective_date = today();

    let mut tx = pool.begin().await.map_err(LedgerError::from)?;

    let employee = {
        let mut directory = MySqlEmployeeDirectory::new(&mut tx);
        directory.find_by_email(&email).await?
    }
    .ok_or(LedgerError::NotExistEmployee)?;

    let outcome = {
        let mut store = MySqlSalaryStore::new(&mut tx);
        mutator::create_or_amend(&mut store, employee.id, payload.amount, &effective_date).await?
    };

    tx.commit().await.map_err(LedgerError::from)?;

    info!(employee_id = employee.id, ?outcome, "salary assigned");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary created successfully"
    })))
}

/// Correct an existing salary record
#[utoipa::path(
    put,
    path = "/api/v1/salary/{email}",
    request_body = AmendSalaryRequest,
    params(
        ("email", Path, description = "Employee email"),
        EffectiveFromQuery
    ),
    responses(
        (status = 200, description = "Salary updated"),
        (status = 400, description = "Unparseable date or end date before effective date"),
        (status = 404, description = "Employee or salary does not exist")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn update_salary(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<EffectiveFromQuery>,
    payload: web::Json<AmendSalaryRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let email = path.into_inner();

    let mut tx = pool.begin().await.map_err(LedgerError::from)?;

    let employee = {
        let mut directory = MySqlEmployeeDirectory::new(&mut tx);
        directory.find_by_email(&email).await?
    }
    .ok_or(LedgerError::NotExistEmployee)?;

    let record = {
        let mut store = MySqlSalaryStore::new(&mut tx);
        store
            .find_by_employee_and_effective_from(employee.id, &query.effective_from)
            .await?
    }
    .ok_or(LedgerError::NotExistSalary)?;

    let effective_to = payload.effective_to.as_deref().filter(|s| !s.is_empty());

    {
        let mut store = MySqlSalaryStore::new(&mut tx);
        mutator::amend(
            &mut store,
            record.id,
            payload.amount,
            &payload.effective_from,
            effective_to,
        )
        .await?;
    }

    tx.commit().await.map_err(LedgerError::from)?;

    info!(record_id = record.id, "salary amended");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary updated successfully"
    })))
}

/// Retire a salary record (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/salary/{email}",
    params(
        ("email", Path, description = "Employee email"),
        EffectiveFromQuery
    ),
    responses(
        (status = 200, description = "Salary retired"),
        (status = 400, description = "Salary is already inactive"),
        (status = 404, description = "Employee or salary does not exist")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn delete_salary(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<EffectiveFromQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let email = path.into_inner();
    let end_date = today();

    let mut tx = pool.begin().await.map_err(LedgerError::from)?;

    let employee = {
        let mut directory = MySqlEmployeeDirectory::new(&mut tx);
        directory.find_by_email(&email).await?
    }
    .ok_or(LedgerError::NotExistEmployee)?;

    let record = {
        let mut store = MySqlSalaryStore::new(&mut tx);
        store
            .find_by_employee_and_effective_from(employee.id, &query.effective_from)
            .await?
    }
    .ok_or(LedgerError::NotExistSalary)?;

    {
        let mut store = MySqlSalaryStore::new(&mut tx);
        mutator::retire(&mut store, record.id, &end_date).await?;
    }

    tx.commit().await.map_err(LedgerError::from)?;

    info!(record_id = record.id, "salary retired");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary deleted successfully"
    })))
}

/// Latest active salary of every employee
#[utoipa::path(
    get,
    path = "/api/v1/salary",
    responses(
        (status = 200, description = "One view per employee, newest records first",
            body = [crate::model::salary::EmployeeSalaryView]),
        (status = 400, description = "A stored date failed to parse")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn get_latest_salaries(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let mut conn = pool.acquire().await.map_err(LedgerError::from)?;

    let actives = {
        let mut store = MySqlSalaryStore::new(&mut conn);
        store.find_active().await?
    };

    let latest = resolver::latest_active_per_employee(actives)?;

    let mut directory = MySqlEmployeeDirectory::new(&mut conn);
    let views = projector::project_all(&mut directory, &latest).await?;

    Ok(HttpResponse::Ok().json(views))
}

/// Full salary history of one employee
#[utoipa::path(
    get,
    path = "/api/v1/salary/history/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Every record ever written for the employee",
            body = [crate::model::salary::EmployeeSalaryView]),
        (status = 404, description = "Employee does not exist")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn get_salary_history(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let mut conn = pool.acquire().await.map_err(LedgerError::from)?;

    {
        let mut directory = MySqlEmployeeDirectory::new(&mut conn);
        directory.find_by_id(employee_id).await?
    }
    .ok_or(LedgerError::NotExistEmployee)?;

    let records = {
        let mut store = MySqlSalaryStore::new(&mut conn);
        store.find_by_employee(employee_id).await?
    };

    let mut directory = MySqlEmployeeDirectory::new(&mut conn);
    let views = projector::project_all(&mut directory, &records).await?;

    Ok(HttpResponse::Ok().json(views))
}

/// Check whether a salary record exists for an email and effective date
#[utoipa::path(
    get,
    path = "/api/v1/salary/{email}/exists",
    params(
        ("email", Path, description = "Employee email"),
        EffectiveFromQuery
    ),
    responses(
        (status = 200, description = "true when a record matches", body = bool)
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn salary_exists(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    query: web::Query<EffectiveFromQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let email = path.into_inner();

    let mut conn = pool.acquire().await.map_err(LedgerError::from)?;

    let employee = {
        let mut directory = MySqlEmployeeDirectory::new(&mut conn);
        directory.find_by_email(&email).await?
    };

    let exists = match employee {
        Some(employee) => {
            let mut store = MySqlSalaryStore::new(&mut conn);
            store
                .find_by_employee_and_effective_from(employee.id, &query.effective_from)
                .await?
                .is_some()
        }
        None => false,
    };

    Ok(HttpResponse::Ok().json(exists))
}

/// Fetch one raw salary record by id
#[utoipa::path(
    get,
    path = "/api/v1/salary/record/{id}",
    params(
        ("id", Path, description = "Salary record ID")
    ),
    responses(
        (status = 200, body = crate::model::salary::SalaryRecord),
        (status = 404, description = "Salary does not exist")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn get_salary_record(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let record_id = path.into_inner();

    let mut conn = pool.acquire().await.map_err(LedgerError::from)?;

    let record = {
        let mut store = MySqlSalaryStore::new(&mut conn);
        store.get(record_id).await?
    }
    .ok_or(LedgerError::NotExistSalary)?;

    Ok(HttpResponse::Ok().json(record))
}

/// All raw salary records of one employee, by email
#[utoipa::path(
    get,
    path = "/api/v1/salary/{email}",
    params(
        ("email", Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Record list; empty when the email is unknown",
            body = [crate::model::salary::SalaryRecord])
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn list_salaries_by_email(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let email = path.into_inner();

    let mut conn = pool.acquire().await.map_err(LedgerError::from)?;

    let employee = {
        let mut directory = MySqlEmployeeDirectory::new(&mut conn);
        directory.find_by_email(&email).await?
    };

    let records = match employee {
        Some(employee) => {
            let mut store = MySqlSalaryStore::new(&mut conn);
            store.find_by_employee(employee.id).await?
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(records))
}
