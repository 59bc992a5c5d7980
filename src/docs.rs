use crate::api::employee::{
    CreateEmployeeRequest, EmployeeListResponse, EmployeeQuery, UpdateEmployeeRequest,
};
use crate::api::salary::{AmendSalaryRequest, CreateSalaryRequest};
use crate::model::employee::Employee;
use crate::model::salary::{EmployeeSalaryView, SalaryRecord};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Ledger API",
        version = "1.0.0",
        description = r#"
## HR record-keeping backend

This API manages employee profiles and their salary ledger: the full
compensation history of every employee, with at most one active salary
record per employee at any time.

### Key Features
- **Employee Management**
  - Create, update, list, and view employee profiles
- **Salary Ledger**
  - Assign or raise salaries (same-day entries merge instead of duplicating)
  - Correct historical records, with date-range validation
  - Retire records (soft delete; history is never removed)
  - Latest-salary overview across all employees and per-employee history

### Security
Endpoints are protected with **JWT Bearer authentication**; tokens are
issued by the external identity service. Salary operations require the
**Admin** role.

### Response Format
- JSON-based RESTful responses
- All dates use the `dd/MM/yyyy` pattern
"#,
    ),
    paths(
        crate::api::salary::get_latest_salaries,
        crate::api::salary::get_salary_history,
        crate::api::salary::create_salary,
        crate::api::salary::update_salary,
        crate::api::salary::delete_salary,
        crate::api::salary::salary_exists,
        crate::api::salary::get_salary_record,
        crate::api::salary::list_salaries_by_email,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee
    ),
    components(
        schemas(
            SalaryRecord,
            EmployeeSalaryView,
            CreateSalaryRequest,
            AmendSalaryRequest,
            Employee,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            EmployeeQuery,
            EmployeeListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Salary", description = "Salary ledger APIs"),
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .as_mut()
            .expect("schema components are registered");
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
