use actix_web::{HttpResponse, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;
use tracing::error;

/// Failure taxonomy of the salary ledger.
///
/// `InvalidDateRange` and `AlreadyRetired` are expected business outcomes and
/// leave all state unmodified; the not-exist and date-format variants are
/// request failures surfaced to the caller. `Store` wraps the persistence
/// layer's own errors. Callers branch on the variant, never on the message.
#[derive(Debug, Display, Error)]
pub enum LedgerError {
    #[display(fmt = "employee does not exist")]
    NotExistEmployee,

    #[display(fmt = "salary does not exist")]
    NotExistSalary,

    #[display(fmt = "cannot parse date: {}", text)]
    DateFormat {
        #[error(not(source))]
        text: String,
    },

    #[display(fmt = "end date must not be before effective date")]
    InvalidDateRange,

    #[display(fmt = "salary is already inactive")]
    AlreadyRetired,

    #[display(fmt = "database error")]
    Store(sqlx::Error),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::Store(e)
    }
}

impl actix_web::ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::NotExistEmployee | LedgerError::NotExistSalary => StatusCode::NOT_FOUND,
            LedgerError::DateFormat { .. }
            | LedgerError::InvalidDateRange
            | LedgerError::AlreadyRetired => StatusCode::BAD_REQUEST,
            LedgerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LedgerError::Store(e) = self {
            error!(error = %e, "salary store failure");
        }
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}
