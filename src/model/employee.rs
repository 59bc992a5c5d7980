use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 3,
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "phone": "+84901234567",
        "address": "12 Tran Phu, Da Nang",
        "gender": "male",
        "active": true
    })
)]
pub struct Employee {
    #[schema(example = 3)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "+84901234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "12 Tran Phu, Da Nang", nullable = true)]
    pub address: Option<String>,

    #[schema(example = "male", nullable = true)]
    pub gender: Option<String>,

    #[schema(example = true)]
    pub active: bool,
}
