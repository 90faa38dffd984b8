// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Corte masculino")]
    pub name: String,

    #[schema(example = 30)]
    pub duration_minutes: i32,

    // Preço de tabela; o agendamento pode sobrescrever com um valor final
    #[schema(example = "50.00")]
    pub price: Decimal,

    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}
