// src/models/professional.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O recurso agendável: é contra a agenda dele que o conflito é checado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Carlos Andrade")]
    pub name: String,
    #[schema(example = "carlos@barbeariadoze.com.br")]
    pub email: Option<String>,
    #[schema(example = "+5511988887777")]
    pub phone: Option<String>,

    // Cor de exibição na agenda do frontend
    #[schema(example = "#7C3AED")]
    pub color: String,

    // Jornada própria; quando nula, vale o horário da empresa
    #[schema(example = json!([2, 3, 4, 5, 6]))]
    pub working_days: Option<Vec<i16>>,
    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub workday_start: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub workday_end: Option<NaiveTime>,

    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub color: Option<String>,
    pub working_days: Option<Vec<i16>>,
    #[schema(value_type = Option<String>)]
    pub workday_start: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub workday_end: Option<NaiveTime>,
    pub active: Option<bool>,
}
