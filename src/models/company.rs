// src/models/company.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// A empresa É o tenant: todo o resto do sistema é escopado pelo id dela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    #[schema(example = "Barbearia do Zé")]
    pub name: String,

    #[schema(example = "contato@barbeariadoze.com.br")]
    pub email: Option<String>,
    #[schema(example = "+5511999990000")]
    pub phone: Option<String>,

    // Horário de funcionamento (hora de abrir / fechar)
    #[schema(value_type = String, example = "09:00:00")]
    pub opening_time: NaiveTime,
    #[schema(value_type = String, example = "19:00:00")]
    pub closing_time: NaiveTime,

    // Dias da semana ativos: 0 = domingo .. 6 = sábado
    // No Postgres é SMALLINT[], no Rust é Vec<i16>
    #[schema(example = json!([1, 2, 3, 4, 5, 6]))]
    pub working_days: Vec<i16>,

    pub active: bool,
    pub created_at: DateTime<Utc>,
}

// Patch parcial: campos ausentes mantêm o valor anterior.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub opening_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub closing_time: Option<NaiveTime>,
    pub working_days: Option<Vec<i16>>,
    pub active: Option<bool>,
}
