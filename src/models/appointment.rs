// src/models/appointment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// --- ENUMS ---

// Mapeia o CREATE TYPE appointment_status do banco.
// 'cancelado' é terminal: o registro nunca é apagado fisicamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Agendado,
    Confirmado,
    Cancelado,
}

// --- O AGENDAMENTO ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,

    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,

    // Início e fim são ambos gravados; o fim nunca é derivado da duração
    // do serviço na leitura.
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    pub status: AppointmentStatus,

    // Valor final fechado com o cliente; quando nulo vale o preço de tabela
    #[schema(example = "45.00")]
    pub price: Option<Decimal>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Dados de inserção; o id e o created_at são gerados pelo banco.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub company_id: Uuid,
    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price: Option<Decimal>,
    pub notes: Option<String>,
}

// Patch parcial: campos ausentes mantêm o valor anterior.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub service_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    /// O patch mexe no intervalo ou no profissional? Se sim, a checagem de
    /// conflito precisa rodar de novo antes do write.
    pub fn touches_schedule(&self) -> bool {
        self.starts_at.is_some() || self.ends_at.is_some() || self.professional_id.is_some()
    }
}

// Filtros opcionais das listagens, combinados com AND.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AppointmentFilter {
    pub customer_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

// --- LEITURA DESNORMALIZADA ---

// Junta cliente, profissional, serviço e empresa numa leitura só.
// É daqui que saem os dados das notificações.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub appointment: Appointment,

    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub professional_name: String,
    pub service_name: String,
    pub company_name: String,
}

// Resultado dos disparos de notificação de uma operação do ciclo de vida.
// Falha de envio nunca derruba o write principal; ela aparece aqui.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub email: bool,
    pub sms: bool,
}

// --- CHECAGEM DE SOBREPOSIÇÃO ---

/// Compara o intervalo candidato com um intervalo já existente.
///
/// As três cláusulas reproduzem a regra herdada do produto: encostar na
/// borda (fim de um == início do outro) CONTA como conflito, então dois
/// atendimentos "colados" são rejeitados. A query SQL de conflito no
/// repositório espelha estas cláusulas uma a uma.
pub fn intervals_overlap(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
) -> bool {
    // 1. O existente cobre o início do candidato
    (existing_start <= candidate_start && existing_end >= candidate_start)
        // 2. O existente cobre o fim do candidato
        || (existing_start <= candidate_end && existing_end >= candidate_end)
        // 3. O candidato engole o existente por inteiro
        || (candidate_start <= existing_start && candidate_end >= existing_end)
}
