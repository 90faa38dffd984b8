// src/handlers/appointments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::appointment::{
        Appointment, AppointmentDetail, AppointmentFilter, AppointmentPatch, NewAppointment,
    },
    services::appointment_service::{AppointmentOutcome, AppointmentUpdateOutcome},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,

    #[schema(value_type = String, example = "2025-03-10T09:00:00Z")]
    pub starts_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2025-03-10T09:30:00Z")]
    pub ends_at: DateTime<Utc>,

    #[validate(length(max = 500, message = "max_length"))]
    pub notes: Option<String>,
    #[schema(example = "45.00")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentPayload {
    #[schema(example = "Cliente pediu para desmarcar")]
    pub reason: Option<String>,
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agendamentos",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = AppointmentOutcome),
        (status = 409, description = "Conflito de horário para o profissional")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O intervalo chega pronto do caller; o mínimo que o handler garante
    // é que ele não está invertido.
    if payload.ends_at <= payload.starts_at {
        return Err(AppError::InvalidInterval);
    }

    let outcome = app_state
        .appointment_service
        .create(NewAppointment {
            company_id: company.0,
            customer_id: payload.customer_id,
            professional_id: payload.professional_id,
            service_id: payload.service_id,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
            price: payload.price,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agendamentos",
    responses(
        (status = 200, description = "Lista de agendamentos", body = Vec<Appointment>)
    ),
    params(
        AppointmentFilter,
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Query(filter): Query<AppointmentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state
        .appointment_service
        .list_by_company(company.0, &filter)
        .await?;

    Ok((StatusCode::OK, Json(appointments)))
}

// GET /api/appointments/detailed
#[utoipa::path(
    get,
    path = "/api/appointments/detailed",
    tag = "Agendamentos",
    responses(
        (status = 200, description = "Lista desnormalizada (cliente, profissional, serviço, empresa)", body = Vec<AppointmentDetail>)
    ),
    params(
        AppointmentFilter,
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_appointments_detailed(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Query(filter): Query<AppointmentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let details = app_state
        .appointment_service
        .list_detailed(company.0, &filter)
        .await?;

    Ok((StatusCode::OK, Json(details)))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    responses(
        (status = 200, description = "Agendamento encontrado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state.appointment_service.find_by_id(company.0, id).await?;

    Ok((StatusCode::OK, Json(appointment)))
}

// PATCH /api/appointments/{id}
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    tag = "Agendamentos",
    request_body = AppointmentPatch,
    responses(
        (status = 200, description = "Agendamento atualizado", body = AppointmentUpdateOutcome),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Conflito de horário para o profissional")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<impl IntoResponse, AppError> {
    // Só dá para validar a ordem quando o patch traz as duas pontas;
    // com uma ponta só, quem resolve o intervalo efetivo é o serviço.
    if let (Some(starts_at), Some(ends_at)) = (patch.starts_at, patch.ends_at) {
        if ends_at <= starts_at {
            return Err(AppError::InvalidInterval);
        }
    }

    let outcome = app_state
        .appointment_service
        .update(company.0, id, patch)
        .await?;

    Ok((StatusCode::OK, Json(outcome)))
}

// POST /api/appointments/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/cancel",
    tag = "Agendamentos",
    request_body = CancelAppointmentPayload,
    responses(
        (status = 200, description = "Agendamento cancelado", body = AppointmentOutcome),
        (status = 404, description = "Agendamento não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn cancel_appointment(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    payload: Option<Json<CancelAppointmentPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);

    let outcome = app_state
        .appointment_service
        .cancel(company.0, id, reason)
        .await?;

    Ok((StatusCode::OK, Json(outcome)))
}
