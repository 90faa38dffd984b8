// src/handlers/professionals.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::{
        appointment::NotificationSummary,
        professional::{Professional, ProfessionalPatch},
    },
};

// Cor padrão de exibição quando o payload não manda uma
const DEFAULT_COLOR: &str = "#4F46E5";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Carlos Andrade")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "carlos@barbeariadoze.com.br")]
    pub email: Option<String>,
    #[schema(example = "+5511988887777")]
    pub phone: Option<String>,

    #[schema(example = "#7C3AED")]
    pub color: Option<String>,

    #[schema(example = json!([2, 3, 4, 5, 6]))]
    pub working_days: Option<Vec<i16>>,
    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub workday_start: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub workday_end: Option<NaiveTime>,
}

// O cadastro volta junto com o resultado das boas-vindas: falha de envio
// não falha o cadastro, só aparece aqui.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalCreated {
    pub professional: Professional,
    pub notifications: NotificationSummary,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProfessionalsQuery {
    #[serde(default)]
    pub only_active: bool,
}

// POST /api/professionals
#[utoipa::path(
    post,
    path = "/api/professionals",
    tag = "Profissionais",
    request_body = CreateProfessionalPayload,
    responses(
        (status = 201, description = "Profissional cadastrado", body = ProfessionalCreated),
        (status = 409, description = "E-mail ou telefone já em uso")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_professional(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateProfessionalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (professional, notifications) = app_state
        .professional_service
        .create(
            company.0,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.color.as_deref().unwrap_or(DEFAULT_COLOR),
            payload.working_days.as_deref(),
            payload.workday_start,
            payload.workday_end,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProfessionalCreated { professional, notifications }),
    ))
}

// GET /api/professionals
#[utoipa::path(
    get,
    path = "/api/professionals",
    tag = "Profissionais",
    responses(
        (status = 200, description = "Lista de profissionais", body = Vec<Professional>)
    ),
    params(
        ("onlyActive" = bool, Query, description = "Só os ativos"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_professionals(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Query(query): Query<ListProfessionalsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let professionals = app_state
        .professional_service
        .list_by_company(company.0, query.only_active)
        .await?;

    Ok((StatusCode::OK, Json(professionals)))
}

// GET /api/professionals/{id}
#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    tag = "Profissionais",
    responses(
        (status = 200, description = "Profissional encontrado", body = Professional),
        (status = 404, description = "Profissional não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do profissional"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_professional(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let professional = app_state
        .professional_service
        .find_by_id(company.0, id)
        .await?;

    Ok((StatusCode::OK, Json(professional)))
}

// PATCH /api/professionals/{id}
#[utoipa::path(
    patch,
    path = "/api/professionals/{id}",
    tag = "Profissionais",
    request_body = ProfessionalPatch,
    responses(
        (status = 200, description = "Profissional atualizado", body = Professional),
        (status = 404, description = "Profissional não encontrado"),
        (status = 409, description = "E-mail ou telefone já em uso")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do profissional"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn update_professional(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProfessionalPatch>,
) -> Result<impl IntoResponse, AppError> {
    let professional = app_state
        .professional_service
        .update(company.0, id, patch)
        .await?;

    Ok((StatusCode::OK, Json(professional)))
}
