// src/handlers/companies.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::company::{Company, CompanyPatch},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Barbearia do Zé")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "contato@barbeariadoze.com.br")]
    pub email: Option<String>,
    #[schema(example = "+5511999990000")]
    pub phone: Option<String>,

    #[schema(value_type = String, example = "09:00:00")]
    pub opening_time: NaiveTime,
    #[schema(value_type = String, example = "19:00:00")]
    pub closing_time: NaiveTime,

    // 0 = domingo .. 6 = sábado
    #[schema(example = json!([1, 2, 3, 4, 5, 6]))]
    pub working_days: Vec<i16>,
}

// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Empresas",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state
        .company_service
        .create(
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.opening_time,
            payload.closing_time,
            &payload.working_days,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Empresas",
    responses(
        (status = 200, description = "Empresa encontrada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    )
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.find_by_id(id).await?;

    Ok((StatusCode::OK, Json(company)))
}

// PATCH /api/companies/{id}
#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    tag = "Empresas",
    request_body = CompanyPatch,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CompanyPatch>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.update(id, patch).await?;

    Ok((StatusCode::OK, Json(company)))
}
