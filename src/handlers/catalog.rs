// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::catalog::{Service, ServicePatch},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Corte masculino")]
    pub name: String,

    #[validate(range(min = 1, message = "A duração deve ser positiva"))]
    #[schema(example = 30)]
    pub duration_minutes: i32,

    #[schema(example = "50.00")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkProfessionalPayload {
    pub professional_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesQuery {
    #[serde(default)]
    pub only_active: bool,
    // Restringe ao que o profissional executa
    pub professional_id: Option<Uuid>,
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Serviços",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .create(company.0, &payload.name, payload.duration_minutes, payload.price)
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Serviços",
    responses(
        (status = 200, description = "Lista de serviços", body = Vec<Service>)
    ),
    params(
        ("onlyActive" = bool, Query, description = "Só os ativos"),
        ("professionalId" = Option<Uuid>, Query, description = "Só o que este profissional executa"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Query(query): Query<ListServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state
        .catalog_service
        .list_by_company(company.0, query.only_active, query.professional_id)
        .await?;

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Serviços",
    responses(
        (status = 200, description = "Serviço encontrado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do serviço"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.catalog_service.find_by_id(company.0, id).await?;

    Ok((StatusCode::OK, Json(service)))
}

// PATCH /api/services/{id}
#[utoipa::path(
    patch,
    path = "/api/services/{id}",
    tag = "Serviços",
    request_body = ServicePatch,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do serviço"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    Json(patch): Json<ServicePatch>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state
        .catalog_service
        .update(company.0, id, patch)
        .await?;

    Ok((StatusCode::OK, Json(service)))
}

// POST /api/services/{id}/professionals
#[utoipa::path(
    post,
    path = "/api/services/{id}/professionals",
    tag = "Serviços",
    request_body = LinkProfessionalPayload,
    responses(
        (status = 204, description = "Profissional vinculado ao serviço"),
        (status = 404, description = "Serviço ou profissional não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do serviço"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn link_professional(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkProfessionalPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .link_professional(company.0, id, payload.professional_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
