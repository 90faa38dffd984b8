// src/handlers/customers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::customer::{Customer, CustomerPatch},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    #[schema(example = "+5511977776666")]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "max_length"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersQuery {
    #[serde(default)]
    pub only_active: bool,
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 409, description = "E-mail ou telefone já em uso")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .create(
            company.0,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Customer>)
    ),
    params(
        ("onlyActive" = bool, Query, description = "Só os ativos"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Query(query): Query<ListCustomersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .customer_service
        .list_by_company(company.0, query.only_active)
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.find_by_id(company.0, id).await?;

    Ok((StatusCode::OK, Json(customer)))
}

// PATCH /api/customers/{id}
#[utoipa::path(
    patch,
    path = "/api/customers/{id}",
    tag = "Clientes",
    request_body = CustomerPatch,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "E-mail ou telefone já em uso")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(id): Path<Uuid>,
    Json(patch): Json<CustomerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .update(company.0, id, patch)
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}
