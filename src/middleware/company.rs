// src/middleware/company.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

// O nome do nosso cabeçalho HTTP customizado
const COMPANY_ID_HEADER: &str = "x-company-id";

// O contexto do tenant: o UUID da empresa que a requisição quer acessar.
#[derive(Debug, Clone)]
pub struct CompanyContext(pub Uuid);

// O guard: valida o cabeçalho, confirma que a empresa existe e está ativa,
// e injeta o contexto nos "extensions" da requisição.
pub async fn company_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(COMPANY_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::InvalidCompanyHeader)?;

    let company_id =
        Uuid::parse_str(header_value).map_err(|_| AppError::InvalidCompanyHeader)?;

    // Empresa inativa é tratada como inexistente
    let company = app_state.company_service.find_by_id(company_id).await?;
    if !company.active {
        return Err(AppError::CompanyNotFound);
    }

    request.extensions_mut().insert(CompanyContext(company.id));
    Ok(next.run(request).await)
}

// Extrator para obter o contexto diretamente nos handlers
impl<S> FromRequestParts<S> for CompanyContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CompanyContext>()
            .cloned()
            .ok_or(AppError::InvalidCompanyHeader)
    }
}
