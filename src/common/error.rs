use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Falha de notificação NÃO entra aqui: ela volta como flag no payload
// de resultado, nunca como erro da operação principal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // O intervalo pedido sobrepõe um agendamento ativo do profissional
    #[error("Conflito de horário")]
    SchedulingConflict,

    #[error("Intervalo inválido")]
    InvalidInterval,

    #[error("Cabeçalho x-company-id ausente ou inválido")]
    InvalidCompanyHeader,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Telefone já existe")]
    PhoneAlreadyExists,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Profissional não encontrado")]
    ProfessionalNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Agendamento não encontrado")]
    AppointmentNotFound,

    // O registro sumiu entre a leitura e o write (corrida); o caller pode
    // simplesmente tentar de novo.
    #[error("Falha ao aplicar a atualização")]
    UpdateFailure,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::SchedulingConflict => {
                (StatusCode::CONFLICT, "Já existe um agendamento neste horário para o profissional.")
            }
            AppError::InvalidInterval => {
                (StatusCode::BAD_REQUEST, "O término deve ser depois do início.")
            }
            AppError::InvalidCompanyHeader => {
                (StatusCode::BAD_REQUEST, "O cabeçalho x-company-id é obrigatório e deve ser um UUID.")
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::PhoneAlreadyExists => (StatusCode::CONFLICT, "Este telefone já está em uso."),
            AppError::UpdateFailure => {
                (StatusCode::CONFLICT, "O registro mudou durante a operação. Tente novamente.")
            }
            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Empresa não encontrada."),
            AppError::ProfessionalNotFound => (StatusCode::NOT_FOUND, "Profissional não encontrado."),
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::ServiceNotFound => (StatusCode::NOT_FOUND, "Serviço não encontrado."),
            AppError::AppointmentNotFound => (StatusCode::NOT_FOUND, "Agendamento não encontrado."),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada; o caller só vê o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
