// src/notifications.rs

pub mod email;
pub use email::SmtpMailer;
pub mod sms;
pub use sms::HttpSmsSender;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

// =============================================================================
//  CONTRATO DE DISPARO
// =============================================================================
//
// Os notificadores são fire-and-forget em relação ao write principal:
// uma tentativa por evento, sem retry, e NUNCA retornam Err: qualquer
// falha vem embrulhada no DispatchOutcome.

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}

// --- Dados dos templates ---

#[derive(Debug, Clone)]
pub struct WelcomeNotice {
    pub professional_name: String,
    pub company_name: String,
}

#[derive(Debug, Clone)]
pub struct ConfirmationNotice {
    pub customer_name: String,
    pub company_name: String,
    pub professional_name: String,
    pub service_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

// "previous" vem do snapshot pré-update; "new" vem do patch aplicado.
#[derive(Debug, Clone)]
pub struct RescheduleNotice {
    pub customer_name: String,
    pub company_name: String,
    pub professional_name: String,
    pub service_name: String,
    pub previous_starts_at: DateTime<Utc>,
    pub new_starts_at: DateTime<Utc>,
    pub new_ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CancellationNotice {
    pub customer_name: String,
    pub company_name: String,
    pub service_name: String,
    pub starts_at: DateTime<Utc>,
    pub reason: Option<String>,
}

#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send_welcome(&self, to: &str, notice: &WelcomeNotice) -> DispatchOutcome;
    async fn send_confirmation(&self, to: &str, notice: &ConfirmationNotice) -> DispatchOutcome;
    async fn send_reschedule(&self, to: &str, notice: &RescheduleNotice) -> DispatchOutcome;
    async fn send_cancellation(&self, to: &str, notice: &CancellationNotice) -> DispatchOutcome;
}

#[async_trait]
pub trait SmsNotifier: Send + Sync {
    async fn send_welcome(&self, to: &str, notice: &WelcomeNotice) -> DispatchOutcome;
    async fn send_confirmation(&self, to: &str, notice: &ConfirmationNotice) -> DispatchOutcome;
    async fn send_reschedule(&self, to: &str, notice: &RescheduleNotice) -> DispatchOutcome;
    async fn send_cancellation(&self, to: &str, notice: &CancellationNotice) -> DispatchOutcome;
}

// Formato de data/hora usado em todos os templates.
pub(crate) fn format_br(dt: DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}
