// src/notifications/sms.rs

use reqwest::Client;

use super::{
    format_br, CancellationNotice, ConfirmationNotice, DispatchOutcome, RescheduleNotice,
    SmsNotifier, WelcomeNotice,
};

#[derive(Debug, Clone)]
pub struct SmsConfig {
    // Ex: "https://api.twilio.com/2010-04-01"
    pub base_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

// Dispara SMS via API REST do provedor (autenticação básica + form).
pub struct HttpSmsSender {
    http_client: Client,
    config: SmsConfig,
}

impl HttpSmsSender {
    pub fn new(config: SmsConfig) -> Self {
        Self { http_client: Client::new(), config }
    }

    // Uma tentativa só; qualquer falha vira DispatchOutcome::failed.
    async fn deliver(&self, to: &str, body: String) -> DispatchOutcome {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.config.base_url, self.config.account_sid
        );

        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => DispatchOutcome::ok(),
            Ok(resp) => DispatchOutcome::failed(format!(
                "provedor de SMS respondeu {}",
                resp.status()
            )),
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl SmsNotifier for HttpSmsSender {
    async fn send_welcome(&self, to: &str, notice: &WelcomeNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!(
                "{}: bem-vindo(a) à equipe, {}! Seus horários já podem receber agendamentos.",
                notice.company_name, notice.professional_name
            ),
        )
        .await
    }

    async fn send_confirmation(&self, to: &str, notice: &ConfirmationNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!(
                "{}: {} confirmado com {} em {}.",
                notice.company_name,
                notice.service_name,
                notice.professional_name,
                format_br(notice.starts_at)
            ),
        )
        .await
    }

    async fn send_reschedule(&self, to: &str, notice: &RescheduleNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!(
                "{}: seu {} foi remarcado de {} para {}.",
                notice.company_name,
                notice.service_name,
                format_br(notice.previous_starts_at),
                format_br(notice.new_starts_at)
            ),
        )
        .await
    }

    async fn send_cancellation(&self, to: &str, notice: &CancellationNotice) -> DispatchOutcome {
        let reason = match &notice.reason {
            Some(r) => format!(" Motivo: {r}."),
            None => String::new(),
        };
        self.deliver(
            to,
            format!(
                "{}: seu {} de {} foi cancelado.{}",
                notice.company_name,
                notice.service_name,
                format_br(notice.starts_at),
                reason
            ),
        )
        .await
    }
}
