// src/notifications/email.rs

use lettre::{
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use super::{
    format_br, CancellationNotice, ConfirmationNotice, DispatchOutcome, EmailNotifier,
    RescheduleNotice, WelcomeNotice,
};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    // Ex: "AgendaPro <nao-responda@agendapro.com.br>"
    pub from: String,
}

// Envia e-mail transacional via SMTP.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> anyhow::Result<Self> {
        let from: Mailbox = config.from.parse()?;
        let transport = SmtpTransport::relay(&config.host)?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self { transport, from })
    }

    // Uma tentativa só; qualquer falha vira DispatchOutcome::failed.
    fn deliver(&self, to: &str, subject: String, body: String) -> DispatchOutcome {
        let mailbox: Mailbox = match to.parse() {
            Ok(mb) => mb,
            Err(e) => return DispatchOutcome::failed(format!("destinatário inválido: {e}")),
        };

        let message = match Message::builder()
            .from(self.from.clone())
            .to(mailbox)
            .subject(subject)
            .body(body)
        {
            Ok(m) => m,
            Err(e) => return DispatchOutcome::failed(format!("falha ao montar e-mail: {e}")),
        };

        match self.transport.send(&message) {
            Ok(_) => DispatchOutcome::ok(),
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl EmailNotifier for SmtpMailer {
    async fn send_welcome(&self, to: &str, notice: &WelcomeNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!("Bem-vindo(a) à equipe de {}", notice.company_name),
            format!(
                "Olá, {}!\n\nSeu cadastro como profissional de {} foi concluído. \
                 A partir de agora seus horários já podem receber agendamentos.\n",
                notice.professional_name, notice.company_name
            ),
        )
    }

    async fn send_confirmation(&self, to: &str, notice: &ConfirmationNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!("Agendamento confirmado - {}", notice.company_name),
            format!(
                "Olá, {}!\n\nSeu agendamento de {} com {} está confirmado \
                 para {} (término previsto {}).\n\nAté lá!\n{}\n",
                notice.customer_name,
                notice.service_name,
                notice.professional_name,
                format_br(notice.starts_at),
                format_br(notice.ends_at),
                notice.company_name
            ),
        )
    }

    async fn send_reschedule(&self, to: &str, notice: &RescheduleNotice) -> DispatchOutcome {
        self.deliver(
            to,
            format!("Agendamento remarcado - {}", notice.company_name),
            format!(
                "Olá, {}!\n\nSeu agendamento de {} com {} foi remarcado: \
                 de {} para {} (término previsto {}).\n\n{}\n",
                notice.customer_name,
                notice.service_name,
                notice.professional_name,
                format_br(notice.previous_starts_at),
                format_br(notice.new_starts_at),
                format_br(notice.new_ends_at),
                notice.company_name
            ),
        )
    }

    async fn send_cancellation(&self, to: &str, notice: &CancellationNotice) -> DispatchOutcome {
        let reason = match &notice.reason {
            Some(r) => format!("\nMotivo: {r}\n"),
            None => String::new(),
        };
        self.deliver(
            to,
            format!("Agendamento cancelado - {}", notice.company_name),
            format!(
                "Olá, {}.\n\nSeu agendamento de {} marcado para {} foi cancelado.\n{}\n{}\n",
                notice.customer_name,
                notice.service_name,
                format_br(notice.starts_at),
                reason,
                notice.company_name
            ),
        )
    }
}
