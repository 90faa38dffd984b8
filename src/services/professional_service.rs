// src/services/professional_service.rs

use std::sync::Arc;

use chrono::NaiveTime;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyStore, CustomerStore, ProfessionalStore},
    models::{
        appointment::NotificationSummary,
        professional::{Professional, ProfessionalPatch},
    },
    notifications::{EmailNotifier, SmsNotifier, WelcomeNotice},
};

#[derive(Clone)]
pub struct ProfessionalService {
    professionals: Arc<dyn ProfessionalStore>,
    customers: Arc<dyn CustomerStore>,
    companies: Arc<dyn CompanyStore>,
    mailer: Arc<dyn EmailNotifier>,
    sms: Arc<dyn SmsNotifier>,
}

impl ProfessionalService {
    pub fn new(
        professionals: Arc<dyn ProfessionalStore>,
        customers: Arc<dyn CustomerStore>,
        companies: Arc<dyn CompanyStore>,
        mailer: Arc<dyn EmailNotifier>,
        sms: Arc<dyn SmsNotifier>,
    ) -> Self {
        Self { professionals, customers, companies, mailer, sms }
    }

    // E-mail e telefone são únicos no sistema inteiro, cruzando
    // profissionais E clientes. A regra mora aqui, não no banco.
    async fn ensure_contact_unique(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude_professional: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(email) = email {
            let taken = self.professionals.email_in_use(email, exclude_professional).await?
                || self.customers.email_in_use(email, None).await?;
            if taken {
                return Err(AppError::EmailAlreadyExists);
            }
        }
        if let Some(phone) = phone {
            let taken = self.professionals.phone_in_use(phone, exclude_professional).await?
                || self.customers.phone_in_use(phone, None).await?;
            if taken {
                return Err(AppError::PhoneAlreadyExists);
            }
        }
        Ok(())
    }

    /// Cadastra o profissional e dispara as boas-vindas. Mesma política de
    /// falha parcial do agendamento: o cadastro vale mesmo que nenhum
    /// canal de notificação funcione.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        color: &str,
        working_days: Option<&[i16]>,
        workday_start: Option<NaiveTime>,
        workday_end: Option<NaiveTime>,
    ) -> Result<(Professional, NotificationSummary), AppError> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        self.ensure_contact_unique(email, phone, None).await?;

        let professional = self
            .professionals
            .insert(
                company_id,
                name,
                email,
                phone,
                color,
                working_days,
                workday_start,
                workday_end,
            )
            .await?;

        let notice = WelcomeNotice {
            professional_name: professional.name.clone(),
            company_name: company.name.clone(),
        };

        let mut notifications = NotificationSummary::default();
        if let Some(email) = professional.email.as_deref() {
            let outcome = self.mailer.send_welcome(email, &notice).await;
            if let Some(err) = &outcome.error {
                tracing::warn!("Falha ao enviar e-mail de boas-vindas: {err}");
            }
            notifications.email = outcome.success;
        }
        if let Some(phone) = professional.phone.as_deref() {
            let outcome = self.sms.send_welcome(phone, &notice).await;
            if let Some(err) = &outcome.error {
                tracing::warn!("Falha ao enviar SMS de boas-vindas: {err}");
            }
            notifications.sms = outcome.success;
        }

        Ok((professional, notifications))
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: ProfessionalPatch,
    ) -> Result<Professional, AppError> {
        // Na atualização o próprio registro sai da checagem de unicidade
        self.ensure_contact_unique(patch.email.as_deref(), patch.phone.as_deref(), Some(id))
            .await?;

        self.professionals
            .update(company_id, id, &patch)
            .await?
            .ok_or(AppError::ProfessionalNotFound)
    }

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Professional, AppError> {
        self.professionals
            .find_by_id(company_id, id)
            .await?
            .ok_or(AppError::ProfessionalNotFound)
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Professional>, AppError> {
        self.professionals.list_by_company(company_id, only_active).await
    }
}
