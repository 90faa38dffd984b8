// src/services/appointment_service.rs

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AppointmentStore,
    models::appointment::{
        Appointment, AppointmentDetail, AppointmentFilter, AppointmentPatch, AppointmentStatus,
        NewAppointment, NotificationSummary,
    },
    notifications::{
        CancellationNotice, ConfirmationNotice, EmailNotifier, RescheduleNotice, SmsNotifier,
    },
};

// Resultado de `create` e `cancel`: a entidade pós-write mais o resumo dos
// disparos de notificação.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentOutcome {
    pub appointment: Appointment,
    pub notifications: NotificationSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdateOutcome {
    pub appointment: Appointment,
    pub rescheduled: bool,
    pub notifications: NotificationSummary,
}

// O orquestrador do ciclo de vida do agendamento. É o único consumidor do
// store e dos notificadores; tudo chega por injeção explícita, nada de
// singleton, para os testes trocarem por fakes em memória.
//
// A checagem de conflito e o write NÃO rodam numa transação única: duas
// criações simultâneas para o mesmo profissional podem ambas passar pela
// checagem antes de qualquer write (comportamento herdado do produto,
// documentado em DESIGN.md).
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    mailer: Arc<dyn EmailNotifier>,
    sms: Arc<dyn SmsNotifier>,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        mailer: Arc<dyn EmailNotifier>,
        sms: Arc<dyn SmsNotifier>,
    ) -> Self {
        Self { store, mailer, sms }
    }

    // =========================================================================
    //  CICLO DE VIDA
    // =========================================================================

    /// Cria um agendamento. Conflito de horário impede o write; falha de
    /// notificação NÃO desfaz nem falha a operação: ela só aparece como
    /// flag `false` no resumo.
    pub async fn create(&self, data: NewAppointment) -> Result<AppointmentOutcome, AppError> {
        // 1. Sem exclusão: é uma criação, nenhum registro é "eu mesmo"
        let conflict = self
            .store
            .has_conflict(data.professional_id, data.starts_at, data.ends_at, None)
            .await?;
        if conflict {
            return Err(AppError::SchedulingConflict);
        }

        // 2. O insert devolve a entidade completa
        let appointment = self.store.insert(&data).await?;

        // 3. Relê com as relações para montar o payload das notificações
        let mut notifications = NotificationSummary::default();
        if let Some(detail) = self
            .store
            .find_detailed(appointment.company_id, appointment.id)
            .await?
        {
            let notice = ConfirmationNotice {
                customer_name: detail.customer_name.clone(),
                company_name: detail.company_name.clone(),
                professional_name: detail.professional_name.clone(),
                service_name: detail.service_name.clone(),
                starts_at: appointment.starts_at,
                ends_at: appointment.ends_at,
            };

            // 4/5. Canal ausente = pulado, não contado como falha
            if let Some(email) = detail.customer_email.as_deref() {
                let outcome = self.mailer.send_confirmation(email, &notice).await;
                if let Some(err) = &outcome.error {
                    tracing::warn!("Falha ao enviar e-mail de confirmação: {err}");
                }
                notifications.email = outcome.success;
            }
            if let Some(phone) = detail.customer_phone.as_deref() {
                let outcome = self.sms.send_confirmation(phone, &notice).await;
                if let Some(err) = &outcome.error {
                    tracing::warn!("Falha ao enviar SMS de confirmação: {err}");
                }
                notifications.sms = outcome.success;
            }
        }

        Ok(AppointmentOutcome { appointment, notifications })
    }

    /// Atualização parcial. Se o patch mexe em início/fim/profissional, a
    /// checagem de conflito roda de novo excluindo o próprio registro.
    /// `rescheduled` compara só o INÍCIO efetivo com o anterior: mudar
    /// apenas o fim não dispara notificação de remarcação.
    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> Result<AppointmentUpdateOutcome, AppError> {
        // Snapshot pré-update: é dele que saem os contatos e os valores
        // "anteriores" da notificação de remarcação.
        let current = self
            .store
            .find_detailed(company_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        let mut rescheduled = false;
        if patch.touches_schedule() {
            let new_starts_at = patch.starts_at.unwrap_or(current.appointment.starts_at);
            let new_ends_at = patch.ends_at.unwrap_or(current.appointment.ends_at);
            let professional_id = patch
                .professional_id
                .unwrap_or(current.appointment.professional_id);

            let conflict = self
                .store
                .has_conflict(professional_id, new_starts_at, new_ends_at, Some(id))
                .await?;
            if conflict {
                return Err(AppError::SchedulingConflict);
            }

            rescheduled = new_starts_at != current.appointment.starts_at;
        }

        // O alvo pode ter sumido entre a leitura e o write (corrida)
        let appointment = self
            .store
            .update(company_id, id, &patch)
            .await?
            .ok_or(AppError::UpdateFailure)?;

        let mut notifications = NotificationSummary::default();
        if rescheduled {
            let notice = RescheduleNotice {
                customer_name: current.customer_name.clone(),
                company_name: current.company_name.clone(),
                professional_name: current.professional_name.clone(),
                service_name: current.service_name.clone(),
                previous_starts_at: current.appointment.starts_at,
                new_starts_at: appointment.starts_at,
                new_ends_at: appointment.ends_at,
            };

            if let Some(email) = current.customer_email.as_deref() {
                let outcome = self.mailer.send_reschedule(email, &notice).await;
                if let Some(err) = &outcome.error {
                    tracing::warn!("Falha ao enviar e-mail de remarcação: {err}");
                }
                notifications.email = outcome.success;
            }
            if let Some(phone) = current.customer_phone.as_deref() {
                let outcome = self.sms.send_reschedule(phone, &notice).await;
                if let Some(err) = &outcome.error {
                    tracing::warn!("Falha ao enviar SMS de remarcação: {err}");
                }
                notifications.sms = outcome.success;
            }
        }

        Ok(AppointmentUpdateOutcome { appointment, rescheduled, notifications })
    }

    /// Cancela (soft): só muda o status para `cancelado`, o registro nunca
    /// é apagado. Cancelar de novo passa de novo: não há guarda de
    /// idempotência aqui.
    pub async fn cancel(
        &self,
        company_id: Uuid,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<AppointmentOutcome, AppError> {
        let current = self
            .store
            .find_detailed(company_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Cancelado),
            ..Default::default()
        };
        let appointment = self
            .store
            .update(company_id, id, &patch)
            .await?
            .ok_or(AppError::UpdateFailure)?;

        let notice = CancellationNotice {
            customer_name: current.customer_name.clone(),
            company_name: current.company_name.clone(),
            service_name: current.service_name.clone(),
            starts_at: current.appointment.starts_at,
            reason,
        };

        let mut notifications = NotificationSummary::default();
        if let Some(email) = current.customer_email.as_deref() {
            let outcome = self.mailer.send_cancellation(email, &notice).await;
            if let Some(err) = &outcome.error {
                tracing::warn!("Falha ao enviar e-mail de cancelamento: {err}");
            }
            notifications.email = outcome.success;
        }
        if let Some(phone) = current.customer_phone.as_deref() {
            let outcome = self.sms.send_cancellation(phone, &notice).await;
            if let Some(err) = &outcome.error {
                tracing::warn!("Falha ao enviar SMS de cancelamento: {err}");
            }
            notifications.sms = outcome.success;
        }

        Ok(AppointmentOutcome { appointment, notifications })
    }

    // =========================================================================
    //  LEITURAS
    // =========================================================================

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Appointment, AppError> {
        self.store
            .find_by_id(company_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        self.store.list_by_company(company_id, filter).await
    }

    pub async fn list_detailed(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        self.store.list_detailed(company_id, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::appointment::intervals_overlap;
    use crate::notifications::{DispatchOutcome, WelcomeNotice};

    const COMPANY: Uuid = Uuid::from_u128(1);
    const CUSTOMER: Uuid = Uuid::from_u128(2);
    const PROFESSIONAL: Uuid = Uuid::from_u128(3);
    const SERVICE: Uuid = Uuid::from_u128(4);

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, min, 0).unwrap()
    }

    // Store em memória: mesma semântica do repositório Postgres, incluindo
    // o espelhamento do predicado de sobreposição.
    struct MemStore {
        items: Mutex<Vec<Appointment>>,
        customer_email: Option<String>,
        customer_phone: Option<String>,
        // Simula o alvo sumindo entre a leitura e o write
        vanish_on_update: AtomicBool,
    }

    impl MemStore {
        fn new(customer_email: Option<&str>, customer_phone: Option<&str>) -> Self {
            Self {
                items: Mutex::new(Vec::new()),
                customer_email: customer_email.map(String::from),
                customer_phone: customer_phone.map(String::from),
                vanish_on_update: AtomicBool::new(false),
            }
        }

        fn seed(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>, status: AppointmentStatus) -> Uuid {
            let id = Uuid::new_v4();
            self.items.lock().unwrap().push(Appointment {
                id,
                company_id: COMPANY,
                customer_id: CUSTOMER,
                professional_id: PROFESSIONAL,
                service_id: SERVICE,
                starts_at,
                ends_at,
                status,
                price: None,
                notes: None,
                created_at: at(8, 0),
            });
            id
        }

        fn count(&self) -> usize {
            self.items.lock().unwrap().len()
        }

        fn status_of(&self, id: Uuid) -> AppointmentStatus {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.status)
                .unwrap()
        }

        fn detail_for(&self, appointment: &Appointment) -> AppointmentDetail {
            AppointmentDetail {
                appointment: appointment.clone(),
                customer_name: "Maria da Silva".to_string(),
                customer_email: self.customer_email.clone(),
                customer_phone: self.customer_phone.clone(),
                professional_name: "Carlos Andrade".to_string(),
                service_name: "Corte masculino".to_string(),
                company_name: "Barbearia Teste".to_string(),
            }
        }
    }

    #[async_trait]
    impl AppointmentStore for MemStore {
        async fn find_by_id(
            &self,
            company_id: Uuid,
            id: Uuid,
        ) -> Result<Option<Appointment>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id && a.company_id == company_id)
                .cloned())
        }

        async fn find_detailed(
            &self,
            company_id: Uuid,
            id: Uuid,
        ) -> Result<Option<AppointmentDetail>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id && a.company_id == company_id)
                .map(|a| self.detail_for(a)))
        }

        async fn list_by_company(
            &self,
            company_id: Uuid,
            _filter: &AppointmentFilter,
        ) -> Result<Vec<Appointment>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.company_id == company_id)
                .cloned()
                .collect())
        }

        async fn list_detailed(
            &self,
            company_id: Uuid,
            _filter: &AppointmentFilter,
        ) -> Result<Vec<AppointmentDetail>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.company_id == company_id)
                .map(|a| self.detail_for(a))
                .collect())
        }

        async fn insert(&self, data: &NewAppointment) -> Result<Appointment, AppError> {
            let appointment = Appointment {
                id: Uuid::new_v4(),
                company_id: data.company_id,
                customer_id: data.customer_id,
                professional_id: data.professional_id,
                service_id: data.service_id,
                starts_at: data.starts_at,
                ends_at: data.ends_at,
                status: AppointmentStatus::Agendado,
                price: data.price,
                notes: data.notes.clone(),
                created_at: at(8, 0),
            };
            self.items.lock().unwrap().push(appointment.clone());
            Ok(appointment)
        }

        async fn update(
            &self,
            company_id: Uuid,
            id: Uuid,
            patch: &AppointmentPatch,
        ) -> Result<Option<Appointment>, AppError> {
            if self.vanish_on_update.load(Ordering::SeqCst) {
                return Ok(None);
            }
            let mut items = self.items.lock().unwrap();
            let Some(a) = items
                .iter_mut()
                .find(|a| a.id == id && a.company_id == company_id)
            else {
                return Ok(None);
            };

            if let Some(v) = patch.service_id {
                a.service_id = v;
            }
            if let Some(v) = patch.professional_id {
                a.professional_id = v;
            }
            if let Some(v) = patch.starts_at {
                a.starts_at = v;
            }
            if let Some(v) = patch.ends_at {
                a.ends_at = v;
            }
            if let Some(v) = &patch.notes {
                a.notes = Some(v.clone());
            }
            if let Some(v) = patch.price {
                a.price = Some(v);
            }
            if let Some(v) = patch.status {
                a.status = v;
            }

            Ok(Some(a.clone()))
        }

        async fn has_conflict(
            &self,
            professional_id: Uuid,
            starts_at: DateTime<Utc>,
            ends_at: DateTime<Utc>,
            exclude_id: Option<Uuid>,
        ) -> Result<bool, AppError> {
            Ok(self.items.lock().unwrap().iter().any(|a| {
                a.professional_id == professional_id
                    && a.status != AppointmentStatus::Cancelado
                    && exclude_id != Some(a.id)
                    && intervals_overlap(starts_at, ends_at, a.starts_at, a.ends_at)
            }))
        }
    }

    // Notificadores fake: registram cada disparo e devolvem sucesso ou
    // falha conforme configurado; nunca Err, igual aos reais.
    struct FakeMailer {
        succeed: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeMailer {
        fn new(succeed: bool) -> Self {
            Self { succeed, calls: Mutex::new(Vec::new()) }
        }

        fn record(&self, entry: String) -> DispatchOutcome {
            self.calls.lock().unwrap().push(entry);
            if self.succeed {
                DispatchOutcome::ok()
            } else {
                DispatchOutcome::failed("smtp indisponível")
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmailNotifier for FakeMailer {
        async fn send_welcome(&self, to: &str, _notice: &WelcomeNotice) -> DispatchOutcome {
            self.record(format!("welcome:{to}"))
        }
        async fn send_confirmation(
            &self,
            to: &str,
            _notice: &ConfirmationNotice,
        ) -> DispatchOutcome {
            self.record(format!("confirmation:{to}"))
        }
        async fn send_reschedule(&self, to: &str, notice: &RescheduleNotice) -> DispatchOutcome {
            self.record(format!(
                "reschedule:{to}:{}->{}",
                notice.previous_starts_at, notice.new_starts_at
            ))
        }
        async fn send_cancellation(
            &self,
            to: &str,
            notice: &CancellationNotice,
        ) -> DispatchOutcome {
            self.record(format!(
                "cancellation:{to}:{}",
                notice.reason.clone().unwrap_or_default()
            ))
        }
    }

    struct FakeSms {
        succeed: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSms {
        fn new(succeed: bool) -> Self {
            Self { succeed, calls: Mutex::new(Vec::new()) }
        }

        fn record(&self, entry: String) -> DispatchOutcome {
            self.calls.lock().unwrap().push(entry);
            if self.succeed {
                DispatchOutcome::ok()
            } else {
                DispatchOutcome::failed("provedor de SMS respondeu 500")
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SmsNotifier for FakeSms {
        async fn send_welcome(&self, to: &str, _notice: &WelcomeNotice) -> DispatchOutcome {
            self.record(format!("welcome:{to}"))
        }
        async fn send_confirmation(
            &self,
            to: &str,
            _notice: &ConfirmationNotice,
        ) -> DispatchOutcome {
            self.record(format!("confirmation:{to}"))
        }
        async fn send_reschedule(&self, to: &str, _notice: &RescheduleNotice) -> DispatchOutcome {
            self.record(format!("reschedule:{to}"))
        }
        async fn send_cancellation(
            &self,
            to: &str,
            _notice: &CancellationNotice,
        ) -> DispatchOutcome {
            self.record(format!("cancellation:{to}"))
        }
    }

    struct Fixture {
        store: Arc<MemStore>,
        mailer: Arc<FakeMailer>,
        sms: Arc<FakeSms>,
        service: AppointmentService,
    }

    fn fixture(store: MemStore, mailer: FakeMailer, sms: FakeSms) -> Fixture {
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);
        let sms = Arc::new(sms);
        let service = AppointmentService::new(store.clone(), mailer.clone(), sms.clone());
        Fixture { store, mailer, sms, service }
    }

    fn new_appointment(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> NewAppointment {
        NewAppointment {
            company_id: COMPANY,
            customer_id: CUSTOMER,
            professional_id: PROFESSIONAL,
            service_id: SERVICE,
            starts_at,
            ends_at,
            price: None,
            notes: None,
        }
    }

    // --- create ---

    #[tokio::test]
    async fn create_com_conflito_falha_sem_gravar() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), Some("+5511977776666")),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let result = fx.service.create(new_appointment(at(10, 15), at(10, 45))).await;

        assert!(matches!(result, Err(AppError::SchedulingConflict)));
        assert_eq!(fx.store.count(), 1);
        assert!(fx.mailer.calls().is_empty());
        assert!(fx.sms.calls().is_empty());
    }

    // Comportamento herdado: horários "colados" são rejeitados.
    #[tokio::test]
    async fn create_colado_na_borda_tambem_conflita() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let result = fx.service.create(new_appointment(at(10, 30), at(11, 0))).await;

        assert!(matches!(result, Err(AppError::SchedulingConflict)));
    }

    #[tokio::test]
    async fn create_ignora_agendamentos_cancelados() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), Some("+5511977776666")),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Cancelado);

        let outcome = fx
            .service
            .create(new_appointment(at(10, 0), at(10, 30)))
            .await
            .unwrap();

        assert_eq!(outcome.appointment.status, AppointmentStatus::Agendado);
        assert_eq!(fx.store.count(), 2);
    }

    #[tokio::test]
    async fn create_so_com_email_nunca_tenta_sms() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );

        let outcome = fx
            .service
            .create(new_appointment(at(9, 0), at(9, 30)))
            .await
            .unwrap();

        assert!(outcome.notifications.email);
        assert!(!outcome.notifications.sms);
        assert_eq!(fx.mailer.calls(), vec!["confirmation:maria@email.com"]);
        assert!(fx.sms.calls().is_empty());
    }

    #[tokio::test]
    async fn falha_de_notificacao_nao_desfaz_o_write() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), Some("+5511977776666")),
            FakeMailer::new(false),
            FakeSms::new(false),
        );

        let outcome = fx
            .service
            .create(new_appointment(at(9, 0), at(9, 30)))
            .await
            .unwrap();

        // O agendamento existe; só as flags denunciam a falha de envio
        assert_eq!(fx.store.count(), 1);
        assert!(!outcome.notifications.email);
        assert!(!outcome.notifications.sms);
        assert_eq!(fx.mailer.calls().len(), 1);
        assert_eq!(fx.sms.calls().len(), 1);
    }

    // --- update ---

    #[tokio::test]
    async fn update_so_de_notas_nao_remarca() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let patch = AppointmentPatch {
            notes: Some("trazer referência de corte".to_string()),
            ..Default::default()
        };
        let outcome = fx.service.update(COMPANY, id, patch).await.unwrap();

        assert!(!outcome.rescheduled);
        assert!(fx.mailer.calls().is_empty());
        assert!(fx.sms.calls().is_empty());
    }

    #[tokio::test]
    async fn update_de_inicio_remarca_e_notifica() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), Some("+5511977776666")),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let patch = AppointmentPatch {
            starts_at: Some(at(14, 0)),
            ends_at: Some(at(14, 30)),
            ..Default::default()
        };
        let outcome = fx.service.update(COMPANY, id, patch).await.unwrap();

        assert!(outcome.rescheduled);
        assert_eq!(outcome.appointment.starts_at, at(14, 0));
        assert!(outcome.notifications.email);
        assert!(outcome.notifications.sms);
        // "anterior" vem do snapshot pré-update, "novo" do pós-update
        assert_eq!(
            fx.mailer.calls(),
            vec![format!("reschedule:maria@email.com:{}->{}", at(10, 0), at(14, 0))]
        );
    }

    // Assimetria herdada: mudar só o fim não dispara remarcação.
    #[tokio::test]
    async fn update_so_do_fim_nao_remarca() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let patch = AppointmentPatch { ends_at: Some(at(10, 45)), ..Default::default() };
        let outcome = fx.service.update(COMPANY, id, patch).await.unwrap();

        assert!(!outcome.rescheduled);
        assert!(fx.mailer.calls().is_empty());
    }

    // O registro nunca conflita consigo mesmo na checagem do update.
    #[tokio::test]
    async fn update_exclui_o_proprio_registro_da_checagem() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        // Desliza 15 minutos por cima do próprio horário
        let patch = AppointmentPatch {
            starts_at: Some(at(10, 15)),
            ends_at: Some(at(10, 45)),
            ..Default::default()
        };
        let outcome = fx.service.update(COMPANY, id, patch).await.unwrap();

        assert!(outcome.rescheduled);
    }

    #[tokio::test]
    async fn update_conflitando_com_outro_falha_sem_gravar() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);
        fx.store.seed(at(11, 0), at(11, 30), AppointmentStatus::Agendado);

        let patch = AppointmentPatch {
            starts_at: Some(at(11, 15)),
            ends_at: Some(at(11, 45)),
            ..Default::default()
        };
        let result = fx.service.update(COMPANY, id, patch).await;

        assert!(matches!(result, Err(AppError::SchedulingConflict)));
        // O horário anterior ficou intacto
        let kept = fx.store.find_by_id(COMPANY, id).await.unwrap().unwrap();
        assert_eq!(kept.starts_at, at(10, 0));
    }

    #[tokio::test]
    async fn update_de_id_inexistente_da_not_found() {
        let fx = fixture(
            MemStore::new(None, None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );

        let result = fx
            .service
            .update(COMPANY, Uuid::new_v4(), AppointmentPatch::default())
            .await;

        assert!(matches!(result, Err(AppError::AppointmentNotFound)));
    }

    #[tokio::test]
    async fn alvo_sumindo_entre_leitura_e_write_da_update_failure() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        // A leitura acha o registro, o write não
        fx.store.vanish_on_update.store(true, Ordering::SeqCst);

        let patch = AppointmentPatch {
            notes: Some("observação".to_string()),
            ..Default::default()
        };
        let result = fx.service.update(COMPANY, id, patch).await;

        assert!(matches!(result, Err(AppError::UpdateFailure)));
    }

    // --- cancel ---

    #[tokio::test]
    async fn cancel_marca_status_e_notifica_com_motivo() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), Some("+5511977776666")),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        let outcome = fx
            .service
            .cancel(COMPANY, id, Some("imprevisto do cliente".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.appointment.status, AppointmentStatus::Cancelado);
        assert!(outcome.notifications.email);
        assert!(outcome.notifications.sms);
        assert_eq!(
            fx.mailer.calls(),
            vec!["cancellation:maria@email.com:imprevisto do cliente"]
        );
    }

    // Não há guarda de idempotência: cancelar duas vezes passa duas vezes.
    #[tokio::test]
    async fn cancel_duas_vezes_passa_duas_vezes() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        fx.service.cancel(COMPANY, id, None).await.unwrap();
        let second = fx.service.cancel(COMPANY, id, None).await;

        assert!(second.is_ok());
        assert_eq!(fx.store.status_of(id), AppointmentStatus::Cancelado);
        // As notificações saíram nas duas chamadas
        assert_eq!(fx.mailer.calls().len(), 2);
    }

    #[tokio::test]
    async fn cancelado_libera_o_horario_para_novo_create() {
        let fx = fixture(
            MemStore::new(Some("maria@email.com"), None),
            FakeMailer::new(true),
            FakeSms::new(true),
        );
        let id = fx.store.seed(at(10, 0), at(10, 30), AppointmentStatus::Agendado);

        fx.service.cancel(COMPANY, id, None).await.unwrap();

        let outcome = fx
            .service
            .create(new_appointment(at(10, 0), at(10, 30)))
            .await
            .unwrap();
        assert_eq!(outcome.appointment.status, AppointmentStatus::Agendado);
    }

    // --- cenário ponta a ponta ---

    #[tokio::test]
    async fn cenario_completo_de_criacao_e_conflito() {
        let fx = fixture(
            MemStore::new(Some("karla@email.com"), Some("+5511966665555")),
            FakeMailer::new(true),
            FakeSms::new(true),
        );

        let outcome = fx
            .service
            .create(new_appointment(at(9, 0), at(9, 30)))
            .await
            .unwrap();

        assert_eq!(outcome.appointment.status, AppointmentStatus::Agendado);
        assert!(outcome.notifications.email);
        assert!(outcome.notifications.sms);

        // Mesmo profissional, mesmo horário: segunda criação cai fora
        let second = fx.service.create(new_appointment(at(9, 0), at(9, 30))).await;
        assert!(matches!(second, Err(AppError::SchedulingConflict)));
        assert_eq!(fx.store.count(), 1);
    }
}
