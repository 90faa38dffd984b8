// src/db/appointment_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::appointment::{
        Appointment, AppointmentDetail, AppointmentFilter, AppointmentPatch, NewAppointment,
    },
};

// Teto fixo da listagem desnormalizada.
const DETAIL_PAGE_SIZE: i64 = 100;

// Contrato de persistência dos agendamentos. O orquestrador depende só
// deste trait; nos testes entra uma implementação em memória.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid)
        -> Result<Option<Appointment>, AppError>;

    async fn find_detailed(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<AppointmentDetail>, AppError>;

    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError>;

    async fn list_detailed(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetail>, AppError>;

    // O write devolve a entidade pós-write completa: o orquestrador nunca
    // precisa de uma releitura do registro principal.
    async fn insert(&self, data: &NewAppointment) -> Result<Appointment, AppError>;

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppError>;

    /// Existe agendamento ativo do profissional sobrepondo `[starts_at, ends_at]`?
    /// Agendamentos cancelados ficam de fora; `exclude_id` tira da conta o
    /// próprio registro quando um update se checa contra si mesmo.
    async fn has_conflict(
        &self,
        professional_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPOINTMENT_COLUMNS: &str = "id, company_id, customer_id, professional_id, service_id, \
     starts_at, ends_at, status, price, notes, created_at";

// Colunas da leitura desnormalizada (prefixadas com o alias da tabela).
const DETAIL_SELECT: &str = r#"
    SELECT
        a.id, a.company_id, a.customer_id, a.professional_id, a.service_id,
        a.starts_at, a.ends_at, a.status, a.price, a.notes, a.created_at,
        c.name  AS customer_name,
        c.email AS customer_email,
        c.phone AS customer_phone,
        p.name  AS professional_name,
        s.name  AS service_name,
        e.name  AS company_name
    FROM appointments a
    INNER JOIN customers     c ON c.id = a.customer_id
    INNER JOIN professionals p ON p.id = a.professional_id
    INNER JOIN services      s ON s.id = a.service_id
    INNER JOIN companies     e ON e.id = a.company_id
"#;

#[async_trait]
impl AppointmentStore for AppointmentRepository {
    async fn find_by_id(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1 AND company_id = $2"
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn find_detailed(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<AppointmentDetail>, AppError> {
        let detail = sqlx::query_as::<_, AppointmentDetail>(&format!(
            "{DETAIL_SELECT} WHERE a.id = $1 AND a.company_id = $2"
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE company_id = $1
              AND ($2::uuid IS NULL OR customer_id = $2)
              AND ($3::uuid IS NULL OR professional_id = $3)
              AND ($4::appointment_status IS NULL OR status = $4)
              AND ($5::timestamptz IS NULL OR starts_at >= $5)
              AND ($6::timestamptz IS NULL OR starts_at <= $6)
            ORDER BY starts_at ASC
            "#
        ))
        .bind(company_id)
        .bind(filter.customer_id)
        .bind(filter.professional_id)
        .bind(filter.status)
        .bind(filter.from)
        .bind(filter.until)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    async fn list_detailed(
        &self,
        company_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let details = sqlx::query_as::<_, AppointmentDetail>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE a.company_id = $1
              AND ($2::uuid IS NULL OR a.customer_id = $2)
              AND ($3::uuid IS NULL OR a.professional_id = $3)
              AND ($4::appointment_status IS NULL OR a.status = $4)
              AND ($5::timestamptz IS NULL OR a.starts_at >= $5)
              AND ($6::timestamptz IS NULL OR a.starts_at <= $6)
            ORDER BY a.starts_at DESC
            LIMIT {DETAIL_PAGE_SIZE}
            "#
        ))
        .bind(company_id)
        .bind(filter.customer_id)
        .bind(filter.professional_id)
        .bind(filter.status)
        .bind(filter.from)
        .bind(filter.until)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    async fn insert(&self, data: &NewAppointment) -> Result<Appointment, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (
                company_id, customer_id, professional_id, service_id,
                starts_at, ends_at, price, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(data.company_id)
        .bind(data.customer_id)
        .bind(data.professional_id)
        .bind(data.service_id)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.price)
        .bind(data.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments SET
                service_id      = COALESCE($3, service_id),
                professional_id = COALESCE($4, professional_id),
                starts_at       = COALESCE($5, starts_at),
                ends_at         = COALESCE($6, ends_at),
                notes           = COALESCE($7, notes),
                price           = COALESCE($8, price),
                status          = COALESCE($9, status)
            WHERE id = $1 AND company_id = $2
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(company_id)
        .bind(patch.service_id)
        .bind(patch.professional_id)
        .bind(patch.starts_at)
        .bind(patch.ends_at)
        .bind(patch.notes.as_deref())
        .bind(patch.price)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn has_conflict(
        &self,
        professional_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        // Espelha cláusula a cláusula o predicado puro
        // `models::appointment::intervals_overlap`: encostar na borda conta
        // como conflito.
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM appointments
                WHERE professional_id = $1
                  AND status <> 'cancelado'
                  AND ($4::uuid IS NULL OR id <> $4)
                  AND (
                        (starts_at <= $2 AND ends_at >= $2)
                     OR (starts_at <= $3 AND ends_at >= $3)
                     OR ($2 <= starts_at AND $3 >= ends_at)
                  )
            )
            "#,
        )
        .bind(professional_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
