// src/db/professional_repo.rs

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::professional::{Professional, ProfessionalPatch},
};

#[async_trait]
pub trait ProfessionalStore: Send + Sync {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid)
        -> Result<Option<Professional>, AppError>;

    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Professional>, AppError>;

    #[allow(clippy::too_many_arguments)]
    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        color: &str,
        working_days: Option<&[i16]>,
        workday_start: Option<NaiveTime>,
        workday_end: Option<NaiveTime>,
    ) -> Result<Professional, AppError>;

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &ProfessionalPatch,
    ) -> Result<Option<Professional>, AppError>;

    // A unicidade de e-mail/telefone vale no sistema inteiro, então estas
    // consultas NÃO são escopadas por empresa. O serviço cruza o resultado
    // com a tabela de clientes.
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
    async fn phone_in_use(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct ProfessionalRepository {
    pool: PgPool,
}

impl ProfessionalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFESSIONAL_COLUMNS: &str = "id, company_id, name, email, phone, color, \
     working_days, workday_start, workday_end, active, created_at";

#[async_trait]
#[allow(clippy::too_many_arguments)]
impl ProfessionalStore for ProfessionalRepository {
    async fn find_by_id(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Professional>, AppError> {
        let professional = sqlx::query_as::<_, Professional>(&format!(
            "SELECT {PROFESSIONAL_COLUMNS} FROM professionals WHERE id = $1 AND company_id = $2"
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(professional)
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Professional>, AppError> {
        let professionals = sqlx::query_as::<_, Professional>(&format!(
            r#"
            SELECT {PROFESSIONAL_COLUMNS}
            FROM professionals
            WHERE company_id = $1 AND ($2 = false OR active = true)
            ORDER BY name ASC
            "#
        ))
        .bind(company_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(professionals)
    }

    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        color: &str,
        working_days: Option<&[i16]>,
        workday_start: Option<NaiveTime>,
        workday_end: Option<NaiveTime>,
    ) -> Result<Professional, AppError> {
        let professional = sqlx::query_as::<_, Professional>(&format!(
            r#"
            INSERT INTO professionals (
                company_id, name, email, phone, color,
                working_days, workday_start, workday_end
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROFESSIONAL_COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(color)
        .bind(working_days)
        .bind(workday_start)
        .bind(workday_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(professional)
    }

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &ProfessionalPatch,
    ) -> Result<Option<Professional>, AppError> {
        let professional = sqlx::query_as::<_, Professional>(&format!(
            r#"
            UPDATE professionals SET
                name          = COALESCE($3, name),
                email         = COALESCE($4, email),
                phone         = COALESCE($5, phone),
                color         = COALESCE($6, color),
                working_days  = COALESCE($7, working_days),
                workday_start = COALESCE($8, workday_start),
                workday_end   = COALESCE($9, workday_end),
                active        = COALESCE($10, active)
            WHERE id = $1 AND company_id = $2
            RETURNING {PROFESSIONAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(company_id)
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.color.as_deref())
        .bind(patch.working_days.as_deref())
        .bind(patch.workday_start)
        .bind(patch.workday_end)
        .bind(patch.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(professional)
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM professionals
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn phone_in_use(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM professionals
                WHERE phone = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(phone)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
