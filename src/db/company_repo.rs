// src/db/company_repo.rs

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::company::{Company, CompanyPatch},
};

// Contrato de leitura/escrita de empresas. Os serviços dependem do trait,
// nunca da implementação Postgres direto.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    async fn insert(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
        working_days: &[i16],
    ) -> Result<Company, AppError>;

    // Patch parcial: campos ausentes mantêm o valor anterior.
    // `None` no retorno significa que o id não existe mais.
    async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<Option<Company>, AppError>;
}

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMPANY_COLUMNS: &str =
    "id, name, email, phone, opening_time, closing_time, working_days, active, created_at";

#[async_trait]
impl CompanyStore for CompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn insert(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
        working_days: &[i16],
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (name, email, phone, opening_time, closing_time, working_days)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(opening_time)
        .bind(closing_time)
        .bind(working_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies SET
                name         = COALESCE($2, name),
                email        = COALESCE($3, email),
                phone        = COALESCE($4, phone),
                opening_time = COALESCE($5, opening_time),
                closing_time = COALESCE($6, closing_time),
                working_days = COALESCE($7, working_days),
                active       = COALESCE($8, active)
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.opening_time)
        .bind(patch.closing_time)
        .bind(patch.working_days.as_deref())
        .bind(patch.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }
}
