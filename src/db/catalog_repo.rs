// src/db/catalog_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Service, ServicePatch},
};

#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Service>, AppError>;

    // `professional_id` restringe a lista ao que aquele profissional executa
    // (vínculo N:N em professional_services).
    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Service>, AppError>;

    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<Service, AppError>;

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &ServicePatch,
    ) -> Result<Option<Service>, AppError>;

    // Vincula um profissional ao serviço; repetir o vínculo é inofensivo.
    async fn link_professional(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        professional_id: Uuid,
    ) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SERVICE_COLUMNS: &str = "id, company_id, name, duration_minutes, price, active, created_at";

#[async_trait]
impl ServiceStore for ServiceRepository {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1 AND company_id = $2"
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM services s
            WHERE s.company_id = $1
              AND ($2 = false OR s.active = true)
              AND ($3::uuid IS NULL OR EXISTS (
                    SELECT 1 FROM professional_services ps
                    WHERE ps.service_id = s.id AND ps.professional_id = $3
              ))
            ORDER BY s.name ASC
            "#
        ))
        .bind(company_id)
        .bind(only_active)
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (company_id, name, duration_minutes, price)
            VALUES ($1, $2, $3, $4)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(name)
        .bind(duration_minutes)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &ServicePatch,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services SET
                name             = COALESCE($3, name),
                duration_minutes = COALESCE($4, duration_minutes),
                price            = COALESCE($5, price),
                active           = COALESCE($6, active)
            WHERE id = $1 AND company_id = $2
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(company_id)
        .bind(patch.name.as_deref())
        .bind(patch.duration_minutes)
        .bind(patch.price)
        .bind(patch.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    async fn link_professional(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        professional_id: Uuid,
    ) -> Result<(), AppError> {
        // O JOIN implícito pelos WHERE garante que serviço e profissional
        // pertencem à mesma empresa antes de criar o vínculo.
        sqlx::query(
            r#"
            INSERT INTO professional_services (service_id, professional_id)
            SELECT s.id, p.id
            FROM services s, professionals p
            WHERE s.id = $1 AND s.company_id = $3
              AND p.id = $2 AND p.company_id = $3
            ON CONFLICT (service_id, professional_id) DO NOTHING
            "#,
        )
        .bind(service_id)
        .bind(professional_id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
