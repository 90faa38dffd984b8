// src/db/customer_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::customer::{Customer, CustomerPatch},
};

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Customer>, AppError>;

    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Customer>, AppError>;

    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError>;

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, AppError>;

    // Sem escopo de empresa: a unicidade é global (ver ProfessionalStore).
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
    async fn phone_in_use(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CUSTOMER_COLUMNS: &str = "id, company_id, name, email, phone, notes, active, created_at";

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1 AND company_id = $2"
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE company_id = $1 AND ($2 = false OR active = true)
            ORDER BY name ASC
            "#
        ))
        .bind(company_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn insert(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (company_id, name, email, phone, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers SET
                name   = COALESCE($3, name),
                email  = COALESCE($4, email),
                phone  = COALESCE($5, phone),
                notes  = COALESCE($6, notes),
                active = COALESCE($7, active)
            WHERE id = $1 AND company_id = $2
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(company_id)
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.notes.as_deref())
        .bind(patch.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM customers
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
                SELECT 1 FROM customers
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
