// src/services/company_service.rs

use std::sync::Arc;

use chrono::NaiveTime;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyStore,
    models::company::{Company, CompanyPatch},
};

#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyStore>) -> Self {
        Self { companies }
    }

    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
        working_days: &[i16],
    ) -> Result<Company, AppError> {
        self.companies
            .insert(name, email, phone, opening_time, closing_time, working_days)
            .await
    }

    pub async fn update(&self, id: Uuid, patch: CompanyPatch) -> Result<Company, AppError> {
        self.companies
            .update(id, &patch)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Company, AppError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }
}
