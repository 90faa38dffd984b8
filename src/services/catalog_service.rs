// src/services/catalog_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfessionalStore, ServiceStore},
    models::catalog::{Service, ServicePatch},
};

#[derive(Clone)]
pub struct CatalogService {
    services: Arc<dyn ServiceStore>,
    professionals: Arc<dyn ProfessionalStore>,
}

impl CatalogService {
    pub fn new(
        services: Arc<dyn ServiceStore>,
        professionals: Arc<dyn ProfessionalStore>,
    ) -> Self {
        Self { services, professionals }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        name: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<Service, AppError> {
        self.services.insert(company_id, name, duration_minutes, price).await
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: ServicePatch,
    ) -> Result<Service, AppError> {
        self.services
            .update(company_id, id, &patch)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Service, AppError> {
        self.services
            .find_by_id(company_id, id)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Service>, AppError> {
        self.services
            .list_by_company(company_id, only_active, professional_id)
            .await
    }

    /// Vincula um profissional a um serviço (N:N). Os dois precisam
    /// existir na empresa antes do vínculo.
    pub async fn link_professional(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        professional_id: Uuid,
    ) -> Result<(), AppError> {
        self.services
            .find_by_id(company_id, service_id)
            .await?
            .ok_or(AppError::ServiceNotFound)?;
        self.professionals
            .find_by_id(company_id, professional_id)
            .await?
            .ok_or(AppError::ProfessionalNotFound)?;

        self.services
            .link_professional(company_id, service_id, professional_id)
            .await
    }
}
