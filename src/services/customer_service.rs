// src/services/customer_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CustomerStore, ProfessionalStore},
    models::customer::{Customer, CustomerPatch},
};

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerStore>,
    professionals: Arc<dyn ProfessionalStore>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        professionals: Arc<dyn ProfessionalStore>,
    ) -> Self {
        Self { customers, professionals }
    }

    // Mesma regra do ProfessionalService, do outro lado: o contato do
    // cliente não pode existir em nenhuma das duas tabelas.
    async fn ensure_contact_unique(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude_customer: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(email) = email {
            let taken = self.customers.email_in_use(email, exclude_customer).await?
                || self.professionals.email_in_use(email, None).await?;
            if taken {
                return Err(AppError::EmailAlreadyExists);
            }
        }
        if let Some(phone) = phone {
            let taken = self.customers.phone_in_use(phone, exclude_customer).await?
                || self.professionals.phone_in_use(phone, None).await?;
            if taken {
                return Err(AppError::PhoneAlreadyExists);
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError> {
        self.ensure_contact_unique(email, phone, None).await?;
        self.customers.insert(company_id, name, email, phone, notes).await
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: CustomerPatch,
    ) -> Result<Customer, AppError> {
        self.ensure_contact_unique(patch.email.as_deref(), patch.phone.as_deref(), Some(id))
            .await?;

        self.customers
            .update(company_id, id, &patch)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(company_id, id)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Customer>, AppError> {
        self.customers.list_by_company(company_id, only_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveTime, TimeZone, Utc};

    use crate::models::professional::{Professional, ProfessionalPatch};

    const COMPANY: Uuid = Uuid::from_u128(1);

    struct MemCustomers {
        items: Mutex<Vec<Customer>>,
    }

    impl MemCustomers {
        fn new() -> Self {
            Self { items: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl CustomerStore for MemCustomers {
        async fn find_by_id(
            &self,
            company_id: Uuid,
            id: Uuid,
        ) -> Result<Option<Customer>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id && c.company_id == company_id)
                .cloned())
        }

        async fn list_by_company(
            &self,
            company_id: Uuid,
            only_active: bool,
        ) -> Result<Vec<Customer>, AppError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.company_id == company_id && (!only_active || c.active))
                .cloned()
                .collect())
        }

        async fn insert(
            &self,
            company_id: Uuid,
            name: &str,
            email: Option<&str>,
            phone: Option<&str>,
            notes: Option<&str>,
        ) -> Result<Customer, AppError> {
            let customer = Customer {
                id: Uuid::new_v4(),
                company_id,
                name: name.to_string(),
                email: email.map(String::from),
                phone: phone.map(String::from),
                notes: notes.map(String::from),
                active: true,
                created_at: Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
            };
            self.items.lock().unwrap().push(customer.clone());
            Ok(customer)
        }

        async fn update(
            &self,
            company_id: Uuid,
            id: Uuid,
            patch: &CustomerPatch,
        ) -> Result<Option<Customer>, AppError> {
            let mut items = self.items.lock().unwrap();
            let Some(c) = items
                .iter_mut()
                .find(|c| c.id == id && c.company_id == company_id)
            else {
                return Ok(None);
            };
            if let Some(v) = &patch.name {
                c.name = v.clone();
            }
            if let Some(v) = &patch.email {
                c.email = Some(v.clone());
            }
            if let Some(v) = &patch.phone {
                c.phone = Some(v.clone());
            }
            if let Some(v) = &patch.notes {
                c.notes = Some(v.clone());
            }
            if let Some(v) = patch.active {
                c.active = v;
            }
            Ok(Some(c.clone()))
        }

        async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
            Ok(self.items.lock().unwrap().iter().any(|c| {
                c.email.as_deref() == Some(email) && exclude != Some(c.id)
            }))
        }

        async fn phone_in_use(&self, phone: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
            Ok(self.items.lock().unwrap().iter().any(|c| {
                c.phone.as_deref() == Some(phone) && exclude != Some(c.id)
            }))
        }
    }

    // Só as checagens de unicidade interessam aqui; o resto é mínimo.
    struct MemProfessionals {
        emails: Vec<String>,
        phones: Vec<String>,
    }

    #[async_trait]
    impl ProfessionalStore for MemProfessionals {
        async fn find_by_id(
            &self,
            _company_id: Uuid,
            _id: Uuid,
        ) -> Result<Option<Professional>, AppError> {
            Ok(None)
        }

        async fn list_by_company(
            &self,
            _company_id: Uuid,
            _only_active: bool,
        ) -> Result<Vec<Professional>, AppError> {
            Ok(Vec::new())
        }

        #[allow(clippy::too_many_arguments)]
        async fn insert(
            &self,
            _company_id: Uuid,
            _name: &str,
            _email: Option<&str>,
            _phone: Option<&str>,
            _color: &str,
            _working_days: Option<&[i16]>,
            _workday_start: Option<NaiveTime>,
            _workday_end: Option<NaiveTime>,
        ) -> Result<Professional, AppError> {
            unimplemented!("não usado nestes testes")
        }

        async fn update(
            &self,
            _company_id: Uuid,
            _id: Uuid,
            _patch: &ProfessionalPatch,
        ) -> Result<Option<Professional>, AppError> {
            Ok(None)
        }

        async fn email_in_use(
            &self,
            email: &str,
            _exclude: Option<Uuid>,
        ) -> Result<bool, AppError> {
            Ok(self.emails.iter().any(|e| e == email))
        }

        async fn phone_in_use(
            &self,
            phone: &str,
            _exclude: Option<Uuid>,
        ) -> Result<bool, AppError> {
            Ok(self.phones.iter().any(|p| p == phone))
        }
    }

    fn service(professional_emails: &[&str], professional_phones: &[&str]) -> CustomerService {
        CustomerService::new(
            Arc::new(MemCustomers::new()),
            Arc::new(MemProfessionals {
                emails: professional_emails.iter().map(|s| s.to_string()).collect(),
                phones: professional_phones.iter().map(|s| s.to_string()).collect(),
            }),
        )
    }

    #[tokio::test]
    async fn email_de_profissional_bloqueia_cliente_novo() {
        let svc = service(&["carlos@barbeariadoze.com.br"], &[]);

        let result = svc
            .create(COMPANY, "Maria", Some("carlos@barbeariadoze.com.br"), None, None)
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn email_de_outro_cliente_bloqueia_cliente_novo() {
        let svc = service(&[], &[]);
        svc.create(COMPANY, "Maria", Some("maria@email.com"), None, None)
            .await
            .unwrap();

        let result = svc
            .create(COMPANY, "Outra Maria", Some("maria@email.com"), None, None)
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn telefone_de_profissional_bloqueia_cliente_novo() {
        let svc = service(&[], &["+5511988887777"]);

        let result = svc
            .create(COMPANY, "Maria", None, Some("+5511988887777"), None)
            .await;

        assert!(matches!(result, Err(AppError::PhoneAlreadyExists)));
    }

    // No update, o registro não colide com o próprio contato.
    #[tokio::test]
    async fn update_ignora_o_proprio_contato() {
        let svc = service(&[], &[]);
        let created = svc
            .create(COMPANY, "Maria", Some("maria@email.com"), Some("+5511977776666"), None)
            .await
            .unwrap();

        let patch = CustomerPatch {
            email: Some("maria@email.com".to_string()),
            name: Some("Maria da Silva".to_string()),
            ..Default::default()
        };
        let updated = svc.update(COMPANY, created.id, patch).await.unwrap();

        assert_eq!(updated.name, "Maria da Silva");
    }
}
