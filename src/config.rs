// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AppointmentRepository, AppointmentStore, CompanyRepository, CompanyStore,
        CustomerRepository, CustomerStore, ProfessionalRepository, ProfessionalStore,
        ServiceRepository, ServiceStore,
    },
    notifications::{
        email::SmtpConfig, sms::SmsConfig, EmailNotifier, HttpSmsSender, SmsNotifier, SmtpMailer,
    },
    services::{
        AppointmentService, CatalogService, CompanyService, CustomerService, ProfessionalService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub company_service: CompanyService,
    pub professional_service: ProfessionalService,
    pub customer_service: CustomerService,
    pub catalog_service: CatalogService,
    pub appointment_service: AppointmentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Notificadores (e-mail SMTP + SMS via API REST) ---
        let mailer: Arc<dyn EmailNotifier> = Arc::new(SmtpMailer::new(SmtpConfig {
            host: env::var("SMTP_HOST").expect("SMTP_HOST deve ser definido"),
            username: env::var("SMTP_USERNAME").expect("SMTP_USERNAME deve ser definido"),
            password: env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD deve ser definida"),
            from: env::var("SMTP_FROM").expect("SMTP_FROM deve ser definido"),
        })?);

        let sms: Arc<dyn SmsNotifier> = Arc::new(HttpSmsSender::new(SmsConfig {
            base_url: env::var("SMS_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.twilio.com/2010-04-01".to_string()),
            account_sid: env::var("SMS_ACCOUNT_SID").expect("SMS_ACCOUNT_SID deve ser definido"),
            auth_token: env::var("SMS_AUTH_TOKEN").expect("SMS_AUTH_TOKEN deve ser definido"),
            from_number: env::var("SMS_FROM_NUMBER").expect("SMS_FROM_NUMBER deve ser definido"),
        }));

        // --- Monta o gráfico de dependências ---
        // Os serviços recebem os stores e notificadores como Arc<dyn ...>:
        // é o que permite trocar tudo por fakes em memória nos testes.
        let companies: Arc<dyn CompanyStore> = Arc::new(CompanyRepository::new(db_pool.clone()));
        let professionals: Arc<dyn ProfessionalStore> =
            Arc::new(ProfessionalRepository::new(db_pool.clone()));
        let customers: Arc<dyn CustomerStore> = Arc::new(CustomerRepository::new(db_pool.clone()));
        let services: Arc<dyn ServiceStore> = Arc::new(ServiceRepository::new(db_pool.clone()));
        let appointments: Arc<dyn AppointmentStore> =
            Arc::new(AppointmentRepository::new(db_pool.clone()));

        let company_service = CompanyService::new(companies.clone());
        let professional_service = ProfessionalService::new(
            professionals.clone(),
            customers.clone(),
            companies.clone(),
            mailer.clone(),
            sms.clone(),
        );
        let customer_service = CustomerService::new(customers.clone(), professionals.clone());
        let catalog_service = CatalogService::new(services.clone(), professionals.clone());
        let appointment_service = AppointmentService::new(appointments, mailer, sms);

        // Retorna Ok com o estado montado
        Ok(Self {
            db_pool,
            company_service,
            professional_service,
            customer_service,
            catalog_service,
            appointment_service,
        })
    }
}
