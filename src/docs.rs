// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Empresas ---
        handlers::companies::create_company,
        handlers::companies::get_company,
        handlers::companies::update_company,

        // --- Profissionais ---
        handlers::professionals::create_professional,
        handlers::professionals::list_professionals,
        handlers::professionals::get_professional,
        handlers::professionals::update_professional,

        // --- Clientes ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,

        // --- Serviços ---
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::get_service,
        handlers::catalog::update_service,
        handlers::catalog::link_professional,

        // --- Agendamentos ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::list_appointments_detailed,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::cancel_appointment,
    ),
    components(
        schemas(
            // --- Empresas ---
            models::company::Company,
            models::company::CompanyPatch,
            handlers::companies::CreateCompanyPayload,

            // --- Profissionais ---
            models::professional::Professional,
            models::professional::ProfessionalPatch,
            handlers::professionals::CreateProfessionalPayload,
            handlers::professionals::ProfessionalCreated,

            // --- Clientes ---
            models::customer::Customer,
            models::customer::CustomerPatch,
            handlers::customers::CreateCustomerPayload,

            // --- Serviços ---
            models::catalog::Service,
            models::catalog::ServicePatch,
            handlers::catalog::CreateServicePayload,
            handlers::catalog::LinkProfessionalPayload,

            // --- Agendamentos ---
            models::appointment::AppointmentStatus,
            models::appointment::Appointment,
            models::appointment::AppointmentPatch,
            models::appointment::AppointmentDetail,
            models::appointment::NotificationSummary,
            handlers::appointments::CreateAppointmentPayload,
            handlers::appointments::CancelAppointmentPayload,
            services::appointment_service::AppointmentOutcome,
            services::appointment_service::AppointmentUpdateOutcome,
        )
    ),
    tags(
        (name = "Empresas", description = "Cadastro e configuração da empresa (tenant)"),
        (name = "Profissionais", description = "Equipe agendável da empresa"),
        (name = "Clientes", description = "Clientes da empresa"),
        (name = "Serviços", description = "Catálogo de serviços"),
        (name = "Agendamentos", description = "Ciclo de vida dos agendamentos")
    )
)]
pub struct ApiDoc;
