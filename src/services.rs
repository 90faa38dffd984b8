pub mod appointment_service;
pub use appointment_service::AppointmentService;
pub mod company_service;
pub use company_service::CompanyService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod professional_service;
pub use professional_service::ProfessionalService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
