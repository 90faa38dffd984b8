pub mod company_repo;
pub use company_repo::{CompanyRepository, CompanyStore};
pub mod professional_repo;
pub use professional_repo::{ProfessionalRepository, ProfessionalStore};
pub mod customer_repo;
pub use customer_repo::{CustomerRepository, CustomerStore};
pub mod catalog_repo;
pub use catalog_repo::{ServiceRepository, ServiceStore};
pub mod appointment_repo;
pub use appointment_repo::{AppointmentRepository, AppointmentStore};
