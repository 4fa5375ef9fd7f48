//! Repository modules
//!
//! One repository per aggregate, all backed by the shared PgPool

pub mod assessment;
pub mod billing;
pub mod company;
pub mod exam;
pub mod manager;
pub mod notification;
pub mod support;
pub mod user;

pub use assessment::AssessmentRepository;
pub use billing::BillingRepository;
pub use company::CompanyRepository;
pub use exam::ExamRepository;
pub use manager::ManagerRepository;
pub use notification::NotificationRepository;
pub use support::SupportRepository;
pub use user::UserRepository;
