//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod assessment;
pub mod billing;
pub mod company;
pub mod exam;
pub mod manager;
pub mod notification;
pub mod support;
pub mod user;

// Re-export commonly used models
pub use assessment::{
    Assessment, AssessmentStatus, AssessmentTemplate, AssignAssessmentRequest,
    CreateTemplateRequest, QuestionKind, TemplateQuestion, TemplateStep, UpdateTemplateRequest,
};
pub use billing::{
    Bill, BillStatus, CreateBillRequest, CreateDocumentRequest, DocumentStatus, DocumentType,
    FinancialDocument,
};
pub use company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
pub use exam::{
    AssignExamRequest, CreateExamRequest, Exam, ExamResult, ExamStatus, UpdateExamRequest,
};
pub use manager::{CreateManagerRequest, Manager, ManagerStatus, UpdateManagerRequest};
pub use notification::{CreateNotificationRequest, Notification, NotificationKind};
pub use support::{
    CreateTicketMessageRequest, CreateTicketRequest, SupportTicket, TicketMessage, TicketStatus,
    TicketThread,
};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
