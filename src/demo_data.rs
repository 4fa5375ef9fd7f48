//! Demo data seeding
//!
//! Populates an empty database with a demo tenant for local development.
//! Compiled only with the `demo-data` feature and applied only when the
//! matching settings flag is on and the database holds no companies.

use crate::database::DatabaseService;
use crate::models::assessment::{CreateTemplateRequest, QuestionKind, TemplateQuestion, TemplateStep};
use crate::models::billing::{CreateBillRequest, CreateDocumentRequest, DocumentType};
use crate::models::company::CreateCompanyRequest;
use crate::models::exam::CreateExamRequest;
use crate::models::manager::{CreateManagerRequest, ManagerStatus};
use crate::models::user::{CreateUserRequest, UserRole};
use crate::services::auth;
use crate::utils::errors::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use tracing::info;

/// Seed the demo tenant if the database is empty
pub async fn seed(database: &DatabaseService) -> Result<()> {
    if database.companies.count().await? > 0 {
        info!("Database already populated, skipping demo seed");
        return Ok(());
    }

    let company = database.companies.create(CreateCompanyRequest {
        name: "Acme Staffing".to_string(),
        contact_email: Some("info@acme-staffing.example".to_string()),
        contact_phone: Some("+905320000001".to_string()),
        tax_number: Some("1234567890".to_string()),
    }).await?;

    let owner = database.users.create(CreateUserRequest {
        phone: "+905320000001".to_string(),
        email: Some("owner@acme-staffing.example".to_string()),
        password_hash: Some(auth::hash_password("demo-password")?),
        full_name: "Deniz Yilmaz".to_string(),
        role: UserRole::Owner,
        company_id: Some(company.id),
        language_code: Some("tr".to_string()),
    }).await?;

    database.users.create(CreateUserRequest {
        phone: "+905320000009".to_string(),
        email: Some("admin@talentgate.example".to_string()),
        password_hash: Some(auth::hash_password("demo-password")?),
        full_name: "Platform Admin".to_string(),
        role: UserRole::Admin,
        company_id: None,
        language_code: Some("en".to_string()),
    }).await?;

    let manager = database.managers.create(company.id, CreateManagerRequest {
        full_name: "Ayşe Demir".to_string(),
        phone: "+905320000002".to_string(),
        email: Some("ayse@example.com".to_string()),
        position: Some("Sales Lead".to_string()),
        status: Some(ManagerStatus::Applicant),
    }).await?;

    database.managers.create(company.id, CreateManagerRequest {
        full_name: "Mehmet Kaya".to_string(),
        phone: "+905320000003".to_string(),
        email: None,
        position: Some("Accountant".to_string()),
        status: Some(ManagerStatus::Employee),
    }).await?;

    let template = database.assessments.create_template(Some(company.id), CreateTemplateRequest {
        title: "Sales Aptitude".to_string(),
        description: Some("Entry screening for sales candidates".to_string()),
        steps: vec![
            TemplateStep {
                title: "Basics".to_string(),
                questions: vec![
                    TemplateQuestion {
                        prompt: "A customer objects to the price. What first?".to_string(),
                        kind: QuestionKind::SingleChoice,
                        options: vec![
                            "Offer a discount".to_string(),
                            "Ask what the price is being compared to".to_string(),
                            "End the call".to_string(),
                        ],
                        expected: Some(1),
                    },
                    TemplateQuestion {
                        prompt: "Describe your proudest sale.".to_string(),
                        kind: QuestionKind::Text,
                        options: vec![],
                        expected: None,
                    },
                ],
            },
            TemplateStep {
                title: "Self-assessment".to_string(),
                questions: vec![TemplateQuestion {
                    prompt: "Rate your cold-calling comfort.".to_string(),
                    kind: QuestionKind::Scale,
                    options: vec![],
                    expected: None,
                }],
            },
        ],
    }).await?;

    database.assessments
        .create_assessment(template.id, manager.id, owner.id, Some(Utc::now() + Duration::days(7)))
        .await?;

    let exam = database.exams.create(CreateExamRequest {
        title: "General Aptitude".to_string(),
        description: Some("Numerical and verbal reasoning".to_string()),
        duration_minutes: 45,
        question_count: 40,
        passing_score: 60,
    }).await?;

    database.exams.create_result(exam.id, manager.id, owner.id).await?;

    database.billing.create_document(CreateDocumentRequest {
        company_id: company.id,
        doc_type: DocumentType::Invoice,
        title: "Subscription invoice".to_string(),
        amount_minor: 149_900,
        currency: None,
        issued_at: None,
    }).await?;

    let today = Utc::now().date_naive();
    let due = NaiveDate::from_ymd_opt(today.year(), today.month(), 28).unwrap_or(today);
    database.billing.create_bill(CreateBillRequest {
        company_id: company.id,
        period: format!("{}-{:02}", today.year(), today.month()),
        amount_due_minor: 149_900,
        currency: None,
        due_date: due,
    }).await?;

    let ticket = database.support.create_ticket(company.id, owner.id, "How do I export results?").await?;
    database.support.create_message(ticket.id, owner.id, "Is there a CSV export for exam results?").await?;

    info!(company_id = company.id, "Demo data seeded");
    Ok(())
}
