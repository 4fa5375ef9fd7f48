//! Internationalization module
//!
//! Outbound message templates (SMS texts and in-app notification bodies)
//! in the supported languages, with `{placeholder}` interpolation and
//! default-language fallback.

use crate::config::settings::I18nConfig;
use crate::utils::errors::{Result, TalentGateError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message template structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub key: String,
    pub content: HashMap<String, String>, // language -> content mapping
}

/// Message catalog for outbound texts
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    config: I18nConfig,
    templates: HashMap<String, MessageTemplate>,
}

impl MessageCatalog {
    /// Create a catalog with the built-in templates
    pub fn new(config: I18nConfig) -> Self {
        let templates = Self::load_default_templates();
        Self { config, templates }
    }

    /// Render a template in the given language with parameter substitution
    pub fn render(&self, template_key: &str, language: &str, parameters: &HashMap<String, String>) -> Result<String> {
        let template = self.templates.get(template_key)
            .ok_or_else(|| TalentGateError::InvalidInput(format!("Template not found: {}", template_key)))?;

        let content = template.content.get(language)
            .or_else(|| template.content.get(&self.config.default_language))
            .ok_or_else(|| TalentGateError::InvalidInput(format!("Template content not found for language: {}", language)))?;

        let mut formatted = content.clone();

        // Replace parameters in the template
        for (key, value) in parameters {
            let placeholder = format!("{{{}}}", key);
            formatted = formatted.replace(&placeholder, value);
        }

        Ok(formatted)
    }

    /// Check whether a language is supported
    pub fn is_supported(&self, language: &str) -> bool {
        self.config.supported_languages.iter().any(|l| l == language)
    }

    /// Add or update a message template
    pub fn add_template(&mut self, template: MessageTemplate) {
        self.templates.insert(template.key.clone(), template);
    }

    /// Get available template keys
    pub fn template_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Load default message templates
    fn load_default_templates() -> HashMap<String, MessageTemplate> {
        let mut templates = HashMap::new();

        let mut otp_content = HashMap::new();
        otp_content.insert("en".to_string(),
            "Your TalentGate verification code is {code}. It expires in {minutes} minutes.".to_string());
        otp_content.insert("tr".to_string(),
            "TalentGate doğrulama kodunuz: {code}. Kod {minutes} dakika içinde geçerliliğini yitirir.".to_string());

        templates.insert("otp_code".to_string(), MessageTemplate {
            key: "otp_code".to_string(),
            content: otp_content,
        });

        let mut assessment_content = HashMap::new();
        assessment_content.insert("en".to_string(),
            "You have been assigned a new assessment: {title}.".to_string());
        assessment_content.insert("tr".to_string(),
            "Size yeni bir değerlendirme atandı: {title}.".to_string());

        templates.insert("assessment_assigned".to_string(), MessageTemplate {
            key: "assessment_assigned".to_string(),
            content: assessment_content,
        });

        let mut exam_content = HashMap::new();
        exam_content.insert("en".to_string(),
            "You have been assigned a new exam: {title}. Duration: {minutes} minutes.".to_string());
        exam_content.insert("tr".to_string(),
            "Size yeni bir sınav atandı: {title}. Süre: {minutes} dakika.".to_string());

        templates.insert("exam_assigned".to_string(), MessageTemplate {
            key: "exam_assigned".to_string(),
            content: exam_content,
        });

        let mut ticket_content = HashMap::new();
        ticket_content.insert("en".to_string(),
            "Your support ticket \"{subject}\" has a new reply.".to_string());
        ticket_content.insert("tr".to_string(),
            "\"{subject}\" konulu destek talebinize yeni bir yanıt var.".to_string());

        templates.insert("ticket_reply".to_string(), MessageTemplate {
            key: "ticket_reply".to_string(),
            content: ticket_content,
        });

        let mut document_content = HashMap::new();
        document_content.insert("en".to_string(),
            "A new financial document has been issued: {title}.".to_string());
        document_content.insert("tr".to_string(),
            "Yeni bir mali belge düzenlendi: {title}.".to_string());

        templates.insert("document_issued".to_string(), MessageTemplate {
            key: "document_issued".to_string(),
            content: document_content,
        });

        let mut system_content = HashMap::new();
        system_content.insert("en".to_string(), "{text}".to_string());
        system_content.insert("tr".to_string(), "{text}".to_string());

        templates.insert("system".to_string(), MessageTemplate {
            key: "system".to_string(),
            content: system_content,
        });

        templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new(I18nConfig {
            default_language: "en".to_string(),
            supported_languages: vec!["en".to_string(), "tr".to_string()],
        })
    }

    #[test]
    fn test_render_with_parameters() {
        let catalog = catalog();

        let mut parameters = HashMap::new();
        parameters.insert("code".to_string(), "123456".to_string());
        parameters.insert("minutes".to_string(), "5".to_string());

        let result = catalog.render("otp_code", "en", &parameters).unwrap();
        assert!(result.contains("123456"));
        assert!(result.contains("5 minutes"));
    }

    #[test]
    fn test_fallback_to_default_language() {
        let catalog = catalog();

        let mut parameters = HashMap::new();
        parameters.insert("code".to_string(), "987654".to_string());
        parameters.insert("minutes".to_string(), "5".to_string());

        // Unsupported language falls back to English content
        let result = catalog.render("otp_code", "de", &parameters).unwrap();
        assert!(result.contains("verification code"));
    }

    #[test]
    fn test_unknown_template_rejected() {
        let catalog = catalog();
        let result = catalog.render("no_such_template", "en", &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_template_management() {
        let mut catalog = catalog();

        let mut content = HashMap::new();
        content.insert("en".to_string(), "Test message".to_string());

        catalog.add_template(MessageTemplate {
            key: "test".to_string(),
            content,
        });

        assert!(catalog.template_keys().contains(&"test".to_string()));
    }
}
