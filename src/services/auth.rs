//! Authentication service implementation
//!
//! This service handles the two sign-in paths (phone OTP and email
//! password), bearer token issuance and validation, role-based access
//! control, and auto-provisioning of manager accounts on first sign-in.

use crate::config::settings::{AuthConfig, Settings};
use crate::database::DatabaseService;
use crate::i18n::MessageCatalog;
use crate::models::user::{CreateUserRequest, User, UserRole};
use crate::services::redis::RedisService;
use crate::services::sms::SmsService;
use crate::utils::errors::{Result, TalentGateError};
use crate::utils::helpers;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub cid: Option<i64>,
    pub exp: i64,
}

/// Authentication context for a request principal
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
    pub company_id: Option<i64>,
}

impl AuthContext {
    /// Require a specific role or return a permission error
    pub fn require_role(&self, required: UserRole) -> Result<()> {
        if self.role == required {
            Ok(())
        } else {
            Err(TalentGateError::PermissionDenied(
                format!("User {} lacks required role: {:?}", self.user_id, required)
            ))
        }
    }

    /// Require an attached company, as every owner account has one
    pub fn require_company(&self) -> Result<i64> {
        self.company_id.ok_or_else(|| {
            TalentGateError::PermissionDenied(
                format!("User {} has no company scope", self.user_id)
            )
        })
    }

    /// Check if the principal can manage a company's managers
    pub fn can_manage_managers(&self, company_id: i64) -> bool {
        self.role == UserRole::Owner && self.company_id == Some(company_id)
    }

    /// Check if the principal can access the admin console
    pub fn can_access_admin_panel(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Check if the principal can read a company's billing data
    pub fn can_view_billing(&self, company_id: i64) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Owner => self.company_id == Some(company_id),
            UserRole::Manager => false,
        }
    }

    /// Check if the principal can read a support ticket
    pub fn can_view_ticket(&self, ticket_company_id: i64) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Owner => self.company_id == Some(ticket_company_id),
            UserRole::Manager => false,
        }
    }
}

/// Result of an OTP dispatch
#[derive(Debug, Clone, Serialize)]
pub struct OtpDispatch {
    pub phone: String,
    pub expires_in_seconds: u64,
}

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    pub token: String,
    pub user: User,
}

/// Issue a bearer token for a user
pub fn issue_token(config: &AuthConfig, user: &User) -> Result<String> {
    let expiry = Utc::now() + Duration::hours(config.token_ttl_hours);

    let claims = Claims {
        sub: user.id,
        role: user.role.clone(),
        cid: user.company_id,
        exp: expiry.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate a bearer token and return its claims
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

/// Build an authentication context from verified claims
pub fn context_from_claims(claims: &Claims) -> Result<AuthContext> {
    let role = UserRole::parse(&claims.role)
        .ok_or_else(|| TalentGateError::Authentication("Unknown role in token".to_string()))?;

    Ok(AuthContext {
        user_id: claims.sub,
        role,
        company_id: claims.cid,
    })
}

/// Authentication service for sign-in flows
#[derive(Clone)]
pub struct AuthService {
    database: DatabaseService,
    redis: RedisService,
    sms: SmsService,
    catalog: MessageCatalog,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        database: DatabaseService,
        redis: RedisService,
        sms: SmsService,
        catalog: MessageCatalog,
        settings: Settings,
    ) -> Self {
        Self {
            database,
            redis,
            sms,
            catalog,
            settings,
        }
    }

    // --- OTP sign-in ---

    /// Generate and dispatch a one-time code to a phone number
    pub async fn send_otp(&self, raw_phone: &str) -> Result<OtpDispatch> {
        let phone = helpers::normalize_phone(raw_phone)
            .ok_or_else(|| TalentGateError::InvalidInput("Invalid phone number".to_string()))?;

        debug!(phone = %phone, "OTP send requested");

        if !self.redis.arm_otp_cooldown(&phone, self.settings.auth.otp_resend_cooldown_seconds).await? {
            warn!(phone = %phone, "OTP resend requested inside cooldown window");
            return Err(TalentGateError::RateLimitExceeded);
        }

        let hourly_key = format!("otp:hourly:{}", phone);
        if !self.redis.check_rate_limit(&hourly_key, self.settings.auth.otp_hourly_limit, 3600).await? {
            warn!(phone = %phone, "OTP hourly limit reached");
            return Err(TalentGateError::RateLimitExceeded);
        }

        let code = helpers::generate_numeric_code(self.settings.auth.otp_length);
        self.redis.store_otp(&phone, &code, self.settings.auth.otp_ttl_seconds).await?;

        let language = self.language_for_phone(&phone).await;
        let mut parameters = HashMap::new();
        parameters.insert("code".to_string(), code);
        parameters.insert("minutes".to_string(), (self.settings.auth.otp_ttl_seconds / 60).to_string());

        let body = self.catalog.render("otp_code", &language, &parameters)?;
        self.sms.send(&phone, &body).await?;

        info!(phone = %phone, "OTP dispatched");

        Ok(OtpDispatch {
            phone,
            expires_in_seconds: self.settings.auth.otp_ttl_seconds,
        })
    }

    /// Verify a one-time code and sign the user in
    pub async fn verify_otp(&self, raw_phone: &str, code: &str) -> Result<SignIn> {
        let phone = helpers::normalize_phone(raw_phone)
            .ok_or_else(|| TalentGateError::InvalidInput("Invalid phone number".to_string()))?;

        let stored = self.redis.get_otp(&phone).await?
            .ok_or(TalentGateError::OtpExpired)?;

        if stored != code {
            warn!(phone = %phone, "OTP verification failed: code mismatch");
            return Err(TalentGateError::OtpMismatch);
        }

        self.redis.consume_otp(&phone).await?;

        let user = self.find_or_provision_user(&phone).await?;

        if !user.is_active {
            warn!(user_id = user.id, "Sign-in attempt for inactive account");
            return Err(TalentGateError::Authentication("Account is inactive".to_string()));
        }

        let token = issue_token(&self.settings.auth, &user)?;
        info!(user_id = user.id, role = %user.role, "OTP sign-in successful");

        Ok(SignIn { token, user })
    }

    // --- password sign-in ---

    /// Sign in with email and password
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<SignIn> {
        debug!(email = %email, "Password sign-in requested");

        let user = self.database.users.find_by_email(email).await?
            .ok_or_else(|| TalentGateError::Authentication("Invalid credentials".to_string()))?;

        let hash = user.password_hash.as_deref()
            .ok_or_else(|| TalentGateError::Authentication("Invalid credentials".to_string()))?;

        if !verify_password(password, hash) {
            warn!(user_id = user.id, "Password sign-in failed: bad password");
            return Err(TalentGateError::Authentication("Invalid credentials".to_string()));
        }

        if !user.is_active {
            warn!(user_id = user.id, "Sign-in attempt for inactive account");
            return Err(TalentGateError::Authentication("Account is inactive".to_string()));
        }

        let token = issue_token(&self.settings.auth, &user)?;
        info!(user_id = user.id, role = %user.role, "Password sign-in successful");

        Ok(SignIn { token, user })
    }

    /// Validate a bearer token and return the request context
    pub fn authenticate(&self, token: &str) -> Result<AuthContext> {
        let claims = verify_token(&self.settings.auth, token)?;
        context_from_claims(&claims)
    }

    /// Load the full account for a context
    pub async fn current_user(&self, context: &AuthContext) -> Result<User> {
        self.database.users.find_by_id(context.user_id).await?
            .ok_or(TalentGateError::UserNotFound { user_id: context.user_id })
    }

    // --- internals ---

    /// Find the account for a phone, provisioning manager accounts on first sign-in
    async fn find_or_provision_user(&self, phone: &str) -> Result<User> {
        if let Some(user) = self.database.users.find_by_phone(phone).await? {
            return Ok(user);
        }

        // First sign-in of an invited manager: create the account from the
        // managers table and link it back.
        let manager = self.database.managers.find_by_phone(phone).await?
            .ok_or_else(|| TalentGateError::Authentication("No account for this phone number".to_string()))?;

        let request = CreateUserRequest {
            phone: phone.to_string(),
            email: manager.email.clone(),
            password_hash: None,
            full_name: manager.full_name.clone(),
            role: UserRole::Manager,
            company_id: Some(manager.company_id),
            language_code: Some(self.settings.i18n.default_language.clone()),
        };

        let user = self.database.users.create(request).await?;
        self.database.managers.link_user(manager.id, user.id).await?;

        info!(user_id = user.id, manager_id = manager.id, "Manager account provisioned on first sign-in");
        Ok(user)
    }

    /// Pick the notification language for a phone number
    async fn language_for_phone(&self, phone: &str) -> String {
        match self.database.users.find_by_phone(phone).await {
            Ok(Some(user)) => user.language_code,
            _ => self.settings.i18n.default_language.clone(),
        }
    }
}

/// Hash a password with Argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TalentGateError::Authentication(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against an Argon2id hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: UserRole, company_id: Option<i64>) -> User {
        User {
            id: 42,
            phone: "+905321234567".to_string(),
            email: Some("owner@example.com".to_string()),
            password_hash: None,
            full_name: "Test User".to_string(),
            role: role.to_string(),
            company_id,
            language_code: "en".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret-password").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-password", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_password_with_garbage_hash() {
        assert!(!verify_password("anything", "not-a-hash"));
    }

    #[test]
    fn test_token_roundtrip() {
        let settings = Settings::default();
        let user = test_user(UserRole::Owner, Some(7));

        let token = issue_token(&settings.auth, &user).unwrap();
        let claims = verify_token(&settings.auth, &token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "owner");
        assert_eq!(claims.cid, Some(7));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let settings = Settings::default();
        assert!(verify_token(&settings.auth, "not.a.token").is_err());
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let settings = Settings::default();
        let user = test_user(UserRole::Admin, None);
        let token = issue_token(&settings.auth, &user).unwrap();

        let mut other = Settings::default();
        other.auth.jwt_secret = "another-secret-another-secret-another".to_string();
        assert!(verify_token(&other.auth, &token).is_err());
    }

    #[test]
    fn test_context_from_claims_rejects_unknown_role() {
        let claims = Claims {
            sub: 1,
            role: "superuser".to_string(),
            cid: None,
            exp: Utc::now().timestamp() + 3600,
        };

        assert!(context_from_claims(&claims).is_err());
    }

    #[test]
    fn test_role_permissions() {
        let owner = AuthContext { user_id: 1, role: UserRole::Owner, company_id: Some(7) };
        let admin = AuthContext { user_id: 2, role: UserRole::Admin, company_id: None };
        let manager = AuthContext { user_id: 3, role: UserRole::Manager, company_id: Some(7) };

        assert!(owner.can_manage_managers(7));
        assert!(!owner.can_manage_managers(8));
        assert!(!admin.can_manage_managers(7));

        assert!(admin.can_access_admin_panel());
        assert!(!owner.can_access_admin_panel());

        assert!(owner.can_view_billing(7));
        assert!(!owner.can_view_billing(8));
        assert!(admin.can_view_billing(8));
        assert!(!manager.can_view_billing(7));

        assert!(owner.require_role(UserRole::Owner).is_ok());
        assert!(owner.require_role(UserRole::Admin).is_err());
        assert!(manager.require_company().is_ok());
        assert!(admin.require_company().is_err());
    }
}
