use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::user::{NewUser, Role};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{debug, info, instrument, warn};

use super::domain::{Actor, AuthSession, Claims, LoginInput, RegisterInput, UserView};
use super::errors::AuthError;
use super::password;
use crate::users::repository::UserRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// Auth business service independent of web framework
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, cfg: AuthConfig) -> Self { Self { users, cfg } }

    pub fn token_ttl_secs(&self) -> u64 { self.cfg.token_ttl_secs }

    /// Public sign-up. Only the `cliente` role may be requested.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, domain::RegisterInput};
    /// use service::users::repository::mock::MockUserRepository;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()), AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600 });
    /// let input = RegisterInput { username: "lucia".into(), name: "Lucía".into(), email: "lucia@example.com".into(), password: "pw1".into(), role: None, phone: None };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.role, models::Role::Cliente);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserView, AuthError> {
        if !matches!(input.role, None | Some(Role::Cliente)) {
            debug!(role = ?input.role, "public registration asked for a staff role");
            return Err(AuthError::Forbidden);
        }
        self.register_with_role(input).await
    }

    /// Create an account with any role; callers gate this behind the admin role.
    #[instrument(skip(self, input), fields(username = %input.username, role = ?input.role))]
    pub async fn register_with_role(&self, input: RegisterInput) -> Result<UserView, AuthError> {
        password::validate(&input.password)?;
        let new = NewUser {
            username: input.username,
            name: input.name,
            email: input.email,
            password_hash: String::new(),
            role: input.role.unwrap_or_default(),
            phone: input.phone,
        };
        new.validate()?;
        let new = NewUser { password_hash: password::hash(&input.password)?, ..new };
        let user = self.users.create(new).await?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "user_registered");
        Ok(UserView::from(user))
    }

    /// Authenticate a user and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, domain::{LoginInput, RegisterInput}};
    /// use service::users::repository::mock::MockUserRepository;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()), AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "mario".into(), name: "Mario".into(), email: "m@e.com".into(), password: "Passw0rd".into(), role: None, phone: None }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "mario".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "mario");
    /// let actor = svc.verify(Some(&session.token), Some(&session.csrf)).unwrap();
    /// assert_eq!(actor.user_id, session.user.id);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.users
            .find_by_username(input.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !password::verify(&input.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let csrf: String = OsRng.sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            csrf: csrf.clone(),
            iat: now,
            exp: now + self.cfg.token_ttl_secs as i64,
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(user_id = %user.id, role = %user.role, "user_logged_in");
        Ok(AuthSession { user: UserView::from(user), token, csrf })
    }

    /// Check the session cookie and the CSRF header that must echo its `csrf` claim.
    pub fn verify(&self, token: Option<&str>, csrf_header: Option<&str>) -> Result<Actor, AuthError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::TokenMissing)?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;
        if csrf_header != Some(data.claims.csrf.as_str()) {
            debug!(user_id = %data.claims.sub, "csrf header mismatch");
            return Err(AuthError::TokenInvalid);
        }
        Ok(Actor::from(data.claims))
    }

    /// Create the configured admin account unless an admin already exists.
    #[instrument(skip(self, password, email, name))]
    pub async fn ensure_admin(&self, username: &str, password: &str, email: &str, name: &str) -> Result<Option<UserView>, AuthError> {
        if !self.users.list_by_role(Role::Admin).await?.is_empty() {
            debug!("admin account already present");
            return Ok(None);
        }
        let input = RegisterInput {
            username: username.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Some(Role::Admin),
            phone: None,
        };
        match self.register_with_role(input).await {
            Ok(user) => {
                info!(user_id = %user.id, "admin_bootstrapped");
                Ok(Some(user))
            }
            Err(AuthError::Duplicate(field)) => {
                warn!(field, "bootstrap admin clashes with an existing non-admin account");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repository::mock::MockUserRepository;

    fn svc() -> AuthService {
        AuthService::new(
            Arc::new(MockUserRepository::default()),
            AuthConfig { jwt_secret: "test-secret".into(), token_ttl_secs: 3600 },
        )
    }

    fn input(username: &str, role: Option<Role>) -> RegisterInput {
        RegisterInput {
            username: username.into(),
            name: "Someone".into(),
            email: format!("{username}@example.com"),
            password: "pw123".into(),
            role,
            phone: Some("600000000".into()),
        }
    }

    #[tokio::test]
    async fn public_registration_cannot_pick_staff_roles() {
        let svc = svc();
        assert!(matches!(svc.register(input("barber", Some(Role::Barbero))).await, Err(AuthError::Forbidden)));
        assert!(matches!(svc.register(input("boss", Some(Role::Admin))).await, Err(AuthError::Forbidden)));
        let u = svc.register(input("client", Some(Role::Cliente))).await.unwrap();
        assert_eq!(u.phone.as_deref(), Some("600000000"));
        let staff = svc.register_with_role(input("barber", Some(Role::Barbero))).await.unwrap();
        assert_eq!(staff.role, Role::Barbero);
    }

    #[tokio::test]
    async fn duplicates_and_validation() {
        let svc = svc();
        svc.register(input("client", None)).await.unwrap();
        let again = svc.register(input("client", None)).await.unwrap_err();
        assert_eq!(again.to_string(), "expected `username` to be unique");
        let mut other = input("client2", None);
        other.email = "client@example.com".into();
        assert!(matches!(svc.register(other).await, Err(AuthError::Duplicate("email"))));
        let mut short = input("client3", None);
        short.password = "pw".into();
        assert!(matches!(svc.register(short).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.register(input("ab", None)).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let svc = svc();
        svc.register(input("client", None)).await.unwrap();
        let wrong = svc.login(LoginInput { username: "client".into(), password: "nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
        let unknown = svc.login(LoginInput { username: "ghost".into(), password: "pw123".into() }).await.unwrap_err();
        assert_eq!(unknown.to_string(), "invalid username or password");
    }

    #[tokio::test]
    async fn verify_requires_matching_csrf() {
        let svc = svc();
        svc.register(input("client", None)).await.unwrap();
        let s = svc.login(LoginInput { username: "client".into(), password: "pw123".into() }).await.unwrap();
        assert_eq!(s.csrf.len(), 32);
        assert!(matches!(svc.verify(None, Some(&s.csrf)), Err(AuthError::TokenMissing)));
        assert!(matches!(svc.verify(Some(&s.token), None), Err(AuthError::TokenInvalid)));
        assert!(matches!(svc.verify(Some(&s.token), Some("other")), Err(AuthError::TokenInvalid)));
        assert!(matches!(svc.verify(Some("garbage"), Some(&s.csrf)), Err(AuthError::TokenInvalid)));
        let actor = svc.verify(Some(&s.token), Some(&s.csrf)).unwrap();
        assert_eq!(actor.role, Role::Cliente);
        assert_eq!(actor.username, "client");
    }

    #[tokio::test]
    async fn expired_and_foreign_tokens() {
        let svc = svc();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::new_v4(),
            username: "old".into(),
            role: Role::Admin,
            csrf: "c".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();
        assert!(matches!(svc.verify(Some(&expired), Some("c")), Err(AuthError::TokenExpired)));

        let fresh = Claims { exp: now + 3600, ..claims };
        let foreign = encode(&JwtHeader::default(), &fresh, &EncodingKey::from_secret(b"another-secret")).unwrap();
        assert!(matches!(svc.verify(Some(&foreign), Some("c")), Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn ensure_admin_runs_once() {
        let svc = svc();
        let created = svc.ensure_admin("root", "rootpw", "root@example.com", "Root").await.unwrap();
        assert_eq!(created.map(|u| u.role), Some(Role::Admin));
        let again = svc.ensure_admin("root2", "rootpw", "root2@example.com", "Root").await.unwrap();
        assert!(again.is_none());
    }
}
