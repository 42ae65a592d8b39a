use std::sync::Arc;

use crates::domain::{
    entities::{users::RegisterUserEntity, worker_profiles::InsertWorkerProfileEntity},
    repositories::{
        roles::RoleRepository, users::UserRepository,
        worker_profiles::WorkerProfileRepository,
    },
    value_objects::{
        enums::{availability_statuses::AvailabilityStatus, role_names::RoleName},
        users::{AuthResponseModel, LoginModel, RegisterUserModel},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::mailer::{self, Mailer};

const PASSWORD_SPECIALS: &str = "@$!%*#?&";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already exists")]
    EmailTaken,
    #[error("unknown role: {0}")]
    InvalidRole(String),
    #[error("{0}")]
    Validation(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is pending admin approval")]
    PendingApproval,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidRole(_) | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::PendingApproval => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AuthError>;

pub struct AuthUseCase<U, R, W>
where
    U: UserRepository + Send + Sync + 'static,
    R: RoleRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    worker_profile_repo: Arc<W>,
    mailer: Arc<dyn Mailer>,
    jwt_secret: String,
}

impl<U, R, W> AuthUseCase<U, R, W>
where
    U: UserRepository + Send + Sync + 'static,
    R: RoleRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        worker_profile_repo: Arc<W>,
        mailer: Arc<dyn Mailer>,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            worker_profile_repo,
            mailer,
            jwt_secret,
        }
    }

    pub async fn register(&self, model: RegisterUserModel) -> UseCaseResult<AuthResponseModel> {
        info!(email = %model.email, role = %model.role, "auth: registration requested");

        validate_registration(&model)?;

        let existing = self.user_repo.find_by_email(&model.email).await.map_err(|err| {
            error!(email = %model.email, db_error = ?err, "auth: failed to check email");
            AuthError::Internal(err)
        })?;
        if existing.is_some() {
            let err = AuthError::EmailTaken;
            warn!(
                email = %model.email,
                status = err.status_code().as_u16(),
                "auth: email already registered"
            );
            return Err(err);
        }

        let role = self
            .role_repo
            .find_by_name(&model.role)
            .await
            .map_err(|err| {
                error!(role = %model.role, db_error = ?err, "auth: failed to load role");
                AuthError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = AuthError::InvalidRole(model.role.clone());
                warn!(
                    role = %model.role,
                    status = err.status_code().as_u16(),
                    "auth: unknown role at registration"
                );
                err
            })?;

        let password_hash = crate::auth::hash_password(&model.password)?;

        // Admin registrations skip the approval queue.
        let is_approved = model.role == RoleName::Admin.as_str();

        let user_id = self
            .user_repo
            .register(RegisterUserEntity {
                role_id: role.id,
                username: model.username.clone(),
                email: model.email.clone(),
                password_hash,
                full_name: model.full_name.clone(),
                phone_number: model.phone_number.clone(),
                is_approved,
            })
            .await
            .map_err(|err| {
                error!(email = %model.email, db_error = ?err, "auth: failed to insert user");
                AuthError::Internal(err)
            })?;

        if model.role == RoleName::FarmWorker.as_str() {
            self.worker_profile_repo
                .insert(InsertWorkerProfileEntity {
                    worker_id: user_id,
                    skills: String::new(),
                    experience_years: 0,
                    hourly_rate_minor: 0,
                    availability_status: AvailabilityStatus::Available.to_string(),
                    bio: String::new(),
                    available_date: None,
                    is_approved: false,
                })
                .await
                .map_err(|err| {
                    error!(
                        %user_id,
                        db_error = ?err,
                        "auth: failed to create worker profile"
                    );
                    AuthError::Internal(err)
                })?;
        }

        mailer::send_best_effort(
            Arc::clone(&self.mailer),
            model.email.clone(),
            "Welcome to KrishiSetu".to_string(),
            "Your account has been created and is awaiting admin approval.".to_string(),
        );

        let token = if is_approved {
            crate::auth::generate_jwt(
                user_id,
                &model.username,
                &model.email,
                &role.name,
                &self.jwt_secret,
            )?
        } else {
            String::new()
        };

        info!(%user_id, email = %model.email, is_approved, "auth: registration completed");

        Ok(AuthResponseModel {
            token,
            username: model.username,
            role: role.name,
            is_approved,
        })
    }

    pub async fn login(&self, model: LoginModel) -> UseCaseResult<AuthResponseModel> {
        info!(email = %model.email, "auth: login attempt");

        let (user, role_name) = self
            .user_repo
            .find_by_email_with_role(&model.email)
            .await
            .map_err(|err| {
                error!(email = %model.email, db_error = ?err, "auth: failed to load user");
                AuthError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = AuthError::InvalidCredentials;
                warn!(
                    email = %model.email,
                    status = err.status_code().as_u16(),
                    "auth: unknown email at login"
                );
                err
            })?;

        if !crate::auth::verify_password(&model.password, &user.password_hash) {
            let err = AuthError::InvalidCredentials;
            warn!(
                email = %model.email,
                status = err.status_code().as_u16(),
                "auth: password mismatch"
            );
            return Err(err);
        }

        if !user.is_approved {
            let err = AuthError::PendingApproval;
            warn!(
                email = %model.email,
                status = err.status_code().as_u16(),
                "auth: unapproved account attempted login"
            );
            return Err(err);
        }

        let token = crate::auth::generate_jwt(
            user.id,
            &user.username,
            &user.email,
            &role_name,
            &self.jwt_secret,
        )?;

        info!(user_id = user.id, email = %model.email, "auth: login succeeded");

        Ok(AuthResponseModel {
            token,
            username: user.username,
            role: role_name,
            is_approved: user.is_approved,
        })
    }
}

fn validate_registration(model: &RegisterUserModel) -> UseCaseResult<()> {
    if !is_valid_email(&model.email) {
        return Err(AuthError::Validation(
            "Invalid email address format.".to_string(),
        ));
    }

    if !is_valid_password(&model.password) {
        return Err(AuthError::Validation(
            "Password must be at least 8 characters and include a letter, number, and special character."
                .to_string(),
        ));
    }

    if !is_valid_phone(&model.phone_number) {
        return Err(AuthError::Validation(
            "Please enter a valid 10-digit Indian mobile number.".to_string(),
        ));
    }

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10
        && phone.chars().all(|c| c.is_ascii_digit())
        && phone.starts_with(['6', '7', '8', '9'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::entities::roles::RoleEntity;
    use crates::domain::entities::users::UserEntity;
    use crates::domain::repositories::roles::MockRoleRepository;
    use crates::domain::repositories::users::MockUserRepository;
    use crates::domain::repositories::worker_profiles::MockWorkerProfileRepository;
    use chrono::Utc;

    use crate::mailer::LogMailer;

    fn register_model(role: &str) -> RegisterUserModel {
        RegisterUserModel {
            username: "ramesh".to_string(),
            email: "ramesh@example.com".to_string(),
            password: "Secret@123".to_string(),
            full_name: "Ramesh Kumar".to_string(),
            phone_number: "9876543210".to_string(),
            role: role.to_string(),
        }
    }

    fn user_entity(id: i64, is_approved: bool, password: &str) -> UserEntity {
        UserEntity {
            id,
            role_id: 2,
            username: "ramesh".to_string(),
            email: "ramesh@example.com".to_string(),
            password_hash: crate::auth::hash_password(password).unwrap(),
            full_name: "Ramesh Kumar".to_string(),
            phone_number: "9876543210".to_string(),
            is_approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn usecase(
        user_repo: MockUserRepository,
        role_repo: MockRoleRepository,
        worker_profile_repo: MockWorkerProfileRepository,
    ) -> AuthUseCase<MockUserRepository, MockRoleRepository, MockWorkerProfileRepository> {
        AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(role_repo),
            Arc::new(worker_profile_repo),
            Arc::new(LogMailer),
            "test-secret".to_string(),
        )
    }

    #[tokio::test]
    async fn register_farmer_is_pending_with_empty_token() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_register()
            .withf(|user| !user.is_approved && user.email == "ramesh@example.com")
            .times(1)
            .returning(|_| Ok(11));

        let mut role_repo = MockRoleRepository::new();
        role_repo.expect_find_by_name().returning(|_| {
            Ok(Some(RoleEntity {
                id: 2,
                name: "Farmer".to_string(),
            }))
        });

        let result = usecase(user_repo, role_repo, MockWorkerProfileRepository::new())
            .register(register_model("Farmer"))
            .await
            .unwrap();

        assert!(!result.is_approved);
        assert!(result.token.is_empty());
        assert_eq!(result.role, "Farmer");
    }

    #[tokio::test]
    async fn register_farm_worker_creates_profile() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo.expect_register().returning(|_| Ok(12));

        let mut role_repo = MockRoleRepository::new();
        role_repo.expect_find_by_name().returning(|_| {
            Ok(Some(RoleEntity {
                id: 4,
                name: "FarmWorker".to_string(),
            }))
        });

        let mut worker_profile_repo = MockWorkerProfileRepository::new();
        worker_profile_repo
            .expect_insert()
            .withf(|profile| profile.worker_id == 12 && !profile.is_approved)
            .times(1)
            .returning(|_| Ok(5));

        let result = usecase(user_repo, role_repo, worker_profile_repo)
            .register(register_model("FarmWorker"))
            .await
            .unwrap();

        assert!(!result.is_approved);
    }

    #[tokio::test]
    async fn register_duplicate_email_is_conflict() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_entity(9, true, "Secret@123"))));

        let result = usecase(
            user_repo,
            MockRoleRepository::new(),
            MockWorkerProfileRepository::new(),
        )
        .register(register_model("Farmer"))
        .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let mut model = register_model("Farmer");
        model.password = "short".to_string();

        let result = usecase(
            MockUserRepository::new(),
            MockRoleRepository::new(),
            MockWorkerProfileRepository::new(),
        )
        .register(model)
        .await;

        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email_with_role()
            .returning(|_| Ok(Some((user_entity(9, true, "Secret@123"), "Farmer".to_string()))));

        let result = usecase(
            user_repo,
            MockRoleRepository::new(),
            MockWorkerProfileRepository::new(),
        )
        .login(LoginModel {
            email: "ramesh@example.com".to_string(),
            password: "Wrong@123".to_string(),
        })
        .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_unapproved_account_is_forbidden() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email_with_role()
            .returning(|_| Ok(Some((user_entity(9, false, "Secret@123"), "Farmer".to_string()))));

        let result = usecase(
            user_repo,
            MockRoleRepository::new(),
            MockWorkerProfileRepository::new(),
        )
        .login(LoginModel {
            email: "ramesh@example.com".to_string(),
            password: "Secret@123".to_string(),
        })
        .await;

        assert!(matches!(result, Err(AuthError::PendingApproval)));
    }

    #[tokio::test]
    async fn login_approved_account_returns_token() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email_with_role()
            .returning(|_| Ok(Some((user_entity(9, true, "Secret@123"), "Farmer".to_string()))));

        let result = usecase(
            user_repo,
            MockRoleRepository::new(),
            MockWorkerProfileRepository::new(),
        )
        .login(LoginModel {
            email: "ramesh@example.com".to_string(),
            password: "Secret@123".to_string(),
        })
        .await
        .unwrap();

        assert!(!result.token.is_empty());
        assert!(result.is_approved);
    }

    #[test]
    fn validation_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("a@nodot"));

        assert!(is_valid_password("Secret@123"));
        assert!(!is_valid_password("Secret123"));
        assert!(!is_valid_password("@@@@1111"));

        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("1876543210"));
        assert!(!is_valid_phone("98765"));
    }
}
