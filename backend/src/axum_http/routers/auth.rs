use crate::axum_http::error_responses::error_response;
use crate::mailer::LogMailer;
use crate::usecases::auth::AuthUseCase;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use crates::{
    domain::{
        repositories::{
            roles::RoleRepository, users::UserRepository,
            worker_profiles::WorkerProfileRepository,
        },
        value_objects::users::{LoginModel, RegisterUserModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            roles::RolePostgres, users::UserPostgres, worker_profiles::WorkerProfilePostgres,
        },
    },
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>, jwt_secret: String) -> Router {
    let user_repo = UserPostgres::new(Arc::clone(&db_pool));
    let role_repo = RolePostgres::new(Arc::clone(&db_pool));
    let worker_profile_repo = WorkerProfilePostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(
        Arc::new(user_repo),
        Arc::new(role_repo),
        Arc::new(worker_profile_repo),
        Arc::new(LogMailer),
        jwt_secret,
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(auth_usecase))
}

pub async fn register<U, R, W>(
    State(auth_usecase): State<Arc<AuthUseCase<U, R, W>>>,
    Json(model): Json<RegisterUserModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    R: RoleRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
{
    match auth_usecase.register(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn login<U, R, W>(
    State(auth_usecase): State<Arc<AuthUseCase<U, R, W>>>,
    Json(model): Json<LoginModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    R: RoleRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
{
    match auth_usecase.login(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
