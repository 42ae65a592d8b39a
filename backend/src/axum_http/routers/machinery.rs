use crate::axum_http::error_responses::error_response;
use crate::usecases::machinery::MachineryUseCase;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use crates::{
    domain::repositories::{
        machineries::MachineryRepository,
        machinery_categories::MachineryCategoryRepository, users::UserRepository,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            machineries::MachineryPostgres,
            machinery_categories::MachineryCategoryPostgres, users::UserPostgres,
        },
    },
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let machinery_usecase = MachineryUseCase::new(
        Arc::new(MachineryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(MachineryCategoryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/categories", get(list_categories))
        .with_state(Arc::new(machinery_usecase))
}

pub async fn list_categories<M, C, U>(
    State(machinery_usecase): State<Arc<MachineryUseCase<M, C, U>>>,
) -> Response
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match machinery_usecase.categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
