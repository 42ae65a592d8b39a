use crate::auth::AuthUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::bookings::{BookingUseCase, PaymentGateway};
use crate::usecases::workers::WorkerUseCase;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use crates::{
    domain::{
        repositories::{
            bookings::BookingRepository, earnings::EarningRepository,
            machineries::MachineryRepository, payments::PaymentRepository,
            users::UserRepository, worker_profiles::WorkerProfileRepository,
        },
        value_objects::{enums::role_names::RoleName, workers::EditWorkerProfileModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            bookings::BookingPostgres, earnings::EarningPostgres,
            machineries::MachineryPostgres, payments::PaymentPostgres, users::UserPostgres,
            worker_profiles::WorkerProfilePostgres,
        },
    },
    payments::razorpay_client::RazorpayClient,
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>, razorpay_client: Arc<RazorpayClient>) -> Router {
    let worker_usecase = WorkerUseCase::new(
        Arc::new(WorkerProfilePostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
    );
    let booking_usecase = BookingUseCase::new(
        Arc::new(BookingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(MachineryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(WorkerProfilePostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentPostgres::new(Arc::clone(&db_pool))),
        Arc::new(EarningPostgres::new(Arc::clone(&db_pool))),
        razorpay_client,
    );

    let profile_router = Router::new()
        .route("/profile", put(update_profile))
        .route("/profile/mine", get(my_profile))
        .with_state(Arc::new(worker_usecase));
    let bookings_router = Router::new()
        .route("/bookings", get(worker_bookings))
        .with_state(Arc::new(booking_usecase));

    profile_router.merge(bookings_router)
}

pub async fn update_profile<W, U>(
    State(worker_usecase): State<Arc<WorkerUseCase<W, U>>>,
    auth: AuthUser,
    Json(model): Json<EditWorkerProfileModel>,
) -> Response
where
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::FarmWorker) {
        return err.into_response();
    }

    match worker_usecase.update_profile(auth.user_id, model).await {
        Ok(()) => {
            (StatusCode::OK, "Profile updated and pending for approval.").into_response()
        }
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn my_profile<W, U>(
    State(worker_usecase): State<Arc<WorkerUseCase<W, U>>>,
    auth: AuthUser,
) -> Response
where
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::FarmWorker) {
        return err.into_response();
    }

    match worker_usecase.my_profile(auth.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn worker_bookings<B, M, W, U, P, E, G>(
    State(booking_usecase): State<Arc<BookingUseCase<B, M, W, U, P, E, G>>>,
    auth: AuthUser,
) -> Response
where
    B: BookingRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::FarmWorker) {
        return err.into_response();
    }

    match booking_usecase.worker_bookings(auth.user_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
