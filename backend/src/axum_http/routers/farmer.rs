use crate::auth::AuthUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::bookings::{BookingUseCase, PaymentGateway};
use crate::usecases::machinery::MachineryUseCase;
use crate::usecases::workers::WorkerUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            bookings::BookingRepository, earnings::EarningRepository,
            machineries::MachineryRepository,
            machinery_categories::MachineryCategoryRepository, payments::PaymentRepository,
            users::UserRepository, worker_profiles::WorkerProfileRepository,
        },
        value_objects::{
            bookings::{CreateBookingModel, VerifyPaymentModel},
            machineries::MachinerySearchFilter,
            workers::WorkerSearchFilter,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            bookings::BookingPostgres, earnings::EarningPostgres,
            machineries::MachineryPostgres,
            machinery_categories::MachineryCategoryPostgres, payments::PaymentPostgres,
            users::UserPostgres, worker_profiles::WorkerProfilePostgres,
        },
    },
    payments::razorpay_client::RazorpayClient,
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>, razorpay_client: Arc<RazorpayClient>) -> Router {
    let machinery_usecase = MachineryUseCase::new(
        Arc::new(MachineryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(MachineryCategoryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
    );
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

    let search_machinery_router = Router::new()
        .route("/machinery/search", get(search_machinery))
        .with_state(Arc::new(machinery_usecase));
    let search_workers_router = Router::new()
        .route("/workers/search", get(search_workers))
        .with_state(Arc::new(worker_usecase));
    let bookings_router = Router::new()
        .route("/bookings/create", post(create_booking))
        .route("/bookings/history", get(booking_history))
        .route("/bookings/:id/pay", post(pay_booking))
        .route("/payments/verify", post(verify_payment))
        .with_state(Arc::new(booking_usecase));

    search_machinery_router
        .merge(search_workers_router)
        .merge(bookings_router)
}

pub async fn search_machinery<M, C, U>(
    State(machinery_usecase): State<Arc<MachineryUseCase<M, C, U>>>,
    _auth: AuthUser,
    Query(filter): Query<MachinerySearchFilter>,
) -> Response
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match machinery_usecase.search(filter).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn search_workers<W, U>(
    State(worker_usecase): State<Arc<WorkerUseCase<W, U>>>,
    _auth: AuthUser,
    Query(filter): Query<WorkerSearchFilter>,
) -> Response
where
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match worker_usecase.search(filter).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_booking<B, M, W, U, P, E, G>(
    State(booking_usecase): State<Arc<BookingUseCase<B, M, W, U, P, E, G>>>,
    auth: AuthUser,
    Json(model): Json<CreateBookingModel>,
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
    match booking_usecase.create_booking(auth.user_id, model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn booking_history<B, M, W, U, P, E, G>(
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
    match booking_usecase.farmer_bookings(auth.user_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn pay_booking<B, M, W, U, P, E, G>(
    State(booking_usecase): State<Arc<BookingUseCase<B, M, W, U, P, E, G>>>,
    _auth: AuthUser,
    Path(booking_id): Path<i64>,
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
    match booking_usecase.settle_booking(booking_id, "direct").await {
        Ok(()) => (StatusCode::OK, "Payment successful.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn verify_payment<B, M, W, U, P, E, G>(
    State(booking_usecase): State<Arc<BookingUseCase<B, M, W, U, P, E, G>>>,
    _auth: AuthUser,
    Json(model): Json<VerifyPaymentModel>,
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
    match booking_usecase.verify_payment(model).await {
        Ok(outcome) if outcome.verified => (StatusCode::OK, Json(outcome)).into_response(),
        Ok(outcome) => (StatusCode::BAD_REQUEST, Json(outcome)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
