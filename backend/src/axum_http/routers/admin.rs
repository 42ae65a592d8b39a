use crate::auth::AuthUser;
use crate::axum_http::error_responses::error_response;
use crate::mailer::LogMailer;
use crate::usecases::admin::AdminUseCase;
use crate::usecases::bookings::{BookingUseCase, PaymentGateway};
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
            machineries::MachineryRepository, payments::PaymentRepository,
            users::UserRepository, worker_profiles::WorkerProfileRepository,
        },
        value_objects::{
            admin::ApprovalQuery, bookings::UpdateBookingStatusModel,
            enums::role_names::RoleName,
        },
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
    let admin_usecase = AdminUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(WorkerProfilePostgres::new(Arc::clone(&db_pool))),
        Arc::new(MachineryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(BookingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentPostgres::new(Arc::clone(&db_pool))),
        Arc::new(LogMailer),
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

    let admin_router = Router::new()
        .route("/stats", get(stats))
        .route("/users", get(list_users))
        .route("/users/:id/approve", post(approve_user))
        .route("/machinery/:id/approve", post(approve_machinery))
        .route("/machinery/pending", get(pending_machinery))
        .route("/workers/pending", get(pending_workers))
        .route("/workers/:id/approve", post(approve_worker))
        .with_state(Arc::new(admin_usecase));
    let bookings_router = Router::new()
        .route("/bookings/:id/status", post(update_booking_status))
        .with_state(Arc::new(booking_usecase));

    admin_router.merge(bookings_router)
}

pub async fn stats<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_users<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase.list_users().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn approve_user<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
    Query(query): Query<ApprovalQuery>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase.approve_user(user_id, query.approve).await {
        Ok(()) => (StatusCode::OK, "User approval status updated.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn approve_machinery<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
    Path(machinery_id): Path<i64>,
    Query(query): Query<ApprovalQuery>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase
        .approve_machinery(machinery_id, query.approve)
        .await
    {
        Ok(()) => (StatusCode::OK, "Machinery approval status updated.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn approve_worker<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
    Path(worker_user_id): Path<i64>,
    Query(query): Query<ApprovalQuery>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase
        .approve_worker(worker_user_id, query.approve)
        .await
    {
        Ok(()) => (StatusCode::OK, "Worker approval status updated.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn pending_machinery<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase.pending_machinery().await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn pending_workers<U, W, M, B, P>(
    State(admin_usecase): State<Arc<AdminUseCase<U, W, M, B, P>>>,
    auth: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match admin_usecase.pending_workers().await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_booking_status<B, M, W, U, P, E, G>(
    State(booking_usecase): State<Arc<BookingUseCase<B, M, W, U, P, E, G>>>,
    auth: AuthUser,
    Path(booking_id): Path<i64>,
    Json(model): Json<UpdateBookingStatusModel>,
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
    if let Err(err) = auth.require_role(RoleName::Admin) {
        return err.into_response();
    }

    match booking_usecase
        .update_booking_status(booking_id, model.status)
        .await
    {
        Ok(()) => (StatusCode::OK, "Booking status updated.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
