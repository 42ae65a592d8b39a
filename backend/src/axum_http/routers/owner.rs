use crate::auth::AuthUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::bookings::{BookingUseCase, PaymentGateway};
use crate::usecases::machinery::MachineryUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
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
            enums::role_names::RoleName,
            machineries::{EditMachineryModel, InsertMachineryModel},
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
    let booking_usecase = BookingUseCase::new(
        Arc::new(BookingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(MachineryPostgres::new(Arc::clone(&db_pool))),
        Arc::new(WorkerProfilePostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentPostgres::new(Arc::clone(&db_pool))),
        Arc::new(EarningPostgres::new(Arc::clone(&db_pool))),
        razorpay_client,
    );

    let machinery_router = Router::new()
        .route("/machinery/list", post(list_machinery))
        .route("/machinery/:id", put(update_machinery))
        .route("/machinery/mine", get(my_machinery))
        .with_state(Arc::new(machinery_usecase));
    let bookings_router = Router::new()
        .route("/bookings", get(owner_bookings))
        .with_state(Arc::new(booking_usecase));

    machinery_router.merge(bookings_router)
}

pub async fn list_machinery<M, C, U>(
    State(machinery_usecase): State<Arc<MachineryUseCase<M, C, U>>>,
    auth: AuthUser,
    Json(model): Json<InsertMachineryModel>,
) -> Response
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::MachineryOwner) {
        return err.into_response();
    }

    match machinery_usecase.create(auth.user_id, model).await {
        Ok(machinery) => (StatusCode::OK, Json(machinery)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_machinery<M, C, U>(
    State(machinery_usecase): State<Arc<MachineryUseCase<M, C, U>>>,
    auth: AuthUser,
    Path(machinery_id): Path<i64>,
    Json(model): Json<EditMachineryModel>,
) -> Response
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::MachineryOwner) {
        return err.into_response();
    }

    match machinery_usecase
        .update(machinery_id, auth.user_id, model)
        .await
    {
        Ok(()) => (StatusCode::OK, "Machinery updated successfully.").into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn my_machinery<M, C, U>(
    State(machinery_usecase): State<Arc<MachineryUseCase<M, C, U>>>,
    auth: AuthUser,
) -> Response
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require_role(RoleName::MachineryOwner) {
        return err.into_response();
    }

    match machinery_usecase.list_by_owner(auth.user_id).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn owner_bookings<B, M, W, U, P, E, G>(
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
    if let Err(err) = auth.require_role(RoleName::MachineryOwner) {
        return err.into_response();
    }

    match booking_usecase.owner_bookings(auth.user_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
