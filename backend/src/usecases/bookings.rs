use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use crates::{
    domain::{
        entities::{
            bookings::{BookingEntity, InsertBookingEntity},
            earnings::InsertEarningEntity,
            payments::NewPaymentEntity,
        },
        repositories::{
            bookings::BookingRepository, earnings::EarningRepository,
            machineries::MachineryRepository, payments::PaymentRepository,
            users::UserRepository, worker_profiles::WorkerProfileRepository,
        },
        value_objects::{
            bookings::{
                BookingModel, CreateBookingModel, CreateBookingResponse, VerifyPaymentModel,
                VerifyPaymentOutcome,
            },
            enums::{booking_statuses::BookingStatus, payment_statuses::PaymentStatus},
        },
    },
    payments::razorpay_client::RazorpayClient,
};
use thiserror::Error;
use tracing::{error, info, warn};

const DEFAULT_WORKER_HOURS: i64 = 8;
const CURRENCY: &str = "INR";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, amount_minor: i64, receipt: &str) -> AnyResult<String>;

    fn verify_signature(&self, payment_id: &str, order_id: &str, signature: &str) -> bool;

    fn key_id(&self) -> String;
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount_minor: i64, receipt: &str) -> AnyResult<String> {
        self.create_order(amount_minor, receipt).await
    }

    fn verify_signature(&self, payment_id: &str, order_id: &str, signature: &str) -> bool {
        self.verify_signature(payment_id, order_id, signature)
    }

    fn key_id(&self) -> String {
        self.key_id().to_string()
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("machinery not found")]
    MachineryNotFound,
    #[error("worker not found")]
    WorkerNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("no booking matches the payment order")]
    OrderNotFound,
    #[error("a booking needs at least one machinery or worker")]
    EmptyResources,
    #[error("resource is no longer available")]
    ResourceUnavailable,
    #[error("booking is already paid")]
    AlreadyPaid,
    #[error("payment gateway error: {0}")]
    Gateway(anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BookingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BookingError::MachineryNotFound
            | BookingError::WorkerNotFound
            | BookingError::BookingNotFound
            | BookingError::OrderNotFound => StatusCode::NOT_FOUND,
            BookingError::EmptyResources => StatusCode::BAD_REQUEST,
            BookingError::ResourceUnavailable | BookingError::AlreadyPaid => {
                StatusCode::CONFLICT
            }
            BookingError::Gateway(_) => StatusCode::BAD_GATEWAY,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, BookingError>;

pub struct BookingUseCase<B, M, W, U, P, E, G>
where
    B: BookingRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    booking_repo: Arc<B>,
    machinery_repo: Arc<M>,
    worker_profile_repo: Arc<W>,
    user_repo: Arc<U>,
    payment_repo: Arc<P>,
    earning_repo: Arc<E>,
    payment_gateway: Arc<G>,
}

impl<B, M, W, U, P, E, G> BookingUseCase<B, M, W, U, P, E, G>
where
    B: BookingRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(
        booking_repo: Arc<B>,
        machinery_repo: Arc<M>,
        worker_profile_repo: Arc<W>,
        user_repo: Arc<U>,
        payment_repo: Arc<P>,
        earning_repo: Arc<E>,
        payment_gateway: Arc<G>,
    ) -> Self {
        Self {
            booking_repo,
            machinery_repo,
            worker_profile_repo,
            user_repo,
            payment_repo,
            earning_repo,
            payment_gateway,
        }
    }

    pub async fn create_booking(
        &self,
        farmer_id: i64,
        model: CreateBookingModel,
    ) -> UseCaseResult<CreateBookingResponse> {
        info!(
            %farmer_id,
            machinery_id = ?model.machinery_id,
            worker_id = ?model.worker_id,
            start_date = %model.start_date,
            end_date = %model.end_date,
            hours = ?model.hours,
            "bookings: create requested"
        );

        if model.machinery_id.is_none() && model.worker_id.is_none() {
            let err = BookingError::EmptyResources;
            warn!(
                %farmer_id,
                status = err.status_code().as_u16(),
                "bookings: request names no resource"
            );
            return Err(err);
        }

        let machinery = match model.machinery_id {
            Some(machinery_id) => Some(
                self.machinery_repo
                    .find_by_id(machinery_id)
                    .await
                    .map_err(|err| {
                        error!(%machinery_id, db_error = ?err, "bookings: machinery lookup failed");
                        BookingError::Internal(err)
                    })?
                    .ok_or_else(|| {
                        let err = BookingError::MachineryNotFound;
                        warn!(
                            %machinery_id,
                            status = err.status_code().as_u16(),
                            "bookings: unknown machinery"
                        );
                        err
                    })?,
            ),
            None => None,
        };

        let worker = match model.worker_id {
            Some(worker_id) => Some(
                self.worker_profile_repo
                    .find_by_id(worker_id)
                    .await
                    .map_err(|err| {
                        error!(%worker_id, db_error = ?err, "bookings: worker lookup failed");
                        BookingError::Internal(err)
                    })?
                    .ok_or_else(|| {
                        let err = BookingError::WorkerNotFound;
                        warn!(
                            %worker_id,
                            status = err.status_code().as_u16(),
                            "bookings: unknown worker"
                        );
                        err
                    })?,
            ),
            None => None,
        };

        let mut start_date = model.start_date;
        let mut end_date = model.end_date;
        let mut total_amount_minor: i64 = 0;

        if let Some(machinery) = &machinery {
            // A provider-set available date collapses the booking to that
            // single day; otherwise the requested span is priced per day.
            if let Some(available_date) = machinery.available_date {
                start_date = available_date;
                end_date = available_date;
                total_amount_minor += machinery.rate_per_day_minor;
            } else {
                let mut days = (model.end_date - model.start_date).num_days() + 1;
                if days <= 0 {
                    days = 1;
                }
                total_amount_minor += machinery.rate_per_day_minor * days;
            }
        }

        if let Some(worker) = &worker {
            // The worker's available date wins over any machinery-derived
            // dates, and the hourly computation replaces the machinery amount
            // rather than adding to it.
            if let Some(available_date) = worker.available_date {
                start_date = available_date;
                end_date = available_date;
            }

            let hours = model.hours.map(i64::from).unwrap_or(DEFAULT_WORKER_HOURS);
            total_amount_minor = worker.hourly_rate_minor * hours;
        }

        if let Some(machinery) = &machinery {
            let locked = self
                .machinery_repo
                .lock_if_available(machinery.id)
                .await
                .map_err(BookingError::Internal)?;
            if !locked {
                let err = BookingError::ResourceUnavailable;
                warn!(
                    machinery_id = machinery.id,
                    status = err.status_code().as_u16(),
                    "bookings: machinery not available"
                );
                return Err(err);
            }
        }

        if let Some(worker) = &worker {
            let locked = self
                .worker_profile_repo
                .lock_if_available(worker.id)
                .await
                .map_err(BookingError::Internal)?;
            if !locked {
                // Release the machinery lock taken above before bailing out.
                if let Some(machinery) = &machinery {
                    self.machinery_repo
                        .unlock(machinery.id)
                        .await
                        .map_err(BookingError::Internal)?;
                }
                let err = BookingError::ResourceUnavailable;
                warn!(
                    worker_id = worker.id,
                    status = err.status_code().as_u16(),
                    "bookings: worker not available"
                );
                return Err(err);
            }
        }

        let booking_id = self
            .booking_repo
            .create(InsertBookingEntity {
                farmer_id,
                machinery_id: model.machinery_id,
                worker_id: model.worker_id,
                start_date,
                end_date,
                total_amount_minor,
                status: BookingStatus::Pending.to_string(),
                payment_status: PaymentStatus::Pending.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%farmer_id, db_error = ?err, "bookings: failed to insert booking");
                BookingError::Internal(err)
            })?;

        // Order creation failures propagate as-is: the booking row and the
        // availability locks deliberately stay in place, matching the
        // no-compensation contract of the settlement flow.
        let receipt = format!("booking_{booking_id}");
        let order_id = self
            .payment_gateway
            .create_order(total_amount_minor, &receipt)
            .await
            .map_err(|err| {
                error!(
                    %booking_id,
                    %total_amount_minor,
                    error = ?err,
                    "bookings: gateway order creation failed"
                );
                BookingError::Gateway(err)
            })?;

        self.booking_repo
            .set_order_ref(booking_id, &order_id)
            .await
            .map_err(|err| {
                error!(%booking_id, %order_id, db_error = ?err, "bookings: failed to bind order");
                BookingError::Internal(err)
            })?;

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| {
                BookingError::Internal(anyhow::anyhow!("booking vanished after insert"))
            })?;
        let booking = self.to_model(booking).await?;

        info!(
            %booking_id,
            %order_id,
            %total_amount_minor,
            "bookings: booking created"
        );

        Ok(CreateBookingResponse {
            booking,
            order_id,
            amount_minor: total_amount_minor,
            currency: CURRENCY.to_string(),
            key_id: self.payment_gateway.key_id(),
        })
    }

    pub async fn farmer_bookings(&self, farmer_id: i64) -> UseCaseResult<Vec<BookingModel>> {
        let bookings = self
            .booking_repo
            .list_by_farmer(farmer_id)
            .await
            .map_err(BookingError::Internal)?;

        self.to_models(bookings).await
    }

    pub async fn owner_bookings(&self, owner_id: i64) -> UseCaseResult<Vec<BookingModel>> {
        let bookings = self
            .booking_repo
            .list_by_machinery_owner(owner_id)
            .await
            .map_err(BookingError::Internal)?;

        self.to_models(bookings).await
    }

    pub async fn worker_bookings(
        &self,
        worker_user_id: i64,
    ) -> UseCaseResult<Vec<BookingModel>> {
        let bookings = self
            .booking_repo
            .list_by_worker_user(worker_user_id)
            .await
            .map_err(BookingError::Internal)?;

        self.to_models(bookings).await
    }

    /// Direct settlement: marks the booking paid exactly once and distributes
    /// earnings to the referenced providers.
    pub async fn settle_booking(&self, booking_id: i64, method: &str) -> UseCaseResult<()> {
        info!(%booking_id, method, "bookings: settlement requested");

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: settlement lookup failed");
                BookingError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = BookingError::BookingNotFound;
                warn!(
                    %booking_id,
                    status = err.status_code().as_u16(),
                    "bookings: settlement for unknown booking"
                );
                err
            })?;

        let settled = self
            .booking_repo
            .mark_paid_if_pending(booking_id)
            .await
            .map_err(BookingError::Internal)?;
        if !settled {
            let err = BookingError::AlreadyPaid;
            warn!(
                %booking_id,
                status = err.status_code().as_u16(),
                "bookings: booking already settled"
            );
            return Err(err);
        }

        self.payment_repo
            .record_payment(NewPaymentEntity {
                booking_id,
                amount_minor: booking.total_amount_minor,
                method: method.to_string(),
                status: PaymentStatus::Paid.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: failed to record payment");
                BookingError::Internal(err)
            })?;

        if let Some(machinery_id) = booking.machinery_id {
            if let Some(machinery) = self
                .machinery_repo
                .find_by_id(machinery_id)
                .await
                .map_err(BookingError::Internal)?
            {
                // Owner earnings are recomputed from the current daily rate
                // and the stored span, not copied from the booking total.
                let days = (booking.end_date - booking.start_date).num_days() + 1;
                self.earning_repo
                    .record_earning(InsertEarningEntity {
                        user_id: machinery.owner_id,
                        booking_id,
                        amount_minor: machinery.rate_per_day_minor * days,
                    })
                    .await
                    .map_err(|err| {
                        error!(
                            %booking_id,
                            %machinery_id,
                            db_error = ?err,
                            "bookings: failed to record owner earning"
                        );
                        BookingError::Internal(err)
                    })?;
            }
        }

        if let Some(worker_id) = booking.worker_id {
            if let Some(worker) = self
                .worker_profile_repo
                .find_by_id(worker_id)
                .await
                .map_err(BookingError::Internal)?
            {
                self.earning_repo
                    .record_earning(InsertEarningEntity {
                        user_id: worker.worker_id,
                        booking_id,
                        amount_minor: booking.total_amount_minor,
                    })
                    .await
                    .map_err(|err| {
                        error!(
                            %booking_id,
                            %worker_id,
                            db_error = ?err,
                            "bookings: failed to record worker earning"
                        );
                        BookingError::Internal(err)
                    })?;
            }
        }

        info!(%booking_id, "bookings: settlement completed");

        Ok(())
    }

    /// Gateway settlement: validates the checkout signature, resolves the
    /// booking through the order reference bound at creation time, and runs
    /// the same guarded settlement.
    pub async fn verify_payment(
        &self,
        model: VerifyPaymentModel,
    ) -> UseCaseResult<VerifyPaymentOutcome> {
        info!(order_id = %model.order_id, "bookings: payment verification requested");

        let verified = self.payment_gateway.verify_signature(
            &model.payment_id,
            &model.order_id,
            &model.signature,
        );
        if !verified {
            warn!(order_id = %model.order_id, "bookings: signature verification failed");
            return Ok(VerifyPaymentOutcome {
                verified: false,
                booking_id: None,
            });
        }

        let booking = self
            .booking_repo
            .find_by_order_ref(&model.order_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or_else(|| {
                let err = BookingError::OrderNotFound;
                warn!(
                    order_id = %model.order_id,
                    status = err.status_code().as_u16(),
                    "bookings: verified order is bound to no booking"
                );
                err
            })?;

        self.settle_booking(booking.id, "razorpay").await?;

        Ok(VerifyPaymentOutcome {
            verified: true,
            booking_id: Some(booking.id),
        })
    }

    pub async fn update_booking_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> UseCaseResult<()> {
        let updated = self
            .booking_repo
            .update_status(booking_id, status)
            .await
            .map_err(BookingError::Internal)?;
        if !updated {
            let err = BookingError::BookingNotFound;
            warn!(
                %booking_id,
                status = err.status_code().as_u16(),
                "bookings: status update for unknown booking"
            );
            return Err(err);
        }

        info!(%booking_id, new_status = %status, "bookings: status updated");

        Ok(())
    }

    async fn to_models(&self, bookings: Vec<BookingEntity>) -> UseCaseResult<Vec<BookingModel>> {
        let mut models = Vec::with_capacity(bookings.len());
        for booking in bookings {
            models.push(self.to_model(booking).await?);
        }
        Ok(models)
    }

    async fn to_model(&self, booking: BookingEntity) -> UseCaseResult<BookingModel> {
        let farmer_name = self
            .user_repo
            .find_by_id(booking.farmer_id)
            .await?
            .map(|user| user.full_name)
            .unwrap_or_default();

        let machinery_name = match booking.machinery_id {
            Some(machinery_id) => self
                .machinery_repo
                .find_by_id(machinery_id)
                .await?
                .map(|machinery| machinery.name),
            None => None,
        };

        let worker_name = match booking.worker_id {
            Some(worker_id) => match self.worker_profile_repo.find_by_id(worker_id).await? {
                Some(profile) => self
                    .user_repo
                    .find_by_id(profile.worker_id)
                    .await?
                    .map(|user| user.full_name),
                None => None,
            },
            None => None,
        };

        Ok(BookingModel {
            id: booking.id,
            farmer_id: booking.farmer_id,
            farmer_name,
            machinery_id: booking.machinery_id,
            machinery_name,
            worker_id: booking.worker_id,
            worker_name,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_amount_minor: booking.total_amount_minor,
            status: booking.status,
            payment_status: booking.payment_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use crates::domain::entities::machineries::MachineryEntity;
    use crates::domain::entities::users::UserEntity;
    use crates::domain::entities::worker_profiles::WorkerProfileEntity;
    use crates::domain::repositories::bookings::MockBookingRepository;
    use crates::domain::repositories::earnings::MockEarningRepository;
    use crates::domain::repositories::machineries::MockMachineryRepository;
    use crates::domain::repositories::payments::MockPaymentRepository;
    use crates::domain::repositories::users::MockUserRepository;
    use crates::domain::repositories::worker_profiles::MockWorkerProfileRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn machinery_entity(
        id: i64,
        owner_id: i64,
        rate_per_day_minor: i64,
        available_date: Option<NaiveDate>,
    ) -> MachineryEntity {
        MachineryEntity {
            id,
            owner_id,
            category_id: 1,
            name: "Tractor MF-241".to_string(),
            description: String::new(),
            rate_per_hour_minor: 200,
            rate_per_day_minor,
            availability_status: "Available".to_string(),
            available_date,
            image_url: None,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn worker_entity(
        id: i64,
        worker_user_id: i64,
        hourly_rate_minor: i64,
        available_date: Option<NaiveDate>,
    ) -> WorkerProfileEntity {
        WorkerProfileEntity {
            id,
            worker_id: worker_user_id,
            skills: "Harvesting".to_string(),
            experience_years: 3,
            hourly_rate_minor,
            availability_status: "Available".to_string(),
            bio: String::new(),
            available_date,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user_entity(id: i64, full_name: &str) -> UserEntity {
        UserEntity {
            id,
            role_id: 2,
            username: full_name.to_lowercase().replace(' ', "."),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            full_name: full_name.to_string(),
            phone_number: "9876543210".to_string(),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking_entity(
        id: i64,
        farmer_id: i64,
        machinery_id: Option<i64>,
        worker_id: Option<i64>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_amount_minor: i64,
    ) -> BookingEntity {
        BookingEntity {
            id,
            farmer_id,
            machinery_id,
            worker_id,
            start_date,
            end_date,
            total_amount_minor,
            status: "Pending".to_string(),
            payment_status: "Pending".to_string(),
            payment_order_ref: Some("order_abc".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct Mocks {
        booking_repo: MockBookingRepository,
        machinery_repo: MockMachineryRepository,
        worker_profile_repo: MockWorkerProfileRepository,
        user_repo: MockUserRepository,
        payment_repo: MockPaymentRepository,
        earning_repo: MockEarningRepository,
        gateway: MockPaymentGateway,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                booking_repo: MockBookingRepository::new(),
                machinery_repo: MockMachineryRepository::new(),
                worker_profile_repo: MockWorkerProfileRepository::new(),
                user_repo: MockUserRepository::new(),
                payment_repo: MockPaymentRepository::new(),
                earning_repo: MockEarningRepository::new(),
                gateway: MockPaymentGateway::new(),
            }
        }

        fn into_usecase(
            self,
        ) -> BookingUseCase<
            MockBookingRepository,
            MockMachineryRepository,
            MockWorkerProfileRepository,
            MockUserRepository,
            MockPaymentRepository,
            MockEarningRepository,
            MockPaymentGateway,
        > {
            BookingUseCase::new(
                Arc::new(self.booking_repo),
                Arc::new(self.machinery_repo),
                Arc::new(self.worker_profile_repo),
                Arc::new(self.user_repo),
                Arc::new(self.payment_repo),
                Arc::new(self.earning_repo),
                Arc::new(self.gateway),
            )
        }
    }

    fn request(
        machinery_id: Option<i64>,
        worker_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
        hours: Option<i32>,
    ) -> CreateBookingModel {
        CreateBookingModel {
            machinery_id,
            worker_id,
            start_date: start,
            end_date: end,
            hours,
        }
    }

    fn expect_happy_path_tail(mocks: &mut Mocks, booking: BookingEntity) {
        let order_amount = booking.total_amount_minor;
        let receipt = format!("booking_{}", booking.id);
        mocks
            .gateway
            .expect_create_order()
            .withf(move |amount, got_receipt| {
                *amount == order_amount && got_receipt == receipt
            })
            .times(1)
            .returning(|_, _| Ok("order_abc".to_string()));
        mocks.gateway.expect_key_id().returning(|| "rzp_test_key".to_string());

        let booking_id = booking.id;
        mocks
            .booking_repo
            .expect_set_order_ref()
            .withf(move |id, order_ref| *id == booking_id && order_ref == "order_abc")
            .times(1)
            .returning(|_, _| Ok(()));
        mocks
            .booking_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        mocks
            .user_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_entity(id, "Ramesh Kumar"))));
    }

    #[tokio::test]
    async fn machinery_available_date_collapses_range_and_prices_one_day() {
        let mut mocks = Mocks::new();
        let available = date(2024, 3, 10);
        let machinery = machinery_entity(5, 77, 1000, Some(available));

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .with(mockall::predicate::eq(5))
            .times(1)
            .returning(|_| Ok(true));

        let created = booking_entity(42, 7, Some(5), None, available, available, 1000);
        mocks
            .booking_repo
            .expect_create()
            .withf(move |booking| {
                booking.start_date == available
                    && booking.end_date == available
                    && booking.total_amount_minor == 1000
            })
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, date(2024, 3, 1), date(2024, 3, 5), None))
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 1000);
        assert_eq!(response.booking.start_date, available);
        assert_eq!(response.booking.end_date, available);
        assert_eq!(response.order_id, "order_abc");
        assert_eq!(response.currency, "INR");
        assert_eq!(response.key_id, "rzp_test_key");
    }

    #[tokio::test]
    async fn machinery_without_available_date_prices_requested_span() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, None);

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));

        let start = date(2024, 3, 1);
        let end = date(2024, 3, 3);
        let created = booking_entity(42, 7, Some(5), None, start, end, 3000);
        mocks
            .booking_repo
            .expect_create()
            .withf(move |booking| booking.total_amount_minor == 3000)
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, start, end, None))
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 3000);
    }

    #[tokio::test]
    async fn non_positive_span_clamps_to_one_day() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, None);

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));

        let start = date(2024, 3, 5);
        let end = date(2024, 3, 1);
        let created = booking_entity(42, 7, Some(5), None, start, end, 1000);
        mocks
            .booking_repo
            .expect_create()
            .withf(|booking| booking.total_amount_minor == 1000)
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, start, end, None))
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 1000);
    }

    #[tokio::test]
    async fn worker_booking_prices_by_hours() {
        let mut mocks = Mocks::new();
        let worker = worker_entity(9, 88, 50, None);

        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));
        mocks
            .worker_profile_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));

        let start = date(2024, 4, 1);
        let created = booking_entity(42, 7, None, Some(9), start, start, 300);
        mocks
            .booking_repo
            .expect_create()
            .withf(|booking| booking.total_amount_minor == 300)
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(7, request(None, Some(9), start, start, Some(6)))
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 300);
    }

    #[tokio::test]
    async fn worker_hours_default_to_eight() {
        let mut mocks = Mocks::new();
        let worker = worker_entity(9, 88, 100, None);

        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));
        mocks
            .worker_profile_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));

        let start = date(2024, 4, 1);
        let created = booking_entity(42, 7, None, Some(9), start, start, 800);
        mocks
            .booking_repo
            .expect_create()
            .withf(|booking| booking.total_amount_minor == 800)
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(7, request(None, Some(9), start, start, None))
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 800);
    }

    #[tokio::test]
    async fn combined_booking_worker_price_and_date_win() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, Some(date(2024, 3, 10)));
        let worker_date = date(2024, 3, 12);
        let worker = worker_entity(9, 88, 50, Some(worker_date));

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));
        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));
        mocks
            .worker_profile_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));

        let created = booking_entity(42, 7, Some(5), Some(9), worker_date, worker_date, 400);
        mocks
            .booking_repo
            .expect_create()
            .withf(move |booking| {
                // The worker's hourly total replaces the machinery's daily
                // rate, and the worker's date overrides the machinery's.
                booking.total_amount_minor == 400
                    && booking.start_date == worker_date
                    && booking.end_date == worker_date
            })
            .times(1)
            .returning(|_| Ok(42));
        expect_happy_path_tail(&mut mocks, created);

        let response = mocks
            .into_usecase()
            .create_booking(
                7,
                request(Some(5), Some(9), date(2024, 3, 1), date(2024, 3, 2), None),
            )
            .await
            .unwrap();

        assert_eq!(response.amount_minor, 400);
        assert_eq!(response.booking.start_date, worker_date);
    }

    #[tokio::test]
    async fn unknown_machinery_is_not_found_and_persists_nothing() {
        let mut mocks = Mocks::new();
        mocks.machinery_repo.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, date(2024, 3, 1), date(2024, 3, 2), None))
            .await;

        // No create/lock expectations were set: any persistence call panics.
        assert!(matches!(result, Err(BookingError::MachineryNotFound)));
    }

    #[tokio::test]
    async fn unknown_worker_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .create_booking(7, request(None, Some(9), date(2024, 3, 1), date(2024, 3, 2), None))
            .await;

        assert!(matches!(result, Err(BookingError::WorkerNotFound)));
    }

    #[tokio::test]
    async fn empty_resource_set_is_rejected() {
        let result = Mocks::new()
            .into_usecase()
            .create_booking(7, request(None, None, date(2024, 3, 1), date(2024, 3, 2), None))
            .await;

        assert!(matches!(result, Err(BookingError::EmptyResources)));
    }

    #[tokio::test]
    async fn losing_the_machinery_lock_is_a_conflict() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, None);

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(false));

        let result = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, date(2024, 3, 1), date(2024, 3, 2), None))
            .await;

        assert!(matches!(result, Err(BookingError::ResourceUnavailable)));
    }

    #[tokio::test]
    async fn failed_worker_lock_releases_the_machinery() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, None);
        let worker = worker_entity(9, 88, 50, None);

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));
        mocks
            .machinery_repo
            .expect_unlock()
            .with(mockall::predicate::eq(5))
            .times(1)
            .returning(|_| Ok(()));
        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));
        mocks
            .worker_profile_repo
            .expect_lock_if_available()
            .returning(|_| Ok(false));

        let result = mocks
            .into_usecase()
            .create_booking(
                7,
                request(Some(5), Some(9), date(2024, 3, 1), date(2024, 3, 2), None),
            )
            .await;

        assert!(matches!(result, Err(BookingError::ResourceUnavailable)));
    }

    #[tokio::test]
    async fn gateway_failure_propagates_after_persist() {
        let mut mocks = Mocks::new();
        let machinery = machinery_entity(5, 77, 1000, None);

        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        mocks
            .machinery_repo
            .expect_lock_if_available()
            .returning(|_| Ok(true));
        mocks
            .booking_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(42));
        mocks
            .gateway
            .expect_create_order()
            .returning(|_, _| Err(anyhow::anyhow!("Razorpay credentials are not configured")));

        let result = mocks
            .into_usecase()
            .create_booking(7, request(Some(5), None, date(2024, 3, 1), date(2024, 3, 2), None))
            .await;

        // The booking row stays behind; no order ref is bound.
        assert!(matches!(result, Err(BookingError::Gateway(_))));
    }

    #[tokio::test]
    async fn settlement_writes_payment_and_both_earnings() {
        let mut mocks = Mocks::new();
        let booking = booking_entity(
            42,
            7,
            Some(5),
            Some(9),
            date(2024, 3, 1),
            date(2024, 3, 3),
            400,
        );

        mocks
            .booking_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        mocks
            .booking_repo
            .expect_mark_paid_if_pending()
            .with(mockall::predicate::eq(42))
            .times(1)
            .returning(|_| Ok(true));
        mocks
            .payment_repo
            .expect_record_payment()
            .withf(|payment| {
                payment.booking_id == 42
                    && payment.amount_minor == 400
                    && payment.status == "Paid"
            })
            .times(1)
            .returning(|_| Ok(1));

        let machinery = machinery_entity(5, 77, 1000, None);
        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(machinery.clone())));
        let worker = worker_entity(9, 88, 50, None);
        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));

        mocks
            .earning_repo
            .expect_record_earning()
            .withf(|earning| match earning.user_id {
                // Owner earning is recomputed from the daily rate and span
                // (3 days x 1000); the worker gets the stored booking total.
                77 => earning.amount_minor == 3000 && earning.booking_id == 42,
                88 => earning.amount_minor == 400 && earning.booking_id == 42,
                _ => false,
            })
            .times(2)
            .returning(|_| Ok(1));

        mocks
            .into_usecase()
            .settle_booking(42, "direct")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn settling_twice_is_rejected_without_duplicate_rows() {
        let mut mocks = Mocks::new();
        let booking = booking_entity(
            42,
            7,
            Some(5),
            None,
            date(2024, 3, 1),
            date(2024, 3, 3),
            3000,
        );

        mocks
            .booking_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        mocks
            .booking_repo
            .expect_mark_paid_if_pending()
            .returning(|_| Ok(false));

        let result = mocks.into_usecase().settle_booking(42, "direct").await;

        // No payment/earning expectations were set: any write panics.
        assert!(matches!(result, Err(BookingError::AlreadyPaid)));
    }

    #[tokio::test]
    async fn settling_unknown_booking_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.booking_repo.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks.into_usecase().settle_booking(42, "direct").await;

        assert!(matches!(result, Err(BookingError::BookingNotFound)));
    }

    #[tokio::test]
    async fn invalid_signature_reports_unverified_without_state_change() {
        let mut mocks = Mocks::new();
        mocks
            .gateway
            .expect_verify_signature()
            .returning(|_, _, _| false);

        let outcome = mocks
            .into_usecase()
            .verify_payment(VerifyPaymentModel {
                payment_id: "pay_1".to_string(),
                order_id: "order_abc".to_string(),
                signature: "bad".to_string(),
            })
            .await
            .unwrap();

        assert!(!outcome.verified);
        assert_eq!(outcome.booking_id, None);
    }

    #[tokio::test]
    async fn verified_payment_settles_the_bound_booking() {
        let mut mocks = Mocks::new();
        let booking = booking_entity(
            42,
            7,
            None,
            Some(9),
            date(2024, 4, 1),
            date(2024, 4, 1),
            300,
        );

        mocks
            .gateway
            .expect_verify_signature()
            .withf(|payment_id, order_id, signature| {
                payment_id == "pay_1" && order_id == "order_abc" && signature == "sig"
            })
            .returning(|_, _, _| true);

        let bound = booking.clone();
        mocks
            .booking_repo
            .expect_find_by_order_ref()
            .with(mockall::predicate::eq("order_abc"))
            .returning(move |_| Ok(Some(bound.clone())));
        mocks
            .booking_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        mocks
            .booking_repo
            .expect_mark_paid_if_pending()
            .returning(|_| Ok(true));
        mocks
            .payment_repo
            .expect_record_payment()
            .withf(|payment| payment.method == "razorpay" && payment.amount_minor == 300)
            .times(1)
            .returning(|_| Ok(1));

        let worker = worker_entity(9, 88, 50, None);
        mocks
            .worker_profile_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(worker.clone())));
        mocks
            .earning_repo
            .expect_record_earning()
            .withf(|earning| earning.user_id == 88 && earning.amount_minor == 300)
            .times(1)
            .returning(|_| Ok(1));

        let outcome = mocks
            .into_usecase()
            .verify_payment(VerifyPaymentModel {
                payment_id: "pay_1".to_string(),
                order_id: "order_abc".to_string(),
                signature: "sig".to_string(),
            })
            .await
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(outcome.booking_id, Some(42));
    }

    #[tokio::test]
    async fn verified_payment_with_unbound_order_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .gateway
            .expect_verify_signature()
            .returning(|_, _, _| true);
        mocks
            .booking_repo
            .expect_find_by_order_ref()
            .returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .verify_payment(VerifyPaymentModel {
                payment_id: "pay_1".to_string(),
                order_id: "order_unknown".to_string(),
                signature: "sig".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::OrderNotFound)));
    }
}
