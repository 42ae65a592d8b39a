use std::sync::Arc;

use crates::domain::{
    repositories::{
        bookings::BookingRepository, machineries::MachineryRepository,
        payments::PaymentRepository, users::UserRepository,
        worker_profiles::WorkerProfileRepository,
    },
    value_objects::{
        admin::AdminStatsModel,
        enums::role_names::RoleName,
        machineries::PendingMachineryModel,
        users::UserOverviewModel,
        workers::PendingWorkerModel,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::mailer::{self, Mailer};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("user not found")]
    UserNotFound,
    #[error("machinery not found")]
    MachineryNotFound,
    #[error("worker profile not found")]
    WorkerNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AdminError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AdminError::UserNotFound
            | AdminError::MachineryNotFound
            | AdminError::WorkerNotFound => StatusCode::NOT_FOUND,
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AdminError>;

pub struct AdminUseCase<U, W, M, B, P>
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    worker_profile_repo: Arc<W>,
    machinery_repo: Arc<M>,
    booking_repo: Arc<B>,
    payment_repo: Arc<P>,
    mailer: Arc<dyn Mailer>,
}

impl<U, W, M, B, P> AdminUseCase<U, W, M, B, P>
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkerProfileRepository + Send + Sync + 'static,
    M: MachineryRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        worker_profile_repo: Arc<W>,
        machinery_repo: Arc<M>,
        booking_repo: Arc<B>,
        payment_repo: Arc<P>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            user_repo,
            worker_profile_repo,
            machinery_repo,
            booking_repo,
            payment_repo,
            mailer,
        }
    }

    pub async fn stats(&self) -> UseCaseResult<AdminStatsModel> {
        let total_farmers = self
            .user_repo
            .count_by_role_name(RoleName::Farmer.as_str())
            .await?;
        let total_machinery_owners = self
            .user_repo
            .count_by_role_name(RoleName::MachineryOwner.as_str())
            .await?;
        let total_workers = self
            .user_repo
            .count_by_role_name(RoleName::FarmWorker.as_str())
            .await?;
        let total_machinery_listings = self.machinery_repo.count_all().await?;
        let total_bookings = self.booking_repo.count_all().await?;
        let total_earnings_minor = self.payment_repo.total_amount_minor().await?;

        Ok(AdminStatsModel {
            total_farmers,
            total_machinery_owners,
            total_workers,
            total_machinery_listings,
            total_bookings,
            total_earnings_minor,
        })
    }

    pub async fn list_users(&self) -> UseCaseResult<Vec<UserOverviewModel>> {
        let users = self
            .user_repo
            .list_with_roles()
            .await
            .map_err(AdminError::Internal)?;

        Ok(users
            .into_iter()
            .map(|(user, role_name)| UserOverviewModel {
                id: user.id,
                username: user.username,
                email: user.email,
                role: role_name,
                is_approved: user.is_approved,
                created_at: user.created_at,
            })
            .collect())
    }

    /// Rejection deletes the account outright (the worker profile follows via
    /// FK cascade); approval flips the flag and, for farm workers, approves
    /// the linked profile in the same stroke.
    pub async fn approve_user(&self, user_id: i64, approve: bool) -> UseCaseResult<()> {
        let (user, role_name) = self
            .user_repo
            .find_by_id_with_role(user_id)
            .await
            .map_err(AdminError::Internal)?
            .ok_or_else(|| {
                let err = AdminError::UserNotFound;
                warn!(
                    %user_id,
                    status = err.status_code().as_u16(),
                    "admin: approval target user missing"
                );
                err
            })?;

        if !approve {
            self.user_repo.delete(user_id).await.map_err(|err| {
                error!(%user_id, db_error = ?err, "admin: failed to delete rejected user");
                AdminError::Internal(err)
            })?;
            info!(%user_id, "admin: user rejected and deleted");
            return Ok(());
        }

        self.user_repo.set_approved(user_id).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "admin: failed to approve user");
            AdminError::Internal(err)
        })?;

        if role_name == RoleName::FarmWorker.as_str() {
            self.worker_profile_repo
                .set_approved_by_worker_id(user_id, true)
                .await
                .map_err(|err| {
                    error!(%user_id, db_error = ?err, "admin: failed to approve worker profile");
                    AdminError::Internal(err)
                })?;
        }

        mailer::send_best_effort(
            Arc::clone(&self.mailer),
            user.email,
            "KrishiSetu account approved".to_string(),
            "Your account has been approved. You can now log in.".to_string(),
        );

        info!(%user_id, role = %role_name, "admin: user approved");

        Ok(())
    }

    /// Rejection deletes the listing outright; approval flips the flag.
    pub async fn approve_machinery(
        &self,
        machinery_id: i64,
        approve: bool,
    ) -> UseCaseResult<()> {
        let machinery = self
            .machinery_repo
            .find_by_id(machinery_id)
            .await
            .map_err(AdminError::Internal)?
            .ok_or_else(|| {
                let err = AdminError::MachineryNotFound;
                warn!(
                    %machinery_id,
                    status = err.status_code().as_u16(),
                    "admin: approval target machinery missing"
                );
                err
            })?;

        if !approve {
            self.machinery_repo
                .delete(machinery_id)
                .await
                .map_err(|err| {
                    error!(%machinery_id, db_error = ?err, "admin: failed to delete machinery");
                    AdminError::Internal(err)
                })?;
            info!(%machinery_id, name = %machinery.name, "admin: machinery rejected and deleted");
            return Ok(());
        }

        self.machinery_repo
            .set_approved(machinery_id)
            .await
            .map_err(|err| {
                error!(%machinery_id, db_error = ?err, "admin: failed to approve machinery");
                AdminError::Internal(err)
            })?;

        info!(%machinery_id, name = %machinery.name, "admin: machinery approved");

        Ok(())
    }

    /// Sets the profile flag to the given value without deleting anything.
    pub async fn approve_worker(
        &self,
        worker_user_id: i64,
        approve: bool,
    ) -> UseCaseResult<()> {
        let updated = self
            .worker_profile_repo
            .set_approved_by_worker_id(worker_user_id, approve)
            .await
            .map_err(AdminError::Internal)?;
        if !updated {
            let err = AdminError::WorkerNotFound;
            warn!(
                %worker_user_id,
                status = err.status_code().as_u16(),
                "admin: approval target worker profile missing"
            );
            return Err(err);
        }

        info!(%worker_user_id, approve, "admin: worker profile approval updated");

        Ok(())
    }

    pub async fn pending_machinery(&self) -> UseCaseResult<Vec<PendingMachineryModel>> {
        let results = self
            .machinery_repo
            .list_pending()
            .await
            .map_err(AdminError::Internal)?;

        Ok(results
            .into_iter()
            .map(|(entity, owner_name, owner_email, category_name)| PendingMachineryModel {
                id: entity.id,
                name: entity.name,
                description: entity.description,
                rate_per_hour_minor: entity.rate_per_hour_minor,
                rate_per_day_minor: entity.rate_per_day_minor,
                image_url: entity.image_url,
                category_name,
                owner_name,
                owner_email,
            })
            .collect())
    }

    pub async fn pending_workers(&self) -> UseCaseResult<Vec<PendingWorkerModel>> {
        let results = self
            .worker_profile_repo
            .list_pending()
            .await
            .map_err(AdminError::Internal)?;

        Ok(results
            .into_iter()
            .map(|(entity, full_name, email)| PendingWorkerModel {
                id: entity.id,
                worker_id: entity.worker_id,
                full_name,
                email,
                skills: entity.skills,
                experience_years: entity.experience_years,
                hourly_rate_minor: entity.hourly_rate_minor,
                bio: entity.bio,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::entities::machineries::MachineryEntity;
    use crates::domain::entities::users::UserEntity;
    use crates::domain::repositories::bookings::MockBookingRepository;
    use crates::domain::repositories::machineries::MockMachineryRepository;
    use crates::domain::repositories::payments::MockPaymentRepository;
    use crates::domain::repositories::users::MockUserRepository;
    use crates::domain::repositories::worker_profiles::MockWorkerProfileRepository;

    use crate::mailer::LogMailer;

    fn user_entity(id: i64) -> UserEntity {
        UserEntity {
            id,
            role_id: 4,
            username: "mohan".to_string(),
            email: "mohan@example.com".to_string(),
            password_hash: String::new(),
            full_name: "Mohan Lal".to_string(),
            phone_number: "9876543210".to_string(),
            is_approved: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn machinery_entity(id: i64) -> MachineryEntity {
        MachineryEntity {
            id,
            owner_id: 77,
            category_id: 1,
            name: "Tractor MF-241".to_string(),
            description: String::new(),
            rate_per_hour_minor: 200,
            rate_per_day_minor: 1000,
            availability_status: "Available".to_string(),
            available_date: None,
            image_url: None,
            is_approved: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct Mocks {
        user_repo: MockUserRepository,
        worker_profile_repo: MockWorkerProfileRepository,
        machinery_repo: MockMachineryRepository,
        booking_repo: MockBookingRepository,
        payment_repo: MockPaymentRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                user_repo: MockUserRepository::new(),
                worker_profile_repo: MockWorkerProfileRepository::new(),
                machinery_repo: MockMachineryRepository::new(),
                booking_repo: MockBookingRepository::new(),
                payment_repo: MockPaymentRepository::new(),
            }
        }

        fn into_usecase(
            self,
        ) -> AdminUseCase<
            MockUserRepository,
            MockWorkerProfileRepository,
            MockMachineryRepository,
            MockBookingRepository,
            MockPaymentRepository,
        > {
            AdminUseCase::new(
                Arc::new(self.user_repo),
                Arc::new(self.worker_profile_repo),
                Arc::new(self.machinery_repo),
                Arc::new(self.booking_repo),
                Arc::new(self.payment_repo),
                Arc::new(LogMailer),
            )
        }
    }

    #[tokio::test]
    async fn approving_a_farm_worker_approves_both_flags() {
        let mut mocks = Mocks::new();
        mocks
            .user_repo
            .expect_find_by_id_with_role()
            .returning(|_| Ok(Some((user_entity(12), "FarmWorker".to_string()))));
        mocks
            .user_repo
            .expect_set_approved()
            .with(mockall::predicate::eq(12))
            .times(1)
            .returning(|_| Ok(()));
        mocks
            .worker_profile_repo
            .expect_set_approved_by_worker_id()
            .withf(|worker_user_id, approved| *worker_user_id == 12 && *approved)
            .times(1)
            .returning(|_, _| Ok(true));

        mocks.into_usecase().approve_user(12, true).await.unwrap();
    }

    #[tokio::test]
    async fn approving_a_farmer_touches_no_worker_profile() {
        let mut mocks = Mocks::new();
        mocks
            .user_repo
            .expect_find_by_id_with_role()
            .returning(|_| Ok(Some((user_entity(7), "Farmer".to_string()))));
        mocks
            .user_repo
            .expect_set_approved()
            .times(1)
            .returning(|_| Ok(()));

        // No worker-profile expectation: a call would panic.
        mocks.into_usecase().approve_user(7, true).await.unwrap();
    }

    #[tokio::test]
    async fn rejecting_a_user_deletes_the_row() {
        let mut mocks = Mocks::new();
        mocks
            .user_repo
            .expect_find_by_id_with_role()
            .returning(|_| Ok(Some((user_entity(12), "FarmWorker".to_string()))));
        mocks
            .user_repo
            .expect_delete()
            .with(mockall::predicate::eq(12))
            .times(1)
            .returning(|_| Ok(()));

        mocks.into_usecase().approve_user(12, false).await.unwrap();
    }

    #[tokio::test]
    async fn approving_an_unknown_user_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .user_repo
            .expect_find_by_id_with_role()
            .returning(|_| Ok(None));

        let result = mocks.into_usecase().approve_user(404, true).await;

        assert!(matches!(result, Err(AdminError::UserNotFound)));
    }

    #[tokio::test]
    async fn rejecting_machinery_deletes_the_row() {
        let mut mocks = Mocks::new();
        mocks
            .machinery_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(machinery_entity(3))));
        mocks
            .machinery_repo
            .expect_delete()
            .with(mockall::predicate::eq(3))
            .times(1)
            .returning(|_| Ok(()));

        mocks
            .into_usecase()
            .approve_machinery(3, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn approving_unknown_machinery_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.machinery_repo.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks.into_usecase().approve_machinery(3, true).await;

        assert!(matches!(result, Err(AdminError::MachineryNotFound)));
    }

    #[tokio::test]
    async fn stats_aggregate_across_repositories() {
        let mut mocks = Mocks::new();
        mocks
            .user_repo
            .expect_count_by_role_name()
            .returning(|role| {
                Ok(match role {
                    "Farmer" => 10,
                    "MachineryOwner" => 4,
                    "FarmWorker" => 6,
                    _ => 0,
                })
            });
        mocks.machinery_repo.expect_count_all().returning(|| Ok(9));
        mocks.booking_repo.expect_count_all().returning(|| Ok(25));
        mocks
            .payment_repo
            .expect_total_amount_minor()
            .returning(|| Ok(125_000));

        let stats = mocks.into_usecase().stats().await.unwrap();

        assert_eq!(
            stats,
            AdminStatsModel {
                total_farmers: 10,
                total_machinery_owners: 4,
                total_workers: 6,
                total_machinery_listings: 9,
                total_bookings: 25,
                total_earnings_minor: 125_000,
            }
        );
    }
}
