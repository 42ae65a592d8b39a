use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::worker_profiles::EditWorkerProfileEntity,
    repositories::{users::UserRepository, worker_profiles::WorkerProfileRepository},
    value_objects::{
        enums::availability_statuses::AvailabilityStatus,
        workers::{EditWorkerProfileModel, WorkerProfileModel, WorkerSearchFilter},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker profile not found")]
    ProfileNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl WorkerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            WorkerError::ProfileNotFound => StatusCode::NOT_FOUND,
            WorkerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, WorkerError>;

pub struct WorkerUseCase<W, U>
where
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    worker_profile_repo: Arc<W>,
    user_repo: Arc<U>,
}

impl<W, U> WorkerUseCase<W, U>
where
    W: WorkerProfileRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(worker_profile_repo: Arc<W>, user_repo: Arc<U>) -> Self {
        Self {
            worker_profile_repo,
            user_repo,
        }
    }

    /// Approved, currently-available profiles, filtered symmetrically to the
    /// machinery search: optional skills substring and inclusive hourly-rate
    /// ceiling.
    pub async fn search(
        &self,
        filter: WorkerSearchFilter,
    ) -> UseCaseResult<Vec<WorkerProfileModel>> {
        let results = self
            .worker_profile_repo
            .list_available(filter.skill, filter.max_rate_minor)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "workers: search query failed");
                WorkerError::Internal(err)
            })?;

        Ok(results
            .into_iter()
            .map(|(entity, worker_name)| WorkerProfileModel::from_entity(entity, worker_name))
            .collect())
    }

    pub async fn my_profile(&self, worker_user_id: i64) -> UseCaseResult<WorkerProfileModel> {
        let profile = self
            .worker_profile_repo
            .find_by_worker_id(worker_user_id)
            .await
            .map_err(WorkerError::Internal)?
            .ok_or_else(|| {
                let err = WorkerError::ProfileNotFound;
                warn!(
                    %worker_user_id,
                    status = err.status_code().as_u16(),
                    "workers: profile missing"
                );
                err
            })?;

        let worker_name = self
            .user_repo
            .find_by_id(worker_user_id)
            .await?
            .map(|user| user.full_name)
            .unwrap_or_default();

        Ok(WorkerProfileModel::from_entity(profile, worker_name))
    }

    pub async fn update_profile(
        &self,
        worker_user_id: i64,
        model: EditWorkerProfileModel,
    ) -> UseCaseResult<()> {
        let profile = self
            .worker_profile_repo
            .find_by_worker_id(worker_user_id)
            .await
            .map_err(WorkerError::Internal)?
            .ok_or_else(|| {
                let err = WorkerError::ProfileNotFound;
                warn!(
                    %worker_user_id,
                    status = err.status_code().as_u16(),
                    "workers: update for missing profile"
                );
                err
            })?;

        // Auto-unlock: setting a new available date makes the worker bookable
        // again after a settled hire.
        let date_changed = profile.available_date != model.available_date;
        let availability_status = if date_changed && model.available_date.is_some() {
            Some(AvailabilityStatus::Available.to_string())
        } else {
            None
        };

        self.worker_profile_repo
            .update_by_worker_id(
                worker_user_id,
                EditWorkerProfileEntity {
                    skills: model.skills,
                    experience_years: model.experience_years,
                    hourly_rate_minor: model.hourly_rate_minor,
                    bio: model.bio,
                    available_date: Some(model.available_date),
                    availability_status,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(%worker_user_id, db_error = ?err, "workers: profile update failed");
                WorkerError::Internal(err)
            })?;

        info!(%worker_user_id, date_changed, "workers: profile updated");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crates::domain::entities::worker_profiles::WorkerProfileEntity;
    use crates::domain::repositories::users::MockUserRepository;
    use crates::domain::repositories::worker_profiles::MockWorkerProfileRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile_entity(
        worker_user_id: i64,
        available_date: Option<NaiveDate>,
        availability_status: &str,
    ) -> WorkerProfileEntity {
        WorkerProfileEntity {
            id: 9,
            worker_id: worker_user_id,
            skills: "Harvesting".to_string(),
            experience_years: 3,
            hourly_rate_minor: 50,
            availability_status: availability_status.to_string(),
            bio: String::new(),
            available_date,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn edit_model(available_date: Option<NaiveDate>) -> EditWorkerProfileModel {
        EditWorkerProfileModel {
            skills: "Harvesting, Sowing".to_string(),
            experience_years: 4,
            hourly_rate_minor: 60,
            bio: String::new(),
            available_date,
        }
    }

    #[tokio::test]
    async fn changing_the_available_date_unlocks_the_profile() {
        let mut worker_profile_repo = MockWorkerProfileRepository::new();
        let booked = profile_entity(88, Some(date(2024, 4, 1)), "Booked");
        worker_profile_repo
            .expect_find_by_worker_id()
            .returning(move |_| Ok(Some(booked.clone())));
        worker_profile_repo
            .expect_update_by_worker_id()
            .withf(|_, changes| {
                changes.availability_status.as_deref() == Some("Available")
                    && changes.available_date == Some(Some(date(2024, 4, 15)))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        WorkerUseCase::new(
            Arc::new(worker_profile_repo),
            Arc::new(MockUserRepository::new()),
        )
        .update_profile(88, edit_model(Some(date(2024, 4, 15))))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn updating_a_missing_profile_is_not_found() {
        let mut worker_profile_repo = MockWorkerProfileRepository::new();
        worker_profile_repo
            .expect_find_by_worker_id()
            .returning(|_| Ok(None));

        let result = WorkerUseCase::new(
            Arc::new(worker_profile_repo),
            Arc::new(MockUserRepository::new()),
        )
        .update_profile(88, edit_model(None))
        .await;

        assert!(matches!(result, Err(WorkerError::ProfileNotFound)));
    }

    #[tokio::test]
    async fn search_maps_joined_names() {
        let mut worker_profile_repo = MockWorkerProfileRepository::new();
        worker_profile_repo
            .expect_list_available()
            .withf(|skill, max_rate| {
                skill.as_deref() == Some("Harvest") && *max_rate == Some(100)
            })
            .returning(|_, _| {
                Ok(vec![(
                    profile_entity(88, None, "Available"),
                    "Mohan Lal".to_string(),
                )])
            });

        let results = WorkerUseCase::new(
            Arc::new(worker_profile_repo),
            Arc::new(MockUserRepository::new()),
        )
        .search(WorkerSearchFilter {
            skill: Some("Harvest".to_string()),
            max_rate_minor: Some(100),
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].worker_name, "Mohan Lal");
    }
}
