use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::machineries::{EditMachineryEntity, InsertMachineryEntity},
    repositories::{
        machineries::MachineryRepository,
        machinery_categories::MachineryCategoryRepository, users::UserRepository,
    },
    value_objects::{
        enums::availability_statuses::AvailabilityStatus,
        machineries::{
            CategoryModel, EditMachineryModel, InsertMachineryModel, MachineryModel,
            MachinerySearchFilter,
        },
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum MachineryError {
    #[error("machinery not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl MachineryError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            MachineryError::NotFound => StatusCode::NOT_FOUND,
            MachineryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, MachineryError>;

pub struct MachineryUseCase<M, C, U>
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    machinery_repo: Arc<M>,
    category_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<M, C, U> MachineryUseCase<M, C, U>
where
    M: MachineryRepository + Send + Sync + 'static,
    C: MachineryCategoryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(machinery_repo: Arc<M>, category_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self {
            machinery_repo,
            category_repo,
            user_repo,
        }
    }

    /// Approved, currently-available listings, optionally narrowed by exact
    /// category name and inclusive hourly-rate ceiling.
    pub async fn search(
        &self,
        filter: MachinerySearchFilter,
    ) -> UseCaseResult<Vec<MachineryModel>> {
        let results = self
            .machinery_repo
            .list_available(filter.category, filter.max_rate_minor)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "machinery: search query failed");
                MachineryError::Internal(err)
            })?;

        Ok(results
            .into_iter()
            .map(|(entity, owner_name, category_name)| {
                MachineryModel::from_entity(entity, owner_name, category_name)
            })
            .collect())
    }

    pub async fn create(
        &self,
        owner_id: i64,
        model: InsertMachineryModel,
    ) -> UseCaseResult<MachineryModel> {
        info!(%owner_id, name = %model.name, "machinery: listing requested");

        let machinery_id = self
            .machinery_repo
            .insert(InsertMachineryEntity {
                owner_id,
                category_id: model.category_id,
                name: model.name,
                description: model.description,
                rate_per_hour_minor: model.rate_per_hour_minor,
                rate_per_day_minor: model.rate_per_day_minor,
                availability_status: AvailabilityStatus::Available.to_string(),
                available_date: model.available_date,
                image_url: model.image_url,
                // New listings wait in the admin approval queue.
                is_approved: false,
            })
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "machinery: failed to insert listing");
                MachineryError::Internal(err)
            })?;

        info!(%machinery_id, %owner_id, "machinery: listing created, pending approval");

        self.get_model(machinery_id).await
    }

    pub async fn update(
        &self,
        machinery_id: i64,
        owner_id: i64,
        model: EditMachineryModel,
    ) -> UseCaseResult<()> {
        let machinery = self
            .machinery_repo
            .find_by_id(machinery_id)
            .await
            .map_err(MachineryError::Internal)?
            .filter(|machinery| machinery.owner_id == owner_id)
            .ok_or_else(|| {
                let err = MachineryError::NotFound;
                warn!(
                    %machinery_id,
                    %owner_id,
                    status = err.status_code().as_u16(),
                    "machinery: update target missing or not owned"
                );
                err
            })?;

        // Auto-unlock: setting a new available date makes the listing
        // bookable again after a settled rental.
        let date_changed = machinery.available_date != model.available_date;
        let availability_status = if date_changed && model.available_date.is_some() {
            Some(AvailabilityStatus::Available.to_string())
        } else {
            None
        };

        self.machinery_repo
            .update(
                machinery_id,
                EditMachineryEntity {
                    category_id: model.category_id,
                    name: model.name,
                    description: model.description,
                    rate_per_hour_minor: model.rate_per_hour_minor,
                    rate_per_day_minor: model.rate_per_day_minor,
                    image_url: model.image_url,
                    available_date: Some(model.available_date),
                    availability_status,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(%machinery_id, db_error = ?err, "machinery: update failed");
                MachineryError::Internal(err)
            })?;

        info!(%machinery_id, date_changed, "machinery: listing updated");

        Ok(())
    }

    pub async fn list_by_owner(&self, owner_id: i64) -> UseCaseResult<Vec<MachineryModel>> {
        let owner_name = self
            .user_repo
            .find_by_id(owner_id)
            .await?
            .map(|user| user.full_name)
            .unwrap_or_default();

        let results = self
            .machinery_repo
            .list_by_owner(owner_id)
            .await
            .map_err(MachineryError::Internal)?;

        Ok(results
            .into_iter()
            .map(|(entity, category_name)| {
                MachineryModel::from_entity(entity, owner_name.clone(), category_name)
            })
            .collect())
    }

    pub async fn categories(&self) -> UseCaseResult<Vec<CategoryModel>> {
        let categories = self
            .category_repo
            .list()
            .await
            .map_err(MachineryError::Internal)?;

        Ok(categories
            .into_iter()
            .map(|category| CategoryModel {
                id: category.id,
                name: category.name,
            })
            .collect())
    }

    async fn get_model(&self, machinery_id: i64) -> UseCaseResult<MachineryModel> {
        let machinery = self
            .machinery_repo
            .find_by_id(machinery_id)
            .await?
            .ok_or(MachineryError::NotFound)?;

        let owner_name = self
            .user_repo
            .find_by_id(machinery.owner_id)
            .await?
            .map(|user| user.full_name)
            .unwrap_or_default();
        let category_name = self
            .category_repo
            .find_by_id(machinery.category_id)
            .await?
            .map(|category| category.name)
            .unwrap_or_default();

        Ok(MachineryModel::from_entity(
            machinery,
            owner_name,
            category_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crates::domain::entities::machineries::MachineryEntity;
    use crates::domain::repositories::machineries::MockMachineryRepository;
    use crates::domain::repositories::machinery_categories::MockMachineryCategoryRepository;
    use crates::domain::repositories::users::MockUserRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn machinery_entity(
        id: i64,
        owner_id: i64,
        available_date: Option<NaiveDate>,
        availability_status: &str,
    ) -> MachineryEntity {
        MachineryEntity {
            id,
            owner_id,
            category_id: 1,
            name: "Tractor MF-241".to_string(),
            description: String::new(),
            rate_per_hour_minor: 200,
            rate_per_day_minor: 1000,
            availability_status: availability_status.to_string(),
            available_date,
            image_url: None,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn edit_model(available_date: Option<NaiveDate>) -> EditMachineryModel {
        EditMachineryModel {
            category_id: 1,
            name: "Tractor MF-241".to_string(),
            description: String::new(),
            rate_per_hour_minor: 200,
            rate_per_day_minor: 1000,
            image_url: None,
            available_date,
        }
    }

    fn usecase(
        machinery_repo: MockMachineryRepository,
        user_repo: MockUserRepository,
    ) -> MachineryUseCase<
        MockMachineryRepository,
        MockMachineryCategoryRepository,
        MockUserRepository,
    > {
        MachineryUseCase::new(
            Arc::new(machinery_repo),
            Arc::new(MockMachineryCategoryRepository::new()),
            Arc::new(user_repo),
        )
    }

    #[tokio::test]
    async fn changing_the_available_date_unlocks_the_listing() {
        let mut machinery_repo = MockMachineryRepository::new();
        let booked = machinery_entity(5, 77, Some(date(2024, 3, 10)), "Booked");
        machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booked.clone())));
        machinery_repo
            .expect_update()
            .withf(|_, changes| {
                changes.availability_status.as_deref() == Some("Available")
                    && changes.available_date == Some(Some(date(2024, 3, 20)))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        usecase(machinery_repo, MockUserRepository::new())
            .update(5, 77, edit_model(Some(date(2024, 3, 20))))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unchanged_date_keeps_the_status_untouched() {
        let mut machinery_repo = MockMachineryRepository::new();
        let booked = machinery_entity(5, 77, Some(date(2024, 3, 10)), "Booked");
        machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booked.clone())));
        machinery_repo
            .expect_update()
            .withf(|_, changes| changes.availability_status.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        usecase(machinery_repo, MockUserRepository::new())
            .update(5, 77, edit_model(Some(date(2024, 3, 10))))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn updating_someone_elses_listing_is_not_found() {
        let mut machinery_repo = MockMachineryRepository::new();
        let owned_by_77 = machinery_entity(5, 77, None, "Available");
        machinery_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(owned_by_77.clone())));

        let result = usecase(machinery_repo, MockUserRepository::new())
            .update(5, 99, edit_model(None))
            .await;

        assert!(matches!(result, Err(MachineryError::NotFound)));
    }

    #[tokio::test]
    async fn search_maps_joined_names() {
        let mut machinery_repo = MockMachineryRepository::new();
        machinery_repo
            .expect_list_available()
            .withf(|category, max_rate| {
                category.as_deref() == Some("Tractor") && *max_rate == Some(250)
            })
            .returning(|_, _| {
                Ok(vec![(
                    machinery_entity(5, 77, None, "Available"),
                    "Suresh Patel".to_string(),
                    "Tractor".to_string(),
                )])
            });

        let results = usecase(machinery_repo, MockUserRepository::new())
            .search(MachinerySearchFilter {
                category: Some("Tractor".to_string()),
                max_rate_minor: Some(250),
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].owner_name, "Suresh Patel");
        assert_eq!(results[0].category_name, "Tractor");
    }
}
