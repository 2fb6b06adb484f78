use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::photo_store::{PhotoAssetStore, PhotoUpload};
use crate::error::{ServiceError, StoreError};
use crate::model::employee::{Employee, EmployeeFilter, EmployeeInput, NewEmployee};
use crate::store::EmployeeStore;
use crate::validation::{already_in_use, validate_employee, validate_photo_size};

const ENTITY: &str = "Employee";

/// Employee lifecycle: filtered listing, lookups, and create/update guarded by
/// name and email uniqueness, with photo replacement on update.
///
/// Uniqueness is checked before the write and is not atomic with it; two
/// concurrent creators with the same name can both succeed.
#[derive(Clone)]
pub struct EmployeeRecordService {
    store: Arc<dyn EmployeeStore>,
    photos: PhotoAssetStore,
}

impl EmployeeRecordService {
    pub fn new(store: Arc<dyn EmployeeStore>, photos: PhotoAssetStore) -> Self {
        Self { store, photos }
    }

    pub fn photos(&self) -> &PhotoAssetStore {
        &self.photos
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.store.list_employees(filter).await?)
    }

    pub async fn get(&self, id: u64) -> Result<Employee, ServiceError> {
        self.store
            .find_employee(id)
            .await?
            .ok_or(ServiceError::NotFound(ENTITY))
    }

    #[instrument(name = "employee_create", skip(self, input, photo), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: EmployeeInput,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, ServiceError> {
        self.check(&input, photo.as_ref(), None).await?;

        let photo_name = self.store_photo(photo.as_ref()).await?;

        let new_employee = NewEmployee {
            name: input.name,
            email: input.email,
            department: input.department,
            photo: photo_name.clone(),
        };

        match self.store.insert_employee(new_employee).await {
            Ok(employee) => {
                info!(employee_id = employee.id, "Employee created");
                Ok(employee)
            }
            Err(e) => {
                if let Some(name) = &photo_name {
                    self.discard_photo(name).await;
                }
                Err(e.into())
            }
        }
    }

    #[instrument(name = "employee_update", skip(self, input, photo))]
    pub async fn update(
        &self,
        id: u64,
        input: EmployeeInput,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, ServiceError> {
        let mut employee = self.get(id).await?;

        self.check(&input, photo.as_ref(), Some(id)).await?;

        let new_photo = self.store_photo(photo.as_ref()).await?;
        let previous_photo = employee.photo.clone();

        employee.name = input.name;
        employee.email = input.email;
        employee.department = input.department;
        if let Some(name) = &new_photo {
            employee.photo = Some(name.clone());
        }

        if let Err(e) = self.store.update_employee(&employee).await {
            if let Some(name) = &new_photo {
                self.discard_photo(name).await;
            }
            return Err(self.write_failure(id, e).await);
        }

        if new_photo.is_some() {
            if let Some(old) = previous_photo {
                self.discard_photo(&old).await;
            }
        }

        info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    /// Idempotent: deleting an id that no longer exists succeeds.
    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let Some(employee) = self.store.find_employee(id).await? else {
            debug!(employee_id = id, "Employee already absent");
            return Ok(());
        };

        if self.store.delete_employee(id).await? {
            info!(employee_id = id, "Employee deleted");
            if let Some(photo) = &employee.photo {
                self.discard_photo(photo).await;
            }
        }
        Ok(())
    }

    /// Field rules plus uniqueness; every failure is reported together.
    async fn check(
        &self,
        input: &EmployeeInput,
        photo: Option<&PhotoUpload>,
        exclude_id: Option<u64>,
    ) -> Result<(), ServiceError> {
        let mut errors = validate_employee(input);
        if let Some(photo) = photo {
            if let Err(e) = validate_photo_size(photo.size, self.photos.max_bytes()) {
                errors.add("photo", e);
            }
        }

        if self.store.name_taken(&input.name, exclude_id).await? {
            errors.add("name", already_in_use("Name"));
        }
        if self.store.email_taken(&input.email, exclude_id).await? {
            errors.add("email", already_in_use("Email"));
        }

        if errors.is_empty() {
            return Ok(());
        }
        debug!(errors = %errors, "Employee input rejected");
        Err(ServiceError::Validation(errors))
    }

    async fn store_photo(&self, photo: Option<&PhotoUpload>) -> Result<Option<String>, ServiceError> {
        match photo {
            Some(p) if !p.bytes.is_empty() => {
                Ok(Some(self.photos.save(&p.bytes, &p.file_name).await?))
            }
            _ => Ok(None),
        }
    }

    async fn discard_photo(&self, stored_name: &str) {
        if let Err(e) = self.photos.delete(stored_name).await {
            warn!(error = %e, photo = stored_name, "Failed to remove photo");
        }
    }

    /// A write that matched nothing is `NotFound` if the row vanished,
    /// otherwise a genuine conflict.
    async fn write_failure(&self, id: u64, err: StoreError) -> ServiceError {
        match err {
            StoreError::Conflict => match self.store.employee_exists(id).await {
                Ok(false) => ServiceError::NotFound(ENTITY),
                Ok(true) => {
                    warn!(employee_id = id, "Concurrent update conflict");
                    ServiceError::StorageConflict
                }
                Err(e) => e.into(),
            },
            other => other.into(),
        }
    }
}
