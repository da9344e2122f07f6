use crate::dto::{FieldErrors, SpinnerRequest};
use crate::spinner_repository::{NewSpinner, SpinnerRepository};
use crate::validation::{self, add_error, GET_RESULT, WALLET_ADDRESS, WALLET_ADDRESS_TAKEN};
use sea_orm::prelude::Decimal;
use sea_orm::{DbErr, SqlErr};
use spinner_db_entity::db::spinner::Model as SpinnerModel;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SpinnerError {
    #[error("invalid spinner input: {0:?}")]
    InvalidInput(FieldErrors),
    #[error("wallet address already submitted: {0:?}")]
    Conflict(FieldErrors),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl SpinnerError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SpinnerError::InvalidInput(errors) | SpinnerError::Conflict(errors) => Some(errors),
            SpinnerError::Database(_) => None,
        }
    }

    fn wallet_taken() -> SpinnerError {
        let mut errors = FieldErrors::new();
        add_error(&mut errors, WALLET_ADDRESS, WALLET_ADDRESS_TAKEN);
        SpinnerError::Conflict(errors)
    }
}

pub struct SpinnerService<R> {
    repository: R,
}

impl<R: SpinnerRepository> SpinnerService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validates and stores one submission. Nothing is written unless every
    /// field passes.
    pub async fn submit(&self, request: &SpinnerRequest) -> Result<SpinnerModel, SpinnerError> {
        let mut errors = FieldErrors::new();
        let mut wallet_taken = false;

        let wallet_address = match validation::wallet_address(request.wallet_address.as_ref()) {
            Ok(wallet_address) => {
                if self.repository.wallet_exists(&wallet_address).await? {
                    add_error(&mut errors, WALLET_ADDRESS, WALLET_ADDRESS_TAKEN);
                    wallet_taken = true;
                }
                Some(wallet_address)
            }
            Err(message) => {
                add_error(&mut errors, WALLET_ADDRESS, message);
                None
            }
        };

        let get_offer = match validation::get_result(request.get_result.as_ref()) {
            Ok(get_offer) => Some(get_offer),
            Err(message) => {
                add_error(&mut errors, GET_RESULT, message);
                None
            }
        };

        let (wallet_address, get_offer) = match (wallet_address, get_offer) {
            (Some(wallet_address), Some(get_offer)) if errors.is_empty() => {
                (wallet_address, get_offer)
            }
            _ if wallet_taken && errors.len() == 1 => {
                return Err(SpinnerError::Conflict(errors));
            }
            _ => return Err(SpinnerError::InvalidInput(errors)),
        };

        let new_spinner = NewSpinner {
            wallet_address,
            get_offer,
        };
        match self.repository.insert(new_spinner).await {
            Ok(spinner) => {
                info!(
                    "Spinner submitted: {} with offer {}",
                    spinner.wallet_address, spinner.get_offer
                );
                Ok(spinner)
            }
            Err(error) => match error.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    warn!("Concurrent submission rejected by unique index: {}", detail);
                    Err(SpinnerError::wallet_taken())
                }
                _ => Err(error.into()),
            },
        }
    }

    pub async fn total_offers(&self) -> Result<Decimal, SpinnerError> {
        Ok(self.repository.total_offers().await?)
    }

    /// Unknown ids are not an error.
    pub async fn delete(&self, id: i32) -> Result<(), SpinnerError> {
        if self.repository.delete(id).await? {
            info!("Spinner {} deleted", id);
        } else {
            warn!("Spinner not found for delete: {}", id);
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<SpinnerModel>, SpinnerError> {
        Ok(self.repository.all().await?)
    }
}
