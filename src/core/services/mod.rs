pub mod master_data_service;
pub mod payment_service;
pub mod summary_service;
pub mod transaction_service;

pub use master_data_service::MasterDataService;
pub use payment_service::PaymentService;
pub use summary_service::{PeriodSummary, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::DatasetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("{0}")]
    Invalid(String),
}
