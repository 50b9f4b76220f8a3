//! Storage contract: repository traits, pagination types and the error
//! taxonomy shared by every backend.

mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{RecipeRepository, UserRepository};
pub use types::{Page, PageRequest, DEFAULT_PAGE_LIMIT};
