//! Services for the authentication API.

pub mod memory_store;
pub mod registration;
pub mod resolver;
pub mod retry;
pub mod store;
pub mod validation;

pub use memory_store::MemoryProfileStore;
pub use registration::RegistrationService;
pub use resolver::{ProfileResolver, ResolvedProfile};
pub use retry::RetryPolicy;
pub use store::{ClientUpdate, PgProfileStore, ProfileStore, WorkerUpdate};
pub use validation::validate_password_complexity;
