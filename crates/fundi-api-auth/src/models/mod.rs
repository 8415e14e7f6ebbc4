//! Request and response models for the authentication API.

pub mod requests;
pub mod responses;

pub use requests::{RegisterRequest, RegisterRole, UpdateProfileRequest};
pub use responses::{ClientProfile, ProfileResponse, WorkerProfile};
