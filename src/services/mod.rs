pub mod generation_service;
pub mod notification_service;

pub use generation_service::{GenerationError, GenerationService};
pub use notification_service::NotificationService;
