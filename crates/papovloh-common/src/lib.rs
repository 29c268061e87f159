pub mod actions;
pub mod errors;
pub mod id;
pub mod notifications;
pub mod persona;

pub use actions::{Action, ActionParseError, ResearchTier};
pub use errors::{ConfigError, PapovlohError, StorageError};
pub use id::{new_id, MessageId, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use persona::Persona;

pub type Result<T> = std::result::Result<T, PapovlohError>;
