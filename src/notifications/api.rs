//! Public API for the notification system
//!
//! External modules should import from here rather than directly from
//! internal modules. Each scan controller owns its own manager; there is no
//! process-wide instance, so events of one business never reach subscribers
//! of another.

pub use crate::notifications::error::NotificationError;
pub use crate::notifications::event::{Event, EventFilter, ScanEvent, ScanEventType};
pub use crate::notifications::manager::{EventReceiver, NotificationManager};

use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to a notification manager
pub type SharedNotificationManager = Arc<Mutex<NotificationManager>>;

/// Create a manager ready to be shared between a controller and its front end
pub fn shared_manager() -> SharedNotificationManager {
    Arc::new(Mutex::new(NotificationManager::new()))
}
