//! Desktop notification adapters

mod notify_rust;

pub use self::notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

pub fn create_notifier() -> Box<dyn Notifier> {
    Box::new(NotifyRustNotifier::default())
}
