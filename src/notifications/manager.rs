//! NotificationManager implementation

use std::collections::HashMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::notifications::error::NotificationError;
use crate::notifications::event::{Event, EventFilter, ScanEvent};

pub type EventReceiver = UnboundedReceiver<Event>;

struct SubscriberInfo {
    filter: EventFilter,
    source: String,
    sender: UnboundedSender<Event>,
}

#[derive(Default)]
pub struct NotificationManager {
    subscribers: HashMap<String, SubscriberInfo>,
    published: usize,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        subscriber_id: impl Into<String>,
        filter: EventFilter,
        source: impl Into<String>,
    ) -> EventReceiver {
        let subscriber_id = subscriber_id.into();
        let source = source.into();
        let (sender, receiver) = unbounded_channel();

        let info = SubscriberInfo {
            filter,
            source: source.clone(),
            sender,
        };

        if let Some(existing) = self.subscribers.insert(subscriber_id.clone(), info) {
            log::warn!(
                "Subscriber '{}' replaced existing subscription (source: {} -> {})",
                subscriber_id,
                existing.source,
                source
            );
        }

        receiver
    }

    pub fn unsubscribe(&mut self, subscriber_id: &str) -> bool {
        self.subscribers.remove(subscriber_id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn has_subscriber(&self, subscriber_id: &str) -> bool {
        self.subscribers.contains_key(subscriber_id)
    }

    /// Events published since creation, delivered or not
    pub fn published_count(&self) -> usize {
        self.published
    }

    /// Deliver an event to every subscriber whose filter accepts it.
    ///
    /// Subscribers whose receiver was dropped are removed and reported in the
    /// error; delivery to the remaining subscribers still happens.
    pub fn publish(&mut self, payload: ScanEvent) -> Result<(), NotificationError> {
        let event = Event::new(payload);
        self.published += 1;
        log::trace!("Publishing {} event", event.event_type());

        let failed_subscribers: Vec<String> = self
            .subscribers
            .iter()
            .filter(|(_, info)| info.filter.accepts(&event))
            .filter(|(_, info)| info.sender.send(event.clone()).is_err())
            .map(|(id, _)| id.clone())
            .collect();

        for subscriber_id in &failed_subscribers {
            self.subscribers.remove(subscriber_id);
        }

        if failed_subscribers.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::PublishFailed {
                event_type: event.event_type().to_string(),
                failed_subscribers,
            })
        }
    }
}
