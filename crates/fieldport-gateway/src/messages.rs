// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only in-memory message store, keyed by booking.
//!
//! Messages are never mutated or deleted. Read order is ascending by
//! timestamp; the sort is stable, so messages created within the same
//! instant keep their append order.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use fieldport_core::{Message, MessageSender};

/// Per-booking chat log.
///
/// The store does no validation: the handler rejects blank text before
/// calling [`add`](Self::add), and nothing checks that `booking_id`
/// references a real job.
#[derive(Debug, Default)]
pub struct MessageStore {
    by_booking: DashMap<String, Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a customer message and returns the created record with its
    /// generated id and server-set timestamp.
    pub fn add(&self, booking_id: &str, customer_id: &str, text: &str) -> Message {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            booking_id: booking_id.to_string(),
            customer_id: customer_id.to_string(),
            message: text.to_string(),
            timestamp: Utc::now(),
            sender: MessageSender::Customer,
        };
        self.by_booking
            .entry(booking_id.to_string())
            .or_default()
            .push(message.clone());
        message
    }

    /// Messages for a booking, ascending by timestamp.
    pub fn list_for_booking(&self, booking_id: &str) -> Vec<Message> {
        let mut messages = self
            .by_booking
            .get(booking_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        // Stable sort: equal timestamps keep append order.
        messages.sort_by_key(|m| m.timestamp);
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn add_assigns_id_timestamp_and_sender() {
        let store = MessageStore::new();
        let before = Utc::now();
        let msg = store.add("job-001", "cust-001", "When will the plumber arrive?");
        let after = Utc::now();

        assert!(!msg.id.is_empty());
        assert_eq!(msg.booking_id, "job-001");
        assert_eq!(msg.customer_id, "cust-001");
        assert_eq!(msg.sender, MessageSender::Customer);
        assert!(msg.timestamp >= before && msg.timestamp <= after);
    }

    #[test]
    fn list_is_scoped_to_the_booking() {
        let store = MessageStore::new();
        store.add("job-001", "cust-001", "first");
        store.add("job-002", "cust-001", "other booking");
        store.add("job-001", "cust-001", "second");

        let messages = store.list_for_booking("job-001");
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.booking_id == "job-001"));
    }

    #[test]
    fn list_orders_by_timestamp_ascending() {
        let store = MessageStore::new();
        let ids: Vec<String> = (0..5)
            .map(|i| store.add("job-001", "cust-001", &format!("msg {i}")).id)
            .collect();

        let listed: Vec<String> = store
            .list_for_booking("job-001")
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn equal_timestamps_keep_append_order() {
        let store = MessageStore::new();
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        // Inject colliding timestamps directly; add() always stamps "now"
        // so millisecond collisions can't be forced through the API.
        let mut colliding = Vec::new();
        for i in 0..3 {
            colliding.push(Message {
                id: format!("m-{i}"),
                booking_id: "job-001".into(),
                customer_id: "cust-001".into(),
                message: format!("tied {i}"),
                timestamp: ts,
                sender: MessageSender::Customer,
            });
        }
        store.by_booking.insert("job-001".into(), colliding);

        let listed: Vec<String> = store
            .list_for_booking("job-001")
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(listed, vec!["m-0", "m-1", "m-2"]);
    }

    #[test]
    fn unknown_booking_lists_empty() {
        let store = MessageStore::new();
        assert!(store.list_for_booking("job-404").is_empty());
    }
}
