//! Event participant reconciliation (the slots modal). Relation-only: no
//! request ever touches the event's own fields.

use shared::{
    domain::{EventId, UserId},
    protocol::EventSummary,
};
use tracing::warn;

use crate::{error::ClientError, reconcile::SetDraft, AdminClient, ClientEvent};

pub struct EventSlots {
    event_id: EventId,
    max_slot: u32,
    pub participants: SetDraft<UserId>,
}

impl EventSlots {
    /// Captures the participant set of a freshly fetched event. An event
    /// may have no participants at all, so the minimum cardinality is 0.
    pub fn open(event: &EventSummary) -> Self {
        let mut current: Vec<UserId> = Vec::new();
        for participant in &event.participants {
            if !current.contains(&participant.id) {
                current.push(participant.id);
            }
        }
        Self {
            event_id: event.id,
            max_slot: event.max_slot,
            participants: SetDraft::from_current(current, 0),
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Toggle respecting the event capacity: planning an attach beyond
    /// `max_slot` is rejected before any request is built.
    pub fn toggle(&mut self, user: UserId) -> Result<bool, ClientError> {
        let adding = !self.participants.contains(user);
        if adding && self.participants.target().len() as u32 >= self.max_slot {
            return Err(ClientError::validation(format!(
                "event is full ({} slots)",
                self.max_slot
            )));
        }
        Ok(self.participants.toggle(user))
    }

    /// Issues one join per newly selected user and one leave per dropped
    /// user, each awaited; the first error is reported after the whole
    /// plan ran.
    pub async fn submit(&self, client: &AdminClient) -> Result<(), ClientError> {
        let plan = self.participants.plan_update();
        let mut first_error = None;
        for user in &plan.attach {
            if let Err(err) = client.join_event(*user, self.event_id).await {
                warn!(
                    user_id = user.0,
                    event_id = self.event_id.0,
                    "event join failed: {err}"
                );
                first_error.get_or_insert(err);
            }
        }
        for user in &plan.detach {
            if let Err(err) = client.leave_event(*user, self.event_id).await {
                warn!(
                    user_id = user.0,
                    event_id = self.event_id.0,
                    "event leave failed: {err}"
                );
                first_error.get_or_insert(err);
            }
        }

        client.notify(ClientEvent::EventsChanged);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
