use crate::protocol::{Channel, DrawEvent, Envelope};

/// Append-only record of received envelopes for the session lifetime.
///
/// Chat and system entries are kept for display, draw entries for replay.
/// Roster snapshots never land here.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<Envelope>,
    draw_count: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, env: Envelope) {
        if env.channel() == Channel::Draw {
            self.draw_count += 1;
        }
        self.entries.push(env);
    }

    /// Everything, in arrival order.
    pub fn entries(&self) -> &[Envelope] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Envelope> {
        self.entries.last()
    }

    /// Chat and system entries, in arrival order.
    pub fn chat_entries(&self) -> impl Iterator<Item = &Envelope> + '_ {
        self.entries
            .iter()
            .filter(|e| matches!(e.channel(), Channel::Chat | Channel::System))
    }

    /// The draw subsequence, oldest first.
    pub fn draw_events(&self) -> Vec<&DrawEvent> {
        let mut out = Vec::with_capacity(self.draw_count);
        out.extend(self.entries.iter().filter_map(Envelope::draw_event));
        out
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }
}
