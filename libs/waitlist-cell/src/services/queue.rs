use std::collections::VecDeque;

use schedule_store_cell::WaitlistEntry;

/// Snapshot of a waiting list in serving order: priority ascending, then
/// inclusion time, then id. Popping never touches the store.
#[derive(Debug, Clone, Default)]
pub struct WaitlistQueue {
    entries: VecDeque<WaitlistEntry>,
}

impl WaitlistQueue {
    pub fn from_entries(mut entries: Vec<WaitlistEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.included_at.cmp(&b.included_at))
                .then(a.id.cmp(&b.id))
        });
        Self {
            entries: entries.into(),
        }
    }

    pub fn pop_front(&mut self) -> Option<WaitlistEntry> {
        self.entries.pop_front()
    }

    /// Returns an entry that could not be served to the head of the queue.
    pub fn push_front(&mut self, entry: WaitlistEntry) {
        self.entries.push_front(entry);
    }

    pub fn peek(&self) -> Option<&WaitlistEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<WaitlistEntry> {
        self.entries.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn test_orders_by_priority_then_inclusion() {
        let patient = Uuid::new_v4();
        let mut late_urgent = WaitlistEntry::new(patient, "Cardiologia", 2);
        let early_urgent = WaitlistEntry::new(patient, "Cardiologia", 2);
        let routine = WaitlistEntry::new(patient, "Cardiologia", 8);
        late_urgent.included_at = early_urgent.included_at + Duration::hours(1);

        let mut queue = WaitlistQueue::from_entries(vec![
            routine.clone(),
            late_urgent.clone(),
            early_urgent.clone(),
        ]);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_front().map(|e| e.id), Some(early_urgent.id));
        assert_eq!(queue.pop_front().map(|e| e.id), Some(late_urgent.id));
        assert_eq!(queue.pop_front().map(|e| e.id), Some(routine.id));
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn test_push_front_restores_head() {
        let entry = WaitlistEntry::new(Uuid::new_v4(), "Neurologia", 5);
        let mut queue = WaitlistQueue::from_entries(vec![entry.clone()]);

        let head = queue.pop_front().unwrap();
        assert!(queue.is_empty());
        queue.push_front(head);
        assert_eq!(queue.peek().map(|e| e.id), Some(entry.id));
    }
}
