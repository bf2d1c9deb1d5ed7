use std::collections::HashMap;

/// Pending expiry per active identifier. Owned by one scheduler; cleared on teardown.
#[derive(Debug, Default)]
pub struct ExpiryTimers {
    due: HashMap<String, f64>,
}

impl ExpiryTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any timer already pending for `id`.
    pub fn schedule(&mut self, id: &str, at: f64) {
        self.due.insert(id.to_string(), at);
    }

    pub fn cancel(&mut self, id: &str) -> bool {
        self.due.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.due.clear();
    }

    pub fn len(&self) -> usize {
        self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }

    /// Removes and returns the earliest timer due at or before `now`.
    /// Ties resolve by identifier so firing order is deterministic.
    pub fn pop_due(&mut self, now: f64) -> Option<(String, f64)> {
        let (id, at) = self
            .due
            .iter()
            .filter(|(_, at)| **at <= now)
            .min_by(|(a_id, a_at), (b_id, b_at)| a_at.total_cmp(b_at).then_with(|| a_id.cmp(b_id)))
            .map(|(id, at)| (id.clone(), *at))?;
        self.due.remove(&id);
        Some((id, at))
    }
}
