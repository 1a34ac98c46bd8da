/// Current snapshot of connected identities, in server order.
///
/// Replace-on-write only: every `users` broadcast is a full snapshot, never a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    users: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster.
    pub fn replace(&mut self, users: Vec<String>) {
        self.users = users;
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }
}
