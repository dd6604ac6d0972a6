//! Read-only view of a single record, keyed by the route id.
//!
//! Every fetch is tagged with a generation. Changing the id bumps it, so a
//! slow response for a previous id can no longer overwrite the current one.

use super::Command;
use crate::api::{User, UserId};
use crate::error::ApiError;

const NOT_AVAILABLE: &str = "N/A";

/// Detail screen state for one route id.
pub struct DetailView {
    pub id: UserId,
    pub user: Option<User>,
    generation: u64,
}

impl DetailView {
    pub fn new(id: UserId) -> Self {
        Self { id, user: None, generation: 0 }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request for the current id.
    pub fn mount(&self) -> Command {
        Command::LoadUser { id: self.id.clone(), generation: self.generation }
    }

    /// Follow a route parameter change. The previous record stays visible until the new one arrives.
    pub fn set_id(&mut self, id: UserId) -> Option<Command> {
        if id == self.id {
            return None;
        }
        self.id = id;
        self.generation += 1;
        Some(self.mount())
    }

    /// Store a fetched record if it answers the current request.
    pub fn on_loaded(&mut self, generation: u64, result: Result<User, ApiError>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale user response");
            return;
        }
        match result {
            Ok(user) => self.user = Some(user),
            Err(err) => tracing::error!(error = %err, id = %self.id, "failed to fetch user"),
        }
    }

    /// Label/value rows shown under the name heading.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        vec![
            ("Email", user.email.clone()),
            ("Phone", user.phone.clone()),
            ("Username", user.username.clone()),
            ("Address", user.street().to_string()),
            ("Company", or_not_available(user.company_name())),
            ("Website", or_not_available(&user.website)),
        ]
    }
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() { NOT_AVAILABLE.to_string() } else { value.to_string() }
}
