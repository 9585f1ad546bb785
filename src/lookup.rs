//! Member lookup sessions and their search state machine.
//!
//! A lookup moves through `Idle -> Searching -> Found | NotFound | Failed`.
//! Every started search gets a ticket from a per-session counter; an outcome
//! is applied only when its ticket still matches the counter, so a slow
//! response can never overwrite the result of a search started after it.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::member::MemberWithRecords;

/// Terminal result of one lookup request.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Box<MemberWithRecords>),
    NotFound { message: String },
    Failed { message: String },
}

/// Observable state of the lookup panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Found(Box<MemberWithRecords>),
    NotFound {
        message: String,
    },
    Failed {
        message: String,
    },
}

/// Proof that a search was started; required to resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// Lookup state for a single user.
#[derive(Debug, Default)]
pub struct LookupSession {
    seq: u64,
    state: LookupState,
}

impl LookupSession {
    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Starts a search, superseding any search still in flight.
    pub fn begin(&mut self, query: impl Into<String>) -> LookupTicket {
        self.seq += 1;
        self.state = LookupState::Searching {
            query: query.into(),
        };
        LookupTicket(self.seq)
    }

    /// Applies `outcome` if `ticket` belongs to the most recent search.
    ///
    /// Returns false when the ticket was superseded by a later `begin` or
    /// `clear`; the outcome is dropped in that case.
    pub fn resolve(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> bool {
        if ticket.0 != self.seq {
            return false;
        }
        self.state = match outcome {
            LookupOutcome::Found(found) => LookupState::Found(found),
            LookupOutcome::NotFound { message } => LookupState::NotFound { message },
            LookupOutcome::Failed { message } => LookupState::Failed { message },
        };
        true
    }

    /// Returns to idle and invalidates any ticket still in flight.
    pub fn clear(&mut self) {
        self.seq += 1;
        self.state = LookupState::Idle;
    }
}

/// Per-user lookup sessions, keyed by the authenticated subject.
///
/// Sessions are kept after `clear` so their counters stay monotonic; dropping
/// one would let a late outcome match a ticket issued by a fresh session.
#[derive(Debug, Default)]
pub struct LookupSessions {
    inner: RwLock<HashMap<String, LookupSession>>,
}

impl LookupSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, user: &str, query: impl Into<String>) -> LookupTicket {
        self.inner
            .write()
            .await
            .entry(user.to_string())
            .or_default()
            .begin(query)
    }

    pub async fn resolve(&self, user: &str, ticket: LookupTicket, outcome: LookupOutcome) -> bool {
        match self.inner.write().await.get_mut(user) {
            Some(session) => session.resolve(ticket, outcome),
            None => false,
        }
    }

    pub async fn clear(&self, user: &str) {
        if let Some(session) = self.inner.write().await.get_mut(user) {
            session.clear();
        }
    }

    pub async fn state(&self, user: &str) -> LookupState {
        self.inner
            .read()
            .await
            .get(user)
            .map(|session| session.state().clone())
            .unwrap_or_default()
    }
}
