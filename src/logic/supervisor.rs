use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Token of one chain, tagged with the generation it was started in
#[derive(Debug, Clone)]
pub struct ChainTicket {
    generation: u64,
    token: CancellationToken,
}

impl ChainTicket {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug, Default)]
struct Current {
    generation: u64,
    token: CancellationToken,
}

/// Hands out cancellation tokens so that starting a chain cancels the
/// previous chain from the same source.
#[derive(Debug, Default)]
pub struct ChainSupervisor {
    current: Mutex<Current>,
}

impl ChainSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the in-flight chain, if any, and return the ticket for a new one
    pub fn begin(&self) -> ChainTicket {
        let mut current = self.current.lock();
        current.token.cancel();
        current.generation += 1;
        current.token = CancellationToken::new();
        ChainTicket {
            generation: current.generation,
            token: current.token.clone(),
        }
    }

    /// Whether no chain has been started since `ticket`
    pub fn is_current(&self, ticket: &ChainTicket) -> bool {
        self.current.lock().generation == ticket.generation
    }
}

/// One supervisor per interaction source. A source is forgotten as soon as
/// its latest chain finishes.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<ChainSupervisor>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain for `session`, superseding its in-flight one
    pub fn begin(&self, session: &str) -> SessionLease<'_> {
        let mut sessions = self.sessions.lock();
        let ticket = sessions
            .entry(session.to_string())
            .or_default()
            .begin();
        SessionLease {
            registry: self,
            session: session.to_string(),
            ticket,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn release(&self, session: &str, ticket: &ChainTicket) {
        let mut sessions = self.sessions.lock();
        let latest = sessions
            .get(session)
            .map_or(false, |supervisor| supervisor.is_current(ticket));
        if latest {
            sessions.remove(session);
        }
    }
}

/// A running chain of a session. Dropping it forgets the session unless a
/// newer chain has started meanwhile.
#[derive(Debug)]
pub struct SessionLease<'a> {
    registry: &'a SessionRegistry,
    session: String,
    ticket: ChainTicket,
}

impl SessionLease<'_> {
    pub fn token(&self) -> &CancellationToken {
        self.ticket.token()
    }
}

impl Drop for SessionLease<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.session, &self.ticket);
    }
}
