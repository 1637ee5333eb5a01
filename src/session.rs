use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process record of the Discord session, written by the gateway event
/// handler and read by the HTTP status route. `bot_name == None` means the
/// client has not finished logging in yet.
#[derive(Debug, Default)]
pub struct SessionState {
    pub bot_name: Option<String>,
    pub server_count: usize,
}

pub type SharedSession = Arc<RwLock<SessionState>>;

pub fn new_shared_session() -> SharedSession {
    Arc::new(RwLock::new(SessionState::default()))
}

impl SessionState {
    pub fn mark_ready(&mut self, bot_name: String, server_count: usize) {
        self.bot_name = Some(bot_name);
        self.server_count = server_count;
    }

    pub fn is_ready(&self) -> bool {
        self.bot_name.is_some()
    }

    pub fn guild_added(&mut self) {
        self.server_count += 1;
    }

    pub fn guild_removed(&mut self) {
        self.server_count = self.server_count.saturating_sub(1);
    }
}
