//! Runtime configuration loaded from the environment.

use std::collections::HashSet;
use std::env;

/// Static configuration shared with every handler.
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    /// Telegram user ids allowed to run the admin commands.
    pub admin_ids: HashSet<u64>,
}

impl BotConfig {
    /// Read configuration from the environment. `ADMIN_USER_IDS` is a
    /// comma-separated list of user ids; unparsable entries are skipped.
    pub fn from_env() -> Self {
        let admin_ids = env::var("ADMIN_USER_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|id| id.trim().parse().ok())
            .collect();

        BotConfig { admin_ids }
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
