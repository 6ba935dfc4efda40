//! Administrative dashboard statistics

use serde::{Deserialize, Serialize};

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_posts: u64,
    pub active_users: u64,
    pub public_posts: u64,
}

impl AdminStats {
    pub fn inactive_users(&self) -> u64 {
        self.total_users.saturating_sub(self.active_users)
    }

    pub fn private_posts(&self) -> u64 {
        self.total_posts.saturating_sub(self.public_posts)
    }
}
