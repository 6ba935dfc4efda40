pub mod json;
pub mod progress;
pub mod table;

pub use json::print_json;
pub use table::{print_grants, print_post, print_posts, print_stats, print_user, print_users};
