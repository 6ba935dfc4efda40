use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use board_rbac::PermissionLevel;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "board")]
#[command(version, about = "Video board client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service URL (defaults to http://localhost:8000)
    #[arg(long, global = true, env = "BOARD_API_URL")]
    pub api_url: Option<String>,

    /// Session file (defaults to ~/.board-session.json)
    #[arg(long, global = true, env = "BOARD_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Post management
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Per-post permission grants
    Grants {
        #[command(subcommand)]
        command: GrantCommands,
    },

    /// Administration
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Print the stream URL of a post's video
    StreamUrl {
        /// Post ID
        post_id: i64,
    },

    /// Download a post's video
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "BOARD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "BOARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub full_name: Option<String>,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Post ID
    pub post_id: i64,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Byte range, e.g. "0-1023" or "1024-"
    #[arg(long)]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// List posts visible to you
    List,

    /// Show a post
    Show { post_id: i64 },

    /// Upload a video as a new post
    Upload(UploadArgs),

    /// Edit a post's title or description
    Edit(EditArgs),

    /// Make a post public
    Publish { post_id: i64 },

    /// Make a post private
    Unpublish { post_id: i64 },

    /// Delete a post and its video
    Delete { post_id: i64 },
}

#[derive(Args)]
pub struct UploadArgs {
    /// Video file (.mp4, .webm, .mov)
    pub file: PathBuf,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Upload as private
    #[arg(long)]
    pub private: bool,
}

#[derive(Args)]
pub struct EditArgs {
    pub post_id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum GrantCommands {
    /// List grants on a post
    List { post_id: i64 },

    /// Grant a user access to a post
    Add {
        post_id: i64,

        /// User ID or email
        user: String,

        #[arg(long, default_value = "read", value_parser = parse_level)]
        level: PermissionLevel,
    },

    /// Remove a user's grant on a post
    Remove { post_id: i64, user_id: i64 },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Dashboard counts
    Stats,

    /// List users
    Users,

    /// Show a user
    User { user_id: i64 },

    /// Update a user
    UpdateUser(UpdateUserArgs),

    /// Delete a user with their posts and grants
    DeleteUser { user_id: i64 },

    /// List every post
    Posts,
}

#[derive(Args)]
pub struct UpdateUserArgs {
    pub user_id: i64,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub active: Option<bool>,

    #[arg(long)]
    pub admin: Option<bool>,
}

fn parse_level(s: &str) -> Result<PermissionLevel, String> {
    PermissionLevel::parse(s).ok_or_else(|| format!("unknown permission level '{}'", s))
}
