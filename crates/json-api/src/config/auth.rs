//! Auth Config

use clap::Args;

/// Administrative authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Static bearer token required by the administrative endpoints
    #[arg(long, env = "ADMIN_API_TOKEN")]
    pub admin_api_token: String,
}
