//! CLI argument parsing using clap

use clap::Parser;

/// CampusNet profile and grade reader
#[derive(Parser, Debug)]
#[command(
    name = "campusnet",
    about = "Read your profile and grades from CampusNet",
    version
)]
pub struct Args {
    /// Print the profile (prints profile and grades if neither is chosen)
    #[arg(long)]
    pub profile: bool,

    /// Print the exam results
    #[arg(long)]
    pub grades: bool,

    /// Application name registered with CampusNet [env: CAMPUSNET_APP_NAME]
    #[arg(long)]
    pub app_name: Option<String>,

    /// Application token issued by CampusNet [env: CAMPUSNET_API_TOKEN]
    #[arg(long)]
    pub api_token: Option<String>,

    /// Student number to log in as [env: CAMPUSNET_USER]
    #[arg(short, long)]
    pub user: Option<String>,

    /// Root of the data API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Password authentication endpoint
    #[arg(long)]
    pub auth_url: Option<String>,

    /// Language of returned texts
    #[arg(long)]
    pub locale: Option<String>,

    /// Quiet mode - tab-separated output without headings
    #[arg(short, long)]
    pub quiet: bool,
}
