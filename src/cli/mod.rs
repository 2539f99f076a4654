pub mod cleanup;
pub mod healthcheck;

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub healthcheck: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub migrate: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub cleanup: bool,
    #[arg(long)]
    pub create_user: Option<String>,
    #[arg(long)]
    pub create_album: Option<String>,
    #[arg(long)]
    pub owner: Option<i64>,
    #[arg(long)]
    pub check_bind: Option<String>,
}
