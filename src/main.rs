use std::process::ExitCode;

use blog_admin::post::post_index::{Notice, PostCommand, run};
use blog_admin::{Placement, PostController, PostService};
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

/// Manage blog posts from the command line
#[derive(Debug, Parser)]
#[command(name = "blog-admin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: PostCommand,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let command = Cli::parse().command;

    let notice = match PostService::new() {
        Ok(service) => {
            info!("Using blog API at {}", service.config().base_url());
            let mut controller = PostController::new(service, Placement::Append);
            run(command, &mut controller).await
        }
        Err(e) => {
            error!("{}", e);
            Notice::from(e)
        }
    };

    match notice {
        Notice::Success(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Notice::Error(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
