use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::Parser;
use client_core::{HttpUserDirectory, UserListController};
use shared::{domain::UserSummary, protocol::UserDetail};
use tracing_subscriber::EnvFilter;

mod config;
mod navigator;

use config::load_settings;
use navigator::{open_edit_destinations, ConsoleNavigator};

#[derive(Parser, Debug)]
#[command(about = "List backend users and open one in the editor")]
struct Args {
    /// Base URL of the REST API, e.g. http://localhost:8080/api
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    auth_token: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Username to open after listing
    #[arg(long)]
    edit: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(auth_token) = args.auth_token {
        settings.auth_token = Some(auth_token);
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()
        .context("failed to build http client")?;
    let directory = Arc::new(
        HttpUserDirectory::new(&settings.server_url)
            .with_context(|| format!("invalid server url '{}'", settings.server_url))?
            .with_client(http)
            .with_auth_token(settings.auth_token.clone()),
    );
    let navigator = Arc::new(ConsoleNavigator::default());

    let controller = UserListController::init(directory.clone(), navigator.clone()).await;
    if let Some(err) = controller.last_error() {
        if err.requires_reauth() {
            anyhow::bail!("not authorized to list users; check the auth token");
        }
        anyhow::bail!("failed to load users: {}", err.message());
    }
    let state = controller.state();
    print_users(&state.users, state.total);

    let Some(username) = args.edit else {
        return Ok(());
    };
    let user = controller
        .users()
        .iter()
        .find(|user| user.username == username)
        .cloned()
        .unwrap_or_else(|| UserSummary::new(username));
    controller.edit_user(&user)?;

    for detail in open_edit_destinations(&*directory, navigator.drain()).await? {
        print_detail(&detail);
    }

    Ok(())
}

fn print_users(users: &[UserSummary], total: Option<u64>) {
    for user in users {
        let created = user
            .created_at()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        println!(
            "{:<24} {:<32} {}",
            user.username,
            user.email.as_deref().unwrap_or("-"),
            created
        );
    }
    match total {
        Some(total) => println!("{} of {total} users", users.len()),
        None => println!("{} users", users.len()),
    }
}

fn print_detail(detail: &UserDetail) {
    println!("username: {}", detail.username);
    println!("email:    {}", detail.email.as_deref().unwrap_or("-"));
    println!("theme:    {}", detail.theme.as_deref().unwrap_or("-"));
    println!("locale:   {}", detail.locale.as_deref().unwrap_or("-"));
}
