//! Account and session commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use setlist_core::{AuthResponse, CredentialStore, LoginRequest, RegisterRequest};

use crate::cli::GlobalArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the session tokens
    Login(LoginArgs),

    /// Create an account and log in
    Register(RegisterArgs),

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Exchange the refresh token for a new access token
    Refresh,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SETLIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "SETLIST_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn handle(global: &GlobalArgs, cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login(global, args).await,
        AuthSubcommand::Register(args) => register(global, args).await,
        AuthSubcommand::Logout => logout(global).await,
        AuthSubcommand::Whoami => whoami(global).await,
        AuthSubcommand::Refresh => refresh(global).await,
    }
}

async fn login(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let client = context::client(global)?;

    eprintln!("{}", "Logging in...".dimmed());
    let response = client
        .login(&LoginRequest::new(&args.email, &args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    print_account(&response);
    Ok(())
}

async fn register(global: &GlobalArgs, args: RegisterArgs) -> Result<()> {
    let client = context::client(global)?;

    let mut registration = RegisterRequest::new(&args.username, &args.email, &args.password);
    if let Some(name) = &args.name {
        registration = registration.with_name(name);
    }

    eprintln!("{}", "Creating account...".dimmed());
    let response = client
        .register(&registration)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    print_account(&response);
    Ok(())
}

async fn logout(global: &GlobalArgs) -> Result<()> {
    let client = context::client(global)?;
    client.logout().await.context("Failed to clear credentials")?;
    output::success("Logged out");
    Ok(())
}

async fn whoami(global: &GlobalArgs) -> Result<()> {
    let path = context::credentials_path(global)?;
    let client = context::client(global)?;

    let store = client.store();
    let access = store
        .access_token()
        .await
        .context("Failed to read credentials")?;
    if access.is_none() {
        anyhow::bail!("No active session. Run 'setlist auth login' first.");
    }
    let refresh = store
        .refresh_token()
        .await
        .context("Failed to read credentials")?;

    output::field("API", client.base_url().as_str());
    output::field("Credentials", &path.display().to_string());
    output::field("Access token", "stored");
    output::field(
        "Refresh token",
        if refresh.is_some() { "stored" } else { "none" },
    );
    Ok(())
}

async fn refresh(global: &GlobalArgs) -> Result<()> {
    let client = context::client(global)?;
    client.refresh().await.context("Failed to refresh session")?;
    output::success("Session refreshed");
    Ok(())
}

fn print_account(response: &AuthResponse) {
    if let Some(user) = &response.user {
        println!();
        output::field("User", &user.username);
        output::field("Email", &user.email);
    }
}
