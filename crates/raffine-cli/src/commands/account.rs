use anyhow::Result;
use clap::Args;
use colored::Colorize;

use raffine_core::RaffineError;
use raffine_core::validation::{LoginForm, RegisterForm};

use super::utils::{App, success};

#[derive(Args)]
pub struct LoginArgs {
    /// Defaults to the email remembered by a previous login
    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    password: String,

    /// Remember the email for the next login
    #[arg(long)]
    remember: bool,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Repeat the password
    #[arg(long)]
    confirm_password: String,

    /// Accept the terms of service
    #[arg(long)]
    accept_terms: bool,
}

/// Prints form errors field by field; other errors are returned.
fn report(err: RaffineError) -> Result<()> {
    if let RaffineError::Validation(errors) = &err {
        for (field, message) in errors.iter() {
            eprintln!("{} {}", format!("{}:", field).red().bold(), message);
        }
        anyhow::bail!("Please fix the errors above");
    }
    if err.is_collaborator() {
        anyhow::bail!("{}", err.user_message());
    }
    Err(err.into())
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let mut ctx = app.user_context();
    let email = match args.email {
        Some(email) => email,
        None => ctx.session().remembered_email().unwrap_or_default(),
    };
    let form = LoginForm::new(email, args.password).remember(args.remember);

    match ctx.login(&form).await {
        Ok(session) => {
            ctx.settle().await;
            success(format!("Welcome back, {}!", session.identity.name));
            Ok(())
        }
        Err(e) => report(e),
    }
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let mut ctx = app.user_context();
    let form = RegisterForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        terms_accepted: args.accept_terms,
    };

    match ctx.register(&form).await {
        Ok(session) => {
            ctx.settle().await;
            success(format!("Welcome to Raffine, {}!", session.identity.name));
            Ok(())
        }
        Err(e) => report(e),
    }
}

pub async fn logout(app: &App) -> Result<()> {
    let mut ctx = app.user_context();
    if ctx.logout() {
        success("Signed out. Your cart and favorites stay on this device.");
    } else {
        println!("{}", "Not signed in.".bright_black());
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let ctx = app.user_context();
    match ctx.session().session() {
        Some(session) => println!(
            "{} <{}>",
            session.identity.name.bright_white().bold(),
            session.identity.email
        ),
        None => println!("{}", "Browsing as a guest.".bright_black()),
    }
    println!(
        "{}",
        format!("Backend: {}", app.config.api_url).bright_black()
    );
    Ok(())
}
