//! Session CLI commands.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use smortr_core::config::AppConfig;
use smortr_core::result::AppResult;
use smortr_entity::session::{Profile, SessionUser};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account ID
    #[arg(long)]
    pub id: String,

    /// Sign-in email
    #[arg(long)]
    pub email: String,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct WhoamiView<'a> {
    id: &'a str,
    email: &'a str,
    source_domain: &'a str,
    full_name: Option<&'a str>,
}

/// Record the account in the saved session
pub async fn login(args: &LoginArgs, config: &AppConfig) -> AppResult<()> {
    let user = SessionUser {
        id: args.id.clone(),
        email: args.email.clone(),
    };
    let profile = Profile {
        id: args.id.clone(),
        email: Some(args.email.clone()),
        full_name: args.name.clone(),
        phone: None,
        company_id: None,
    };

    let session = super::session_store(config).sign_in(user, profile).await?;
    let identity = session.identity()?;
    output::print_success(&format!(
        "Signed in as {} ({})",
        identity.email, identity.source_domain
    ));
    Ok(())
}

/// Clear the saved session
pub async fn logout(config: &AppConfig) -> AppResult<()> {
    super::session_store(config).sign_out().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Show the signed-in account
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let session = super::session_store(config).load().await?;
    if !session.is_signed_in() {
        output::print_warning("Not signed in");
        return Ok(());
    }

    let identity = session.identity()?;
    let full_name = session
        .profile
        .as_ref()
        .and_then(|p| p.full_name.as_deref());

    match format {
        OutputFormat::Json => output::print_json(&WhoamiView {
            id: &identity.id,
            email: &identity.email,
            source_domain: &identity.source_domain,
            full_name,
        }),
        OutputFormat::Table => {
            println!("Signed in:");
            output::print_field("ID", &identity.id);
            output::print_field("Email", &identity.email);
            output::print_field("Domain", &identity.source_domain);
            output::print_field("Name", full_name.unwrap_or("-"));
            output::print_field(
                "Default view",
                &format!("{:?}", session.settings.default_view_mode),
            );
        }
    }
    Ok(())
}
