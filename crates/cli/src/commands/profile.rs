//! Profile commands
//!
//! The profile is a single row keyed by the configured user id. `set`
//! merges: fields not given on the command line keep their stored value.

use fieldlog_domain::types::UserProfile;
use fieldlog_domain::Result;

use crate::cli::{ProfileCommands, ProfileSetArgs};
use crate::context::AppContext;

use super::execute;

/// Route a profile subcommand to its handler.
pub async fn handle(ctx: &AppContext, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Set(args) => execute("profile_set", set(ctx, args)).await,
        ProfileCommands::Show => execute("profile_show", show(ctx)).await,
    }
}

async fn set(ctx: &AppContext, args: ProfileSetArgs) -> Result<()> {
    let id = ctx.config.user.id.clone();
    let mut profile = ctx
        .profiles
        .find_by_id(&id)
        .await?
        .unwrap_or_else(|| UserProfile { id, ..UserProfile::default() });

    if let Some(email) = args.email {
        profile.email = Some(email);
    }
    if let Some(full_name) = args.full_name {
        profile.full_name = Some(full_name);
    }
    if let Some(congregation) = args.congregation {
        profile.congregation = Some(congregation);
    }
    if let Some(city) = args.city {
        profile.city = Some(city);
    }
    if let Some(state) = args.state {
        profile.state = Some(state);
    }
    if let Some(birth_date) = args.birth_date {
        profile.birth_date = Some(birth_date);
    }

    let saved = ctx.profiles.upsert(&profile).await?;
    println!("Profile saved.");
    print_profile(&saved);
    Ok(())
}

async fn show(ctx: &AppContext) -> Result<()> {
    match ctx.profiles.find_by_id(&ctx.config.user.id).await? {
        Some(profile) => print_profile(&profile),
        None => println!("No profile stored; use `fieldlog profile set` to create one."),
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    print_row("Name", &profile.full_name);
    print_row("Email", &profile.email);
    print_row("Congregation", &profile.congregation);
    print_row("City", &profile.city);
    print_row("State", &profile.state);
    print_row("Birth date", &profile.birth_date);
}

fn print_row(label: &str, value: &Option<String>) {
    println!("{label:<13} {}", value.as_deref().unwrap_or("-"));
}
