use super::{prompts, AppContext};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use wishlist_gateway::MovieGateway;
use wishlist_models::RegisterRequest;

pub fn run_login(ctx: &AppContext, username: Option<String>, output: &Output) -> Result<()> {
    let username = prompts::value_or_prompt(username, "Username")?;
    let password = prompts::prompt_password("Password")?;

    let mut holder = ctx.session()?;
    let session = holder
        .login(username.trim(), &password)
        .map_err(|e| eyre!("Login failed: {}", e))?;
    output.success(format!("Signed in as {}", session.username()));
    Ok(())
}

pub fn run_logout(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut holder = ctx.session()?;
    holder.logout().map_err(|e| eyre!("Failed to clear session: {}", e))?;
    output.success("Signed out");
    Ok(())
}

pub fn run_whoami(ctx: &AppContext, output: &Output) -> Result<()> {
    let holder = ctx.session()?;
    let current = holder.current();

    if !output.is_human() {
        output.json(&json!({
            "authenticated": holder.is_authenticated(),
            "user": current.as_ref().map(|s| &s.user),
        }));
        return Ok(());
    }
    match current {
        Some(session) => output.info(format!("{} <{}>", session.user.username, session.user.email)),
        None => output.info("Not signed in"),
    }
    Ok(())
}

pub async fn run_signup(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
    output: &Output,
) -> Result<()> {
    let username = prompts::value_or_prompt(username, "Username")?;
    let email = prompts::value_or_prompt(email, "Email")?;
    let password = prompts::prompt_password("Password")?;
    let confirm = prompts::prompt_password("Confirm password")?;

    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(eyre!("Username, email and password are all required"));
    }
    if password != confirm {
        return Err(eyre!("Passwords do not match"));
    }

    let request = RegisterRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    ctx.gateway()
        .register(&request)
        .await
        .map_err(|e| eyre!("Signup failed: {}", e))?;
    output.success(format!("Account created for {}. Sign in with 'wishlist login'.", request.username));
    Ok(())
}
