use anyhow::Result;
use tracing::info;

use board_model::{LoginRequest, RegisterRequest};

use super::Context;
use crate::cli::{LoginArgs, RegisterArgs};
use crate::output::{print_json, print_user};

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let request = LoginRequest::new(args.email, args.password);
    let user = ctx.session.login(&ctx.client, &request).await?;

    let base_url = &ctx.client.config().base_url;
    match ctx.client.session_token() {
        Some(token) => {
            ctx.session_file.save(base_url, &token)?;
            info!(path = %ctx.session_file.path().display(), "Session stored");
        }
        None => tracing::warn!("Service did not set a session cookie; session not stored"),
    }

    if ctx.format.is_json() {
        return print_json(&user);
    }
    println!("Signed in as {} ({})", user.display_name(), user.role_label());
    Ok(())
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let mut request = RegisterRequest::new(args.email, args.password);
    if let Some(full_name) = args.full_name {
        request = request.with_full_name(full_name);
    }

    let user = ctx.client.register(&request).await?;

    if ctx.format.is_json() {
        return print_json(&user);
    }
    println!("Registered {}. Run `board login` to sign in.", user.email);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let result = ctx.session.logout(&ctx.client).await;
    ctx.session_file.clear()?;

    if let Err(e) = result {
        tracing::warn!(error = %e, "Service sign-out failed; local session cleared");
    }
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    ctx.require_session().await?;
    let Some(user) = ctx.session.current_user().await else {
        return Ok(());
    };

    if ctx.format.is_json() {
        return print_json(&user);
    }
    print_user(&user);
    Ok(())
}
