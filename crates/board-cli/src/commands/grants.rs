use anyhow::Result;

use board_rbac::{GrantRequest, Operation};

use super::Context;
use crate::cli::GrantCommands;
use crate::output::{print_grants, print_json};

pub async fn run(ctx: &Context, command: GrantCommands) -> Result<()> {
    match command {
        GrantCommands::List { post_id } => {
            ctx.authorized_post(post_id, Operation::ManagePermissions)
                .await?;
            let grants = ctx.client.list_grants(post_id).await?;

            if ctx.format.is_json() {
                return print_json(&grants);
            }
            print_grants(&grants);
            Ok(())
        }
        GrantCommands::Add {
            post_id,
            user,
            level,
        } => {
            let request = GrantRequest::for_identifier(&user, level)?;
            ctx.authorized_post(post_id, Operation::ManagePermissions)
                .await?;
            let grant = ctx.client.add_grant(post_id, &request).await?;

            if ctx.format.is_json() {
                return print_json(&grant);
            }
            println!(
                "Granted {} on post {} to {}",
                grant.permission_type,
                grant.post_id,
                grant.grantee_label()
            );
            Ok(())
        }
        GrantCommands::Remove { post_id, user_id } => {
            ctx.authorized_post(post_id, Operation::ManagePermissions)
                .await?;
            let response = ctx.client.remove_grant(post_id, user_id).await?;

            if ctx.format.is_json() {
                return print_json(&response);
            }
            println!("{}", response.message);
            Ok(())
        }
    }
}
