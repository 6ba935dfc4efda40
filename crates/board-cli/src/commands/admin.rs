use anyhow::Result;

use board_model::UserAdminUpdate;
use board_rbac::{allowed_operations, can_manage_user, PermissionGrant, UserAction};

use super::Context;
use crate::cli::{AdminCommands, UpdateUserArgs};
use crate::output::{print_json, print_posts, print_stats, print_user, print_users};

pub async fn run(ctx: &Context, command: AdminCommands) -> Result<()> {
    let admin = ctx.require_admin().await?;

    match command {
        AdminCommands::Stats => {
            let stats = ctx.client.admin_stats().await?;
            if ctx.format.is_json() {
                return print_json(&stats);
            }
            print_stats(&stats);
        }
        AdminCommands::Users => {
            let users = ctx.client.list_users().await?;
            if ctx.format.is_json() {
                return print_json(&users);
            }
            print_users(&users);
        }
        AdminCommands::User { user_id } => {
            ctx.ensure(can_manage_user(Some(admin), user_id, UserAction::View))?;
            let user = ctx.client.get_user(user_id).await?;
            if ctx.format.is_json() {
                return print_json(&user);
            }
            print_user(&user);
        }
        AdminCommands::UpdateUser(args) => {
            let user_id = args.user_id;
            let update = admin_update(args);
            update.validate()?;

            let action = UserAction::Update {
                revokes_admin: update.is_admin == Some(false),
            };
            ctx.ensure(can_manage_user(Some(admin), user_id, action))?;

            let user = ctx.client.update_user(user_id, &update).await?;
            if ctx.format.is_json() {
                return print_json(&user);
            }
            println!("Updated user {}", user.id);
        }
        AdminCommands::DeleteUser { user_id } => {
            ctx.ensure(can_manage_user(Some(admin), user_id, UserAction::Delete))?;
            let response = ctx.client.delete_user(user_id).await?;
            if ctx.format.is_json() {
                return print_json(&response);
            }
            println!("{}", response.message);
        }
        AdminCommands::Posts => {
            let posts = ctx.client.admin_posts().await?;
            if ctx.format.is_json() {
                return print_json(&posts);
            }
            let no_grants: [PermissionGrant; 0] = [];
            let rows: Vec<_> = posts
                .into_iter()
                .map(|post| {
                    let ops = allowed_operations(Some(admin), &post, &no_grants[..]);
                    (post, ops)
                })
                .collect();
            print_posts(&rows);
        }
    }

    Ok(())
}

fn admin_update(args: UpdateUserArgs) -> UserAdminUpdate {
    UserAdminUpdate {
        email: args.email,
        full_name: args.full_name,
        is_active: args.active,
        is_admin: args.admin,
    }
}
