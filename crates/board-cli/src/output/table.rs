use comfy_table::{Cell, Table};

use board_model::{AdminStats, Post, User};
use board_rbac::{Operation, PermissionGrant};

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn field(table: &mut Table, name: &str, value: impl ToString) {
    table.add_row(vec![Cell::new(name), Cell::new(value)]);
}

fn operations(ops: &[Operation]) -> String {
    ops.iter().map(|op| op.as_str()).collect::<Vec<_>>().join(", ")
}

pub fn print_user(user: &User) {
    let mut table = Table::new();
    field(&mut table, "ID", user.id);
    field(&mut table, "Email", &user.email);
    field(&mut table, "Name", user.display_name());
    field(&mut table, "Role", user.role_label());
    field(&mut table, "Active", yes_no(user.is_active));
    field(&mut table, "Joined", user.created_at.format("%Y-%m-%d"));
    println!("{table}");
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("No users.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Email", "Name", "Role", "Active"]);
    for user in users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.email),
            Cell::new(user.full_name.as_deref().unwrap_or("-")),
            Cell::new(user.role_label()),
            Cell::new(yes_no(user.is_active)),
        ]);
    }
    println!("{table}");
}

pub fn print_posts(posts: &[(Post, Vec<Operation>)]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Visibility", "Size", "Author", "You can"]);
    for (post, ops) in posts {
        table.add_row(vec![
            Cell::new(post.id),
            Cell::new(&post.title),
            Cell::new(post.visibility_label()),
            Cell::new(post.video_size_display()),
            Cell::new(post.author_email().unwrap_or("-")),
            Cell::new(operations(ops)),
        ]);
    }
    println!("{table}");
}

pub fn print_post(post: &Post, ops: &[Operation]) {
    let mut table = Table::new();
    field(&mut table, "ID", post.id);
    field(&mut table, "Title", &post.title);
    if let Some(ref description) = post.description {
        field(&mut table, "Description", description);
    }
    field(&mut table, "Visibility", post.visibility_label());
    field(
        &mut table,
        "Video",
        format!("{} ({})", post.video_original_name, post.video_size_display()),
    );
    field(&mut table, "Author", post.author_email().unwrap_or("-"));
    field(&mut table, "Created", post.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(updated) = post.updated_at {
        field(&mut table, "Updated", updated.format("%Y-%m-%d %H:%M"));
    }
    field(&mut table, "You can", operations(ops));
    println!("{table}");
}

pub fn print_grants(grants: &[PermissionGrant]) {
    if grants.is_empty() {
        println!("No grants.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["User", "Grantee", "Level", "Granted"]);
    for grant in grants {
        table.add_row(vec![
            Cell::new(grant.user_id),
            Cell::new(grant.grantee_label()),
            Cell::new(grant.permission_type),
            Cell::new(grant.created_at.format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
}

pub fn print_stats(stats: &AdminStats) {
    let mut table = Table::new();
    table.set_header(vec!["", "Total", "Active / Public", "Inactive / Private"]);
    table.add_row(vec![
        Cell::new("Users"),
        Cell::new(stats.total_users),
        Cell::new(stats.active_users),
        Cell::new(stats.inactive_users()),
    ]);
    table.add_row(vec![
        Cell::new("Posts"),
        Cell::new(stats.total_posts),
        Cell::new(stats.public_posts),
        Cell::new(stats.private_posts()),
    ]);
    println!("{table}");
}
