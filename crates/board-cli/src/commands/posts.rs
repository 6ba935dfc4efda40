use anyhow::{anyhow, Context as _, Result};
use tokio::sync::watch;
use tracing::debug;

use board_model::{PostUpdate, VideoUpload};
use board_rbac::{allowed_operations, Operation, PermissionGrant, Route};

use super::Context;
use crate::cli::{EditArgs, PostCommands, UploadArgs};
use crate::output::progress::upload_bar;
use crate::output::{print_json, print_post, print_posts};

pub async fn run(ctx: &Context, command: PostCommands) -> Result<()> {
    match command {
        PostCommands::List => list(ctx).await,
        PostCommands::Show { post_id } => show(ctx, post_id).await,
        PostCommands::Upload(args) => upload(ctx, args).await,
        PostCommands::Edit(args) => edit(ctx, args).await,
        PostCommands::Publish { post_id } => set_visibility(ctx, post_id, true).await,
        PostCommands::Unpublish { post_id } => set_visibility(ctx, post_id, false).await,
        PostCommands::Delete { post_id } => delete(ctx, post_id).await,
    }
}

const NO_GRANTS: [PermissionGrant; 0] = [];

async fn list(ctx: &Context) -> Result<()> {
    let principal = ctx.require_session().await?;
    let posts = ctx.client.list_posts().await?;

    if ctx.format.is_json() {
        return print_json(&posts);
    }

    let rows: Vec<_> = posts
        .into_iter()
        .map(|post| {
            let ops = allowed_operations(Some(principal), &post, &NO_GRANTS[..]);
            (post, ops)
        })
        .collect();
    print_posts(&rows);
    Ok(())
}

async fn show(ctx: &Context, post_id: i64) -> Result<()> {
    let principal = ctx.require_session().await?;
    // Visibility through grants is decided by the service.
    let post = ctx.client.get_post(post_id).await?;

    if ctx.format.is_json() {
        return print_json(&post);
    }

    let mut ops = allowed_operations(Some(principal), &post, &NO_GRANTS[..]);
    if !ops.contains(&Operation::View) {
        ops.insert(0, Operation::View);
    }
    print_post(&post, &ops);
    Ok(())
}

async fn upload(ctx: &Context, args: UploadArgs) -> Result<()> {
    ctx.require_session().await?;

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Please select a video file"))?;
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut upload = VideoUpload::new(args.title, file_name, content).with_visibility(!args.private);
    if let Some(description) = args.description {
        upload = upload.with_description(description);
    }
    upload.validate()?;

    let bar = upload_bar(&upload.file_name)?;
    let (tx, mut rx) = watch::channel(0u8);
    let reporter = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let percent = *rx.borrow_and_update();
                bar.set_position(u64::from(percent));
            }
        })
    };

    let result = ctx.client.upload_post_with_progress(upload, &tx).await;
    drop(tx);
    if let Err(e) = reporter.await {
        debug!(error = %e, "Progress reporter did not finish cleanly");
    }
    if result.is_ok() {
        bar.finish();
    } else {
        bar.abandon();
    }
    let post = result?;

    if ctx.format.is_json() {
        return print_json(&post);
    }
    println!("Uploaded post {} ({})", post.id, Route::Post(post.id));
    Ok(())
}

async fn edit(ctx: &Context, args: EditArgs) -> Result<()> {
    let update = PostUpdate {
        title: args.title,
        description: args.description,
        is_public: None,
    };
    update.validate()?;

    ctx.authorized_post(args.post_id, Operation::Edit).await?;
    let post = ctx.client.update_post(args.post_id, &update).await?;

    if ctx.format.is_json() {
        return print_json(&post);
    }
    println!("Updated post {}", post.id);
    Ok(())
}

async fn set_visibility(ctx: &Context, post_id: i64, is_public: bool) -> Result<()> {
    ctx.authorized_post(post_id, Operation::Edit).await?;
    let post = ctx.client.set_visibility(post_id, is_public).await?;

    if ctx.format.is_json() {
        return print_json(&post);
    }
    println!("Post {} is now {}", post.id, post.visibility_label());
    Ok(())
}

async fn delete(ctx: &Context, post_id: i64) -> Result<()> {
    ctx.authorized_post(post_id, Operation::Delete).await?;
    let response = ctx.client.delete_post(post_id).await?;

    if ctx.format.is_json() {
        return print_json(&response);
    }
    println!("{}", response.message);
    Ok(())
}
