use anyhow::{anyhow, Context as _, Result};
use tokio::io::AsyncWriteExt;

use board_client::ByteRange;

use super::Context;
use crate::cli::DownloadArgs;

pub fn stream_url(ctx: &Context, post_id: i64) -> Result<()> {
    println!("{}", ctx.client.stream_url(post_id));
    Ok(())
}

pub async fn download(ctx: &Context, args: DownloadArgs) -> Result<()> {
    ctx.require_session().await?;

    let range = match args.range {
        Some(ref range) => Some(
            ByteRange::parse(range)
                .ok_or_else(|| anyhow!("Invalid byte range '{}'", range))?,
        ),
        None => None,
    };

    let mut stream = ctx.client.open_stream(args.post_id, range).await?;
    let mut file = tokio::fs::File::create(&args.output)
        .await
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next_chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    match (stream.content_range.as_deref(), stream.total_size()) {
        (Some(range), _) => println!("Wrote {} bytes ({})", written, range),
        (None, Some(total)) => println!("Wrote {} of {} bytes", written, total),
        (None, None) => println!("Wrote {} bytes", written),
    }
    Ok(())
}
