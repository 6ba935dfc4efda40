use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Percentage bar for uploads, drawn on stderr.
pub fn upload_bar(file_name: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos:>3}%")?
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    pb.set_message(format!("Uploading {file_name}"));
    Ok(pb)
}
