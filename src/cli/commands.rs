use std::path::PathBuf;

use chrono::Local;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::job::FetchRequest;

pub async fn fetch(
    ctx: &AppContext,
    url: &str,
    count: Option<usize>,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let count = count.unwrap_or(ctx.config.fetch.default_count);
    let request = FetchRequest::new(url, count)?;

    eprintln!("Fetching posts from {} (this may take a while)", request.url());
    let report = ctx.job().run(&request, None).await;

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    if stdout {
        println!("{}", report.document.to_json(ctx.config.export.pretty)?);
        eprintln!("Fetched {} posts", report.document.len());
        return Ok(());
    }

    let dir = output.unwrap_or_else(|| ctx.config.export.output_dir());
    let path = report
        .document
        .save(&dir, Local::now(), ctx.config.export.pretty)?;

    println!("Fetched {} posts", report.document.len());
    println!("Saved {}", path.display());
    Ok(())
}

pub fn config_path(explicit: Option<PathBuf>) -> Result<()> {
    let path = match explicit {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
