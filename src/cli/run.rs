use std::io::{self, Write};
use std::time::Duration;

use tracing::{error, info, warn};

use crate::app::{GleanerError, Result};
use crate::cli::Cli;
use crate::collector::{collect_comments, CollectionResult};
use crate::config::Config;
use crate::login;
use crate::post::{self, PostKind};
use crate::report::{save_report, Report};
use crate::surface::{ChromeSurface, RenderSurface};
use crate::viewcount;

const HOME_URL: &str = "https://www.instagram.com/";
const HOME_SETTLE: Duration = Duration::from_secs(2);

/// Run one end-to-end collection job.
///
/// Order matters: metadata first (no login needed), then login, view count
/// and comments in one browser session. A fatal error past the metadata
/// step is logged and the report is still written with whatever
/// accumulated.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.headed {
        config.surface.headless = false;
    }

    let raw_url = match cli.url {
        Some(url) => url,
        None => prompt("Enter Instagram post URL: ")?,
    };
    let post_url = post::parse_post_url(&raw_url)?;
    println!("Processing URL: {}", post_url.canonical);

    let credentials = resolve_credentials(cli.username, cli.password)?;
    let with_login = credentials.is_some();

    let mut surface = ChromeSurface::launch(&config.surface).await?;
    let outcome = collect(&surface, &config, &post_url, credentials).await;
    let _ = surface.close().await;

    let (post_info, collection) = outcome?;

    println!("\nSaving collected data...");
    let report = Report::new(
        &post_url.canonical,
        Some(post_info),
        collection.as_ref(),
        with_login,
    )?;
    let path = save_report(&report, &cli.output)?;
    println!("Result file: {}", path.display());
    match &collection {
        Some(collection) => println!(
            "Total of {} comments were collected.",
            collection.comments.len()
        ),
        None => println!("Comments were not collected."),
    }
    Ok(())
}

/// Run the post-metadata, login, view-count and comment steps.
///
/// `None` for the collection half means comment collection was skipped or
/// failed before reaching the feed; the report records that as absent
/// rather than as an empty run.
async fn collect(
    surface: &ChromeSurface,
    config: &Config,
    post_url: &post::PostUrl,
    credentials: Option<(String, String)>,
) -> Result<(post::PostInfo, Option<CollectionResult>)> {
    println!("\n1. Collecting basic post information...");
    let mut post_info = post::fetch_post_info(surface, post_url)
        .await?
        .ok_or_else(|| GleanerError::Other("could not retrieve post information".into()))?;

    println!("Post ID: {}", post_info.post_id);
    println!("Author: {}", post_info.username.as_deref().unwrap_or("?"));
    println!(
        "Likes: {}  Comments: {}",
        post_info.likes.map(|n| n.to_string()).unwrap_or_else(|| "?".into()),
        post_info
            .comments_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".into()),
    );

    let Some((username, password)) = credentials else {
        println!("Login credentials not provided. Skipping view count and comment collection.");
        return Ok((post_info, None));
    };

    println!("\n2. Logging into Instagram...");
    match login::login(surface, &username, &password).await {
        Ok(true) => {}
        Ok(false) => {
            warn!("Login failed; skipping view count and comment collection");
            return Ok((post_info, None));
        }
        Err(e) => {
            error!("Login error: {}", e);
            return Ok((post_info, None));
        }
    }

    if post_url.kind == PostKind::Reel {
        if let Some(author) = post_info.username.clone() {
            println!("\n3. Finding view count...");
            match viewcount::find_post_views(surface, &author, &post_url.id).await {
                Ok(views) => post_info.views = views,
                Err(e) => warn!("View count lookup failed: {}", e),
            }
        } else {
            info!("Author unknown, skipping view count lookup");
        }
    } else {
        info!("Not a reel, skipping view count lookup");
    }

    println!("\n4. Collecting comments...");
    // Touch the homepage first so the session cookies settle
    if let Err(e) = surface.navigate(HOME_URL).await {
        warn!("Homepage visit failed: {}", e);
    } else {
        surface.pause(HOME_SETTLE).await;
    }

    let collection = match collect_comments(surface, &post_url.canonical, &config.collector).await {
        Ok(collection) => Some(collection),
        Err(e) => {
            // Keep the metadata already gathered instead of failing the run
            error!("Comment collection failed: {}", e);
            None
        }
    };

    Ok((post_info, collection))
}

fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<(String, String)>> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some((username, password))),
        (Some(username), None) => {
            let password = prompt("Enter Instagram password: ")?;
            Ok(Some((username, password)))
        }
        (None, Some(password)) => {
            let username = prompt("Enter Instagram username: ")?;
            Ok(Some((username, password)))
        }
        (None, None) => {
            let choice =
                prompt("Login is required to collect comments. Would you like to login? (y/n): ")?;
            if choice.eq_ignore_ascii_case("y") {
                let username = prompt("Enter Instagram username: ")?;
                let password = prompt("Enter Instagram password: ")?;
                Ok(Some((username, password)))
            } else {
                Ok(None)
            }
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
