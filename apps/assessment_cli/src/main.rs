use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{AssessmentApp, HttpAssessmentClient};
use shared::domain::{Rating, INDICATORS};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "assessment_cli", about = "Generate an assessment report from twelve indicator scores")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, help = "Overrides the configured server url")]
    server_url: Option<String>,
    #[arg(long)]
    password: String,
    #[arg(long, help = "Twelve comma separated scores in indicator order")]
    scores: String,
    #[arg(long, help = "Send feedback on the generated report (admin sessions only)")]
    feedback: bool,
    #[arg(long, value_parser = parse_rating)]
    rating: Option<Rating>,
    #[arg(long, default_value = "")]
    comment: String,
    #[arg(long, help = "Print the report as page markup instead of plain text")]
    html: bool,
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    Rating::from_value(raw).ok_or_else(|| format!("rating must be 1-5, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();
    let scores = render::split_scores(&args.scores)?;

    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "starting assessment client");

    let backend = HttpAssessmentClient::with_timeout(
        &settings.server_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let app = AssessmentApp::start(Arc::new(backend)).await;

    let mode = app.auth.login(&args.password).await?;
    println!("Logged in ({mode:?} session)");

    {
        let mut view = app.view.lock().await;
        for (indicator, raw) in INDICATORS.into_iter().zip(scores) {
            view.set_score(indicator, raw);
        }
    }

    let generated = app.report.generate().await;
    {
        let mut view = app.view.lock().await;
        for notice in view.take_notices() {
            eprintln!("{notice}");
        }
        if args.html {
            println!("{}", render::render_html(&view));
        } else {
            print!("{}", render::render_report(&view));
        }
    }
    generated?;

    if !args.feedback {
        return Ok(());
    }
    if !app.view.lock().await.admin_area_visible {
        return Err(anyhow!("feedback is only available to admin sessions"));
    }

    {
        let mut view = app.view.lock().await;
        view.feedback_rating = args.rating;
        view.feedback_comment = args.comment;
    }
    match app.feedback.submit().await {
        Ok(hide) => {
            if let Some(message) = app.view.lock().await.feedback_confirmation.clone() {
                println!("{message}");
            }
            hide.await?;
            Ok(())
        }
        Err(error) => {
            for notice in app.view.lock().await.take_notices() {
                eprintln!("{notice}");
            }
            Err(error.into())
        }
    }
}
