//! Terminal front end for the profile form.
//!
//! Applies field edits and season toggles to a fresh draft, shows the
//! snapshot, and submits it once. Outcome notifications are printed.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use profile_core::{
    ChannelSink, FormConfig, FormHandle, FieldStore, NotificationKind, ReqwestTransport, Season,
    SubmissionController, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "profile-form", about = "Fill in and submit the personal profile form")]
struct Args {
    /// Set a field from text, e.g. `--set firstName=Anna --set age=30`.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    edits: Vec<(String, String)>,

    /// Toggle a favorite season (winter, spring, summer, autumn).
    #[arg(long = "season", value_name = "SEASON")]
    seasons: Vec<Season>,

    /// Acceptor URL; overrides PROFILE_FORM__ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Check required fields and the age range before sending.
    #[arg(long)]
    strict: bool,

    /// Print the draft without sending it.
    #[arg(long)]
    dry_run: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got {s:?}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = FormConfig::load().context("loading configuration")?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    config.strict |= args.strict;

    let form = FormHandle::new(FieldStore::new(config.seed.clone()));
    for (field, value) in &args.edits {
        form.set_raw(field, value)
            .with_context(|| format!("setting {field}"))?;
    }
    for season in &args.seasons {
        form.toggle_season(*season);
    }

    let mut shown = serde_json::to_value(&*form.snapshot())?;
    if let Some(password) = shown.get_mut("password").filter(|p| p.as_str() != Some("")) {
        *password = "********".into();
    }
    println!("{}", serde_json::to_string_pretty(&shown)?);

    if args.dry_run {
        return Ok(());
    }

    let timeout = Duration::from_secs(config.timeout_secs.max(1));
    let (sink, mut notifications) = ChannelSink::channel();
    let controller = SubmissionController::new(
        form,
        config.client(),
        ReqwestTransport::new(timeout)?,
        sink,
    )
    .strict(config.strict)
    .with_timeout(timeout);

    let outcome = controller.submit().await;
    while let Ok(n) = notifications.try_recv() {
        let marker = match n.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Failure => "✘",
            NotificationKind::Cleared => "•",
        };
        println!("{marker} {}: {}", n.title, n.description);
    }

    match outcome {
        SubmitOutcome::Sent => Ok(()),
        SubmitOutcome::Failed(err) => bail!("submission failed: {err}"),
        SubmitOutcome::Ignored => bail!("submission already in flight"),
    }
}
