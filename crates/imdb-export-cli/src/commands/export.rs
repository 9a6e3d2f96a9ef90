use super::load_config_and_credentials;
use crate::output::Output;
use color_eyre::eyre::{eyre, Report};
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use media_sync_config::{ExportOptions, PathManager};
use media_sync_models::{ImdbItem, ImdbList};
use media_sync_sources::{ImdbClient, ImdbError, ImdbListSource};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

const AUTHORIZATION_HINT: &str =
    "IMDb rejected the session cookies. Copy fresh at-main and ubid-main values from a logged-in browser and run `imdb-export config set-cookies`.";

/// What an export run fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Watchlist,
    Lists,
    List(String),
    Ratings,
    /// Everything enabled in the `[export]` section
    All,
}

#[derive(Debug, Default, Serialize)]
pub struct ExportReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchlist: Option<ImdbList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lists: Option<Vec<ImdbList>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<ImdbItem>>,
}

pub async fn run_export(target: ExportTarget, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let (config, credentials) = load_config_and_credentials(&paths)?;
    let settings = config
        .imdb_settings(&credentials)
        .map_err(|e| eyre!("{:#}", e))?;

    let spinner = spinner(output, "Connecting to IMDb...");
    let client = match ImdbClient::from_settings(&settings).await {
        Ok(client) => client,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(report_failure(e, output));
        }
    };
    info!(user_id = ?client.credentials().user_id(), "Connected to imdb");

    spinner.set_message(format!("Exporting {}...", describe(&target)));
    let result = collect(&client, &target, &config.export).await;
    spinner.finish_and_clear();

    let report = result.map_err(|e| report_failure(e, output))?;
    render(&report, &target, output);
    Ok(())
}

/// Run the fetches `target` asks for against any list source.
pub async fn collect<S: ImdbListSource>(
    source: &S,
    target: &ExportTarget,
    options: &ExportOptions,
) -> std::result::Result<ExportReport, S::Error> {
    let mut report = ExportReport::default();

    match target {
        ExportTarget::Watchlist => report.watchlist = Some(source.get_watchlist().await?),
        ExportTarget::Lists => report.lists = Some(source.get_lists().await?),
        ExportTarget::List(id) => report.lists = Some(vec![source.get_list(id).await?]),
        ExportTarget::Ratings => report.ratings = Some(source.get_ratings().await?),
        ExportTarget::All => {
            if options.watchlist {
                report.watchlist = Some(source.get_watchlist().await?);
            }
            if options.lists {
                report.lists = Some(source.get_lists().await?);
            }
            if options.ratings {
                report.ratings = Some(source.get_ratings().await?);
            }
        }
    }

    info!(
        source = source.source_name(),
        watchlist = report.watchlist.as_ref().map(ImdbList::len),
        lists = report.lists.as_ref().map(Vec::len),
        ratings = report.ratings.as_ref().map(Vec::len),
        "Export finished"
    );
    Ok(report)
}

fn render(report: &ExportReport, target: &ExportTarget, output: &Output) {
    if !output.is_human() {
        output.json(&serde_json::to_value(report).unwrap_or_default());
        return;
    }
    if output.is_quiet() {
        return;
    }

    if let Some(watchlist) = &report.watchlist {
        output.list(watchlist);
    }
    if let Some(lists) = &report.lists {
        match (target, lists.as_slice()) {
            (ExportTarget::List(_), [list]) => output.list(list),
            _ => output.lists(lists),
        }
    }
    if let Some(ratings) = &report.ratings {
        output.ratings(ratings);
        output.success(format!("{} ratings exported", ratings.len()));
    }
}

fn report_failure(e: ImdbError, output: &Output) -> Report {
    error!(error = %e, status = ?e.status(), "IMDb export failed");
    if e.is_authorization() {
        output.error(AUTHORIZATION_HINT);
    }
    Report::new(e)
}

fn describe(target: &ExportTarget) -> String {
    match target {
        ExportTarget::Watchlist => "watchlist".to_string(),
        ExportTarget::Lists => "lists".to_string(),
        ExportTarget::List(id) => format!("list {}", id),
        ExportTarget::Ratings => "ratings".to_string(),
        ExportTarget::All => "everything".to_string(),
    }
}

fn spinner(output: &Output, message: &str) -> ProgressBar {
    if !output.is_human() || output.is_quiet() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
