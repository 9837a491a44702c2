//! `search` and `photo` command handlers.

use std::path::Path;

use leadscout_core::AppConfig;
use leadscout_places::{search_places, EnrichedResult, PlacesClient, PlacesConfig, SearchOutcome};

const NAME_WIDTH: usize = 32;
const DASH: &str = "\u{2014}";

fn build_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    PlacesClient::new(PlacesConfig::from_app_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))
}

/// Run a places search and print the enriched results.
///
/// Items whose details could not be fetched are still printed, flagged as
/// partial.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the query is blank, or
/// the very first search page fails.
pub(crate) async fn run_search(config: &AppConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let outcome = search_places(&client, query).await?;
    tracing::info!(
        query,
        status = outcome_status(&outcome),
        results = outcome.results().len(),
        "search finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&json_report(&outcome))?);
        return Ok(());
    }

    match outcome {
        SearchOutcome::NoResults => println!("no places found for \"{query}\""),
        SearchOutcome::Results(results) => {
            println!("{}", header_row());
            for result in &results {
                println!("{}", format_row(result));
            }
            let partial = results.iter().filter(|r| r.is_partial()).count();
            println!();
            println!("{} places ({partial} partial)", results.len());
        }
    }

    Ok(())
}

/// Download the binary behind a photo URL from a previous search.
///
/// # Errors
///
/// Returns an error if the URL is not a Places photo URL, the download
/// fails, or the file cannot be written.
pub(crate) async fn run_photo_download(
    config: &AppConfig,
    url: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let photo = client.fetch_photo(url).await?;
    tokio::fs::write(output, &photo.bytes).await?;

    println!(
        "wrote {} bytes ({}) to {}",
        photo.bytes.len(),
        photo.content_type.as_deref().unwrap_or("unknown type"),
        output.display()
    );
    Ok(())
}

fn outcome_status(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::NoResults => "no_results",
        SearchOutcome::Results(_) => "ok",
    }
}

/// `{status, results}` document printed by `search --json`, matching the
/// server's search payload.
fn json_report(outcome: &SearchOutcome) -> serde_json::Value {
    serde_json::json!({
        "status": outcome_status(outcome),
        "results": outcome.results(),
    })
}

fn header_row() -> String {
    format!(
        "{:<width$}  {:<7}{:<17}ADDRESS",
        "NAME",
        "RATING",
        "PHONE",
        width = NAME_WIDTH
    )
}

fn format_row(result: &EnrichedResult) -> String {
    let rating = result
        .rating
        .map_or_else(|| DASH.to_string(), |r| format!("{r:.1}"));
    let mut row = format!(
        "{:<width$}  {:<7}{:<17}{}",
        truncate(&result.name, NAME_WIDTH),
        rating,
        result.phone.as_deref().unwrap_or(DASH),
        result.address.as_deref().unwrap_or(DASH),
        width = NAME_WIDTH
    );
    if let Some(error) = &result.error {
        row.push_str(&format!("  [partial: {error}]"));
    }
    row
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        let kept: String = value.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str) -> EnrichedResult {
        EnrichedResult {
            place_id: Some("p1".to_string()),
            name: name.to_string(),
            address: Some("1 Main St, Boston, MA".to_string()),
            website: None,
            phone: Some("(617) 555-0100".to_string()),
            photo_url: None,
            types: Vec::new(),
            rating: Some(4.25),
            user_ratings_total: None,
            business_status: None,
            opening_hours: Vec::new(),
            maps_url: None,
            error: None,
        }
    }

    #[test]
    fn json_report_tags_no_results() {
        let report = json_report(&SearchOutcome::NoResults);
        assert_eq!(report["status"], "no_results");
        assert_eq!(report["results"], serde_json::json!([]));
    }

    #[test]
    fn json_report_wraps_results_with_ok_status() {
        let report = json_report(&SearchOutcome::Results(vec![result("Bean There")]));
        assert_eq!(report["status"], "ok");
        assert_eq!(report["results"][0]["name"], "Bean There");
        assert_eq!(report["results"][0]["place_id"], "p1");
    }

    #[test]
    fn truncate_leaves_short_values_alone() {
        assert_eq!(truncate("Bean There", 32), "Bean There");
    }

    #[test]
    fn truncate_shortens_long_values_with_ellipsis() {
        let long = "A".repeat(40);
        let out = truncate(&long, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn format_row_includes_rating_phone_and_address() {
        let row = format_row(&result("Bean There"));
        assert!(row.starts_with("Bean There"));
        assert!(row.contains("4.2") || row.contains("4.3"));
        assert!(row.contains("(617) 555-0100"));
        assert!(row.ends_with("1 Main St, Boston, MA"));
    }

    #[test]
    fn format_row_flags_partial_results() {
        let mut partial = result("Gone Cafe");
        partial.phone = None;
        partial.error = Some("details request failed: NOT_FOUND".to_string());
        let row = format_row(&partial);
        assert!(row.contains(DASH));
        assert!(row.ends_with("[partial: details request failed: NOT_FOUND]"));
    }
}
