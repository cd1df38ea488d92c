//! Roll-call vote harvester.
//!
//! Crawl units are legislative periods (Dönem, Yasama Yılı). For each
//! period the master transcript list is fetched and every "Açık Oylama
//! Sonuçları" session page on it is visited, with the mandatory pause
//! between pages. Bills and per-member outcomes are merged into the
//! dataset, which is persisted after each period so an interrupted run
//! loses at most the period in flight.

use crate::config;
use crate::extract::extract_rows;
use crate::fetch::PageClient;
use crate::models::{bill_id, Bill, Dataset, Mp};
use crate::store;
use crate::utils::title_case;
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::error::Error;
use tokio::time::sleep;
use tracing::{info, instrument, warn};
use url::Url;

/// Anchor text that marks a roll-call results page on the master list.
const SESSION_LINK_TEXT: &str = "Açık Oylama Sonuçları";

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static PANEL: Lazy<Selector> = Lazy::new(|| Selector::parse("div.panel").unwrap());
static PANEL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static VOTE_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#tblTbmmOylama").unwrap());

/// Vote rows carry province, surname, given name, party and the outcome at
/// index 6; anything narrower is malformed and skipped.
const VOTE_ROW_MIN_COLUMNS: usize = 7;

/// Run the full voting harvest across all configured periods.
#[instrument(level = "info", skip_all, fields(data_file = %data_file))]
pub async fn run(data_file: &str) -> Result<(), Box<dyn Error>> {
    let client = PageClient::new()?;
    let mut dataset = store::load_dataset(data_file);

    for &(donem, yasama_yili) in config::PERIODS {
        let master_url = config::period_url(donem, yasama_yili);
        info!(donem, yasama_yili, "Fetching master transcript list");

        let links = match client.fetch_and_parse(&master_url).await {
            Ok(doc) => session_links(&doc),
            Err(e) => {
                warn!(donem, yasama_yili, error = %e, "Master page unavailable; skipping period");
                continue;
            }
        };
        info!(
            count = links.len(),
            donem, yasama_yili, "Found voting sessions in period"
        );

        for link in &links {
            match client.fetch_and_parse(link).await {
                Ok(doc) => {
                    harvest_voting_page(&doc, &mut dataset);
                    info!(url = %link, "Harvested voting page");
                }
                Err(e) => {
                    warn!(url = %link, error = %e, "Voting page unavailable; skipping");
                }
            }
            sleep(config::VOTE_PAGE_DELAY).await;
        }

        // Checkpoint: an interruption now costs at most the next period.
        store::persist_dataset(&mut dataset, data_file)?;
        info!(donem, yasama_yili, "Period completed and persisted");
    }

    info!(
        mps = dataset.mps.len(),
        bills = dataset.bills.len(),
        "All periods completed"
    );
    Ok(())
}

/// Collect absolute URLs of every roll-call session page linked from a
/// master transcript list.
pub fn session_links(doc: &Html) -> Vec<String> {
    let base = Url::parse(config::BASE_URL).expect("base URL is valid");
    doc.select(&ANCHOR)
        .filter_map(|anchor| {
            let text: String = anchor.text().collect();
            if !text.contains(SESSION_LINK_TEXT) {
                return None;
            }
            let href = anchor.value().attr("href")?;
            base.join(href).ok().map(|url| url.to_string())
        })
        .collect()
}

/// Merge every bill and vote on one session page into the dataset.
///
/// Each panel holds one bill title and its vote table. Panels without a
/// title or table are skipped; so are rows with too few cells. Re-running
/// over the same page is a no-op thanks to the idempotent merges.
pub fn harvest_voting_page(doc: &Html, dataset: &mut Dataset) {
    for panel in doc.select(&PANEL) {
        let Some(title_el) = panel.select(&PANEL_TITLE).next() else {
            continue;
        };
        let title = title_el
            .text()
            .collect::<String>()
            .trim()
            .replace(':', "");
        if title.is_empty() {
            continue;
        }
        let id = bill_id(&title);
        dataset.upsert_bill(
            id.clone(),
            Bill {
                title,
                date: Utc::now().format("%Y-%m-%d").to_string(),
            },
        );

        let Some(table) = panel.select(&VOTE_TABLE).next() else {
            continue;
        };
        for row in extract_rows(table, VOTE_ROW_MIN_COLUMNS) {
            let surname = row.text(1);
            let given = row.text(2);
            let name = title_case(&format!("{given} {surname}"));
            if name.is_empty() {
                continue;
            }
            let mut votes = BTreeMap::new();
            votes.insert(id.clone(), row.text(6));
            dataset.upsert_mp(Mp {
                name,
                province: title_case(&row.text(0)),
                party: row.text(3),
                votes,
                ..Mp::default()
            });
        }
    }
}
