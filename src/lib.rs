//! Resolve a pair of drug names to their interaction page in a sitemap catalog,
//! then scrape that page into an [`InteractionRecord`].

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod lookup;
pub mod normalize;
pub mod output;
pub mod record;

use tracing::info;

pub use catalog::Catalog;
pub use config::{LookupRequest, Settings};
pub use error::{CatalogError, FetchError, LookupError, PersistError};
pub use fetch::Fetcher;
pub use record::{InteractionRecord, ProfessionalInfo, Reference, Severity, SeverityLevel};

/// Every catalog page for the pair, in catalog order. `NoMatch` when there are none.
pub fn resolve(catalog: &Catalog, drug1: &str, drug2: &str) -> Result<Vec<String>, LookupError> {
    let matches = lookup::find_interactions(catalog, drug1, drug2);
    if matches.is_empty() {
        return Err(LookupError::NoMatch {
            drug1: drug1.to_string(),
            drug2: drug2.to_string(),
        });
    }
    info!("{} interaction page(s) for '{}' and '{}'", matches.len(), drug1, drug2);
    Ok(matches)
}

/// A resolved lookup: every candidate page and the record scraped from the first.
#[derive(Debug)]
pub struct Interaction {
    pub matches: Vec<String>,
    pub record: InteractionRecord,
}

/// Load the catalog, resolve the pair, and scrape the first matching page.
pub fn check_interaction(
    request: &LookupRequest,
    settings: &Settings,
) -> Result<Interaction, LookupError> {
    let catalog = Catalog::load(&request.catalog_path)?;
    let matches = resolve(&catalog, &request.drug1, &request.drug2)?;
    let fetcher = Fetcher::new(settings)?;
    let record = fetcher.scrape(&matches[0])?;
    Ok(Interaction { matches, record })
}
