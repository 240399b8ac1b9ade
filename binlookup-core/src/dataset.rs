//! Remote BIN dataset: fetch, parse and scan
//!
//! The dataset is a CSV document whose header row names the columns of
//! [`BinRecord`]. Every call to [`DatasetFetcher::fetch`] performs one HTTP
//! GET and a full parse; nothing is retained between calls.

use crate::config::DatasetConfig;
use crate::error::{LookupError, Result};
use crate::query::BinQuery;
use crate::record::{BinRecord, COLUMNS};
use csv::ReaderBuilder;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// An ordered, read-only batch of dataset rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<BinRecord>,
}

impl Dataset {
    /// Parse CSV text with a header row into records.
    ///
    /// The header must name every [`BinRecord`] column. Rows are read
    /// leniently: missing trailing cells decode as empty strings and cells
    /// beyond the header are dropped, so one ragged row never hides the rest
    /// of the dataset.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Dataset::default());
        }
        if let Some(missing) = COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(LookupError::MissingColumn(missing));
        }

        let mut records = Vec::new();
        let mut ragged = 0usize;
        for row in reader.records() {
            let mut row = row?;
            if row.len() != headers.len() {
                ragged += 1;
                while row.len() < headers.len() {
                    row.push_field("");
                }
            }
            let record: BinRecord = row.deserialize(Some(&headers))?;
            records.push(record);
        }

        if ragged > 0 {
            warn!(ragged, "Dataset rows with a cell count different from the header");
        }

        Ok(Dataset { records })
    }

    /// First record whose BIN equals the query digits exactly
    pub fn find(&self, query: &BinQuery) -> Option<&BinRecord> {
        self.records
            .iter()
            .find(|record| record.bin == query.as_str())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows in dataset order
    pub fn records(&self) -> &[BinRecord] {
        &self.records
    }
}

/// Retrieves the dataset from its fixed remote location
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    client: Client,
    url: String,
}

impl DatasetFetcher {
    /// Build a fetcher with its own HTTP client
    pub fn new(config: &DatasetConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(DatasetFetcher {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    /// Dataset location
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the full dataset
    #[instrument(name = "fetch_dataset", skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Dataset> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UpstreamStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Dataset downloaded");

        let dataset = Dataset::parse(&body)?;
        debug!(rows = dataset.len(), "Dataset parsed");

        Ok(dataset)
    }
}
