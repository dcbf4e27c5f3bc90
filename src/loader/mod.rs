//! Loads tweet datasets from CSV files, JSON files, or a JSON HTTP API.
//!
//! The source type is inferred from the path extension or URL scheme when not
//! given explicitly, mirroring how datasets are handed to the pipeline in
//! practice (a file dump or an export endpoint).

mod sample;

pub use sample::SampleDataProvider;

use crate::error::{AppError, Result};
use crate::models::TweetRecord;
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info};

/// Supported dataset source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceType {
    /// CSV file with `TweetID,CreateDate,Antisemitic,text` headers.
    Csv,
    /// JSON file containing an array of records.
    Json,
    /// HTTP(S) endpoint returning a JSON array of records.
    Api,
}

impl SourceType {
    /// Infers the source type from the source string.
    pub fn infer(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(SourceType::Api)
        } else if source.ends_with(".csv") {
            Ok(SourceType::Csv)
        } else if source.ends_with(".json") {
            Ok(SourceType::Json)
        } else {
            Err(AppError::Cli(format!(
                "Unable to infer source type for '{source}'. Pass --source-type."
            )))
        }
    }
}

/// Parses tweet records out of any supported source.
pub struct DataLoader {
    client: reqwest::Client,
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Loads all records from `source`, inferring the type when `source_type`
    /// is `None`.
    pub async fn load(
        &self,
        source: &str,
        source_type: Option<SourceType>,
    ) -> Result<Vec<TweetRecord>> {
        let source_type = match source_type {
            Some(t) => t,
            None => SourceType::infer(source)?,
        };
        debug!("Loading {:?} source: {}", source_type, source);

        let records = match source_type {
            SourceType::Csv => self.load_csv(source)?,
            SourceType::Json => self.load_json(source)?,
            SourceType::Api => self.load_api(source).await?,
        };

        info!("Loaded {} records from {}", records.len(), source);
        Ok(records)
    }

    fn load_csv(&self, path: &str) -> Result<Vec<TweetRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<TweetRecord>, _>>()?;
        Ok(records)
    }

    fn load_json(&self, path: &str) -> Result<Vec<TweetRecord>> {
        let file = File::open(path)?;
        let records = serde_json::from_reader(BufReader::new(file))?;
        Ok(records)
    }

    async fn load_api(&self, url: &str) -> Result<Vec<TweetRecord>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let records = response.json::<Vec<TweetRecord>>().await?;
        Ok(records)
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tweetwatch-{}-{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn infers_source_types() {
        assert_eq!(SourceType::infer("data/tweets.csv").unwrap(), SourceType::Csv);
        assert_eq!(SourceType::infer("dump.json").unwrap(), SourceType::Json);
        assert_eq!(
            SourceType::infer("https://example.com/tweets").unwrap(),
            SourceType::Api
        );
        assert!(SourceType::infer("tweets.parquet").is_err());
    }

    #[tokio::test]
    async fn loads_records_from_csv() {
        let path = temp_file(
            "load.csv",
            "TweetID,CreateDate,Antisemitic,text\n\
             t1,2021-03-01 10:00:00,1,saw a gun today\n\
             t2,2021-03-01 11:00:00,0,lovely weather\n",
        );

        let records = DataLoader::new()
            .load(path.to_str().unwrap(), Some(SourceType::Csv))
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tweet_id, "t1");
        assert!(records[0].antisemitic);
        assert!(!records[1].antisemitic);
        assert!(records[0].created_at().is_some());
    }

    #[tokio::test]
    async fn loads_records_from_json_file() {
        let path = temp_file(
            "load.json",
            r#"[{"TweetID":"j1","CreateDate":"2021-03-01T10:00:00+00:00","Antisemitic":1,"text":"a knife was mentioned"}]"#,
        );

        let records = DataLoader::new()
            .load(path.to_str().unwrap(), None)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tweet_id, "j1");
    }

    #[tokio::test]
    async fn loads_records_from_json_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tweets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"TweetID":"a1","Antisemitic":0,"text":"hello"},{"TweetID":"a2","Antisemitic":1,"text":"a grenade"}]"#)
            .create_async()
            .await;

        let url = format!("{}/tweets", server.url());
        let records = DataLoader::new().load(&url, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert!(records[1].antisemitic);
    }

    #[tokio::test]
    async fn api_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tweets")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/tweets", server.url());
        let result = DataLoader::new().load(&url, None).await;
        assert!(matches!(result, Err(AppError::Fetch(_))));
    }
}
