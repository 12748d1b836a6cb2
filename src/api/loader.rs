use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::TestData;
use crate::error::{ChartError, ChartResult};

/// Location of the dataset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Path(PathBuf::from("data.json"))
    }
}

impl DataSource {
    /// Interprets a command-line style argument: `http(s)://` prefixes are
    /// URLs, anything else is a file path.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.to_owned())
        } else {
            DataSource::Path(PathBuf::from(arg))
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }
}

/// Decodes a `TestData` document.
pub fn parse_test_data(input: &str) -> ChartResult<TestData> {
    serde_json::from_str(input)
        .map_err(|err| ChartError::LoadFailure(format!("invalid data document: {err}")))
}

/// Reads and decodes the dataset. Called once per chart; there is no retry.
pub fn load_test_data(source: &DataSource) -> ChartResult<TestData> {
    let body = match source {
        DataSource::Path(path) => fs::read_to_string(path).map_err(|err| {
            ChartError::LoadFailure(format!("cannot read `{}`: {err}", path.display()))
        })?,
        DataSource::Url(url) => fetch_url(url)?,
    };
    let data = parse_test_data(&body)?;
    info!(
        source = %source.describe(),
        variations = data.variations.len(),
        days = data.data.len(),
        "dataset loaded"
    );
    Ok(data)
}

#[cfg(feature = "http-source")]
fn fetch_url(url: &str) -> ChartResult<String> {
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|err| ChartError::LoadFailure(format!("http client error: {err}")))?;
    let response = client
        .get(url)
        .send()
        .map_err(|err| ChartError::LoadFailure(format!("request to `{url}` failed: {err}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ChartError::LoadFailure(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }
    response
        .text()
        .map_err(|err| ChartError::LoadFailure(format!("failed to read response body: {err}")))
}

#[cfg(not(feature = "http-source"))]
fn fetch_url(url: &str) -> ChartResult<String> {
    Err(ChartError::LoadFailure(format!(
        "cannot fetch `{url}`: built without the `http-source` feature"
    )))
}
