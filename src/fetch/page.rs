//! Page model and the page source abstraction.

use serde_json::Value;

use crate::error_handling::FetchError;

/// One raw row of the `value` array.
///
/// Fields that are absent, not strings, or empty are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRow {
    /// `CarParkID`
    pub carpark_id: Option<String>,
    /// `Location`, `"<lat> <lon>"`
    pub location: Option<String>,
}

/// Rows returned for a single offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Rows in response order
    pub rows: Vec<PageRow>,
}

impl Page {
    /// Extracts rows from a decoded response body.
    ///
    /// A body without a `value` array is an empty page.
    pub fn from_json(body: &Value) -> Self {
        let rows = match body.get("value").and_then(Value::as_array) {
            Some(values) => values.iter().map(PageRow::from_json).collect(),
            None => {
                if body.get("value").is_some() {
                    log::warn!("Response `value` field is not an array; treating page as empty");
                }
                Vec::new()
            }
        };
        Page { rows }
    }

    /// Whether the page carries no rows (end of data).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PageRow {
    fn from_json(row: &Value) -> Self {
        PageRow {
            carpark_id: non_empty_str(row, "CarParkID"),
            location: non_empty_str(row, "Location"),
        }
    }
}

fn non_empty_str(row: &Value, field: &str) -> Option<String> {
    row.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Anything that can return the page at a given `$skip` offset.
///
/// Implemented by [`DataMallClient`](super::DataMallClient) for the live
/// endpoint.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the page starting at `offset`.
    async fn fetch_page(&self, offset: u64) -> Result<Page, FetchError>;
}
