// Shared test helpers for mock DataMall endpoints and run configuration.

use std::path::PathBuf;

use carpark_locations::Config;
use httptest::Server;
use serde_json::{json, Value};
use url::Url;

/// Path the mock server serves pages on.
#[allow(dead_code)] // Used by other test files
pub const PATH: &str = "/ltaodataservice/CarParkAvailabilityv2";

/// Builds a config pointing at `server`, with no politeness delay and short retries.
#[allow(dead_code)] // Used by other test files
pub fn test_config(server: &Server, output: PathBuf) -> Config {
    Config {
        account_key: "test-key".to_string(),
        output,
        base_url: Url::parse(&server.url_str(PATH)).expect("Mock server URL is valid"),
        timeout_seconds: 5,
        page_delay_ms: 0,
        retry_base_delay_ms: 10,
        ..Default::default()
    }
}

/// A DataMall response body with one row per `(id, location)` pair.
#[allow(dead_code)] // Used by other test files
pub fn carpark_page(rows: &[(&str, &str)]) -> Value {
    let value: Vec<Value> = rows
        .iter()
        .map(|(id, location)| {
            json!({
                "CarParkID": id,
                "Area": "",
                "Development": format!("Development {}", id),
                "Location": location,
                "AvailableLots": 100,
                "LotType": "C",
                "Agency": "HDB"
            })
        })
        .collect();
    json!({
        "odata.metadata": "http://datamall2.mytransport.sg/ltaodataservice/$metadata#CarParkAvailability",
        "value": value
    })
}
