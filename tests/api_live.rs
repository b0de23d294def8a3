//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use wbx_rs::api::SeriesSource;
use wbx_rs::Client;

#[tokio::test]
async fn live_catalog_contains_real_countries_only() {
    let cli = Client::default();
    let countries = cli.fetch_countries().await.unwrap();
    assert!(!countries.is_empty());
    assert!(countries.iter().any(|c| c.code == "DEU"));
    // Aggregates like the European Union must have been filtered out.
    assert!(!countries.iter().any(|c| c.code == "EUU"));
}

#[tokio::test]
async fn live_series_stays_inside_the_requested_range() {
    let cli = Client::default();
    let obs = cli
        .fetch_series(&["DEU".into()], "NY.GDP.MKTP.KD.ZG", 2019, 2020)
        .await
        .unwrap();
    assert!(!obs.is_empty());
    assert!(obs.iter().all(|o| o.country_code == "DEU"));
    assert!(obs.iter().all(|o| o.year >= 2019 && o.year <= 2020));
}
