use wbx_rs::api::parse_envelope;
use wbx_rs::models::{CountryRecord, Entry, Meta, Observation};
use wbx_rs::WbxError;

#[test]
fn parse_sample_series_payload() {
    let sample = r#"
    [
      {"page":1,"pages":1,"per_page":"2","total":2},
      [
        {
          "indicator":{"id":"NY.GDP.MKTP.KD.ZG","value":"GDP growth (annual %)"},
          "country":{"id":"DE","value":"Germany"},
          "countryiso3code":"DEU",
          "date":"2019",
          "value":1.1,
          "unit":"",
          "obs_status":null,
          "decimal":1
        },
        {
          "indicator":{"id":"NY.GDP.MKTP.KD.ZG","value":"GDP growth (annual %)"},
          "country":{"id":"DE","value":"Germany"},
          "countryiso3code":"DEU",
          "date":"2020",
          "value":null,
          "unit":"",
          "obs_status":null,
          "decimal":1
        }
      ]
    ]
    "#;

    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let (meta, body) = parse_envelope(v).unwrap();
    assert_eq!(meta.page, 1);
    assert_eq!(meta.pages, 1);
    assert_eq!(meta.per_page, 2);
    assert_eq!(meta.total, 2);

    let entries: Vec<Entry> = serde_json::from_value(body.unwrap()).unwrap();
    let obs: Vec<Observation> = entries.into_iter().map(Observation::from).collect();
    assert_eq!(obs[0].country_code, "DEU");
    assert_eq!(obs[0].year, 2019);
    assert_eq!(obs[0].value, Some(1.1));
    // Explicit null value survives as None, never zero.
    assert_eq!(obs[1].value, None);
}

#[test]
fn per_page_accepts_numbers_too() {
    let meta: Meta =
        serde_json::from_str(r#"{"page":2,"pages":3,"per_page":50,"total":120}"#).unwrap();
    assert_eq!(meta.per_page, 50);
}

#[test]
fn blank_iso3_falls_back_to_short_id() {
    let entry: Entry = serde_json::from_str(
        r#"{
            "indicator":{"id":"FP.CPI.TOTL.ZG","value":"Inflation"},
            "country":{"id":"XK","value":"Kosovo"},
            "countryiso3code":"",
            "date":"2021",
            "value":3.4
        }"#,
    )
    .unwrap();
    let obs = Observation::from(entry);
    assert_eq!(obs.country_code, "XK");
}

#[test]
fn unparseable_date_becomes_year_zero() {
    let entry: Entry = serde_json::from_str(
        r#"{
            "indicator":{"id":"FP.CPI.TOTL.ZG","value":"Inflation"},
            "country":{"id":"DE","value":"Germany"},
            "countryiso3code":"DEU",
            "date":"2020M06",
            "value":1.0
        }"#,
    )
    .unwrap();
    assert_eq!(Observation::from(entry).year, 0);
}

#[test]
fn malformed_envelopes_are_hard_errors() {
    let not_array = serde_json::json!({"page": 1});
    assert!(matches!(
        parse_envelope(not_array),
        Err(WbxError::RemoteFormat(_))
    ));

    let empty = serde_json::json!([]);
    assert!(matches!(parse_envelope(empty), Err(WbxError::RemoteFormat(_))));

    let api_error = serde_json::json!([
        {"message": [{"id": "120", "key": "Invalid value", "value": "The provided parameter value is not valid"}]}
    ]);
    assert!(matches!(
        parse_envelope(api_error),
        Err(WbxError::RemoteFormat(_))
    ));
}

#[test]
fn meta_only_envelope_is_a_legitimately_empty_result() {
    let v = serde_json::json!([{"page":1,"pages":0,"per_page":1000,"total":0}]);
    let (meta, body) = parse_envelope(v).unwrap();
    assert_eq!(meta.total, 0);
    assert!(body.is_none());
}

#[test]
fn catalog_records_filter_aggregates_by_capital_city() {
    let sample = r#"
    [
      {"page":1,"pages":1,"per_page":"300","total":3},
      [
        {"id":"DEU","iso2Code":"DE","name":"Germany","capitalCity":"Berlin"},
        {"id":"EUU","iso2Code":"EU","name":"European Union","capitalCity":""},
        {"id":"USA","iso2Code":"US","name":"United States","capitalCity":"Washington D.C."}
      ]
    ]
    "#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let (_, body) = parse_envelope(v).unwrap();
    let records: Vec<CountryRecord> = serde_json::from_value(body.unwrap()).unwrap();
    let kept: Vec<&str> = records
        .iter()
        .filter(|r| !r.is_aggregate())
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(kept, vec!["DEU", "USA"]);
}
