use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Inclusive year range for series queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn to_query_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

/// Range used when the interface layer supplies none: 1990 through last year.
pub fn default_year_range() -> YearRange {
    YearRange {
        start: 1990,
        end: chrono::Utc::now().year() - 1,
    }
}

/// Metadata section returned by the API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u32),
        Str(String),
    }
    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse::<u32>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw series entry from the API (position 1 array). Only the fields the
/// engine consumes; the rest of the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub indicator: CodeName,
    pub country: CodeName,
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

/// Raw record from the country catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "capitalCity", default)]
    pub capital_city: Option<String>,
}

impl CountryRecord {
    /// Regional aggregates (e.g. "Euro area") carry a blank capital city in
    /// the catalog; real countries never do.
    pub fn is_aggregate(&self) -> bool {
        self.capital_city
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    }
}

/// A selectable country: catalog code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl From<CountryRecord> for Country {
    fn from(r: CountryRecord) -> Self {
        Self {
            code: r.id,
            name: r.name,
        }
    }
}

/// One observation for one indicator. `value: None` is a non-reporting year,
/// never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country_code: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl From<Entry> for Observation {
    fn from(e: Entry) -> Self {
        // Prefer the ISO3 field; some rows leave it blank and only fill the
        // short country id.
        let country_code = if e.countryiso3code.trim().is_empty() {
            e.country.id
        } else {
            e.countryiso3code
        };
        // An unparseable date becomes year 0, which never matches a requested
        // range.
        let year = e.date.parse::<i32>().unwrap_or(0);
        Self {
            country_code,
            year,
            value: e.value,
        }
    }
}
