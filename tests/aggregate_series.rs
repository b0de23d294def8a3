use wbx_rs::aggregate::{
    build_aligned_series, build_latest_value_rows, build_matrix, year_labels,
};
use wbx_rs::{Country, Observation};

fn c(code: &str, name: &str) -> Country {
    Country::new(code, name)
}

fn o(code: &str, year: i32, value: Option<f64>) -> Observation {
    Observation {
        country_code: code.into(),
        year,
        value,
    }
}

#[test]
fn aligned_series_cover_the_full_range_with_gaps_in_place() {
    let countries = [c("USA", "United States"), c("DEU", "Germany")];
    let raw = vec![
        o("USA", 2018, Some(2.9)),
        o("USA", 2019, Some(2.3)),
        o("USA", 2020, Some(-2.8)),
        o("DEU", 2018, Some(1.1)),
        o("DEU", 2020, Some(-3.7)),
    ];

    let series = build_aligned_series(&countries, &raw, 2018, 2020);
    assert_eq!(series.len(), 2);
    for s in &series {
        assert_eq!(s.values.len(), 3);
    }
    assert_eq!(series[0].country_label, "United States");
    assert_eq!(series[0].values, vec![Some(2.9), Some(2.3), Some(-2.8)]);
    // Germany's unreported 2019 keeps its slot, it is not shifted out.
    assert_eq!(series[1].values, vec![Some(1.1), None, Some(-3.7)]);
    assert_eq!(year_labels(2018, 2020), vec!["2018", "2019", "2020"]);
}

#[test]
fn aligned_series_length_is_range_not_data_driven() {
    let countries = [c("FRA", "France")];
    let series = build_aligned_series(&countries, &[o("FRA", 2015, Some(1.0))], 2010, 2020);
    assert_eq!(series[0].values.len(), 11);
    assert_eq!(series[0].values[5], Some(1.0));
    assert_eq!(series[0].values.iter().flatten().count(), 1);
}

#[test]
fn explicit_null_years_stay_gaps() {
    let countries = [c("FRA", "France")];
    let raw = vec![o("FRA", 2018, None), o("FRA", 2019, Some(0.0))];
    let series = build_aligned_series(&countries, &raw, 2018, 2019);
    // A non-reporting year is absent, a reported zero stays a zero.
    assert_eq!(series[0].values, vec![None, Some(0.0)]);
}

#[test]
fn duplicate_country_year_resolves_last_wins() {
    let countries = [c("FRA", "France")];
    let raw = vec![o("FRA", 2019, Some(1.0)), o("FRA", 2019, Some(9.0))];
    let series = build_aligned_series(&countries, &raw, 2019, 2019);
    assert_eq!(series[0].values, vec![Some(9.0)]);
}

#[test]
fn latest_value_skips_null_years() {
    let countries = [c("USA", "United States")];
    let raw = vec![
        o("USA", 2010, Some(3.1)),
        o("USA", 2012, None),
        o("USA", 2015, Some(4.2)),
    ];
    let rows = build_latest_value_rows(&countries, &raw);
    assert_eq!(rows[0].value, Some(4.2));

    // With 2015 null instead, the latest reported value falls back to 2010.
    let raw = vec![
        o("USA", 2010, Some(3.1)),
        o("USA", 2012, None),
        o("USA", 2015, None),
    ];
    let rows = build_latest_value_rows(&countries, &raw);
    assert_eq!(rows[0].value, Some(3.1));
}

#[test]
fn latest_value_is_none_without_reported_years() {
    let countries = [c("USA", "United States"), c("DEU", "Germany")];
    let raw = vec![o("USA", 2021, Some(4.7)), o("DEU", 2020, None)];
    let rows = build_latest_value_rows(&countries, &raw);
    assert_eq!(rows[0].value, Some(4.7));
    assert_eq!(rows[1].country_label, "Germany");
    assert_eq!(rows[1].value, None);
}

#[test]
fn aggregators_are_pure() {
    let countries = [c("USA", "United States")];
    let raw = vec![o("USA", 2018, Some(2.9)), o("USA", 2020, Some(-2.8))];
    assert_eq!(
        build_aligned_series(&countries, &raw, 2018, 2020),
        build_aligned_series(&countries, &raw, 2018, 2020)
    );
    assert_eq!(
        build_latest_value_rows(&countries, &raw),
        build_latest_value_rows(&countries, &raw)
    );
}

#[test]
fn matrix_assembles_columns_in_indicator_order() {
    let countries = [c("USA", "United States"), c("DEU", "Germany")];
    let col_a = build_latest_value_rows(&countries, &[o("USA", 2020, Some(1.0))]);
    let col_b = build_latest_value_rows(
        &countries,
        &[o("USA", 2019, Some(2.0)), o("DEU", 2021, Some(3.0))],
    );
    let matrix = build_matrix(&countries, &[col_a, col_b]);
    assert_eq!(
        matrix,
        vec![vec![Some(1.0), Some(2.0)], vec![None, Some(3.0)]]
    );
}
