use thiserror::Error;

pub type WbxResult<T> = Result<T, WbxError>;

/// Everything a generate run can fail with.
///
/// The first four variants are detected before any network call and
/// short-circuit the run; the remote variants abort it with no partial
/// output.
#[derive(Debug, Error)]
pub enum WbxError {
    /// A dimension id from the interface layer is not in the registry.
    #[error("unknown dimension id: {0}")]
    UnknownDimension(String),

    /// The requested year range runs backwards.
    #[error("start year {start} must not be after end year {end}")]
    InvalidRange { start: i32, end: i32 },

    /// The chosen axes need a country selection and none was made.
    #[error("at least one country must be selected")]
    NoCountrySelected,

    /// The chosen axis pair carries no indicator to fetch (e.g. time x time).
    #[error("the chosen dimension pair has no indicator to fetch")]
    InvalidDimensionPair,

    /// The source reported nothing at all for the selected parameters.
    #[error("no data available for the selected parameters")]
    NoData,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The source answered, but not in the `[meta, [entries]]` envelope.
    #[error("unexpected response from the data source: {0}")]
    RemoteFormat(String),
}
