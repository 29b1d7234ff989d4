//! Remote operations and their paths.

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Evaluate,
    Screen,
    OversightAnalyze,
    OversightIngest,
    Signpost,
    SignpostSmart,
    SignpostCountries,
    DetectCountry,
}

impl Endpoint {
    /// Name used in logs and errors.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Evaluate => "evaluate",
            Self::Screen => "screen",
            Self::OversightAnalyze => "oversight_analyze",
            Self::OversightIngest => "oversight_ingest",
            Self::Signpost => "signpost",
            Self::SignpostSmart => "signpost_smart",
            Self::SignpostCountries => "signpost_countries",
            Self::DetectCountry => "detect_country",
        }
    }

    pub(crate) fn method(self) -> http::Method {
        match self {
            Self::Signpost | Self::SignpostCountries | Self::DetectCountry => http::Method::GET,
            _ => http::Method::POST,
        }
    }

    /// Path used with an API key.
    pub(crate) const fn path(self) -> &'static str {
        match self {
            Self::Evaluate => "/v1/evaluate",
            Self::Screen => "/v1/screen",
            Self::OversightAnalyze => "/v1/oversight/analyze",
            Self::OversightIngest => "/v1/oversight/ingest",
            Self::Signpost => "/v1/signpost",
            Self::SignpostSmart => "/v1/signpost/smart",
            Self::SignpostCountries => "/v1/signpost/countries",
            Self::DetectCountry => "/v1/signpost/detect-country",
        }
    }

    /// Path used in demo mode, or `None` if the operation needs a key.
    pub(crate) const fn demo_path(self) -> Option<&'static str> {
        match self {
            Self::Evaluate => Some("/v1/try/evaluate"),
            Self::Screen => Some("/v1/try/screen"),
            Self::OversightAnalyze => Some("/v1/try/oversight/analyze"),
            Self::OversightIngest => None,
            Self::Signpost => Some("/v1/try/signpost"),
            Self::SignpostSmart => Some("/v1/try/signpost/smart"),
            // Public lookups, identical in both modes.
            Self::SignpostCountries | Self::DetectCountry => Some(self.path()),
        }
    }
}
