use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level payload accepted by `POST /generate-pdf`.
///
/// All four fields are required; a payload missing any of them fails
/// deserialization and never reaches the rendering pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub final_report: FinalReport,
    /// Free-form client metadata. The payload schema does not constrain its
    /// shape, so it is carried as raw JSON.
    pub client_info: serde_json::Value,
    pub competitor_data: Vec<Competitor>,
    pub client_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub creative_url: Option<String>,
    #[serde(default)]
    pub deal_type: Option<String>,
    #[serde(default)]
    pub deal_duration: Option<String>,
    #[serde(default)]
    pub top_deals: Vec<Deal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub name: String,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub percent_discount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub recommendation: Recommendation,
    #[serde(default)]
    pub comparison: Vec<CompetitorReport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Overall score on a 0-10 scale.
    pub numeric_score: f64,
    pub rating: String,
    pub summary: String,
    #[serde(default)]
    pub discounts: AnalysisPoints,
    #[serde(default)]
    pub messaging: AnalysisPoints,
    #[serde(default)]
    pub competitiveness: AnalysisPoints,
    #[serde(default)]
    pub discounts_score: f64,
    #[serde(default)]
    pub messaging_score: f64,
    #[serde(default)]
    pub competitiveness_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorReport {
    /// Matched against [`Competitor::name`] by exact string equality.
    pub competitor_name: String,
    #[serde(default)]
    pub deal_rating: DealRating,
    #[serde(default)]
    pub analysis: AnalysisPoints,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPoints {
    #[serde(default)]
    pub good: Vec<String>,
    #[serde(default)]
    pub bad: Vec<String>,
}

impl AnalysisPoints {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.bad.is_empty()
    }
}

/// Four-tier gauge of how aggressive a competitor's discounting is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DealRating {
    #[default]
    Frosty,
    LukeWarm,
    Hot,
    PipinHot,
}

impl DealRating {
    /// Parses a wire rating, falling back to the lowest tier for any
    /// unrecognized value.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "luke-warm" => Self::LukeWarm,
            "hot" => Self::Hot,
            "pipin-hot" => Self::PipinHot,
            _ => Self::Frosty,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frosty => "frosty",
            Self::LukeWarm => "luke-warm",
            Self::Hot => "hot",
            Self::PipinHot => "pipin-hot",
        }
    }
}

impl std::fmt::Display for DealRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DealRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&raw))
    }
}

impl Serialize for DealRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A competitor after image resolution: the original record plus embedded
/// `data:` URLs where the fetches succeeded.
///
/// The renderer consumes only this type, so it never sees an unresolved
/// placeholder and the inbound request is never mutated.
#[derive(Debug, Clone)]
pub struct ResolvedCompetitor {
    pub competitor: Competitor,
    pub logo_data_url: Option<String>,
    pub creative_data_url: Option<String>,
}

impl ResolvedCompetitor {
    /// Wraps a competitor with no resolved images.
    #[must_use]
    pub fn unresolved(competitor: Competitor) -> Self {
        Self {
            competitor,
            logo_data_url: None,
            creative_data_url: None,
        }
    }
}
