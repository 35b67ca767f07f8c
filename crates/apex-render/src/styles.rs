//! Static style tables for the report document.
//!
//! Plain configuration data, not mutable process state: score color bands,
//! deal-o-meter tiers, and the document stylesheet.

use apex_core::DealRating;

/// One color band of the 0-10 scorecard scale.
#[derive(Debug, PartialEq, Eq)]
pub struct ScoreBand {
    pub label: &'static str,
    pub color: &'static str,
}

pub const BAND_POOR: ScoreBand = ScoreBand {
    label: "poor",
    color: "#c0392b",
};
pub const BAND_CAUTION: ScoreBand = ScoreBand {
    label: "caution",
    color: "#e67e22",
};
pub const BAND_FAVORABLE: ScoreBand = ScoreBand {
    label: "favorable",
    color: "#27ae60",
};
pub const BAND_EXCELLENT: ScoreBand = ScoreBand {
    label: "excellent",
    color: "#1abc9c",
};

/// Maps a 0-10 score to its color band. Thresholds are inclusive on the
/// upper edge of each band: 3 is still "poor", 6 is still "caution",
/// 8 is still "favorable".
#[must_use]
pub fn score_band(score: f64) -> &'static ScoreBand {
    if score <= 3.0 {
        &BAND_POOR
    } else if score <= 6.0 {
        &BAND_CAUTION
    } else if score <= 8.0 {
        &BAND_FAVORABLE
    } else {
        &BAND_EXCELLENT
    }
}

/// One tier of the deal-o-meter gauge: fill width and gradient.
#[derive(Debug, PartialEq, Eq)]
pub struct MeterTier {
    pub label: &'static str,
    pub width_pct: u8,
    pub gradient: &'static str,
}

pub const METER_FROSTY: MeterTier = MeterTier {
    label: "frosty",
    width_pct: 25,
    gradient: "linear-gradient(90deg, #74b9ff, #0984e3)",
};
pub const METER_LUKE_WARM: MeterTier = MeterTier {
    label: "luke-warm",
    width_pct: 50,
    gradient: "linear-gradient(90deg, #ffeaa7, #fdcb6e)",
};
pub const METER_HOT: MeterTier = MeterTier {
    label: "hot",
    width_pct: 75,
    gradient: "linear-gradient(90deg, #fab1a0, #e17055)",
};
pub const METER_PIPIN_HOT: MeterTier = MeterTier {
    label: "pipin-hot",
    width_pct: 100,
    gradient: "linear-gradient(90deg, #ff7675, #d63031)",
};

#[must_use]
pub fn meter_tier(rating: DealRating) -> &'static MeterTier {
    match rating {
        DealRating::Frosty => &METER_FROSTY,
        DealRating::LukeWarm => &METER_LUKE_WARM,
        DealRating::Hot => &METER_HOT,
        DealRating::PipinHot => &METER_PIPIN_HOT,
    }
}

/// Document stylesheet, inlined into the rendered page so the PDF export
/// needs no external resources.
pub const PAGE_CSS: &str = r#"
  * { box-sizing: border-box; }
  body {
    font-family: 'Helvetica Neue', Arial, sans-serif;
    color: #2d3436;
    margin: 0;
    font-size: 13px;
    line-height: 1.5;
  }
  header {
    background: #2d3436;
    color: #ffffff;
    padding: 24px 28px;
    border-radius: 6px;
  }
  header h1 { margin: 0 0 4px 0; font-size: 24px; }
  .client-info { margin: 0; color: #b2bec3; }
  .client-url { margin: 4px 0 0 0; color: #74b9ff; font-size: 12px; }
  section { margin-top: 24px; }
  h2 {
    font-size: 17px;
    border-bottom: 2px solid #dfe6e9;
    padding-bottom: 6px;
  }
  .chips { display: flex; flex-wrap: wrap; gap: 8px; }
  .chip {
    background: #dfe6e9;
    border-radius: 12px;
    padding: 4px 12px;
    font-size: 12px;
  }
  .scorecard {
    background: #f5f6fa;
    border-left: 6px solid #b2bec3;
    border-radius: 6px;
    padding: 16px 20px;
  }
  .overall .score { font-size: 28px; font-weight: bold; }
  .overall .rating { margin-left: 10px; font-size: 15px; }
  .summary-text { margin: 8px 0 16px 0; }
  .subscore { margin-top: 12px; }
  .subscore h3 { margin: 0 0 4px 0; font-size: 14px; }
  .analysis { margin: 4px 0; padding-left: 18px; }
  .analysis .good { color: #27ae60; }
  .analysis .bad { color: #c0392b; }
  .analysis-empty { color: #636e72; font-style: italic; margin: 4px 0; }
  .card {
    border: 1px solid #dfe6e9;
    border-radius: 6px;
    padding: 16px 20px;
    margin-top: 16px;
    page-break-inside: avoid;
  }
  .card-header { display: flex; align-items: center; gap: 14px; }
  .card-header h3 { margin: 0; font-size: 16px; }
  .card-url { margin: 2px 0 0 0; color: #636e72; font-size: 12px; }
  .logo { width: 56px; height: 56px; object-fit: contain; }
  .logo-placeholder {
    width: 56px;
    height: 56px;
    border-radius: 6px;
    background: #dfe6e9;
    color: #636e72;
    font-size: 10px;
    display: flex;
    align-items: center;
    justify-content: center;
  }
  .deal-terms { margin: 10px 0 6px 0; }
  .meter { display: flex; align-items: center; gap: 10px; margin: 8px 0; }
  .meter-track {
    flex: 1;
    height: 12px;
    background: #dfe6e9;
    border-radius: 6px;
    overflow: hidden;
  }
  .meter-fill { height: 100%; border-radius: 6px; }
  .meter-label { font-size: 12px; white-space: nowrap; }
  .deals { margin: 6px 0; padding-left: 20px; }
  .deal { margin: 3px 0; }
  .sale-price { font-weight: bold; }
  .original-price { color: #636e72; }
  .discount-badge {
    background: #d63031;
    color: #ffffff;
    border-radius: 4px;
    padding: 1px 6px;
    font-size: 11px;
  }
  .no-deals { color: #636e72; font-style: italic; margin: 4px 0; }
  .creative { margin-top: 12px; }
  .creative h4 { margin: 0 0 6px 0; font-size: 13px; }
  .creative-img { max-width: 100%; border-radius: 4px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_band_boundaries_are_inclusive() {
        // {0,1,2,3} poor, {4,5,6} caution, {7,8} favorable, {9,10} excellent
        for score in [0.0, 1.0, 2.0, 3.0] {
            assert_eq!(score_band(score), &BAND_POOR, "score {score}");
        }
        for score in [4.0, 5.0, 6.0] {
            assert_eq!(score_band(score), &BAND_CAUTION, "score {score}");
        }
        for score in [7.0, 8.0] {
            assert_eq!(score_band(score), &BAND_FAVORABLE, "score {score}");
        }
        for score in [9.0, 10.0] {
            assert_eq!(score_band(score), &BAND_EXCELLENT, "score {score}");
        }
    }

    #[test]
    fn score_band_handles_fractional_scores() {
        assert_eq!(score_band(3.1), &BAND_CAUTION);
        assert_eq!(score_band(6.5), &BAND_FAVORABLE);
        assert_eq!(score_band(8.01), &BAND_EXCELLENT);
    }

    #[test]
    fn meter_tiers_cover_all_ratings() {
        use apex_core::DealRating;
        assert_eq!(meter_tier(DealRating::Frosty).width_pct, 25);
        assert_eq!(meter_tier(DealRating::LukeWarm).width_pct, 50);
        assert_eq!(meter_tier(DealRating::Hot).width_pct, 75);
        assert_eq!(meter_tier(DealRating::PipinHot).width_pct, 100);
    }

    #[test]
    fn unknown_wire_rating_maps_to_frosty_tier() {
        use apex_core::DealRating;
        let tier = meter_tier(DealRating::from_str_lossy("nuclear"));
        assert_eq!(tier, &METER_FROSTY);
    }
}
