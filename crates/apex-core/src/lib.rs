mod app_config;
mod config;
mod report;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use report::{
    AnalysisPoints, Competitor, CompetitorReport, Deal, DealRating, FinalReport, Recommendation,
    ReportRequest, ResolvedCompetitor,
};
