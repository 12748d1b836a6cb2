pub mod curve;
pub mod domain;
pub mod identity;
pub mod rates;
pub mod scale;
pub mod types;

pub use curve::CurveType;
pub use domain::{DEFAULT_Y_DOMAIN, y_axis_domain};
pub use identity::{available_variation_ids, enhance_variations};
pub use rates::{
    TimeRange, aggregate, aggregate_weekly, conversion_rate, format_daily_label,
    parse_record_date, process_daily, round2,
};
pub use scale::{CategoryScale, LinearScale};
pub use types::{
    CountMap, DailyRecord, EnhancedVariation, ProcessedPoint, TestData, Variation, Viewport,
};
