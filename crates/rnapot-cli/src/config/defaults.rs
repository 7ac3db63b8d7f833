use rnapot::core::potential::params::{
    DEFAULT_BIN_WIDTH, DEFAULT_MAX_DISTANCE, DEFAULT_MAXIMUM_SCORE, DEFAULT_POSITION_SKIP,
};
use rnapot::engine::config::MissingProfilePolicy;

pub struct DefaultsConfig {
    pub max_distance: f64,
    pub position_skip: usize,
    pub maximum_score: f64,
    pub bin_width: f64,
    pub keep_going: bool,
    pub missing_profile: MissingProfilePolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            position_skip: DEFAULT_POSITION_SKIP,
            maximum_score: DEFAULT_MAXIMUM_SCORE,
            bin_width: DEFAULT_BIN_WIDTH,
            keep_going: false,
            missing_profile: MissingProfilePolicy::Zero,
        }
    }
}
