mod round_label;

pub use round_label::{display_round_name, regular_season_number};
