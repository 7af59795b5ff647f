//! Video resource constants

/// Maximum video title length, measured after trimming
pub const MAX_TITLE_LENGTH: usize = 40;

/// Maximum author name length, measured after trimming
pub const MAX_AUTHOR_LENGTH: usize = 20;

/// Lowest accepted minimum-age restriction
pub const MIN_AGE_RESTRICTION: i64 = 1;

/// Highest accepted minimum-age restriction
pub const MAX_AGE_RESTRICTION: i64 = 18;

/// Days between creation and the default publication date
pub const PUBLICATION_DELAY_DAYS: i64 = 1;
