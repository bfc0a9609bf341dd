pub mod anchor;
pub mod cfemail;
pub mod classifier;
pub mod detail;
pub mod listing;

pub use detail::DetailExtractor;
pub use listing::ListingExtractor;
