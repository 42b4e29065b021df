mod summary;

pub use summary::SummaryCache;
