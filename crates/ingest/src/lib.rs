mod extractor;
mod ingestion;
mod schedule;
mod utils;

pub use extractor::*;
pub use ingestion::*;
pub use schedule::*;
pub use utils::*;
