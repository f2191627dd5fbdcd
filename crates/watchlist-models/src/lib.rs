pub mod card;
pub mod collection;
pub mod entry;
pub mod external_id;
pub mod impression;
pub mod media;
pub mod stats;

pub use card::CatalogCard;
pub use collection::{WatchlistCollection, SCHEMA_VERSION};
pub use entry::WatchlistEntry;
pub use external_id::{compute_id, ExternalId};
pub use impression::{Impression, ImpressionParseError};
pub use media::{MediaType, MediaTypeParseError};
pub use stats::WatchlistStats;
