//! flash 固有のドメイン型（型と不変条件）

pub mod command;
pub mod enrichment;
pub mod entry;
pub mod error;
pub mod review;
pub mod word;

pub use command::FlashCommand;
pub use enrichment::Enrichment;
pub use entry::{Collection, Entry};
pub use error::{EnrichmentError, FlashError};
pub use review::{CardFace, ReviewSession};
pub use word::Word;
