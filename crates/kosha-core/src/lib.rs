pub mod dictionary;
pub mod error;
pub mod language;
pub mod lookup;
pub mod preprocess;
pub mod types;

pub use dictionary::{SourceDescriptor, SourceExtractor, SourceRegistry};
pub use error::LookupError;
pub use lookup::{BlockLocator, Kosha};
pub use types::{Answer, ContentBlock, ResultMapping, SelectionResult, Word};
