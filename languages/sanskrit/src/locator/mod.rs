use std::sync::Arc;

use kosha_config::upstream::{PageFormat, UpstreamConfig};
use kosha_core::lookup::BlockLocator;

pub mod html;
pub mod json;

pub use html::HtmlPageLocator;
pub use json::JsonApiLocator;

/// Locator matching the format upstream is configured to serve
pub fn locator_for(config: &UpstreamConfig) -> Arc<dyn BlockLocator> {
    match config.format {
        PageFormat::Html => Arc::new(HtmlPageLocator::new(config.clone())),
        PageFormat::Json => Arc::new(JsonApiLocator::new(config.clone())),
    }
}
