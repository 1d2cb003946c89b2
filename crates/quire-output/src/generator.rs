//! Generator capabilities.

use crate::error::GenerateError;
use crate::output::{Output, ResultPage};

/// Consumes rendered pages, one at a time, in book order.
pub trait PageHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Emit `page` and return the state the next page starts from.
    fn on_page(&self, output: Output, page: ResultPage) -> Result<Output, GenerateError>;
}

/// A generator either handles pages or only deals with assets.
pub enum Generator {
    /// Every page is rendered and handed to the handler.
    PageAware(Box<dyn PageHandler>),
    /// Pages are left alone.
    AssetOnly,
}

impl Generator {
    pub fn page_aware(handler: impl PageHandler + 'static) -> Self {
        Self::PageAware(Box::new(handler))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PageAware(handler) => handler.name(),
            Self::AssetOnly => "assets",
        }
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageAware(handler) => f.debug_tuple("PageAware").field(&handler.name()).finish(),
            Self::AssetOnly => f.write_str("AssetOnly"),
        }
    }
}
