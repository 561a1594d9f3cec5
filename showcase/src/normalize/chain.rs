//! Ordered fallback chains.
//!
//! A chain is a named list of extractor functions tried in priority order; the first one that yields
//! a non-empty string wins. Chains replace inline `a || b || c || default` expressions so the
//! precedence can be inspected and tested on its own.

use crate::record::RawRecord;

pub type Extractor = Box<dyn Fn(&RawRecord) -> Option<String> + Send + Sync>;

pub struct ExtractorChain {
    name: &'static str,
    extractors: Vec<Extractor>,
}

impl ExtractorChain {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            extractors: Vec::new(),
        }
    }

    /// Append an extractor at the lowest priority so far.
    pub fn then<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&RawRecord) -> Option<String> + Send + Sync + 'static,
    {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Append an extractor reading a single text field.
    pub fn field(self, key: &'static str) -> Self {
        self.then(move |raw| raw.text(key))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Index and value of the first extractor producing a non-empty string.
    pub fn first_match(&self, raw: &RawRecord) -> Option<(usize, String)> {
        self.extractors
            .iter()
            .enumerate()
            .find_map(|(index, extract)| extract(raw).filter(|value| !value.is_empty()).map(|v| (index, v)))
    }

    /// First non-empty value, or `default` when every extractor came up empty.
    pub fn resolve(&self, raw: &RawRecord, default: &str) -> String {
        match self.first_match(raw) {
            Some((_, value)) => value,
            None => {
                log::trace!("{} chain fell back to default {:?}", self.name, default);
                default.to_string()
            }
        }
    }
}

impl std::fmt::Debug for ExtractorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorChain")
            .field("name", &self.name)
            .field("extractors", &self.extractors.len())
            .finish()
    }
}
