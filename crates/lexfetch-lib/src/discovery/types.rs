use std::fmt;
use url::Url;

/// A named subdirectory of the tree host grouping related archives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reporter {
    pub name: String,
    pub url: Url,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// Bucket name scraped from the HTML listing page.
    ListingPage,
    /// Zero-based index into the alternate listing shapes.
    AlternateEndpoint(usize),
    StorageBase,
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryStrategy::ListingPage => write!(f, "listing page"),
            DiscoveryStrategy::AlternateEndpoint(index) => {
                write!(f, "alternate endpoint #{}", index + 1)
            }
            DiscoveryStrategy::StorageBase => write!(f, "storage base"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredKeys {
    pub strategy: DiscoveryStrategy,
    pub keys: Vec<String>,
}
