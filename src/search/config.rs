// src/search/config.rs
// =============================================================================
// Run configuration for one search. Checked once when it is built and never
// changed afterwards.
// =============================================================================

use crate::error::SearchError;
use url::Url;

// Far more than any site will tolerate, but keeps the semaphore in range
const MAX_WORKERS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Page the search starts from; links are resolved against it
    pub start_url: Url,
    /// Exact title of the page we're looking for
    pub target: String,
    /// How many link hops from the start page we explore (0 = start page only)
    pub max_depth: usize,
    /// How many pages may be processed at the same time
    pub workers: usize,
}

impl SearchConfig {
    pub fn new(
        start_url: &str,
        target: &str,
        max_depth: usize,
        workers: usize,
    ) -> Result<Self, SearchError> {
        let start_url = Url::parse(start_url)
            .map_err(|e| SearchError::Config(format!("invalid start URL '{}': {}", start_url, e)))?;

        if start_url.scheme() != "http" && start_url.scheme() != "https" {
            return Err(SearchError::Config(format!(
                "start URL must be http or https, got '{}'",
                start_url.scheme()
            )));
        }
        if start_url.host_str().is_none() {
            return Err(SearchError::Config(format!("start URL has no host: {}", start_url)));
        }

        // Titles are matched exactly, so the target is stored as given
        if target.trim().is_empty() {
            return Err(SearchError::Config("target title must not be empty".to_string()));
        }
        if workers == 0 {
            return Err(SearchError::Config("workers must be at least 1".to_string()));
        }
        if workers > MAX_WORKERS {
            return Err(SearchError::Config(format!("workers must be at most {}", MAX_WORKERS)));
        }

        Ok(SearchConfig {
            start_url,
            target: target.to_string(),
            max_depth,
            workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SearchConfig::new(
            "https://en.wikipedia.org/wiki/Hatsune_Miku",
            "Online shopping",
            3,
            32,
        )
        .unwrap();
        assert_eq!(config.start_url.host_str(), Some("en.wikipedia.org"));
        assert_eq!(config.target, "Online shopping");
    }

    #[test]
    fn test_depth_zero_is_allowed() {
        assert!(SearchConfig::new("https://example.com/wiki/A", "B", 0, 1).is_ok());
    }

    #[test]
    fn test_rejects_bad_start_url() {
        assert!(SearchConfig::new("not a url", "B", 3, 4).is_err());
        assert!(SearchConfig::new("ftp://example.com/wiki/A", "B", 3, 4).is_err());
    }

    #[test]
    fn test_rejects_empty_target() {
        let err = SearchConfig::new("https://example.com/wiki/A", "  ", 3, 4).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_target_is_kept_exactly() {
        let config = SearchConfig::new("https://example.com/wiki/A", " Target ", 3, 4).unwrap();
        assert_eq!(config.target, " Target ");
    }

    #[test]
    fn test_rejects_zero_workers() {
        let err = SearchConfig::new("https://example.com/wiki/A", "B", 3, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: workers must be at least 1");
        assert!(SearchConfig::new("https://example.com/wiki/A", "B", 3, 1_000_000).is_err());
    }
}
