use crate::model::{normalize_for_search, Site};

pub fn is_searching(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Substring match on name or site URL, case-insensitive, in catalog order.
/// An empty (or blank) query matches every site.
pub fn filter_sites<'a>(sites: &'a [Site], query: &str) -> Vec<&'a Site> {
    let needle = normalize_for_search(query);
    if needle.is_empty() {
        return sites.iter().collect();
    }

    sites.iter().filter(|site| site.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_sites, is_searching};
    use crate::model::Site;

    fn catalog() -> Vec<Site> {
        vec![
            Site::new(1, "Alpha Clinic", "https://health.test/alpha/", "https://health.test/alpha/wp-admin/"),
            Site::new(2, "Beta", "https://health.test/beta/", "https://health.test/beta/wp-admin/"),
            Site::new(3, "Gamma", "https://gamma.example/", "https://gamma.example/wp-admin/"),
        ]
    }

    #[test]
    fn blank_query_is_not_searching() {
        assert!(!is_searching(""));
        assert!(!is_searching("   "));
        assert!(is_searching(" a "));
    }

    #[test]
    fn matches_name_case_insensitively() {
        let sites = catalog();
        let ids: Vec<u64> = filter_sites(&sites, "CLINIC").iter().map(|s| s.blog_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn matches_url_substring_not_only_prefix() {
        let sites = catalog();
        let ids: Vec<u64> = filter_sites(&sites, "health.test").iter().map(|s| s.blog_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let sites = catalog();
        let ids: Vec<u64> = filter_sites(&sites, "  gamma ").iter().map(|s| s.blog_id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn blank_query_returns_whole_catalog() {
        let sites = catalog();
        assert_eq!(filter_sites(&sites, " ").len(), 3);
    }
}
