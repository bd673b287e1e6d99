use std::collections::HashSet;

use siteswitch_core::model::{Site, SiteId};
use siteswitch_core::projector::{project, SectionKind};

fn site(id: SiteId, name: &str) -> Site {
    let slug = name.to_lowercase().replace(' ', "-");
    Site::new(
        id,
        name,
        &format!("https://{slug}.example.org/"),
        &format!("https://{slug}.example.org/wp-admin/"),
    )
}

fn ids(sites: &[&Site]) -> Vec<SiteId> {
    sites.iter().map(|s| s.blog_id).collect()
}

#[test]
fn single_current_site_catalog() {
    let sites = vec![site(1, "Alpha").with_current(true)];
    let view = project(&sites, &[], 1, "");

    assert_eq!(view.current_site.map(|s| s.blog_id), Some(1));
    assert!(view.recent_sites.is_empty());
    assert!(view.other_sites.is_empty());
    assert_eq!(ids(&view.flat_navigation_list()), vec![1]);
}

#[test]
fn recent_site_leaves_others_empty() {
    let sites = vec![site(1, "Alpha").with_current(true), site(2, "Beta")];
    let view = project(&sites, &[2], 1, "");

    assert_eq!(ids(&view.recent_sites), vec![2]);
    assert!(view.other_sites.is_empty());
}

#[test]
fn search_flattens_to_matching_sites() {
    let sites = vec![site(1, "Alpha").with_current(true), site(2, "Beta")];
    let view = project(&sites, &[2], 1, "bet");

    assert!(view.current_site.is_none());
    assert!(view.recent_sites.is_empty());
    assert_eq!(ids(&view.filtered_sites), vec![2]);
    assert_eq!(ids(&view.flat_navigation_list()), vec![2]);
    let kinds: Vec<SectionKind> = view.sections().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::Results]);
}

#[test]
fn search_matches_site_url_case_insensitively() {
    let sites = vec![
        Site::new(1, "Main", "https://Shop.Example.org/", "https://shop.example.org/wp-admin/"),
        site(2, "Blog"),
    ];
    let view = project(&sites, &[], 1, "  SHOP ");
    assert_eq!(ids(&view.filtered_sites), vec![1]);
}

#[test]
fn missing_current_and_stale_recent_are_dropped() {
    let sites = vec![site(1, "Alpha"), site(2, "Beta"), site(3, "Gamma")];
    let view = project(&sites, &[77, 3, 3], 99, "");

    assert!(view.current_site.is_none());
    assert_eq!(ids(&view.recent_sites), vec![3]);
    assert_eq!(ids(&view.other_sites), vec![1, 2]);
    assert_eq!(ids(&view.flat_navigation_list()), vec![3, 1, 2]);
}

#[test]
fn sections_and_flat_list_share_one_order() {
    let sites: Vec<Site> = (1..=6).map(|id| site(id, &format!("Site {id}"))).collect();
    let view = project(&sites, &[5, 2], 3, "");

    let from_sections: Vec<SiteId> = view
        .sections()
        .iter()
        .flat_map(|section| section.sites.iter().map(|s| s.blog_id))
        .collect();
    assert_eq!(from_sections, ids(&view.flat_navigation_list()));
    assert_eq!(from_sections, vec![3, 5, 2, 1, 4, 6]);
    for (index, id) in from_sections.iter().enumerate() {
        assert_eq!(view.site_at(index).map(|s| s.blog_id), Some(*id));
    }
    assert!(view.site_at(from_sections.len()).is_none());
}

fn generated_case(seed: u64) -> (Vec<Site>, Vec<SiteId>, SiteId) {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    let count = next() % 12;
    let sites: Vec<Site> = (0..count)
        .map(|i| {
            let id = i * 2 + 1;
            site(id, &format!("Tenant {}", next() % 1000))
        })
        .collect();
    let recent: Vec<SiteId> = (0..(next() % 6)).map(|_| next() % 25).collect();
    let current = next() % 25;
    (sites, recent, current)
}

#[test]
fn browse_partition_is_disjoint_and_complete() {
    for seed in 0..300 {
        let (sites, recent, current) = generated_case(seed);
        let view = project(&sites, &recent, current, "");

        let mut seen = HashSet::new();
        for s in view.flat_navigation_list() {
            assert!(seen.insert(s.blog_id), "seed {seed}: duplicate {}", s.blog_id);
        }
        let catalog: HashSet<SiteId> = sites.iter().map(|s| s.blog_id).collect();
        assert_eq!(seen, catalog, "seed {seed}");
    }
}

#[test]
fn search_results_are_exactly_the_matches() {
    let needles = ["tenant 1", "7", "EXAMPLE", "zz", "tenant"];
    for seed in 0..100 {
        let (sites, recent, current) = generated_case(seed);
        for needle in needles {
            let view = project(&sites, &recent, current, needle);
            let lowered = needle.to_lowercase();
            let hit: HashSet<SiteId> = view.filtered_sites.iter().map(|s| s.blog_id).collect();
            for s in &sites {
                let matches = s.name.to_lowercase().contains(&lowered)
                    || s.site_url.to_lowercase().contains(&lowered);
                assert_eq!(hit.contains(&s.blog_id), matches, "seed {seed} needle {needle}");
            }
        }
    }
}
