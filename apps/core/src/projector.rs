use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Site, SiteId};
use crate::search::{filter_sites, is_searching};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Current,
    Recent,
    AllSites,
    Results,
}

impl SectionKind {
    pub fn heading(self) -> Option<&'static str> {
        match self {
            Self::Current => Some("Current Site"),
            Self::Recent => Some("Recent"),
            Self::AllSites => Some("All Sites"),
            Self::Results => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub sites: Vec<&'a Site>,
}

/// Derived view of the catalog for one (recent, current, query) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub current_site: Option<&'a Site>,
    pub recent_sites: Vec<&'a Site>,
    pub other_sites: Vec<&'a Site>,
    pub filtered_sites: Vec<&'a Site>,
    searching: bool,
}

impl<'a> ViewModel<'a> {
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Whether the caller must show the "no results" state instead of a list.
    pub fn is_empty_result(&self) -> bool {
        self.searching && self.filtered_sites.is_empty()
    }

    /// Rendered order of the list. Both the renderer and the keyboard cursor
    /// consume this, so visual position and navigation index always agree.
    pub fn sections(&self) -> Vec<Section<'a>> {
        if self.searching {
            if self.filtered_sites.is_empty() {
                return Vec::new();
            }
            return vec![Section {
                kind: SectionKind::Results,
                sites: self.filtered_sites.clone(),
            }];
        }

        let mut sections = Vec::with_capacity(3);
        if let Some(current) = self.current_site {
            sections.push(Section {
                kind: SectionKind::Current,
                sites: vec![current],
            });
        }
        if !self.recent_sites.is_empty() {
            sections.push(Section {
                kind: SectionKind::Recent,
                sites: self.recent_sites.clone(),
            });
        }
        if !self.other_sites.is_empty() {
            sections.push(Section {
                kind: SectionKind::AllSites,
                sites: self.other_sites.clone(),
            });
        }
        sections
    }

    pub fn flat_navigation_list(&self) -> Vec<&'a Site> {
        self.sections()
            .into_iter()
            .flat_map(|section| section.sites)
            .collect()
    }

    pub fn navigation_len(&self) -> usize {
        if self.searching {
            return self.filtered_sites.len();
        }
        usize::from(self.current_site.is_some()) + self.recent_sites.len() + self.other_sites.len()
    }

    pub fn site_at(&self, index: usize) -> Option<&'a Site> {
        self.flat_navigation_list().get(index).copied()
    }
}

/// Pure projection of the catalog; takes every input explicitly.
pub fn project<'a>(
    sites: &'a [Site],
    recent_ids: &[SiteId],
    current_site_id: SiteId,
    query: &str,
) -> ViewModel<'a> {
    let filtered_sites = filter_sites(sites, query);

    if is_searching(query) {
        return ViewModel {
            current_site: None,
            recent_sites: Vec::new(),
            other_sites: filtered_sites.clone(),
            filtered_sites,
            searching: true,
        };
    }

    let by_id: HashMap<SiteId, &Site> = sites.iter().map(|site| (site.blog_id, site)).collect();
    let current_site = by_id.get(&current_site_id).copied();

    let mut seen = HashSet::new();
    let recent_sites: Vec<&Site> = recent_ids
        .iter()
        .filter(|id| **id != current_site_id && seen.insert(**id))
        .filter_map(|id| by_id.get(id).copied())
        .collect();

    let recent_set: HashSet<SiteId> = recent_ids.iter().copied().collect();
    let other_sites = sites
        .iter()
        .filter(|site| site.blog_id != current_site_id && !recent_set.contains(&site.blog_id))
        .collect();

    ViewModel {
        current_site,
        recent_sites,
        other_sites,
        filtered_sites,
        searching: false,
    }
}
