//! In-memory filters behind the `LocalFilter` tabs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::internal::models::{
    Gallery, MediaItem, MediaKind, OrgNode, PeriodSummary, Podcast, SOTM_DEPUTY, SOTM_STAFF, Sotm,
};
use crate::utils::datetime::year_of;

/// Tab key meaning "no filter" on data-derived tab sets.
pub const ALL_TAB: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MediaFilter {
    #[strum(serialize = "Semua")]
    All,
    #[strum(serialize = "Foto")]
    Photo,
    #[strum(serialize = "Video")]
    Video,
}

pub fn filter_media(items: &[MediaItem], filter: MediaFilter) -> Vec<&MediaItem> {
    items
        .iter()
        .filter(|item| match filter {
            MediaFilter::All => true,
            MediaFilter::Photo => item.kind() == MediaKind::Photo,
            MediaFilter::Video => item.kind() == MediaKind::Video,
        })
        .collect()
}

/// Role tabs of the organisation pages. The API sends these as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum RoleFilter {
    #[strum(serialize = "Semua")]
    All,
    #[strum(serialize = "Presiden")]
    President,
    #[strum(serialize = "Sekretaris")]
    Secretary,
    #[strum(serialize = "Bendahara")]
    Treasure,
    #[strum(serialize = "Deputi")]
    Deputy,
}

impl RoleFilter {
    pub fn api_value(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::President => Some("president"),
            Self::Secretary => Some("secretary"),
            Self::Treasure => Some("treasure"),
            Self::Deputy => Some("deputy"),
        }
    }

    /// Tabs of the current structure page, which has no "all" tab.
    pub fn current_board() -> Vec<Self> {
        Self::iter().filter(|r| *r != Self::All).collect()
    }

    /// Tabs of a past period's structure page.
    pub fn period_board() -> Vec<Self> {
        Self::iter().collect()
    }
}

pub fn filter_by_role(nodes: &[OrgNode], role: RoleFilter) -> Vec<&OrgNode> {
    match role.api_value() {
        None => nodes.iter().collect(),
        Some(value) => nodes
            .iter()
            .filter(|n| n.role.as_deref() == Some(value))
            .collect(),
    }
}

/// `all` followed by each distinct gallery year, in first-seen order.
pub fn gallery_year_tabs(galleries: &[Gallery]) -> Vec<String> {
    let years = galleries
        .iter()
        .filter_map(|g| year_of(g.time.as_deref()))
        .map(|y| y.to_string());
    with_all_tab(years)
}

pub fn filter_galleries_by_year<'a>(galleries: &'a [Gallery], tab: &str) -> Vec<&'a Gallery> {
    match tab == ALL_TAB {
        true => galleries.iter().collect(),
        false => galleries
            .iter()
            .filter(|g| year_of(g.time.as_deref()).is_some_and(|y| y.to_string() == tab))
            .collect(),
    }
}

/// `all` followed by each distinct podcast date, in first-seen order.
pub fn podcast_date_tabs(podcasts: &[Podcast]) -> Vec<String> {
    with_all_tab(podcasts.iter().filter_map(|p| p.date.clone()))
}

pub fn filter_podcasts<'a>(podcasts: &'a [Podcast], tab: &str) -> Vec<&'a Podcast> {
    match tab == ALL_TAB {
        true => podcasts.iter().collect(),
        false => podcasts
            .iter()
            .filter(|p| p.date.as_deref() == Some(tab))
            .collect(),
    }
}

fn with_all_tab(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tabs = vec![ALL_TAB.to_string()];
    for value in values {
        if seen.insert(value.clone()) {
            tabs.push(value);
        }
    }
    tabs
}

/// Poster groups of the GenBI Point page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SotmTab {
    #[strum(serialize = "Deputi")]
    Deputy,
    #[strum(serialize = "Staff")]
    Staff,
}

impl SotmTab {
    pub fn api_value(&self) -> &'static str {
        match self {
            Self::Deputy => SOTM_DEPUTY,
            Self::Staff => SOTM_STAFF,
        }
    }
}

pub fn filter_sotm(posters: &[Sotm], tab: SotmTab) -> Vec<&Sotm> {
    posters
        .iter()
        .filter(|p| p.kind.as_deref() == Some(tab.api_value()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum HistoryTab {
    #[strum(serialize = "Semua")]
    All,
    #[strum(serialize = "Terbaru")]
    Latest,
}

static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}").expect("year regex compiles"));

/// First 4-digit year in a period label such as "2022/2023".
pub fn period_year(periode: Option<&str>) -> Option<u32> {
    let text = periode?;
    YEAR_REGEX.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Board history in tab order. `Latest` sorts by year descending; the sort is
/// stable and entries without a year stay after the dated ones.
pub fn board_history(periods: &[PeriodSummary], tab: HistoryTab) -> Vec<&PeriodSummary> {
    let mut list: Vec<&PeriodSummary> = periods.iter().collect();
    if tab == HistoryTab::Latest {
        list.sort_by_key(|p| std::cmp::Reverse(period_year(p.periode.as_deref())));
    }
    list
}

/// Drop items whose id was already seen, keeping the first occurrence.
pub fn dedupe_by_id<T>(existing: &[T], incoming: Vec<T>, id: impl Fn(&T) -> u64) -> Vec<T> {
    let mut seen: HashSet<u64> = existing.iter().map(&id).collect();
    incoming
        .into_iter()
        .filter(|item| seen.insert(id(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(name: &str) -> MediaItem {
        MediaItem {
            file_name: name.to_string(),
            caption: None,
        }
    }

    fn period(p: Option<&str>, name: &str) -> PeriodSummary {
        PeriodSummary {
            periode: p.map(str::to_string),
            nama: Some(name.to_string()),
            image: None,
        }
    }

    #[test]
    fn test_media_filter() {
        let items = vec![media("a.jpg"), media("b.mp4"), media("c.png"), media("d.WEBM")];
        assert_eq!(filter_media(&items, MediaFilter::All).len(), 4);
        let videos: Vec<_> = filter_media(&items, MediaFilter::Video)
            .into_iter()
            .map(|m| m.file_name.as_str())
            .collect();
        assert_eq!(videos, vec!["b.mp4", "d.WEBM"]);
        assert_eq!(filter_media(&items, MediaFilter::Photo).len(), 2);
    }

    #[test]
    fn test_role_filter() {
        let nodes = vec![
            OrgNode {
                id: 1,
                role: Some("president".into()),
                ..Default::default()
            },
            OrgNode {
                id: 2,
                role: Some("deputy".into()),
                ..Default::default()
            },
        ];
        assert_eq!(filter_by_role(&nodes, RoleFilter::Deputy)[0].id, 2);
        assert_eq!(filter_by_role(&nodes, RoleFilter::All).len(), 2);
        assert!(filter_by_role(&nodes, RoleFilter::Treasure).is_empty());
        assert_eq!(RoleFilter::period_board().len(), 5);
        assert_eq!(RoleFilter::Treasure.api_value(), Some("treasure"));
    }

    #[test]
    fn test_gallery_year_tabs_first_seen_order() {
        let galleries = vec![
            Gallery {
                id: 1,
                time: Some("2023-05-01".into()),
                ..Default::default()
            },
            Gallery {
                id: 2,
                time: Some("2024-01-10".into()),
                ..Default::default()
            },
            Gallery {
                id: 3,
                time: Some("2023-11-11".into()),
                ..Default::default()
            },
            Gallery {
                id: 4,
                time: None,
                ..Default::default()
            },
        ];
        assert_eq!(gallery_year_tabs(&galleries), vec!["all", "2023", "2024"]);
        let ids: Vec<u64> = filter_galleries_by_year(&galleries, "2023")
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_galleries_by_year(&galleries, ALL_TAB).len(), 4);
    }

    #[test]
    fn test_podcast_tabs() {
        let podcasts = vec![
            Podcast {
                id: 1,
                date: Some("2024".into()),
                ..Default::default()
            },
            Podcast {
                id: 2,
                date: Some("2024".into()),
                ..Default::default()
            },
        ];
        assert_eq!(podcast_date_tabs(&podcasts), vec!["all", "2024"]);
        assert_eq!(filter_podcasts(&podcasts, "2024").len(), 2);
        assert!(filter_podcasts(&podcasts, "2023").is_empty());
    }

    #[test]
    fn test_board_history_latest_is_stable() {
        let periods = vec![
            period(Some("2021/2022"), "a"),
            period(None, "x"),
            period(Some("Periode 2023"), "b"),
            period(Some("2021"), "c"),
            period(Some("awal"), "y"),
        ];
        let names: Vec<_> = board_history(&periods, HistoryTab::Latest)
            .iter()
            .map(|p| p.nama.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["b", "a", "c", "x", "y"]);

        let unsorted: Vec<_> = board_history(&periods, HistoryTab::All)
            .iter()
            .map(|p| p.nama.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(unsorted, vec!["a", "x", "b", "c", "y"]);
    }

    #[test]
    fn test_sotm_split_by_kind() {
        let poster = |id, kind: &str| Sotm {
            id,
            kind: Some(kind.to_string()),
            image: None,
        };
        let posters = vec![poster(1, "deputi"), poster(2, "staff"), poster(3, "deputi")];
        let deputies: Vec<_> = filter_sotm(&posters, SotmTab::Deputy).iter().map(|p| p.id).collect();
        assert_eq!(deputies, vec![1, 3]);
        assert_eq!(filter_sotm(&posters, SotmTab::Staff).len(), 1);
    }

    #[test]
    fn test_dedupe_by_id() {
        let existing = vec![1u64, 2, 3];
        let merged = dedupe_by_id(&existing, vec![3, 4, 4, 5], |x| *x);
        assert_eq!(merged, vec![4, 5]);
    }
}
