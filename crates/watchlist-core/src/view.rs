use serde::{Deserialize, Serialize};
use watchlist_models::{ExternalId, Impression, MediaType, WatchlistEntry};

use crate::{KeyValueStorage, WatchlistStore};

/// Top-level tab of the watchlist screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListTab {
    ToWatch,
    Watched,
}

/// Sub-filter of the watched tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImpressionFilter {
    #[default]
    All,
    Only(Impression),
}

/// What the host's detail-page button should show for a title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    NotInList,
    ToWatch,
    Watched(Impression),
}

/// Menu actions offered for an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Open,
    MarkWatched,
    MarkUnwatched,
    Remove,
}

impl CardStatus {
    pub fn of(entry: Option<&WatchlistEntry>) -> Self {
        match entry {
            None => CardStatus::NotInList,
            Some(entry) => match (entry.watched, entry.impression) {
                (true, Some(impression)) => CardStatus::Watched(impression),
                _ => CardStatus::ToWatch,
            },
        }
    }

    pub fn is_in_list(&self) -> bool {
        !matches!(self, CardStatus::NotInList)
    }
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Open => "Open",
            CardAction::MarkWatched => "Mark as watched",
            CardAction::MarkUnwatched => "Back to watch",
            CardAction::Remove => "Remove from list",
        }
    }
}

/// Actions for an entry: open, the one watch transition that applies, remove.
pub fn actions_for(entry: &WatchlistEntry) -> Vec<CardAction> {
    let toggle = if entry.watched {
        CardAction::MarkUnwatched
    } else {
        CardAction::MarkWatched
    };
    vec![CardAction::Open, toggle, CardAction::Remove]
}

/// Unwatched entries, most recently added first.
pub fn to_watch(items: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
    let mut list: Vec<WatchlistEntry> = items.iter().filter(|i| !i.watched).cloned().collect();
    list.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    list
}

/// Watched entries, most recently watched first.
pub fn watched(items: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
    filter_watched(items, |_| true)
}

pub fn by_impression(items: &[WatchlistEntry], impression: Impression) -> Vec<WatchlistEntry> {
    filter_watched(items, |i| i.impression == Some(impression))
}

fn filter_watched<F>(items: &[WatchlistEntry], keep: F) -> Vec<WatchlistEntry>
where
    F: Fn(&WatchlistEntry) -> bool,
{
    let mut list: Vec<WatchlistEntry> = items
        .iter()
        .filter(|i| i.watched && keep(*i))
        .cloned()
        .collect();
    list.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
    list
}

impl<S: KeyValueStorage> WatchlistStore<S> {
    /// Entries for a tab; the impression filter only applies to the watched tab.
    pub fn browse(&self, tab: ListTab, filter: ImpressionFilter) -> Vec<WatchlistEntry> {
        match (tab, filter) {
            (ListTab::ToWatch, _) => self.list_to_watch(),
            (ListTab::Watched, ImpressionFilter::All) => self.list_watched(),
            (ListTab::Watched, ImpressionFilter::Only(impression)) => {
                self.list_by_impression(impression)
            }
        }
    }

    pub fn card_status(&self, external_id: impl Into<ExternalId>, media_type: MediaType) -> CardStatus {
        let entry = self.find_by_external_id(external_id, media_type);
        CardStatus::of(entry.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use watchlist_models::CatalogCard;

    fn entries() -> Vec<WatchlistEntry> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut items: Vec<WatchlistEntry> = (1..=4u64)
            .map(|id| {
                WatchlistEntry::from_card(
                    &CatalogCard::movie(id, format!("Movie {}", id)),
                    base + Duration::days(id as i64),
                )
            })
            .collect();
        // Watched in reverse id order: 2 first, then 1
        items[1].mark_watched(Impression::Ok, base + Duration::days(10));
        items[0].mark_watched(Impression::Liked, base + Duration::days(11));
        items
    }

    fn ids(list: &[WatchlistEntry]) -> Vec<&str> {
        list.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_to_watch_newest_added_first() {
        let items = entries();
        assert_eq!(ids(&to_watch(&items)), vec!["tmdb_movie_4", "tmdb_movie_3"]);
    }

    #[test]
    fn test_watched_newest_watched_first() {
        let items = entries();
        assert_eq!(ids(&watched(&items)), vec!["tmdb_movie_1", "tmdb_movie_2"]);
    }

    #[test]
    fn test_by_impression() {
        let items = entries();
        assert_eq!(ids(&by_impression(&items, Impression::Ok)), vec!["tmdb_movie_2"]);
        assert!(by_impression(&items, Impression::Disliked).is_empty());
    }

    #[test]
    fn test_by_impression_newest_watched_first() {
        let mut items = entries();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        items[3].mark_watched(Impression::Liked, base + Duration::days(12));
        items[2].mark_watched(Impression::Liked, base + Duration::days(9));

        assert_eq!(
            ids(&by_impression(&items, Impression::Liked)),
            vec!["tmdb_movie_4", "tmdb_movie_1", "tmdb_movie_3"]
        );
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let items: Vec<WatchlistEntry> = (1..=3u64)
            .map(|id| WatchlistEntry::from_card(&CatalogCard::movie(id, "M"), at))
            .collect();
        assert_eq!(
            ids(&to_watch(&items)),
            vec!["tmdb_movie_1", "tmdb_movie_2", "tmdb_movie_3"]
        );
    }

    #[test]
    fn test_card_status_and_actions() {
        let items = entries();
        assert_eq!(CardStatus::of(None), CardStatus::NotInList);
        assert_eq!(CardStatus::of(Some(&items[0])), CardStatus::Watched(Impression::Liked));
        assert_eq!(CardStatus::of(Some(&items[3])), CardStatus::ToWatch);
        assert!(!CardStatus::NotInList.is_in_list());

        assert_eq!(
            actions_for(&items[0]),
            vec![CardAction::Open, CardAction::MarkUnwatched, CardAction::Remove]
        );
        assert_eq!(
            actions_for(&items[3]),
            vec![CardAction::Open, CardAction::MarkWatched, CardAction::Remove]
        );
    }
}
