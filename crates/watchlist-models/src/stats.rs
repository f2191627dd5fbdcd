use serde::{Deserialize, Serialize};

use crate::{Impression, WatchlistEntry};

/// Badge counts for the watchlist tabs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStats {
    pub total: usize,
    pub to_watch: usize,
    pub watched: usize,
    pub liked: usize,
    pub ok: usize,
    pub disliked: usize,
}

impl WatchlistStats {
    /// Single pass over the entries.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a WatchlistEntry>,
    {
        let mut stats = WatchlistStats::default();
        for entry in entries {
            stats.total += 1;
            if !entry.watched {
                stats.to_watch += 1;
                continue;
            }
            stats.watched += 1;
            match entry.impression {
                Some(Impression::Liked) => stats.liked += 1,
                Some(Impression::Ok) => stats.ok += 1,
                Some(Impression::Disliked) => stats.disliked += 1,
                None => {}
            }
        }
        stats
    }

    pub fn count_for(&self, impression: Impression) -> usize {
        match impression {
            Impression::Liked => self.liked,
            Impression::Ok => self.ok,
            Impression::Disliked => self.disliked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogCard;
    use chrono::Utc;

    #[test]
    fn test_stats_counts() {
        let now = Utc::now();
        let mut entries: Vec<WatchlistEntry> = (1..=5u64)
            .map(|id| WatchlistEntry::from_card(&CatalogCard::movie(id, "M"), now))
            .collect();
        entries[0].mark_watched(Impression::Liked, now);
        entries[1].mark_watched(Impression::Liked, now);
        entries[2].mark_watched(Impression::Disliked, now);

        let stats = WatchlistStats::from_entries(&entries);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.to_watch, 2);
        assert_eq!(stats.watched, 3);
        assert_eq!(stats.liked, 2);
        assert_eq!(stats.ok, 0);
        assert_eq!(stats.disliked, 1);
        assert_eq!(stats.count_for(Impression::Liked), 2);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let value = serde_json::to_value(WatchlistStats::default()).unwrap();
        assert_eq!(value["toWatch"], 0);
        assert_eq!(value["total"], 0);
    }
}
