use crate::headline::HeadlineItem;
use std::collections::HashSet;

pub const MARQUEE_LIMIT: usize = 7;

/// Ordering key of a candidate. Derived `Ord` puts `Untimestamped` below every
/// `Timestamped` value, so carried-over entries sort after all fresh ones.
///
/// Timestamps are ISO-8601 strings compared lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Untimestamped,
    Timestamped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: SortKey,
    pub item: HeadlineItem,
}

impl Candidate {
    pub fn timestamped(created_at: impl Into<String>, item: HeadlineItem) -> Self {
        Self {
            key: SortKey::Timestamped(created_at.into()),
            item,
        }
    }

    /// An entry of the previously published list; it only fills spare slots.
    pub fn carried_over(item: HeadlineItem) -> Self {
        Self {
            key: SortKey::Untimestamped,
            item,
        }
    }
}

/// Newest first, first occurrence of each rendered item kept, at most `limit`.
///
/// The sort is stable: candidates with equal keys keep their input order.
pub fn uniq_limit(mut candidates: Vec<Candidate>, limit: usize) -> Vec<HeadlineItem> {
    candidates.sort_by(|a, b| b.key.cmp(&a.key));

    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(limit.min(candidates.len()));
    for Candidate { item, .. } in candidates {
        if result.len() == limit {
            break;
        }
        if seen.insert(item.clone()) {
            result.push(item);
        }
    }
    result
}

/// Builds the list to publish.
///
/// When this run saw new headlines they lead and the previous list pads the
/// remaining slots. Otherwise the list is rebuilt from every headline still
/// on the forum and the previous list is ignored.
pub fn select_marquee(
    new_candidates: Vec<Candidate>,
    all_candidates: Vec<Candidate>,
    previous: &[HeadlineItem],
) -> Vec<HeadlineItem> {
    if new_candidates.is_empty() {
        return uniq_limit(all_candidates, MARQUEE_LIMIT);
    }

    let mut combined = new_candidates;
    combined.extend(previous.iter().cloned().map(Candidate::carried_over));
    uniq_limit(combined, MARQUEE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(s: &str) -> HeadlineItem {
        HeadlineItem::from(format!("<a>{s}</a>"))
    }

    fn at(ts: &str, s: &str) -> Candidate {
        Candidate::timestamped(ts, item(s))
    }

    #[test]
    fn untimestamped_sorts_below_everything() {
        assert!(SortKey::Untimestamped < SortKey::Timestamped(String::new()));
        assert!(
            SortKey::Timestamped("2024-01-01".into()) < SortKey::Timestamped("2024-01-02".into())
        );
    }

    #[test]
    fn new_headlines_lead_previous_list() {
        let previous = vec![item("OldA"), item("OldB")];
        let new = vec![at("2024-05-01T10:00:00Z", "New1")];

        let result = select_marquee(new, Vec::new(), &previous);

        assert_eq!(result, vec![item("New1"), item("OldA"), item("OldB")]);
    }

    #[test]
    fn without_new_headlines_previous_list_is_ignored() {
        let previous = vec![item("Stale")];
        let all = vec![
            at("2024-05-01T10:00:00Z", "A"),
            at("2024-05-03T10:00:00Z", "C"),
            at("2024-05-02T10:00:00Z", "B"),
        ];

        let result = select_marquee(Vec::new(), all, &previous);

        assert_eq!(result, vec![item("C"), item("B"), item("A")]);
    }

    #[test]
    fn nothing_anywhere_publishes_empty_list() {
        assert!(select_marquee(Vec::new(), Vec::new(), &[item("Old")]).is_empty());
    }

    #[test]
    fn keeps_seven_most_recent() {
        let new: Vec<_> = (1..=8)
            .map(|day| at(&format!("2024-05-0{day}T00:00:00Z"), &format!("H{day}")))
            .collect();

        let result = select_marquee(new, Vec::new(), &[]);

        let expected: Vec<_> = (2..=8).rev().map(|day| item(&format!("H{day}"))).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn previous_entry_equal_to_new_one_is_not_repeated() {
        let previous = vec![item("Same"), item("Old")];
        let new = vec![at("2024-05-01T10:00:00Z", "Same")];

        let result = select_marquee(new, Vec::new(), &previous);

        assert_eq!(result, vec![item("Same"), item("Old")]);
    }

    #[test]
    fn previous_list_only_fills_remaining_capacity() {
        let previous: Vec<_> = (0..7).map(|i| item(&format!("Old{i}"))).collect();
        let new = vec![
            at("2024-05-01T10:00:00Z", "N1"),
            at("2024-05-02T10:00:00Z", "N2"),
        ];

        let result = select_marquee(new, Vec::new(), &previous);

        assert_eq!(result.len(), MARQUEE_LIMIT);
        assert_eq!(&result[..2], &[item("N2"), item("N1")]);
        assert_eq!(&result[2..], &previous[..5]);
    }

    fn candidate_strategy() -> impl Strategy<Value = Candidate> {
        (
            prop::option::of("2024-0[1-9]-[0-2][0-9]T[0-2][0-9]:00:00Z"),
            "[A-E]",
        )
            .prop_map(|(ts, title)| match ts {
                Some(ts) => Candidate::timestamped(ts, item(&title)),
                None => Candidate::carried_over(item(&title)),
            })
    }

    proptest! {
        #[test]
        fn output_is_bounded_and_unique(
            candidates in prop::collection::vec(candidate_strategy(), 0..30),
            limit in 0usize..10,
        ) {
            let result = uniq_limit(candidates, limit);
            prop_assert!(result.len() <= limit);
            let unique: HashSet<_> = result.iter().collect();
            prop_assert_eq!(unique.len(), result.len());
        }

        #[test]
        fn timestamped_entries_come_first_newest_first(
            candidates in prop::collection::vec(candidate_strategy(), 0..30),
        ) {
            let result = uniq_limit(candidates.clone(), MARQUEE_LIMIT);

            // Best key of each distinct item, as the walk keeps the first
            // (highest-keyed) occurrence.
            let key_of = |it: &HeadlineItem| {
                candidates
                    .iter()
                    .filter(|c| &c.item == it)
                    .map(|c| c.key.clone())
                    .max()
                    .unwrap()
            };
            let keys: Vec<SortKey> = result.iter().map(key_of).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
