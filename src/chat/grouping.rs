use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Timelike};

use crate::models::Conversation;

const DAY_MS: i64 = 86_400_000;

/// Conversations partitioned by age for the sidebar listing. Every input
/// conversation lands in exactly one bucket; in-bucket order is the store's
/// newest-created-first order.
#[derive(Debug, Default)]
pub struct GroupedConversations<'a> {
    pub today: Vec<&'a Conversation>,
    pub yesterday: Vec<&'a Conversation>,
    pub last_week: Vec<&'a Conversation>,
    pub older: Vec<&'a Conversation>,
}

impl<'a> GroupedConversations<'a> {
    /// Buckets in display order, with their sidebar labels.
    pub fn sections(&self) -> [(&'static str, &[&'a Conversation]); 4] {
        [
            ("Today", self.today.as_slice()),
            ("Yesterday", self.yesterday.as_slice()),
            ("Last 7 Days", self.last_week.as_slice()),
            ("Older", self.older.as_slice()),
        ]
    }
}

/// Partition `conversations` by creation timestamp against day boundaries
/// derived from midnight in `now`'s timezone. Days are a fixed 86 400 000 ms.
pub fn group_by_age<'a, Tz: TimeZone>(
    conversations: &'a [Conversation],
    now: DateTime<Tz>,
) -> GroupedConversations<'a> {
    let today_start = midnight_millis(&now);
    let yesterday_start = today_start - DAY_MS;
    let week_start = today_start - 7 * DAY_MS;

    let mut groups = GroupedConversations::default();
    for conversation in conversations {
        if conversation.timestamp >= today_start {
            groups.today.push(conversation);
        } else if conversation.timestamp >= yesterday_start {
            groups.yesterday.push(conversation);
        } else if conversation.timestamp >= week_start {
            groups.last_week.push(conversation);
        } else {
            groups.older.push(conversation);
        }
    }
    groups
}

fn midnight_millis<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        // Midnight fell into a DST gap; measure back from `now` instead.
        LocalResult::None => {
            now.timestamp_millis() - i64::from(now.num_seconds_from_midnight()) * 1000
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conversation_at(id: &str, timestamp: i64) -> Conversation {
        Conversation::new(id.to_string(), "hello", timestamp)
    }

    #[test]
    fn buckets_split_on_local_midnight_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap();
        let today_start = Utc
            .with_ymd_and_hms(2025, 3, 10, 0, 0, 0)
            .unwrap()
            .timestamp_millis();

        let conversations = vec![
            conversation_at("a", now.timestamp_millis()),
            conversation_at("b", today_start),
            conversation_at("c", today_start - 1),
            conversation_at("d", today_start - DAY_MS),
            conversation_at("e", today_start - DAY_MS - 1),
            conversation_at("f", today_start - 7 * DAY_MS),
            conversation_at("g", today_start - 7 * DAY_MS - 1),
        ];

        let groups = group_by_age(&conversations, now);

        fn ids<'a>(bucket: &[&'a Conversation]) -> Vec<&'a str> {
            bucket.iter().map(|c| c.id.as_str()).collect()
        }
        assert_eq!(ids(&groups.today), vec!["a", "b"]);
        assert_eq!(ids(&groups.yesterday), vec!["c", "d"]);
        assert_eq!(ids(&groups.last_week), vec!["e", "f"]);
        assert_eq!(ids(&groups.older), vec!["g"]);
    }

    #[test]
    fn grouping_is_a_partition() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let base = now.timestamp_millis();

        // Spread creations over a month, newest first like the store keeps them.
        let conversations: Vec<Conversation> = (0..30)
            .map(|i| conversation_at(&format!("conv-{}", i), base - i * 11 * 3_600_000))
            .collect();

        let groups = group_by_age(&conversations, now);
        let total = groups.today.len()
            + groups.yesterday.len()
            + groups.last_week.len()
            + groups.older.len();
        assert_eq!(total, conversations.len());

        let mut seen: Vec<&str> = groups
            .sections()
            .iter()
            .flat_map(|(_, bucket)| bucket.iter().map(|c| c.id.as_str()))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), conversations.len());
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let groups = group_by_age(&[], now);
        assert!(groups.sections().iter().all(|(_, bucket)| bucket.is_empty()));
    }
}
