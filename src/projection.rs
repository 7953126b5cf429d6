//! View Projections
//!
//! Pure, synchronous derivations from the aggregated collections to what the
//! pages render: lane slicing, search filtering, track grouping, and the
//! active/past event split. No I/O anywhere in this module.

use chrono::NaiveDate;

use crate::models::{EnrichedChallenge, Event, EventStatus};

/// The main stage shows the first six items; everything after is side content.
pub const MAIN_LANE_SIZE: usize = 6;

/// Grouping key for challenges without an organization
pub const GENERAL_TRACK: &str = "General Track";

/// Which slice of the collection a page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lane {
    #[default]
    Main,
    Side,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeFilter {
    pub lane: Lane,
    pub search: String,
}

/// Ordered challenge group, keyed by organization name
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGroup {
    pub name: String,
    pub challenges: Vec<EnrichedChallenge>,
}

/// What the rendering layer consumes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub groups: Vec<TrackGroup>,
    pub flat_count: usize,
}

/// Events partitioned for the listing page, already sorted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSplit {
    pub active: Vec<Event>,
    pub past: Vec<Event>,
}

fn lane_slice<T>(items: &[T], lane: Lane) -> &[T] {
    let cut = items.len().min(MAIN_LANE_SIZE);
    match lane {
        Lane::Main => &items[..cut],
        Lane::Side => &items[cut..],
    }
}

/// Case-insensitive substring match; absent fields never match.
fn matches_search(fields: &[Option<&str>], needle_lower: &str) -> bool {
    fields.iter().any(|field| {
        field
            .map(|text| text.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    })
}

pub fn track_name(challenge: &EnrichedChallenge) -> &str {
    challenge
        .organization
        .as_ref()
        .map(|org| org.name.as_str())
        .unwrap_or(GENERAL_TRACK)
}

/// Anchor element id for a track section, shared by the section markup and
/// the jump-link rail.
pub fn track_anchor_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("track-{}", slug)
}

/// Fold challenges into ordered groups: key insertion follows first
/// occurrence, per-key order is preserved. Stable partition, not a sort.
pub fn group_by_track(challenges: &[&EnrichedChallenge]) -> Vec<TrackGroup> {
    let mut groups: Vec<TrackGroup> = Vec::new();
    for challenge in challenges {
        let name = track_name(challenge);
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.challenges.push((*challenge).clone()),
            None => groups.push(TrackGroup {
                name: name.to_string(),
                challenges: vec![(*challenge).clone()],
            }),
        }
    }
    groups
}

/// Lane slice, then search within the lane, then group. The boundary the
/// challenge pages render from.
pub fn project_challenges(all: &[EnrichedChallenge], filter: &ChallengeFilter) -> Projection {
    let lane = lane_slice(all, filter.lane);
    let needle = filter.search.trim().to_lowercase();

    let filtered: Vec<&EnrichedChallenge> = lane
        .iter()
        .filter(|ch| {
            needle.is_empty()
                || matches_search(
                    &[Some(ch.challenge.name.as_str()), ch.challenge.description.as_deref(), None],
                    &needle,
                )
        })
        .collect();

    Projection {
        flat_count: filtered.len(),
        groups: group_by_track(&filtered),
    }
}

/// Proxy dates arrive either as `YYYY-MM-DD` or as a full ISO timestamp;
/// only the date part matters here.
fn parse_start_date(event: &Event) -> Option<NaiveDate> {
    let raw = event.start_date.as_deref()?;
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn is_active(event: &Event, today: NaiveDate) -> bool {
    if event.status == EventStatus::Cancelled {
        return false;
    }
    if event.status == EventStatus::Ongoing {
        return true;
    }
    // Unparsable or absent dates fall through to the past partition
    parse_start_date(event).map(|date| date >= today).unwrap_or(false)
}

fn sort_dated_last(events: &mut [Event], descending: bool) {
    events.sort_by(|a, b| {
        match (parse_start_date(a), parse_start_date(b)) {
            (Some(da), Some(db)) => {
                if descending {
                    db.cmp(&da)
                } else {
                    da.cmp(&db)
                }
            }
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

/// Split events for the listing page.
///
/// Active keeps non-cancelled events that are ongoing or start today or
/// later, ascending by start date. Past is everything else, descending.
/// The two sort orders are deliberately different; dateless items go last
/// in both.
pub fn split_events(events: &[Event], search: &str, today: NaiveDate) -> EventSplit {
    let needle = search.trim().to_lowercase();

    let (mut active, mut past): (Vec<Event>, Vec<Event>) = events
        .iter()
        .filter(|event| {
            needle.is_empty()
                || matches_search(
                    &[
                        Some(event.name.as_str()),
                        event.description.as_deref(),
                        event.location.as_deref(),
                    ],
                    &needle,
                )
        })
        .cloned()
        .partition(|event| is_active(event, today));

    sort_dated_last(&mut active, false);
    sort_dated_last(&mut past, true);

    EventSplit { active, past }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Challenge, EventSummary, Organization};

    fn make_event(event_id: u32, start_date: Option<&str>, status: EventStatus) -> Event {
        Event {
            event_id,
            name: format!("Event {}", event_id),
            slug: format!("event-{}", event_id),
            status,
            start_date: start_date.map(|s| s.to_string()),
            end_date: None,
            location: Some("Zurich".to_string()),
            description: Some("A weekend of building".to_string()),
            cover_image_url: None,
            is_public: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn make_enriched(challenge_id: u32, org: Option<&str>) -> EnrichedChallenge {
        EnrichedChallenge {
            challenge: Challenge {
                challenge_id,
                event_id: 1,
                organization_id: org.map(|_| challenge_id),
                name: format!("Challenge {}", challenge_id),
                description: Some("Build something".to_string()),
                created_at: None,
                updated_at: None,
            },
            organization: org.map(|name| Organization {
                organization_id: challenge_id,
                name: name.to_string(),
                slug: name.to_lowercase(),
            }),
            event: EventSummary {
                event_id: 1,
                name: "Event 1".to_string(),
            },
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn main_and_side_partition_the_collection() {
        for len in 0..10 {
            let all: Vec<EnrichedChallenge> =
                (0..len).map(|i| make_enriched(i as u32, None)).collect();

            let main = lane_slice(&all, Lane::Main);
            let side = lane_slice(&all, Lane::Side);

            assert_eq!(main.len(), len.min(MAIN_LANE_SIZE));
            assert_eq!(main.len() + side.len(), len);
            let rejoined: Vec<u32> = main
                .iter()
                .chain(side.iter())
                .map(|c| c.challenge.challenge_id)
                .collect();
            let original: Vec<u32> = all.iter().map(|c| c.challenge.challenge_id).collect();
            assert_eq!(rejoined, original);
        }
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let mut ch = make_enriched(1, None);
        ch.challenge.name = "Robot Arena".to_string();
        ch.challenge.description = Some("LLM judging".to_string());
        let all = vec![ch];

        let hit = project_challenges(
            &all,
            &ChallengeFilter { lane: Lane::Main, search: "ROBOT".to_string() },
        );
        assert_eq!(hit.flat_count, 1);

        let by_description = project_challenges(
            &all,
            &ChallengeFilter { lane: Lane::Main, search: "llm".to_string() },
        );
        assert_eq!(by_description.flat_count, 1);

        let miss = project_challenges(
            &all,
            &ChallengeFilter { lane: Lane::Main, search: "blockchain".to_string() },
        );
        assert_eq!(miss.flat_count, 0);
        assert!(miss.groups.is_empty());
    }

    #[test]
    fn grouping_follows_first_occurrence_and_is_stable() {
        let all = vec![
            make_enriched(1, Some("Acme")),
            make_enriched(2, None),
            make_enriched(3, Some("Globex")),
            make_enriched(4, Some("Acme")),
        ];
        let refs: Vec<&EnrichedChallenge> = all.iter().collect();

        let first = group_by_track(&refs);
        let second = group_by_track(&refs);

        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", GENERAL_TRACK, "Globex"]);
        let acme_ids: Vec<u32> = first[0].challenges.iter().map(|c| c.challenge.challenge_id).collect();
        assert_eq!(acme_ids, vec![1, 4]);
    }

    #[test]
    fn missing_organization_falls_back_to_general_track() {
        let all = vec![make_enriched(10, None)];
        let projection = project_challenges(&all, &ChallengeFilter::default());

        assert_eq!(projection.groups.len(), 1);
        assert_eq!(projection.groups[0].name, GENERAL_TRACK);
        assert_eq!(projection.flat_count, 1);
    }

    #[test]
    fn side_lane_groups_only_the_tail() {
        let all: Vec<EnrichedChallenge> = (0..8)
            .map(|i| make_enriched(i, Some(if i < 6 { "Acme" } else { "Globex" })))
            .collect();

        let side = project_challenges(
            &all,
            &ChallengeFilter { lane: Lane::Side, search: String::new() },
        );

        assert_eq!(side.flat_count, 2);
        assert_eq!(side.groups.len(), 1);
        assert_eq!(side.groups[0].name, "Globex");
    }

    #[test]
    fn active_past_split_is_asymmetric() {
        let events = vec![
            make_event(1, Some("2025-01-01"), EventStatus::Published),
            make_event(2, Some("2025-06-01"), EventStatus::Published),
            make_event(3, None, EventStatus::Published),
        ];

        let split = split_events(&events, "", today());

        let active: Vec<u32> = split.active.iter().map(|e| e.event_id).collect();
        let past: Vec<u32> = split.past.iter().map(|e| e.event_id).collect();
        assert_eq!(active, vec![2]);
        // Most recent first, dateless entry after the dated one
        assert_eq!(past, vec![1, 3]);
    }

    #[test]
    fn cancelled_events_never_count_as_active() {
        let events = vec![make_event(1, Some("2099-01-01"), EventStatus::Cancelled)];
        let split = split_events(&events, "", today());

        assert!(split.active.is_empty());
        assert_eq!(split.past.len(), 1);
    }

    #[test]
    fn ongoing_event_without_date_is_active_and_sorts_last() {
        let events = vec![
            make_event(1, None, EventStatus::Ongoing),
            make_event(2, Some("2025-04-01"), EventStatus::Published),
        ];

        let split = split_events(&events, "", today());

        let active: Vec<u32> = split.active.iter().map(|e| e.event_id).collect();
        assert_eq!(active, vec![2, 1]);
    }

    #[test]
    fn active_sorts_ascending_past_descending() {
        let events = vec![
            make_event(1, Some("2025-05-01"), EventStatus::Published),
            make_event(2, Some("2025-04-01"), EventStatus::Published),
            make_event(3, Some("2025-02-01"), EventStatus::Published),
            make_event(4, Some("2025-01-01"), EventStatus::Published),
        ];

        let split = split_events(&events, "", today());

        let active: Vec<u32> = split.active.iter().map(|e| e.event_id).collect();
        let past: Vec<u32> = split.past.iter().map(|e| e.event_id).collect();
        assert_eq!(active, vec![2, 1]);
        assert_eq!(past, vec![3, 4]);
    }

    #[test]
    fn event_search_covers_location() {
        let events = vec![
            make_event(1, Some("2099-01-01"), EventStatus::Published),
            {
                let mut e = make_event(2, Some("2099-01-01"), EventStatus::Published);
                e.location = Some("Berlin".to_string());
                e
            },
        ];

        let split = split_events(&events, "berlin", today());

        assert_eq!(split.active.len(), 1);
        assert_eq!(split.active[0].event_id, 2);
    }

    #[test]
    fn timestamp_start_dates_parse_by_date_part() {
        let events = vec![make_event(1, Some("2099-06-01T09:00:00Z"), EventStatus::Published)];
        let split = split_events(&events, "", today());
        assert_eq!(split.active.len(), 1);
    }

    #[test]
    fn track_anchor_ids_are_dom_safe() {
        assert_eq!(track_anchor_id("General Track"), "track-general-track");
        assert_eq!(track_anchor_id("Acme & Co."), "track-acme---co-");
    }
}
