//! Challenge Aggregation
//!
//! Fans out one challenge fetch per event and one organization fetch per
//! distinct organization id, all concurrent, then joins the results into
//! the enriched challenge list the pages render from.

use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;

use crate::api::{self, ApiError};
use crate::models::{Challenge, EnrichedChallenge, Event, EventSummary, Organization};

/// Outcome of one sub-fetch inside the fan-out. A `Gap` is recorded, never
/// propagated, so one bad child does not abort the whole pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SubFetch<T> {
    Ok(T),
    Gap,
}

impl<T> SubFetch<T> {
    fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => SubFetch::Ok(value),
            Err(_) => SubFetch::Gap,
        }
    }
}

/// Data source for the fan-out pass. Implemented by the REST bindings and
/// by in-memory fakes in tests.
pub trait ChallengeSource {
    async fn event_challenges(&self, event_id: u32) -> Result<Vec<Challenge>, ApiError>;
    async fn organization(&self, organization_id: u32) -> Result<Organization, ApiError>;
}

/// Live source backed by the proxy
pub struct RestSource;

impl ChallengeSource for RestSource {
    async fn event_challenges(&self, event_id: u32) -> Result<Vec<Challenge>, ApiError> {
        api::list_event_challenges(event_id).await
    }

    async fn organization(&self, organization_id: u32) -> Result<Organization, ApiError> {
        api::get_organization(organization_id).await
    }
}

/// Result of one aggregation pass. Gap lists let callers tell "genuinely
/// empty" from "fetch failed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub challenges: Vec<EnrichedChallenge>,
    /// Events whose challenge fetch failed
    pub event_gaps: Vec<u32>,
    /// Organization ids whose lookup failed
    pub organization_gaps: Vec<u32>,
}

/// Build the enriched challenge list for `events`.
///
/// Ordering: event enumeration order, then each event's challenge-return
/// order. Never sorted.
pub async fn aggregate<S: ChallengeSource>(source: &S, events: &[Event]) -> Aggregation {
    // Step A: one concurrent challenge fetch per event
    let fetches = events.iter().map(|event| source.event_challenges(event.event_id));
    let results = join_all(fetches).await;

    let mut tagged: Vec<(Challenge, EventSummary)> = Vec::new();
    let mut event_gaps = Vec::new();
    for (event, result) in events.iter().zip(results) {
        match SubFetch::from_result(result) {
            SubFetch::Ok(list) => {
                let summary = EventSummary {
                    event_id: event.event_id,
                    name: event.name.clone(),
                };
                tagged.extend(list.into_iter().map(|ch| (ch, summary.clone())));
            }
            SubFetch::Gap => event_gaps.push(event.event_id),
        }
    }

    // Step B: one fetch per distinct organization id, never one per challenge
    let wanted: BTreeSet<u32> = tagged
        .iter()
        .filter_map(|(ch, _)| ch.organization_id)
        .collect();
    let org_results = join_all(wanted.iter().map(|id| source.organization(*id))).await;

    let mut organizations: HashMap<u32, Organization> = HashMap::new();
    let mut organization_gaps = Vec::new();
    for (id, result) in wanted.iter().zip(org_results) {
        match SubFetch::from_result(result) {
            SubFetch::Ok(org) => {
                organizations.insert(*id, org);
            }
            SubFetch::Gap => organization_gaps.push(*id),
        }
    }

    // Step C: join organizations back onto every challenge
    let challenges = tagged
        .into_iter()
        .map(|(challenge, event)| EnrichedChallenge {
            organization: challenge
                .organization_id
                .and_then(|id| organizations.get(&id).cloned()),
            challenge,
            event,
        })
        .collect();

    Aggregation {
        challenges,
        event_gaps,
        organization_gaps,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;
    use crate::models::EventStatus;

    fn make_event(event_id: u32, name: &str) -> Event {
        Event {
            event_id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            status: EventStatus::Published,
            start_date: Some("2099-01-01".to_string()),
            end_date: None,
            location: None,
            description: None,
            cover_image_url: None,
            is_public: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn make_challenge(challenge_id: u32, event_id: u32, organization_id: Option<u32>) -> Challenge {
        Challenge {
            challenge_id,
            event_id,
            organization_id,
            name: format!("Challenge {}", challenge_id),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Canned responses plus call recording
    struct FakeSource {
        challenges: Vec<(u32, Result<Vec<Challenge>, ApiError>)>,
        organizations: Vec<(u32, Result<Organization, ApiError>)>,
        org_calls: RefCell<Vec<u32>>,
    }

    impl FakeSource {
        fn new(
            challenges: Vec<(u32, Result<Vec<Challenge>, ApiError>)>,
            organizations: Vec<(u32, Result<Organization, ApiError>)>,
        ) -> Self {
            FakeSource {
                challenges,
                organizations,
                org_calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChallengeSource for FakeSource {
        async fn event_challenges(&self, event_id: u32) -> Result<Vec<Challenge>, ApiError> {
            self.challenges
                .iter()
                .find(|(id, _)| *id == event_id)
                .map(|(_, result)| result.clone())
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn organization(&self, organization_id: u32) -> Result<Organization, ApiError> {
            self.org_calls.borrow_mut().push(organization_id);
            self.organizations
                .iter()
                .find(|(id, _)| *id == organization_id)
                .map(|(_, result)| result.clone())
                .unwrap_or(Err(ApiError::Status(404)))
        }
    }

    fn acme() -> Organization {
        Organization {
            organization_id: 5,
            name: "Acme".to_string(),
            slug: "acme".to_string(),
        }
    }

    #[test]
    fn enriches_challenge_with_organization_and_event() {
        let events = vec![make_event(1, "Spring Hack")];
        let source = FakeSource::new(
            vec![(1, Ok(vec![make_challenge(10, 1, Some(5))]))],
            vec![(5, Ok(acme()))],
        );

        let agg = block_on(aggregate(&source, &events));

        assert_eq!(agg.challenges.len(), 1);
        let enriched = &agg.challenges[0];
        assert_eq!(enriched.organization.as_ref().unwrap().name, "Acme");
        assert_eq!(enriched.event.name, "Spring Hack");
        assert_eq!(enriched.event.event_id, 1);
        assert!(agg.event_gaps.is_empty());
        assert!(agg.organization_gaps.is_empty());
    }

    #[test]
    fn organization_fetch_is_deduplicated() {
        let events = vec![make_event(1, "Spring Hack")];
        let source = FakeSource::new(
            vec![(
                1,
                Ok(vec![
                    make_challenge(10, 1, Some(5)),
                    make_challenge(11, 1, Some(5)),
                    make_challenge(12, 1, Some(5)),
                ]),
            )],
            vec![(5, Ok(acme()))],
        );

        let agg = block_on(aggregate(&source, &events));

        assert_eq!(source.org_calls.borrow().len(), 1);
        assert_eq!(agg.challenges.len(), 3);
        for enriched in &agg.challenges {
            assert_eq!(enriched.organization.as_ref().unwrap().name, "Acme");
        }
    }

    #[test]
    fn failed_event_fetch_degrades_to_gap() {
        let events = vec![
            make_event(1, "One"),
            make_event(2, "Two"),
            make_event(3, "Three"),
        ];
        let source = FakeSource::new(
            vec![
                (1, Ok(vec![make_challenge(10, 1, None), make_challenge(11, 1, None)])),
                (2, Err(ApiError::Status(500))),
                (3, Ok(vec![make_challenge(30, 3, None)])),
            ],
            vec![],
        );

        let agg = block_on(aggregate(&source, &events));

        assert_eq!(agg.challenges.len(), 3);
        assert_eq!(agg.event_gaps, vec![2]);
        let ids: Vec<u32> = agg.challenges.iter().map(|c| c.challenge.challenge_id).collect();
        assert_eq!(ids, vec![10, 11, 30]);
    }

    #[test]
    fn failed_organization_fetch_leaves_challenge_without_one() {
        let events = vec![make_event(1, "Spring Hack")];
        let source = FakeSource::new(
            vec![(1, Ok(vec![make_challenge(10, 1, Some(5))]))],
            vec![(5, Err(ApiError::Status(500)))],
        );

        let agg = block_on(aggregate(&source, &events));

        assert_eq!(agg.challenges.len(), 1);
        assert!(agg.challenges[0].organization.is_none());
        assert_eq!(agg.organization_gaps, vec![5]);
    }

    #[test]
    fn output_preserves_event_then_return_order() {
        let events = vec![make_event(2, "Two"), make_event(1, "One")];
        let source = FakeSource::new(
            vec![
                (1, Ok(vec![make_challenge(5, 1, None)])),
                (2, Ok(vec![make_challenge(9, 2, None), make_challenge(3, 2, None)])),
            ],
            vec![],
        );

        let agg = block_on(aggregate(&source, &events));

        let ids: Vec<u32> = agg.challenges.iter().map(|c| c.challenge.challenge_id).collect();
        // Event 2 enumerates first, its challenges keep return order
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn no_organization_id_means_no_lookup() {
        let events = vec![make_event(1, "One")];
        let source = FakeSource::new(vec![(1, Ok(vec![make_challenge(10, 1, None)]))], vec![]);

        let agg = block_on(aggregate(&source, &events));

        assert!(source.org_calls.borrow().is_empty());
        assert!(agg.challenges[0].organization.is_none());
        assert!(agg.organization_gaps.is_empty());
    }
}
