use std::sync::Arc;
use std::time::Duration;
use futures::future;
use time::Time;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};
use crate::models::restaurant::Restaurant;
use crate::models::search::{SearchRequest, SearchResult};
use crate::repositories::directory::{
    spawn_find_by_attributes, spawn_find_by_name, DirectoryQuery, DirectoryResult, Predicate,
    RestaurantDirectory,
};
use crate::services::error::{Result, SearchError};
use crate::services::merge::{merge_first_seen, union_by_identity};
use crate::services::radius_policy::RadiusPolicy;

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Merge order of the sequential search. Earlier predicates win on duplicates.
pub const SEQUENTIAL_ORDER: [Predicate; 4] = [
    Predicate::ItemName,
    Predicate::Name,
    Predicate::ItemAttributes,
    Predicate::Attributes,
];

/// Turns a search request into directory lookups and merges what comes back.
///
/// Without search text only the nearby lookup runs. With text,
/// [`SearchAggregator::search`] runs every predicate one after another and
/// propagates the first failure, while [`SearchAggregator::search_concurrent`]
/// runs the restaurant name and attribute lookups side by side and answers
/// with an empty list if either of them fails. The concurrent search skips
/// menu items entirely, so item matches only show up in the sequential one.
#[derive(Clone)]
pub struct SearchAggregator {
    directory: Arc<dyn RestaurantDirectory>,
    radius_policy: RadiusPolicy,
    timeout: Duration,
}

impl SearchAggregator {
    pub fn new(
        directory: Arc<dyn RestaurantDirectory>,
        radius_policy: RadiusPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            directory,
            radius_policy,
            timeout,
        }
    }

    fn directory_query(&self, request: &SearchRequest, time: Time) -> DirectoryQuery {
        let radius_km = self.radius_policy.serving_radius_km(time);
        debug!("Serving radius at {} is {} km", time, radius_km);

        DirectoryQuery::nearby(request.latitude, request.longitude, time, radius_km)
    }

    async fn find(&self, predicate: Predicate, query: &DirectoryQuery) -> Result<SearchResult> {
        let found = match predicate {
            Predicate::Nearby => self.directory.find_nearby(query).await,
            Predicate::Name => self.directory.find_by_name(query).await,
            Predicate::ItemName => self.directory.find_by_item_name(query).await,
            Predicate::Attributes => self.directory.find_by_attributes(query).await,
            Predicate::ItemAttributes => self.directory.find_by_item_attributes(query).await,
        };

        found
            .map(SearchResult::new)
            .map_err(|source| SearchError::Directory { predicate, source })
    }

    /// Restaurants around the request's position, unchanged from the directory.
    pub async fn find_all_close_by(
        &self,
        request: &SearchRequest,
        time: Time,
    ) -> Result<SearchResult> {
        let query = self.directory_query(request, time);
        self.find(Predicate::Nearby, &query).await
    }

    /// Sequential search over all four predicates.
    pub async fn search(&self, request: &SearchRequest, time: Time) -> Result<SearchResult> {
        let search_for = match request.search_text() {
            Some(search_for) => search_for,
            None => return self.find_all_close_by(request, time).await,
        };

        let query = self.directory_query(request, time).with_search(search_for);
        let mut sources = Vec::with_capacity(SEQUENTIAL_ORDER.len());
        for predicate in SEQUENTIAL_ORDER {
            let found = self.find(predicate, &query).await?;
            debug!(
                "{} restaurants matched '{}' by {}",
                found.restaurants.len(),
                search_for,
                predicate,
            );
            sources.push(found.restaurants);
        }

        let (restaurants, _) = merge_first_seen(sources);
        Ok(SearchResult::new(restaurants))
    }

    /// Concurrent search over restaurant names and attributes. A failed,
    /// panicked or timed out lookup yields an empty result, never a partial one.
    pub async fn search_concurrent(
        &self,
        request: &SearchRequest,
        time: Time,
    ) -> Result<SearchResult> {
        if request.search_text().is_none() {
            return self.find_all_close_by(request, time).await;
        }

        match self.try_search_concurrent(request, time).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!("Concurrent restaurant search failed, returning no restaurants: {}", e);
                Ok(SearchResult::empty())
            }
        }
    }

    /// Like [`SearchAggregator::search_concurrent`], but hands the failure back.
    pub async fn try_search_concurrent(
        &self,
        request: &SearchRequest,
        time: Time,
    ) -> Result<SearchResult> {
        let search_for = match request.search_text() {
            Some(search_for) => search_for,
            None => return self.find_all_close_by(request, time).await,
        };
        let query = self.directory_query(request, time).with_search(search_for);

        let mut name_task = AbortOnDrop(spawn_find_by_name(self.directory.clone(), query.clone()));
        let mut attributes_task =
            AbortOnDrop(spawn_find_by_attributes(self.directory.clone(), query));

        let name_lookup = async { joined(Predicate::Name, (&mut name_task.0).await) };
        let attributes_lookup =
            async { joined(Predicate::Attributes, (&mut attributes_task.0).await) };

        // Resolves on the first failure; the other task is aborted on return.
        let (by_name, by_attributes) =
            tokio::time::timeout(self.timeout, future::try_join(name_lookup, attributes_lookup))
                .await
                .map_err(|_| SearchError::Timeout(self.timeout))??;
        debug!(
            "{} restaurants matched '{}' by name, {} by attributes",
            by_name.len(),
            search_for,
            by_attributes.len(),
        );

        Ok(SearchResult::new(union_by_identity([by_name, by_attributes])))
    }
}

/// Aborts the lookup when the search gives up on it.
struct AbortOnDrop(JoinHandle<DirectoryResult>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn joined(
    predicate: Predicate,
    outcome: std::result::Result<DirectoryResult, JoinError>,
) -> Result<Vec<Restaurant>> {
    match outcome {
        Ok(Ok(restaurants)) => Ok(restaurants),
        Ok(Err(source)) => Err(SearchError::Directory { predicate, source }),
        Err(e) => Err(SearchError::TaskFailed {
            predicate,
            message: e.to_string(),
        }),
    }
}
