use crate::dashboard::DashboardError;
use crate::model::city::City;
use crate::model::event::Event;
use crate::model::user::User;
use serde::de::DeserializeOwned;
use url::Url;

/// Every collection the dashboard displays, fetched together.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collections {
    pub users: Vec<User>,
    pub cities: Vec<City>,
    pub events: Vec<Event>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches users, cities and events concurrently. Fails as a whole if any single
    /// request fails.
    pub async fn fetch_all(&self) -> Result<Collections, DashboardError> {
        let (users, cities, events) = futures::try_join!(
            self.fetch_list::<User>("users"),
            self.fetch_list::<City>("cities"),
            self.fetch_list::<Event>("events"),
        )?;
        Ok(Collections { users, cities, events })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, DashboardError> {
        let url = self.endpoint(resource)?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("GET {resource} returned {}", response.status());
            return Err(DashboardError::FailedFetch);
        }
        response.json().await.map_err(|err| {
            tracing::debug!("Could not decode {resource}: {err}");
            DashboardError::FailedFetch
        })
    }

    fn endpoint(&self, resource: &str) -> Result<Url, DashboardError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DashboardError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(resource);
        Ok(url)
    }
}
