//! [`RemoteStore`] over HTTP with a blocking client.

use log::debug;
use reqwest::blocking::{Client, Response};

use crate::action::{Action, Snapshot};
use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result, Step};
use crate::store::RemoteStore;

/// Store backed by a persistence server.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    config: RemoteConfig,
}

impl HttpStore {
    /// Builds a client with the configured timeout.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteError::Client)?;
        Ok(HttpStore { client, config })
    }

    /// The connection settings in use.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn check(step: Step, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                step,
                status: status.as_u16(),
            })
        }
    }
}

fn transport(step: Step) -> impl FnOnce(reqwest::Error) -> RemoteError {
    move |source| RemoteError::Transport { step, source }
}

impl RemoteStore for HttpStore {
    fn set_query(&mut self, query: &str) -> Result<()> {
        let step = Step::SetQuery;
        debug!("{} {:?}", step, query);
        let response = self
            .client
            .post(self.config.endpoint("set-query"))
            .json(query)
            .send()
            .map_err(transport(step))?;
        Self::check(step, response)?;
        Ok(())
    }

    fn fetch_rows(&mut self) -> Result<Snapshot> {
        let step = Step::FetchRows;
        debug!("{}", step);
        let response = self
            .client
            .get(self.config.endpoint("api"))
            .send()
            .map_err(transport(step))?;
        let body = Self::check(step, response)?
            .text()
            .map_err(transport(step))?;
        let snapshot: Snapshot =
            serde_json::from_str(&body).map_err(|source| RemoteError::Decode { step, source })?;
        debug!("{} returned {} rows", step, snapshot.rows.len());
        Ok(snapshot)
    }

    fn post_action(&mut self, action: &Action) -> Result<()> {
        let step = Step::PostAction;
        debug!("{} {:?}", step, action);
        let response = self
            .client
            .post(self.config.endpoint("api"))
            .json(action)
            .send()
            .map_err(transport(step))?;
        Self::check(step, response)?;
        Ok(())
    }
}
