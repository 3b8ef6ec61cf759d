use log::debug;
use reqwest::Url;

use super::{
    common::{FetchError, Session},
    configuration::sections::ServiceConfiguration,
};

pub mod models;

pub use models::{distinct_lesson_ids, AssignmentReport, FlatAssignment};
use models::AssignmentCollection;

pub struct AssignmentsAgent<'a> {
    session: &'a Session,
    assignments_url: Url,
}

impl<'a> AssignmentsAgent<'a> {
    pub fn new(
        session: &'a Session,
        conf: &ServiceConfiguration,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(AssignmentsAgent {
            session,
            assignments_url: conf.assignments_url()?,
        })
    }

    /// Fetches every assignment visible to the session and flattens them.
    ///
    /// Decoding is all or nothing: a payload that fails to decode yields
    /// [`FetchError::Decode`] and no assignments at all.
    pub async fn fetch(&self) -> Result<AssignmentReport, FetchError> {
        debug!("fetching assignments");

        let body = self
            .session
            .client()
            .get(self.assignments_url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let collection = serde_json::from_slice::<AssignmentCollection>(&body)?;
        let report = AssignmentReport::from(collection);

        debug!(
            "fetched {} assignments across {} lessons",
            report.assignments.len(),
            report.lesson_ids.len()
        );

        Ok(report)
    }
}
