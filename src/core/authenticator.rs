use std::time::Duration;

use log::{debug, warn};
use reqwest::Url;

use crate::core::{
    common::{http_client_factory, Session},
    configuration::sections::ServiceConfiguration,
};

pub mod authentication_error;
pub mod common;
pub mod credentials_provider;
pub mod login_ticket;

pub use authentication_error::AuthenticationError;
pub use common::{Credentials, LoginForm};
pub use login_ticket::extract_login_ticket;

/// Drives the CAS login handshake for one service.
pub struct Authenticator {
    cas_login_url: Url,
    probe_url: Url,
    submit_label: String,
    timeout: Duration,
    verify_login: bool,
}

impl Authenticator {
    pub fn new(
        conf: &ServiceConfiguration,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            cas_login_url: conf.cas_login_url()?,
            probe_url: conf.probe_url()?,
            submit_label: conf.submit_label().to_string(),
            timeout: conf.timeout(),
            verify_login: conf.verify_login(),
        })
    }

    /// Logs in and hands back the session holding the CAS and service cookies.
    ///
    /// Every call starts from an empty cookie jar, so two calls yield two independent
    /// sessions. The credentials are only borrowed for the duration of the call.
    ///
    /// # Errors
    ///
    /// * [`AuthenticationError::Transport`] if any of the requests fails at the network level
    /// * [`AuthenticationError::TokenNotFound`] if the login page has no login ticket
    /// * [`AuthenticationError::NotAuthenticated`] if the probe shows the service did not
    ///   accept the session (only when `verify_login` is enabled)
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthenticationError> {
        debug!("login in");

        let session = http_client_factory(self.timeout)?;

        let lt = self.get_login_ticket(&session).await?;

        self.submit_credentials(&session, &lt, credentials).await?;

        if self.verify_login {
            self.probe(&session).await?;
        } else {
            warn!("login verification is disabled, the session may not be authenticated");
        }

        debug!("logged in as {}", credentials.identifier);

        Ok(session)
    }

    async fn get_login_ticket(&self, session: &Session) -> Result<String, AuthenticationError> {
        debug!("fetching login ticket");

        let body = session
            .client()
            .get(self.cas_login_url.clone())
            .send()
            .await?
            .text()
            .await?;

        extract_login_ticket(&body)
    }

    async fn submit_credentials(
        &self,
        session: &Session,
        lt: &str,
        credentials: &Credentials,
    ) -> Result<(), AuthenticationError> {
        debug!("submitting credentials");

        let form = LoginForm::new(lt, credentials, &self.submit_label);

        // CAS answers with redirects or a login page, the status says nothing here
        session
            .client()
            .post(self.cas_login_url.clone())
            .form(&form)
            .send()
            .await?;

        Ok(())
    }

    async fn probe(&self, session: &Session) -> Result<(), AuthenticationError> {
        debug!("probing session");

        let resp = session.client().get(self.probe_url.clone()).send().await?;

        if !resp.status().is_success() {
            return Err(AuthenticationError::NotAuthenticated(format!(
                "probe answered {}",
                resp.status()
            )));
        }

        if self.is_cas_login(resp.url()) {
            return Err(AuthenticationError::NotAuthenticated(
                "probe was redirected to the CAS login page".to_string(),
            ));
        }

        Ok(())
    }

    fn is_cas_login(&self, url: &Url) -> bool {
        url.scheme() == self.cas_login_url.scheme()
            && url.host_str() == self.cas_login_url.host_str()
            && url.port_or_known_default() == self.cas_login_url.port_or_known_default()
            && url.path() == self.cas_login_url.path()
    }
}
