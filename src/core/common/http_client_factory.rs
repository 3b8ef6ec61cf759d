use std::{fmt::Debug, sync::Arc, time::Duration};

use log::debug;
use reqwest::{cookie::CookieStore, redirect::Policy, Client, Url};

use super::cookie_jar::PublicSuffixJar;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// CAS bounces through a handful of redirects between the identity provider and the service
const MAX_REDIRECTS: usize = 10;

/// Cookie backed session against the CAS protected service.
///
/// Owned by whoever called the authenticator. The session ends when the value is
/// dropped, there is no explicit logout. A session is not meant to be shared between
/// concurrent logins, each login builds its own.
pub struct Session {
    client: Client,
    jar: Arc<PublicSuffixJar>,
}

impl Session {
    fn new(client: Client, jar: Arc<PublicSuffixJar>) -> Self {
        Self { client, jar }
    }

    /// The HTTP client bound to this session's cookie jar.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Whether the jar currently holds cookies that would be sent to `url`.
    pub fn has_cookies_for(&self, url: &Url) -> bool {
        self.jar.cookies(url).is_some()
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

/// Creates a fresh session: an HTTP client with its own empty cookie jar.
///
/// Cookies are stored per domain and path, so identity provider cookies and service
/// cookies only travel back to the hosts that set them. Cookies scoped to a public
/// suffix are refused. Every request made through the client is bounded by `timeout`.
pub fn http_client_factory(timeout: Duration) -> Result<Session, reqwest::Error> {
    debug!("creating HTTP client");

    let jar = Arc::new(PublicSuffixJar::default());

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(Arc::clone(&jar))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .timeout(timeout)
        .user_agent(APP_USER_AGENT)
        .build()?;

    Ok(Session::new(client, jar))
}
