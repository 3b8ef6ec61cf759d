use std::sync::RwLock;

use cookie_store::{CookieStore as Store, RawCookie};
use log::debug;
use reqwest::{cookie::CookieStore, header::HeaderValue, Url};

/// Cookie jar refusing cookies scoped to a public suffix.
///
/// A `Domain=ac.jp` cookie set by `cas.ecs.kyoto-u.ac.jp` is dropped instead of being
/// sent to every `*.ac.jp` host. When the public suffix is the request host itself the
/// cookie is kept as a host-only cookie.
#[derive(Default)]
pub struct PublicSuffixJar {
    store: RwLock<Store>,
}

impl PublicSuffixJar {
    fn scope(mut cookie: RawCookie<'static>, url: &Url) -> Option<RawCookie<'static>> {
        let domain = match cookie.domain() {
            Some(d) => d.trim_start_matches('.').to_ascii_lowercase(),
            None => return Some(cookie),
        };

        if !is_public_suffix(&domain) {
            return Some(cookie);
        }

        if url.host_str().map(|h| h.eq_ignore_ascii_case(&domain)) == Some(true) {
            cookie.unset_domain();
            return Some(cookie);
        }

        debug!("dropping cookie {} scoped to public suffix {}", cookie.name(), domain);
        None
    }
}

fn is_public_suffix(domain: &str) -> bool {
    psl::suffix_str(domain) == Some(domain)
}

impl CookieStore for PublicSuffixJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let cookies: Vec<RawCookie<'static>> = cookie_headers
            .filter_map(|v| v.to_str().ok())
            .filter_map(|s| RawCookie::parse(s.to_owned()).ok())
            .filter_map(|c| Self::scope(c, url))
            .collect();

        if let Ok(mut store) = self.store.write() {
            store.store_response_cookies(cookies.into_iter(), url);
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let store = self.store.read().ok()?;

        let value = store
            .get_request_values(url)
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        if value.is_empty() {
            return None;
        }

        HeaderValue::from_str(&value).ok()
    }
}
