use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::authentication_error::AuthenticationError;

lazy_static! {
    static ref LOGIN_TICKET_INPUT: Selector = Selector::parse(r#"input[name="lt"]"#).unwrap();
}

/// Reads the login ticket out of the CAS login page.
///
/// The page is parsed as HTML, so commented out markup is ignored and character
/// references in the value are decoded. The first `<input>` named exactly `lt` wins.
/// Fails with [`AuthenticationError::TokenNotFound`] when no such input exists or it
/// has no `value`.
pub fn extract_login_ticket(html: &str) -> Result<String, AuthenticationError> {
    let document = Html::parse_document(html);

    document
        .select(&LOGIN_TICKET_INPUT)
        .next()
        .ok_or(AuthenticationError::TokenNotFound)?
        .value()
        .attr("value")
        .map(str::to_string)
        .ok_or(AuthenticationError::TokenNotFound)
}
