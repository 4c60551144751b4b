//! Widget value normalization.
//!
//! A widget value typed by a domain owner is either a bare Twitter account
//! handle or a link to a single post
//! (`https://twitter.com/<account>/status/<id>`). Inputs are classified up
//! front and then normalized into the canonical value that gets stored on
//! chain: the handle unchanged, or the tweet id without leading zeros.

mod embed;
mod sink;
mod tweet_id;

pub use embed::{WidgetEmbed, widget_embed};
pub use sink::{DiagnosticSink, TracingSink};
pub use tweet_id::TweetId;

use dc_api_types::{EmbedKind, ParsedWidgetValue};
use thiserror::Error;
use url::Url;

pub const TWITTER_HOST: &str = "twitter.com";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetValueError {
    #[error("URL must be from https://twitter.com")]
    WrongHost,
    #[error("URL has bad form. It must be https://twitter.com/[some_account]/status/[tweet_id]")]
    BadForm,
    #[error("cannot parse tweet id")]
    UnparseableId,
    #[error("{0}")]
    InternalParseError(String),
}

/// Raw input after deciding whether it is a URL at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
    Url(Url),
    BareHandle(String),
}

impl ClassifiedInput {
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

/// A normalized widget value and how it should be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetValue {
    pub value: String,
    pub embed: EmbedKind,
}

/// Absolute URL with a non-empty host and no whitespace; anything else is a
/// bare handle.
pub fn classify(raw: &str) -> ClassifiedInput {
    if raw.chars().any(char::is_whitespace) {
        return ClassifiedInput::BareHandle(raw.to_owned());
    }

    match Url::parse(raw) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => ClassifiedInput::Url(url),
        _ => ClassifiedInput::BareHandle(raw.to_owned()),
    }
}

pub fn is_url(raw: &str) -> bool {
    classify(raw).is_url()
}

/// Extract the tweet id from a `https://twitter.com/<account>/status/<id>` URL.
pub fn parse_tweet_url(url: &Url) -> Result<TweetId, WidgetValueError> {
    if url.host_str() != Some(TWITTER_HOST) || url.port().is_some() {
        return Err(WidgetValueError::WrongHost);
    }

    if url.cannot_be_a_base() {
        return Err(WidgetValueError::InternalParseError(format!(
            "{url} has no path to read a tweet id from"
        )));
    }

    // Same split as the browser's `pathname.split('/')`, leading empty part included.
    let parts: Vec<&str> = url.path().split('/').collect();
    if parts.len() < 2 || parts[parts.len() - 2] != "status" {
        return Err(WidgetValueError::BadForm);
    }

    TweetId::parse(parts[parts.len() - 1])
}

pub fn try_parse_classified(input: ClassifiedInput) -> Result<WidgetValue, WidgetValueError> {
    match input {
        ClassifiedInput::Url(url) => parse_tweet_url(&url).map(|id| WidgetValue {
            value: id.into_string(),
            embed: EmbedKind::Post,
        }),
        ClassifiedInput::BareHandle(handle) => Ok(WidgetValue {
            value: handle,
            embed: EmbedKind::Feed,
        }),
    }
}

pub fn try_parse(raw: &str) -> Result<WidgetValue, WidgetValueError> {
    try_parse_classified(classify(raw))
}

/// Fold a typed result into the `{value} | {error}` shape shown to users.
///
/// Internal failures are reported to `sink` before conversion.
pub fn into_parsed(
    raw: &str,
    result: Result<WidgetValue, WidgetValueError>,
    sink: &dyn DiagnosticSink,
) -> ParsedWidgetValue {
    match result {
        Ok(widget_value) => ParsedWidgetValue::Value(widget_value.value),
        Err(err) => {
            if matches!(err, WidgetValueError::InternalParseError(_)) {
                sink.report(raw, &err);
            }
            ParsedWidgetValue::Error(err.to_string())
        }
    }
}

/// Normalize `raw` into a canonical widget value or a user-facing error.
///
/// Total over every input string.
pub fn parse_with(raw: &str, sink: &dyn DiagnosticSink) -> ParsedWidgetValue {
    into_parsed(raw, try_parse(raw), sink)
}

pub fn parse(raw: &str) -> ParsedWidgetValue {
    parse_with(raw, &TracingSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    const BAD_FORM: &str =
        "URL has bad form. It must be https://twitter.com/[some_account]/status/[tweet_id]";

    fn value(s: &str) -> ParsedWidgetValue {
        ParsedWidgetValue::Value(s.to_owned())
    }

    fn error(s: &str) -> ParsedWidgetValue {
        ParsedWidgetValue::Error(s.to_owned())
    }

    #[test]
    fn bare_handle_is_returned_unchanged() {
        assert_eq!(parse("harmonyprotocol"), value("harmonyprotocol"));
        assert_eq!(parse("@someone"), value("@someone"));
        assert_eq!(parse("twitter.com/someuser/status/1"), value("twitter.com/someuser/status/1"));
    }

    #[test]
    fn large_tweet_id_keeps_all_digits() {
        assert_eq!(
            parse("https://twitter.com/someuser/status/1234567890123456789"),
            value("1234567890123456789")
        );
    }

    #[test]
    fn leading_zeros_are_stripped() {
        assert_eq!(parse("https://twitter.com/someuser/status/000123"), value("123"));
    }

    #[test]
    fn other_hosts_are_rejected() {
        assert_eq!(
            parse("https://example.com/someuser/status/123"),
            error("URL must be from https://twitter.com")
        );
        assert_eq!(
            parse("https://twitter.com:8443/someuser/status/123"),
            error("URL must be from https://twitter.com")
        );
        assert_eq!(
            parse("https://mobile.twitter.com/someuser/status/123"),
            error("URL must be from https://twitter.com")
        );
    }

    #[test]
    fn missing_status_segment_is_bad_form() {
        assert_eq!(parse("https://twitter.com/someuser/123"), error(BAD_FORM));
        assert_eq!(parse("https://twitter.com"), error(BAD_FORM));
        assert_eq!(parse("https://twitter.com/status"), error(BAD_FORM));
    }

    #[test]
    fn non_numeric_id_cannot_be_parsed() {
        assert_eq!(parse("https://twitter.com/someuser/status/abc"), error("cannot parse tweet id"));
        assert_eq!(parse("https://twitter.com/someuser/status/"), error("cannot parse tweet id"));
        assert_eq!(parse("https://twitter.com/someuser/status/-5"), error("cannot parse tweet id"));
    }

    #[test]
    fn query_and_fragment_do_not_affect_id() {
        assert_eq!(
            parse("https://twitter.com/someuser/status/42?s=20#top"),
            value("42")
        );
    }

    #[test]
    fn url_input_is_embedded_as_post() {
        let parsed = try_parse("https://twitter.com/a/status/9").unwrap();
        assert_eq!(parsed.embed, EmbedKind::Post);
        assert_eq!(try_parse("a").unwrap().embed, EmbedKind::Feed);
    }

    #[test]
    fn reparsing_output_hits_handle_branch() {
        let first = parse("https://twitter.com/someuser/status/000987654321");
        let id = first.value().unwrap().to_owned();
        assert_eq!(parse(&id), value(&id));
    }

    #[test]
    fn empty_input_is_an_empty_handle() {
        assert_eq!(parse(""), value(""));
    }

    #[test]
    fn non_base_url_fails_host_check() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        // Host check comes first, matching the browser's `url.host` behaviour.
        assert_eq!(parse_tweet_url(&url), Err(WidgetValueError::WrongHost));
    }

    #[test]
    fn only_internal_errors_reach_the_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |raw: &str, err: &WidgetValueError| seen.borrow_mut().push((raw.to_owned(), err.clone()));

        let internal = Err(WidgetValueError::InternalParseError("boom".to_owned()));
        assert_eq!(into_parsed("x", internal, &sink), error("boom"));

        assert_eq!(parse_with("https://example.com/a/status/1", &sink), error("URL must be from https://twitter.com"));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "x");
    }

    proptest! {
        #[test]
        fn parse_is_total(raw in any::<String>()) {
            let parsed = parse(&raw);
            prop_assert!(parsed.value().is_some() != parsed.error().is_some());
        }

        #[test]
        fn non_urls_pass_through(raw in "[A-Za-z0-9_@ ]{0,24}") {
            prop_assume!(!is_url(&raw));
            prop_assert_eq!(parse(&raw), ParsedWidgetValue::Value(raw.clone()));
        }

        #[test]
        fn status_urls_canonicalize(digits in "[0-9]{1,40}") {
            let parsed = parse(&format!("https://twitter.com/acct/status/{digits}"));
            let expected = digits.trim_start_matches('0');
            let expected = if expected.is_empty() { "0" } else { expected };
            prop_assert_eq!(parsed, ParsedWidgetValue::Value(expected.to_owned()));
        }
    }
}
