use dc_api_types::EmbedKind;

use crate::{ClassifiedInput, DiagnosticSink, TweetId, WidgetValueError, classify, parse_tweet_url};

/// What a stored widget value renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEmbed {
    /// Profile timeline for an account handle.
    Profile(String),
    /// A single post.
    Tweet(TweetId),
    /// A stored legacy URL that no longer parses.
    Invalid(String),
    Empty,
}

/// Decide how a stored value is embedded.
///
/// Full URLs are legacy widgets and are re-parsed on every render. Canonical
/// values follow the widget's `embed` kind. The same inputs always produce
/// the same embed, so re-rendering a stored list is stable.
pub fn widget_embed(value: &str, embed: EmbedKind, sink: &dyn DiagnosticSink) -> WidgetEmbed {
    if value.is_empty() {
        return WidgetEmbed::Empty;
    }

    match classify(value) {
        ClassifiedInput::Url(url) => match parse_tweet_url(&url) {
            Ok(id) => WidgetEmbed::Tweet(id),
            Err(err) => {
                if matches!(err, WidgetValueError::InternalParseError(_)) {
                    sink.report(value, &err);
                }
                WidgetEmbed::Invalid(err.to_string())
            }
        },
        ClassifiedInput::BareHandle(handle) => match embed {
            EmbedKind::Feed => WidgetEmbed::Profile(handle),
            EmbedKind::Post => match TweetId::parse(&handle) {
                Ok(id) => WidgetEmbed::Tweet(id),
                Err(err) => WidgetEmbed::Invalid(err.to_string()),
            },
        },
    }
}
