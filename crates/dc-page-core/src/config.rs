/// Page-level settings. The browser build fills these from `window.location`
/// and its defaults; tests construct them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Registration site that new names are redirected to.
    pub hostname: String,
    /// Top-level domain the pages are served under, without the dot.
    pub tld: String,
    pub explorer_url: String,
    /// Where e-mail addresses typed into the widget input are sent.
    pub contact_email: String,
    pub widget_placeholder: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hostname: "https://dot.country".to_owned(),
            tld: "country".to_owned(),
            explorer_url: "https://explorer.harmony.one".to_owned(),
            contact_email: "1country@harmony.one".to_owned(),
            widget_placeholder: "Twitter handle or tweet link".to_owned(),
        }
    }
}
