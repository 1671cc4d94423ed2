//! Social share links.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::locale::DEFAULT_LANGUAGE;

/// The public URL of a page, with the language subdomain for non-default languages.
pub fn canonical_url(protocol: &str, language: &str, site_domain: &str, uri: &str) -> String {
    let prefix = if language.is_empty() || language == DEFAULT_LANGUAGE {
        String::new()
    } else {
        format!("{}.", language)
    };
    format!("{}://{}{}{}", protocol, prefix, site_domain, uri)
}

/// Share links for the email, linkedin and twitter channels.
pub fn share_links(title: &str, url: &str) -> BTreeMap<String, String> {
    let email = form_urlencoded::Serializer::new(String::new())
        .append_pair("subject", title)
        .append_pair("body", &format!("{}\n{}", title, url))
        .finish()
        // Mail clients show `+` literally
        .replace('+', "%20");
    let linkedin = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", url)
        .finish();
    let twitter = form_urlencoded::Serializer::new(String::new())
        .append_pair("text", title)
        .append_pair("url", url)
        .finish();

    BTreeMap::from([
        ("email".to_string(), format!("mailto:?{}", email)),
        (
            "linkedin".to_string(),
            format!("https://www.linkedin.com/sharing/share-offsite/?{}", linkedin),
        ),
        (
            "twitter".to_string(),
            format!("https://twitter.com/intent/tweet?{}", twitter),
        ),
    ])
}
