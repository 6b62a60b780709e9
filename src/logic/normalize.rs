use log::debug;
use reqwest::Url;

use crate::model::ImageLink;

const INSECURE_SCHEME: &str = "http";
const SECURE_SCHEME: &str = "https";

/// Parse an image URL and upgrade `http` to `https`. Other schemes pass through.
pub fn normalize_image_link(raw: &str) -> Option<ImageLink> {
    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            debug!("Dropping unparseable image link {:?}: {}", raw, e);
            return None;
        }
    };

    if url.scheme() == INSECURE_SCHEME {
        // http -> https is always permitted between special schemes
        url.set_scheme(SECURE_SCHEME).ok()?;
    }

    Some(ImageLink::from_url(url))
}

/// Normalize every link independently, keeping the order of the ones that parse
pub fn normalize_image_links<'a, I>(raw: I) -> Vec<ImageLink>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter().filter_map(normalize_image_link).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrades_http() {
        let link = normalize_image_link("http://x/y.jpg").unwrap();
        assert_eq!(link.as_str(), "https://x/y.jpg");
    }

    #[test]
    fn test_keeps_https_and_other_schemes() {
        assert_eq!(
            normalize_image_link("https://x/y.jpg").unwrap().as_str(),
            "https://x/y.jpg"
        );
        assert_eq!(
            normalize_image_link("ftp://x/y.jpg").unwrap().as_str(),
            "ftp://x/y.jpg"
        );
    }

    #[test]
    fn test_drops_unparseable() {
        assert!(normalize_image_link("not a url").is_none());
        assert!(normalize_image_link("").is_none());
    }

    #[test]
    fn test_batch_skips_bad_links_only() {
        let links = normalize_image_links(vec![
            "http://commons.wikimedia.org/wiki/Special:FilePath/A.jpg",
            "not a url",
            "https://commons.wikimedia.org/wiki/Special:FilePath/B.jpg",
        ]);
        let links: Vec<&str> = links.iter().map(ImageLink::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://commons.wikimedia.org/wiki/Special:FilePath/A.jpg",
                "https://commons.wikimedia.org/wiki/Special:FilePath/B.jpg",
            ]
        );
    }
}
