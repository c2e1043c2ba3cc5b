//! URL construction for the batch endpoint.

use feedq_core::ItemId;
use url::Url;

use crate::models::FeedConfig;

/// Build the batch request URL.
///
/// Produces `count=<n>` plus, when anything is held, `exclude=<id>,<id>,...`
/// with each ID percent-encoded and the separators left as literal commas.
/// Query parameters already present on the base URL are kept.
pub fn build_batch_url(config: &FeedConfig, count: u32, exclude: &[ItemId]) -> Url {
    let mut url = config.endpoint.clone();

    let mut query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&count={count}"),
        _ => format!("count={count}"),
    };

    if !exclude.is_empty() {
        let joined = exclude
            .iter()
            .map(|id| urlencoding::encode(id.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        query.push_str("&exclude=");
        query.push_str(&joined);
    }

    url.set_query(Some(&query));
    url
}

/// Read the exclusion list back out of a batch URL.
#[cfg(test)]
pub fn excluded_ids(url: &Url) -> Vec<String> {
    url.query_pairs()
        .find(|(key, _)| key == "exclude")
        .map(|(_, value)| value.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|s| ItemId::new(*s)).collect()
    }

    #[test]
    fn test_count_only_when_nothing_held() {
        let url = build_batch_url(&FeedConfig::for_tests(), 10, &[]);
        assert_eq!(url.query(), Some("count=10"));
    }

    #[test]
    fn test_exclude_is_comma_joined_in_order() {
        let url = build_batch_url(&FeedConfig::for_tests(), 10, &ids(&["3", "4"]));
        assert_eq!(url.query(), Some("count=10&exclude=3,4"));
        assert_eq!(excluded_ids(&url), vec!["3", "4"]);
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let url = build_batch_url(&FeedConfig::for_tests(), 2, &ids(&["a b", "c&d"]));
        assert_eq!(url.query(), Some("count=2&exclude=a%20b,c%26d"));
        assert_eq!(excluded_ids(&url), vec!["a b", "c&d"]);
    }

    #[test]
    fn test_existing_query_is_preserved() {
        let mut config = FeedConfig::for_tests();
        config.endpoint = Url::parse("https://feed.example/api/items?category=cats").unwrap();

        let url = build_batch_url(&config, 5, &ids(&["1"]));
        assert_eq!(url.query(), Some("category=cats&count=5&exclude=1"));
    }
}
