use serde_json::Value;

use crate::model::{Binding, QueryResultSet, TagMap};

/// Tags of the first element of an Overpass JSON response.
///
/// A missing `elements` array, an empty one, or `tags` that are not a
/// string to string object all yield `None`.
pub fn parse_tags(response: &Value) -> Option<TagMap> {
    let first = response.get("elements")?.as_array()?.first()?;
    let tags = first.get("tags")?.as_object()?;

    tags.iter()
        .map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect()
}

/// Rows of a SPARQL JSON results document.
///
/// Returns `None` when `results.bindings` is missing or not an array. Rows that
/// are not objects, and variables whose `value` is not a string, are skipped.
pub fn parse_bindings(response: &Value) -> Option<QueryResultSet> {
    let rows = response.get("results")?.get("bindings")?.as_array()?;

    let bindings = rows
        .iter()
        .filter_map(Value::as_object)
        .map(|row| {
            row.iter()
                .filter_map(|(variable, term)| {
                    let value = term.get("value")?.as_str()?;
                    Some((variable.clone(), value.to_string()))
                })
                .collect::<Binding>()
        })
        .collect();

    Some(QueryResultSet::new(bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tags_first_element() {
        let response = json!({"elements": [{"tags": {"wikidata": "Q42"}}]});
        let tags = parse_tags(&response).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("wikidata"), Some(&"Q42".to_string()));
    }

    #[test]
    fn test_parse_tags_uses_only_first_element() {
        let response = json!({
            "version": 0.6,
            "elements": [
                {"type": "relation", "id": 42, "tags": {"name": "Tower Bridge", "wikidata": "Q83125"}},
                {"type": "way", "id": 7, "tags": {"wikidata": "Q1"}}
            ]
        });
        let tags = parse_tags(&response).unwrap();
        assert_eq!(tags.get("name"), Some(&"Tower Bridge".to_string()));
        assert_eq!(tags.get("wikidata"), Some(&"Q83125".to_string()));
    }

    #[test]
    fn test_parse_tags_absent_or_malformed() {
        assert!(parse_tags(&json!({})).is_none());
        assert!(parse_tags(&json!({"elements": []})).is_none());
        assert!(parse_tags(&json!({"elements": {"tags": {}}})).is_none());
        assert!(parse_tags(&json!({"elements": [{"id": 1}]})).is_none());
        assert!(parse_tags(&json!({"elements": [{"tags": ["wikidata"]}]})).is_none());
        assert!(parse_tags(&json!({"elements": [{"tags": {"lanes": 2}}]})).is_none());
        assert!(parse_tags(&json!([1, 2, 3])).is_none());
        assert!(parse_tags(&Value::Null).is_none());
    }

    #[test]
    fn test_parse_tags_empty_mapping() {
        let tags = parse_tags(&json!({"elements": [{"tags": {}}]})).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_parse_bindings_label_and_images() {
        let response = json!({
            "head": {"vars": ["pic", "architectLabel"]},
            "results": {"bindings": [
                {"pic": {"type": "uri", "value": "http://example.com/a.jpg"}},
                {"architectLabel": {"xml:lang": "en", "type": "literal", "value": "Ada"}}
            ]}
        });
        let results = parse_bindings(&response).unwrap();

        assert_eq!(results.first_value("architectLabel"), Some("Ada"));
        assert_eq!(
            results.values("pic").collect::<Vec<_>>(),
            vec!["http://example.com/a.jpg"]
        );
    }

    #[test]
    fn test_parse_bindings_preserves_order_and_skips_junk() {
        let response = json!({"results": {"bindings": [
            {"pic": {"value": "http://example.com/1.jpg"}},
            "not a row",
            {"pic": {"type": "uri"}},
            {"pic": {"value": 17}},
            {"pic": {"value": "http://example.com/2.jpg"}}
        ]}});
        let results = parse_bindings(&response).unwrap();

        assert_eq!(results.bindings.len(), 4);
        assert_eq!(
            results.values("pic").collect::<Vec<_>>(),
            vec!["http://example.com/1.jpg", "http://example.com/2.jpg"]
        );
    }

    #[test]
    fn test_parse_bindings_absent_or_malformed() {
        assert!(parse_bindings(&json!({})).is_none());
        assert!(parse_bindings(&json!({"results": {}})).is_none());
        assert!(parse_bindings(&json!({"results": {"bindings": {}}})).is_none());
        assert!(parse_bindings(&json!({"results": []})).is_none());

        let empty = parse_bindings(&json!({"results": {"bindings": []}})).unwrap();
        assert!(empty.is_empty());
    }
}
