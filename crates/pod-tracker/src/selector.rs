//! Equality label-selector matching
//!
//! A selector is a set of required key/value pairs. A pod matches when
//! every pair is present verbatim in its labels; extra labels on the pod
//! are ignored, and the empty selector matches every pod.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

/// Check whether `labels` satisfies every pair in `selector`.
pub fn matches_labels(
    labels: &BTreeMap<String, String>,
    selector: &BTreeMap<String, String>,
) -> bool {
    selector
        .iter()
        .all(|(key, value)| labels.get(key).is_some_and(|v| v == value))
}

/// Flatten a Kubernetes [`LabelSelector`] into the plain equality-map form.
///
/// Only `match_labels` is honored. `match_expressions` (set-based
/// requirements) are not supported by the store's query path and are
/// ignored; an absent `match_labels` behaves as the empty selector.
pub fn flatten_selector(selector: &LabelSelector) -> BTreeMap<String, String> {
    selector.match_labels.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_selector_matches_anything() {
        assert!(matches_labels(&labels(&[]), &labels(&[])));
        assert!(matches_labels(&labels(&[("app", "nginx")]), &labels(&[])));
    }

    #[test]
    fn selector_is_conjunctive() {
        let pod = labels(&[("app", "nginx"), ("env", "prod")]);

        assert!(matches_labels(&pod, &labels(&[("app", "nginx")])));
        assert!(matches_labels(
            &pod,
            &labels(&[("app", "nginx"), ("env", "prod")])
        ));
        assert!(!matches_labels(
            &pod,
            &labels(&[("app", "nginx"), ("env", "dev")])
        ));
    }

    #[test]
    fn missing_label_key_does_not_match() {
        let pod = labels(&[("app", "nginx")]);
        assert!(!matches_labels(&pod, &labels(&[("tier", "frontend")])));
    }

    #[test]
    fn flatten_uses_match_labels_only() {
        let selector = LabelSelector {
            match_labels: Some(labels(&[("app", "nginx")])),
            ..Default::default()
        };
        assert_eq!(flatten_selector(&selector), labels(&[("app", "nginx")]));

        let empty = LabelSelector::default();
        assert!(flatten_selector(&empty).is_empty());
    }
}
