//! Converts a CR-declared route tree into a namespace-pinned subtree.
//!
//! Isolation is enforced exactly once, at the point the subtree attaches
//! to the shared tree: the root node gains a matcher pinning it to its
//! owning namespace and a forced `continue`, and every descendant is only
//! reachable through that pinned root. Descendants keep their declared
//! matchers and continue flags untouched.

use std::collections::HashMap;

use amcgen_model::{Route, RouteSpec};

use crate::error::UnknownReceiver;

/// Label the pinning matcher is written against.
pub const NAMESPACE_LABEL: &str = "namespace";

/// Merges one CR route tree into an attachable output subtree.
///
/// Every node's declared receiver name is rewritten through `name_map`
/// (declared name → qualified name, collected while building the same
/// CR's receivers).
///
/// # Errors
///
/// Returns [`UnknownReceiver`] if any node references a receiver the CR
/// never declared. The caller drops the whole CR contribution in that
/// case.
pub fn merge_route(
    namespace: &str,
    spec: &RouteSpec,
    name_map: &HashMap<String, String>,
) -> Result<Route, UnknownReceiver> {
    let mut root = convert(spec, name_map)?;
    root.match_labels
        .insert(NAMESPACE_LABEL.to_string(), namespace.to_string());
    root.r#continue = true;
    Ok(root)
}

fn convert(spec: &RouteSpec, name_map: &HashMap<String, String>) -> Result<Route, UnknownReceiver> {
    let receiver = name_map
        .get(&spec.receiver)
        .ok_or_else(|| UnknownReceiver {
            receiver: spec.receiver.clone(),
        })?
        .clone();

    let mut route = Route::new(receiver);
    for matcher in &spec.matchers {
        let target = if matcher.regex {
            &mut route.match_re
        } else {
            &mut route.match_labels
        };
        target.insert(matcher.name.clone(), matcher.value.clone());
    }
    route.r#continue = spec.r#continue;
    route.routes = spec
        .routes
        .iter()
        .map(|child| convert(child, name_map))
        .collect::<Result<_, _>>()?;

    Ok(route)
}

#[cfg(test)]
mod tests {
    use amcgen_model::Matcher;
    use proptest::prelude::*;

    use super::*;

    fn name_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn root_is_pinned_and_continues() {
        let spec = RouteSpec {
            receiver: "test".to_string(),
            ..RouteSpec::default()
        };
        let map = name_map(&[("test", "mynamespace-myamc-test")]);

        let route = merge_route("mynamespace", &spec, &map).expect("merges");

        assert_eq!(route.receiver, "mynamespace-myamc-test");
        assert_eq!(
            route.match_labels.get(NAMESPACE_LABEL).map(String::as_str),
            Some("mynamespace")
        );
        assert!(route.r#continue);
    }

    #[test]
    fn descendants_keep_declared_flags_and_matchers() {
        let spec = RouteSpec {
            receiver: "parent".to_string(),
            routes: vec![
                RouteSpec {
                    receiver: "child".to_string(),
                    matchers: vec![Matcher::equal("severity", "critical")],
                    r#continue: false,
                    ..RouteSpec::default()
                },
                RouteSpec {
                    receiver: "child".to_string(),
                    r#continue: true,
                    ..RouteSpec::default()
                },
            ],
            ..RouteSpec::default()
        };
        let map = name_map(&[("parent", "ns-cr-parent"), ("child", "ns-cr-child")]);

        let route = merge_route("ns", &spec, &map).expect("merges");

        assert_eq!(route.routes.len(), 2);
        let first = &route.routes[0];
        assert_eq!(first.receiver, "ns-cr-child");
        assert!(!first.r#continue);
        assert_eq!(
            first.match_labels.get("severity").map(String::as_str),
            Some("critical")
        );
        // No pinning below the root.
        assert!(!first.match_labels.contains_key(NAMESPACE_LABEL));
        assert!(route.routes[1].r#continue);
    }

    #[test]
    fn regex_matchers_land_in_match_re() {
        let spec = RouteSpec {
            receiver: "test".to_string(),
            matchers: vec![
                Matcher::equal("team", "infra"),
                Matcher {
                    name: "alertname".to_string(),
                    value: "KubePod.*".to_string(),
                    regex: true,
                },
            ],
            ..RouteSpec::default()
        };
        let map = name_map(&[("test", "ns-cr-test")]);

        let route = merge_route("ns", &spec, &map).expect("merges");

        assert_eq!(
            route.match_labels.get("team").map(String::as_str),
            Some("infra")
        );
        assert_eq!(
            route.match_re.get("alertname").map(String::as_str),
            Some("KubePod.*")
        );
    }

    #[test]
    fn declared_namespace_matcher_is_overridden_at_root() {
        // A fragment trying to pin itself to another namespace loses: the
        // attachment step writes the owning namespace last.
        let spec = RouteSpec {
            receiver: "test".to_string(),
            matchers: vec![Matcher::equal(NAMESPACE_LABEL, "victim")],
            ..RouteSpec::default()
        };
        let map = name_map(&[("test", "ns-cr-test")]);

        let route = merge_route("ns", &spec, &map).expect("merges");

        assert_eq!(
            route.match_labels.get(NAMESPACE_LABEL).map(String::as_str),
            Some("ns")
        );
    }

    #[test]
    fn undeclared_receiver_anywhere_fails_the_merge() {
        let spec = RouteSpec {
            receiver: "declared".to_string(),
            routes: vec![RouteSpec {
                receiver: "ghost".to_string(),
                ..RouteSpec::default()
            }],
            ..RouteSpec::default()
        };
        let map = name_map(&[("declared", "ns-cr-declared")]);

        let err = merge_route("ns", &spec, &map).expect_err("dangling reference");
        assert_eq!(err.receiver, "ghost");
    }

    #[test]
    fn child_order_is_preserved() {
        let spec = RouteSpec {
            receiver: "p".to_string(),
            routes: vec![
                RouteSpec {
                    receiver: "a".to_string(),
                    ..RouteSpec::default()
                },
                RouteSpec {
                    receiver: "b".to_string(),
                    ..RouteSpec::default()
                },
                RouteSpec {
                    receiver: "c".to_string(),
                    ..RouteSpec::default()
                },
            ],
            ..RouteSpec::default()
        };
        let map = name_map(&[("p", "n-c-p"), ("a", "n-c-a"), ("b", "n-c-b"), ("c", "n-c-c")]);

        let route = merge_route("n", &spec, &map).expect("merges");
        let children: Vec<&str> = route.routes.iter().map(|r| r.receiver.as_str()).collect();
        assert_eq!(children, vec!["n-c-a", "n-c-b", "n-c-c"]);
    }

    /// Arbitrary route trees over a fixed set of declared receiver names.
    fn route_spec_tree() -> impl Strategy<Value = RouteSpec> {
        let receiver = prop::sample::select(vec!["a", "b", "c", "d"]);
        let leaf = receiver.clone().prop_map(|r| RouteSpec {
            receiver: r.to_string(),
            ..RouteSpec::default()
        });
        leaf.prop_recursive(3, 24, 4, move |inner| {
            (receiver.clone(), prop::collection::vec(inner, 0..4), any::<bool>()).prop_map(
                |(r, routes, cont)| RouteSpec {
                    receiver: r.to_string(),
                    routes,
                    r#continue: cont,
                    ..RouteSpec::default()
                },
            )
        })
    }

    /// True if the merged tree mirrors the declared tree node for node:
    /// rewritten receiver, same child count and order, and (below the
    /// root) unmodified continue flags.
    fn mirrors(spec: &RouteSpec, route: &Route, map: &HashMap<String, String>) -> bool {
        if map.get(&spec.receiver) != Some(&route.receiver) {
            return false;
        }
        if spec.routes.len() != route.routes.len() {
            return false;
        }
        spec.routes
            .iter()
            .zip(&route.routes)
            .all(|(s, r)| r.r#continue == s.r#continue && mirrors(s, r, map))
    }

    proptest! {
        // Merging never loses, reorders, or rewires children at any depth.
        #[test]
        fn merged_subtrees_mirror_declared_trees(spec in route_spec_tree()) {
            let map = name_map(&[
                ("a", "ns-cr-a"),
                ("b", "ns-cr-b"),
                ("c", "ns-cr-c"),
                ("d", "ns-cr-d"),
            ]);
            let route = merge_route("ns", &spec, &map).expect("all names declared");
            prop_assert!(mirrors(&spec, &route, &map));
        }
    }
}
