//! Collaboration network construction.
//!
//! Turns person/title credit records into the weighted [`Graph`] consumed by
//! the algorithms. Only actors and directors become nodes. Two people are
//! linked when they share at least `min_shared_titles` distinct titles, with
//! the shared-title count as edge weight:
//!
//! - actor + actor, or director + director: edges both ways
//! - director + actor: only `director -> actor`
//!
//! Titles are folded to ASCII before comparison, so "Amélie" and "Amelie"
//! count as the same title.

use crate::error::Result;
use crate::graph::Graph;
use deunicode::deunicode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};
use wasm_bindgen::prelude::*;

/// One credit: a person appearing on a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub person_id: String,
    pub name: String,
    /// Free text; only "actor" and "director" take part in the network.
    pub profession: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Actor,
    Director,
}

impl Role {
    pub fn from_profession(profession: &str) -> Option<Role> {
        match profession {
            "actor" => Some(Role::Actor),
            "director" => Some(Role::Director),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Role::Actor => "_a",
            Role::Director => "_d",
        }
    }
}

/// A network participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub role: Role,
    /// Display name tagged with the role, e.g. "Jane Doe_a".
    pub label: String,
}

/// Network construction settings.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Minimum number of shared titles for two people to be linked.
    /// Values below 1 act as 1: people with nothing in common are never linked.
    pub min_shared_titles: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_shared_titles: 3,
        }
    }
}

/// Person ID -> ASCII-folded titles they are credited on, in record order.
pub fn title_index(credits: &[Credit]) -> IndexMap<String, Vec<String>> {
    let mut titles: IndexMap<String, Vec<String>> = IndexMap::new();
    for credit in credits {
        titles
            .entry(credit.person_id.clone())
            .or_default()
            .push(deunicode(&credit.title));
    }
    titles
}

/// Person ID -> role and label for actors and directors.
///
/// A later record overwrites the role of an earlier one, but the person
/// keeps their first-seen position.
pub fn role_index(credits: &[Credit]) -> IndexMap<String, Person> {
    let mut people: IndexMap<String, Person> = IndexMap::new();
    for credit in credits {
        if let Some(role) = Role::from_profession(&credit.profession) {
            people.insert(
                credit.person_id.clone(),
                Person {
                    role,
                    label: format!("{}{}", credit.name, role.suffix()),
                },
            );
        }
    }
    people
}

/// Build the collaboration network from credit records.
///
/// Every actor and director is a node, in first-seen order; an edge's
/// weight is the number of distinct titles its endpoints share.
#[instrument(skip(credits, config), fields(credits = credits.len()))]
pub fn build_network(credits: &[Credit], config: &NetworkConfig) -> Result<Graph> {
    let titles = title_index(credits);
    let people = role_index(credits);

    let title_sets: IndexMap<&str, HashSet<&str>> = people
        .keys()
        .map(|id| {
            let set = titles
                .get(id)
                .map(|ts| ts.iter().map(String::as_str).collect())
                .unwrap_or_default();
            (id.as_str(), set)
        })
        .collect();

    let min_shared = config.min_shared_titles.max(1);
    let mut graph = Graph::with_capacity(people.len());
    for (p, p_person) in &people {
        graph.add_node(p);
        for (q, q_person) in &people {
            if p == q {
                continue;
            }
            let shared = title_sets[p.as_str()]
                .intersection(&title_sets[q.as_str()])
                .count();
            if shared < min_shared {
                continue;
            }

            let weight = shared as f64;
            match (p_person.role, q_person.role) {
                (Role::Actor, Role::Director) => graph.add_edge_by_id(q, p, weight)?,
                (Role::Director, Role::Actor) => graph.add_edge_by_id(p, q, weight)?,
                _ => {
                    graph.add_edge_by_id(p, q, weight)?;
                    graph.add_edge_by_id(q, p, weight)?;
                }
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "collaboration network built"
    );
    Ok(graph)
}

/// Build a network from an array of `{person_id, name, profession, title}`
/// objects. `min_shared_titles` defaults to 3.
#[wasm_bindgen(js_name = buildNetwork)]
pub fn build_network_js(
    credits: JsValue,
    min_shared_titles: Option<usize>,
) -> std::result::Result<Graph, JsValue> {
    let credits: Vec<Credit> = serde_wasm_bindgen::from_value(credits)?;
    let mut config = NetworkConfig::default();
    if let Some(min) = min_shared_titles {
        config.min_shared_titles = min;
    }
    Ok(build_network(&credits, &config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(person_id: &str, name: &str, profession: &str, title: &str) -> Credit {
        Credit {
            person_id: person_id.to_string(),
            name: name.to_string(),
            profession: profession.to_string(),
            title: title.to_string(),
        }
    }

    /// a1/a2 (actors) share t1..t3; d1 (director) shares t1..t3 with a1 and
    /// only t1, t2 with a2. w1 is a writer.
    fn sample() -> Vec<Credit> {
        let mut credits = Vec::new();
        for t in ["t1", "t2", "t3"] {
            credits.push(credit("a1", "Ann", "actor", t));
            credits.push(credit("a2", "Bob", "actor", t));
            credits.push(credit("d1", "Dee", "director", t));
            credits.push(credit("w1", "Wes", "writer", t));
        }
        credits.push(credit("a2", "Bob", "actor", "t4"));
        credits.retain(|c| !(c.person_id == "a2" && c.title == "t3"));
        credits.push(credit("a2", "Bob", "actor", "t3-remake"));
        credits.push(credit("a1", "Ann", "actor", "t4"));
        credits
    }

    #[test]
    fn test_title_index() {
        let titles = title_index(&sample());
        assert_eq!(titles["a1"], vec!["t1", "t2", "t3", "t4"]);
        assert_eq!(titles["w1"].len(), 3);
    }

    #[test]
    fn test_role_index_labels() {
        let people = role_index(&sample());
        assert_eq!(people.len(), 3);
        assert_eq!(people["a1"].label, "Ann_a");
        assert_eq!(people["d1"].label, "Dee_d");
        assert_eq!(people["d1"].role, Role::Director);
        assert!(!people.contains_key("w1"));
    }

    #[test]
    fn test_role_index_last_wins_keeps_position() {
        let credits = vec![
            credit("p", "Pat", "actor", "x"),
            credit("q", "Quinn", "actor", "x"),
            credit("p", "Pat", "director", "y"),
        ];
        let people = role_index(&credits);
        let order: Vec<&str> = people.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["p", "q"]);
        assert_eq!(people["p"].role, Role::Director);
    }

    #[test]
    fn test_build_network_edges() {
        let g = build_network(&sample(), &NetworkConfig::default()).unwrap();
        let a1 = g.node_idx("a1").unwrap();
        let a2 = g.node_idx("a2").unwrap();
        let d1 = g.node_idx("d1").unwrap();

        assert_eq!(g.node_count(), 3);
        assert!(!g.contains("w1"));

        // a1 and a2 share t1, t2, t4
        assert_eq!(g.weight(a1, a2), Some(3.0));
        assert_eq!(g.weight(a2, a1), Some(3.0));

        // director -> actor only
        assert_eq!(g.weight(d1, a1), Some(3.0));
        assert_eq!(g.weight(a1, d1), None);

        // d1 and a2 share only t1, t2
        assert_eq!(g.weight(d1, a2), None);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_build_network_threshold() {
        let config = NetworkConfig {
            min_shared_titles: 2,
        };
        let g = build_network(&sample(), &config).unwrap();
        let a2 = g.node_idx("a2").unwrap();
        let d1 = g.node_idx("d1").unwrap();
        assert_eq!(g.weight(d1, a2), Some(2.0));
    }

    #[test]
    fn test_directors_link_both_ways() {
        let mut credits = Vec::new();
        for t in ["t1", "t2", "t3", "t4"] {
            credits.push(credit("d1", "Dee", "director", t));
            credits.push(credit("d2", "Dan", "director", t));
        }
        let g = build_network(&credits, &NetworkConfig::default()).unwrap();
        assert_eq!(g.weight(0, 1), Some(4.0));
        assert_eq!(g.weight(1, 0), Some(4.0));
    }

    #[test]
    fn test_network_feeds_algorithms() {
        let g = build_network(&sample(), &NetworkConfig::default()).unwrap();
        let sccs = g.strongly_connected_components();
        // {a1, a2} is a cycle; d1 stands alone
        assert_eq!(sccs.components.len(), 2);
        assert_eq!(sccs.cycle_count, 1);

        assert!(g.breadth_first("d1", Some("a2")).unwrap().is_found());
        assert!(!g.depth_first("a2", Some("d1")).unwrap().is_found());
    }

    #[test]
    fn test_titles_fold_to_ascii() {
        let mut credits = Vec::new();
        for (accented, plain) in [("Amélie", "Amelie"), ("Léon", "Leon"), ("Café", "Cafe")] {
            credits.push(credit("a1", "Ann", "actor", accented));
            credits.push(credit("a2", "Bob", "actor", plain));
        }

        let titles = title_index(&credits);
        assert_eq!(titles["a1"], vec!["Amelie", "Leon", "Cafe"]);

        let g = build_network(&credits, &NetworkConfig::default()).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(0, 1), Some(3.0));
        assert_eq!(g.weight(1, 0), Some(3.0));
    }

    #[test]
    fn test_zero_threshold_still_needs_a_shared_title() {
        let credits = vec![
            credit("a1", "Ann", "actor", "t1"),
            credit("a2", "Bob", "actor", "t2"),
            credit("d1", "Dee", "director", "t1"),
        ];
        let config = NetworkConfig {
            min_shared_titles: 0,
        };
        let g = build_network(&credits, &config).unwrap();
        let a1 = g.node_idx("a1").unwrap();
        let a2 = g.node_idx("a2").unwrap();
        let d1 = g.node_idx("d1").unwrap();

        assert_eq!(g.weight(d1, a1), Some(1.0));
        assert_eq!(g.weight(a1, a2), None);
        assert_eq!(g.weight(d1, a2), None);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_empty_credits() {
        let g = build_network(&[], &NetworkConfig::default()).unwrap();
        assert!(g.is_empty());
    }
}
