//! Refine-tree facet: single-path drill-down through a fixed attribute hierarchy.
//!
//! The tree (e.g. industry and commerce categories) is a forest of immutable
//! [`RefineNode`]s with forward-only `children`. Selection state is **one path** from a
//! root to some node, never a set.
//!
//! ## Toggling
//!
//! Nodes have no parent pointers, so the caller passes the ancestor chain it walked to
//! reach the node (root first). Given `ancestors` and `node`:
//!
//! - `node` is not on the current path: the path becomes `ancestors ++ [node]`,
//!   replacing whatever was selected before.
//! - `node` is on the current path (the leaf, or an ancestor of it): the path becomes
//!   `ancestors`. Re-clicking backs up one level instead of clearing everything.
//!
//! The chain is resolved against the tree before anything changes. A chain that is not a
//! contiguous root-to-node walk is a wiring bug and is rejected with
//! [`FacetError::MalformedPath`]; the committed path is left as it was.
//!
//! ## Projection
//!
//! Only the leaf reaches the query layer, as one `ATTRIBUTE` clause. Intermediate path
//! elements are navigation state. This facet therefore never emits more than one clause
//! and never more than one chip.

use serde::{Deserialize, Serialize};

use crate::chip::{Chip, REFINE_CHIP_KEY};
use crate::clause::{AttributeValue, Clause, ClauseValue, FacetKind, Scalar};
use crate::error::{FacetError, Result};
use crate::event::FacetEvent;

/// Identity of a node within its sibling set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeKey {
    pub attribute_name: String,
    pub attribute_value: Scalar,
}

impl NodeKey {
    pub fn new(attribute_name: impl Into<String>, attribute_value: impl Into<Scalar>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            attribute_value: attribute_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineNode {
    pub attribute_name: String,
    pub attribute_value: Scalar,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RefineNode>,
}

impl RefineNode {
    pub fn new(
        attribute_name: impl Into<String>,
        attribute_value: impl Into<Scalar>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            attribute_value: attribute_value.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RefineNode>) -> Self {
        self.children = children;
        self
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            attribute_name: self.attribute_name.clone(),
            attribute_value: self.attribute_value.clone(),
        }
    }

    fn matches(&self, key: &NodeKey) -> bool {
        self.attribute_name == key.attribute_name && self.attribute_value == key.attribute_value
    }
}

/// The fixed forest a refine-tree facet navigates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefineTree {
    roots: Vec<RefineNode>,
}

impl RefineTree {
    pub fn new(roots: Vec<RefineNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[RefineNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve a root-first chain of keys to the nodes along it.
    pub fn resolve(&self, chain: &[NodeKey]) -> Result<Vec<&RefineNode>> {
        let mut level: &[RefineNode] = &self.roots;
        let mut nodes = Vec::with_capacity(chain.len());
        for (depth, key) in chain.iter().enumerate() {
            let node = level.iter().find(|n| n.matches(key)).ok_or_else(|| {
                FacetError::MalformedPath(format!(
                    "{}={} is not reachable at depth {}",
                    key.attribute_name, key.attribute_value, depth
                ))
            })?;
            nodes.push(node);
            level = &node.children;
        }
        Ok(nodes)
    }

    /// Every root-to-node walk, depth first. The last key of each walk is the node.
    pub fn walks(&self) -> Vec<Vec<NodeKey>> {
        fn visit(nodes: &[RefineNode], prefix: &mut Vec<NodeKey>, out: &mut Vec<Vec<NodeKey>>) {
            for node in nodes {
                prefix.push(node.key());
                out.push(prefix.clone());
                visit(&node.children, prefix, out);
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        visit(&self.roots, &mut Vec::new(), &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathElement {
    pub attribute_name: String,
    pub attribute_value: Scalar,
    pub label: String,
    pub include: bool,
}

impl PathElement {
    fn from_node(node: &RefineNode) -> Self {
        Self {
            attribute_name: node.attribute_name.clone(),
            attribute_value: node.attribute_value.clone(),
            label: node.label.clone(),
            include: true,
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            attribute_name: self.attribute_name.clone(),
            attribute_value: self.attribute_value.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefineTreeFacet {
    tree: RefineTree,
    path: Vec<PathElement>,
}

impl RefineTreeFacet {
    pub fn new(tree: RefineTree) -> Self {
        Self {
            tree,
            path: Vec::new(),
        }
    }

    pub fn tree(&self) -> &RefineTree {
        &self.tree
    }

    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    /// Whether `node`, reached through `ancestors`, is on the current path.
    pub fn is_selected(&self, ancestors: &[NodeKey], node: &NodeKey) -> bool {
        let depth = ancestors.len();
        match self.path.get(depth) {
            Some(element) => {
                element.key() == *node
                    && self.path[..depth]
                        .iter()
                        .zip(ancestors)
                        .all(|(element, key)| element.key() == *key)
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, ancestors: &[NodeKey], node: &NodeKey) -> Result<()> {
        let mut chain = ancestors.to_vec();
        chain.push(node.clone());
        let resolved = self.tree.resolve(&chain)?;

        if self.is_selected(ancestors, node) {
            self.path.truncate(ancestors.len());
            return Ok(());
        }

        let mut path: Vec<PathElement> = resolved.into_iter().map(PathElement::from_node).collect();
        // Ancestors shared with the old path keep their flags.
        for (element, old) in path.iter_mut().zip(&self.path) {
            if element.key() != old.key() {
                break;
            }
            element.include = old.include;
        }
        if let Some(leaf) = path.last_mut() {
            leaf.include = true;
        }
        self.path = path;
        Ok(())
    }

    /// Set the include flag of the leaf. No-op when nothing is selected.
    pub fn switch_leaf(&mut self, include: bool) {
        if let Some(leaf) = self.path.last_mut() {
            leaf.include = include;
        }
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    pub fn to_projection(&self) -> Vec<Clause> {
        self.path
            .last()
            .map(|leaf| {
                Clause::new(
                    FacetKind::Attribute,
                    leaf.include,
                    ClauseValue::Attributes(vec![AttributeValue {
                        name: leaf.attribute_name.clone(),
                        value: leaf.attribute_value.clone(),
                    }]),
                )
            })
            .into_iter()
            .collect()
    }

    pub fn to_chips(&self) -> Vec<Chip> {
        let Some(leaf) = self.path.last() else {
            return Vec::new();
        };
        let label = match self.path.len().checked_sub(2).map(|i| &self.path[i]) {
            Some(parent) => format!("{} > {}", parent.label, leaf.label),
            None => leaf.label.clone(),
        };

        vec![Chip {
            key: REFINE_CHIP_KEY.to_string(),
            label,
            value: leaf.attribute_value.to_string(),
            include: leaf.include,
            on_switch: FacetEvent::SwitchRefine {
                include: !leaf.include,
            },
            on_remove: FacetEvent::ClearRefine,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseAction;

    fn industry() -> RefineTree {
        RefineTree::new(vec![
            RefineNode::new("commercial_sector_icon", "agriculture", "Agriculture").with_children(
                vec![
                    RefineNode::new("agricultural_industry_icon", "livestock", "Livestock")
                        .with_children(vec![RefineNode::new(
                            "livestock_icon",
                            "cattle",
                            "Cattle",
                        )]),
                    RefineNode::new("agricultural_industry_icon", "crops", "Crops"),
                ],
            ),
            RefineNode::new("commercial_sector_icon", "fisheries", "Fisheries"),
        ])
    }

    fn agriculture() -> NodeKey {
        NodeKey::new("commercial_sector_icon", "agriculture")
    }

    fn livestock() -> NodeKey {
        NodeKey::new("agricultural_industry_icon", "livestock")
    }

    fn crops() -> NodeKey {
        NodeKey::new("agricultural_industry_icon", "crops")
    }

    fn cattle() -> NodeKey {
        NodeKey::new("livestock_icon", "cattle")
    }

    fn keys(facet: &RefineTreeFacet) -> Vec<NodeKey> {
        facet.path().iter().map(PathElement::key).collect()
    }

    #[test]
    fn selecting_a_leaf_under_a_parent() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &livestock()).unwrap();

        assert_eq!(
            facet.to_projection(),
            vec![Clause {
                facet_kind: FacetKind::Attribute,
                action: ClauseAction::Include,
                value: ClauseValue::attribute("agricultural_industry_icon", "livestock"),
            }]
        );
        let chips = facet.to_chips();
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].label, "Agriculture > Livestock");
        assert_eq!(chips[0].value, "livestock");
    }

    #[test]
    fn root_selection_chip_has_no_parent_label() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[], &agriculture()).unwrap();
        assert_eq!(facet.to_chips()[0].label, "Agriculture");
    }

    #[test]
    fn deep_leaf_chip_uses_immediate_parent() {
        let mut facet = RefineTreeFacet::new(industry());
        facet
            .toggle(&[agriculture(), livestock()], &cattle())
            .unwrap();
        assert_eq!(facet.to_chips()[0].label, "Livestock > Cattle");
        assert_eq!(facet.to_projection().len(), 1);
    }

    #[test]
    fn reselecting_the_leaf_truncates_then_restores() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &livestock()).unwrap();

        facet.toggle(&[agriculture()], &livestock()).unwrap();
        assert_eq!(keys(&facet), vec![agriculture()]);

        facet.toggle(&[agriculture()], &livestock()).unwrap();
        assert_eq!(keys(&facet), vec![agriculture(), livestock()]);
    }

    #[test]
    fn reselecting_an_ancestor_drops_it_and_everything_below() {
        let mut facet = RefineTreeFacet::new(industry());
        facet
            .toggle(&[agriculture(), livestock()], &cattle())
            .unwrap();

        facet.toggle(&[agriculture()], &livestock()).unwrap();
        assert_eq!(keys(&facet), vec![agriculture()]);

        facet.toggle(&[], &agriculture()).unwrap();
        assert!(facet.path().is_empty());
        assert!(facet.to_projection().is_empty());
    }

    #[test]
    fn selecting_a_sibling_replaces_the_old_branch() {
        let mut facet = RefineTreeFacet::new(industry());
        facet
            .toggle(&[agriculture(), livestock()], &cattle())
            .unwrap();
        facet.toggle(&[agriculture()], &crops()).unwrap();
        assert_eq!(keys(&facet), vec![agriculture(), crops()]);

        facet
            .toggle(&[], &NodeKey::new("commercial_sector_icon", "fisheries"))
            .unwrap();
        assert_eq!(facet.path().len(), 1);
        assert_eq!(facet.path()[0].label, "Fisheries");
    }

    #[test]
    fn disconnected_chain_is_rejected_without_touching_state() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &crops()).unwrap();

        // cattle is two levels below agriculture, not a child of it
        let err = facet.toggle(&[agriculture()], &cattle()).unwrap_err();
        assert!(matches!(err, FacetError::MalformedPath(_)));

        let err = facet
            .toggle(&[NodeKey::new("commercial_sector_icon", "fisheries")], &livestock())
            .unwrap_err();
        assert!(matches!(err, FacetError::MalformedPath(_)));

        assert_eq!(keys(&facet), vec![agriculture(), crops()]);
    }

    #[test]
    fn switch_flips_only_the_leaf() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &livestock()).unwrap();
        facet.switch_leaf(false);

        assert!(facet.path()[0].include);
        assert!(!facet.path()[1].include);
        assert_eq!(facet.to_projection()[0].action, ClauseAction::Exclude);
        assert_eq!(
            facet.to_chips()[0].on_switch,
            FacetEvent::SwitchRefine { include: true }
        );
    }

    #[test]
    fn newly_selected_leaf_starts_included() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &livestock()).unwrap();
        facet.switch_leaf(false);
        facet.toggle(&[agriculture()], &crops()).unwrap();
        assert_eq!(facet.to_projection()[0].action, ClauseAction::Include);
    }

    #[test]
    fn chip_removal_clears_the_whole_path() {
        let mut facet = RefineTreeFacet::new(industry());
        facet.toggle(&[agriculture()], &livestock()).unwrap();
        assert_eq!(facet.to_chips()[0].on_remove, FacetEvent::ClearRefine);

        facet.clear();
        assert!(facet.path().is_empty());
        assert!(facet.to_chips().is_empty());
    }

    #[test]
    fn any_toggle_sequence_keeps_one_contiguous_path() {
        let tree = industry();
        let walks = tree.walks();
        assert_eq!(walks.len(), 5);

        for first in &walks {
            for second in &walks {
                for third in &walks {
                    let mut facet = RefineTreeFacet::new(tree.clone());
                    for walk in [first, second, third] {
                        let (node, ancestors) = walk.split_last().unwrap();
                        facet.toggle(ancestors, node).unwrap();

                        assert!(facet.to_projection().len() <= 1);
                        assert!(facet.to_chips().len() <= 1);
                        if !facet.path().is_empty() {
                            assert!(tree.resolve(&keys(&facet)).is_ok());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn tree_reads_from_json() {
        let raw = r#"[{
            "attributeName": "commercial_sector_icon",
            "attributeValue": "agriculture",
            "label": "Agriculture",
            "children": [{"attributeName": "flag", "attributeValue": true, "label": "Flagged"}]
        }]"#;
        let roots: Vec<RefineNode> = serde_json::from_str(raw).unwrap();
        let tree = RefineTree::new(roots);
        let resolved = tree
            .resolve(&[agriculture(), NodeKey::new("flag", true)])
            .unwrap();
        assert_eq!(resolved[1].label, "Flagged");
    }
}
