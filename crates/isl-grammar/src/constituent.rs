//! Constituent reordering driven by a constituency parse.
//!
//! ISL glosses tend to put topics and objects ahead of the predicate. Given a
//! parse of the filtered sentence, the reorderer emits whole subtrees in this
//! order, walking the tree in document order each time:
//! 1. every `NP`, as one contiguous block;
//! 2. inside every `VP` or `PRP`, each embedded `NP` or `PRP`;
//! 3. every remaining single-leaf subtree (bare verbs, adverbs, determiners).
//!
//! A subtree is emitted only if neither it, nor any ancestor, nor any
//! descendant has been emitted already. The spans emitted are therefore
//! disjoint, and step 3 reaches every leaf not yet covered, so the output is
//! always a permutation of the input.
//!
//! Parsing is best effort: a sentence made only of single letters is never
//! parsed, and any parser failure falls back to the filtered order (stop
//! words and punctuation already removed), not the raw token order.

use std::sync::Arc;

use isl_types::{NodeId, ParseTree, is_single_char};
use tracing::{debug, warn};

use crate::filter::FilteredSentence;
use crate::{Reorderer, Reordering, Slot};

/// External constituency parser.
pub trait ConstituencyParser: Send + Sync {
    /// Candidate trees for `words`, best first. The k-th leaf of a tree must
    /// be the k-th word.
    fn parse(&self, words: &[&str]) -> anyhow::Result<Vec<ParseTree>>;
}

pub struct ConstituentReorderer {
    parser: Arc<dyn ConstituencyParser>,
}

impl ConstituentReorderer {
    pub fn new(parser: Arc<dyn ConstituencyParser>) -> Self {
        Self { parser }
    }

    fn degrade(sentence: &FilteredSentence<'_>, error: String) -> Reordering {
        warn!("keeping original word order: {error}");
        Reordering {
            parser_error: Some(error),
            ..Reordering::unchanged(sentence)
        }
    }
}

impl Reorderer for ConstituentReorderer {
    fn reorder(&self, sentence: &FilteredSentence<'_>) -> Reordering {
        let words = sentence.words();
        if words.is_empty() {
            return Reordering::default();
        }
        if words.iter().all(|w| is_single_char(w)) {
            debug!("sentence is spelled out; skipping parse");
            return Reordering::unchanged(sentence);
        }

        let tree = match self.parser.parse(&words) {
            Ok(trees) => match trees.into_iter().next() {
                Some(tree) => tree,
                None => return Self::degrade(sentence, "parser returned no tree".to_string()),
            },
            Err(err) => return Self::degrade(sentence, format!("parser failed: {err:#}")),
        };

        let leaves = tree.leaf_count(tree.root());
        if leaves != words.len() {
            return Self::degrade(
                sentence,
                format!(
                    "parse tree has {leaves} leaves for {} words",
                    words.len()
                ),
            );
        }

        let slots = reorder_tree(&tree)
            .into_iter()
            .map(|ordinal| Slot::Token(sentence.kept[ordinal]))
            .collect();
        Reordering {
            slots,
            parser_used: true,
            parser_error: None,
        }
    }
}

/// Reorder the leaves of `tree`, returning leaf ordinals (0 = first word) in
/// ISL order.
pub fn reorder_tree(tree: &ParseTree) -> Vec<usize> {
    let mut pass = Pass::new(tree);

    for id in tree.preorder() {
        if tree.is_leaf(id) {
            continue;
        }
        match tree.label(id) {
            "NP" => pass.take(id),
            "VP" | "PRP" => {
                for inner in tree.descendants(id) {
                    if !tree.is_leaf(inner) && matches!(tree.label(inner), "NP" | "PRP") {
                        pass.take(inner);
                    }
                }
            }
            _ => {}
        }
    }

    for id in tree.preorder() {
        if tree.leaf_count(id) == 1 {
            pass.take(id);
        }
    }

    pass.into_ordinals()
}

struct Pass<'t> {
    tree: &'t ParseTree,
    visited: Vec<bool>,
    emitted: Vec<NodeId>,
}

impl<'t> Pass<'t> {
    fn new(tree: &'t ParseTree) -> Self {
        Self {
            tree,
            visited: vec![false; tree.len()],
            emitted: Vec::new(),
        }
    }

    fn is_visited(&self, id: NodeId) -> bool {
        self.visited[id.index()]
    }

    /// `id` or one of its ancestors was already emitted.
    fn covered(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if self.is_visited(node) {
                return true;
            }
            cursor = self.tree.parent(node);
        }
        false
    }

    fn has_visited_descendant(&self, id: NodeId) -> bool {
        self.tree.descendants(id).skip(1).any(|n| self.is_visited(n))
    }

    fn take(&mut self, id: NodeId) {
        if self.covered(id) || self.has_visited_descendant(id) {
            return;
        }
        self.visited[id.index()] = true;
        self.emitted.push(id);
    }

    fn into_ordinals(self) -> Vec<usize> {
        let tree = self.tree;
        let mut ordinal_of = vec![usize::MAX; tree.len()];
        for (ordinal, leaf) in tree.leaves(tree.root()).enumerate() {
            ordinal_of[leaf.index()] = ordinal;
        }
        let ordinals: Vec<usize> = self
            .emitted
            .iter()
            .flat_map(|&id| tree.leaves(id))
            .map(|leaf| ordinal_of[leaf.index()])
            .collect();
        debug_assert_eq!(ordinals.len(), tree.leaf_count(tree.root()));
        ordinals
    }
}
