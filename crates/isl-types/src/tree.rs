//! Constituency trees stored as an arena.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]: a node owns
//! the ids of its children and keeps a plain id for its parent. There are no
//! owning back-links, so a tree can never form a reference cycle and
//! per-pass bookkeeping (such as a visited set) can be a flat map keyed by id.
//!
//! Node `0` is always the root. Leaves are nodes whose label is the word.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    leaf: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TreeError {
    #[error("bracketed tree is empty")]
    Empty,
    #[error("expected '(' at byte {0}")]
    ExpectedOpen(usize),
    #[error("unbalanced ')' at byte {0}")]
    UnexpectedClose(usize),
    #[error("bracketed tree ended before all phrases were closed")]
    UnexpectedEnd,
    #[error("unexpected input after tree at byte {0}")]
    TrailingInput(usize),
}

impl ParseTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                label: root_label.into(),
                parent: None,
                children: Vec::new(),
                leaf: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a phrase node (e.g. `NP`) as the last child of `parent`.
    pub fn add_phrase(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        self.push(parent, label.into(), false)
    }

    /// Append a word as the last child of `parent`.
    pub fn add_leaf(&mut self, parent: NodeId, word: impl Into<String>) -> NodeId {
        self.push(parent, word.into(), true)
    }

    fn push(&mut self, parent: NodeId, label: String, leaf: bool) -> NodeId {
        debug_assert!(!self.nodes[parent.0].leaf, "leaves cannot have children");
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label,
            parent: Some(parent),
            children: Vec::new(),
            leaf,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].leaf
    }

    /// Number of nodes, leaves included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].children.is_empty()
    }

    /// Every node in document (pre-)order, starting at the root.
    pub fn preorder(&self) -> Preorder<'_> {
        self.descendants(self.root())
    }

    /// `id` followed by everything below it, in document order.
    pub fn descendants(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Leaf nodes under `id`, lazily, in document order.
    pub fn leaves(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id).filter(|&n| self.is_leaf(n))
    }

    pub fn leaf_count(&self, id: NodeId) -> usize {
        self.leaves(id).count()
    }

    /// The sentence's words, in order.
    pub fn words(&self) -> Vec<&str> {
        self.leaves(self.root()).map(|n| self.label(n)).collect()
    }

    /// Read a single Penn-style bracketed tree such as
    /// `(ROOT (S (NP (PRP I)) (VP (VBP go))))`.
    pub fn from_bracketed(input: &str) -> Result<Self, TreeError> {
        let mut lexer = Lexer::new(input);
        let tree = parse_one(&mut lexer)?;
        match lexer.next() {
            None => Ok(tree),
            Some((offset, _)) => Err(TreeError::TrailingInput(offset)),
        }
    }

    /// Read every bracketed tree in `input`, e.g. the k-best output of a parser.
    pub fn from_bracketed_many(input: &str) -> Result<Vec<Self>, TreeError> {
        let mut lexer = Lexer::new(input);
        let mut trees = Vec::new();
        while lexer.peek().is_some() {
            trees.push(parse_one(&mut lexer)?);
        }
        Ok(trees)
    }
}

pub struct Preorder<'a> {
    tree: &'a ParseTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Tok<'a> {
    Open,
    Close,
    Atom(&'a str),
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    peeked: Option<(usize, Tok<'a>)>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            peeked: None,
        }
    }

    fn peek(&mut self) -> Option<(usize, Tok<'a>)> {
        if self.peeked.is_none() {
            self.peeked = self.lex();
        }
        self.peeked
    }

    fn lex(&mut self) -> Option<(usize, Tok<'a>)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
        let (start, c) = self.chars.next()?;
        match c {
            '(' => Some((start, Tok::Open)),
            ')' => Some((start, Tok::Close)),
            _ => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, c)) = self.chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    end = idx + c.len_utf8();
                    self.chars.next();
                }
                Some((start, Tok::Atom(&self.input[start..end])))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (usize, Tok<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(tok) => Some(tok),
            None => self.lex(),
        }
    }
}

fn parse_one(lexer: &mut Lexer<'_>) -> Result<ParseTree, TreeError> {
    match lexer.next() {
        None => return Err(TreeError::Empty),
        Some((_, Tok::Open)) => {}
        Some((offset, Tok::Close)) => return Err(TreeError::UnexpectedClose(offset)),
        Some((offset, Tok::Atom(_))) => return Err(TreeError::ExpectedOpen(offset)),
    }
    let mut tree = ParseTree::new(take_label(lexer));
    let mut open = vec![tree.root()];

    while let Some((_, tok)) = lexer.next() {
        // `open` is never empty inside the loop: the root closing returns.
        let top = open[open.len() - 1];
        match tok {
            Tok::Open => {
                let label = take_label(lexer);
                let id = tree.add_phrase(top, label);
                open.push(id);
            }
            Tok::Close => {
                open.pop();
                if open.is_empty() {
                    return Ok(tree);
                }
            }
            Tok::Atom(word) => {
                tree.add_leaf(top, word);
            }
        }
    }
    Err(TreeError::UnexpectedEnd)
}

/// A phrase label directly follows its `(`; `((S ...))` has an empty label.
fn take_label(lexer: &mut Lexer<'_>) -> String {
    match lexer.peek() {
        Some((_, Tok::Atom(label))) => {
            lexer.next();
            label.to_string()
        }
        _ => String::new(),
    }
}
