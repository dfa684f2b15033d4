//! Arena of positions reachable from a root record.
//!
//! Nodes live in one `Vec` and refer to each other by `NodeId`, so the tree
//! can grow without shared ownership. There is no search policy here: callers
//! decide which nodes to expand or play from.
//!
//! Each node keeps only its record, so a rules engine rebuilt from a node
//! has no repetition history from the path above it.

use std::marker::PhantomData;

use crate::errors::{EnvError, EnvResult, RulesResult};
use crate::rules::game::Game;
use crate::rules::long_algebraic::LongAlgebraicMove;
use crate::rules::rules_engine::{MoveSquares, RulesEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionNode {
    pub record: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Long algebraic text of the move that led here; `None` at the root.
    pub move_text: Option<String>,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct PositionTree<R: RulesEngine = Game> {
    nodes: Vec<PositionNode>,
    engine: PhantomData<R>,
}

impl<R: RulesEngine> PositionTree<R> {
    /// Tree holding only `record`. The record is loaded once to reject bad
    /// input up front.
    pub fn new(record: &str) -> RulesResult<Self> {
        let game = R::new_game(record)?;
        let root = PositionNode {
            record: game.current_record(),
            parent: None,
            children: Vec::new(),
            move_text: None,
            expanded: false,
        };

        Ok(Self {
            nodes: vec![root],
            engine: PhantomData,
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one child per legal move of `id`. Expanding twice is a no-op.
    pub fn expand(&mut self, id: NodeId) -> EnvResult<&[NodeId]> {
        let node = self.require(id)?;
        if node.expanded {
            return Ok(self.children(id));
        }

        let record = node.record.clone();
        let game = R::new_game(&record)?;
        if !game.is_game_over() {
            for mv in game.legal_moves() {
                let text = move_text(game.move_squares(&mv));
                self.play(id, &text)?;
            }
        }

        self.nodes[id.0].expanded = true;
        Ok(self.children(id))
    }

    /// Child reached by playing `text` from `id`, created if it does not
    /// exist yet.
    pub fn play(&mut self, id: NodeId, text: &str) -> EnvResult<NodeId> {
        let record = self.require(id)?.record.clone();
        let mut game = R::new_game(&record)?;
        let mv = game.parse_move(text)?;
        let canonical = move_text(game.move_squares(&mv));

        if let Some(existing) = self.children(id).iter().copied().find(|child| {
            self.nodes[child.0].move_text.as_deref() == Some(canonical.as_str())
        }) {
            return Ok(existing);
        }

        game.apply_move(mv)?;
        let child = NodeId(self.nodes.len());
        self.nodes.push(PositionNode {
            record: game.current_record(),
            parent: Some(id),
            children: Vec::new(),
            move_text: Some(canonical),
            expanded: false,
        });
        self.nodes[id.0].children.push(child);

        Ok(child)
    }

    /// Move texts from the root down to `id`.
    pub fn line_to(&self, id: NodeId) -> Vec<String> {
        let mut line = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else { break };
            if let Some(text) = &node.move_text {
                line.push(text.clone());
            }
            cursor = node.parent;
        }
        line.reverse();
        line
    }

    fn require(&self, id: NodeId) -> EnvResult<&PositionNode> {
        self.node(id)
            .ok_or(EnvError::UnknownNode(id.0))
    }
}

fn move_text(squares: MoveSquares) -> String {
    LongAlgebraicMove::from(squares).to_string()
}
