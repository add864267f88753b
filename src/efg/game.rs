//! Extensive-form game trees.
//!
//! An [`Efg`] is an arena of nodes rooted at node `0`. Players own ordered
//! lists of information sets; every decision node belongs to exactly one
//! information set and has one child per action of that set. Children are
//! always allocated after their parent, so node ids grow away from the root
//! and a reverse scan of the arena visits children before parents.
//!
//! Nodes can be marked as subgame roots. The root is always marked; any other
//! non-terminal node may be marked as long as no information set straddles
//! the boundary of its subtree.

use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

use serde::{Deserialize, Serialize};

/// Index of a node in the game arena.
pub type NodeId = usize;

/// Identifies an information set by owning player and position in that
/// player's list (both zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InfosetId {
    /// Owning player.
    pub player: usize,
    /// Position in the player's infoset list.
    pub index: usize,
}

impl InfosetId {
    /// Create an infoset id.
    pub const fn new(player: usize, index: usize) -> Self {
        Self { player, index }
    }
}

impl fmt::Display for InfosetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.player, self.index)
    }
}

/// Errors raised while building or querying a game tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EfgError {
    /// Player index out of range.
    #[error("unknown player {0}")]
    UnknownPlayer(usize),
    /// Infoset id out of range.
    #[error("unknown infoset {0}")]
    UnknownInfoset(InfosetId),
    /// Node id out of range.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Action index out of range at an infoset.
    #[error("action {action} out of range at infoset {infoset}")]
    UnknownAction {
        /// Infoset queried.
        infoset: InfosetId,
        /// Offending action index.
        action: usize,
    },
    /// An infoset must offer at least one action.
    #[error("infoset {0:?} has no actions")]
    NoActions(String),
    /// The node already has children.
    #[error("node {0} is not a leaf")]
    NotALeaf(NodeId),
    /// Payoffs can only be attached to terminal nodes.
    #[error("node {0} is not terminal")]
    NotTerminal(NodeId),
    /// Payoff vector does not have one entry per player.
    #[error("expected {expected} payoffs, found {found}")]
    PayoffLength {
        /// Number of players.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// Chance probabilities must be non-negative and sum to one.
    #[error("invalid chance distribution {0:?}")]
    InvalidChance(Vec<f64>),
    /// The node cannot root a subgame.
    #[error("node {0} is not a legal subgame root")]
    IllegalSubgameRoot(NodeId),
    /// The root of the game is always a subgame root.
    #[error("the root node cannot be unmarked")]
    UnmarkRoot,
    /// A support must keep at least one action per infoset.
    #[error("cannot remove the last active action at infoset {0}")]
    LastAction(InfosetId),
}

/// What happens at a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// End of play with one payoff per player.
    Terminal {
        /// Payoff to each player.
        payoffs: Vec<f64>,
    },
    /// Nature moves with fixed probabilities, one per child.
    Chance {
        /// Probability of each child.
        probs: Vec<f64>,
    },
    /// A player chooses an action of `infoset`.
    Decision {
        /// Infoset the node belongs to.
        infoset: InfosetId,
    },
}

/// A node in the game tree.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    marked: bool,
}

impl Node {
    fn leaf(parent: Option<NodeId>, num_players: usize) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind: NodeKind::Terminal {
                payoffs: vec![0.0; num_players],
            },
            marked: false,
        }
    }

    /// Parent node, `None` at the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in action order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node contents.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether the node ends play.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }

    /// Infoset of a decision node.
    pub fn infoset(&self) -> Option<InfosetId> {
        match self.kind {
            NodeKind::Decision { infoset } => Some(infoset),
            _ => None,
        }
    }

    /// Whether the node is marked as a subgame root.
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// An information set.
#[derive(Debug, Clone)]
pub struct Infoset {
    label: String,
    actions: Vec<String>,
    members: Vec<NodeId>,
}

impl Infoset {
    /// Human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Action names in order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Number of actions.
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Decision nodes in this infoset, in the order they were attached.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }
}

#[derive(Debug, Clone)]
struct Player {
    name: String,
    infosets: Vec<Infoset>,
}

/// An extensive-form game.
#[derive(Debug, Clone)]
pub struct Efg {
    title: String,
    players: Vec<Player>,
    nodes: Vec<Node>,
}

impl Efg {
    /// Create a game whose tree is a single terminal root.
    pub fn new(player_names: &[&str]) -> Self {
        let mut root = Node::leaf(None, player_names.len());
        root.marked = true;
        Self {
            title: String::new(),
            players: player_names
                .iter()
                .map(|name| Player {
                    name: (*name).to_string(),
                    infosets: Vec::new(),
                })
                .collect(),
            nodes: vec![root],
        }
    }

    /// Builder method: set the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Game title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Name of player `player`.
    pub fn player_name(&self, player: usize) -> Result<&str, EfgError> {
        self.players
            .get(player)
            .map(|p| p.name.as_str())
            .ok_or(EfgError::UnknownPlayer(player))
    }

    /// Number of infosets owned by `player` (0 for an unknown player).
    pub fn num_infosets(&self, player: usize) -> usize {
        self.players.get(player).map_or(0, |p| p.infosets.len())
    }

    /// Look up an infoset.
    pub fn infoset(&self, id: InfosetId) -> Result<&Infoset, EfgError> {
        self.players
            .get(id.player)
            .and_then(|p| p.infosets.get(id.index))
            .ok_or(EfgError::UnknownInfoset(id))
    }

    /// All infosets in canonical order: player by player, then by index.
    pub fn infoset_ids(&self) -> impl Iterator<Item = InfosetId> + '_ {
        self.players.iter().enumerate().flat_map(|(pl, player)| {
            (0..player.infosets.len()).map(move |index| InfosetId::new(pl, index))
        })
    }

    /// All infosets with their ids, in canonical order.
    pub fn infosets(&self) -> impl Iterator<Item = (InfosetId, &Infoset)> + '_ {
        self.players.iter().enumerate().flat_map(|(pl, player)| {
            player
                .infosets
                .iter()
                .enumerate()
                .map(move |(index, iset)| (InfosetId::new(pl, index), iset))
        })
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, EfgError> {
        self.nodes.get(id).ok_or(EfgError::UnknownNode(id))
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The `k`-th child of `node`.
    pub fn child(&self, node: NodeId, k: usize) -> Result<NodeId, EfgError> {
        self.node(node)?
            .children
            .get(k)
            .copied()
            .ok_or(EfgError::UnknownNode(node))
    }

    /// Add an infoset for `player` with the given actions.
    pub fn add_infoset(
        &mut self,
        player: usize,
        label: &str,
        actions: &[&str],
    ) -> Result<InfosetId, EfgError> {
        if actions.is_empty() {
            return Err(EfgError::NoActions(label.to_string()));
        }
        let owner = self
            .players
            .get_mut(player)
            .ok_or(EfgError::UnknownPlayer(player))?;
        owner.infosets.push(Infoset {
            label: label.to_string(),
            actions: actions.iter().map(|a| (*a).to_string()).collect(),
            members: Vec::new(),
        });
        Ok(InfosetId::new(player, owner.infosets.len() - 1))
    }

    /// Turn the leaf `node` into a decision node of `infoset`, creating one
    /// terminal child per action.
    pub fn set_decision(&mut self, node: NodeId, infoset: InfosetId) -> Result<Vec<NodeId>, EfgError> {
        self.check_leaf(node)?;
        let num_actions = self.infoset(infoset)?.num_actions();
        let children = self.grow(node, num_actions);
        self.nodes[node].kind = NodeKind::Decision { infoset };
        self.players[infoset.player].infosets[infoset.index]
            .members
            .push(node);
        Ok(children)
    }

    /// Turn the leaf `node` into a chance node with one child per probability.
    pub fn set_chance(&mut self, node: NodeId, probs: &[f64]) -> Result<Vec<NodeId>, EfgError> {
        self.check_leaf(node)?;
        let total: f64 = probs.iter().sum();
        if probs.is_empty()
            || probs.iter().any(|p| !p.is_finite() || *p < 0.0)
            || (total - 1.0).abs() > 1e-9
        {
            return Err(EfgError::InvalidChance(probs.to_vec()));
        }
        let children = self.grow(node, probs.len());
        self.nodes[node].kind = NodeKind::Chance {
            probs: probs.to_vec(),
        };
        Ok(children)
    }

    /// Set the payoffs at a terminal node.
    pub fn set_payoffs(&mut self, node: NodeId, payoffs: &[f64]) -> Result<(), EfgError> {
        let expected = self.num_players();
        let target = self.nodes.get_mut(node).ok_or(EfgError::UnknownNode(node))?;
        match &mut target.kind {
            NodeKind::Terminal { payoffs: slot } => {
                if payoffs.len() != expected {
                    return Err(EfgError::PayoffLength {
                        expected,
                        found: payoffs.len(),
                    });
                }
                slot.copy_from_slice(payoffs);
                Ok(())
            }
            _ => Err(EfgError::NotTerminal(node)),
        }
    }

    /// Whether `node` lies in the subtree rooted at `ancestor` (inclusive).
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes.get(n).and_then(|x| x.parent);
        }
        false
    }

    // ------------------------------------------------------------------
    // Subgames
    // ------------------------------------------------------------------

    /// Whether `node` can root a subgame: it is not terminal and every
    /// infoset reached inside its subtree lies entirely inside it.
    pub fn is_legal_subgame_root(&self, node: NodeId) -> bool {
        match self.nodes.get(node) {
            Some(n) if !n.is_terminal() => {}
            _ => return false,
        }
        let inside = self.subtree_mask(node);
        self.nodes
            .iter()
            .enumerate()
            .filter(|(id, _)| inside[*id])
            .filter_map(|(_, n)| n.infoset())
            .all(|iset| {
                self.players[iset.player].infosets[iset.index]
                    .members
                    .iter()
                    .all(|m| inside[*m])
            })
    }

    /// Mark `node` as a subgame root.
    pub fn mark_subgame(&mut self, node: NodeId) -> Result<(), EfgError> {
        self.node(node)?;
        if !self.is_legal_subgame_root(node) {
            return Err(EfgError::IllegalSubgameRoot(node));
        }
        self.nodes[node].marked = true;
        Ok(())
    }

    /// Remove the subgame mark from `node`. The root stays marked.
    pub fn unmark_subgame(&mut self, node: NodeId) -> Result<(), EfgError> {
        self.node(node)?;
        if node == self.root() {
            return Err(EfgError::UnmarkRoot);
        }
        self.nodes[node].marked = false;
        Ok(())
    }

    /// Mark every legal subgame root.
    pub fn mark_all_subgames(&mut self) {
        for node in 0..self.nodes.len() {
            if self.is_legal_subgame_root(node) {
                self.nodes[node].marked = true;
            }
        }
    }

    /// Remove every mark except the root's.
    pub fn unmark_all_subgames(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            node.marked = false;
        }
    }

    /// Whether `node` is marked as a subgame root.
    pub fn is_marked(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.marked)
    }

    /// The nearest marked ancestor of `node`, `node` itself included.
    pub fn subgame_root(&self, node: NodeId) -> NodeId {
        let mut current = node;
        loop {
            match self.nodes.get(current) {
                Some(n) if n.marked => return current,
                Some(Node {
                    parent: Some(p), ..
                }) => current = *p,
                _ => return self.root(),
            }
        }
    }

    /// Marked subgame roots in post-order: every nested subgame comes before
    /// the subgames that contain it, and the game root comes last.
    pub fn marked_subgame_roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        self.collect_marked(self.root(), &mut roots);
        roots
    }

    fn collect_marked(&self, node: NodeId, roots: &mut Vec<NodeId>) {
        for &child in &self.nodes[node].children {
            self.collect_marked(child, roots);
        }
        if self.nodes[node].marked {
            roots.push(node);
        }
    }

    /// Copy the subgame rooted at `root` into a standalone game. The game
    /// root is always accepted, even when it is terminal.
    ///
    /// Nodes listed in `collapsed` (other than `root`) are replaced by
    /// terminal nodes with the given payoffs; this is how already-solved
    /// nested subgames are folded away. All players are kept. An infoset is
    /// kept when it has a member in the copy, and kept infosets retain their
    /// relative order within each player.
    pub fn subgame(
        &self,
        root: NodeId,
        collapsed: &FxHashMap<NodeId, Vec<f64>>,
    ) -> Result<Efg, EfgError> {
        if root != self.root() && !self.is_legal_subgame_root(root) {
            return Err(EfgError::IllegalSubgameRoot(root));
        }
        let is_cut = |n: NodeId| n != root && collapsed.contains_key(&n);

        // First pass: which infosets survive.
        let mut used: Vec<Vec<bool>> = self
            .players
            .iter()
            .map(|p| vec![false; p.infosets.len()])
            .collect();
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            if is_cut(n) {
                continue;
            }
            if let Some(iset) = self.nodes[n].infoset() {
                used[iset.player][iset.index] = true;
            }
            stack.extend(self.nodes[n].children.iter().copied());
        }

        let mut sub = Efg {
            title: format!("{} [subgame at node {}]", self.title, root),
            players: Vec::with_capacity(self.players.len()),
            nodes: Vec::new(),
        };
        let mut renumber: FxHashMap<InfosetId, InfosetId> = FxHashMap::default();
        for (pl, player) in self.players.iter().enumerate() {
            let mut infosets = Vec::new();
            for (index, infoset) in player.infosets.iter().enumerate() {
                if used[pl][index] {
                    renumber.insert(InfosetId::new(pl, index), InfosetId::new(pl, infosets.len()));
                    infosets.push(Infoset {
                        label: infoset.label.clone(),
                        actions: infoset.actions.clone(),
                        members: Vec::new(),
                    });
                }
            }
            sub.players.push(Player {
                name: player.name.clone(),
                infosets,
            });
        }

        // Second pass: copy nodes in pre-order so parents precede children.
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(root, None)];
        while let Some((old, parent)) = stack.pop() {
            let id = sub.nodes.len();
            let source = &self.nodes[old];
            let (kind, descend) = match collapsed.get(&old).filter(|_| old != root) {
                Some(payoffs) => {
                    if payoffs.len() != self.num_players() {
                        return Err(EfgError::PayoffLength {
                            expected: self.num_players(),
                            found: payoffs.len(),
                        });
                    }
                    (
                        NodeKind::Terminal {
                            payoffs: payoffs.clone(),
                        },
                        false,
                    )
                }
                None => match &source.kind {
                    NodeKind::Decision { infoset } => {
                        let local = renumber[infoset];
                        sub.players[local.player].infosets[local.index]
                            .members
                            .push(id);
                        (NodeKind::Decision { infoset: local }, true)
                    }
                    kind => (kind.clone(), true),
                },
            };
            sub.nodes.push(Node {
                parent,
                children: Vec::new(),
                kind,
                marked: parent.is_none() || (descend && source.marked),
            });
            if let Some(p) = parent {
                sub.nodes[p].children.push(id);
            }
            if descend {
                stack.extend(source.children.iter().rev().map(|&c| (c, Some(id))));
            }
        }

        Ok(sub)
    }

    fn subtree_mask(&self, node: NodeId) -> Vec<bool> {
        let mut inside = vec![false; self.nodes.len()];
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            inside[n] = true;
            stack.extend(self.nodes[n].children.iter().copied());
        }
        inside
    }

    fn check_leaf(&self, node: NodeId) -> Result<(), EfgError> {
        let n = self.node(node)?;
        if !n.children.is_empty() {
            return Err(EfgError::NotALeaf(node));
        }
        Ok(())
    }

    fn grow(&mut self, node: NodeId, count: usize) -> Vec<NodeId> {
        let num_players = self.num_players();
        let start = self.nodes.len();
        for _ in 0..count {
            self.nodes.push(Node::leaf(Some(node), num_players));
        }
        let children: Vec<NodeId> = (start..start + count).collect();
        self.nodes[node].children = children.clone();
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Entrant chooses Out/In; after In the incumbent chooses Fight/Accommodate.
    fn entry_game() -> (Efg, NodeId) {
        let mut game = Efg::new(&["Entrant", "Incumbent"]);
        let enter = game.add_infoset(0, "enter?", &["Out", "In"]).unwrap();
        let respond = game.add_infoset(1, "respond", &["Fight", "Accommodate"]).unwrap();
        let root = game.root();
        let kids = game.set_decision(root, enter).unwrap();
        game.set_payoffs(kids[0], &[0.0, 2.0]).unwrap();
        let after_in = game.set_decision(kids[1], respond).unwrap();
        game.set_payoffs(after_in[0], &[-1.0, -1.0]).unwrap();
        game.set_payoffs(after_in[1], &[1.0, 1.0]).unwrap();
        (game, kids[1])
    }

    /// Player 1 moves without observing player 0's move.
    fn simultaneous_game() -> Efg {
        let mut game = Efg::new(&["Row", "Col"]);
        let row = game.add_infoset(0, "row", &["U", "D"]).unwrap();
        let col = game.add_infoset(1, "col", &["L", "R"]).unwrap();
        let kids = game.set_decision(game.root(), row).unwrap();
        for k in kids {
            game.set_decision(k, col).unwrap();
        }
        game
    }

    #[test]
    fn test_build_tree() {
        let (game, incumbent) = entry_game();
        assert_eq!(game.num_players(), 2);
        assert_eq!(game.num_nodes(), 5);
        assert_eq!(game.num_infosets(0), 1);
        assert_eq!(game.node(incumbent).unwrap().parent(), Some(0));
        assert_eq!(
            game.node(incumbent).unwrap().infoset(),
            Some(InfosetId::new(1, 0))
        );
        assert!(game.node(game.child(0, 0).unwrap()).unwrap().is_terminal());
        let ids: Vec<_> = game.infoset_ids().collect();
        assert_eq!(ids, vec![InfosetId::new(0, 0), InfosetId::new(1, 0)]);
    }

    #[test]
    fn test_builder_errors() {
        let mut game = Efg::new(&["A"]);
        assert_eq!(game.add_infoset(1, "x", &["a"]), Err(EfgError::UnknownPlayer(1)));
        assert!(matches!(game.add_infoset(0, "x", &[]), Err(EfgError::NoActions(_))));

        let iset = game.add_infoset(0, "x", &["a", "b"]).unwrap();
        game.set_decision(0, iset).unwrap();
        assert_eq!(game.set_decision(0, iset), Err(EfgError::NotALeaf(0)));
        assert_eq!(game.set_payoffs(0, &[1.0]), Err(EfgError::NotTerminal(0)));
        assert_eq!(
            game.set_payoffs(1, &[1.0, 2.0]),
            Err(EfgError::PayoffLength { expected: 1, found: 2 })
        );
        assert!(matches!(game.set_chance(1, &[0.5, 0.6]), Err(EfgError::InvalidChance(_))));
        assert!(matches!(game.set_chance(1, &[-0.5, 1.5]), Err(EfgError::InvalidChance(_))));
    }

    #[test]
    fn test_subgame_legality() {
        let (mut game, incumbent) = entry_game();
        assert!(game.is_legal_subgame_root(0));
        assert!(game.is_legal_subgame_root(incumbent));
        assert!(!game.is_legal_subgame_root(game.child(0, 0).unwrap()));

        let sim = simultaneous_game();
        assert!(!sim.is_legal_subgame_root(1));
        assert!(!sim.is_legal_subgame_root(2));

        assert_eq!(game.mark_subgame(1), Err(EfgError::IllegalSubgameRoot(1)));
        assert_eq!(game.unmark_subgame(0), Err(EfgError::UnmarkRoot));
    }

    #[test]
    fn test_marked_roots_post_order() {
        let (mut game, incumbent) = entry_game();
        assert_eq!(game.marked_subgame_roots(), vec![0]);
        assert_eq!(game.subgame_root(incumbent), 0);

        game.mark_all_subgames();
        assert_eq!(game.marked_subgame_roots(), vec![incumbent, 0]);
        assert_eq!(game.subgame_root(incumbent), incumbent);
        assert_eq!(game.subgame_root(game.child(incumbent, 1).unwrap()), incumbent);
        assert_eq!(game.subgame_root(game.child(0, 0).unwrap()), 0);

        game.unmark_all_subgames();
        assert_eq!(game.marked_subgame_roots(), vec![0]);
    }

    #[test]
    fn test_extract_subgame() {
        let (mut game, incumbent) = entry_game();
        game.mark_all_subgames();

        let sub = game.subgame(incumbent, &FxHashMap::default()).unwrap();
        assert_eq!(sub.num_players(), 2);
        assert_eq!(sub.num_nodes(), 3);
        assert_eq!(sub.num_infosets(0), 0);
        assert_eq!(sub.num_infosets(1), 1);
        assert_eq!(sub.infoset(InfosetId::new(1, 0)).unwrap().members(), &[0]);
        assert_eq!(
            sub.node(2).unwrap().kind(),
            &NodeKind::Terminal { payoffs: vec![1.0, 1.0] }
        );
        assert!(sub.is_marked(0));
    }

    #[test]
    fn test_extract_with_collapsed_subgame() {
        let (mut game, incumbent) = entry_game();
        game.mark_all_subgames();

        let mut collapsed = FxHashMap::default();
        collapsed.insert(incumbent, vec![1.0, 1.0]);
        let top = game.subgame(0, &collapsed).unwrap();
        assert_eq!(top.num_nodes(), 3);
        assert_eq!(top.num_infosets(0), 1);
        assert_eq!(top.num_infosets(1), 0);
        assert_eq!(
            top.node(2).unwrap().kind(),
            &NodeKind::Terminal { payoffs: vec![1.0, 1.0] }
        );

        collapsed.insert(incumbent, vec![1.0]);
        assert!(matches!(
            game.subgame(0, &collapsed),
            Err(EfgError::PayoffLength { .. })
        ));
    }

    #[test]
    fn test_extract_terminal_root() {
        let mut game = Efg::new(&["A"]);
        game.set_payoffs(0, &[4.0]).unwrap();
        assert!(!game.is_legal_subgame_root(0));
        assert_eq!(game.marked_subgame_roots(), vec![0]);

        let copy = game.subgame(game.root(), &FxHashMap::default()).unwrap();
        assert_eq!(copy.num_nodes(), 1);
        assert_eq!(
            copy.node(0).unwrap().kind(),
            &NodeKind::Terminal { payoffs: vec![4.0] }
        );
    }

    #[test]
    fn test_subgame_keeps_infoset_order() {
        let mut game = Efg::new(&["P"]);
        let a = game.add_infoset(0, "a", &["x", "y"]).unwrap();
        let b = game.add_infoset(0, "b", &["x", "y"]).unwrap();
        let c = game.add_infoset(0, "c", &["x", "y"]).unwrap();
        let root = game.add_infoset(0, "root", &["l", "r"]).unwrap();
        let kids = game.set_decision(0, root).unwrap();
        // `b` sits above `a` in the tree; the copy still lists `a` first.
        let left = game.set_decision(kids[0], b).unwrap();
        game.set_decision(left[0], a).unwrap();
        game.set_decision(kids[1], c).unwrap();

        let sub = game.subgame(kids[0], &FxHashMap::default()).unwrap();
        let labels: Vec<_> = sub
            .infoset_ids()
            .map(|id| sub.infoset(id).unwrap().label().to_string())
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }
}
