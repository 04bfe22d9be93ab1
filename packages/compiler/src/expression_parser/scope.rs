//! Scope exclusion
//!
//! Decides whether an identifier occurrence is a binding position or a
//! shadowed name that classification must leave alone. The classifier
//! keeps an [`AncestorChain`] while it walks the tree: one [`Ancestor`]
//! per enclosing node, each recording which child slot the walk descended
//! through. Exclusion checks compare slot roles instead of node identity.

use smallvec::SmallVec;

/// Parameter names bound by a function node
pub type ParamNames = SmallVec<[String; 4]>;

/// Enclosing node, as far as scope exclusion is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Arrow function, function expression or function declaration
    Function(ParamNames),
    /// `object.property` / `object[property]`
    Member,
    /// Node with an assignable `left` slot: assignment expressions and
    /// default-valued parameters
    Assignment,
    Other,
}

/// Child slot of the enclosing node that leads towards the identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Param,
    Body,
    Object,
    Property,
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub kind: NodeKind,
    pub slot: Slot,
}

/// Path of enclosing nodes from the tree root down to the node being
/// visited
#[derive(Debug, Clone, Default)]
pub struct AncestorChain {
    frames: SmallVec<[Ancestor; 16]>,
}

impl AncestorChain {
    pub fn new() -> Self {
        AncestorChain::default()
    }

    pub fn push(&mut self, kind: NodeKind) {
        self.frames.push(Ancestor {
            kind,
            slot: Slot::Other,
        });
    }

    pub fn pop(&mut self) -> Option<Ancestor> {
        self.frames.pop()
    }

    /// Record the slot the walk is about to descend through
    pub fn set_slot(&mut self, slot: Slot) {
        if let Some(frame) = self.frames.last_mut() {
            frame.slot = slot;
        }
    }

    pub fn parent(&self) -> Option<&Ancestor> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ancestor> {
        self.frames.iter()
    }
}

/// Whether the identifier `name`, reached through `chain`, must keep its
/// original name and stay unclassified.
///
/// The first three checks look at the immediate parent only: a parameter
/// of the nearest function, the property operand of a member access, the
/// left operand of an assignment. The last one scans every enclosing
/// function for a parameter with the same name, which shields uses of a
/// parameter anywhere inside the function body.
pub fn is_excluded(name: &str, chain: &AncestorChain) -> bool {
    let Some(parent) = chain.parent() else {
        return false;
    };

    let slot_excluded = matches!(
        (&parent.kind, parent.slot),
        (NodeKind::Function(_), Slot::Param)
            | (NodeKind::Member, Slot::Property)
            | (NodeKind::Assignment, Slot::Left)
    );
    if slot_excluded {
        return true;
    }

    chain.iter().any(|ancestor| match &ancestor.kind {
        NodeKind::Function(params) => params.iter().any(|param| param == name),
        _ => false,
    })
}
