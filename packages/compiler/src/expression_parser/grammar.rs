//! Expression grammar configuration
//!
//! The base grammar is the JavaScript expression subset understood by the
//! parser. Extensions are composed on top of it with [`Grammar::extend`],
//! producing a new immutable configuration that the lexer consults when it
//! decides how a character starts a token.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::chars;

bitflags! {
    /// Set of sigil prefixes a grammar accepts in front of identifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sigils: u8 {
        const STATE = 1 << 0;
        const VARIABLE = 1 << 1;
        const STORE = 1 << 2;
    }
}

/// Binding context an identifier resolves against in the template compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingContext {
    Property,
    State,
    Variable,
    Store,
    Helper,
}

impl BindingContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingContext::Property => "property",
            BindingContext::State => "state",
            BindingContext::Variable => "variable",
            BindingContext::Store => "store",
            BindingContext::Helper => "helper",
        }
    }

    /// Sigil that marks this context in source text, if any
    pub fn sigil(&self) -> Option<Sigil> {
        match self {
            BindingContext::State => Some(Sigil::State),
            BindingContext::Variable => Some(Sigil::Variable),
            BindingContext::Store => Some(Sigil::Store),
            BindingContext::Property | BindingContext::Helper => None,
        }
    }
}

impl std::fmt::Display for BindingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier prefix character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `#name`: component state
    State,
    /// `@name`: loop or scope variable
    Variable,
    /// `$name`: external data store
    Store,
}

impl Sigil {
    pub fn from_char(ch: char) -> Option<Sigil> {
        match ch {
            chars::HASH => Some(Sigil::State),
            chars::AT => Some(Sigil::Variable),
            chars::DOLLAR => Some(Sigil::Store),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Sigil::State => chars::HASH,
            Sigil::Variable => chars::AT,
            Sigil::Store => chars::DOLLAR,
        }
    }

    pub fn context(&self) -> BindingContext {
        match self {
            Sigil::State => BindingContext::State,
            Sigil::Variable => BindingContext::Variable,
            Sigil::Store => BindingContext::Store,
        }
    }

    fn flag(&self) -> Sigils {
        match self {
            Sigil::State => Sigils::STATE,
            Sigil::Variable => Sigils::VARIABLE,
            Sigil::Store => Sigils::STORE,
        }
    }
}

/// Token-recognition rule layered on top of the base grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarExtension {
    /// Accept `<sigil><identifier>` as a single identifier token whose name
    /// keeps the sigil.
    SigilIdentifiers(Sigils),
}

/// Immutable lexer/parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    sigils: Sigils,
}

impl Grammar {
    /// Plain JavaScript expression grammar
    pub const fn base() -> Self {
        Grammar {
            sigils: Sigils::empty(),
        }
    }

    /// Base grammar with every sigil accepted in identifier position
    pub fn template() -> Self {
        Grammar::base().extend(GrammarExtension::SigilIdentifiers(Sigils::all()))
    }

    /// New grammar with `extension` composed on top of `self`
    pub fn extend(self, extension: GrammarExtension) -> Self {
        match extension {
            GrammarExtension::SigilIdentifiers(sigils) => Grammar {
                sigils: self.sigils | sigils,
            },
        }
    }

    pub fn sigils(&self) -> Sigils {
        self.sigils
    }

    /// Sigil accepted at the start of an identifier token
    pub fn sigil_prefix(&self, ch: char) -> Option<Sigil> {
        Sigil::from_char(ch).filter(|sigil| self.sigils.contains(sigil.flag()))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::template()
    }
}

/// Split a lexical identifier name into its sigil and bare name
pub fn split_sigil(name: &str) -> (Option<Sigil>, &str) {
    match name.chars().next().and_then(Sigil::from_char) {
        Some(sigil) => (Some(sigil), &name[sigil.as_char().len_utf8()..]),
        None => (None, name),
    }
}
