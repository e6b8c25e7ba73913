//! Public AST types for scanned translation strings.

/// A scanned string: literal runs and pattern blocks in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over the pattern blocks only.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Literal(_) => None,
        })
    }

    /// True if the string contains no pattern blocks.
    pub fn is_literal(&self) -> bool {
        self.blocks().next().is_none()
    }
}

/// A segment within a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, escapes already applied.
    Literal(String),
    /// A pattern block to resolve.
    Block(Block),
}

/// One `@kind{...}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Kind names from the header: empty for `@{...}`, one for `@gender{...}`,
    /// several for `@gender+tense{...}`.
    pub kind_path: Vec<String>,
    /// Alternatives in source order.
    pub alternatives: Vec<Alternative>,
    /// The block as written, used in error messages.
    pub source: String,
}

impl Block {
    /// True for blocks addressing two or more kinds.
    pub fn is_complex(&self) -> bool {
        self.kind_path.len() > 1
    }

    /// The first free-text alternative, if any.
    pub fn free_text(&self) -> Option<&AltText> {
        self.alternatives
            .iter()
            .find(|alt| alt.is_free_text())
            .map(|alt| &alt.text)
    }

    /// True if any token spec in the block is `*`.
    pub fn has_wildcard(&self) -> bool {
        self.alternatives
            .iter()
            .flat_map(|alt| alt.groups.iter().flatten())
            .any(|spec| *spec == TokenSpec::Wildcard)
    }
}

/// A single `tokens:text` alternative, or free text when `groups` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    /// One group per kind-path position. Simple patterns always have one.
    pub groups: Vec<Vec<TokenSpec>>,
    pub text: AltText,
}

impl Alternative {
    pub fn is_free_text(&self) -> bool {
        self.groups.is_empty()
    }

    /// Check the group layout against the block's arity.
    ///
    /// Every group must be non-empty and there must be exactly one group per
    /// kind in the path.
    pub fn is_well_formed(&self, arity: usize) -> bool {
        self.groups.len() == arity.max(1) && self.groups.iter().all(|g| !g.is_empty())
    }
}

/// The text an alternative produces when it wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltText {
    /// Literal output.
    Plain(String),
    /// `~`: replaced by the matched token's description.
    Loud,
}

/// One token reference inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSpec {
    /// A token or alias name.
    Name(String),
    /// `!name`: matches any value other than `name`.
    Negated(String),
    /// `*`: matches any resolved value.
    Wildcard,
    /// Text that cannot name a token (reserved characters, empty, ...).
    Invalid(String),
}
