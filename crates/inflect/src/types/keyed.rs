use crate::data::names::ALIAS_MARKER;
use crate::parser::{Alternative, Block, Segment, Template, parse_spec, parse_text};

const KIND_KEY: &str = "@kind";
const FREE_KEY: &str = "@free";
const PREFIX_KEY: &str = "@prefix";
const SUFFIX_KEY: &str = "@suffix";

/// An inflection written as a map instead of an inline pattern.
///
/// `{"m": "Sir", "f": "Lady", "@free": "You", "@prefix": "Dear ", "@suffix": "!"}`
/// resolves like `Dear @{m:Sir|f:Lady|You}!`. Token keys may list several
/// specs separated by commas, and `@kind` names the kind instead of inferring
/// it.
///
/// Entries keep their source order, which is the order alternatives are
/// tried in.
///
/// # Example
///
/// ```
/// use inflect::KeyedInflection;
///
/// let keyed = KeyedInflection::from_pairs([
///     ("n", "You"),
///     ("*", "Any"),
///     ("@prefix", "Dear "),
/// ]);
/// assert_eq!(keyed.prefix, "Dear ");
/// assert_eq!(keyed.to_block().source, "@{n:You|*:Any}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedInflection {
    pub kind: Option<String>,
    /// Token spec lists and their texts, in source order.
    pub tokens: Vec<(String, String)>,
    pub free: Option<String>,
    pub prefix: String,
    pub suffix: String,
}

impl KeyedInflection {
    /// Split ordered entries into token texts and `@`-prefixed directives.
    ///
    /// Unrecognized `@` keys are ignored. A repeated token key replaces the
    /// earlier text in place.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut keyed = Self::default();
        for (key, text) in pairs {
            let (key, text) = (key.into(), text.into());
            match key.as_str() {
                KIND_KEY => keyed.kind = Some(text),
                FREE_KEY => keyed.free = Some(text),
                PREFIX_KEY => keyed.prefix = text,
                SUFFIX_KEY => keyed.suffix = text,
                _ if key.starts_with(ALIAS_MARKER) => {}
                _ => match keyed.tokens.iter_mut().find(|(specs, _)| *specs == key) {
                    Some((_, existing)) => *existing = text,
                    None => keyed.tokens.push((key, text)),
                },
            }
        }
        keyed
    }

    /// The equivalent pattern block. Typed alternatives come in source order,
    /// followed by the free text.
    pub fn to_block(&self) -> Block {
        let mut alternatives: Vec<Alternative> = self
            .tokens
            .iter()
            .map(|(specs, text)| Alternative {
                groups: vec![specs.split(',').map(parse_spec).collect()],
                text: parse_text(text),
            })
            .collect();
        if let Some(free) = &self.free {
            alternatives.push(Alternative {
                groups: Vec::new(),
                text: parse_text(free),
            });
        }

        let body: Vec<String> = self
            .tokens
            .iter()
            .map(|(specs, text)| format!("{specs}:{text}"))
            .chain(self.free.clone())
            .collect();
        Block {
            kind_path: self.kind.iter().cloned().collect(),
            alternatives,
            source: format!(
                "{ALIAS_MARKER}{}{{{}}}",
                self.kind.as_deref().unwrap_or_default(),
                body.join("|")
            ),
        }
    }

    /// The block surrounded by the prefix and suffix.
    pub fn to_template(&self) -> Template {
        let mut segments = Vec::with_capacity(3);
        if !self.prefix.is_empty() {
            segments.push(Segment::Literal(self.prefix.clone()));
        }
        segments.push(Segment::Block(self.to_block()));
        if !self.suffix.is_empty() {
            segments.push(Segment::Literal(self.suffix.clone()));
        }
        Template { segments }
    }
}
