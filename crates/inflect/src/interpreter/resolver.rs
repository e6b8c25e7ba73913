//! Block resolution: choosing the winning alternative of each pattern block.
//!
//! A simple block is resolved as a complex block with a single kind, so both
//! share one path:
//! 1. find the kind table for every position (named, or inferred for `@{...}`)
//! 2. compile every typed alternative into token groups, checking each spec
//! 3. resolve the caller's value for every position
//! 4. pick the first alternative whose groups all match, else the free text

use tracing::trace;

use crate::data::names::{DEFAULT_KEY, is_valid_option_value};
use crate::data::{InflectionData, KindTable};
use crate::interpreter::context::Lookup;
use crate::interpreter::{InflectionError, ResolveContext, compute_suggestions};
use crate::parser::ast::{AltText, Block, Segment, Template, TokenSpec};

/// Resolve every block of a scanned string and join the result with its
/// literal text.
///
/// # Errors
///
/// Returns the first resolution error when the context's `raises` switch is
/// on. Otherwise never fails.
pub fn resolve_template(
    template: &Template,
    ctx: &mut ResolveContext<'_>,
) -> Result<String, InflectionError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Block(block) => output.push_str(&resolve_block(block, ctx)?),
        }
    }
    Ok(output)
}

/// Resolve a single block to its winning text.
pub fn resolve_block(
    block: &Block,
    ctx: &mut ResolveContext<'_>,
) -> Result<String, InflectionError> {
    let Some(data) = ctx.data() else {
        return Ok(String::new());
    };
    let Some(axes) = resolve_axes(block, data, ctx)? else {
        return Ok(render(block.free_text(), None));
    };
    let Some(rows) = compile_alternatives(block, &axes, data, ctx)? else {
        return Ok(render(block.free_text(), None));
    };

    let mut values = Vec::with_capacity(axes.len());
    for (position, axis) in axes.iter().enumerate() {
        values.push(resolve_value(block, axis, position, &rows, ctx)?);
    }

    let winner = rows.iter().find(|row| row.matches(&values));
    let text = winner.map(|row| row.text).or_else(|| block.free_text());
    let description = axes
        .first()
        .zip(values.first())
        .and_then(|(axis, value)| axis.table.description(value.as_deref()?));

    trace!(
        block = %block.source,
        kinds = ?axes.iter().map(|axis| axis.kind.as_str()).collect::<Vec<_>>(),
        values = ?values,
        matched = winner.is_some(),
        "resolved inflection block"
    );

    Ok(render(text, description))
}

fn render(text: Option<&AltText>, description: Option<&str>) -> String {
    match text {
        Some(AltText::Plain(text)) => text.clone(),
        Some(AltText::Loud) => description.unwrap_or_default().to_string(),
        None => String::new(),
    }
}

// =========================================================================
// Kinds
// =========================================================================

/// One position of a block's kind path.
struct Axis<'d> {
    kind: String,
    table: &'d KindTable,
}

fn resolve_axes<'d>(
    block: &Block,
    data: &'d InflectionData,
    ctx: &mut ResolveContext<'_>,
) -> Result<Option<Vec<Axis<'d>>>, InflectionError> {
    if block.kind_path.is_empty() {
        return Ok(infer_axis(block, data, ctx)?.map(|axis| vec![axis]));
    }

    let mut axes = Vec::with_capacity(block.kind_path.len());
    for kind in &block.kind_path {
        let Some(table) = data.named_kind(kind) else {
            ctx.report(InflectionError::InvalidInflectionKind {
                pattern: block.source.clone(),
                kind: kind.clone(),
                suggestions: compute_suggestions(kind, &known_kinds(data)),
            })?;
            return Ok(None);
        };
        axes.push(Axis {
            kind: kind.clone(),
            table,
        });
    }
    Ok(Some(axes))
}

/// Infer the kind of an unnamed block.
///
/// Tries the first spec naming a loose token, then the first loose kind whose
/// option value is one of its tokens.
fn infer_axis<'d>(
    block: &Block,
    data: &'d InflectionData,
    ctx: &mut ResolveContext<'_>,
) -> Result<Option<Axis<'d>>, InflectionError> {
    let loose = data.loose();
    let from_specs = block
        .alternatives
        .iter()
        .flat_map(|alt| alt.groups.iter().flatten())
        .find_map(|spec| match spec {
            TokenSpec::Name(name) | TokenSpec::Negated(name) => loose.kind_of(name, None),
            TokenSpec::Wildcard | TokenSpec::Invalid(_) => None,
        });
    let kind = match from_specs {
        Some(kind) => Some(kind),
        None => loose.kinds().into_iter().find(|kind| match ctx.option_for(kind) {
            Lookup::Token(value) => loose.has_token(&value, Some(*kind)),
            Lookup::Missing | Lookup::Nil => false,
        }),
    };

    if let Some((kind, table)) = kind.and_then(|kind| Some((kind, loose.table(kind)?))) {
        return Ok(Some(Axis {
            kind: kind.to_string(),
            table,
        }));
    }
    ctx.report(InflectionError::InvalidInflectionKind {
        pattern: block.source.clone(),
        kind: String::new(),
        suggestions: Vec::new(),
    })?;
    Ok(None)
}

fn known_kinds(data: &InflectionData) -> Vec<String> {
    let mut kinds: Vec<String> = data
        .strict()
        .kinds()
        .into_iter()
        .chain(data.loose().kinds())
        .map(ToString::to_string)
        .collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

// =========================================================================
// Alternatives
// =========================================================================

/// Compiled specs of one alternative at one position.
#[derive(Debug, Default)]
struct Group {
    wildcard: bool,
    positives: Vec<String>,
    negatives: Vec<String>,
}

impl Group {
    fn matches(&self, value: &str) -> bool {
        self.wildcard
            || self.positives.iter().any(|token| token == value)
            || (!self.negatives.is_empty() && self.negatives.iter().all(|token| token != value))
    }
}

/// A typed alternative with its groups compiled.
struct Row<'b> {
    groups: Vec<Group>,
    text: &'b AltText,
}

impl Row<'_> {
    /// Every position has a value its group accepts.
    fn matches(&self, values: &[Option<String>]) -> bool {
        self.groups
            .iter()
            .zip(values)
            .all(|(group, value)| value.as_deref().is_some_and(|value| group.matches(value)))
    }

    /// The alternative names `token` positively at `position`.
    fn mentions(&self, position: usize, token: &str) -> bool {
        self.groups
            .get(position)
            .is_some_and(|group| group.positives.iter().any(|p| p == token))
    }
}

/// Compile the typed alternatives of a block.
///
/// Returns `None` when a complex block is malformed; the whole block then
/// falls back to its free text. A malformed alternative of a simple block is
/// only skipped.
fn compile_alternatives<'b>(
    block: &'b Block,
    axes: &[Axis<'_>],
    data: &InflectionData,
    ctx: &mut ResolveContext<'_>,
) -> Result<Option<Vec<Row<'b>>>, InflectionError> {
    let typed = block.alternatives.iter().filter(|alt| !alt.is_free_text());

    if block.is_complex() && typed.clone().any(|alt| !alt.is_well_formed(axes.len())) {
        ctx.report(InflectionError::ComplexPatternMalformed {
            pattern: block.source.clone(),
        })?;
        return Ok(None);
    }

    let mut rows = Vec::new();
    for alt in typed {
        if !alt.is_well_formed(axes.len()) {
            ctx.report(invalid_token(block, "", axes.first()))?;
            continue;
        }
        let mut groups = Vec::with_capacity(axes.len());
        for (specs, axis) in alt.groups.iter().zip(axes) {
            groups.push(compile_group(specs, axis, block, data, ctx)?);
        }
        rows.push(Row {
            groups,
            text: &alt.text,
        });
    }
    Ok(Some(rows))
}

fn compile_group(
    specs: &[TokenSpec],
    axis: &Axis<'_>,
    block: &Block,
    data: &InflectionData,
    ctx: &mut ResolveContext<'_>,
) -> Result<Group, InflectionError> {
    let aliased = ctx.options().aliased_patterns;
    let mut group = Group::default();

    for spec in specs {
        let (name, negated) = match spec {
            TokenSpec::Wildcard => {
                group.wildcard = true;
                continue;
            }
            TokenSpec::Invalid(raw) => {
                ctx.report(invalid_token(block, raw, Some(axis)))?;
                continue;
            }
            TokenSpec::Name(name) => (name.as_str(), false),
            TokenSpec::Negated(name) => (name.as_str(), true),
        };

        // Alias specs only resolve when enabled; otherwise they keep their
        // own name, which no resolved value ever equals.
        let token = if aliased {
            axis.table.true_token(name)
        } else {
            axis.table.has_token(name).then_some(name)
        };
        let Some(token) = token else {
            let error = if is_token_elsewhere(name, data) {
                InflectionError::MisplacedInflectionToken {
                    pattern: block.source.clone(),
                    token: name.to_string(),
                    kind: axis.kind.clone(),
                }
            } else {
                invalid_token(block, name, Some(axis))
            };
            ctx.report(error)?;
            continue;
        };

        if negated {
            group.negatives.push(token.to_string());
        } else {
            group.positives.push(token.to_string());
        }
    }
    Ok(group)
}

/// True if some other kind, loose or strict, defines `name`.
fn is_token_elsewhere(name: &str, data: &InflectionData) -> bool {
    let strict = data.strict();
    data.loose().has_token(name, None)
        || strict
            .kinds()
            .into_iter()
            .any(|kind| strict.has_token(name, Some(kind)))
}

fn invalid_token(block: &Block, token: &str, axis: Option<&Axis<'_>>) -> InflectionError {
    InflectionError::InvalidInflectionToken {
        pattern: block.source.clone(),
        token: token.to_string(),
        kind: axis.map(|axis| axis.kind.clone()),
    }
}

// =========================================================================
// Values
// =========================================================================

/// Resolve the caller's value for one position to a true token.
///
/// `None` means no typed alternative can match at this position.
fn resolve_value(
    block: &Block,
    axis: &Axis<'_>,
    position: usize,
    rows: &[Row<'_>],
    ctx: &mut ResolveContext<'_>,
) -> Result<Option<String>, InflectionError> {
    let options = ctx.options();
    let default = axis.table.default_token().map(ToString::to_string);
    let unknown = || if options.unknown_defaults { default.clone() } else { None };

    let token = match ctx.option_for(&axis.kind) {
        Lookup::Missing if options.excluded_defaults => return Ok(None),
        Lookup::Missing => {
            if default.is_none() {
                ctx.report(option_not_found(block, axis))?;
            }
            return Ok(default);
        }
        Lookup::Nil => {
            ctx.report(invalid_option(block, axis, None))?;
            return Ok(unknown());
        }
        Lookup::Token(value) if value == DEFAULT_KEY => {
            if default.is_none() {
                ctx.report(option_not_found(block, axis))?;
            }
            return Ok(default);
        }
        Lookup::Token(value) => match axis.table.true_token(&value) {
            Some(token) => token.to_string(),
            None => {
                if !is_valid_option_value(&value) || !block.has_wildcard() {
                    ctx.report(invalid_option(block, axis, Some(value)))?;
                }
                return Ok(unknown());
            }
        },
    };

    if options.excluded_defaults && !rows.iter().any(|row| row.mentions(position, &token)) {
        return Ok(default.or(Some(token)));
    }
    Ok(Some(token))
}

fn option_not_found(block: &Block, axis: &Axis<'_>) -> InflectionError {
    InflectionError::InflectionOptionNotFound {
        pattern: block.source.clone(),
        kind: axis.kind.clone(),
    }
}

fn invalid_option(block: &Block, axis: &Axis<'_>, value: Option<String>) -> InflectionError {
    InflectionError::InvalidInflectionOption {
        pattern: block.source.clone(),
        kind: axis.kind.clone(),
        value,
    }
}
