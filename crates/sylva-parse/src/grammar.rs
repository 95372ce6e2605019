use rustc_hash::FxHashSet;
use sylva_errors::ErrorCode;
use sylva_tokenizer::Symbol;
use sylva_yellow::SyntaxKind::*;
use sylva_yellow::green::{
    GreenBackground, GreenBackgroundList, GreenKeyValue, GreenList, GreenMap, GreenMultiValue,
    GreenUndefinedValue, GreenValue, GreenValueWithBackground,
};
use sylva_yellow::{SyntaxSet, TextLength as _};
use text_size::TextRange;
use triomphe::Arc;

use crate::parser::Parser;

/// Symbols that end a slot inside a container.
const SLOT_END: SyntaxSet =
    SyntaxSet::new([COMMA, COLON, CURLY_CLOSE, SQUARE_BRACKET_CLOSE, EOF]);

/// The root slot. A root without any value holds a silent `MissingValue`.
pub(crate) fn root(p: &mut Parser<'_>) -> Arc<GreenMultiValue> {
    multi_value(p, true)
}

fn is_missing(slot: &GreenMultiValue) -> bool {
    slot.value_node().content().is_missing()
}

/// Background up to the next significant symbol. At the root, stray
/// delimiters are background too.
fn background(p: &mut Parser<'_>, root_level: bool) -> GreenBackgroundList {
    let mut pieces = Vec::new();
    loop {
        match &p.peek().symbol {
            Symbol::Background(background) => {
                pieces.push(*background);
                p.bump();
            }
            Symbol::Punctuation(punctuation) if root_level => {
                let Some(delimiter) = punctuation.as_value_delimiter() else { break };
                let token = p.bump();
                p.error(ErrorCode::ExpectedEndOfInput, token.range);
                pieces.push(GreenBackground::RootLevelValueDelimiter(delimiter));
            }
            _ => break,
        }
    }
    GreenBackgroundList::new(pieces)
}

/// One slot: the effective value, extra values that follow it without a
/// separator, and trailing background.
fn multi_value(p: &mut Parser<'_>, root_level: bool) -> Arc<GreenMultiValue> {
    let mut value_nodes = Vec::new();
    let mut before = background(p, root_level);

    while p.peek_kind().is_value_start() {
        let start = p.offset();
        let value = value(p);
        if !value_nodes.is_empty() {
            p.error(ErrorCode::ExtraValue, TextRange::at(start, value.text_len()));
        }
        value_nodes.push(Arc::new(GreenValueWithBackground::new(before, value)));
        before = background(p, root_level);
    }
    debug_assert!(root_level || SLOT_END.contains(p.peek_kind()), "{:?}", p.peek_kind());

    if value_nodes.is_empty() {
        value_nodes.push(Arc::new(GreenValueWithBackground::new(before, GreenValue::MissingValue)));
        before = GreenBackgroundList::empty();
    }
    Arc::new(GreenMultiValue::new(value_nodes, before))
}

fn value(p: &mut Parser<'_>) -> GreenValue {
    match p.peek_kind() {
        CURLY_OPEN => map(p),
        SQUARE_BRACKET_OPEN => list(p),
        _ => match p.bump().symbol {
            Symbol::Value(value) => value,
            other => unreachable!("{:?} cannot start a value", other.kind()),
        },
    }
}

fn list(p: &mut Parser<'_>) -> GreenValue {
    let Some(nesting) = p.enter() else {
        return too_deep(p);
    };
    p.bump();

    let mut items = Vec::new();
    let missing_close = loop {
        let item = multi_value(p, false);
        let missing = is_missing(&item);
        items.push(item);

        match p.peek_kind() {
            COMMA => {
                if missing {
                    p.error_at_next(ErrorCode::MissingValue);
                }
                p.bump();
            }
            SQUARE_BRACKET_CLOSE => {
                p.bump();
                break false;
            }
            _ => {
                p.error_at_next(ErrorCode::MissingClosingBracket);
                break true;
            }
        }
    };

    nesting.exit(p);
    GreenValue::List(Arc::new(GreenList::new(items, missing_close)))
}

fn map(p: &mut Parser<'_>) -> GreenValue {
    let Some(nesting) = p.enter() else {
        return too_deep(p);
    };
    p.bump();

    let mut keys = FxHashSet::default();
    let mut pairs = Vec::new();
    let missing_close = loop {
        let pair = key_value(p, &mut keys);
        let empty = pair.value_section_nodes().len() == 1 && is_missing(pair.key_node());
        pairs.push(Arc::new(pair));

        match p.peek_kind() {
            COMMA => {
                if empty {
                    p.error_at_next(ErrorCode::MissingPropertyKey);
                }
                p.bump();
            }
            CURLY_CLOSE => {
                p.bump();
                break false;
            }
            _ => {
                p.error_at_next(ErrorCode::MissingClosingBracket);
                break true;
            }
        }
    };

    nesting.exit(p);
    GreenValue::Map(Arc::new(GreenMap::new(pairs, missing_close)))
}

fn key_value(p: &mut Parser<'_>, keys: &mut FxHashSet<Box<str>>) -> GreenKeyValue {
    let key_start = p.offset();
    let key = multi_value(p, false);
    let key_end = p.offset();
    let key_range = TextRange::at(
        key_start + key.value_node().background_before().text_len(),
        key.value_node().content().text_len(),
    );

    let valid_key = match key.value_node().content() {
        GreenValue::StringLiteral(literal) => {
            if keys.insert(literal.value().into()) {
                Some(literal.clone())
            } else {
                p.error(ErrorCode::DuplicatePropertyKey, key_range);
                None
            }
        }
        GreenValue::Map(_)
        | GreenValue::List(_)
        | GreenValue::IntegerLiteral(_)
        | GreenValue::BooleanLiteral(_) => {
            p.error(ErrorCode::InvalidPropertyKey, key_range);
            None
        }
        GreenValue::MissingValue
        | GreenValue::UndefinedValue(_)
        | GreenValue::UnknownSymbol(_)
        | GreenValue::ErrorString(_) => None,
    };

    let key_missing = is_missing(&key);
    let mut sections = vec![key];
    while p.at(COLON) {
        let colon = p.bump();
        match sections.len() {
            1 if key_missing => p.error(ErrorCode::MissingPropertyKey, colon.range),
            1 => {}
            _ => p.error(ErrorCode::ExtraValueSection, colon.range),
        }

        let section = multi_value(p, false);
        if sections.len() == 1 && is_missing(&section) {
            p.error_at_next(ErrorCode::MissingValue);
        }
        sections.push(section);
    }

    if sections.len() == 1 && !key_missing {
        p.error(ErrorCode::MissingSeparator, TextRange::empty(key_end));
    }

    GreenKeyValue::new(valid_key, sections)
}

/// Consumes a bracketed region without descending into it.
fn too_deep(p: &mut Parser<'_>) -> GreenValue {
    let open = p.skip();
    debug_assert!(matches!(open.kind(), CURLY_OPEN | SQUARE_BRACKET_OPEN));
    p.error(ErrorCode::NestingTooDeep, open.range);
    tracing::trace!(depth = p.depth(), offset = u32::from(open.range.start()), "nesting too deep");

    let mut balance = 1usize;
    let mut end = open.range.end();
    while balance > 0 && !p.at(EOF) {
        match p.peek_kind() {
            CURLY_OPEN | SQUARE_BRACKET_OPEN => balance += 1,
            CURLY_CLOSE | SQUARE_BRACKET_CLOSE => balance -= 1,
            _ => {}
        }
        end = p.skip().range.end();
    }

    GreenValue::UndefinedValue(GreenUndefinedValue::new(end - open.range.start()))
}
