//! String generation from a regular expression.
//!
//! The pattern is parsed into the regex AST and walked directly, so
//! negated classes can be complemented against the printable-ASCII
//! alphabet instead of the full unicode space. Constructs without a
//! sensible generation story (`\p{..}`, class set operations, inline
//! flags) fail loudly with an unsupported-pattern error.

use regex_syntax::ast::{
    self, Ast, ClassAscii, ClassAsciiKind, ClassBracketed, ClassPerl, ClassPerlKind, ClassSet,
    ClassSetItem, GroupKind, RepetitionKind, RepetitionRange,
};

use crate::consts::MAX_REPEAT;
use crate::errors::GenerationError;
use crate::random::RandomSource;

const DIGITS: &str = "0123456789";
const WORD: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

fn printable() -> impl Iterator<Item = char> {
    (0x20u8..=0x7e).map(char::from)
}

fn unsupported(detail: impl Into<String>) -> GenerationError {
    GenerationError::UnsupportedPattern {
        detail: detail.into(),
    }
}

pub struct RegexGenerator {
    ast: Ast,
}

impl RegexGenerator {
    pub fn new(pattern: &str) -> Result<Self, GenerationError> {
        let ast = ast::parse::Parser::new()
            .parse(pattern)
            .map_err(|err| GenerationError::InvalidPattern {
                detail: err.to_string(),
            })?;
        Ok(Self { ast })
    }

    pub fn generate(&self, random: &mut RandomSource) -> Result<String, GenerationError> {
        let mut out = String::new();
        generate_ast(&self.ast, random, &mut out)?;
        Ok(out)
    }
}

fn generate_ast(
    ast: &Ast,
    random: &mut RandomSource,
    out: &mut String,
) -> Result<(), GenerationError> {
    match ast {
        Ast::Empty(_) => Ok(()),
        Ast::Flags(_) => Err(unsupported("inline flags")),
        Ast::Literal(literal) => {
            out.push(literal.c);
            Ok(())
        }
        Ast::Dot(_) => {
            let pool: Vec<char> = printable().collect();
            out.push(pool[random.index(pool.len())]);
            Ok(())
        }
        Ast::Assertion(_) => Ok(()),
        Ast::ClassUnicode(class) => Err(unsupported(format!(
            "unicode class `\\p{{{:?}}}`",
            class.kind
        ))),
        Ast::ClassPerl(class) => {
            out.push(generate_perl(class, random)?);
            Ok(())
        }
        Ast::ClassBracketed(class) => {
            out.push(generate_bracketed(class, random)?);
            Ok(())
        }
        Ast::Repetition(rep) => {
            let (min, max) = match rep.op.kind {
                RepetitionKind::ZeroOrOne => (0, 1),
                RepetitionKind::ZeroOrMore => (0, MAX_REPEAT),
                RepetitionKind::OneOrMore => (1, MAX_REPEAT.max(1)),
                RepetitionKind::Range(RepetitionRange::Exactly(n)) => (n, n),
                RepetitionKind::Range(RepetitionRange::AtLeast(n)) => (n, MAX_REPEAT.max(n)),
                RepetitionKind::Range(RepetitionRange::Bounded(a, b)) => (a, b),
            };
            let count = random.usize_in(min as usize, max as usize);
            for _ in 0..count {
                generate_ast(&rep.ast, random, out)?;
            }
            Ok(())
        }
        Ast::Group(group) => {
            if let GroupKind::NonCapturing(flags) = &group.kind {
                if !flags.items.is_empty() {
                    return Err(unsupported("inline flags"));
                }
            }
            generate_ast(&group.ast, random, out)
        }
        Ast::Alternation(alt) => {
            let chosen = &alt.asts[random.index(alt.asts.len())];
            generate_ast(chosen, random, out)
        }
        Ast::Concat(concat) => {
            for part in &concat.asts {
                generate_ast(part, random, out)?;
            }
            Ok(())
        }
    }
}

fn generate_perl(class: &ClassPerl, random: &mut RandomSource) -> Result<char, GenerationError> {
    if class.negated {
        return complement(random, |c| perl_contains(&class.kind, c));
    }
    let pool: &str = match class.kind {
        ClassPerlKind::Digit => DIGITS,
        ClassPerlKind::Word => WORD,
        ClassPerlKind::Space => return Err(unsupported("whitespace class `\\s`")),
    };
    let chars: Vec<char> = pool.chars().collect();
    Ok(chars[random.index(chars.len())])
}

fn perl_contains(kind: &ClassPerlKind, c: char) -> bool {
    match kind {
        ClassPerlKind::Digit => c.is_ascii_digit(),
        ClassPerlKind::Word => c.is_ascii_alphanumeric() || c == '_',
        ClassPerlKind::Space => c.is_ascii_whitespace(),
    }
}

fn ascii_contains(class: &ClassAscii, c: char) -> bool {
    let member = match class.kind {
        ClassAsciiKind::Alnum => c.is_ascii_alphanumeric(),
        ClassAsciiKind::Alpha => c.is_ascii_alphabetic(),
        ClassAsciiKind::Ascii => c.is_ascii(),
        ClassAsciiKind::Blank => c == ' ' || c == '\t',
        ClassAsciiKind::Cntrl => c.is_ascii_control(),
        ClassAsciiKind::Digit => c.is_ascii_digit(),
        ClassAsciiKind::Graph => c.is_ascii_graphic(),
        ClassAsciiKind::Lower => c.is_ascii_lowercase(),
        ClassAsciiKind::Print => c.is_ascii_graphic() || c == ' ',
        ClassAsciiKind::Punct => c.is_ascii_punctuation(),
        ClassAsciiKind::Space => c.is_ascii_whitespace(),
        ClassAsciiKind::Upper => c.is_ascii_uppercase(),
        ClassAsciiKind::Word => c.is_ascii_alphanumeric() || c == '_',
        ClassAsciiKind::Xdigit => c.is_ascii_hexdigit(),
    };
    member != class.negated
}

fn generate_bracketed(
    class: &ClassBracketed,
    random: &mut RandomSource,
) -> Result<char, GenerationError> {
    let set = match &class.kind {
        ClassSet::Item(item) => item,
        ClassSet::BinaryOp(_) => return Err(unsupported("class set operation")),
    };
    if class.negated {
        complement(random, |c| item_contains(set, c).unwrap_or(true))
    } else {
        generate_item(set, random)
    }
}

fn generate_item(
    item: &ClassSetItem,
    random: &mut RandomSource,
) -> Result<char, GenerationError> {
    match item {
        ClassSetItem::Empty(_) => Err(unsupported("empty character class")),
        ClassSetItem::Literal(literal) => Ok(literal.c),
        ClassSetItem::Range(range) => {
            let lo = range.start.c as u32;
            let hi = range.end.c as u32;
            // Retry past unassigned ordinals (surrogates) inside the range.
            for _ in 0..8 {
                let ordinal = random.i128_in(lo as i128, hi as i128) as u32;
                if let Some(c) = char::from_u32(ordinal) {
                    return Ok(c);
                }
            }
            Ok(range.start.c)
        }
        ClassSetItem::Ascii(ascii) => {
            let pool: Vec<char> = printable().filter(|&c| ascii_contains(ascii, c)).collect();
            if pool.is_empty() {
                return Err(unsupported("empty ascii class"));
            }
            Ok(pool[random.index(pool.len())])
        }
        ClassSetItem::Unicode(class) => Err(unsupported(format!(
            "unicode class `\\p{{{:?}}}`",
            class.kind
        ))),
        ClassSetItem::Perl(perl) => generate_perl(perl, random),
        ClassSetItem::Bracketed(inner) => generate_bracketed(inner, random),
        ClassSetItem::Union(union) => {
            if union.items.is_empty() {
                return Err(unsupported("empty character class"));
            }
            let chosen = &union.items[random.index(union.items.len())];
            generate_item(chosen, random)
        }
    }
}

/// Membership test used when complementing a negated class. Returns an
/// error for items whose membership cannot be evaluated.
fn item_contains(item: &ClassSetItem, c: char) -> Result<bool, GenerationError> {
    match item {
        ClassSetItem::Empty(_) => Ok(false),
        ClassSetItem::Literal(literal) => Ok(literal.c == c),
        ClassSetItem::Range(range) => Ok(range.start.c <= c && c <= range.end.c),
        ClassSetItem::Ascii(ascii) => Ok(ascii_contains(ascii, c)),
        ClassSetItem::Unicode(class) => Err(unsupported(format!(
            "unicode class `\\p{{{:?}}}`",
            class.kind
        ))),
        ClassSetItem::Perl(perl) => Ok(perl_contains(&perl.kind, c) != perl.negated),
        ClassSetItem::Bracketed(inner) => {
            let set = match &inner.kind {
                ClassSet::Item(item) => item,
                ClassSet::BinaryOp(_) => return Err(unsupported("class set operation")),
            };
            Ok(item_contains(set, c)? != inner.negated)
        }
        ClassSetItem::Union(union) => {
            for member in &union.items {
                if item_contains(member, c)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Draw from the printable-ASCII alphabet minus an excluded set.
fn complement(
    random: &mut RandomSource,
    excluded: impl Fn(char) -> bool,
) -> Result<char, GenerationError> {
    let pool: Vec<char> = printable().filter(|&c| !excluded(c)).collect();
    if pool.is_empty() {
        return Err(unsupported("negated class excludes every printable character"));
    }
    Ok(pool[random.index(pool.len())])
}
