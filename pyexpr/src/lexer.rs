//! Tokenizer for single Python expressions.
//!
//! Only expressions are ever lexed, so newlines, comments and backslash continuations are
//! all trivia. Literals are kept as raw slices; decoding happens in the parser.
use std::fmt;

use chumsky::prelude::*;
use strum::{Display, EnumString};

pub type Spanned<T> = (T, SimpleSpan);

pub(crate) type LexExtra<'src> = extra::Err<Rich<'src, char, SimpleSpan>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Keyword {
    #[strum(serialize = "lambda")]
    Lambda,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "if")]
    If,
    #[strum(serialize = "else")]
    Else,
    #[strum(serialize = "for")]
    For,
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "is")]
    Is,
    #[strum(serialize = "True")]
    True,
    #[strum(serialize = "False")]
    False,
    #[strum(serialize = "None")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'src> {
    Name(&'src str),
    Int(&'src str),
    Float(&'src str),
    /// Raw string literal including prefix and quotes.
    Str(&'src str),
    Kw(Keyword),
    Op(&'src str),
    Ctrl(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(s) | Token::Int(s) | Token::Float(s) | Token::Str(s) | Token::Op(s) => {
                write!(f, "{s}")
            }
            Token::Kw(kw) => write!(f, "{kw}"),
            Token::Ctrl(c) => write!(f, "{c}"),
        }
    }
}

/// Body of a quoted literal delimited by `quote`; escapes are skipped, not decoded.
fn quoted<'src>(quote: &'static str) -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    let escape = just('\\').then(any()).ignored();
    let plain = any().and_is(just(quote).not()).ignored();

    just(quote)
        .then(escape.or(plain).repeated())
        .then(just(quote))
        .ignored()
}

pub fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, LexExtra<'src>> {
    // Literals
    let string = one_of("rRbBuUfF")
        .repeated()
        .at_most(2)
        .then(choice((
            quoted("\"\"\""),
            quoted("'''"),
            quoted("\""),
            quoted("'"),
        )))
        .to_slice()
        .map(Token::Str)
        .labelled("string literal");

    let dec = any()
        .filter(|c: &char| c.is_ascii_digit())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_digit() || *c == '_')
                .repeated(),
        )
        .ignored();
    let exponent = one_of("eE")
        .then(one_of("+-").or_not())
        .then(dec.clone())
        .ignored();
    let imaginary = one_of("jJ").or_not().ignored();

    let float = choice((
        dec.clone()
            .then(just('.'))
            .then(dec.clone().or_not())
            .then(exponent.clone().or_not())
            .ignored(),
        just('.')
            .then(dec.clone())
            .then(exponent.clone().or_not())
            .ignored(),
        dec.clone().then(exponent).ignored(),
    ))
    .then(imaginary.clone())
    .to_slice()
    .map(Token::Float)
    .labelled("float literal");

    let prefixed_int = just('0')
        .then(one_of("xXoObB"))
        .then(
            any()
                .filter(|c: &char| c.is_ascii_hexdigit() || *c == '_')
                .repeated()
                .at_least(1),
        )
        .to_slice()
        .map(Token::Int);

    let int = dec
        .then(imaginary)
        .to_slice()
        .map(Token::Int)
        .labelled("integer literal");

    // Identifiers and keywords
    let word = any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| match s.parse::<Keyword>() {
            Ok(kw) => Token::Kw(kw),
            Err(_) => Token::Name(s),
        });

    // Operators (longest first)
    let op = choice((
        just("**"),
        just("//"),
        just("<<"),
        just(">>"),
        just("<="),
        just(">="),
        just("=="),
        just("!="),
        just("->"),
        just(":="),
        just("..."),
        just("+"),
        just("-"),
        just("*"),
        just("/"),
        just("%"),
        just("@"),
        just("&"),
        just("|"),
        just("^"),
        just("~"),
        just("<"),
        just(">"),
        just("="),
    ))
    .to_slice()
    .map(Token::Op);

    let ctrl = one_of("()[]{},:.;").map(Token::Ctrl);

    let token = choice((string, float, prefixed_int, int, word, op, ctrl));

    // Comments run to the end of the line; a trailing backslash joins physical lines.
    let comment = just('#')
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();
    let continuation = just('\\')
        .then(just('\r').or_not())
        .then(just('\n'))
        .ignored();
    let trivia = comment.or(continuation).padded().repeated();

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded_by(trivia)
        .padded()
        .repeated()
        .collect()
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        lexer()
            .parse(src)
            .into_result()
            .expect("lexing should succeed")
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn keywords_and_names() {
        assert_eq!(
            tokens("lambda x: not x"),
            vec![
                Token::Kw(Keyword::Lambda),
                Token::Name("x"),
                Token::Ctrl(':'),
                Token::Kw(Keyword::Not),
                Token::Name("x"),
            ]
        );
        assert_eq!(tokens("None_"), vec![Token::Name("None_")]);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            tokens("1 1.5 .5 1e3 0x1F 2j"),
            vec![
                Token::Int("1"),
                Token::Float("1.5"),
                Token::Float(".5"),
                Token::Float("1e3"),
                Token::Int("0x1F"),
                Token::Int("2j"),
            ]
        );
    }

    #[test]
    fn strings_keep_prefix_and_quotes() {
        assert_eq!(
            tokens(r#"r'a\d' "x\"y" '''t'''"#),
            vec![
                Token::Str(r"r'a\d'"),
                Token::Str(r#""x\"y""#),
                Token::Str("'''t'''"),
            ]
        );
    }

    #[test]
    fn operators_longest_first() {
        assert_eq!(
            tokens("a ** b // c <= d ... e"),
            vec![
                Token::Name("a"),
                Token::Op("**"),
                Token::Name("b"),
                Token::Op("//"),
                Token::Name("c"),
                Token::Op("<="),
                Token::Name("d"),
                Token::Op("..."),
                Token::Name("e"),
            ]
        );
    }

    #[test]
    fn trivia_is_skipped_and_spans_are_exact() {
        let src = "x  # trailing\n  + \\\n y";
        let spanned = lexer().parse(src).into_result().expect("lexing should succeed");
        let names: Vec<&str> = spanned
            .iter()
            .map(|(_, span)| &src[span.start..span.end])
            .collect();
        assert_eq!(names, vec!["x", "+", "y"]);
    }
}
