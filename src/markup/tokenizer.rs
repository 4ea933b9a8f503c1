//! logos-based StarML tokenizer.
//!
//! Attribute values are lexed whole (`"..."`, `{...}`, `|...|`) and split by
//! the parser, which keeps the token set small. Equal-length matches go to
//! the earlier variant, so `</` and `/>` are listed before `<` and `>`.

use logos::Logos;

/// StarML token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `</`
    #[token("</")]
    CloseTagOpen,

    /// `/>`
    #[token("/>")]
    SelfClose,

    /// `<`
    #[token("<")]
    TagOpen,

    /// `>`
    #[token(">")]
    TagClose,

    /// `=`
    #[token("=")]
    Equals,

    /// Tag or attribute name, including the `*`, `+` and `!` prefixes.
    #[regex(r"[*+]?!?[A-Za-z_][A-Za-z0-9_\-:.]*")]
    Name,

    /// Double-quoted literal: `"text"`.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Binding expression: `{Path}`, `{@Asset}`, `{#Key}` and friends.
    #[regex(r"\{[^}]*\}")]
    Binding,

    /// Event handler: `|Handler(args)|`.
    #[regex(r"\|[^|]*\|")]
    Event,
}
