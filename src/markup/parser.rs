//! Recursive descent StarML parser.
//!
//! Parses markup into a [`Document`]: exactly one root element plus any
//! number of top-level `<template name="...">` definitions. Comments
//! (`<!-- ... -->`) are stripped before tokenizing.

use logos::Logos;

use crate::dom::{
    ArgumentType, AttributeType, AttributeValueType, ContextRedirect, Document, SArgument,
    SAttribute, SElement, SEvent, SNode,
};
use crate::markup::tokenizer::Token;

/// Errors from StarML parsing. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character at position {position}")]
    InvalidCharacter { position: usize },
    #[error("invalid binding at position {position}: {message}")]
    InvalidBinding { position: usize, message: String },
    #[error("closing tag </{found}> at position {position} does not match <{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        position: usize,
    },
    #[error("document has no root element")]
    NoRootElement,
    #[error("document has more than one root element (second at position {position})")]
    MultipleRoots { position: usize },
}

#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
}

/// Blank out each `<!-- ... -->` comment with spaces of the same byte
/// length, so token positions still point into the source text.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("<!--") {
        result.push_str(&rest[..start]);
        let length = match rest[start + 4..].find("-->") {
            Some(end) => 4 + end + 3,
            // Unterminated comment consumes the rest of the input.
            None => rest.len() - start,
        };
        result.extend(std::iter::repeat(' ').take(length));
        rest = &rest[start + length..];
    }
    result.push_str(rest);
    result
}

fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        let token = result.map_err(|_| ParseError::InvalidCharacter {
            position: span.start,
        })?;
        tokens.push(PToken {
            token,
            text: input[span.clone()].to_string(),
            byte_start: span.start,
        });
    }
    Ok(tokens)
}

/// Parse a StarML string into a [`Document`].
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned)?;
    let mut parser = Parser { tokens, cursor: 0 };

    let mut root = None;
    let mut templates = Vec::new();
    while !parser.is_eof() {
        let position = parser.current_pos();
        let node = parser.parse_element()?;
        if node.element.tag == "template" {
            templates.push(node);
        } else if root.is_some() {
            return Err(ParseError::MultipleRoots { position });
        } else {
            root = Some(node);
        }
    }

    let root = root.ok_or(ParseError::NoRootElement)?;
    Ok(Document { root, templates })
}

struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(tok)
    }

    fn expect(&mut self, expected: Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.byte_start,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                position: tok.byte_start,
                message: format!("expected {expected}, got {:?} '{}'", tok.token, tok.text),
            },
            None => ParseError::UnexpectedEof(format!("expected {expected}")),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.byte_start)
    }

    /// `<tag attr...` followed by `/>` or `>children</tag>`.
    fn parse_element(&mut self) -> Result<SNode, ParseError> {
        self.expect(Token::TagOpen)?;
        let tag = self.expect(Token::Name)?;
        if tag.text.starts_with(['*', '+', '!']) {
            return Err(ParseError::UnexpectedToken {
                position: tag.byte_start,
                message: format!("'{}' is not a valid tag name", tag.text),
            });
        }

        let mut element = SElement::new(tag.text.clone());
        loop {
            match self.peek().map(|t| t.token) {
                Some(Token::Name) => self.parse_attribute(&mut element)?,
                Some(Token::SelfClose) => {
                    self.advance();
                    return Ok(SNode::new(element, Vec::new()));
                }
                Some(Token::TagClose) => {
                    self.advance();
                    break;
                }
                Some(_) => return Err(self.unexpected("an attribute or the end of the tag")),
                None => return Err(ParseError::UnexpectedEof(format!("unclosed <{}>", tag.text))),
            }
        }

        let mut children = Vec::new();
        loop {
            match self.peek().map(|t| t.token) {
                Some(Token::CloseTagOpen) => break,
                Some(_) => children.push(self.parse_element()?),
                None => {
                    return Err(ParseError::UnexpectedEof(format!(
                        "missing </{}>",
                        tag.text
                    )))
                }
            }
        }
        self.expect(Token::CloseTagOpen)?;
        let closing = self.expect(Token::Name)?;
        if closing.text != tag.text {
            return Err(ParseError::MismatchedTag {
                expected: tag.text,
                found: closing.text,
                position: closing.byte_start,
            });
        }
        self.expect(Token::TagClose)?;
        Ok(SNode::new(element, children))
    }

    fn parse_attribute(&mut self, element: &mut SElement) -> Result<(), ParseError> {
        let name = self.expect(Token::Name)?;
        self.expect(Token::Equals)?;
        let value = match self.advance() {
            Some(tok) => tok.clone(),
            None => return Err(ParseError::UnexpectedEof(format!("value for '{}'", name.text))),
        };

        let (attribute_type, rest) = match name.text.as_bytes().first() {
            Some(b'*') => (AttributeType::Structural, &name.text[1..]),
            Some(b'+') => (AttributeType::Behavior, &name.text[1..]),
            _ => (AttributeType::Property, name.text.as_str()),
        };
        let (negated, attr_name) = match rest.strip_prefix('!') {
            Some(stripped) if attribute_type == AttributeType::Structural => (true, stripped),
            Some(_) => {
                return Err(ParseError::UnexpectedToken {
                    position: name.byte_start,
                    message: format!("'!' is only allowed on structural attributes: {}", name.text),
                })
            }
            None => (false, rest),
        };

        match value.token {
            Token::StringLiteral => {
                element.attributes.push(SAttribute {
                    name: attr_name.to_owned(),
                    value: unquote(&value.text).to_owned(),
                    attribute_type,
                    value_type: AttributeValueType::Literal,
                    negated,
                    redirect: None,
                });
            }
            Token::Binding => {
                let inner = &value.text[1..value.text.len() - 1];
                let (value_type, redirect, path) = parse_binding(inner)
                    .map_err(|message| ParseError::InvalidBinding {
                        position: value.byte_start,
                        message,
                    })?;
                element.attributes.push(SAttribute {
                    name: attr_name.to_owned(),
                    value: path,
                    attribute_type,
                    value_type,
                    negated,
                    redirect,
                });
            }
            Token::Event if attribute_type == AttributeType::Property => {
                let inner = &value.text[1..value.text.len() - 1];
                let event = parse_event(attr_name, inner).map_err(|message| {
                    ParseError::InvalidBinding {
                        position: value.byte_start,
                        message,
                    }
                })?;
                element.events.push(event);
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: value.byte_start,
                    message: format!("invalid value for '{}': {}", name.text, value.text),
                })
            }
        }
        Ok(())
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Split a leading `^^`/`~Type.` redirect from `text`.
fn parse_redirect(text: &str) -> Result<(Option<ContextRedirect>, &str), String> {
    let carets = text.bytes().take_while(|&b| b == b'^').count();
    if carets > 0 {
        return Ok((Some(ContextRedirect::Distance(carets as u32)), &text[carets..]));
    }
    if let Some(rest) = text.strip_prefix('~') {
        let (type_name, path) = rest
            .split_once('.')
            .ok_or_else(|| format!("type redirect '{text}' must be followed by '.'"))?;
        if type_name.is_empty() {
            return Err(format!("type redirect '{text}' has no type name"));
        }
        return Ok((Some(ContextRedirect::Type(type_name.to_owned())), path));
    }
    Ok((None, text))
}

/// Parse the inside of `{...}`.
fn parse_binding(
    text: &str,
) -> Result<(AttributeValueType, Option<ContextRedirect>, String), String> {
    let text = text.trim();
    const PREFIXES: [(&str, AttributeValueType); 10] = [
        ("@<", AttributeValueType::AssetNameBinding),
        ("@:", AttributeValueType::OneTimeAssetNameBinding),
        ("@", AttributeValueType::AssetBinding),
        ("#", AttributeValueType::TranslationBinding),
        ("&", AttributeValueType::TemplateBinding),
        ("<>", AttributeValueType::TwoWayBinding),
        ("<:", AttributeValueType::OneTimeBinding),
        ("<", AttributeValueType::InputBinding),
        (">", AttributeValueType::OutputBinding),
        (":", AttributeValueType::OneTimeBinding),
    ];
    let (value_type, rest) = PREFIXES
        .iter()
        .find_map(|(prefix, value_type)| text.strip_prefix(prefix).map(|rest| (*value_type, rest)))
        .unwrap_or((AttributeValueType::InputBinding, text));

    let (redirect, path) = if value_type.uses_context() {
        parse_redirect(rest.trim_start())?
    } else {
        (None, rest)
    };
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("empty binding '{{{text}}}'"));
    }
    if value_type.uses_context() && path.split('.').any(str::is_empty) {
        return Err(format!("malformed property path '{path}'"));
    }
    Ok((value_type, redirect, path.to_owned()))
}

/// Parse the inside of `|...|`: `^Handler(arg, "literal", $Field, &param)`.
fn parse_event(name: &str, text: &str) -> Result<SEvent, String> {
    let text = text.trim();
    let (head, args) = text
        .split_once('(')
        .ok_or_else(|| format!("event handler '{text}' is missing an argument list"))?;
    let args = args
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| format!("event handler '{text}' is missing ')'"))?;
    let (handler_redirect, handler_name) = parse_redirect(head.trim())?;
    if handler_name.is_empty() {
        return Err(format!("event handler '{text}' has no method name"));
    }

    let arguments = split_arguments(args)?
        .into_iter()
        .map(parse_argument)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SEvent {
        name: name.to_owned(),
        handler_name: handler_name.to_owned(),
        handler_redirect,
        arguments,
    })
}

/// Split on commas outside of double quotes.
fn split_arguments(text: &str) -> Result<Vec<&str>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if quoted {
        return Err(format!("unterminated string in arguments '{text}'"));
    }
    parts.push(text[start..].trim());
    Ok(parts)
}

fn parse_argument(text: &str) -> Result<SArgument, String> {
    if text.is_empty() {
        return Err("empty event argument".to_owned());
    }
    let literal = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|_| text.len() >= 2);
    let (argument_type, redirect, expression) = if let Some(literal) = literal {
        (ArgumentType::Literal, None, literal)
    } else if let Some(field) = text.strip_prefix('$') {
        (ArgumentType::EventBinding, None, field)
    } else if let Some(param) = text.strip_prefix('&') {
        (ArgumentType::TemplateBinding, None, param)
    } else {
        let (redirect, path) = parse_redirect(text)?;
        (ArgumentType::ContextBinding, redirect, path)
    };
    if expression.is_empty() && argument_type != ArgumentType::Literal {
        return Err(format!("event argument '{text}' is empty"));
    }
    Ok(SArgument {
        expression: expression.to_owned(),
        argument_type,
        redirect,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn attr<'a>(doc: &'a Document, name: &str) -> &'a SAttribute {
        doc.root
            .element
            .attributes
            .iter()
            .find(|a| a.name == name)
            .unwrap()
    }

    #[test]
    fn parses_nested_elements() {
        let doc = parse(
            r#"<lane orientation="vertical">
                 <label text="One" />
                 <frame><label text="Two" /></frame>
               </lane>"#,
        )
        .unwrap();
        assert_eq!(doc.root.tag(), "lane");
        assert_eq!(doc.root.children.len(), 2);
        assert_eq!(doc.root.children[1].children[0].tag(), "label");
        assert!(doc.templates.is_empty());
    }

    #[test]
    fn binding_modifiers() {
        let doc = parse(
            r#"<label a={Path} b={<Path} c={:Path} d={<:Path} e={>Path} f={<>Path}
                      g={@Mods/A/B} h={@<Name} i={@:Name} j={#Key.Sub} k={&param} />"#,
        )
        .unwrap();
        let expect = [
            ("a", AttributeValueType::InputBinding),
            ("b", AttributeValueType::InputBinding),
            ("c", AttributeValueType::OneTimeBinding),
            ("d", AttributeValueType::OneTimeBinding),
            ("e", AttributeValueType::OutputBinding),
            ("f", AttributeValueType::TwoWayBinding),
            ("g", AttributeValueType::AssetBinding),
            ("h", AttributeValueType::AssetNameBinding),
            ("i", AttributeValueType::OneTimeAssetNameBinding),
            ("j", AttributeValueType::TranslationBinding),
            ("k", AttributeValueType::TemplateBinding),
        ];
        for (name, value_type) in expect {
            assert_eq!(attr(&doc, name).value_type, value_type, "attribute {name}");
        }
        assert_eq!(attr(&doc, "g").value, "Mods/A/B");
        assert_eq!(attr(&doc, "j").value, "Key.Sub");
    }

    #[test]
    fn redirects() {
        let doc = parse(r#"<label a={^^MaxLines} b={<>~ItemData.Color} c={@<^Name} />"#).unwrap();
        assert_eq!(attr(&doc, "a").redirect, Some(ContextRedirect::Distance(2)));
        assert_eq!(attr(&doc, "a").value, "MaxLines");
        assert_eq!(
            attr(&doc, "b").redirect,
            Some(ContextRedirect::Type("ItemData".into()))
        );
        assert_eq!(attr(&doc, "b").value, "Color");
        assert_eq!(attr(&doc, "c").redirect, Some(ContextRedirect::Distance(1)));
    }

    #[test]
    fn structural_and_behavior_attributes() {
        let doc = parse(r#"<label *!if={Hidden} *repeat={Items} +hover:tint="Red" />"#).unwrap();
        let neg = attr(&doc, "if");
        assert_eq!(neg.attribute_type, AttributeType::Structural);
        assert!(neg.negated);
        assert_eq!(attr(&doc, "hover:tint").attribute_type, AttributeType::Behavior);
        assert_eq!(attr(&doc, "hover:tint").value, "Red");
    }

    #[test]
    fn events_with_arguments() {
        let doc =
            parse(r#"<button click=|^IncrementItem(Id, ^Delta, $Button, "a, b", &p)| />"#).unwrap();
        let event = &doc.root.element.events[0];
        assert_eq!(event.name, "click");
        assert_eq!(event.handler_name, "IncrementItem");
        assert_eq!(event.handler_redirect, Some(ContextRedirect::Distance(1)));
        let kinds: Vec<_> = event
            .arguments
            .iter()
            .map(|a| (a.argument_type, a.expression.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ArgumentType::ContextBinding, "Id"),
                (ArgumentType::ContextBinding, "Delta"),
                (ArgumentType::EventBinding, "Button"),
                (ArgumentType::Literal, "a, b"),
                (ArgumentType::TemplateBinding, "p"),
            ]
        );
        assert_eq!(event.arguments[1].redirect, Some(ContextRedirect::Distance(1)));
    }

    #[test]
    fn templates_are_collected() {
        let doc = parse(
            r#"<lane><row /></lane>
               <!-- a comment <with> tags -->
               <template name="row"><label text={&text} /></template>"#,
        )
        .unwrap();
        assert_eq!(doc.templates.len(), 1);
        assert!(doc.template("ROW").is_some());
    }

    #[test]
    fn errors() {
        assert_eq!(parse(""), Err(ParseError::NoRootElement));
        assert!(matches!(
            parse("<a></b>"),
            Err(ParseError::MismatchedTag { .. })
        ));
        assert!(matches!(
            parse("<a /><b />"),
            Err(ParseError::MultipleRoots { .. })
        ));
        assert!(matches!(
            parse("<a x={} />"),
            Err(ParseError::InvalidBinding { .. })
        ));
        assert!(matches!(
            parse("<a x={~Foo} />"),
            Err(ParseError::InvalidBinding { .. })
        ));
        assert!(matches!(
            parse("<a x=|Go| />"),
            Err(ParseError::InvalidBinding { .. })
        ));
        assert!(matches!(
            parse("<a *x=|Go()| />"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(parse("<a"), Err(ParseError::UnexpectedEof(_))));
        assert!(matches!(
            parse("<a x=\"1\" ; />"),
            Err(ParseError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn error_positions_count_comment_bytes() {
        let source = "<!-- caf\u{e9} notes --><a x=\"1\" ; />";
        let expected = source.find(';').unwrap();
        assert!(matches!(
            parse(source),
            Err(ParseError::InvalidCharacter { position }) if position == expected
        ));
        assert_eq!(strip_comments("a<!-- x -->b").len(), "a<!-- x -->b".len());
        assert_eq!(strip_comments("a<!-- open"), "a         ");
    }
}
