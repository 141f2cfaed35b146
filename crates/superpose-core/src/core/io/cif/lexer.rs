use super::CifError;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{char, multispace1, not_line_ending},
    combinator::value,
    multi::many0,
    sequence::preceded,
};

/// STAR tokens; every value borrows from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `data_` block header with the block code.
    DataBlock(&'a str),
    /// `loop_` keyword.
    Loop,
    /// `_category.item` data name, leading underscore included.
    DataName(&'a str),
    /// Bare, quoted or text-field value, delimiters removed.
    Value(&'a str),
    /// `.` placeholder.
    Inapplicable,
    /// `?` placeholder.
    Unknown,
}

impl<'a> Token<'a> {
    /// Returns the value carried by a value-like token, placeholders verbatim.
    pub fn as_value(&self) -> Option<&'a str> {
        match self {
            Token::Value(v) => Some(v),
            Token::Inapplicable => Some("."),
            Token::Unknown => Some("?"),
            _ => None,
        }
    }
}

/// A token together with the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub line: usize,
}

fn skip_ws_comments(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(alt((
        value((), multispace1),
        value((), preceded(char('#'), not_line_ending)),
    )))(input)?;
    Ok((input, ()))
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace()
}

fn parse_data_block(input: &str) -> IResult<&str, Token<'_>> {
    let (input, _) = tag_no_case("data_")(input)?;
    let (input, name) = take_while(is_word_char)(input)?;
    Ok((input, Token::DataBlock(name)))
}

fn parse_loop(input: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = tag_no_case("loop_")(input)?;
    if rest.starts_with(is_word_char) {
        // `loop_x` is an ordinary value.
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, Token::Loop))
}

fn parse_data_name(input: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = char('_')(input)?;
    let (rest, name) = take_while1(is_word_char)(rest)?;
    Ok((rest, Token::DataName(&input[..name.len() + 1])))
}

/// Quoted values end at a matching quote that is followed by whitespace or
/// the end of input, so embedded quotes such as `O5'` survive.
fn parse_quoted(input: &str) -> IResult<&str, Token<'_>> {
    let quote = match input.chars().next() {
        Some(q @ ('\'' | '"')) => q,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )));
        }
    };
    let body = &input[1..];
    for (i, c) in body.char_indices() {
        if c == '\n' {
            break;
        }
        if c == quote && body[i + 1..].chars().next().is_none_or(char::is_whitespace) {
            return Ok((&body[i + 1..], Token::Value(&body[..i])));
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn parse_bare_value(input: &str) -> IResult<&str, Token<'_>> {
    let (input, value) = take_while1(is_word_char)(input)?;
    let token = match value {
        "." => Token::Inapplicable,
        "?" => Token::Unknown,
        _ => Token::Value(value),
    };
    Ok((input, token))
}

/// Parses one token that is not a text field.
pub fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        parse_data_block,
        parse_loop,
        parse_data_name,
        parse_quoted,
        parse_bare_value,
    ))(input)
}

/// Splits a text field opened by a `;` in the first column.
///
/// Returns the content (without the delimiters and the newline before the
/// closing `;`) and the remaining input, or `None` when the field never closes.
fn split_text_field(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix(';')?;
    let end = body.find("\n;")?;
    let content = body[..end].strip_suffix('\r').unwrap_or(&body[..end]);
    Some((content, &body[end + 2..]))
}

/// Tokenizes a whole CIF document.
///
/// # Errors
///
/// Returns [`CifError::UnterminatedTextField`] when a text field is not closed
/// and [`CifError::Syntax`] for input no token rule accepts.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, CifError> {
    let mut tokens = Vec::new();
    let mut remaining = input;
    let mut line = 1;

    loop {
        let (after_ws, _) = skip_ws_comments(remaining).map_err(|_| CifError::Syntax { line })?;
        line += remaining[..remaining.len() - after_ws.len()].matches('\n').count();
        remaining = after_ws;
        if remaining.is_empty() {
            break;
        }

        let consumed_before = input.len() - remaining.len();
        let at_line_start = consumed_before == 0 || input[..consumed_before].ends_with('\n');

        let (rest, token) = if at_line_start && remaining.starts_with(';') {
            let (content, rest) =
                split_text_field(remaining).ok_or(CifError::UnterminatedTextField { line })?;
            (rest, Token::Value(content))
        } else {
            parse_token(remaining).map_err(|_| CifError::Syntax { line })?
        };

        tokens.push(Spanned { token, line });
        line += remaining[..remaining.len() - rest.len()].matches('\n').count();
        remaining = rest;
    }

    Ok(tokens)
}
