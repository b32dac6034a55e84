use super::types::{FieldFilter, LogicOperator, Statement, StatementGroup};
use crate::errors::{Result, SearchError};
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Field(String),
    Colon,
    Value(String),
    LParen,
    RParen,
    And,
    Or,
}

/// Splits an expression into tokens, slicing words straight out of the input.
struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(&(start, ch)) = self.chars.peek() {
            let token = match ch {
                _ if ch.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '(' | ')' | ':' => {
                    self.chars.next();
                    match ch {
                        '(' => Token::LParen,
                        ')' => Token::RParen,
                        _ => Token::Colon,
                    }
                }
                '"' => {
                    self.chars.next();
                    Token::Value(self.quoted()?)
                }
                _ if is_word_char(ch) => self.word(start),
                _ => {
                    return Err(SearchError::InvalidExpression(format!(
                        "Unexpected character {:?} at offset {}",
                        ch, start
                    )))
                }
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Body of a quoted value, the opening quote already consumed.
    fn quoted(&mut self) -> Result<String> {
        let mut value = String::new();
        while let Some((_, ch)) = self.chars.next() {
            match ch {
                '"' => return Ok(value),
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(invalid("Unterminated quoted value"))
    }

    fn word(&mut self, start: usize) -> Token {
        let mut end = self.input.len();
        while let Some(&(offset, ch)) = self.chars.peek() {
            if !is_word_char(ch) {
                end = offset;
                break;
            }
            self.chars.next();
        }

        let word = &self.input[start..end];
        if word.eq_ignore_ascii_case("AND") {
            Token::And
        } else if word.eq_ignore_ascii_case("OR") {
            Token::Or
        } else if self.input[end..].trim_start().starts_with(':') {
            Token::Field(word.to_string())
        } else {
            Token::Value(word.to_string())
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '-' | '\'')
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();

        while self.peek().is_some() {
            statements.push(self.parse_term()?);

            match self.peek() {
                // Skip AND tokens (implicit between terms)
                Some(Token::And) => {
                    self.advance();
                }
                Some(Token::Or) => {
                    return Err(invalid(
                        "OR between terms must be grouped in parentheses, eg. (a:x OR b:y)",
                    ))
                }
                _ => {}
            }
        }

        Ok(statements)
    }

    fn parse_term(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::LParen) => self.parse_filter_group(),
            _ => self.parse_field_values(),
        }
    }

    /// `field:value` or `field:(v1 OR v2 ...)`.
    fn parse_field_values(&mut self) -> Result<Statement> {
        let field = self.parse_field()?;

        if !matches!(self.peek(), Some(Token::LParen)) {
            let value = self.parse_single_value()?;
            return Ok(Statement::Filter(FieldFilter::new(field, value)));
        }

        // Consume (
        self.advance();
        let mut values = vec![self.parse_single_value()?];
        let operator = self.parse_joined(&mut values, |parser| parser.parse_single_value())?;

        let statements = values
            .into_iter()
            .map(|value| Statement::Filter(FieldFilter::new(field.clone(), value)))
            .collect();
        Ok(Statement::Group(StatementGroup::new(operator, statements)))
    }

    /// `(a:x OR b:y ...)`, possibly over several fields.
    fn parse_filter_group(&mut self) -> Result<Statement> {
        // Consume (
        self.advance();
        let mut filters = vec![self.parse_leaf()?];
        let operator = self.parse_joined(&mut filters, |parser| parser.parse_leaf())?;

        let statements = filters.into_iter().map(Statement::Filter).collect();
        Ok(Statement::Group(StatementGroup::new(operator, statements)))
    }

    /// Reads `OP item OP item ... )` and returns the single operator used.
    fn parse_joined<T, F>(&mut self, items: &mut Vec<T>, mut parse_item: F) -> Result<LogicOperator>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let mut operator = None;
        loop {
            let next = match self.advance() {
                Some(Token::RParen) => return Ok(operator.unwrap_or(LogicOperator::Or)),
                Some(Token::And) => LogicOperator::And,
                Some(Token::Or) => LogicOperator::Or,
                _ => return Err(invalid("Expected closing parenthesis")),
            };
            match operator {
                Some(current) if current != next => {
                    return Err(invalid("Cannot mix AND and OR within one group"))
                }
                _ => operator = Some(next),
            }
            items.push(parse_item(self)?);
        }
    }

    fn parse_leaf(&mut self) -> Result<FieldFilter> {
        let field = self.parse_field()?;
        let value = self.parse_single_value()?;
        Ok(FieldFilter::new(field, value))
    }

    fn parse_field(&mut self) -> Result<String> {
        let field = match self.advance() {
            Some(Token::Field(f)) => f,
            _ => return Err(invalid("Expected field name")),
        };
        match self.advance() {
            Some(Token::Colon) => Ok(field),
            _ => Err(invalid("Expected colon")),
        }
    }

    fn parse_single_value(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::Value(v)) => Ok(v),
            _ => Err(invalid("Expected value")),
        }
    }
}

fn invalid(msg: &str) -> SearchError {
    SearchError::InvalidExpression(msg.to_string())
}

/// Parses a compact filter expression into top-level statements.
///
/// `rtype:audiobooks lang:(eng OR ice) (creator:Tolkien AND title:"The Hobbit")`
pub fn parse_filter_expression(expression: &str) -> Result<Vec<Statement>> {
    let tokens = Lexer::new(expression).tokens()?;
    Parser::new(tokens).parse()
}
