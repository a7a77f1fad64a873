//! Facet query parser for the command line.
//!
//! Turns a single query string into per-facet value lists that can be fed to
//! `apply_facet`.
//!
//! # Syntax
//!
//! ```text
//! query := term*
//! term  := facet:value | facet:"quoted value" | word
//! facet := genre | artist | album | search (case-insensitive)
//! ```
//!
//! Repeating a facet adds another accepted value (values of one facet are OR'd, facets are
//! AND'd). Bare words are collected into the search phrase.
//!
//! # Examples
//!
//! ```rust
//! # use track_browser::filters::query::parse_query;
//! # use track_browser::filters::Facet;
//! let query = parse_query("genre:rock artist:\"the bad plus\" red barchetta").unwrap();
//! assert_eq!(query.values(Facet::Genre), ["rock"]);
//! assert_eq!(query.values(Facet::Artist), ["the bad plus"]);
//! assert_eq!(query.values(Facet::Search), ["red barchetta"]);
//! ```

use anyhow::{Context, Result, bail};

use super::facet::Facet;

/// Token types produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// facet:value or facet:"quoted value"
    FacetValue { facet: String, value: String },
    /// Free search word
    Word(String),
}

/// Parsed query: values per facet, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetQuery {
    values: [Vec<String>; 4],
    words: Vec<String>,
}

impl FacetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, facet: Facet, value: impl Into<String>) {
        self.values[facet.index()].push(value.into());
    }

    /// Values for `facet`; bare words are joined into one search phrase
    pub fn values(&self, facet: Facet) -> Vec<String> {
        let mut values = self.values[facet.index()].clone();
        if facet == Facet::Search && !self.words.is_empty() {
            values.push(self.words.join(" "));
        }
        values
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.values.iter().all(Vec::is_empty)
    }
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Split query input into facet values and bare words
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let head = take_until(&mut chars, |c| c == ':' || c.is_whitespace());
        if chars.next_if_eq(&':').is_none() {
            tokens.push(Token::Word(head));
            continue;
        }

        let value = if chars.next_if_eq(&'"').is_some() {
            read_quoted_value(&mut chars)?
        } else {
            take_until(&mut chars, char::is_whitespace)
        };
        if head.is_empty() || value.trim().is_empty() {
            bail!("Invalid facet:value format: {}:{}", head, value);
        }
        tokens.push(Token::FacetValue { facet: head, value });
    }

    Ok(tokens)
}

fn take_until(chars: &mut Chars<'_>, stop: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(ch) = chars.next_if(|c| !stop(*c)) {
        taken.push(ch);
    }
    taken
}

/// Read up to the closing quote; the value must end at whitespace or end of input
fn read_quoted_value(chars: &mut Chars<'_>) -> Result<String> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some('"') => break,
            Some(ch) => value.push(ch),
            None => bail!("Unterminated quoted string"),
        }
    }

    let trailing = take_until(chars, char::is_whitespace);
    if !trailing.is_empty() {
        bail!("Unexpected text after closing quote: \"{}\"{}", value, trailing);
    }
    Ok(value)
}

/// Parse a query string into a [`FacetQuery`]
pub fn parse_query(input: &str) -> Result<FacetQuery> {
    let mut query = FacetQuery::new();
    if input.trim().is_empty() {
        return Ok(query);
    }

    for token in tokenize(input).context("Failed to tokenize query")? {
        match token {
            Token::FacetValue { facet, value } => query.add(facet.parse::<Facet>()?, value),
            Token::Word(word) => query.words.push(word),
        }
    }

    Ok(query)
}
