//! This module provides the parser for puzzle files, utilizing the `pest` crate.
//! It defines the grammar for `.hanoi` files and functions to parse the input
//! into a `Puzzle` struct.

use crate::{
    analyzer::analyze,
    solver,
    types::{HanoiError, Move, Puzzle},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the puzzle grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct PuzzleParser;

/// Parses the given input string into a `Puzzle` struct.
///
/// This is the main entry point for parsing puzzle definitions. It trims the
/// input, parses it with the `PuzzleParser`, and processes the parse tree into
/// a structured `Puzzle`. A puzzle without a `moves:` section receives the
/// solver's minimal sequence; an explicit section is kept verbatim. The parsed
/// puzzle is automatically analyzed before being returned.
///
/// # Arguments
///
/// * `input` - A string slice containing the puzzle definition.
///
/// # Returns
///
/// * `Ok(Puzzle)` if the input is successfully parsed and validated.
/// * `Err(HanoiError::ParseError)` if there are any syntax errors.
/// * `Err(HanoiError::InvalidDiskCount)` for a negative or malformed count.
/// * `Err(HanoiError::ValidationError)` if the puzzle fails analysis.
pub fn parse(input: &str) -> Result<Puzzle, HanoiError> {
    let root = PuzzleParser::parse(Rule::puzzle, input.trim())
        .map_err(|e| HanoiError::ParseError(e.into()))? //
        .next()
        .unwrap();

    let puzzle = parse_puzzle(root)?;

    // Analyze the parsed puzzle
    analyze(&puzzle)?;

    Ok(puzzle)
}

/// Parses the top-level structure of a puzzle from a `Pair<Rule::puzzle>`.
///
/// Extracts the name, disk count, and optional move list, checking that each
/// section appears at most once and that the required sections are present.
fn parse_puzzle(pair: Pair<Rule>) -> Result<Puzzle, HanoiError> {
    let mut name: Option<String> = None;
    let mut disks: Option<u32> = None;
    let mut moves: Option<Vec<Move>> = None;
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        let span = p.as_span();
        let rule = p.as_rule();

        check_unique_rule(rule, span, &mut seen)?;

        match rule {
            Rule::name => name = Some(parse_inner_string(p)),
            Rule::disks => disks = Some(parse_disks(p)?),
            Rule::moves => moves = Some(parse_moves(p)?),
            _ => {} // Skip other rules
        }
    }

    let name = check_required_rule(name, "name")?;
    let disks = check_required_rule(disks, "disks")?;
    let moves = moves.unwrap_or_else(|| solver::generate(disks));

    Ok(Puzzle { name, disks, moves })
}

/// Parses the disk count from a `Pair<Rule::disks>`.
///
/// The grammar admits a leading minus so that a negative count reaches the
/// `InvalidDiskCount` error instead of a raw syntax error.
fn parse_disks(pair: Pair<Rule>) -> Result<u32, HanoiError> {
    let count = parse_inner_string(pair);
    solver::parse_disk_count(&count)
}

/// Parses the move list from a `Pair<Rule::moves>`.
fn parse_moves(pair: Pair<Rule>) -> Result<Vec<Move>, HanoiError> {
    let mut moves = Vec::new();

    for step_pair in pair.into_inner() {
        if step_pair.as_rule() == Rule::step {
            moves.push(parse_step(step_pair)?);
        }
    }

    Ok(moves)
}

/// Parses a single `source -> target` line from a `Pair<Rule::step>`.
fn parse_step(pair: Pair<Rule>) -> Result<Move, HanoiError> {
    let span = pair.as_span();
    let mut pegs = pair.into_inner();

    let from = parse_peg(pegs.next(), span)?;
    let to = parse_peg(pegs.next(), span)?;

    Ok(Move::new(from, to))
}

/// Parses one peg number. Values too large for `u8` saturate, and the
/// analyzer rejects them as out-of-range pegs.
fn parse_peg(pair: Option<Pair<Rule>>, span: Span) -> Result<u8, HanoiError> {
    let pair = pair.ok_or_else(|| parse_error("Incomplete move", span))?;

    Ok(pair.as_str().parse::<u8>().unwrap_or(u8::MAX))
}

/// Extracts the inner string content from a `Pair`.
fn parse_inner_string(pair: Pair<Rule>) -> String {
    pair.into_inner().next().unwrap().as_str().into()
}

/// Creates a `HanoiError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> HanoiError {
    HanoiError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a given section has already been declared, ensuring uniqueness
/// for top-level sections.
fn check_unique_rule(rule: Rule, span: Span, seen: &mut HashSet<Rule>) -> Result<(), HanoiError> {
    if !matches!(rule, Rule::name | Rule::disks | Rule::moves) {
        return Ok(());
    };

    if seen.contains(&rule) {
        return Err(parse_error(
            &format!("Duplicate \"{rule:?}:\" declaration"),
            span,
        ));
    }

    seen.insert(rule);

    Ok(())
}

/// Checks if a required section is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, section: &str) -> Result<T, HanoiError> {
    value.ok_or_else(|| HanoiError::ValidationError(format!("Missing '{section}' section")))
}
