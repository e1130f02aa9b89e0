use super::{error::Result, GspGraph};
use itertools::Itertools;
use pest::{iterators::Pair, Parser, Span};
use pest_derive::Parser;
use std::str::FromStr;

pub type GspRule = Rule;

#[derive(Parser)]
#[grammar = "gsp/grammar.pest"]
struct GspParser;

/// Parses every graph of a GSP file.
///
/// Vertex ids must count up from 0 within each graph, and edges may only
/// join distinct vertices already declared, at most once per pair.
pub fn parse(input: &str) -> Result<Vec<GspGraph>> {
    let mut graphs: Vec<GspGraph> = vec![];
    for pair in GspParser::parse(Rule::file, input)? {
        let span = pair.as_span();
        match pair.as_rule() {
            Rule::header => {
                let id = parse_int(pair.into_inner().next().unwrap())?;
                graphs.push(GspGraph::new(id));
            }
            Rule::vertex => {
                let graph = current(&mut graphs, &span)?;
                let (id, label) = pair.into_inner().next_tuple().unwrap();
                if parse_int::<usize>(id)? != graph.vertices.len() {
                    return Err(custom_error("vertex ids must be consecutive from 0", span));
                }
                graph.vertices.push(parse_int(label)?);
            }
            Rule::edge => {
                let graph = current(&mut graphs, &span)?;
                let (from, to, label) = pair.into_inner().next_tuple().unwrap();
                let (from, to): (usize, usize) = (parse_int(from)?, parse_int(to)?);
                if from.max(to) >= graph.vertices.len() {
                    return Err(custom_error("unknown vertex", span));
                }
                if from == to {
                    return Err(custom_error("self loop", span));
                }
                if graph.has_edge(from, to) {
                    return Err(custom_error("duplicate edge", span));
                }
                graph.edges.push((from, to, parse_int(label)?));
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(graphs)
}

fn current<'g>(graphs: &'g mut Vec<GspGraph>, span: &Span) -> Result<&'g mut GspGraph> {
    match graphs.last_mut() {
        Some(graph) => Ok(graph),
        None => Err(custom_error("missing graph header", span.clone())),
    }
}

fn parse_int<T: FromStr>(pair: Pair<Rule>) -> Result<T> {
    pair.as_str()
        .parse()
        .map_err(|_| custom_error("number out of range", pair.as_span()))
}

fn custom_error(message: &str, span: Span) -> pest::error::Error<GspRule> {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: String::from(message),
        },
        span,
    )
}
