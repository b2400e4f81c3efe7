//! Parse pest pairs into length literals and interval records

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::errors::AnnotateError;
use crate::genome::{GenomicInterval, IntervalPair};
use crate::types::{Unit, check_finite};
use crate::{HicpageParser, Rule};

/// A parsed length literal; the unit is absent for bare numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthLiteral {
    pub value: f64,
    pub unit: Option<Unit>,
}

/// Parse a length literal such as `1.5in`, `3 cm` or `42`
pub fn parse_length(source: &str) -> Result<LengthLiteral, AnnotateError> {
    let pairs = HicpageParser::parse(Rule::length, source).map_err(|e| {
        AnnotateError::MalformedLength {
            src: NamedSource::new("<length>", source.to_string()),
            span: error_span(&e, source),
        }
    })?;

    let mut value = None;
    let mut unit = None;
    for pair in pairs.flat_map(|p| p.into_inner()) {
        match pair.as_rule() {
            Rule::number => value = Some(parse_number(&pair, source)?),
            Rule::unit => unit = Some(pair.as_str().parse::<Unit>()?),
            _ => {}
        }
    }

    let value = value.ok_or_else(|| AnnotateError::MalformedLength {
        src: NamedSource::new("<length>", source.to_string()),
        span: (0, source.len()).into(),
    })?;
    Ok(LengthLiteral { value, unit })
}

fn parse_number(pair: &Pair<Rule>, source: &str) -> Result<f64, AnnotateError> {
    let raw = pair.as_str();
    let n: f64 = raw.parse().map_err(|_| AnnotateError::MalformedLength {
        src: NamedSource::new("<length>", source.to_string()),
        span: span_of(pair),
    })?;
    check_finite(n).map_err(|source| AnnotateError::InvalidNumber {
        what: "length",
        source,
    })
}

/// Parse whitespace-separated BEDPE rows.
///
/// Only the first six columns are read; extra columns, `#` comments and
/// blank lines are skipped.
pub fn parse_bedpe(name: &str, source: &str) -> Result<Vec<IntervalPair>, AnnotateError> {
    let pairs = HicpageParser::parse(Rule::bedpe, source).map_err(|e| {
        AnnotateError::MalformedTable {
            message: "expected chrom1 start1 end1 chrom2 start2 end2".to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: error_span(&e, source),
        }
    })?;

    let table_error = |message: &str, span: SourceSpan| AnnotateError::MalformedTable {
        message: message.to_string(),
        src: NamedSource::new(name, source.to_string()),
        span,
    };

    let mut records = Vec::new();
    for record in pairs
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::record)
    {
        let span = span_of(&record);
        let mut chroms = Vec::with_capacity(2);
        let mut coords = Vec::with_capacity(4);
        for part in record.into_inner() {
            match part.as_rule() {
                Rule::field if chroms.len() < 2 && coords.len() == chroms.len() * 2 => {
                    chroms.push(part.as_str().to_string());
                }
                Rule::coord => {
                    let v = part
                        .as_str()
                        .parse::<u64>()
                        .map_err(|_| table_error("coordinate out of range", span_of(&part)))?;
                    coords.push(v);
                }
                _ => {}
            }
        }

        let &[start1, end1, start2, end2] = coords.as_slice() else {
            return Err(table_error("expected four coordinates", span));
        };
        let [chrom1, chrom2] = <[String; 2]>::try_from(chroms)
            .map_err(|_| table_error("expected two chromosome names", span))?;
        if start1 > end1 || start2 > end2 {
            return Err(table_error("interval starts after it ends", span));
        }

        records.push(IntervalPair::new(
            GenomicInterval::new(chrom1, start1, end1),
            GenomicInterval::new(chrom2, start2, end2),
        ));
    }

    crate::log::debug!(rows = records.len(), table = name, "parsed bedpe");
    Ok(records)
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn error_span(e: &pest::error::Error<Rule>, source: &str) -> SourceSpan {
    match e.location {
        InputLocation::Pos(p) => {
            let end = source[p..].find('\n').map(|i| p + i).unwrap_or(source.len());
            (p, end - p).into()
        }
        InputLocation::Span((start, end)) => (start, end - start).into(),
    }
}
