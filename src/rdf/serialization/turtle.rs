//! Turtle and N-Triples format implementation

use super::{convert_triple, with_rio_triple, ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Triple;
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse Turtle string to Triples
    pub fn parse(input: &str, base_iri: Option<Iri<String>>) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        let mut parser = TurtleParser::new(&mut reader, base_iri);

        let mut triples = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            triples.push(convert_triple(t)?);
            Ok(())
        })?;

        Ok(triples)
    }
}

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    /// Parse N-Triples string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        let mut parser = NTriplesParser::new(&mut reader);

        let mut triples = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            triples.push(convert_triple(t)?);
            Ok(())
        })?;

        Ok(triples)
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);

        for triple in triples {
            with_rio_triple(triple, |t| formatter.format(t))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Serialize Triples to N-Triples string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut output = Vec::new();
        {
            let mut formatter = NTriplesFormatter::new(&mut output);
            for triple in triples {
                with_rio_triple(triple, |t| formatter.format(t))
                    .map_err(|e| SerializeError::Serialize(e.to_string()))?;
            }
        }

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}
