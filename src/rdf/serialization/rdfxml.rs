//! RDF/XML format implementation

use super::{convert_triple, with_rio_triple, ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Triple;
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_xml::{RdfXmlFormatter, RdfXmlParser};
use std::io::{BufReader, Cursor};

/// RDF/XML parser
pub struct RdfXmlParserWrapper;

impl RdfXmlParserWrapper {
    /// Parse RDF/XML string to Triples
    pub fn parse(input: &str, base_iri: Option<Iri<String>>) -> ParseResult<Vec<Triple>> {
        let reader = BufReader::new(Cursor::new(input));
        let mut parser = RdfXmlParser::new(reader, base_iri);

        let mut triples = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            triples.push(convert_triple(t)?);
            Ok(())
        })?;

        Ok(triples)
    }
}

/// RDF/XML serializer
pub struct RdfXmlSerializerWrapper;

impl RdfXmlSerializerWrapper {
    /// Serialize Triples to an RDF/XML document
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = RdfXmlFormatter::with_indentation(&mut output, 2)?;

        for triple in triples {
            with_rio_triple(triple, |t| formatter.format(t))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter.finish()?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}
