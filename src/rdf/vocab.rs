//! Vocabulary IRIs used by the object layer

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:Statement IRI (class of reification resources)
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";

    /// rdf:subject IRI
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";

    /// rdf:predicate IRI
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";

    /// rdf:object IRI
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Ordering annotation carried by reification resources of ordered values
pub mod order {
    /// Namespace of the ordering annotation
    pub const NS: &str = "http://github.com/ariadnext/AutoRDF#";

    /// Position (xsd:integer, starting at 1) of an ordered value
    pub const ORDER: &str = "http://github.com/ariadnext/AutoRDF#order";
}
