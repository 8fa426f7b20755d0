//! Factory: the store, namespace table and configuration every Object works against

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use super::error::{ObjectError, ObjectResult};
use super::notifier::Notifier;
use crate::config::FactoryConfig;
use crate::rdf::{
    BlankNode, NamespaceManager, RdfFormat, RdfObject, RdfParser, RdfPredicate, RdfSerializer,
    RdfStore, RdfSubject, Triple, TriplePattern,
};

/// Owner of the triple store used by [`Object`](super::Object) operations
///
/// The factory has no internal locking. Share it across threads only behind
/// an external lock.
pub struct Factory {
    store: RdfStore,
    namespaces: NamespaceManager,
    config: FactoryConfig,
    notifier: Option<Box<dyn Notifier>>,
    aggregating: bool,
}

impl Factory {
    /// Create a factory with the default configuration
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    /// Create a factory from a configuration
    pub fn with_config(config: FactoryConfig) -> Self {
        let mut namespaces = if config.default_prefixes {
            NamespaceManager::with_common_prefixes()
        } else {
            NamespaceManager::new()
        };
        for (prefix, iri) in &config.namespaces {
            namespaces.add_prefix(prefix.as_str(), iri.as_str());
        }

        Self {
            store: RdfStore::with_blank_prefix(config.blank_node_prefix.as_str()),
            namespaces,
            config,
            notifier: None,
            aggregating: false,
        }
    }

    /// Create a factory from a YAML configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> ObjectResult<Self> {
        Ok(Self::with_config(FactoryConfig::from_file(path)?))
    }

    /// Active configuration
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Install the notifier receiving every change made through this factory
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = Some(notifier);
    }

    /// Remove the installed notifier
    pub fn take_notifier(&mut self) -> Option<Box<dyn Notifier>> {
        self.notifier.take()
    }

    /// Whether an aggregated operation is running
    pub fn is_aggregating(&self) -> bool {
        self.aggregating
    }

    /// Run `op` as one aggregated operation
    ///
    /// Nested calls join the outer aggregation; the notifier hears
    /// `aggregation_finished` once, when the outermost call returns.
    pub fn aggregate<T>(&mut self, op: impl FnOnce(&mut Self) -> T) -> T {
        if self.aggregating {
            return op(self);
        }
        self.aggregating = true;
        let result = op(self);
        self.aggregating = false;
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.aggregation_finished();
        }
        result
    }

    /// Underlying triple store
    pub fn store(&self) -> &RdfStore {
        &self.store
    }

    /// Namespace table
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Register a namespace prefix; a later registration for the same prefix wins
    pub fn add_namespace_prefix(&mut self, prefix: &str, iri: &str) {
        debug!("Registering namespace prefix {} -> {}", prefix, iri);
        self.namespaces.add_prefix(prefix, iri);
    }

    /// Compact rendering of an IRI using the longest matching prefix
    pub fn qname(&self, iri: &str) -> String {
        self.namespaces.qname(iri)
    }

    /// Total statement count
    pub fn find_size(&self) -> usize {
        self.store.len()
    }

    /// Statements matching a pattern, any position may be a wildcard
    pub fn find(
        &self,
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> Vec<Triple> {
        self.store.query(&TriplePattern::new(
            subject.cloned(),
            predicate.cloned(),
            object.cloned(),
        ))
    }

    /// Add a statement; returns false if it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        match self.notifier.as_mut() {
            Some(notifier) => {
                if !self.store.add(triple.clone()) {
                    return false;
                }
                notifier.added(&triple);
                true
            }
            None => self.store.add(triple),
        }
    }

    /// Remove a statement; returns false if it was absent
    pub fn remove(&mut self, triple: &Triple) -> bool {
        if self.store.remove(triple).is_err() {
            return false;
        }
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.removed(triple);
        }
        true
    }

    /// Remove every statement matching a pattern; returns how many were removed
    pub fn remove_matching(
        &mut self,
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> usize {
        let removed = self.store.remove_matching(&TriplePattern::new(
            subject.cloned(),
            predicate.cloned(),
            object.cloned(),
        ));
        if let Some(notifier) = self.notifier.as_mut() {
            for triple in &removed {
                notifier.removed(triple);
            }
        }
        removed.len()
    }

    /// Check whether a statement exists
    pub fn contains(&self, triple: &Triple) -> bool {
        self.store.contains(triple)
    }

    /// Allocate a blank node unique within this factory's store
    pub fn create_blank_node(&mut self) -> BlankNode {
        self.store.create_blank_node()
    }

    /// Load an RDF document, detecting the format from the extension or content
    ///
    /// Returns the number of statements added. On error the store is left
    /// untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, base_iri: Option<&str>) -> ObjectResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ObjectError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(crate::rdf::ParseError::from)?;
        let format = RdfFormat::detect(path, &content);
        info!("Loading {} as {:?}", path.display(), format);
        self.load_from_str(&content, format, base_iri)
    }

    /// Load an RDF document held in memory
    pub fn load_from_str(&mut self, content: &str, format: RdfFormat, base_iri: Option<&str>) -> ObjectResult<usize> {
        let base_iri = base_iri.or(self.config.base_iri.as_deref());
        let triples = RdfParser::parse(content, format, base_iri)?;

        // Document blank node labels are local to the document
        let mut relabelled: HashMap<String, BlankNode> = HashMap::new();
        let added = self.aggregate(|f| {
            let mut added = 0;
            for triple in triples {
                let subject = match triple.subject {
                    RdfSubject::BlankNode(b) => RdfSubject::BlankNode(f.relabel(&mut relabelled, &b)),
                    named => named,
                };
                let object = match triple.object {
                    RdfObject::BlankNode(b) => RdfObject::BlankNode(f.relabel(&mut relabelled, &b)),
                    other => other,
                };
                if f.add(Triple::new(subject, triple.predicate, object)) {
                    added += 1;
                }
            }
            added
        });

        info!("Loaded {} statements ({} total)", added, self.store.len());
        Ok(added)
    }

    /// Serialize the whole store, format from the extension (Turtle when unknown)
    pub fn save_to_file(&self, path: impl AsRef<Path>, format: Option<RdfFormat>) -> ObjectResult<()> {
        let path = path.as_ref();
        let format = format
            .or_else(|| RdfFormat::from_path(path))
            .unwrap_or(RdfFormat::Turtle);
        let output = self.save_to_string(format)?;
        std::fs::write(path, output).map_err(crate::rdf::SerializeError::from)?;
        info!("Saved {} statements to {}", self.store.len(), path.display());
        Ok(())
    }

    /// Serialize the whole store to a string
    pub fn save_to_string(&self, format: RdfFormat) -> ObjectResult<String> {
        Ok(RdfSerializer::serialize_store(&self.store, format)?)
    }

    fn relabel(&mut self, relabelled: &mut HashMap<String, BlankNode>, node: &BlankNode) -> BlankNode {
        if let Some(fresh) = relabelled.get(node.as_str()) {
            return fresh.clone();
        }
        let fresh = self.store.create_blank_node();
        relabelled.insert(node.as_str().to_string(), fresh.clone());
        fresh
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("store", &self.store)
            .field("namespaces", &self.namespaces)
            .field("config", &self.config)
            .field("notifier", &self.notifier.is_some())
            .field("aggregating", &self.aggregating)
            .finish()
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::rdf;

    const DOC: &str = r#"
        @prefix ex: <http://example.org/> .
        ex:alice ex:knows _:x .
        _:x ex:name "Bob" .
    "#;

    #[test]
    fn test_config_namespaces() {
        let config = FactoryConfig {
            default_prefixes: false,
            ..FactoryConfig::default()
        }
        .with_namespace("ex", "http://example.org/");
        let f = Factory::with_config(config);

        assert_eq!(f.qname("http://example.org/alice"), "ex:alice");
        assert_eq!(f.qname(rdf::TYPE), rdf::TYPE);
        assert_eq!(Factory::new().qname(rdf::TYPE), "rdf:type");
    }

    #[test]
    fn test_load_relabels_blank_nodes_per_load() {
        let mut f = Factory::new();
        assert_eq!(f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap(), 2);
        assert_eq!(f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap(), 2);
        assert_eq!(f.find_size(), 4);

        let blanks: Vec<_> = f
            .store()
            .subjects()
            .into_iter()
            .filter(|s| s.is_blank_node())
            .collect();
        assert_eq!(blanks.len(), 2);
    }

    #[test]
    fn test_failed_load_leaves_store_untouched() {
        let mut f = Factory::new();
        f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap();

        let broken = "<http://example.org/a> <http://example.org/b> \"ok\" .\n<http://example.org/a> <broken";
        assert!(matches!(
            f.load_from_str(broken, RdfFormat::Turtle, None),
            Err(ObjectError::Parse(_))
        ));
        assert_eq!(f.find_size(), 2);
    }

    #[test]
    fn test_missing_file() {
        let mut f = Factory::new();
        let result = f.load_from_file("/definitely/not/here.ttl", None);
        assert!(matches!(result, Err(ObjectError::FileNotFound(_))));
    }

    #[test]
    fn test_unreadable_path() {
        let mut f = Factory::new();
        f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let result = f.load_from_file(dir.path(), None);
        assert!(matches!(result, Err(ObjectError::Parse(crate::rdf::ParseError::Io(_)))));
        assert_eq!(f.find_size(), 2);
    }

    #[test]
    fn test_config_base_iri() {
        let config = FactoryConfig {
            base_iri: Some("http://example.org/".to_string()),
            ..FactoryConfig::default()
        };
        let mut f = Factory::with_config(config);
        f.load_from_str("<a> <b> <c> .", RdfFormat::Turtle, None).unwrap();

        let triples = f.find(None, None, None);
        assert_eq!(triples[0].subject.as_str(), "http://example.org/a");
    }

    #[test]
    fn test_save_and_reload() {
        let mut f = Factory::new();
        f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.nt");
        f.save_to_file(&path, None).unwrap();

        let mut g = Factory::new();
        assert_eq!(g.load_from_file(&path, None).unwrap(), 2);
        assert_eq!(g.find_size(), f.find_size());
    }

    #[test]
    fn test_notifier_reports_changes_per_operation() {
        use crate::object::notifier::recording::RecordingNotifier;
        use crate::object::{Object, PropertyValue};

        let (notifier, log) = RecordingNotifier::new();
        let mut f = Factory::new();
        f.set_notifier(Box::new(notifier));

        let mut alice = Object::with_type("http://example.org/alice", "http://xmlns.com/foaf/0.1/Person").unwrap();
        let tags = [PropertyValue::from("a"), PropertyValue::from("b")];
        alice.set_property_value_list(&mut f, "http://example.org/tag", &tags, true).unwrap();
        {
            let log = log.lock().unwrap();
            // Type statement plus two reified values
            assert_eq!(log.added.len(), 11);
            assert!(log.removed.is_empty());
            assert_eq!(log.aggregations, 1);
        }

        f.aggregate(|f| {
            alice.add_property_value(f, "http://example.org/nick", "Al", false).unwrap();
            alice.add_property_value(f, "http://example.org/nick", "Ally", false).unwrap();
            assert!(f.is_aggregating());
        });
        assert!(!f.is_aggregating());
        assert_eq!(log.lock().unwrap().aggregations, 2);

        alice.remove(&mut f, true);
        {
            let log = log.lock().unwrap();
            assert_eq!(log.removed.len(), 13);
            assert_eq!(log.aggregations, 3);
        }
        assert_eq!(f.find_size(), 0);

        f.load_from_str(DOC, RdfFormat::Turtle, None).unwrap();
        assert_eq!(log.lock().unwrap().added.len(), 15);

        assert!(f.take_notifier().is_some());
        f.remove_matching(None, None, None);
        assert_eq!(log.lock().unwrap().removed.len(), 13);
    }

    #[test]
    fn test_blank_prefix_from_config() {
        let config = FactoryConfig {
            blank_node_prefix: "node".to_string(),
            ..FactoryConfig::default()
        };
        let mut f = Factory::with_config(config);
        assert!(f.create_blank_node().as_str().starts_with("node"));
    }
}
