//! Validation results and reports

use crate::constraints::ConstraintComponent;
use crate::error::{Result, ShaclError};
use crate::export::BlankNodes;
use crate::path::PropertyPath;
use crate::shape::Severity;
use serde::Serialize;
use std::fmt;
use tessera_graph::{Graph, Term, Triple};
use tessera_vocab::{rdf, shacl};

/// Individual validation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Severity level, taken from the shape that owns the constraint
    pub severity: Severity,
    /// The focus node that was validated
    pub focus_node: Term,
    /// The value that caused the violation (absent for cardinality-style results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Term>,
    /// The property path (absent for node shapes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PropertyPath>,
    /// The constraint component that produced this result
    pub source_constraint_component: ConstraintComponent,
    /// The shape that produced this result
    pub source_shape: Term,
    /// Human-readable messages
    pub messages: Vec<String>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node {}: ", self.focus_node)?;
        if let Some(path) = &self.path {
            write!(f, "property {}: ", path)?;
        }
        f.write_str(&self.messages.join("; "))
    }
}

/// SHACL validation report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether all shapes conform (no Violation-level results)
    pub conforms: bool,
    /// Individual validation results
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Build a report; `conforms` is derived from the results
    pub fn new(results: Vec<ValidationResult>) -> Self {
        let conforms = results.iter().all(|r| r.severity != Severity::Violation);
        Self { conforms, results }
    }

    /// Create an empty conforming report
    pub fn conforming() -> Self {
        Self::new(Vec::new())
    }

    /// Count violations (Severity::Violation results)
    pub fn violation_count(&self) -> usize {
        self.count(Severity::Violation)
    }

    /// Count warnings (Severity::Warning results)
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Turn a non-conforming report into `ShaclError::ValidationFailed`
    ///
    /// The error carries the first `detail_limit` violations, rendered as
    /// `Node <focus>: property <path>: <message>`.
    pub fn into_result(self, detail_limit: usize) -> Result<Self> {
        if self.conforms {
            return Ok(self);
        }
        let details: Vec<String> = self
            .results
            .iter()
            .filter(|r| r.severity == Severity::Violation)
            .take(detail_limit)
            .map(ToString::to_string)
            .collect();

        Err(ShaclError::ValidationFailed {
            violation_count: self.violation_count(),
            warning_count: self.warning_count(),
            details,
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Export using the SHACL report vocabulary
    ///
    /// The report and each result are blank nodes; paths are written in SHACL
    /// path syntax. Generated labels avoid every blank node the results mention.
    pub fn to_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();
        let mut blanks = BlankNodes::new("r");
        for result in &self.results {
            blanks.reserve(
                [&result.focus_node, &result.source_shape]
                    .into_iter()
                    .chain(result.value.as_ref()),
            );
        }
        let report = blanks.fresh()?;

        fn add(graph: &mut Graph, s: &Term, p: &'static str, o: Term) -> Result<()> {
            graph.add(Triple::new(s.clone(), Term::vocab(p), o)?);
            Ok(())
        }

        add(
            &mut graph,
            &report,
            rdf::TYPE,
            Term::vocab(shacl::VALIDATION_REPORT),
        )?;
        add(&mut graph, &report, shacl::CONFORMS, Term::boolean(self.conforms))?;

        for result in &self.results {
            let node = blanks.fresh()?;
            add(&mut graph, &report, shacl::RESULT, node.clone())?;
            add(
                &mut graph,
                &node,
                rdf::TYPE,
                Term::vocab(shacl::VALIDATION_RESULT),
            )?;
            add(&mut graph, &node, shacl::FOCUS_NODE, result.focus_node.clone())?;
            if let Some(path) = &result.path {
                let path_node = path.write_to(&mut graph, &mut blanks)?;
                add(&mut graph, &node, shacl::RESULT_PATH, path_node)?;
            }
            if let Some(value) = &result.value {
                add(&mut graph, &node, shacl::VALUE, value.clone())?;
            }
            add(
                &mut graph,
                &node,
                shacl::RESULT_SEVERITY,
                result.severity.term(),
            )?;
            add(
                &mut graph,
                &node,
                shacl::SOURCE_CONSTRAINT_COMPONENT,
                result.source_constraint_component.term(),
            )?;
            add(&mut graph, &node, shacl::SOURCE_SHAPE, result.source_shape.clone())?;
            for message in &result.messages {
                add(&mut graph, &node, shacl::RESULT_MESSAGE, Term::string(message))?;
            }
        }
        Ok(graph)
    }
}
