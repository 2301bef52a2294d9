//! SHACL validation engine
//!
//! This module provides the core validation logic for checking RDF data
//! against SHACL shapes.
//!
//! A run walks the active shapes in declaration order, each shape's focus
//! nodes in target order and each shape's constraints in declaration order,
//! appending results as it goes. Shape-based constraints (`sh:not`,
//! `sh:and`, `sh:or`, `sh:xone`, `sh:node`, `sh:property`,
//! `sh:qualifiedValueShape`) evaluate other shapes on the value nodes. Each
//! nested evaluation is keyed by (shape id, focus node id); re-entering a key
//! that is still being evaluated aborts the run with
//! `ShaclError::CyclicShapeReference` instead of looping.

use crate::constraints::cardinality::{validate_count, validate_qualified_count, CountBound};
use crate::constraints::closed::validate_closed;
use crate::constraints::datatype::{validate_class, validate_datatype, validate_node_kind};
use crate::constraints::language::{validate_language_in, validate_unique_lang};
use crate::constraints::pair::{
    validate_disjoint, validate_equals, validate_less_than, validate_less_than_or_equals,
};
use crate::constraints::pattern::{validate_max_length, validate_min_length, validate_pattern};
use crate::constraints::value::{validate_has_value, validate_in, validate_range, RangeBound};
use crate::constraints::{Constraint, ConstraintComponent, ConstraintViolation};
use crate::error::{Result, ShaclError};
use crate::options::ValidationOptions;
use crate::report::{ValidationReport, ValidationResult};
use crate::shape::{Severity, Shape};
use crate::shapes_graph::ShapesGraph;
use hashbrown::HashSet;
use tessera_graph::{Graph, SharedGraph, Term, TermId};
use tracing::{debug, debug_span, trace, warn};

/// SHACL validation engine
///
/// Borrows the shapes graph; the data graph is borrowed per run and never
/// mutated, so one validator can serve any number of runs.
#[derive(Debug, Clone)]
pub struct Validator<'s> {
    shapes: &'s ShapesGraph,
    options: ValidationOptions,
}

impl<'s> Validator<'s> {
    pub fn new(shapes: &'s ShapesGraph) -> Self {
        Self {
            shapes,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn shapes(&self) -> &ShapesGraph {
        self.shapes
    }

    /// Validate all focus nodes targeted by shapes
    ///
    /// Fails without a report when a shape refers to an unknown shape, when
    /// shape references form a cycle on the data, or when nesting exceeds
    /// `max_recursion_depth`.
    pub fn validate(&self, data: &Graph) -> Result<ValidationReport> {
        let span = debug_span!(
            "shacl_validate",
            shapes = self.shapes.len(),
            triples = data.len()
        );
        let _enter = span.enter();
        self.run(data, |shape| shape.focus_nodes(data))
    }

    /// Validate one focus node against every active shape that targets it
    ///
    /// Meant for hosts re-checking a single changed subject; results match
    /// the part of a full run that concerns `focus`.
    pub fn validate_node(&self, data: &Graph, focus: &Term) -> Result<ValidationReport> {
        let span = debug_span!(
            "shacl_validate_node",
            focus = %focus,
            shapes = self.shapes.len()
        );
        let _enter = span.enter();
        self.run(data, |shape| {
            if shape.targets_node(data, focus) {
                vec![focus.clone()]
            } else {
                Vec::new()
            }
        })
    }

    /// Validate, failing with `ShaclError::ValidationFailed` unless the data conforms
    ///
    /// The error carries at most `failure_detail_limit` result descriptions.
    pub fn check(&self, data: &Graph) -> Result<ValidationReport> {
        self.validate(data)?
            .into_result(self.options.failure_detail_limit)
    }

    /// Validate a shared graph under its read lock
    pub fn validate_shared(&self, data: &SharedGraph) -> Result<ValidationReport> {
        let guard = data.read();
        self.validate(&guard)
    }

    fn run<F>(&self, data: &Graph, focus_nodes: F) -> Result<ValidationReport>
    where
        F: FnMut(&Shape) -> Vec<Term>,
    {
        match self.collect(data, focus_nodes) {
            Ok(results) => {
                let report = ValidationReport::new(results);
                debug!(
                    conforms = report.conforms,
                    results = report.results.len(),
                    "validation complete"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "validation aborted");
                Err(e)
            }
        }
    }

    fn collect<F>(&self, data: &Graph, mut focus_nodes: F) -> Result<Vec<ValidationResult>>
    where
        F: FnMut(&Shape) -> Vec<Term>,
    {
        self.shapes.check_references()?;

        let mut eval = Evaluation::new(self.shapes, data, &self.options);
        let mut results = Vec::new();
        for shape in self.shapes.shapes() {
            if shape.is_deactivated() && !self.options.include_deactivated {
                debug!(shape = %shape.id(), "skipping deactivated shape");
                continue;
            }
            let nodes = focus_nodes(shape);
            debug!(shape = %shape.id(), focus_nodes = nodes.len(), "validating shape");
            for focus in &nodes {
                results.extend(eval.guarded(shape, focus)?);
            }
        }
        Ok(results)
    }
}

/// State of one validation run
struct Evaluation<'a> {
    shapes: &'a ShapesGraph,
    data: &'a Graph,
    options: &'a ValidationOptions,
    /// (shape, focus) pairs on the current evaluation chain
    visiting: HashSet<(TermId, TermId)>,
    depth: usize,
}

impl<'a> Evaluation<'a> {
    fn new(shapes: &'a ShapesGraph, data: &'a Graph, options: &'a ValidationOptions) -> Self {
        Self {
            shapes,
            data,
            options,
            visiting: HashSet::new(),
            depth: 0,
        }
    }

    /// Validate `focus` against `shape`, guarding against cycles and depth
    fn guarded(&mut self, shape: &'a Shape, focus: &Term) -> Result<Vec<ValidationResult>> {
        let key = (shape.id().id(), focus.id());
        if self.visiting.contains(&key) {
            warn!(shape = %shape.id(), focus = %focus, "cyclic shape reference");
            return Err(ShaclError::CyclicShapeReference {
                shape_id: shape.id().clone(),
                focus_node: focus.clone(),
            });
        }
        // depth counts the frames already active; the top level is 0
        if self.depth > self.options.max_recursion_depth {
            return Err(ShaclError::RecursionLimit {
                shape_id: shape.id().clone(),
                limit: self.options.max_recursion_depth,
            });
        }

        self.visiting.insert(key);
        self.depth += 1;
        let outcome = self.validate_shape(shape, focus);
        self.depth -= 1;
        self.visiting.remove(&key);
        outcome
    }

    fn validate_shape(&mut self, shape: &'a Shape, focus: &Term) -> Result<Vec<ValidationResult>> {
        let values = shape.value_nodes(self.data, focus);
        let mut results = Vec::new();
        for constraint in shape.constraints() {
            trace!(
                shape = %shape.id(),
                focus = %focus,
                constraint = %constraint.description(),
                values = values.len(),
                "evaluating constraint"
            );
            results.extend(self.evaluate_constraint(shape, constraint, focus, &values)?);
        }
        Ok(results)
    }

    fn evaluate_constraint(
        &mut self,
        shape: &'a Shape,
        constraint: &'a Constraint,
        focus: &Term,
        values: &[Term],
    ) -> Result<Vec<ValidationResult>> {
        let data = self.data;
        let violations: Vec<ConstraintViolation> = match constraint {
            Constraint::Class(class) => values
                .iter()
                .filter_map(|v| validate_class(data, v, class))
                .collect(),
            Constraint::Datatype(dt) => values
                .iter()
                .filter_map(|v| validate_datatype(v, dt))
                .collect(),
            Constraint::NodeKind(kind) => values
                .iter()
                .filter_map(|v| validate_node_kind(v, *kind))
                .collect(),
            Constraint::MinCount(min) => {
                validate_count(values.len(), CountBound::Min(*min)).into_iter().collect()
            }
            Constraint::MaxCount(max) => {
                validate_count(values.len(), CountBound::Max(*max)).into_iter().collect()
            }
            Constraint::MinExclusive(bound) => range(values, bound, RangeBound::MinExclusive),
            Constraint::MinInclusive(bound) => range(values, bound, RangeBound::MinInclusive),
            Constraint::MaxExclusive(bound) => range(values, bound, RangeBound::MaxExclusive),
            Constraint::MaxInclusive(bound) => range(values, bound, RangeBound::MaxInclusive),
            Constraint::MinLength(min) => values
                .iter()
                .filter_map(|v| validate_min_length(v, *min))
                .collect(),
            Constraint::MaxLength(max) => values
                .iter()
                .filter_map(|v| validate_max_length(v, *max))
                .collect(),
            Constraint::Pattern(pattern) => values
                .iter()
                .filter_map(|v| validate_pattern(v, pattern))
                .collect(),
            Constraint::LanguageIn(ranges) => values
                .iter()
                .filter_map(|v| validate_language_in(v, ranges))
                .collect(),
            Constraint::UniqueLang(true) => validate_unique_lang(values),
            Constraint::UniqueLang(false) => Vec::new(),
            Constraint::In(allowed) => values
                .iter()
                .filter_map(|v| validate_in(v, allowed))
                .collect(),
            Constraint::HasValue(required) => {
                validate_has_value(values, required).into_iter().collect()
            }
            Constraint::Equals(p) => validate_equals(values, &self.objects(focus, p), p),
            Constraint::Disjoint(p) => validate_disjoint(values, &self.objects(focus, p), p),
            Constraint::LessThan(p) => validate_less_than(values, &self.objects(focus, p), p),
            Constraint::LessThanOrEquals(p) => {
                validate_less_than_or_equals(values, &self.objects(focus, p), p)
            }
            Constraint::Not(negated) => {
                let negated = self.resolve(shape, negated)?;
                self.each_value(values, |eval, v| {
                    Ok(eval.conforms(negated, v)?.then(|| {
                        ConstraintViolation::new(
                            ConstraintComponent::Not,
                            Some(v.clone()),
                            format!(
                                "Value {} conforms to shape {} given in sh:not",
                                v,
                                negated.id()
                            ),
                        )
                    }))
                })?
            }
            Constraint::And(members) => {
                let members = self.resolve_all(shape, members)?;
                self.each_value(values, |eval, v| {
                    for &member in &members {
                        if !eval.conforms(member, v)? {
                            return Ok(Some(ConstraintViolation::new(
                                ConstraintComponent::And,
                                Some(v.clone()),
                                format!(
                                    "Value {} does not conform to shape {} in sh:and",
                                    v,
                                    member.id()
                                ),
                            )));
                        }
                    }
                    Ok(None)
                })?
            }
            Constraint::Or(members) => {
                let members = self.resolve_all(shape, members)?;
                self.each_value(values, |eval, v| {
                    for &member in &members {
                        if eval.conforms(member, v)? {
                            return Ok(None);
                        }
                    }
                    Ok(Some(ConstraintViolation::new(
                        ConstraintComponent::Or,
                        Some(v.clone()),
                        format!("Value {} does not conform to any shape in sh:or", v),
                    )))
                })?
            }
            Constraint::Xone(members) => {
                let members = self.resolve_all(shape, members)?;
                self.each_value(values, |eval, v| {
                    let mut conforming = 0;
                    for &member in &members {
                        if eval.conforms(member, v)? {
                            conforming += 1;
                        }
                    }
                    Ok((conforming != 1).then(|| {
                        ConstraintViolation::new(
                            ConstraintComponent::Xone,
                            Some(v.clone()),
                            format!(
                                "Value {} conforms to {} shapes in sh:xone, expected exactly one",
                                v, conforming
                            ),
                        )
                    }))
                })?
            }
            Constraint::Node(node_shape) => {
                let node_shape = self.resolve(shape, node_shape)?;
                self.each_value(values, |eval, v| {
                    Ok((!eval.conforms(node_shape, v)?).then(|| {
                        ConstraintViolation::new(
                            ConstraintComponent::Node,
                            Some(v.clone()),
                            format!(
                                "Value {} does not conform to shape {} given in sh:node",
                                v,
                                node_shape.id()
                            ),
                        )
                    }))
                })?
            }
            Constraint::Property(property_shape) => {
                // Nested results keep their own source shape and path
                let property_shape = self.resolve(shape, property_shape)?;
                if !self.is_active(property_shape) {
                    return Ok(Vec::new());
                }
                let mut nested = Vec::new();
                for v in values {
                    nested.extend(self.guarded(property_shape, v)?);
                }
                return Ok(nested);
            }
            Constraint::QualifiedValueShape {
                shape: qualified,
                min_count,
                max_count,
                disjoint,
            } => {
                let target = self.resolve(shape, qualified)?;
                let siblings = if *disjoint {
                    let ids = self.shapes.sibling_qualified_shapes(shape.id(), qualified);
                    self.resolve_all(shape, &ids)?
                } else {
                    Vec::new()
                };

                let mut conforming = 0;
                'values: for v in values {
                    if !self.conforms(target, v)? {
                        continue;
                    }
                    for &sibling in &siblings {
                        if self.conforms(sibling, v)? {
                            continue 'values;
                        }
                    }
                    conforming += 1;
                }
                [min_count.map(CountBound::Min), max_count.map(CountBound::Max)]
                    .into_iter()
                    .flatten()
                    .filter_map(|bound| validate_qualified_count(conforming, bound, target.id()))
                    .collect()
            }
            Constraint::Closed { ignored_properties } => {
                let declared = self.declared_properties(shape);
                values
                    .iter()
                    .flat_map(|v| validate_closed(data, v, &declared, ignored_properties))
                    .collect()
            }
        };

        Ok(violations
            .into_iter()
            .map(|v| to_result(shape, focus, v))
            .collect())
    }

    /// A node conforms when validating it yields no Violation-severity result
    ///
    /// Inactive shapes conform.
    fn conforms(&mut self, shape: &'a Shape, node: &Term) -> Result<bool> {
        if !self.is_active(shape) {
            return Ok(true);
        }
        let results = self.guarded(shape, node)?;
        Ok(results.iter().all(|r| r.severity != Severity::Violation))
    }

    fn is_active(&self, shape: &Shape) -> bool {
        if shape.is_deactivated() && !self.options.include_deactivated {
            warn!(shape = %shape.id(), "referenced shape is deactivated, treating as conforming");
            return false;
        }
        true
    }

    fn each_value<F>(&mut self, values: &[Term], mut check: F) -> Result<Vec<ConstraintViolation>>
    where
        F: FnMut(&mut Self, &Term) -> Result<Option<ConstraintViolation>>,
    {
        let mut out = Vec::new();
        for v in values {
            if let Some(violation) = check(self, v)? {
                out.push(violation);
            }
        }
        Ok(out)
    }

    fn resolve(&self, referrer: &Shape, id: &Term) -> Result<&'a Shape> {
        let shapes: &'a ShapesGraph = self.shapes;
        shapes
            .shape(id)
            .ok_or_else(|| ShaclError::UnknownShapeReference {
                referrer: referrer.id().clone(),
                referenced: id.clone(),
            })
    }

    fn resolve_all(&self, referrer: &Shape, ids: &[Term]) -> Result<Vec<&'a Shape>> {
        ids.iter().map(|id| self.resolve(referrer, id)).collect()
    }

    /// Distinct objects of `focus predicate ?o` across all contexts
    fn objects(&self, focus: &Term, predicate: &Term) -> Vec<Term> {
        if focus.is_literal() {
            return Vec::new();
        }
        let mut seen: HashSet<&Term> = HashSet::new();
        self.data
            .objects(focus, predicate)
            .filter(|o| seen.insert(*o))
            .cloned()
            .collect()
    }

    /// Predicates of the simple paths of `shape`'s property shapes
    fn declared_properties(&self, shape: &Shape) -> Vec<Term> {
        shape
            .constraints()
            .iter()
            .filter_map(|c| match c {
                Constraint::Property(id) => self.shapes.shape(id),
                _ => None,
            })
            .filter_map(|p| p.path().and_then(|path| path.as_predicate()))
            .cloned()
            .collect()
    }
}

fn range(values: &[Term], bound: &Term, kind: RangeBound) -> Vec<ConstraintViolation> {
    values
        .iter()
        .filter_map(|v| validate_range(v, bound, kind))
        .collect()
}

/// Attach focus, shape, severity, path and messages to a violation
///
/// The shape's own `sh:message`s, when present, replace the default one.
fn to_result(shape: &Shape, focus: &Term, violation: ConstraintViolation) -> ValidationResult {
    let messages = if shape.messages().is_empty() {
        vec![violation.message]
    } else {
        shape.messages().to_vec()
    };
    ValidationResult {
        severity: shape.severity(),
        focus_node: focus.clone(),
        value: violation.value,
        path: violation.path.or_else(|| shape.path().cloned()),
        source_constraint_component: violation.component,
        source_shape: shape.id().clone(),
        messages,
    }
}
