//! The set of shapes a validation run uses
//!
//! Shapes are kept in declaration order, which is the order results are
//! reported in, and indexed by identifying term for reference resolution.

use crate::constraints::Constraint;
use crate::error::{Result, ShaclError};
use crate::report::ValidationReport;
use crate::shape::Shape;
use crate::target::Target;
use crate::validate::Validator;
use hashbrown::HashMap;
use tessera_graph::{Graph, Term};
use tracing::debug;

/// An ordered collection of shapes with O(1) lookup by id
#[derive(Debug, Clone)]
pub struct ShapesGraph {
    id: Term,
    shapes: Vec<Shape>,
    /// Index: shape id -> position in `shapes`
    index: HashMap<Term, usize>,
}

impl ShapesGraph {
    pub fn new(id: Term) -> Self {
        Self {
            id,
            shapes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build from shapes in order, rejecting duplicate ids
    pub fn from_shapes(id: Term, shapes: impl IntoIterator<Item = Shape>) -> Result<Self> {
        let mut graph = Self::new(id);
        for shape in shapes {
            graph.add_shape(shape)?;
        }
        Ok(graph)
    }

    pub fn id(&self) -> &Term {
        &self.id
    }

    /// Add a shape; its id must not already be taken
    ///
    /// An implicit class target must name the shape itself.
    pub fn add_shape(&mut self, shape: Shape) -> Result<&mut Self> {
        if self.index.contains_key(shape.id()) {
            return Err(ShaclError::DuplicateShape(shape.id().clone()));
        }
        for target in shape.targets() {
            if let Target::ImplicitClass(class) = target {
                if class != shape.id() {
                    return Err(ShaclError::invalid_shape(
                        shape.id(),
                        format!("implicit class target {} is not the shape itself", class),
                    ));
                }
            }
        }
        self.index.insert(shape.id().clone(), self.shapes.len());
        self.shapes.push(shape);
        Ok(self)
    }

    pub fn shape(&self, id: &Term) -> Option<&Shape> {
        self.index.get(id).map(|&i| &self.shapes[i])
    }

    /// Mutable access, for adding constraints after registration
    pub fn shape_mut(&mut self, id: &Term) -> Option<&mut Shape> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.shapes[i]),
            None => None,
        }
    }

    /// All shapes in declaration order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn contains(&self, id: &Term) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check that every shape a constraint refers to exists
    ///
    /// `sh:property` must also point at a property shape.
    pub fn check_references(&self) -> Result<()> {
        for shape in &self.shapes {
            for constraint in shape.constraints() {
                for referenced in constraint.referenced_shapes() {
                    let Some(target) = self.shape(referenced) else {
                        return Err(ShaclError::UnknownShapeReference {
                            referrer: shape.id().clone(),
                            referenced: referenced.clone(),
                        });
                    };
                    if matches!(constraint, Constraint::Property(_)) && !target.is_property_shape()
                    {
                        return Err(ShaclError::invalid_shape(
                            shape.id(),
                            format!("sh:property {} is not a property shape", referenced),
                        ));
                    }
                }
            }
        }
        debug!(shapes = self.shapes.len(), "shape references resolved");
        Ok(())
    }

    /// Qualified value shapes declared next to `property_shape`
    ///
    /// Siblings are the `sh:qualifiedValueShape`s of the other property
    /// shapes attached (via `sh:property`) to the same parent shapes.
    /// `own` is excluded.
    pub fn sibling_qualified_shapes(&self, property_shape: &Term, own: &Term) -> Vec<Term> {
        let mut siblings: Vec<Term> = Vec::new();
        let parents = self.shapes.iter().filter(|s| {
            s.constraints()
                .iter()
                .any(|c| matches!(c, Constraint::Property(p) if p == property_shape))
        });
        for parent in parents {
            let properties = parent.constraints().iter().filter_map(|c| match c {
                Constraint::Property(p) => self.shape(p),
                _ => None,
            });
            for sibling in properties {
                for c in sibling.constraints() {
                    if let Constraint::QualifiedValueShape { shape, .. } = c {
                        if shape != own && !siblings.contains(shape) {
                            siblings.push(shape.clone());
                        }
                    }
                }
            }
        }
        siblings
    }

    /// Validate `data` with default options
    pub fn validate(&self, data: &Graph) -> Result<ValidationReport> {
        Validator::new(self).validate(data)
    }
}
