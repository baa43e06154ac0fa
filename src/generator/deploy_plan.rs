use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::classifier::markers::{
    is_sql_aggregate, is_sql_function, is_sql_trigger, is_sql_type, resolved_aggregate_name,
    resolved_name, resolved_trigger_name,
};
use crate::error::PoetError;
use crate::generator::declarations::{DdlComposer, INPUT_METHOD, OUTPUT_METHOD};
use crate::metadata::descriptors::{Library, TypeDefinition};

/// What a planned declaration registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Composite scalar type (shell, conversion functions, binding).
    Type,
    /// Aggregate (step function and `CREATE AGGREGATE`).
    Aggregate,
    /// Callable function.
    Function,
    /// Trigger function.
    Trigger,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Type => write!(f, "type"),
            DeclarationKind::Aggregate => write!(f, "aggregate"),
            DeclarationKind::Function => write!(f, "function"),
            DeclarationKind::Trigger => write!(f, "trigger"),
        }
    }
}

/// Outcome for a single SQL-visible candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    /// What the declaration registers.
    pub kind: DeclarationKind,
    /// Qualified type name or dispatch handle the item was derived from.
    pub source: String,
    /// SQL-visible name of the declared object.
    pub sql_name: String,
    /// Rendered DDL, or the reason the item was skipped.
    pub result: Result<String, PoetError>,
}

/// Every declaration derived from one library, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    /// Assembly the declarations come from.
    pub assembly: String,
    /// Planned items in emission order.
    pub items: Vec<PlannedItem>,
}

impl DeployPlan {
    /// Rendered declarations, skipping failed items.
    pub fn declarations(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_deref().ok())
    }

    /// Items that were skipped, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&PlannedItem, &PoetError)> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().err().map(|err| (item, err)))
    }

    /// True when at least one item was skipped.
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Classify every type and method of `library` and compose their declarations.
///
/// Composite types come first, ordered so that a type referenced by another
/// type's conversion methods is declared before it. Every type on a reference
/// loop is skipped, and so is every type referencing a skipped type.
/// Aggregates, functions and triggers follow in declaration order. A failing
/// item is recorded and never stops the walk.
pub fn plan_library(library: &Library, composer: &DdlComposer) -> DeployPlan {
    let mut items = Vec::new();

    let graph = CompositeGraph::new(library);
    let mut undeclared: HashSet<NodeIndex> = HashSet::new();
    for component in graph.components() {
        let cyclic = component.len() > 1;
        for &node in &component {
            let ty = graph.types[node];
            let sql_name = ty.descriptor.native_name().to_string();
            let failed_dependency = graph
                .types
                .neighbors(node)
                .find(|dep| undeclared.contains(dep));
            let result = if cyclic {
                Err(PoetError::CyclicTypeDefinition {
                    cycle: graph.cycle_through(node, &component),
                })
            } else if let Some(dep) = failed_dependency {
                Err(PoetError::UndeclaredDependency {
                    type_name: ty.full_name().to_string(),
                    dependency: graph.types[dep].full_name().to_string(),
                })
            } else {
                composer.type_declaration(&sql_name, ty)
            };
            if result.is_err() {
                undeclared.insert(node);
            }
            items.push(record(DeclarationKind::Type, ty.full_name(), sql_name, result));
        }
    }

    for ty in &library.types {
        if is_sql_aggregate(&ty.descriptor) {
            let sql_name = resolved_aggregate_name(&ty.descriptor);
            let result = composer.aggregate_declaration(&sql_name, ty);
            items.push(record(DeclarationKind::Aggregate, ty.full_name(), sql_name, result));
        }

        for method in &ty.methods {
            if is_sql_function(method) {
                let sql_name = resolved_name(method);
                let result = composer.function_declaration(method, &sql_name);
                items.push(record(
                    DeclarationKind::Function,
                    &method.dispatch_handle(),
                    sql_name,
                    result,
                ));
            }
            if is_sql_trigger(method) {
                let sql_name = resolved_trigger_name(method);
                let result = composer.trigger_declaration(method, &sql_name);
                items.push(record(
                    DeclarationKind::Trigger,
                    &method.dispatch_handle(),
                    sql_name,
                    result,
                ));
            }
        }
    }

    DeployPlan {
        assembly: library.assembly.clone(),
        items,
    }
}

fn record(
    kind: DeclarationKind,
    source: &str,
    sql_name: String,
    result: Result<String, PoetError>,
) -> PlannedItem {
    match &result {
        Ok(_) => tracing::debug!(%kind, source, sql_name = %sql_name, "declared"),
        Err(err) => tracing::warn!(%kind, source, sql_name = %sql_name, error = %err, "skipped"),
    }
    PlannedItem {
        kind,
        source: source.to_string(),
        sql_name,
        result,
    }
}

/// SQL types declared in the library that `ty`'s conversion methods reference.
fn composite_dependencies<'a>(library: &'a Library, ty: &TypeDefinition) -> Vec<&'a TypeDefinition> {
    let mut deps: Vec<&TypeDefinition> = Vec::new();
    let conversion_methods = ty
        .methods
        .iter()
        .filter(|m| m.name == INPUT_METHOD || m.name == OUTPUT_METHOD);
    for method in conversion_methods {
        let referenced = method
            .parameters
            .iter()
            .map(|p| &p.ty)
            .chain(std::iter::once(&method.return_type));
        for dep in referenced {
            if dep.full_name == ty.full_name() || !is_sql_type(dep) {
                continue;
            }
            let Some(def) = library.find_type(&dep.full_name) else {
                continue;
            };
            if is_sql_type(&def.descriptor) && !deps.iter().any(|d| d.full_name() == def.full_name())
            {
                deps.push(def);
            }
        }
    }
    deps
}

/// Composite types with an edge from each type to the types its conversion
/// methods reference.
struct CompositeGraph<'a> {
    types: DiGraph<&'a TypeDefinition, ()>,
}

impl<'a> CompositeGraph<'a> {
    fn new(library: &'a Library) -> Self {
        let mut types = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();
        for ty in library.types.iter().filter(|t| is_sql_type(&t.descriptor)) {
            index.insert(ty.full_name(), types.add_node(ty));
        }
        for ty in library.types.iter().filter(|t| is_sql_type(&t.descriptor)) {
            for dep in composite_dependencies(library, ty) {
                if let (Some(&from), Some(&to)) =
                    (index.get(ty.full_name()), index.get(dep.full_name()))
                {
                    types.add_edge(from, to, ());
                }
            }
        }
        Self { types }
    }

    /// Strongly connected components, dependencies first, members in library order.
    fn components(&self) -> Vec<Vec<NodeIndex>> {
        let mut components = petgraph::algo::tarjan_scc(&self.types);
        for component in &mut components {
            component.sort();
        }
        components
    }

    /// Shortest loop through `start` inside `component`, rotated to begin at the
    /// member declared first, with that name repeated at the end.
    fn cycle_through(&self, start: NodeIndex, component: &[NodeIndex]) -> Vec<String> {
        let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut closing = None;
        'search: while let Some(node) = queue.pop_front() {
            for next in self.types.neighbors(node) {
                if !component.contains(&next) {
                    continue;
                }
                if next == start {
                    closing = Some(node);
                    break 'search;
                }
                if let Entry::Vacant(entry) = parents.entry(next) {
                    entry.insert(node);
                    queue.push_back(next);
                }
            }
        }

        let mut path = Vec::new();
        let mut cursor = closing;
        while let Some(node) = cursor {
            path.push(node);
            cursor = if node == start {
                None
            } else {
                parents.get(&node).copied()
            };
        }
        if path.is_empty() {
            path.push(start);
        }
        path.reverse();

        if let Some(first) = path.iter().enumerate().min_by_key(|(_, node)| **node).map(|(i, _)| i) {
            path.rotate_left(first);
        }
        let mut cycle: Vec<String> = path
            .iter()
            .map(|node| self.types[*node].full_name().to_string())
            .collect();
        if let Some(head) = cycle.first().cloned() {
            cycle.push(head);
        }
        cycle
    }
}
