use serde::Deserialize;
use std::fmt;

use crate::metadata::names::{dispatch_handle, native_identifier};

/// Role a marker assigns to a type or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// The type is a database-visible scalar type.
    SqlType,
    /// The method is a callable SQL function.
    SqlFunction,
    /// The type implements an aggregate function.
    SqlAggregate,
    /// The method is a trigger function.
    SqlTrigger,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::SqlType => write!(f, "SqlType"),
            MarkerKind::SqlFunction => write!(f, "SqlFunction"),
            MarkerKind::SqlAggregate => write!(f, "SqlAggregate"),
            MarkerKind::SqlTrigger => write!(f, "SqlTrigger"),
        }
    }
}

/// Declarative tag attached to a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Marker {
    /// Role assigned by this marker.
    pub kind: MarkerKind,
    /// Display-name override; empty means "use the native identifier".
    #[serde(default)]
    pub name: String,
}

impl Marker {
    /// Marker without a display-name override.
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            name: String::new(),
        }
    }

    /// Marker carrying a display-name override.
    pub fn named(kind: MarkerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// The override, or `None` when it is empty.
    pub fn display_name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

/// A host-runtime type identified by its fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Fully-qualified native name, e.g. `System.Int32` or `Acme.Geo.Point`.
    pub full_name: String,
    /// Markers attached to the type.
    pub markers: Vec<Marker>,
}

impl TypeDescriptor {
    /// Unmarked type descriptor.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            markers: Vec::new(),
        }
    }

    /// Attach a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Native identifier (last segment of the qualified name).
    pub fn native_name(&self) -> &str {
        native_identifier(&self.full_name)
    }
}

/// A method parameter; its position is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    /// Zero-based position in the declared parameter list.
    pub position: usize,
    /// Native parameter name, when known.
    pub name: Option<String>,
    /// Declared parameter type.
    pub ty: TypeDescriptor,
}

/// A callable declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Fully-qualified name of the declaring type.
    pub declaring_type: String,
    /// Native method name.
    pub name: String,
    /// Whether the method is static. Informational only.
    pub is_static: bool,
    /// Declared parameters in positional order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared return type.
    pub return_type: TypeDescriptor,
    /// Markers attached to the method.
    pub markers: Vec<Marker>,
}

impl MethodDescriptor {
    /// Static, parameterless, unmarked method.
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            is_static: true,
            parameters: Vec::new(),
            return_type,
            markers: Vec::new(),
        }
    }

    /// Append a parameter at the next position.
    #[must_use]
    pub fn with_parameter(mut self, ty: TypeDescriptor) -> Self {
        let position = self.parameters.len();
        self.parameters.push(ParameterDescriptor {
            position,
            name: None,
            ty,
        });
        self
    }

    /// Attach a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Mark the method as an instance method.
    #[must_use]
    pub fn instance(mut self) -> Self {
        self.is_static = false;
        self
    }

    /// `DeclaringType:MethodName`, always using the native method name.
    pub fn dispatch_handle(&self) -> String {
        dispatch_handle(&self.declaring_type, &self.name)
    }
}

/// A type together with the methods it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    /// The type itself.
    pub descriptor: TypeDescriptor,
    /// Methods declared on the type, in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDefinition {
    /// Definition without methods.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            methods: Vec::new(),
        }
    }

    /// Add a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Fully-qualified name of the type.
    pub fn full_name(&self) -> &str {
        &self.descriptor.full_name
    }
}

/// Everything one compiled library declares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Library {
    /// Assembly name of the library.
    pub assembly: String,
    /// Declared types in declaration order.
    pub types: Vec<TypeDefinition>,
}

impl Library {
    /// Look up a declared type by its fully-qualified name.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.full_name() == full_name)
    }
}
