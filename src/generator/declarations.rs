use crate::classifier::markers::{resolved_name, resolved_trigger_name};
use crate::error::PoetError;
use crate::generator::type_mapping::database_type_name;
use crate::metadata::descriptors::{MethodDescriptor, TypeDefinition};
use crate::metadata::names::assembly_qualified_handle;

/// Handler language used in `LANGUAGE` clauses unless configured otherwise.
pub const DEFAULT_LANGUAGE: &str = "plmono";
/// Native name of a composite type's parse (input conversion) method.
pub const INPUT_METHOD: &str = "Parse";
/// Native name of a composite type's stringify (output conversion) method.
pub const OUTPUT_METHOD: &str = "ToString";
/// Native name of an aggregate's step method.
pub const AGGREGATE_STEP_METHOD: &str = "Accumulate";

/// Rendering options shared by every declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoetConfig {
    /// Handler language name for `LANGUAGE` clauses.
    pub language: String,
    /// When set, dispatch handles are prefixed with `"<assembly>, "`.
    pub assembly: Option<String>,
}

impl Default for PoetConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            assembly: None,
        }
    }
}

/// Renders `CREATE FUNCTION`, `CREATE TYPE` and `CREATE AGGREGATE` statements.
///
/// Every operation is pure: same input, byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct DdlComposer {
    config: PoetConfig,
}

impl DdlComposer {
    /// Composer with explicit options.
    pub fn new(config: PoetConfig) -> Self {
        Self { config }
    }

    /// Options in effect.
    pub fn config(&self) -> &PoetConfig {
        &self.config
    }

    /// `CREATE FUNCTION <name>(...)` for `method`.
    ///
    /// `name` only changes the SQL-visible identifier; the `AS` clause always
    /// references the native method name.
    pub fn function_declaration(
        &self,
        method: &MethodDescriptor,
        name: &str,
    ) -> Result<String, PoetError> {
        let args = method
            .parameters
            .iter()
            .map(|param| database_type_name(&param.ty))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");
        let returns = database_type_name(&method.return_type)?;
        Ok(self.render_function(name, &args, &returns, method))
    }

    /// Function declaration named after the method's `SqlFunction` marker.
    pub fn sql_function_declaration(&self, method: &MethodDescriptor) -> Result<String, PoetError> {
        self.function_declaration(method, &resolved_name(method))
    }

    /// Trigger function declaration: no arguments, `RETURNS trigger`.
    pub fn trigger_declaration(
        &self,
        method: &MethodDescriptor,
        name: &str,
    ) -> Result<String, PoetError> {
        if !method.parameters.is_empty() {
            return Err(PoetError::TriggerArguments {
                method: method.dispatch_handle(),
                count: method.parameters.len(),
            });
        }
        Ok(self.render_function(name, "", "trigger", method))
    }

    /// Trigger declaration named after the method's `SqlTrigger` marker.
    pub fn sql_trigger_declaration(&self, method: &MethodDescriptor) -> Result<String, PoetError> {
        self.trigger_declaration(method, &resolved_trigger_name(method))
    }

    /// Shell type, input and output functions, then the binding `CREATE TYPE`.
    pub fn type_declaration(&self, name: &str, ty: &TypeDefinition) -> Result<String, PoetError> {
        let missing = |method: &str| PoetError::MissingConversionMethod {
            type_name: ty.full_name().to_string(),
            method: method.to_string(),
        };
        let input = unique_method(ty, INPUT_METHOD, missing)?;
        let output = unique_method(ty, OUTPUT_METHOD, missing)?;

        let input_name = format!("{name}_input");
        let output_name = format!("{name}_output");

        let mut sql = format!("CREATE TYPE {name};\n");
        sql.push_str(&self.function_declaration(input, &input_name)?);
        sql.push_str(&self.function_declaration(output, &output_name)?);
        sql.push_str(&format!(
            "CREATE TYPE {name} (\n    INPUT = {input_name}\n    OUTPUT = {output_name}\n);\n"
        ));
        Ok(sql)
    }

    /// Step function followed by `CREATE AGGREGATE`.
    ///
    /// The aggregate type exposes one `Accumulate(state, value) -> state`
    /// method; `BASETYPE` is the value type and `STYPE` the state type.
    pub fn aggregate_declaration(
        &self,
        name: &str,
        ty: &TypeDefinition,
    ) -> Result<String, PoetError> {
        let step = unique_method(ty, AGGREGATE_STEP_METHOD, |method| {
            PoetError::MissingAggregateMethod {
                type_name: ty.full_name().to_string(),
                method: method.to_string(),
            }
        })?;
        let invalid = |reason: String| PoetError::InvalidAggregateStep {
            type_name: ty.full_name().to_string(),
            reason,
        };

        let [state_param, value_param] = step.parameters.as_slice() else {
            return Err(invalid(format!(
                "expected (state, value) parameters, found {}",
                step.parameters.len()
            )));
        };
        let state_type = database_type_name(&state_param.ty)?;
        let base_type = database_type_name(&value_param.ty)?;
        let returns = database_type_name(&step.return_type)?;
        if returns != state_type {
            return Err(invalid(format!(
                "returns {returns} but the state parameter is {state_type}"
            )));
        }

        let sfunc_name = format!("{name}_sfunc");
        let mut sql = self.function_declaration(step, &sfunc_name)?;
        sql.push_str(&format!(
            "CREATE AGGREGATE {name} (\n    BASETYPE = {base_type}\n    SFUNC = {sfunc_name}\n    STYPE = {state_type}\n);\n"
        ));
        Ok(sql)
    }

    fn render_function(
        &self,
        name: &str,
        args: &str,
        returns: &str,
        method: &MethodDescriptor,
    ) -> String {
        let handle = match &self.config.assembly {
            Some(assembly) => assembly_qualified_handle(assembly, &method.dispatch_handle()),
            None => method.dispatch_handle(),
        };
        format!(
            "CREATE FUNCTION {name}({args})\n    RETURNS {returns}\n    AS '{handle}'\n    LANGUAGE {language};\n",
            language = self.config.language,
        )
    }
}

/// The single method named `method` on `ty`.
fn unique_method<'a>(
    ty: &'a TypeDefinition,
    method: &str,
    missing: impl FnOnce(&str) -> PoetError,
) -> Result<&'a MethodDescriptor, PoetError> {
    let mut candidates = ty.methods.iter().filter(|m| m.name == method);
    match (candidates.next(), candidates.next()) {
        (Some(found), None) => Ok(found),
        (None, _) => Err(missing(method)),
        (Some(_), Some(_)) => Err(PoetError::AmbiguousMethod {
            type_name: ty.full_name().to_string(),
            method: method.to_string(),
        }),
    }
}
