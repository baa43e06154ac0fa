use plmono_deploy::classifier::markers;
use plmono_deploy::generator::declarations::{DdlComposer, PoetConfig};
use plmono_deploy::generator::type_mapping::database_type_name;
use plmono_deploy::metadata::descriptors::{
    Marker, MarkerKind, MethodDescriptor, TypeDefinition, TypeDescriptor,
};
use plmono_deploy::PoetError;

fn int32() -> TypeDescriptor {
    TypeDescriptor::new("System.Int32")
}

fn acme_add() -> MethodDescriptor {
    MethodDescriptor::new("Acme.Math", "Add", int32())
        .with_parameter(int32())
        .with_parameter(int32())
}

fn point_type() -> TypeDefinition {
    let point = TypeDescriptor::new("Acme.Geo.Point").with_marker(Marker::new(MarkerKind::SqlType));
    TypeDefinition::new(point.clone())
        .with_method(
            MethodDescriptor::new("Acme.Geo.Point", "Parse", point)
                .with_parameter(TypeDescriptor::new("System.String")),
        )
        .with_method(
            MethodDescriptor::new("Acme.Geo.Point", "ToString", TypeDescriptor::new("System.String"))
                .instance(),
        )
}

#[test]
fn add_without_override_renders_exact_statement() {
    let method = acme_add().with_marker(Marker::new(MarkerKind::SqlFunction));
    assert!(markers::is_sql_function(&method));

    let sql = DdlComposer::default()
        .sql_function_declaration(&method)
        .expect("Add should render");
    assert_eq!(
        sql,
        "CREATE FUNCTION Add(integer, integer)\n    RETURNS integer\n    AS 'Acme.Math:Add'\n    LANGUAGE plmono;\n"
    );
}

#[test]
fn add_with_sum_override_keeps_native_dispatch_handle() {
    let method = acme_add().with_marker(Marker::named(MarkerKind::SqlFunction, "sum"));

    let sql = DdlComposer::default()
        .sql_function_declaration(&method)
        .expect("sum should render");
    assert_eq!(
        sql,
        "CREATE FUNCTION sum(integer, integer)\n    RETURNS integer\n    AS 'Acme.Math:Add'\n    LANGUAGE plmono;\n"
    );
}

#[test]
fn unmarked_and_empty_override_methods_share_a_display_name() {
    let unmarked = acme_add();
    let empty = acme_add().with_marker(Marker::named(MarkerKind::SqlFunction, ""));
    assert_eq!(markers::resolved_name(&unmarked), markers::resolved_name(&empty));
    assert_eq!(markers::resolved_name(&empty), "Add");
}

#[test]
fn function_declaration_is_byte_identical_across_calls() {
    let composer = DdlComposer::default();
    let method = acme_add();
    let first = composer.function_declaration(&method, "Add").unwrap();
    let second = composer.function_declaration(&method, "Add").unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn resolver_maps_primitives_and_marked_types() {
    assert_eq!(database_type_name(&int32()).unwrap(), "integer");
    assert_eq!(
        database_type_name(&TypeDescriptor::new("System.Double")).unwrap(),
        "double precision"
    );

    let colliding =
        TypeDescriptor::new("System.String").with_marker(Marker::new(MarkerKind::SqlType));
    assert_eq!(database_type_name(&colliding).unwrap(), "String");
}

#[test]
fn resolver_never_defaults_unknown_types() {
    let err = database_type_name(&TypeDescriptor::new("System.Guid")).unwrap_err();
    assert_eq!(
        err,
        PoetError::UnsupportedType {
            type_name: "System.Guid".to_string()
        }
    );
}

#[test]
fn point_type_declaration_orders_statements() {
    let sql = DdlComposer::default()
        .type_declaration("point", &point_type())
        .expect("point should render");

    let shell = sql.find("CREATE TYPE point;\n").expect("shell statement");
    let input = sql
        .find("CREATE FUNCTION point_input(")
        .expect("input function");
    let output = sql
        .find("CREATE FUNCTION point_output(")
        .expect("output function");
    let binding = sql
        .find("CREATE TYPE point (\n    INPUT = point_input\n    OUTPUT = point_output\n);\n")
        .expect("binding statement");

    assert!(shell < input && input < output && output < binding);
    assert!(sql.ends_with(");\n"));
    assert_eq!(sql.matches("CREATE ").count(), 4);
}

#[test]
fn type_declaration_reports_missing_stringify_method() {
    let point = point_type();
    let without_output = TypeDefinition {
        methods: point
            .methods
            .into_iter()
            .filter(|m| m.name != "ToString")
            .collect(),
        ..point
    };
    assert_eq!(
        DdlComposer::default().type_declaration("point", &without_output),
        Err(PoetError::MissingConversionMethod {
            type_name: "Acme.Geo.Point".to_string(),
            method: "ToString".to_string(),
        })
    );
}

#[test]
fn assembly_qualified_handles_match_the_call_handler_format() {
    let composer = DdlComposer::new(PoetConfig {
        assembly: Some("Acme.Extensions".to_string()),
        ..PoetConfig::default()
    });
    let sql = composer.function_declaration(&acme_add(), "Add").unwrap();
    assert!(sql.contains("    AS 'Acme.Extensions, Acme.Math:Add'\n"));
    assert!(sql.ends_with("    LANGUAGE plmono;\n"));
    assert_eq!(composer.config().language, "plmono");
}
