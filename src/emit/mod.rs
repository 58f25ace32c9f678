use chrono::Utc;

use crate::config::Config;
use crate::model::{HeaderModel, PropertyKind};

pub mod enums;
mod templates;

use enums::make_enums;
use templates::{
    ClassContext, DOC_TEMPLATE, EnumPropContext, PreambleContext, PropContext, substitute,
};

/// Name of the hidden struct instance owned by the wrapper class.
const MEMBER_NAME: &str = "_instance";

/// Indentation of one mirror line inside the struct definition.
const STRUCT_INDENT: &str = "\n        ";

/// Render the binding source for one parsed header. `header_file` is the
/// path the generated `cdef extern` blocks include.
///
/// Output is deterministic for identical input except for the timestamp in
/// the first line.
pub fn make(header: &HeaderModel, header_file: &str, config: &Config) -> String {
    let namespace = header.namespace();
    let enum_model = make_enums(
        &header.enum_classes,
        header_file,
        &namespace,
        &header.classname,
    );

    let struct_type = config
        .class_cpp
        .as_deref()
        .unwrap_or_else(|| header.mirror_name());
    let classname = config.class_py.as_deref().unwrap_or(&header.classname);

    let mut pyx_structs = header
        .structs
        .iter()
        .map(|s| format!("{} {}", s.typename, s.variables.join(", ")))
        .collect::<Vec<_>>()
        .join(STRUCT_INDENT);
    if !pyx_structs.is_empty() {
        pyx_structs.insert_str(0, STRUCT_INDENT);
    }
    let struct_definition = format!("    struct {struct_type}:{pyx_structs}");

    let props = header.properties();

    let str_format = props
        .iter()
        .map(|p| match p.kind {
            PropertyKind::Enum(_) => format!("{}='%s'", p.name),
            PropertyKind::Plain(_) => format!("{}=%s", p.name),
        })
        .collect::<Vec<_>>()
        .join(", ");
    let variable_names = props
        .iter()
        .map(|p| format!("self.{}", p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let property_list = props
        .iter()
        .map(|p| match &p.kind {
            PropertyKind::Enum(enum_type) => EnumPropContext {
                prop: &p.name,
                enum_type,
                member_name: MEMBER_NAME,
            }
            .render(),
            PropertyKind::Plain(typename) => PropContext {
                prop: &p.name,
                typename,
                member_name: MEMBER_NAME,
            }
            .render(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let timestamp = Utc::now().to_rfc3339();
    let range = config.range.to_string();
    let mut out = PreambleContext {
        timestamp: &timestamp,
        range: &range,
    }
    .render();
    out.push_str(&enum_model.enum_class);

    // no properties: the wrapper class body is omitted entirely
    if !property_list.is_empty() {
        let doc = if config.class_documentation.is_empty() {
            String::new()
        } else {
            substitute(
                DOC_TEMPLATE,
                &[("class_documentation", &config.class_documentation)],
            )
        };

        out.push_str(
            &ClassContext {
                header_file,
                namespace: &namespace,
                classname,
                struct_type,
                struct_definition: &struct_definition,
                class_documentation: &doc,
                member_name: MEMBER_NAME,
                enum_pyx: &enum_model.enum_pyx,
                str_format: &str_format,
                variable_names: &variable_names,
                property_list: &property_list,
            }
            .render(),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumDecl, StructDecl};

    fn scenario() -> HeaderModel {
        HeaderModel {
            classname: "Bar".to_string(),
            namespaces: vec!["foo".to_string()],
            enum_classes: vec![EnumDecl {
                name: "Mode".to_string(),
                members: vec!["A".to_string(), "B".to_string()],
            }],
            structs: vec![
                StructDecl {
                    typename: "Mode".to_string(),
                    variables: vec!["mode".to_string()],
                },
                StructDecl {
                    typename: "int".to_string(),
                    variables: vec!["count".to_string()],
                },
            ],
            struct_name: Some("Fields".to_string()),
        }
    }

    fn mask_timestamp(output: &str) -> &str {
        match output.split_once('\n') {
            Some((_, rest)) => rest,
            None => output,
        }
    }

    #[test]
    fn test_scenario_output() {
        let out = make(&scenario(), "foo/bar.h", &Config::default());

        // enum declaration and named list
        assert!(out.contains("cdef cppclass Mode:"));
        assert!(out.contains("    MODE_NAMES = 'A', 'B'\n"));

        // struct mirror, blank-line free, declaration order
        assert!(out.contains(
            "cdef extern from \"<foo/bar.h>\" namespace \"foo\":\n    \
             struct Fields:\n        Mode mode\n        int count\n"
        ));

        // wrapper class with hidden instance and reset
        assert!(out.contains("cdef class _Bar(_Wrapper):"));
        assert!(out.contains("cdef Fields _instance;"));
        assert!(out.contains("clearStruct(self._instance)"));

        // enum-aware str formatting over all properties in order
        assert!(out.contains("(mode='%s', count=%s)"));
        assert!(out.contains("self.mode, self.count)"));

        // one property block per member, enum-aware for mode
        assert!(out.contains("property mode:"));
        assert!(out.contains("i = self.MODE_NAMES.index(x)"));
        assert!(out.contains("if i >= len(self.MODE_NAMES):"));
        assert!(out.contains("property count:"));
        assert!(out.contains("def __set__(self, int x):"));
    }

    #[test]
    fn test_property_order_matches_declaration_order() {
        let out = make(&scenario(), "foo/bar.h", &Config::default());

        let mode_pos = out.find("property mode:").unwrap();
        let count_pos = out.find("property count:").unwrap();
        assert!(mode_pos < count_pos);
    }

    #[test]
    fn test_deterministic_modulo_timestamp() {
        let header = scenario();
        let config = Config::default();

        let first = make(&header, "foo/bar.h", &config);
        let second = make(&header, "foo/bar.h", &config);
        assert_eq!(mask_timestamp(&first), mask_timestamp(&second));
    }

    #[test]
    fn test_timestamp_is_isolated_on_first_line() {
        let out = make(&scenario(), "foo/bar.h", &Config::default());
        let first_line = out.lines().next().unwrap();
        assert!(first_line.starts_with("# Auto-generated by pyxgen at "));
        assert!(first_line.ends_with("(range=1)"));
    }

    #[test]
    fn test_enums_only_header_omits_wrapper() {
        let header = HeaderModel {
            structs: vec![],
            struct_name: None,
            ..scenario()
        };
        let out = make(&header, "foo/bar.h", &Config::default());

        assert!(out.contains("cdef cppclass Mode:"));
        assert!(!out.contains("cdef class"));
        assert!(!out.contains("property"));
        assert!(!out.contains("MODE_NAMES"));
    }

    #[test]
    fn test_config_overrides_names() {
        let config = Config {
            class_cpp: Some("ColorCpp".to_string()),
            class_py: Some("NewColor".to_string()),
            ..Config::default()
        };
        let out = make(&scenario(), "foo/bar.h", &config);

        assert!(out.contains("struct ColorCpp:"));
        assert!(out.contains("cdef ColorCpp _instance;"));
        assert!(out.contains("cdef class _NewColor(_Wrapper):"));
    }

    #[test]
    fn test_class_documentation_becomes_docstring() {
        let config = Config {
            class_documentation: "A normalized color class.".to_string(),
            ..Config::default()
        };
        let out = make(&scenario(), "foo/bar.h", &config);

        assert!(out.contains("cdef class _Bar(_Wrapper):\n    \"\"\"A normalized color class.\"\"\"\n"));
    }

    #[test]
    fn test_mirror_falls_back_to_classname() {
        let header = HeaderModel {
            struct_name: None,
            ..scenario()
        };
        let out = make(&header, "foo/bar.h", &Config::default());

        assert!(out.contains("struct Bar:"));
        assert!(out.contains("cdef Bar _instance;"));
    }

    #[test]
    fn test_nested_namespace_joins_with_scope_separator() {
        let header = HeaderModel {
            namespaces: vec!["timedata".to_string(), "color".to_string()],
            ..scenario()
        };
        let out = make(&header, "t.h", &Config::default());

        assert!(out.contains("namespace \"timedata::color\":"));
        assert!(out.contains("namespace \"timedata::color::Bar\":"));
        assert!(out.contains("namespace \"timedata::color::Bar::Mode\":"));
    }
}
