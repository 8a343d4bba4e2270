//! Field-type inference
//!
//! Wrapper variants (optional, nullable, default) are transparent: a field is
//! classified by the node they decorate.

use tracing::trace;

use super::types::{Classification, FieldType, InputKind, NumericRange};
use crate::config::FormSettings;
use crate::schema::SchemaNode;

/// Strip wrapper variants until a non-wrapper node is reached.
pub fn strip_wrappers(node: &SchemaNode) -> &SchemaNode {
    let mut current = node;
    while let Some(inner) = current.wrapped() {
        current = inner;
    }
    current
}

/// Classify a node with default settings.
pub fn classify(node: &SchemaNode) -> Classification {
    classify_with(node, &FormSettings::default())
}

pub fn classify_with(node: &SchemaNode, settings: &FormSettings) -> Classification {
    match strip_wrappers(node) {
        SchemaNode::Boolean => Classification::new(FieldType::Boolean, InputKind::Boolean),
        SchemaNode::Number(number) => match number.inclusive_range() {
            Some((min, max)) if settings.numeric_range => Classification {
                range: Some(NumericRange { min, max }),
                ..Classification::new(FieldType::Number, InputKind::Range)
            },
            _ => Classification::new(FieldType::Number, InputKind::Input),
        },
        SchemaNode::Enum { options } => Classification {
            option_items: Some(options.clone()),
            ..Classification::new(FieldType::String, InputKind::Select)
        },
        SchemaNode::Array { element } => {
            let element_class = classify_with(element, settings);
            trace!(
                element_type = %element_class.field_type,
                element_input = %element_class.input,
                "classified array element"
            );
            // The container decides type and input; element hints carry over
            Classification {
                field_type: FieldType::Array,
                input: InputKind::Multiselect,
                ..element_class
            }
        }
        SchemaNode::Date => Classification::new(FieldType::Date, InputKind::Date),
        SchemaNode::Literal { value } => {
            let field_type = FieldType::of_literal(value);
            let input = if field_type == FieldType::Boolean {
                InputKind::Boolean
            } else {
                InputKind::Input
            };
            Classification::new(field_type, input)
        }
        _ => Classification::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ObjectSchema;

    #[test]
    fn test_strip_default() {
        let inner = SchemaNode::string();
        let node = inner.clone().with_default("test");
        assert_eq!(strip_wrappers(&node), &inner);
    }

    #[test]
    fn test_strip_optional() {
        let inner = SchemaNode::string();
        let node = inner.clone().optional();
        assert_eq!(strip_wrappers(&node), &inner);
    }

    #[test]
    fn test_strip_nullable() {
        let inner = SchemaNode::string();
        let node = inner.clone().nullable();
        assert_eq!(strip_wrappers(&node), &inner);
    }

    #[test]
    fn test_strip_leaves_base_nodes() {
        let node = SchemaNode::string();
        assert_eq!(strip_wrappers(&node), &node);
    }

    #[test]
    fn test_strip_nested_wrappers_in_any_order() {
        let inner = SchemaNode::number().min(1.0);
        let a = inner.clone().nullable().with_default(2).optional();
        let b = inner.clone().optional().nullable().with_default(2);

        assert_eq!(strip_wrappers(&a), &inner);
        assert_eq!(strip_wrappers(&b), &inner);
        assert_eq!(strip_wrappers(strip_wrappers(&a)), &inner);
        assert!(a.is_wrapper());
        assert!(!strip_wrappers(&a).is_wrapper());
    }

    #[test]
    fn test_wrappers_do_not_change_classification() {
        let wrapped = SchemaNode::string().nullable().with_default("").optional();
        assert_eq!(classify(&wrapped), classify(&SchemaNode::string()));
        assert_eq!(
            classify(&wrapped),
            Classification::new(FieldType::String, InputKind::Input)
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(
            classify(&SchemaNode::boolean()),
            Classification::new(FieldType::Boolean, InputKind::Boolean)
        );
    }

    #[test]
    fn test_enum_is_select_with_options() {
        let node = SchemaNode::enumeration(["Option1", "Option2"]).optional();
        let class = classify(&node);

        assert_eq!(class.field_type, FieldType::String);
        assert_eq!(class.input, InputKind::Select);
        assert_eq!(
            class.option_items,
            Some(vec!["Option1".to_string(), "Option2".to_string()])
        );
    }

    #[test]
    fn test_number_without_both_bounds_is_input() {
        for node in [
            SchemaNode::number(),
            SchemaNode::number().min(0.0),
            SchemaNode::number().max(10.0),
            SchemaNode::number().min(0.0).lt(10.0),
        ] {
            assert_eq!(
                classify(&node),
                Classification::new(FieldType::Number, InputKind::Input)
            );
        }
    }

    #[test]
    fn test_bounded_number_is_range() {
        let class = classify(&SchemaNode::number().min(0.0).max(10.0).optional());

        assert_eq!(class.field_type, FieldType::Number);
        assert_eq!(class.input, InputKind::Range);
        assert_eq!(class.range, Some(NumericRange { min: 0.0, max: 10.0 }));
    }

    #[test]
    fn test_range_can_be_disabled() {
        let settings = FormSettings {
            numeric_range: false,
        };
        let class = classify_with(&SchemaNode::number().min(0.0).max(10.0), &settings);

        assert_eq!(class, Classification::new(FieldType::Number, InputKind::Input));
    }

    #[test]
    fn test_array_forces_container_tags() {
        for element in [
            SchemaNode::string(),
            SchemaNode::boolean(),
            SchemaNode::date(),
            SchemaNode::array(SchemaNode::number()),
        ] {
            let class = classify(&SchemaNode::array(element));
            assert_eq!(class.field_type, FieldType::Array);
            assert_eq!(class.input, InputKind::Multiselect);
        }
    }

    #[test]
    fn test_array_carries_element_options() {
        let node = SchemaNode::array(SchemaNode::enumeration(["red", "green"]).optional());
        let class = classify(&node);

        assert_eq!(class.input, InputKind::Multiselect);
        assert_eq!(
            class.option_items,
            Some(vec!["red".to_string(), "green".to_string()])
        );
    }

    #[test]
    fn test_date() {
        assert_eq!(
            classify(&SchemaNode::date()),
            Classification::new(FieldType::Date, InputKind::Date)
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            classify(&SchemaNode::literal(true)),
            Classification::new(FieldType::Boolean, InputKind::Boolean)
        );
        assert_eq!(
            classify(&SchemaNode::literal("test")),
            Classification::new(FieldType::String, InputKind::Input)
        );
        assert_eq!(
            classify(&SchemaNode::literal(42)),
            Classification::new(FieldType::Number, InputKind::Input)
        );
        assert_eq!(
            classify(&SchemaNode::literal(serde_json::Value::Null)),
            Classification::new(FieldType::String, InputKind::Input)
        );
    }

    #[test]
    fn test_fallback_is_string_input() {
        let fallback = Classification::new(FieldType::String, InputKind::Input);

        assert_eq!(classify(&SchemaNode::any()), fallback);
        assert_eq!(classify(&SchemaNode::string()), fallback);
        assert_eq!(
            classify(&SchemaNode::object(
                ObjectSchema::new().field("x", SchemaNode::number())
            )),
            fallback
        );
    }
}
