//! Deterministic C renderers for the three datatype kinds.
//!
//! Renderers only produce the body between the framing the orchestrator
//! owns (disclaimer, provenance, guard, include). Output is built
//! line-by-line into a `String` so two renders of the same spec are
//! byte-identical; cosmetic layout is the formatter's job afterwards.

use crate::spec::{EnumSpec, Spec, StructSpec, VariantSpec};

/// Render the header body for a loaded spec.
pub fn render_header(spec: &Spec, out: &mut String) {
    match spec {
        Spec::Struct(s) => render_struct_header(s, out),
        Spec::Enum(s) => render_enum_header(s, out),
        Spec::Variant(s) => render_variant_header(s, out),
    }
}

/// Render the source body for a loaded spec.
pub fn render_source(spec: &Spec, out: &mut String) {
    match spec {
        Spec::Struct(s) => render_struct_source(s, out),
        Spec::Enum(s) => render_enum_source(s, out),
        Spec::Variant(s) => render_variant_source(s, out),
    }
}

fn render_includes(includes: &[String], out: &mut String) {
    for include in includes {
        push_line(out, &format!("#include <{include}>"));
    }
    if !includes.is_empty() {
        out.push('\n');
    }
}

fn render_struct_header(spec: &StructSpec, out: &mut String) {
    render_includes(&spec.includes, out);
    push_line(out, &format!("typedef struct {} {{", spec.name));
    for field in &spec.fields {
        push_line(out, &format!("  {} {};", field.type_name, field.name));
    }
    push_line(out, &format!("}} {};", spec.name));
    out.push('\n');
    push_line(
        out,
        &format!("void {}_init({} *value);", to_snake(&spec.name), spec.name),
    );
}

fn render_struct_source(spec: &StructSpec, out: &mut String) {
    push_line(
        out,
        &format!("void {}_init({} *value) {{", to_snake(&spec.name), spec.name),
    );
    push_line(out, &format!("  *value = ({}){{0}};", spec.name));
    push_line(out, "}");
}

fn render_enum_header(spec: &EnumSpec, out: &mut String) {
    render_includes(&spec.includes, out);
    push_line(out, &format!("typedef enum {} {{", spec.name));
    for value in &spec.values {
        push_line(out, &format!("  {}_{},", to_shout(&spec.name), value));
    }
    push_line(out, &format!("}} {};", spec.name));
    out.push('\n');
    push_line(
        out,
        &format!(
            "const char *{}_to_string({} value);",
            to_snake(&spec.name),
            spec.name
        ),
    );
}

fn render_enum_source(spec: &EnumSpec, out: &mut String) {
    push_line(
        out,
        &format!(
            "const char *{}_to_string({} value) {{",
            to_snake(&spec.name),
            spec.name
        ),
    );
    push_line(out, "  switch (value) {");
    for value in &spec.values {
        push_line(out, &format!("  case {}_{}:", to_shout(&spec.name), value));
        push_line(out, &format!("    return \"{value}\";"));
    }
    push_line(out, "  default:");
    push_line(out, "    return \"<unknown>\";");
    push_line(out, "  }");
    push_line(out, "}");
}

fn render_variant_header(spec: &VariantSpec, out: &mut String) {
    render_includes(&spec.includes, out);
    push_line(out, &format!("typedef enum {}Tag {{", spec.name));
    for variant in &spec.variants {
        push_line(
            out,
            &format!("  {}_TAG_{},", to_shout(&spec.name), to_shout(&variant.name)),
        );
    }
    push_line(out, &format!("}} {}Tag;", spec.name));
    out.push('\n');
    push_line(out, &format!("typedef struct {} {{", spec.name));
    push_line(out, &format!("  {}Tag tag;", spec.name));
    push_line(out, "  union {");
    for variant in &spec.variants {
        push_line(out, &format!("    {} {};", variant.type_name, variant.name));
    }
    push_line(out, "  } value;");
    push_line(out, &format!("}} {};", spec.name));
    out.push('\n');
    push_line(
        out,
        &format!(
            "const char *{}_tag_to_string({}Tag tag);",
            to_snake(&spec.name),
            spec.name
        ),
    );
}

fn render_variant_source(spec: &VariantSpec, out: &mut String) {
    push_line(
        out,
        &format!(
            "const char *{}_tag_to_string({}Tag tag) {{",
            to_snake(&spec.name),
            spec.name
        ),
    );
    push_line(out, "  switch (tag) {");
    for variant in &spec.variants {
        push_line(
            out,
            &format!("  case {}_TAG_{}:", to_shout(&spec.name), to_shout(&variant.name)),
        );
        push_line(out, &format!("    return \"{}\";", variant.name));
    }
    push_line(out, "  default:");
    push_line(out, "    return \"<unknown>\";");
    push_line(out, "  }");
    push_line(out, "}");
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// `ShapeKind` -> `shape_kind`; already-lower names pass through.
fn to_snake(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

fn to_shout(name: &str) -> String {
    to_snake(name).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FieldSpec;

    fn point_spec() -> StructSpec {
        StructSpec {
            name: "Point".to_string(),
            includes: vec!["stdint.h".to_string()],
            fields: vec![
                FieldSpec {
                    name: "x".to_string(),
                    type_name: "int32_t".to_string(),
                },
                FieldSpec {
                    name: "y".to_string(),
                    type_name: "int32_t".to_string(),
                },
            ],
        }
    }

    #[test]
    fn struct_header_declares_fields_and_init() {
        let mut out = String::new();
        render_struct_header(&point_spec(), &mut out);
        assert!(out.contains("#include <stdint.h>"));
        assert!(out.contains("typedef struct Point {"));
        assert!(out.contains("  int32_t x;"));
        assert!(out.contains("void point_init(Point *value);"));
    }

    #[test]
    fn struct_source_zero_initializes() {
        let mut out = String::new();
        render_struct_source(&point_spec(), &mut out);
        assert!(out.contains("void point_init(Point *value) {"));
        assert!(out.contains("*value = (Point){0};"));
    }

    #[test]
    fn enum_render_prefixes_values() {
        let spec = EnumSpec {
            name: "Color".to_string(),
            includes: vec![],
            values: vec!["RED".to_string(), "GREEN".to_string()],
        };
        let mut header = String::new();
        render_enum_header(&spec, &mut header);
        assert!(header.contains("  COLOR_RED,"));
        assert!(header.contains("const char *color_to_string(Color value);"));

        let mut source = String::new();
        render_enum_source(&spec, &mut source);
        assert!(source.contains("  case COLOR_GREEN:"));
        assert!(source.contains("    return \"GREEN\";"));
    }

    #[test]
    fn variant_render_emits_tag_and_union() {
        let spec = VariantSpec {
            name: "Shape".to_string(),
            includes: vec![],
            variants: vec![
                FieldSpec {
                    name: "circle".to_string(),
                    type_name: "Circle".to_string(),
                },
                FieldSpec {
                    name: "square".to_string(),
                    type_name: "Square".to_string(),
                },
            ],
        };
        let mut header = String::new();
        render_variant_header(&spec, &mut header);
        assert!(header.contains("  SHAPE_TAG_CIRCLE,"));
        assert!(header.contains("  ShapeTag tag;"));
        assert!(header.contains("    Circle circle;"));

        let mut source = String::new();
        render_variant_source(&spec, &mut source);
        assert!(source.contains("const char *shape_tag_to_string(ShapeTag tag) {"));
    }

    #[test]
    fn render_dispatch_is_deterministic() {
        let spec = Spec::Struct(point_spec());
        let mut a = String::new();
        let mut b = String::new();
        render_header(&spec, &mut a);
        render_header(&spec, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake("Point"), "point");
        assert_eq!(to_snake("ShapeKind"), "shape_kind");
        assert_eq!(to_snake("already_snake"), "already_snake");
        assert_eq!(to_shout("ShapeKind"), "SHAPE_KIND");
    }
}
