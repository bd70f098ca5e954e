use tether_core::registry::{TypeDefinition, TypeKind};
use tether_core::types::TypeReference;
use tether_enforce::types::LintError;

pub(crate) fn format_error_human(index: usize, e: &LintError) -> String {
    let mut out = format!("{index}. error[{}]: {}\n", e.code, e.message);
    if let (Some(file), Some(line)) = (&e.file, e.line) {
        out.push_str(&format!("   --> {file}:{line}\n"));
    }
    out
}

pub(crate) fn type_label(reference: Option<&TypeReference>) -> String {
    reference.map_or_else(|| "-".to_string(), |r| r.to_string())
}

pub(crate) fn format_definition_human(def: &TypeDefinition) -> String {
    let mut out = format!("{} {}", def.kind, def.name);
    if !def.extends.is_empty() {
        out.push_str(&format!(" extends {}", def.extends.join(", ")));
    }
    if !def.file.is_empty() {
        out.push_str(&format!("  ({})", def.file));
    }
    out.push('\n');

    if def.is_enum_like() {
        for (member, value) in &def.members {
            if def.kind == TypeKind::Enum {
                out.push_str(&format!("    {member} = {value}\n"));
            } else {
                out.push_str(&format!("    | {member}\n"));
            }
        }
    } else if let Some(target) = &def.alias_of {
        out.push_str(&format!("    = {target}\n"));
    } else {
        for (name, prop) in &def.properties {
            let marker = if prop.optional { "?" } else { "" };
            out.push_str(&format!("    {name}{marker}: {}\n", prop.ty));
        }
    }
    out
}
