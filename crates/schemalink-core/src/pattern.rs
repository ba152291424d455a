//! Reference pattern compilation.
//!
//! A style descriptor, either a named entry from the built-in registry or a
//! user template with `{P}`/`{C}`/`{F}` placeholders, is compiled into a
//! [`PatternSpec`]: a validated regex plus the ordered semantic roles its
//! capture groups carry. A string with no recognized placeholders is accepted
//! as a raw regex and flagged [`PatternOrigin::Raw`] (advanced, unvalidated)
//! rather than rejected.

use regex::Regex;

use crate::error::PatternError;

/// Semantic role of a capture group in a reference pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Target page number token.
    Page,
    /// Grid column token (digits, or a letter on some drawings).
    Column,
    /// Grid row token (usually a single uppercase letter).
    Row,
}

/// How a [`PatternSpec`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrigin {
    /// One of the built-in registry styles.
    Named,
    /// Compiled from a placeholder template; fully validated.
    Template,
    /// Taken verbatim as a regex; capture-group roles are assumed, not checked.
    Raw,
}

/// A compiled reference matcher with its capture-group role ordering.
///
/// `role_order[i]` names the meaning of capture group `i + 1`. The order is
/// duplicate-free and holds at most three roles; a template that uses fewer
/// placeholders produces a shorter order, and the missing tokens stay empty
/// in extracted references.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    /// Display name of the style ("custom" for templates and raw patterns).
    pub name: String,
    /// The compiled matcher.
    pub regex: Regex,
    /// Capture group → role mapping, in group order.
    pub role_order: Vec<Role>,
    /// Provenance of the matcher.
    pub origin: PatternOrigin,
    /// A human-readable example of what the matcher detects.
    pub example: String,
}

impl PatternSpec {
    /// Distribute up to three capture-group values to (page, column, row)
    /// tokens according to the role order.
    pub fn assign_roles<'a>(&self, groups: &[&'a str; 3]) -> (&'a str, &'a str, &'a str) {
        let mut page = "";
        let mut column = "";
        let mut row = "";
        for (i, role) in self.role_order.iter().enumerate().take(3) {
            match role {
                Role::Page => page = groups[i],
                Role::Column => column = groups[i],
                Role::Row => row = groups[i],
            }
        }
        (page, column, row)
    }
}

/// A named style in the built-in registry.
#[derive(Debug, Clone, Copy)]
pub struct StyleEntry {
    /// Registry key, shown to the user.
    pub name: &'static str,
    /// The matcher pattern.
    pub pattern: &'static str,
    /// Example strings this style detects.
    pub example: &'static str,
    /// Capture group roles, in group order.
    pub role_order: &'static [Role],
    /// Human-readable layout of the style (e.g. "page.column-row").
    pub display_order: &'static str,
}

/// Name of the registry entry that accepts a user template.
pub const CUSTOM_STYLE_NAME: &str = "custom";

/// Built-in reference styles.
pub const REFERENCE_STYLES: &[StyleEntry] = &[
    StyleEntry {
        name: "/1.0-A",
        pattern: r"/\s*(\d+)[.\s]+(\d+|[A-Za-z]+)\s*[-/]\s*([A-Za-z0-9]+)",
        example: "/1.0-A, /10.5-Z, /3.12-AB",
        role_order: &[Role::Page, Role::Column, Role::Row],
        display_order: "page.column-row",
    },
    StyleEntry {
        name: "25-A.0",
        pattern: r"(\d+)\s*[-]\s*([A-Za-z]+)[.\s]+(\d+)",
        example: "25-A.0, 10-B.5, 3-C.12",
        role_order: &[Role::Page, Role::Row, Role::Column],
        display_order: "page-row.column",
    },
    StyleEntry {
        name: "A1/25",
        pattern: r"([A-Za-z]+)(\d+)\s*[/]\s*(\d+)",
        example: "A1/25, B5/10, C12/3",
        role_order: &[Role::Row, Role::Column, Role::Page],
        display_order: "row+column/page",
    },
    StyleEntry {
        name: "(1-A-0)",
        pattern: r"\(\s*(\d+)\s*[-]\s*([A-Za-z]+)\s*[-]\s*(\d+)\s*\)",
        example: "(1-A-0), (10-B-5), (3-C-12)",
        role_order: &[Role::Page, Role::Row, Role::Column],
        display_order: "(page-row-column)",
    },
];

/// Look up a registry entry by name.
pub fn style_entry(name: &str) -> Option<&'static StyleEntry> {
    REFERENCE_STYLES.iter().find(|s| s.name == name)
}

/// Compile a named registry style.
pub fn compile_named(name: &str) -> Result<PatternSpec, PatternError> {
    let entry = style_entry(name)
        .ok_or_else(|| PatternError::new(format!("unknown style name: {name:?}")))?;
    let regex = Regex::new(entry.pattern)
        .map_err(|e| PatternError::new(format!("style {:?}: {e}", entry.name)))?;
    Ok(PatternSpec {
        name: entry.name.to_string(),
        regex,
        role_order: entry.role_order.to_vec(),
        origin: PatternOrigin::Named,
        example: entry.example.to_string(),
    })
}

/// Capture group inserted for each placeholder role.
fn role_group(role: Role) -> &'static str {
    match role {
        Role::Page | Role::Column => r"(\d+)",
        Role::Row => "([A-Z])",
    }
}

/// Sample value substituted when deriving a template's example string.
fn role_sample(role: Role) -> &'static str {
    match role {
        Role::Page => "5",
        Role::Column => "3",
        Role::Row => "A",
    }
}

fn placeholder_role(keyword: &str) -> Role {
    match keyword.to_ascii_uppercase().as_str() {
        "P" | "PAG" | "PAGINA" => Role::Page,
        "C" | "COL" | "COLUMNA" => Role::Column,
        _ => Role::Row, // "F" | "FILA"
    }
}

fn placeholder_regex() -> Regex {
    // Longest alternatives first so "PAGINA" is not consumed as "PAG".
    Regex::new(r"(?i)\{(PAGINA|PAG|P|COLUMNA|COL|C|FILA|F)\}").unwrap()
}

/// Compile a user template into a [`PatternSpec`].
///
/// Placeholders `{P}`/`{PAG}`/`{PAGINA}` and `{C}`/`{COL}`/`{COLUMNA}` become
/// digit-capturing groups; `{F}`/`{FILA}` becomes a single-uppercase-letter
/// group. Literal text between placeholders is regex-escaped. The role order
/// is derived from the left-to-right position of each placeholder kind's
/// first occurrence.
///
/// A template with no recognized placeholders is compiled verbatim as a regex
/// with the default (Page, Column, Row) role order and flagged
/// [`PatternOrigin::Raw`].
pub fn compile_template(template: &str) -> Result<PatternSpec, PatternError> {
    if template.trim().is_empty() {
        return Err(PatternError::new("empty custom pattern"));
    }

    let finder = placeholder_regex();
    let mut pattern = String::new();
    let mut example = String::new();
    let mut role_order: Vec<Role> = Vec::new();
    let mut last_end = 0;
    let mut any_placeholder = false;

    for caps in finder.captures_iter(template) {
        let whole = caps.get(0).expect("match has group 0");
        let role = placeholder_role(&caps[1]);
        any_placeholder = true;

        let literal = &template[last_end..whole.start()];
        pattern.push_str(&regex::escape(literal));
        example.push_str(literal);
        pattern.push_str(role_group(role));
        example.push_str(role_sample(role));
        if !role_order.contains(&role) {
            role_order.push(role);
        }
        last_end = whole.end();
    }

    if !any_placeholder {
        // Raw regex, advanced use: compile as-is, roles assumed in default order.
        let regex = Regex::new(template)
            .map_err(|e| PatternError::new(format!("invalid custom regex: {e}")))?;
        return Ok(PatternSpec {
            name: CUSTOM_STYLE_NAME.to_string(),
            regex,
            role_order: vec![Role::Page, Role::Column, Role::Row],
            origin: PatternOrigin::Raw,
            example: template.to_string(),
        });
    }

    let tail = &template[last_end..];
    pattern.push_str(&regex::escape(tail));
    example.push_str(tail);

    let regex = Regex::new(&pattern)
        .map_err(|e| PatternError::new(format!("invalid template {template:?}: {e}")))?;
    if regex.captures_len() <= role_order.len() {
        return Err(PatternError::new(format!(
            "template {template:?} compiled with too few capture groups"
        )));
    }

    Ok(PatternSpec {
        name: CUSTOM_STYLE_NAME.to_string(),
        regex,
        role_order,
        origin: PatternOrigin::Template,
        example,
    })
}

/// Compile a style selection: a registry name, or the custom template when
/// `name` is [`CUSTOM_STYLE_NAME`].
pub fn compile_style(name: &str, custom_template: &str) -> Result<PatternSpec, PatternError> {
    if name == CUSTOM_STYLE_NAME {
        compile_template(custom_template)
    } else {
        compile_named(name)
    }
}
