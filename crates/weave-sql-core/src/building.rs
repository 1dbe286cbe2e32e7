//! Rendering state: indentation, build options and the parameter list.
//!
//! A [`BuildingContext`] lives for exactly one `build` call. It carries the
//! dialect, the options and the parameters collected while walking the
//! statement tree, so building stays a pure function of its inputs.

use std::collections::BTreeSet;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::StatementKind;
use crate::value::SqlValue;

const INDENT: &str = "  ";

/// Pretty-printing state: whether line breaks are emitted and how deep the
/// current clause is nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indentation {
    enabled: bool,
    level: usize,
}

impl Indentation {
    /// Pretty printing on, starting at depth zero.
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            level: 0,
        }
    }

    /// Compact single-line output.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            level: 0,
        }
    }

    /// Returns whether pretty printing is on.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Returns the current depth.
    #[must_use]
    pub const fn level(self) -> usize {
        self.level
    }

    /// Returns the indentation one level deeper.
    #[must_use]
    pub const fn indent(self) -> Self {
        Self {
            enabled: self.enabled,
            level: self.level + 1,
        }
    }

    /// Leading whitespace for a line at the current depth.
    #[must_use]
    pub fn prefix(self) -> String {
        if self.enabled {
            INDENT.repeat(self.level)
        } else {
            String::new()
        }
    }

    /// Separator placed between top-level clauses.
    pub(crate) const fn delimiter(self) -> &'static str {
        if self.enabled {
            "\n"
        } else {
            " "
        }
    }

    /// Separator between a clause keyword and its body, including the body's
    /// indentation.
    pub(crate) fn body_separator(self) -> String {
        if self.enabled {
            format!("\n{}", self.indent().prefix())
        } else {
            String::from(" ")
        }
    }
}

/// How parameter markers are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterStyle {
    /// The dialect's positional marker (`?`, `$1`, ...).
    #[default]
    Positional,
    /// `:name` markers for named-parameter executors.
    Named,
}

/// Options for a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOptions {
    indentation: Indentation,
    parameter_style: ParameterStyle,
    bind_literals: bool,
}

impl BuildOptions {
    /// Compact output, positional markers, inlined literals.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indentation: Indentation::disabled(),
            parameter_style: ParameterStyle::Positional,
            bind_literals: false,
        }
    }

    /// Sets the indentation.
    #[must_use]
    pub const fn indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }

    /// Sets the parameter marker style.
    #[must_use]
    pub const fn parameter_style(mut self, style: ParameterStyle) -> Self {
        self.parameter_style = style;
        self
    }

    /// Renders literal values as parameter markers and returns them as bound
    /// values instead of inlining them.
    #[must_use]
    pub const fn bind_literals(mut self, bind: bool) -> Self {
        self.bind_literals = bind;
        self
    }
}

/// A parameter collected while building, in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// A named placeholder the caller binds later.
    Placeholder(String),
    /// A literal value bound instead of inlined.
    Value(SqlValue),
}

/// A rendered statement with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement {
    /// The SQL text.
    pub sql: String,
    /// Parameters in marker order.
    pub parameters: Vec<Parameter>,
}

impl BuiltStatement {
    /// Names of all placeholders, in marker order.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().filter_map(|p| match p {
            Parameter::Placeholder(name) => Some(name.as_str()),
            Parameter::Value(_) => None,
        })
    }
}

/// Per-build rendering state.
#[derive(Debug)]
pub struct BuildingContext {
    dialect: Dialect,
    options: BuildOptions,
    parameters: Vec<Parameter>,
    tables_unaliased: bool,
    reserved_names: BTreeSet<String>,
    generated_names: Vec<String>,
    next_generated: usize,
}

impl BuildingContext {
    /// Starts a build.
    #[must_use]
    pub const fn new(dialect: Dialect, options: BuildOptions) -> Self {
        Self {
            dialect,
            options,
            parameters: Vec::new(),
            tables_unaliased: false,
            reserved_names: BTreeSet::new(),
            generated_names: Vec::new(),
            next_generated: 1,
        }
    }

    /// Starts a build whose generated parameter names avoid `reserved`.
    pub(crate) fn with_reserved_names(
        dialect: Dialect,
        options: BuildOptions,
        reserved: BTreeSet<String>,
    ) -> Self {
        Self {
            reserved_names: reserved,
            ..Self::new(dialect, options)
        }
    }

    /// Returns the dialect being rendered.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the top-level indentation of this build.
    #[must_use]
    pub const fn indentation(&self) -> Indentation {
        self.options.indentation
    }

    /// Returns the parameters collected so far.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns whether tables render by physical name only, without `AS`.
    #[must_use]
    pub const fn tables_unaliased(&self) -> bool {
        self.tables_unaliased
    }

    /// Drops table aliases for the rest of the build when the dialect cannot
    /// declare one on `kind`.
    pub(crate) const fn declare_tables_for(&mut self, kind: StatementKind) {
        self.tables_unaliased = !self.dialect.supports_table_alias(kind);
    }

    /// Quotes an identifier for the active dialect.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }

    /// Records a named placeholder and returns its marker.
    pub fn placeholder(&mut self, name: &str) -> String {
        self.parameters.push(Parameter::Placeholder(String::from(name)));
        match self.options.parameter_style {
            ParameterStyle::Named => format!(":{name}"),
            ParameterStyle::Positional => self.dialect.parameter_placeholder(self.parameters.len()),
        }
    }

    /// Renders a literal value, either inline or as a bound parameter.
    ///
    /// Named markers for bound values are `:p<n>`, skipping reserved names.
    ///
    /// # Errors
    ///
    /// Inline rendering fails for values the dialect cannot spell, see
    /// [`Dialect::escape_literal`].
    pub fn literal(&mut self, value: &SqlValue) -> Result<String> {
        if !self.options.bind_literals {
            return self.dialect.escape_literal(value);
        }
        self.parameters.push(Parameter::Value(value.clone()));
        let index = self.parameters.len();
        Ok(match self.options.parameter_style {
            ParameterStyle::Named => {
                let mut n = index.max(self.next_generated);
                let mut name = format!("p{n}");
                while self.reserved_names.contains(&name) {
                    n += 1;
                    name = format!("p{n}");
                }
                self.next_generated = n + 1;
                let marker = format!(":{name}");
                self.generated_names.push(name);
                marker
            }
            ParameterStyle::Positional => self.dialect.parameter_placeholder(index),
        })
    }

    /// Returns the user placeholder names when one of them equals a generated
    /// parameter name.
    pub(crate) fn colliding_names(&self) -> Option<BTreeSet<String>> {
        let names: BTreeSet<String> = self
            .parameters
            .iter()
            .filter_map(|p| match p {
                Parameter::Placeholder(name) => Some(name.clone()),
                Parameter::Value(_) => None,
            })
            .collect();
        self.generated_names
            .iter()
            .any(|name| names.contains(name))
            .then_some(names)
    }

    /// Finishes the build.
    #[must_use]
    pub fn finish(self, sql: String) -> BuiltStatement {
        BuiltStatement {
            sql,
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_prefix() {
        let pretty = Indentation::enabled();
        assert_eq!(pretty.prefix(), "");
        assert_eq!(pretty.indent().prefix(), "  ");
        assert_eq!(pretty.indent().indent().prefix(), "    ");
        assert_eq!(pretty.indent().level(), 1);
        assert_eq!(Indentation::disabled().indent().prefix(), "");
    }

    #[test]
    fn test_separators() {
        assert_eq!(Indentation::enabled().delimiter(), "\n");
        assert_eq!(Indentation::disabled().delimiter(), " ");
        assert_eq!(Indentation::enabled().body_separator(), "\n  ");
        assert_eq!(Indentation::disabled().body_separator(), " ");
    }

    #[test]
    fn test_positional_placeholders() {
        let mut ctx = BuildingContext::new(Dialect::PostgreSql, BuildOptions::new());
        assert_eq!(ctx.placeholder("a"), "$1");
        assert_eq!(ctx.placeholder("b"), "$2");
        let built = ctx.finish(String::new());
        assert_eq!(built.placeholder_names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_named_placeholders() {
        let options = BuildOptions::new().parameter_style(ParameterStyle::Named);
        let mut ctx = BuildingContext::new(Dialect::MySql, options);
        assert_eq!(ctx.placeholder("name"), ":name");
    }

    #[test]
    fn test_literal_binding() {
        let mut inline = BuildingContext::new(Dialect::MySql, BuildOptions::new());
        assert_eq!(inline.literal(&SqlValue::Int(5)).unwrap(), "5");
        assert!(inline.parameters().is_empty());

        let mut bound =
            BuildingContext::new(Dialect::MySql, BuildOptions::new().bind_literals(true));
        assert_eq!(bound.literal(&SqlValue::Int(5)).unwrap(), "?");
        assert_eq!(bound.parameters(), [Parameter::Value(SqlValue::Int(5))]);
    }

    #[test]
    fn test_named_literals_skip_reserved_names() {
        let options = BuildOptions::new()
            .parameter_style(ParameterStyle::Named)
            .bind_literals(true);
        let reserved = BTreeSet::from([String::from("p1"), String::from("p2")]);
        let mut ctx = BuildingContext::with_reserved_names(Dialect::MySql, options, reserved);
        assert_eq!(ctx.literal(&SqlValue::Int(1)).unwrap(), ":p3");
        assert_eq!(ctx.placeholder("p1"), ":p1");
        assert_eq!(ctx.literal(&SqlValue::Int(2)).unwrap(), ":p4");
        assert!(ctx.colliding_names().is_none());
    }

    #[test]
    fn test_colliding_names_detected() {
        let options = BuildOptions::new()
            .parameter_style(ParameterStyle::Named)
            .bind_literals(true);
        let mut ctx = BuildingContext::new(Dialect::MySql, options);
        ctx.placeholder("p2");
        ctx.literal(&SqlValue::Int(40)).unwrap();
        assert_eq!(
            ctx.colliding_names(),
            Some(BTreeSet::from([String::from("p2")]))
        );
    }
}
