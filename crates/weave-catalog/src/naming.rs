//! Name rewriting from physical table/column names to public aliases.

use std::collections::BTreeMap;

use glob::Pattern;
use serde::Deserialize;

use crate::error::{CatalogError, Result};

/// A prefix/suffix pair. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Affix {
    /// Text at the start of the name.
    #[serde(default)]
    pub prefix: String,
    /// Text at the end of the name.
    #[serde(default)]
    pub suffix: String,
}

impl Affix {
    /// Pairs `prefix` with `suffix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// Rewrites for one kind of name: removes, then appends, then replaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameRule {
    /// Affixes stripped when present. Each side is removed independently.
    #[serde(default)]
    pub removes: Vec<Affix>,
    /// Affixes wrapped around the name, in order.
    #[serde(default)]
    pub appends: Vec<Affix>,
    /// Substring replacements, applied in key order.
    #[serde(default)]
    pub replaces: BTreeMap<String, String>,
}

impl NameRule {
    /// Adds an affix to strip.
    #[must_use]
    pub fn remove(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.removes.push(Affix::new(prefix, suffix));
        self
    }

    /// Adds an affix to wrap around the name.
    #[must_use]
    pub fn append(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.appends.push(Affix::new(prefix, suffix));
        self
    }

    /// Adds a substring replacement.
    #[must_use]
    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replaces.insert(from.into(), to.into());
        self
    }

    /// Applies the rule to `name`. An empty result falls back to `name`.
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        let mut alias = name.to_owned();
        for affix in &self.removes {
            if !affix.prefix.is_empty() {
                if let Some(rest) = alias.strip_prefix(affix.prefix.as_str()) {
                    alias = rest.to_owned();
                }
            }
            if !affix.suffix.is_empty() {
                if let Some(rest) = alias.strip_suffix(affix.suffix.as_str()) {
                    alias = rest.to_owned();
                }
            }
        }
        for affix in &self.appends {
            alias = format!("{}{alias}{}", affix.prefix, affix.suffix);
        }
        for (from, to) in &self.replaces {
            if !from.is_empty() {
                alias = alias.replace(from.as_str(), to);
            }
        }
        if alias.is_empty() {
            name.to_owned()
        } else {
            alias
        }
    }
}

/// Rules for tables matching one pattern: the table-name rule sits at the top
/// level, the column-name rule under `column`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableNameRule {
    /// Rule for the table name.
    #[serde(flatten)]
    pub table: NameRule,
    /// Rule for the names of the table's columns.
    #[serde(default)]
    pub column: NameRule,
}

impl TableNameRule {
    /// Combines a table-name rule with a column-name rule.
    #[must_use]
    pub const fn new(table: NameRule, column: NameRule) -> Self {
        Self { table, column }
    }
}

/// Table rules with their patterns compiled.
#[derive(Debug, Clone)]
pub(crate) struct Renamer {
    rules: PatternMap<TableNameRule>,
}

impl Renamer {
    pub(crate) fn compile<'a>(
        rules: impl IntoIterator<Item = (&'a String, &'a TableNameRule)>,
    ) -> Result<Self> {
        Ok(Self {
            rules: PatternMap::compile(rules)?,
        })
    }

    /// The last rule whose pattern matches `table`.
    pub(crate) fn rule_for(&self, table: &str) -> Option<&TableNameRule> {
        self.rules.lookup(table)
    }

    pub(crate) fn table_alias(&self, table: &str) -> String {
        self.rule_for(table)
            .map_or_else(|| table.to_owned(), |rule| rule.table.apply(table))
    }

    pub(crate) fn column_alias(&self, table: &str, column: &str) -> String {
        self.rule_for(table)
            .map_or_else(|| column.to_owned(), |rule| rule.column.apply(column))
    }
}

/// Compiled glob patterns mapped to values; the last matching pattern wins.
#[derive(Debug, Clone)]
pub(crate) struct PatternMap<T> {
    entries: Vec<(Pattern, T)>,
}

impl<T: Clone> PatternMap<T> {
    pub(crate) fn compile<'a>(entries: impl IntoIterator<Item = (&'a String, &'a T)>) -> Result<Self>
    where
        T: 'a,
    {
        let entries = entries
            .into_iter()
            .map(|(pattern, value)| {
                Pattern::new(pattern)
                    .map(|compiled| (compiled, value.clone()))
                    .map_err(|source| CatalogError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<_>>()?;
        Ok(Self { entries })
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .rev()
            .find(|(pattern, _)| pattern.matches(name))
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_strip_prefix_then_suffix() {
        let rule = NameRule::default().remove("t_", "_tab");
        assert_eq!(rule.apply("t_orders_tab"), "orders");
        assert_eq!(rule.apply("orders_tab"), "orders");
        assert_eq!(rule.apply("t_orders"), "orders");
        assert_eq!(rule.apply("orders"), "orders");
    }

    #[test]
    fn test_appends_then_replaces() {
        let rule = NameRule::default()
            .remove("t_", "")
            .append("api_", "_v1")
            .replace("_", "-");
        assert_eq!(rule.apply("t_order_line"), "api-order-line-v1");
    }

    #[test]
    fn test_empty_result_falls_back() {
        let rule = NameRule::default().remove("t_", "");
        assert_eq!(rule.apply("t_"), "t_");
    }

    #[test]
    fn test_last_matching_pattern_wins() {
        let mut rules = BTreeMap::new();
        rules.insert(
            String::from("t_*"),
            TableNameRule::new(NameRule::default().remove("t_", ""), NameRule::default()),
        );
        rules.insert(
            String::from("t_audit*"),
            TableNameRule::new(
                NameRule::default().replace("t_audit", "log"),
                NameRule::default().remove("f_", ""),
            ),
        );
        let renamer = Renamer::compile(&rules).unwrap();
        assert_eq!(renamer.table_alias("t_orders"), "orders");
        assert_eq!(renamer.table_alias("t_audit_2024"), "log_2024");
        assert_eq!(renamer.column_alias("t_audit_2024", "f_user"), "user");
        assert_eq!(renamer.column_alias("t_orders", "f_user"), "f_user");
        assert_eq!(renamer.table_alias("customers"), "customers");
    }

    #[test]
    fn test_invalid_pattern() {
        let mut rules = BTreeMap::new();
        rules.insert(String::from("t_[*"), TableNameRule::default());
        let err = Renamer::compile(&rules).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { ref pattern, .. } if pattern == "t_[*"));
    }
}
