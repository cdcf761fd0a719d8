use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TABLE_NAME_LEN;
use crate::error::{CoreError, Result};

/// A dashboard account as stored in the `users` table.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// bcrypt hash. Never serialized back to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company_name: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password_hash", &"***")
            .field("company_name", &self.company_name)
            .finish()
    }
}

/// A validated, lowercase PostgreSQL identifier naming a company readings table.
///
/// Only `[a-z0-9_]` is accepted and the first character must not be a digit,
/// so [`TableName::quoted`] is always safe to splice into SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    pub fn new(name: &str) -> Result<Self> {
        let valid_start = name.chars().next().is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        let valid_chars =
            name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid_start || !valid_chars || name.len() > MAX_TABLE_NAME_LEN {
            return Err(CoreError::InvalidTableName(name.to_owned()));
        }
        Ok(Self(name.to_owned()))
    }

    /// Case-fold a company name into its table name.
    pub fn from_company(company: &str) -> Result<Self> {
        Self::new(&company.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use in SQL text.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0
    }
}

/// Maps a company to the table holding its readings.
///
/// Without an allow-list the table name is the case-folded company name.
/// With one, only listed companies resolve; lookup ignores case.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    allow_list: Option<HashMap<String, TableName>>,
}

impl TableResolver {
    #[must_use]
    pub fn derived() -> Self {
        Self { allow_list: None }
    }

    /// Parse an allow-list of the form `Acme=acme,Globex=globex_scans`.
    pub fn from_allow_list(spec: &str) -> Result<Self> {
        let mut allow_list = HashMap::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (company, table) = entry.split_once('=').ok_or_else(|| {
                CoreError::InvalidInput(format!("allow-list entry '{entry}' is not company=table"))
            })?;
            let company = company.trim();
            if company.is_empty() {
                return Err(CoreError::InvalidInput(format!(
                    "allow-list entry '{entry}' has an empty company"
                )));
            }
            allow_list.insert(company.to_lowercase(), TableName::new(table.trim())?);
        }
        Ok(Self { allow_list: Some(allow_list) })
    }

    pub fn resolve(&self, company: &str) -> Result<TableName> {
        match &self.allow_list {
            Some(list) => list
                .get(&company.trim().to_lowercase())
                .cloned()
                .ok_or_else(|| CoreError::CompanyNotAllowed(company.to_owned())),
            None => TableName::from_company(company),
        }
    }

    #[must_use]
    pub fn is_allow_list(&self) -> bool {
        self.allow_list.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_is_case_folded() {
        let table = TableName::from_company("Acme").unwrap();
        assert_eq!(table.as_str(), "acme");
        assert_eq!(table.quoted(), "\"acme\"");
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(TableName::new("acme; drop table users").is_err());
        assert!(TableName::new("acme\"--").is_err());
        assert!(TableName::from_company("Acme Foods").is_err());
    }

    #[test]
    fn rejects_leading_digit_and_empty() {
        assert!(TableName::new("1acme").is_err());
        assert!(TableName::new("").is_err());
        assert!(TableName::new("_acme_2").is_ok());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(MAX_TABLE_NAME_LEN + 1);
        assert!(TableName::new(&long).is_err());
        assert!(TableName::new(&long[..MAX_TABLE_NAME_LEN]).is_ok());
    }

    #[test]
    fn derived_resolver_lowercases() {
        let resolver = TableResolver::derived();
        assert_eq!(resolver.resolve("ACME").unwrap().as_str(), "acme");
    }

    #[test]
    fn allow_list_maps_companies() {
        let resolver = TableResolver::from_allow_list("Acme=acme_scans, Globex = globex").unwrap();
        assert!(resolver.is_allow_list());
        assert_eq!(resolver.resolve("acme").unwrap().as_str(), "acme_scans");
        assert_eq!(resolver.resolve("GLOBEX").unwrap().as_str(), "globex");
        assert_eq!(
            resolver.resolve("Initech"),
            Err(CoreError::CompanyNotAllowed("Initech".to_owned()))
        );
    }

    #[test]
    fn allow_list_rejects_bad_entries() {
        assert!(TableResolver::from_allow_list("acme").is_err());
        assert!(TableResolver::from_allow_list("=acme").is_err());
        assert!(TableResolver::from_allow_list("Acme=ac me").is_err());
    }

    #[test]
    fn user_debug_hides_hash() {
        let user = User {
            username: "mario".to_owned(),
            password_hash: "$2b$12$secret".to_owned(),
            company_name: "Acme".to_owned(),
        };
        let debug = format!("{user:?}");
        assert!(!debug.contains("secret"));
    }
}
