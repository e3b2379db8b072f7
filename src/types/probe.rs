use std::collections::BTreeMap;

use super::condition::MatchField;

/// A synthetic request descriptor used to test rule conditions without a
/// real file on disk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchProbe {
    pub resource_path: String,
    pub resource_query: String,
    pub issuer: Option<String>,
    pub description_data: BTreeMap<String, String>,
}

impl MatchProbe {
    /// Probe for a file of the given extension. The path is deliberately not
    /// a path any real project would contain.
    #[must_use]
    pub fn for_extension(ext: &str) -> Self {
        Self {
            resource_path: format!("/__rulegraft_probe__/index.{ext}"),
            ..Self::default()
        }
    }

    /// Probe for an explicit path and query, used when resolving a request
    /// against a branch list.
    #[must_use]
    pub fn for_request(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            resource_path: path.into(),
            resource_query: query.into(),
            ..Self::default()
        }
    }

    /// Set the issuer path.
    #[must_use]
    pub fn issued_by(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// The attribute value a clause on `field` should be evaluated against.
    #[must_use]
    pub fn attribute(&self, field: &MatchField) -> Option<&str> {
        match field {
            MatchField::Resource => Some(&self.resource_path),
            MatchField::ResourceQuery => Some(&self.resource_query),
            MatchField::Issuer => self.issuer.as_deref(),
            MatchField::DescriptionData(key) => {
                self.description_data.get(key).map(String::as_str)
            }
        }
    }
}
