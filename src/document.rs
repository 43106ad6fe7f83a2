use serde::{Deserialize, Serialize};

pub const SOURCE_CATALOG: &str = "SourceCatalog";
pub const CURRENT_NO_SORTING: &str = "CurrentNoSorting";
pub const CATALOG_ID_DIGITAL: &str = "CatalogIDDigital";
pub const SINGLE_DIG_COLLECTION: &str = "singleDigCollection";

/// Logical document type as reported by the catalogue.
///
/// Unknown type names are kept verbatim so they survive a write/read cycle;
/// title derivation treats them like a monograph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocType {
    Monograph,
    Periodical,
    MultivolumeWork,
    Manuscript,
    Other(String),
}

impl DocType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Monograph" => Self::Monograph,
            "Periodical" => Self::Periodical,
            "MultivolumeWork" => Self::MultivolumeWork,
            "Manuscript" => Self::Manuscript,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Monograph => "Monograph",
            Self::Periodical => "Periodical",
            Self::MultivolumeWork => "MultivolumeWork",
            Self::Manuscript => "Manuscript",
            Self::Other(name) => name,
        }
    }

    /// Whether the type groups volumes/issues when the catalogue does not say.
    pub fn is_anchor_by_default(&self) -> bool {
        matches!(self, Self::Periodical | Self::MultivolumeWork)
    }
}

impl Serialize for DocType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DocType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalNode {
    #[serde(rename = "type")]
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LogicalNode>,
}

impl LogicalNode {
    pub fn new(doc_type: DocType) -> Self {
        Self {
            doc_type,
            anchor: None,
            metadata: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, name: &str, value: &str) -> Self {
        self.add_metadata(name, value);
        self
    }

    pub fn with_child(mut self, child: LogicalNode) -> Self {
        self.children.push(child);
        self
    }

    /// An explicit `anchor` flag from the catalogue wins over the type default.
    pub fn is_anchor(&self) -> bool {
        self.anchor
            .unwrap_or_else(|| self.doc_type.is_anchor_by_default())
    }

    pub fn add_metadata(&mut self, name: &str, value: &str) {
        self.metadata.push(Metadata {
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.metadata
            .iter()
            .filter(move |md| md.name == name)
            .map(|md| md.value.as_str())
    }

    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|md| md.name == name)
            .map(|md| md.value.as_str())
    }

    pub fn first_child(&self) -> Option<&LogicalNode> {
        self.children.first()
    }

    pub fn first_child_mut(&mut self) -> Option<&mut LogicalNode> {
        self.children.first_mut()
    }
}

/// Catalogue record as a logical structure tree. The root owns its children;
/// for anchor types the first child is the volume or issue actually imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub logical: LogicalNode,
}

impl StructuredDocument {
    pub fn new(logical: LogicalNode) -> Self {
        Self { logical }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_names_round_trip_verbatim() -> anyhow::Result<()> {
        let json = r#"{"logical":{"type":"Map","metadata":[{"name":"CatalogIDDigital","value":"K7"}]}}"#;
        let doc: StructuredDocument = serde_json::from_str(json)?;
        assert_eq!(doc.logical.doc_type, DocType::Other("Map".to_owned()));
        assert!(!doc.logical.is_anchor());
        assert_eq!(serde_json::to_string(&doc)?, json);
        Ok(())
    }

    #[test]
    fn explicit_anchor_flag_overrides_type_default() {
        let mut node = LogicalNode::new(DocType::Monograph);
        assert!(!node.is_anchor());
        node.anchor = Some(true);
        assert!(node.is_anchor());

        let mut periodical = LogicalNode::new(DocType::Periodical);
        assert!(periodical.is_anchor());
        periodical.anchor = Some(false);
        assert!(!periodical.is_anchor());
    }

    #[test]
    fn first_value_returns_earliest_entry() {
        let node = LogicalNode::new(DocType::Monograph)
            .with_metadata(CATALOG_ID_DIGITAL, "first")
            .with_metadata(SOURCE_CATALOG, "GBV")
            .with_metadata(CATALOG_ID_DIGITAL, "second");
        assert_eq!(node.first_value(CATALOG_ID_DIGITAL), Some("first"));
        assert_eq!(
            node.values(CATALOG_ID_DIGITAL).collect::<Vec<_>>(),
            vec!["first", "second"]
        );
        assert_eq!(node.first_value(CURRENT_NO_SORTING), None);
    }
}
