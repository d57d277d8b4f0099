use serde::Deserialize;

/// How a provider obtains its tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationMethod {
    #[default]
    Api,
    Events,
    External,
    Legacy,
}

/// What a provider list describes. Only `Token` lists feed the aggregated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderKind {
    #[default]
    Token,
    Pool,
    Aggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Registry key, also the file stem of the provider's persisted list.
    pub name: String,
    pub method: GenerationMethod,
    pub kind: ProviderKind,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            method: GenerationMethod::default(),
            kind,
        }
    }

    pub fn feeds_aggregate(&self) -> bool {
        self.kind == ProviderKind::Token
    }
}
