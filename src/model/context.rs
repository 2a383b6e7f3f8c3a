use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Relevance assigned at ingestion when the payload carries no explicit score.
pub const DEFAULT_RELEVANCE_SCORE: f64 = 0.8;

/// The closed set of knowledge kinds a context can carry.
///
/// Extending this enum extends the wire contract: the ingestion boundary
/// rejects anything outside it, and [`default_relevance`] must learn about
/// the new kind in the same change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    CodeExample,
    BestPractice,
    SecurityTip,
    Optimization,
    Documentation,
    ErrorPattern,
    DeploymentTool,
    RuntimeBehavior,
}

impl ContextType {
    /// All recognized kinds, in wire order.
    pub const ALL: [ContextType; 8] = [
        ContextType::CodeExample,
        ContextType::BestPractice,
        ContextType::SecurityTip,
        ContextType::Optimization,
        ContextType::Documentation,
        ContextType::ErrorPattern,
        ContextType::DeploymentTool,
        ContextType::RuntimeBehavior,
    ];

    /// Wire name (snake_case), as serialized in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::CodeExample => "code_example",
            ContextType::BestPractice => "best_practice",
            ContextType::SecurityTip => "security_tip",
            ContextType::Optimization => "optimization",
            ContextType::Documentation => "documentation",
            ContextType::ErrorPattern => "error_pattern",
            ContextType::DeploymentTool => "deployment_tool",
            ContextType::RuntimeBehavior => "runtime_behavior",
        }
    }
}

/// Default-score policy for ingested contexts without an explicit score.
///
/// Single extension point: every kind currently shares one baseline; a kind
/// that warrants a different default gets its arm here and nowhere else.
pub fn default_relevance(_kind: ContextType) -> f64 {
    DEFAULT_RELEVANCE_SCORE
}

/// A stored knowledge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContextType,
    pub content: String,
    pub metadata: ContextMetadata,
    /// Cross-reference hints. Never validated for existence and never
    /// consulted by similarity scoring.
    #[serde(default)]
    pub related_context_ids: Vec<String>,
}

/// Required sub-record carried by every context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Order-insignificant for matching; duplicates are kept as supplied.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Intrinsic, query-independent importance in [0, 1].
    pub relevance_score: f64,
    /// Set once at first store.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful store or update.
    pub updated_at: DateTime<Utc>,
}

/// Ingestion payload: what a caller supplies to create a context.
///
/// Unknown fields are rejected rather than ignored, so schema drift between
/// clients and the store surfaces as a validation failure at the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContextPayload {
    /// Optional caller-chosen id; the store assigns one when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContextType,
    pub content: String,
    pub metadata: MetadataPayload,
    #[serde(default)]
    pub related_context_ids: Vec<String>,
}

/// Metadata fields accepted at ingestion. Timestamps are never accepted from
/// callers; the store assigns them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetadataPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

impl ContextPayload {
    /// Validate the defaultable-field rules that the type system cannot
    /// express: a non-empty title and an in-range explicit score.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.metadata.title.trim().is_empty() {
            return Err(StoreError::Validation(
                "metadata.title must be non-empty".into(),
            ));
        }
        if let Some(score) = self.metadata.relevance_score {
            validate_score(score)?;
        }
        Ok(())
    }

    /// Materialize a full record: id kept as supplied (empty when absent, the
    /// storage backend assigns one), both timestamps set to `now`, and the
    /// default-score policy applied when the payload carries no score.
    pub fn into_context(self, now: DateTime<Utc>) -> Context {
        let relevance_score = self
            .metadata
            .relevance_score
            .unwrap_or_else(|| default_relevance(self.kind));
        Context {
            id: self.id.unwrap_or_default(),
            kind: self.kind,
            content: self.content,
            metadata: ContextMetadata {
                title: self.metadata.title,
                description: self.metadata.description,
                tags: self.metadata.tags,
                language: self.metadata.language,
                contract_type: self.metadata.contract_type,
                author: self.metadata.author,
                relevance_score,
                created_at: now,
                updated_at: now,
            },
            related_context_ids: self.related_context_ids,
        }
    }
}

/// Partial update merged onto an existing record. Absent fields are left
/// untouched; `id` and `createdAt` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContextPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<ContextType>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Option<MetadataPatch>,
    #[serde(default)]
    pub related_context_ids: Option<Vec<String>>,
}

/// Patchable metadata fields. Timestamps are managed by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetadataPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

impl ContextPatch {
    /// Same field rules as ingestion, applied to whichever fields the patch
    /// carries.
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(meta) = &self.metadata {
            if let Some(title) = &meta.title {
                if title.trim().is_empty() {
                    return Err(StoreError::Validation(
                        "metadata.title must be non-empty".into(),
                    ));
                }
            }
            if let Some(score) = meta.relevance_score {
                validate_score(score)?;
            }
        }
        Ok(())
    }

    /// Merge onto `existing`. `updatedAt` is always overwritten with `now`;
    /// `createdAt` is always preserved.
    pub fn apply_to(self, existing: &mut Context, now: DateTime<Utc>) {
        if let Some(kind) = self.kind {
            existing.kind = kind;
        }
        if let Some(content) = self.content {
            existing.content = content;
        }
        if let Some(meta) = self.metadata {
            let m = &mut existing.metadata;
            if let Some(title) = meta.title {
                m.title = title;
            }
            if let Some(description) = meta.description {
                m.description = Some(description);
            }
            if let Some(tags) = meta.tags {
                m.tags = tags;
            }
            if let Some(language) = meta.language {
                m.language = Some(language);
            }
            if let Some(contract_type) = meta.contract_type {
                m.contract_type = Some(contract_type);
            }
            if let Some(author) = meta.author {
                m.author = Some(author);
            }
            if let Some(score) = meta.relevance_score {
                m.relevance_score = score;
            }
        }
        if let Some(related) = self.related_context_ids {
            existing.related_context_ids = related;
        }
        existing.metadata.updated_at = now;
    }
}

fn validate_score(score: f64) -> Result<(), StoreError> {
    if !(0.0..=1.0).contains(&score) {
        return Err(StoreError::Validation(format!(
            "metadata.relevanceScore must be within [0, 1], got {score}"
        )));
    }
    Ok(())
}
