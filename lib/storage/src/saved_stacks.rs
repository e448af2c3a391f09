//! Named stacks saved by users, persisted as one JSON document

use crate::json_file::{read_json, write_json_atomic};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use peptalk_core::{CompoundKind, Error, Result, StackItemRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SCHEMA_VERSION: &str = "saved_stacks_v1";
pub const MAX_NAME_CHARS: usize = 80;
pub const MAX_ITEMS: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<StackItemRef>,
}

/// Save request; an absent or unknown `id` creates a new stack
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub items: Vec<StackItemRef>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedStacksDoc {
    schema_version: String,
    #[serde(default)]
    stacks: Vec<SavedStack>,
}

/// Trimmed, at most [`MAX_NAME_CHARS`] characters
pub fn normalize_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_CHARS).collect()
}

/// Trim slugs, drop empties, dedupe on `kind:slug`, cap at [`MAX_ITEMS`]
pub fn normalize_items(items: &[StackItemRef]) -> Vec<StackItemRef> {
    let mut out: Vec<StackItemRef> = Vec::new();
    for item in items {
        let slug = item.slug.trim();
        if slug.is_empty() || out.iter().any(|o| o.kind == item.kind && o.slug == slug) {
            continue;
        }
        out.push(StackItemRef {
            kind: item.kind,
            slug: slug.to_string(),
        });
        if out.len() >= MAX_ITEMS {
            break;
        }
    }
    out
}

/// `stk_<8 hex>_<base36 millis>`
fn new_stack_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("stk_{}_{}", &random[..8], to_base36(now.timestamp_millis().max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

pub struct SavedStackStore {
    path: PathBuf,
    stacks: RwLock<Vec<SavedStack>>,
}

impl SavedStackStore {
    /// Load the store at `path`; a missing file starts empty
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc: Option<SavedStacksDoc> =
            read_json(&path).map_err(|e| Error::Storage(format!("{:#}", e)))?;

        let stacks = match doc {
            Some(doc) if doc.schema_version == SCHEMA_VERSION => doc
                .stacks
                .into_iter()
                .filter_map(|mut s| {
                    s.id = s.id.trim().to_string();
                    s.name = normalize_name(&s.name);
                    s.items = normalize_items(&s.items);
                    (!s.id.is_empty() && !s.name.is_empty()).then_some(s)
                })
                .collect(),
            Some(doc) => {
                warn!(
                    "Ignoring saved stacks at {:?}: unsupported schema '{}'",
                    path, doc.schema_version
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        info!("Loaded {} saved stacks", stacks.len());
        Ok(Self {
            path,
            stacks: RwLock::new(stacks),
        })
    }

    /// Create or replace a stack. The name and items are normalized first;
    /// an empty name or no usable items is rejected.
    pub fn upsert(&self, input: StackInput) -> Result<SavedStack> {
        let name = normalize_name(&input.name);
        if name.is_empty() {
            return Err(Error::InvalidStack("name is required".to_string()));
        }
        let items = normalize_items(&input.items);
        if items.is_empty() {
            return Err(Error::InvalidStack("at least one item is required".to_string()));
        }

        let now = Utc::now();
        let id = input
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| new_stack_id(now));
        let goal_id = input.goal_id.filter(|g| !g.trim().is_empty());

        // edit a copy; memory only changes once the write lands
        let mut stacks = self.stacks.write();
        let mut next = stacks.clone();
        let created_at = match next.iter().position(|s| s.id == id) {
            Some(idx) => next.remove(idx).created_at,
            None => now,
        };

        let saved = SavedStack {
            id,
            name,
            goal_id,
            created_at,
            updated_at: now,
            items,
        };
        next.insert(0, saved.clone());
        self.persist(&next)?;
        *stacks = next;
        Ok(saved)
    }

    pub fn get(&self, id: &str) -> Option<SavedStack> {
        let id = id.trim();
        self.stacks.read().iter().find(|s| s.id == id).cloned()
    }

    /// Newest `updated_at` first
    pub fn list(&self) -> Vec<SavedStack> {
        let mut stacks = self.stacks.read().clone();
        stacks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        stacks
    }

    /// Returns false when no stack has this id
    pub fn delete(&self, id: &str) -> Result<bool> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(false);
        }

        let mut stacks = self.stacks.write();
        let next: Vec<SavedStack> = stacks.iter().filter(|s| s.id != id).cloned().collect();
        if next.len() == stacks.len() {
            return Ok(false);
        }
        self.persist(&next)?;
        *stacks = next;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.stacks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.read().is_empty()
    }

    fn persist(&self, stacks: &[SavedStack]) -> Result<()> {
        let doc = SavedStacksDoc {
            schema_version: SCHEMA_VERSION.to_string(),
            stacks: stacks.to_vec(),
        };
        write_json_atomic(&self.path, &doc).map_err(|e| Error::Storage(format!("{:#}", e)))
    }
}

/// Peptide reference shorthand, mostly for callers building inputs by hand
pub fn peptide_ref(slug: &str) -> StackItemRef {
    StackItemRef {
        kind: CompoundKind::Peptide,
        slug: slug.to_string(),
    }
}
