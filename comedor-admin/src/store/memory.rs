//! In-process document store

use super::{DocumentStore, Filter, StoreError, StoreResult, WriteOp};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// Document store held in memory, used by the CLI and tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections = self.collections.read();
        let documents: usize = collections.values().map(BTreeMap::len).sum();
        f.debug_struct("MemoryStore")
            .field("collections", &collections.len())
            .field("documents", &documents)
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

fn require_object(collection: &str, id: &str, doc: &Value) -> StoreResult<()> {
    if doc.is_object() {
        Ok(())
    } else {
        Err(StoreError::Serialization(format!(
            "{} must be an object",
            path(collection, id)
        )))
    }
}

fn apply(collections: &mut Collections, op: WriteOp) -> StoreResult<()> {
    match op {
        WriteOp::Set {
            collection,
            id,
            doc,
        } => {
            require_object(&collection, &id, &doc)?;
            collections.entry(collection).or_default().insert(id, doc);
        }
        WriteOp::Update {
            collection,
            id,
            fields,
        } => {
            let target = collections
                .get_mut(&collection)
                .and_then(|docs| docs.get_mut(&id))
                .and_then(Value::as_object_mut)
                .ok_or_else(|| StoreError::NotFound(path(&collection, &id)))?;
            target.extend(fields);
        }
        WriteOp::Delete { collection, id } => {
            if let Some(docs) = collections.get_mut(&collection) {
                docs.remove(&id);
            }
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn create(&self, collection: &str, id: &str, doc: Value) -> StoreResult<()> {
        require_object(collection, id, &doc)?;
        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::Conflict(path(collection, id)));
        }
        docs.insert(id.to_string(), doc);
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, doc: Value) -> StoreResult<()> {
        apply(
            &mut self.collections.write(),
            WriteOp::Set {
                collection: collection.to_string(),
                id: id.to_string(),
                doc,
            },
        )
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        apply(
            &mut self.collections.write(),
            WriteOp::Update {
                collection: collection.to_string(),
                id: id.to_string(),
                fields,
            },
        )
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<(String, Value)>> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| filters.iter().all(|f| f.matches(doc)))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect())
    }

    async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let mut staged = collections.clone();
        for op in ops {
            apply(&mut staged, op)?;
        }
        *collections = staged;
        Ok(())
    }
}
