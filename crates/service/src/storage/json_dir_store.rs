use std::{marker::PhantomData, path::{Path, PathBuf}, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::ServiceError;

const EXTENSION: &str = ".json";
const INDENT: &[u8] = b"    ";

/// Generic JSON directory store: one pretty-printed file per key.
///
/// Keys map to `<dir>/<key>.json`. Callers are responsible for making keys
/// safe as file names. Writes go through a temporary file in the same
/// directory and an atomic rename, so readers see either the old or the new
/// document. There is no locking between writers; the last rename wins.
#[derive(Debug)]
pub struct JsonDirStore<V> {
    dir: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for JsonDirStore<V> {
    fn clone(&self) -> Self {
        Self { dir: self.dir.clone(), _value: PhantomData }
    }
}

impl<V> JsonDirStore<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Open the store rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| ServiceError::io(&dir, e))?;
        Ok(Arc::new(Self { dir, _value: PhantomData }))
    }

    /// Path of the document stored under `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}{EXTENSION}"))
    }

    /// Serialize `value` with 4-space indentation and replace the document
    /// under `key`. Returns the final path.
    pub async fn put(&self, key: &str, value: &V) -> Result<PathBuf, ServiceError> {
        let target = self.path_for(key);
        let bytes = to_pretty_vec(value)?;

        // Not ending in `.json` keeps in-flight writes out of `list_paths`.
        // The key is left out so the temp name never outgrows the target's.
        let tmp = self.dir.join(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&tmp, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            warn!(tmp = %tmp.display(), error = %e, "rename into place failed");
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io(&target, e));
        }
        debug!(path = %target.display(), bytes = bytes.len(), "document written");
        Ok(target)
    }

    /// Remove the document under `key`; returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::io(&path, e)),
        }
    }

    /// Paths of every regular file whose name ends in `.json`, in directory
    /// listing order.
    pub async fn list_paths(&self) -> Result<Vec<PathBuf>, ServiceError> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| ServiceError::io(&self.dir, e))?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| ServiceError::io(&self.dir, e))? {
            if !entry.file_name().to_string_lossy().ends_with(EXTENSION) {
                continue;
            }
            let path = entry.path();
            let meta = fs::metadata(&path).await.map_err(|e| ServiceError::io(&path, e))?;
            if meta.is_file() {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    /// Read and deserialize one document.
    pub async fn read(&self, path: &Path) -> Result<V, ServiceError> {
        let bytes = fs::read(path).await.map_err(|e| ServiceError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::malformed_record(path, e))
    }

    /// Read every document, failing on the first unreadable or malformed one.
    pub async fn read_all(&self) -> Result<Vec<(PathBuf, V)>, ServiceError> {
        let paths = self.list_paths().await?;
        let mut out = Vec::with_capacity(paths.len());
        for path in paths {
            let value = self.read(&path).await?;
            out.push((path, value));
        }
        Ok(out)
    }
}

fn to_pretty_vec<V: Serialize>(value: &V) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, temp_dir};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn json_dir_store_crud_persists() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        // initially empty
        assert!(store.read_all().await?.is_empty());

        // put and read back
        let path = store.put("a", &json!({"n": 1})).await?;
        assert_eq!(path, dir.join("a.json"));
        store.put("b", &json!({"n": 2})).await?;
        assert_eq!(store.read(&path).await?, json!({"n": 1}));

        // overwrite
        store.put("a", &json!({"n": 10})).await?;
        assert_eq!(store.read(&path).await?, json!({"n": 10}));

        // remove and reopen
        assert!(store.remove("b").await?);
        assert!(!store.remove("b").await?);
        let reopened = JsonDirStore::<Value>::new(&dir).await?;
        let all = reopened.read_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].1, json!({"n": 10}));

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn writes_four_space_indent_and_raw_utf8() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store_fmt");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        let path = store.put("k", &json!({"plate": "12가3456"})).await?;
        let text = tokio::fs::read_to_string(&path).await?;
        assert_eq!(text, "{\n    \"plate\": \"12가3456\"\n}");

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn object_keys_keep_insertion_order() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store_order");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        let body: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": 2, "a": 3}}"#)?;
        let path = store.put("ordered", &body).await?;
        let text = tokio::fs::read_to_string(&path).await?;
        assert_eq!(text, "{\n    \"zeta\": 1,\n    \"alpha\": {\n        \"b\": 2,\n        \"a\": 3\n    }\n}");

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn long_keys_up_to_the_name_limit_are_stored() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store_long");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        // 250 bytes + ".json" is the longest name most filesystems accept
        let key = "P".repeat(250);
        let path = store.put(&key, &json!({"long": true})).await?;
        assert_eq!(store.read(&path).await?, json!({"long": true}));

        // multi-byte plates hit the byte limit with far fewer characters
        let korean = "가".repeat(80);
        store.put(&korean, &json!([])).await?;
        assert_eq!(store.list_paths().await?.len(), 2);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn listing_skips_non_json_entries() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store_list");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        store.put("keep", &json!(1)).await?;
        tokio::fs::write(dir.join("notes.txt"), "ignored").await?;
        tokio::fs::write(dir.join(".abc.tmp"), "{").await?;
        tokio::fs::create_dir(dir.join("nested.json")).await?;

        let paths = store.list_paths().await?;
        assert_eq!(paths, vec![dir.join("keep.json")]);

        // no temp files left behind by put
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut tmp_count = 0;
        while let Some(e) = entries.next_entry().await? {
            if e.file_name().to_string_lossy().ends_with(".tmp") {
                tmp_count += 1;
            }
        }
        assert_eq!(tmp_count, 1, "only the hand-written temp file remains");

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn read_all_fails_on_malformed_document() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_dir_store_bad");
        let store = JsonDirStore::<Value>::new(&dir).await?;

        store.put("good", &json!({"ok": true})).await?;
        tokio::fs::write(dir.join("bad.json"), "{ not json").await?;

        let err = store.read_all().await.unwrap_err();
        match err {
            ServiceError::MalformedRecord { path, .. } => assert_eq!(path, dir.join("bad.json")),
            other => panic!("unexpected error: {other}"),
        }

        cleanup(&dir).await;
        Ok(())
    }
}
