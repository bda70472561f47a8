use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{KeyValueStore, StoreError, StoreResult};

/// Store persisted as one JSON object of `key -> text` on disk.
///
/// The whole object is kept in memory and rewritten on every change, so a
/// `get` never touches the filesystem.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// A file that does not parse is moved aside to `<name>.corrupt` and the
    /// store starts empty.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match parse_entries(&path, &content) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding corrupted storage file");
                    set_aside(&path);
                    Map::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened storage file");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

fn set_aside(path: &Path) {
    let target = corrupt_path(path);
    match fs::rename(path, &target) {
        Ok(()) => tracing::info!(path = %target.display(), "kept corrupted storage file"),
        Err(err) => tracing::warn!(error = %err, "failed to move corrupted storage file"),
    }
}

fn parse_entries(path: &Path, content: &str) -> StoreResult<Map<String, Value>> {
    let corrupt = |reason: String| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let value: Value = serde_json::from_str(content).map_err(|e| corrupt(e.to_string()))?;
    let Value::Object(entries) = value else {
        return Err(corrupt("top level is not an object".to_string()));
    };

    if let Some((key, _)) = entries.iter().find(|(_, v)| !v.is_string()) {
        return Err(corrupt(format!("value for {key} is not text")));
    }

    Ok(entries)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(store.get("quizAnswers").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("quizAnswers", r#"{"0":"A"}"#).unwrap();
        store.set("quizResults", r#"{"0":true}"#).unwrap();
        store.delete("quizResults").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("quizAnswers").unwrap().as_deref(),
            Some(r#"{"0":"A"}"#)
        );
        assert_eq!(reopened.get("quizResults").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_garbage_file_is_set_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("quizAnswers").unwrap(), None);
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("storage.json.corrupt")).unwrap(),
            "not json"
        );
    }

    #[test]
    fn test_non_text_value_is_set_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{ "quizAnswers": { "0": "A" } }"#).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("quizAnswers").unwrap(), None);
    }

    #[test]
    fn test_truncated_file_still_runs_quiz() {
        use crate::engine::{QuizEngine, ANSWERS_KEY};
        use crate::models::Question;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"quizAnswers": "{\"0\":\"A\"}", "quizRes"#).unwrap();

        let store = FileStore::open(&path).unwrap();
        let questions = vec![Question::new("1 + 1?", &[("A", "2"), ("B", "3")], "A")];
        let mut engine = QuizEngine::new(questions, store);
        assert!(engine.answers().is_empty());

        engine.select_option(0, "B");
        assert_eq!(engine.sync_error(), None);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(ANSWERS_KEY).unwrap().as_deref(), Some(r#"{"0":"B"}"#));
    }
}
