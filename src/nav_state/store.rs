use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Key-value store for serialized navigation state.
///
/// Values are opaque JSON strings; typing happens in
/// [`super::save_state`] / [`super::take_state`].
pub trait StateStore: Send + Sync {
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn clear(&self, key: &str) -> Result<()>;

    /// Loads and clears in one step.
    fn take(&self, key: &str) -> Result<Option<String>> {
        let value = self.load(key)?;
        if value.is_some() {
            self.clear(key)?;
        }
        Ok(value)
    }
}

/// One `{key}.json` file per key inside a state directory.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn initialize(dir: PathBuf) -> Result<FileStateStore> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create state directory {:?}", dir))?;
        Ok(FileStateStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStateStore {
    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let mut file =
            File::create(&path).with_context(|| format!("Failed to write {:?}", path))?;
        file.write_all(value.as_bytes())?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut file = File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(Some(content))
    }

    fn clear(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
        }
        Ok(())
    }
}

/// In-process store, used when no state directory is configured and in tests.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
