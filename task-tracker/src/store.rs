use crate::error::StoreError;
use crate::task::{Status, Task};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What [`TaskStore::load`] does with a backing file that is not valid JSON.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Treat the file as an empty collection. The next save overwrites it.
    #[default]
    Recover,
    /// Surface [`StoreError::Corrupt`].
    Fail,
}

/// Handle on a JSON file holding the whole task collection.
///
/// Every operation reads the full collection, changes it in memory and writes
/// it back before returning. Nothing is locked: two processes interleaving
/// their read-modify-write cycles on the same file lose updates, and the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    corrupt_policy: CorruptPolicy,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            corrupt_policy: CorruptPolicy::default(),
        }
    }

    pub fn with_corrupt_policy(mut self, corrupt_policy: CorruptPolicy) -> Self {
        self.corrupt_policy = corrupt_policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn corrupt_policy(&self) -> CorruptPolicy {
        self.corrupt_policy
    }

    /// Reads the persisted collection.
    ///
    /// A missing file is an empty collection. An unparsable file is handled
    /// according to the store's [`CorruptPolicy`].
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Task store does not exist yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Vec<Task>>(&contents) {
            Ok(tasks) => {
                debug!("Loaded {} tasks", tasks.len());
                Ok(tasks)
            }
            Err(source) => match self.corrupt_policy {
                CorruptPolicy::Recover => {
                    warn!("Ignoring unreadable task store: {}", source);
                    Ok(Vec::new())
                }
                CorruptPolicy::Fail => Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }),
            },
        }
    }

    /// Replaces the persisted collection with `tasks`.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over the backing file.
    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display(), count = tasks.len()))]
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(write_error)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_error(e));
        }
        debug!("Saved {} tasks", tasks.len());
        Ok(())
    }

    /// Appends a new `todo` task and returns its id.
    #[tracing::instrument(skip(self, description))]
    pub fn add(&self, description: impl Into<String>) -> Result<u64, StoreError> {
        let mut tasks = self.load()?;
        let id = next_id(&tasks)?;
        tasks.push(Task::new(id, description.into()));
        self.save(&tasks)?;
        info!(id, "Task added");
        Ok(id)
    }

    /// Returns the stored tasks, optionally only those with `filter` status,
    /// in stored order.
    #[tracing::instrument(skip(self))]
    pub fn list(&self, filter: Option<Status>) -> Result<Vec<Task>, StoreError> {
        let tasks = self.load()?;
        Ok(match filter {
            Some(status) => tasks
                .into_iter()
                .filter(|task| task.status() == status)
                .collect(),
            None => tasks,
        })
    }

    /// Replaces the description of task `id`.
    #[tracing::instrument(skip(self, description))]
    pub fn update(&self, id: u64, description: impl Into<String>) -> Result<Task, StoreError> {
        self.modify(id, |task| task.set_description(description.into()))
    }

    /// Removes task `id` and returns it.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<Task, StoreError> {
        let mut tasks = self.load()?;
        let position = position_of(&tasks, id)?;
        let removed = tasks.remove(position);
        self.save(&tasks)?;
        info!(id, "Task deleted");
        Ok(removed)
    }

    /// Moves task `id` to `status`. Any status may follow any other.
    #[tracing::instrument(skip(self))]
    pub fn set_status(&self, id: u64, status: Status) -> Result<Task, StoreError> {
        self.modify(id, |task| task.set_status(status))
    }

    fn modify(&self, id: u64, change: impl FnOnce(&mut Task)) -> Result<Task, StoreError> {
        let mut tasks = self.load()?;
        let position = position_of(&tasks, id)?;
        change(&mut tasks[position]);
        let updated = tasks[position].clone();
        self.save(&tasks)?;
        info!(id, status = %updated.status(), "Task updated");
        Ok(updated)
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut name = name.to_os_string();
                name.push(".tmp");
                self.path.with_file_name(name)
            }
            None => self.path.with_extension("tmp"),
        }
    }
}

fn next_id(tasks: &[Task]) -> Result<u64, StoreError> {
    match tasks.iter().map(Task::id).max() {
        Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted(max)),
        None => Ok(1),
    }
}

fn position_of(tasks: &[Task], id: u64) -> Result<usize, StoreError> {
    tasks
        .iter()
        .position(|task| task.id() == id)
        .ok_or(StoreError::TaskNotFound(id))
}
