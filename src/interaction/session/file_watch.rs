use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

/// Modification-time poller for a fixed set of files.
#[derive(Debug, Default)]
pub struct FileWatch {
    pub paths: Vec<PathBuf>,
    last_mod: HashMap<PathBuf, SystemTime>,
}

impl FileWatch {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            last_mod: HashMap::new(),
        }
    }

    /// Record the current modification times without reporting a change.
    pub fn prime(&mut self) {
        let _ = self.poll();
    }

    /// True when any watched file appeared or was modified since the last poll.
    /// Missing files are ignored.
    pub fn poll(&mut self) -> bool {
        let mut dirty = false;
        for path in &self.paths {
            let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
                continue;
            };
            match self.last_mod.get(path) {
                Some(prev) if *prev >= modified => {}
                _ => {
                    self.last_mod.insert(path.clone(), modified);
                    dirty = true;
                }
            }
        }
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn reports_new_and_modified_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.ron");
        let mut watch = FileWatch::new(vec![path.clone()]);
        assert!(!watch.poll(), "missing file is not a change");

        std::fs::write(&path, "()").unwrap();
        assert!(watch.poll());
        assert!(!watch.poll());

        let file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        (&file).write_all(b" ").unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5)).unwrap();
        drop(file);
        assert!(watch.poll());
    }
}
