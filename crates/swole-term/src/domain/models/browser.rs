use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// A navigable listing of one directory, driving the context tab's file
/// panel. Directories sort before files, both alphabetically.
#[derive(Debug)]
pub struct FileBrowser {
    cwd: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
}

impl FileBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Result<FileBrowser> {
        let cwd = root.into();
        let entries = read_entries(&cwd)?;
        Ok(FileBrowser {
            cwd,
            entries,
            selected: 0,
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Enters the selected directory. Returns whether navigation happened;
    /// a selected file leaves the browser untouched.
    pub fn descend(&mut self) -> Result<bool> {
        let target = match self.selected() {
            Some(entry) if entry.is_dir => entry.path.clone(),
            _ => return Ok(false),
        };

        self.cwd = target;
        self.refresh()?;
        Ok(true)
    }

    /// Moves to the parent directory, keeping the directory we came from
    /// selected.
    pub fn ascend(&mut self) -> Result<bool> {
        let previous = self.cwd.clone();
        let parent = match self.cwd.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return Ok(false),
        };

        self.cwd = parent;
        self.refresh()?;
        if let Some(index) = self.entries.iter().position(|entry| entry.path == previous) {
            self.selected = index;
        }
        Ok(true)
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.entries = read_entries(&self.cwd)?;
        self.selected = 0;
        Ok(())
    }
}

fn read_entries(dir: &Path) -> Result<Vec<BrowserEntry>> {
    let mut entries = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        entries.push(BrowserEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            is_dir: path.is_dir(),
            path,
        });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        fs::write(dir.path().join("utils.py"), "VERSION = 1\n").unwrap();
        dir
    }

    #[test]
    fn test_directories_sort_first() {
        let dir = fixture_tree();
        let browser = FileBrowser::new(dir.path()).unwrap();

        let names: Vec<_> = browser
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["src", "README.md", "utils.py"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let dir = fixture_tree();
        let mut browser = FileBrowser::new(dir.path()).unwrap();

        browser.select_up();
        assert_eq!(browser.selected_index(), 0);
        for _ in 0..10 {
            browser.select_down();
        }
        assert_eq!(browser.selected_index(), 2);
    }

    #[test]
    fn test_descend_and_ascend() {
        let dir = fixture_tree();
        let mut browser = FileBrowser::new(dir.path()).unwrap();

        assert!(browser.descend().unwrap());
        assert!(browser.cwd().ends_with("src"));
        assert_eq!(browser.entries().len(), 1);

        // Descending on a file is a no-op.
        assert!(!browser.descend().unwrap());

        assert!(browser.ascend().unwrap());
        assert_eq!(browser.cwd(), dir.path());
        assert_eq!(browser.selected().unwrap().name, "src");
    }
}
