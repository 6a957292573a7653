//! Locating scoring inputs on disk.
//!
//! Discovery only offers JSON that looks like something `fm` can score: a single
//! profile object (it has `dayMasterElement`) or an array of them. Table files,
//! exports and unrelated JSON are left out of the listing.

use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;

/// How many directory levels below the root are searched.
pub const DISCOVERY_DEPTH: usize = 3;

const IGNORED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// What a discovered JSON file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    Profile,
    /// An array with this many entries.
    Batch(usize),
}

impl InputShape {
    fn describe(self) -> String {
        match self {
            InputShape::Profile => "profile".to_string(),
            InputShape::Batch(1) => "batch of 1".to_string(),
            InputShape::Batch(n) => format!("batch of {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCandidate {
    pub path: PathBuf,
    pub shape: InputShape,
}

/// Scorable JSON files under `root`, breadth first, sorted by path.
pub fn discover_inputs(root: &Path, max_depth: usize) -> Vec<InputCandidate> {
    let mut pending = VecDeque::from([(root.to_path_buf(), 0usize)]);
    let mut found = Vec::new();

    while let Some((dir, depth)) = pending.pop_front() {
        let Ok(entries) = fs::read_dir(&dir) else {
            tracing::debug!(dir = %dir.display(), "skipping unreadable directory");
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => {
                    if depth < max_depth && !is_ignored_dir(&path) {
                        pending.push_back((path, depth + 1));
                    }
                }
                Ok(kind) if kind.is_file() && is_json_file(&path) => {
                    if let Some(shape) = classify(&path) {
                        found.push(InputCandidate { path, shape });
                    }
                }
                _ => {}
            }
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

/// `*.json` files directly inside `dir`, sorted. Used for directory batches.
pub fn list_profile_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::new(2, format!("Failed to list '{}': {e}", dir.display())))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_json_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Print the candidates to `out` and read a choice from `answers`.
///
/// A number selects from the list, any other text is taken as a path, `q` cancels.
pub fn choose_input<R: BufRead, W: Write>(
    candidates: &[InputCandidate],
    mut answers: R,
    mut out: W,
) -> Result<PathBuf, AppError> {
    let write_err = |e: std::io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(out, "Scorable JSON under the current directory:").map_err(write_err)?;
    for (n, candidate) in candidates.iter().enumerate() {
        writeln!(
            out,
            "{:>3}) {}  [{}]",
            n + 1,
            display_path(&candidate.path),
            candidate.shape.describe()
        )
        .map_err(write_err)?;
    }

    let mut line = String::new();
    loop {
        write!(out, "Choose 1-{}, type a path, or q: ", candidates.len()).map_err(write_err)?;
        out.flush().map_err(write_err)?;

        line.clear();
        let read = answers
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read selection: {e}")))?;
        if read == 0 {
            return Err(AppError::new(2, "No selection made. Pass an input with `-i <path>`."));
        }

        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        if let Ok(n) = answer.parse::<usize>() {
            match candidates.get(n.wrapping_sub(1)) {
                Some(candidate) => return Ok(candidate.path.clone()),
                None => {
                    writeln!(out, "No entry {n}.").map_err(write_err)?;
                    continue;
                }
            }
        }

        let typed = PathBuf::from(answer);
        if typed.exists() {
            return Ok(typed);
        }
        writeln!(out, "Not found: {answer}").map_err(write_err)?;
    }
}

fn classify(path: &Path) -> Option<InputShape> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(map) if map.contains_key("dayMasterElement") => Some(InputShape::Profile),
        Value::Array(items) if items.iter().any(|v| v.get("dayMasterElement").is_some()) => {
            Some(InputShape::Batch(items.len()))
        }
        _ => None,
    }
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const PROFILE: &str = r#"{"dayMasterElement":"fire","pillarElements":["fire","fire","fire","fire"]}"#;

    fn layout() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("me.json"), PROFILE).unwrap();
        fs::write(root.join("TEAM.JSON"), format!("[{PROFILE},{PROFILE}]")).unwrap();
        fs::write(root.join("tables.json"), r#"{"version":"x","tables":{}}"#).unwrap();
        fs::write(root.join("notes.txt"), PROFILE).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("target").join("cached.json"), PROFILE).unwrap();
        fs::create_dir_all(root.join("people").join("deep")).unwrap();
        fs::write(root.join("people").join("kim.json"), PROFILE).unwrap();
        fs::write(root.join("people").join("deep").join("lee.json"), PROFILE).unwrap();
        dir
    }

    fn names(found: &[InputCandidate], root: &Path) -> Vec<String> {
        found
            .iter()
            .map(|c| c.path.strip_prefix(root).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn lists_only_scorable_json_outside_build_dirs() {
        let dir = layout();
        let found = discover_inputs(dir.path(), DISCOVERY_DEPTH);
        let names = names(&found, dir.path());
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"me.json".to_string()));
        assert!(!names.iter().any(|n| n.contains("tables") || n.contains("target")));

        let team = found.iter().find(|c| c.path.ends_with("TEAM.JSON")).unwrap();
        assert_eq!(team.shape, InputShape::Batch(2));
    }

    #[test]
    fn depth_limits_the_walk() {
        let dir = layout();
        let shallow = names(&discover_inputs(dir.path(), 0), dir.path());
        assert_eq!(shallow.len(), 2);
        let one = names(&discover_inputs(dir.path(), 1), dir.path());
        assert!(one.iter().any(|n| n.ends_with("kim.json")));
        assert!(!one.iter().any(|n| n.ends_with("lee.json")));
    }

    #[test]
    fn directory_listing_is_flat_and_sorted() {
        let dir = layout();
        let files = list_profile_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
        assert_eq!(names, vec!["TEAM.JSON", "me.json", "tables.json"]);
        assert_eq!(list_profile_files(&dir.path().join("missing")).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn choice_by_number_skips_blank_and_out_of_range_answers() {
        let candidates = vec![
            InputCandidate { path: PathBuf::from("a.json"), shape: InputShape::Profile },
            InputCandidate { path: PathBuf::from("b.json"), shape: InputShape::Batch(3) },
        ];
        let mut shown = Vec::new();
        let chosen = choose_input(&candidates, Cursor::new("\n9\n2\n"), &mut shown).unwrap();
        assert_eq!(chosen, PathBuf::from("b.json"));

        let shown = String::from_utf8(shown).unwrap();
        assert!(shown.contains("2) b.json  [batch of 3]"));
        assert!(shown.contains("No entry 9."));
    }

    #[test]
    fn typed_paths_cancel_and_eof() {
        let dir = layout();
        let candidates = discover_inputs(dir.path(), 0);
        let typed = dir.path().join("people").join("kim.json");

        let chosen = choose_input(&candidates, Cursor::new(format!("nope.json\n{}\n", typed.display())), Vec::new());
        assert_eq!(chosen.unwrap(), typed);

        let canceled = choose_input(&candidates, Cursor::new("Q\n"), Vec::new()).unwrap_err();
        assert_eq!(canceled.exit_code(), 2);
        let eof = choose_input(&candidates, Cursor::new(""), Vec::new()).unwrap_err();
        assert!(eof.message().contains("-i"));
    }
}
