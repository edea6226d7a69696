//! Lint: module docs use inner `//!` comments.
//!
//! An outer `///` block at the top of a file documents the first item below
//! it (in `cat/mod.rs` that is `pub mod actions`), not the module.

use std::fs;
use std::path::Path;

/// True when the file opens with an outer doc comment.
fn starts_with_outer_doc(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.starts_with("///"))
        .unwrap_or(false)
}

#[test]
fn module_docs_are_inner_comments() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut offenders = Vec::new();
    visit_rs_files(&src_dir, &mut offenders);

    assert!(
        offenders.is_empty(),
        "use //! for module docs in:\n  {}",
        offenders.join("\n  ")
    );
}

fn visit_rs_files(dir: &Path, offenders: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_rs_files(&path, offenders);
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            if starts_with_outer_doc(&source) {
                offenders.push(path.display().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_outer_doc_at_top() {
        assert!(starts_with_outer_doc("/// Cat Clicker\n\npub mod actions;\n"));
        assert!(starts_with_outer_doc("\n\n/// Catalog\nuse serde::Deserialize;\n"));
    }

    #[test]
    fn accepts_inner_doc_and_plain_code() {
        assert!(!starts_with_outer_doc("//! Cat Clicker\n\n/// Ids\npub mod actions;\n"));
        assert!(!starts_with_outer_doc("mod cat;\n"));
        assert!(!starts_with_outer_doc(""));
    }
}
