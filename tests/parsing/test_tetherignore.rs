// Tests for .tetherignore and .gitignore handling during discovery.
use tether_parsers::walker::{FileWalker, IGNORE_FILE_NAME};

use crate::common::write_project;

fn walked(dir: &std::path::Path) -> Vec<String> {
    FileWalker::new(dir)
        .walk()
        .iter()
        .map(|e| {
            e.path
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
/// Files matching .tetherignore glob patterns should be excluded from walking.
fn test_tetherignore_excludes_matching_files() {
    let dir = write_project(&[
        ("src/app.ts", "export const app = 1;"),
        ("src/app.test.ts", "test('works', () => {});"),
        (IGNORE_FILE_NAME, "*.test.ts\n"),
    ]);
    assert_eq!(walked(dir.path()), vec!["src/app.ts"]);
}

#[test]
/// .gitignore is honoured without a git repository.
fn test_gitignore_is_honoured() {
    let dir = write_project(&[
        ("src/app.ts", "export const app = 1;"),
        ("dist/app.js", "exports.app = 1;"),
        (".gitignore", "dist/\n"),
    ]);
    assert_eq!(walked(dir.path()), vec!["src/app.ts"]);
}

#[test]
/// Declaration files and every supported extension are discovered.
fn test_supported_extensions() {
    let dir = write_project(&[
        ("a.ts", ""),
        ("b.tsx", ""),
        ("c.mts", ""),
        ("d.cjs", ""),
        ("e.d.ts", ""),
        ("f.json", "{}"),
        ("g.css", ""),
    ]);
    assert_eq!(
        walked(dir.path()),
        vec!["a.ts", "b.tsx", "c.mts", "d.cjs", "e.d.ts"]
    );
}
