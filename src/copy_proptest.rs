//! Property-based tests for the verbatim copy operation.
//!
//! These tests use proptest to generate random checkout trees and verify
//! that the exclusion and replacement invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::filesystem::{copy_tree, ExcludeList};
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use walkdir::WalkDir;

    // Directory and file names are drawn from disjoint alphabets so a
    // generated path can never be both. Excluded names are mixed in at a
    // meaningful rate.

    fn dir_name() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-z]{1,6}".prop_map(|s| format!("d{}", s)),
            1 => Just(".git".to_string()),
        ]
    }

    fn file_name() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-z]{1,6}".prop_map(|s| format!("f{}.txt", s)),
            1 => Just(".gitignore".to_string()),
            1 => Just(".nojekyll".to_string()),
        ]
    }

    fn tree() -> impl Strategy<Value = Vec<(Vec<String>, String, String)>> {
        proptest::collection::vec(
            (
                proptest::collection::vec(dir_name(), 0..3),
                file_name(),
                "[a-z]{0,16}",
            ),
            0..12,
        )
    }

    /// Write the generated entries under `src`, returning the unique
    /// relative file paths actually written.
    fn materialize(
        src: &Path,
        entries: &[(Vec<String>, String, String)],
    ) -> Vec<(PathBuf, String)> {
        let mut written = Vec::new();
        let mut seen = HashSet::new();
        for (dirs, file, content) in entries {
            let mut relative = PathBuf::new();
            for dir in dirs {
                relative.push(dir);
            }
            relative.push(file);
            if !seen.insert(relative.clone()) {
                continue;
            }
            let full = src.join(&relative);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, content).unwrap();
            written.push((relative, content.clone()));
        }
        written
    }

    /// Whether no component of `relative` matches the exclusion set.
    fn is_clean(relative: &Path, excludes: &ExcludeList) -> bool {
        relative
            .components()
            .all(|c| !excludes.is_excluded(&c.as_os_str().to_string_lossy()))
    }

    fn listing(root: &Path) -> Vec<(PathBuf, Option<String>)> {
        let mut entries: Vec<(PathBuf, Option<String>)> = WalkDir::new(root)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.depth() > 0)
            .map(|e| {
                let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
                let content = if e.file_type().is_file() {
                    Some(fs::read_to_string(e.path()).unwrap())
                } else {
                    None
                };
                (relative, content)
            })
            .collect();
        entries.sort();
        entries
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: no excluded name ever appears in the copy output,
        /// at any depth.
        #[test]
        fn copy_never_includes_excluded_entries(entries in tree()) {
            let temp = TempDir::new().unwrap();
            let src = temp.path().join("src");
            let dst = temp.path().join("dst");
            fs::create_dir(&src).unwrap();
            materialize(&src, &entries);
            let excludes = ExcludeList::with_defaults(&[]).unwrap();

            copy_tree(&src, &dst, &excludes).unwrap();

            for (relative, _) in listing(&dst) {
                prop_assert!(
                    is_clean(&relative, &excludes),
                    "excluded entry leaked into output: {}",
                    relative.display()
                );
            }
        }

        /// Property: every file that no exclusion applies to survives the
        /// copy with identical content, and the reported count matches.
        #[test]
        fn copy_preserves_clean_files(entries in tree()) {
            let temp = TempDir::new().unwrap();
            let src = temp.path().join("src");
            let dst = temp.path().join("dst");
            fs::create_dir(&src).unwrap();
            let written = materialize(&src, &entries);
            let excludes = ExcludeList::with_defaults(&[]).unwrap();

            let copied = copy_tree(&src, &dst, &excludes).unwrap();

            let mut expected = 0u64;
            for (relative, content) in &written {
                if is_clean(relative, &excludes) {
                    expected += 1;
                    let target = dst.join(relative);
                    prop_assert!(target.is_file(), "missing {}", relative.display());
                    prop_assert_eq!(&fs::read_to_string(target).unwrap(), content);
                }
            }
            prop_assert_eq!(copied, expected);
        }

        /// Property: the destination is replaced wholesale, so files from
        /// a previous build never survive into the new one.
        #[test]
        fn copy_replaces_stale_destination(entries in tree()) {
            let temp = TempDir::new().unwrap();
            let src = temp.path().join("src");
            let dst = temp.path().join("dst");
            fs::create_dir(&src).unwrap();
            materialize(&src, &entries);
            fs::create_dir_all(dst.join("stale-dir")).unwrap();
            fs::write(dst.join("stale-dir/old.html"), "old").unwrap();
            fs::write(dst.join("stale.html"), "old").unwrap();
            let excludes = ExcludeList::with_defaults(&[]).unwrap();

            copy_tree(&src, &dst, &excludes).unwrap();

            prop_assert!(!dst.join("stale.html").exists());
            prop_assert!(!dst.join("stale-dir").exists());
        }

        /// Property: copying the same source twice produces identical
        /// output trees, so rebuilds are reproducible.
        #[test]
        fn copy_is_deterministic(entries in tree()) {
            let temp = TempDir::new().unwrap();
            let src = temp.path().join("src");
            fs::create_dir(&src).unwrap();
            materialize(&src, &entries);
            let excludes = ExcludeList::with_defaults(&[]).unwrap();

            let first = temp.path().join("first");
            let second = temp.path().join("second");
            copy_tree(&src, &first, &excludes).unwrap();
            copy_tree(&src, &second, &excludes).unwrap();

            prop_assert_eq!(listing(&first), listing(&second));
        }
    }
}
