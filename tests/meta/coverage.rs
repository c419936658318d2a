//! Keeps `tests/unit` mirroring `src` file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Relative paths of every directory and `.rs` file below `dir`
    fn relative_paths(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other("entry outside base directory"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                relative_paths(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let base = Path::new(root);
        let mut paths = BTreeSet::new();
        if let Err(error) = relative_paths(base, base, &mut paths) {
            assert!(!base.exists(), "Failed to scan {root}: {error}");
        }
        paths
    }

    /// Module organization and entry points carry no logic of their own
    fn is_organizational(path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        matches!(name, "mod.rs" | "main.rs" | "lib.rs")
    }

    // Tests every source file has a unit test file at the same relative path
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|path| !is_organizational(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the source file it covers
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|path| !is_organizational(path) && !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source counterparts:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests each unit test file is declared by its directory's mod.rs
    #[test]
    fn test_unit_tests_are_compiled() {
        let mut undeclared = Vec::new();
        for path in tree("tests/unit") {
            let Some(module) = path.strip_suffix(".rs") else {
                continue;
            };
            if is_organizational(&path) {
                continue;
            }
            let (parent, name) = module.rsplit_once('/').unwrap_or(("", module));
            let declaring = if parent.is_empty() {
                "tests/unit/main.rs".to_string()
            } else {
                format!("tests/unit/{parent}/mod.rs")
            };
            let declared = fs::read_to_string(&declaring)
                .is_ok_and(|content| content.lines().any(|line| line.trim() == format!("pub mod {name};")));
            if !declared {
                undeclared.push(format!("  - tests/unit/{path} (not declared in {declaring})"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "Unit test files that are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests every test file outside module organization defines a test
    #[test]
    fn test_all_test_files_contain_tests() {
        let empty: Vec<String> = tree("tests")
            .into_iter()
            .filter(|path| path.ends_with(".rs") && !is_organizational(path))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
