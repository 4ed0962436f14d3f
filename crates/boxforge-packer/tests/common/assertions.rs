//! Custom assertions for rendered workspace content

use boxforge_packer::ScaffoldFile;

/// Find a rendered file by its workspace-relative path
pub fn find_file<'a>(files: &'a [ScaffoldFile], path: &str) -> &'a ScaffoldFile {
    files
        .iter()
        .find(|f| f.relative_path == path)
        .unwrap_or_else(|| {
            let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
            panic!("no rendered file at {path}, have: {paths:?}")
        })
}

/// Assert a rendered file contains the given snippet
pub fn assert_file_contains(files: &[ScaffoldFile], path: &str, needle: &str) {
    let file = find_file(files, path);
    assert!(
        file.contents.contains(needle),
        "{path} does not contain {needle:?}\n--- rendered ---\n{}",
        file.contents
    );
}

/// Assert a rendered file does not contain the given snippet
pub fn assert_file_lacks(files: &[ScaffoldFile], path: &str, needle: &str) {
    let file = find_file(files, path);
    assert!(
        !file.contents.contains(needle),
        "{path} unexpectedly contains {needle:?}\n--- rendered ---\n{}",
        file.contents
    );
}

/// Shallow HCL sanity check: braces balance once quoted strings are skipped
pub fn assert_balanced_hcl(content: &str) {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for ch in content.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0, "closing brace without opener in rendered HCL");
    }

    assert!(!in_string, "unterminated string in rendered HCL");
    assert_eq!(depth, 0, "unbalanced braces in rendered HCL");
}
