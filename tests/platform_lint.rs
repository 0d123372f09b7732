//! Architecture lint - browser APIs stay behind the theme adapters.
//!
//! The controller must run unchanged under SSR and in tests, so only the
//! browser adapter module may name `web_sys` or `wasm_bindgen`. Everything
//! else talks to the browser through the traits in `theme::ports`.

use std::fs;
use walkdir::WalkDir;

const BROWSER_CRATES: &[&str] = &["web_sys", "wasm_bindgen", "js_sys"];

/// Files allowed to touch browser APIs directly
const ALLOWED_FILES: &[&str] = &["src/theme/web.rs"];

#[test]
fn lint_browser_apis_confined_to_adapters() {
    let mut violations = Vec::new();

    for entry in WalkDir::new("src").into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "rs") {
            continue;
        }
        let normalized = path.to_string_lossy().replace('\\', "/");
        if ALLOWED_FILES.iter().any(|f| normalized.ends_with(f)) {
            continue;
        }

        let src = fs::read_to_string(path).expect("read source file");
        for (line_no, line) in src.lines().enumerate() {
            let code = line.split("//").next().unwrap_or("");
            if BROWSER_CRATES.iter().any(|c| code.contains(&format!("{}::", c))) {
                violations.push(format!("{}:{}: {}", normalized, line_no + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Browser APIs used outside the theme adapters:\n{}",
        violations.join("\n")
    );
}

/// The controller must not reach for globals; everything is injected.
#[test]
fn lint_controller_has_no_cfg_wasm() {
    let src = fs::read_to_string("src/theme/controller.rs").expect("read controller");
    assert!(
        !src.contains("target_arch"),
        "controller.rs must stay platform independent"
    );
}
