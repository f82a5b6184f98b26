use super::{normalize, run};
use crate::config::{Config, Options};
use crate::error::Error;
use crate::fs::{MemoryFs, TokioFs};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn options(base: &Path, docs: &str, section: &str) -> Options {
    Options::new(base, docs, Some(section.to_string()), None, &Config::default()).unwrap()
}

fn guides_fs() -> MemoryFs {
    let fs = MemoryFs::new();
    fs.add_file("/repo/README.md", "# Docs\n\n## Guides\n\n## Other\n");
    fs.add_file("/repo/guides/intro.md", "# Intro");
    fs.add_file("/repo/guides/setup.md", "# Setup");
    fs
}

#[tokio::test]
async fn test_end_to_end_in_memory() {
    let fs = guides_fs();
    let outcome = run(&fs, &options(Path::new("/repo"), "guides", "Guides"))
        .await
        .unwrap();

    let expected = "# Docs\n\n## Guides\n\n* [intro](guides/intro.md)\n* [setup](guides/setup.md)\n\n## Other\n";
    assert_eq!(fs.contents("/repo/README.md").as_deref(), Some(expected));
    assert_eq!(outcome.content, expected);
    assert_eq!(outcome.documents, 2);
    assert!(outcome.changed);
    assert!(outcome.written);
    assert!(outcome.edit.section_found);
    assert_eq!(outcome.root_file, PathBuf::from("/repo/README.md"));
}

#[tokio::test]
async fn test_second_run_changes_nothing() {
    let fs = guides_fs();
    let opts = options(Path::new("/repo"), "guides", "Guides");

    let first = run(&fs, &opts).await.unwrap();
    let second = run(&fs, &opts).await.unwrap();

    assert_eq!(first.content, second.content);
    assert!(!second.changed);
    assert!(!second.written);
}

#[tokio::test]
async fn test_end_to_end_on_disk() {
    let dir = TempDir::new().unwrap();
    let base = dir.path();
    let original = "# Docs\n\nIntro text.\n\n## Guides\n\nstale\n\n## Other\n\nUntouched.\n";
    fs::write(base.join("README.md"), original).unwrap();
    fs::create_dir_all(base.join("guides/and more")).unwrap();
    fs::write(base.join("guides/intro.md"), "").unwrap();
    fs::write(base.join("guides/and more/set up.md"), "").unwrap();

    run(&TokioFs, &options(base, "guides", "guides"))
        .await
        .unwrap();

    let updated = fs::read_to_string(base.join("README.md")).unwrap();
    assert!(updated.starts_with("# Docs\n\nIntro text.\n\n## Guides\n\n"));
    assert!(updated.ends_with("\n\n## Other\n\nUntouched.\n"));
    assert!(updated.contains("* [intro](guides/intro.md)\n"));
    assert!(updated.contains("* [set up](guides/and&#32;more/set&#32;up.md)\n"));
    assert!(!updated.contains("stale"));
}

#[tokio::test]
async fn test_missing_section_is_appended() {
    let fs = guides_fs();
    run(&fs, &options(Path::new("/repo"), "guides", "Summary"))
        .await
        .unwrap();

    let content = fs.contents("/repo/README.md").unwrap();
    assert_eq!(
        content,
        "# Docs\n\n## Guides\n\n## Other\n\n# Summary\n\n* [intro](guides/intro.md)\n* [setup](guides/setup.md)\n"
    );
}

#[tokio::test]
async fn test_dry_run_leaves_file_alone() {
    let fs = guides_fs();
    let mut opts = options(Path::new("/repo"), "guides", "Guides");
    opts.dry_run = true;

    let outcome = run(&fs, &opts).await.unwrap();

    assert!(outcome.changed);
    assert!(!outcome.written);
    assert_eq!(
        fs.contents("/repo/README.md").as_deref(),
        Some("# Docs\n\n## Guides\n\n## Other\n")
    );
}

#[tokio::test]
async fn test_missing_or_empty_root_file() {
    let fs = MemoryFs::new();
    fs.add_file("/repo/guides/intro.md", "");

    let err = run(&fs, &options(Path::new("/repo"), "guides", "Guides"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RootFileMissing { .. }));
    assert_eq!(err.to_string(), "No README.md file found to be updated");

    fs.add_file("/repo/README.md", "");
    let err = run(&fs, &options(Path::new("/repo"), "guides", "Guides"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RootFileMissing { .. }));
}

#[tokio::test]
async fn test_missing_docs_folder() {
    let fs = MemoryFs::new();
    fs.add_file("/repo/README.md", "# Readme\n");

    let err = run(&fs, &options(Path::new("/repo"), "nope", "Docs"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Traversal { ref path, .. } if path == Path::new("/repo/nope")));
    assert_eq!(fs.contents("/repo/README.md").as_deref(), Some("# Readme\n"));
}

#[tokio::test]
async fn test_no_documents() {
    let fs = MemoryFs::new();
    fs.add_file("/repo/README.md", "# Readme\n");
    fs.add_file("/repo/docs/notes.txt", "");

    let err = run(&fs, &options(Path::new("/repo"), "docs", "Docs"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoDocuments(ref path) if path == Path::new("/repo/docs")));
    assert_eq!(err.to_string(), "No documents found in /repo/docs");
}

#[tokio::test]
async fn test_write_failure_is_an_error() {
    let fs = guides_fs();
    fs.set_read_only(true);

    let err = run(&fs, &options(Path::new("/repo"), "guides", "Guides"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
}

#[tokio::test]
async fn test_docs_folder_defaults_to_base() {
    let fs = MemoryFs::new();
    fs.add_file("/repo/README.md", "# Repo\n\n## Docs\n");
    fs.add_file("/repo/CONTRIBUTING.md", "");
    fs.add_file("/repo/node_modules/dep/README.md", "");
    fs.add_file("/repo/node_modules/dep/guide.md", "");

    run(&fs, &options(Path::new("/repo"), "./", "Docs"))
        .await
        .unwrap();

    assert_eq!(
        fs.contents("/repo/README.md").as_deref(),
        Some("# Repo\n\n## Docs\n\n* [CONTRIBUTING](CONTRIBUTING.md)\n")
    );
}

#[test]
fn test_normalize() {
    assert_eq!(normalize(Path::new("/repo/./docs/../guides")), PathBuf::from("/repo/guides"));
    assert_eq!(normalize(Path::new("/repo/docs/.")), PathBuf::from("/repo/docs"));
    assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
}
