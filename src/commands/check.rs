//! Validate the manifest against the posts directory

use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{parse_frontmatter, Manifest};
use crate::Blog;

/// Problems found by [`inspect`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub posts: usize,
    /// Manifest filenames with no file in the posts directory
    pub missing_files: Vec<String>,
    /// Markdown files the manifest does not mention
    pub orphan_files: Vec<String>,
    pub duplicate_slugs: Vec<String>,
    /// Slugs whose date does not parse
    pub bad_dates: Vec<String>,
    /// (slug, manifest title, file title)
    pub title_mismatches: Vec<(String, String, String)>,
}

impl CheckReport {
    pub fn problem_count(&self) -> usize {
        self.missing_files.len()
            + self.orphan_files.len()
            + self.duplicate_slugs.len()
            + self.bad_dates.len()
            + self.title_mismatches.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx") | Some("markdown")
    )
}

/// Markdown files under `posts_dir`, as `/`-separated relative paths
fn markdown_files(posts_dir: &Path) -> BTreeSet<String> {
    WalkDir::new(posts_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_markdown(e.path()))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(posts_dir).ok()?;
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

/// Compare a manifest with the files in `posts_dir`
pub fn inspect(manifest: &Manifest, posts_dir: &Path) -> CheckReport {
    let files = markdown_files(posts_dir);
    let mut report = CheckReport {
        posts: manifest.posts.len(),
        ..Default::default()
    };

    let mut slug_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in &manifest.posts {
        *slug_counts.entry(post.slug.as_str()).or_insert(0) += 1;

        if post.frontmatter.parsed_date().is_none() {
            report.bad_dates.push(post.slug.clone());
        }

        let path = posts_dir.join(&post.filename);
        let Ok(content) = fs::read_to_string(&path) else {
            report.missing_files.push(post.filename.clone());
            continue;
        };

        if let Some(fm) = parse_frontmatter(&content) {
            if !fm.title.is_empty() && fm.title != post.frontmatter.title {
                report.title_mismatches.push((
                    post.slug.clone(),
                    post.frontmatter.title.clone(),
                    fm.title,
                ));
            }
        }
    }

    report.duplicate_slugs = slug_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug.to_string())
        .collect();

    let listed: BTreeSet<&str> = manifest.posts.iter().map(|p| p.filename.as_str()).collect();
    report.orphan_files = files
        .into_iter()
        .filter(|f| !listed.contains(f.as_str()))
        .collect();

    report
}

/// Print the report; fails when anything is wrong
pub fn run(blog: &Blog) -> Result<()> {
    let manifest = Manifest::read(&blog.manifest_path)
        .with_context(|| format!("Cannot check {:?}", blog.manifest_path))?;
    tracing::info!("Checking {} against {:?}", blog.config.manifest, blog.posts_dir);

    let report = inspect(&manifest, &blog.posts_dir);

    for file in &report.missing_files {
        println!("  missing file: {}", file);
    }
    for file in &report.orphan_files {
        println!("  not in manifest: {}", file);
    }
    for slug in &report.duplicate_slugs {
        println!("  duplicate slug: {}", slug);
    }
    for slug in &report.bad_dates {
        println!("  unparseable date: {}", slug);
    }
    for (slug, listed, actual) in &report.title_mismatches {
        println!(
            "  title mismatch: {} (manifest {:?}, file {:?})",
            slug, listed, actual
        );
    }

    if !report.is_clean() {
        bail!(
            "{} problem(s) found in {} post(s)",
            report.problem_count(),
            report.posts
        );
    }
    println!("{} post(s) OK", report.posts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> Manifest {
        Manifest::parse(json).unwrap()
    }

    #[test]
    fn test_clean_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "---\ntitle: A\n---\nbody\n").unwrap();
        let m = manifest(
            r#"{"posts": [{"slug": "a", "filename": "a.md", "frontmatter": {"title": "A", "date": "2024-06-01"}}]}"#,
        );
        let report = inspect(&m, dir.path());
        assert!(report.is_clean(), "{:?}", report);
        assert_eq!(report.posts, 1);
    }

    #[test]
    fn test_reports_every_problem() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("a.md"), "---\ntitle: Renamed\n---\nbody\n").unwrap();
        fs::write(dir.path().join("drafts/orphan.mdx"), "# Orphan\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not markdown").unwrap();
        let m = manifest(
            r#"{"posts": [
                {"slug": "a", "filename": "a.md", "frontmatter": {"title": "A", "date": "2024-06-01"}},
                {"slug": "a", "filename": "gone.md", "frontmatter": {"title": "Gone", "date": "someday"}}
            ]}"#,
        );

        let report = inspect(&m, dir.path());
        assert_eq!(report.missing_files, vec!["gone.md"]);
        assert_eq!(report.orphan_files, vec!["drafts/orphan.mdx"]);
        assert_eq!(report.duplicate_slugs, vec!["a"]);
        assert_eq!(report.bad_dates, vec!["a"]);
        assert_eq!(
            report.title_mismatches,
            vec![("a".to_string(), "A".to_string(), "Renamed".to_string())]
        );
        assert_eq!(report.problem_count(), 5);
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest(
            r#"{"posts": [{"slug": "a", "filename": "a.md", "frontmatter": {"title": "A", "date": "2024-06-01"}}]}"#,
        );
        let report = inspect(&m, &dir.path().join("nope"));
        assert_eq!(report.missing_files, vec!["a.md"]);
        assert!(report.orphan_files.is_empty());
    }

    #[test]
    fn test_run_fails_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(run(&blog).is_err());
    }
}
