use archdocs_core::{ParserPipeline, RedirectStatus};
use archdocs_site::{Route, SiteBuilder, build_registry, render_document};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "content/docs/index.mdx",
        "---\ntitle: Arch Network Docs\ndescription: Build on Bitcoin\n---\n\n## Overview\n\nWelcome.\n",
    );
    write(
        root,
        "content/docs/quick-start/intro.mdx",
        concat!(
            "---\ntitle: Introduction\n---\n\n",
            "<Warning>\n  Testnet only.\n</Warning>\n\n",
            "```mermaid\ngraph TD; A-->B\n```\n\n",
            "```rust\nfn main() {}\n```\n",
        ),
    );
    write(root, "content/docs/quick-start/meta.json", r#"{"title": "Quick Start", "pages": ["intro"]}"#);
    write(root, "public/real-icon.png", "png");
    dir
}

#[test]
fn warning_renders_yellow_container_without_decoration() {
    let root = ParserPipeline::mdx()
        .parse("<Warning>\n  Careful.\n</Warning>\n")
        .expect("parses");
    let html = render_document(&root, &build_registry(None))
        .expect("renders")
        .html;
    assert!(html.contains("bg-yellow-50"), "{html}");
    assert!(html.contains("dark:bg-yellow-950/30"), "{html}");
    assert!(!html.contains("border"), "{html}");
    assert!(!html.contains("<svg"), "{html}");
}

#[test]
fn build_writes_pages_redirects_and_assets() {
    let dir = project();
    write(dir.path(), "out/docs/removed/index.html", "stale");
    let builder = SiteBuilder::new(dir.path(), Some("production")).expect("config loads");
    let report = builder.build().expect("build succeeds");

    assert_eq!(report.pages, 2);
    assert_eq!(report.redirects, 8);

    let out = dir.path().join("out");
    let index = fs::read_to_string(out.join("docs/index.html")).expect("index page");
    assert!(index.starts_with("<!DOCTYPE html>"));
    assert!(index.contains("<title>Arch Network Docs</title>"));
    assert!(index.contains(r##"<a href="#overview">Overview</a>"##));
    assert!(index.contains(r#"<img src="/arch-logo.svg" alt="Arch Network Logo" width="100" height="25" class="dark:hidden" />"#));
    assert!(index.contains(r#"<img src="/arch-logo-dark.svg" alt="Arch Network Logo" width="100" height="25" class="hidden dark:block" />"#));
    assert!(!out.join("docs/removed").exists(), "stale output survived the build");

    let intro = fs::read_to_string(out.join("docs/quick-start/intro/index.html")).expect("intro page");
    assert!(intro.contains("bg-yellow-50"));
    assert!(intro.contains(r#"<pre class="mermaid">graph TD; A--&gt;B</pre>"#), "{intro}");
    assert!(intro.contains("Quick Start"));

    assert!(out.join("404.html").is_file());
    assert_eq!(fs::read_to_string(out.join("real-icon.png")).expect("asset copied"), "png");

    let redirects: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("redirects.json")).expect("redirects"))
            .expect("valid json");
    assert_eq!(redirects[0]["source"], "/");
    assert_eq!(redirects[0]["destination"], "/docs");
    assert_eq!(redirects[0]["statusCode"], 308);

    let manifest: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join(".source/pages.json")).expect("manifest"),
    )
    .expect("valid json");
    assert_eq!(manifest[1]["url"], "/docs/quick-start/intro");
    assert!(manifest[1].get("html").is_none());
}

#[test]
fn environments_change_the_redirect_table() {
    let dir = project();
    write(
        dir.path(),
        "archdocs.yaml",
        "environments:\n  preview:\n    redirects: root-only\n  offline:\n    redirects: none\n",
    );

    let preview = SiteBuilder::new(dir.path(), Some("preview")).expect("config loads");
    let site = preview.prepare().expect("site compiles");
    assert_eq!(
        site.router().resolve("/"),
        Route::Redirect {
            location: "/docs".to_string(),
            status: RedirectStatus::Permanent,
        }
    );
    assert_eq!(site.router().resolve("/docs/Quick-Start/intro"), Route::NotFound);

    let offline = SiteBuilder::new(dir.path(), Some("offline")).expect("config loads");
    assert!(offline.redirects().expect("table compiles").is_empty());
}

#[test]
fn invalid_content_stops_the_build() {
    let dir = project();
    write(dir.path(), "content/docs/broken.mdx", "---\ntitle: 42\n---\n");
    let builder = SiteBuilder::new(dir.path(), Some("production")).expect("config loads");
    let err = builder.build().expect_err("schema violation");
    assert!(err.is_content());
    assert!(err.to_string().contains("broken.mdx"), "{err}");
    assert!(!dir.path().join("out").exists());
}
