mod common;

use common::{NOT_FOUND_PAGE, TempSite, UNSUPPORTED_PAGE};
use lantern::config::StaticFilesConfig;
use lantern::files::StaticSite;
use lantern::files::mime::TEXT_HTML;
use lantern::http::response::StatusCode;
use std::collections::BTreeMap;

#[tokio::test]
async fn test_root_serves_index_document() {
    let fixture = TempSite::new();
    fixture.write("index.html", b"<p>hello</p>");
    let site = fixture.site();

    let content = site.resolve_content("/").await;

    assert_eq!(content.status, StatusCode::Ok);
    assert_eq!(content.content_type, TEXT_HTML);
    assert_eq!(&content.body[..], b"<p>hello</p>");
    assert_eq!(content, site.resolve_content("/index.html").await);
}

#[tokio::test]
async fn test_every_registered_extension_is_served() {
    let fixture = TempSite::new();
    let site = fixture.site();
    let cases = [
        ("page.htm", TEXT_HTML),
        ("site.css", "text/css"),
        ("app.js", "text/javascript"),
        ("a.png", "image/png"),
        ("b.jpg", "image/jpeg"),
        ("c.gif", "image/gif"),
        ("d.svg", "image/svg+xml"),
        ("e.webp", "image/webp"),
        ("favicon.ico", "image/ico"),
        ("f.woff", "font/woff"),
        ("g.woff2", "font/woff2"),
    ];

    for (name, mime) in cases {
        fixture.write(&format!("assets/{name}"), name.as_bytes());
        let content = site.resolve_content(&format!("/assets/{name}")).await;

        assert_eq!(content.status, StatusCode::Ok, "{name}");
        assert_eq!(content.content_type, mime, "{name}");
        assert_eq!(&content.body[..], name.as_bytes(), "{name}");
    }
}

#[tokio::test]
async fn test_uppercase_extension_is_served() {
    let fixture = TempSite::new();
    fixture.write("LOGO.PNG", b"\x89PNG");
    let site = fixture.site();

    let content = site.resolve_content("/LOGO.PNG").await;

    assert_eq!(content.status, StatusCode::Ok);
    assert_eq!(content.content_type, "image/png");
}

#[tokio::test]
async fn test_missing_file_is_not_found_whatever_the_extension() {
    let fixture = TempSite::new();
    let site = fixture.site();

    for resource in ["/missing.html", "/missing.xyz", "/missing", "/"] {
        let content = site.resolve_content(resource).await;

        assert_eq!(content.status, StatusCode::NotFound, "{resource}");
        assert_eq!(content.content_type, TEXT_HTML);
        assert_eq!(&content.body[..], NOT_FOUND_PAGE);
    }
}

#[tokio::test]
async fn test_unregistered_extension_is_unsupported() {
    let fixture = TempSite::new();
    fixture.write("data.xyz", b"secret contents");
    fixture.write("README", b"no extension");
    let site = fixture.site();

    for resource in ["/data.xyz", "/README"] {
        let content = site.resolve_content(resource).await;

        assert_eq!(content.status, StatusCode::UnsupportedMediaType, "{resource}");
        assert_eq!(content.content_type, TEXT_HTML);
        assert_eq!(&content.body[..], UNSUPPORTED_PAGE);
    }
}

#[tokio::test]
async fn test_directory_is_not_a_file() {
    let fixture = TempSite::new();
    fixture.write("folder.html/inner.txt", b"x");
    let site = fixture.site();

    let content = site.resolve_content("/folder.html").await;

    assert_eq!(content.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_missing_canned_pages_give_empty_bodies() {
    let fixture = TempSite::empty();
    fixture.write("data.xyz", b"abc");
    let site = fixture.site();

    let not_found = site.resolve_content("/nope.html").await;
    let unsupported = site.resolve_content("/data.xyz").await;

    assert_eq!(not_found.status, StatusCode::NotFound);
    assert!(not_found.body.is_empty());
    assert_eq!(unsupported.status, StatusCode::UnsupportedMediaType);
    assert!(unsupported.body.is_empty());
}

#[tokio::test]
async fn test_traversal_stays_inside_root() {
    let fixture = TempSite::new();
    fixture.write("public/index.html", b"public");
    fixture.write("private.html", b"private");
    let cfg = StaticFilesConfig {
        root: fixture.path("public"),
        error_pages: "../code".into(),
        ..StaticFilesConfig::default()
    };
    let site = StaticSite::load(&cfg).unwrap();

    let content = site.resolve_content("/../private.html").await;

    assert_eq!(content.status, StatusCode::NotFound);
    assert_eq!(&content.body[..], NOT_FOUND_PAGE);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_out_of_root_is_blocked() {
    let fixture = TempSite::new();
    fixture.write("public/index.html", b"public");
    let secret = fixture.write("secret.html", b"secret");
    std::os::unix::fs::symlink(&secret, fixture.path("public/leak.html")).unwrap();
    let cfg = StaticFilesConfig {
        root: fixture.path("public"),
        ..StaticFilesConfig::default()
    };
    let site = StaticSite::load(&cfg).unwrap();

    let content = site.resolve_content("/leak.html").await;

    assert_eq!(content.status, StatusCode::NotFound);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_is_internal_error() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TempSite::new();
    fixture.write("code/500.html", b"oops");
    let locked = fixture.write("locked.html", b"cannot read me");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read regardless of mode bits
    if std::fs::read(&locked).is_ok() {
        return;
    }

    let site = fixture.site();
    let content = site.resolve_content("/locked.html").await;

    assert_eq!(content.status, StatusCode::InternalServerError);
    assert_eq!(content.content_type, TEXT_HTML);
    assert_eq!(&content.body[..], b"oops");
}

#[tokio::test]
async fn test_configured_mime_types_are_served() {
    let fixture = TempSite::new();
    fixture.write("notes.txt", b"plain");
    let cfg = StaticFilesConfig {
        mime_types: BTreeMap::from([(".txt".to_string(), "text/plain".to_string())]),
        ..fixture.config()
    };
    let site = StaticSite::load(&cfg).unwrap();

    let content = site.resolve_content("/notes.txt").await;

    assert_eq!(content.status, StatusCode::Ok);
    assert_eq!(content.content_type, "text/plain");
}

#[test]
fn test_load_rejects_duplicate_mime_types() {
    let fixture = TempSite::new();
    let cfg = StaticFilesConfig {
        mime_types: BTreeMap::from([(".css".to_string(), "text/plain".to_string())]),
        ..fixture.config()
    };

    assert!(StaticSite::load(&cfg).is_err());
}

#[test]
fn test_load_tolerates_missing_root() {
    let cfg = StaticFilesConfig {
        root: "/nonexistent/lantern-root".into(),
        ..StaticFilesConfig::default()
    };

    assert!(StaticSite::load(&cfg).is_ok());
}

#[tokio::test]
async fn test_files_with_unusual_names_are_served() {
    let fixture = TempSite::new();
    fixture.write("café.html", "<p>café</p>".as_bytes());
    fixture.write("a{b}.css", b"b{}");
    fixture.write("docs/index.html", b"docs");
    let site = fixture.site();

    for (resource, body) in [
        ("/café.html", "<p>café</p>".as_bytes()),
        ("/a{b}.css", &b"b{}"[..]),
        ("//docs/index.html", &b"docs"[..]),
        ("//docs/", &b"docs"[..]),
    ] {
        let content = site.resolve_content(resource).await;

        assert_eq!(content.status, StatusCode::Ok, "{resource}");
        assert_eq!(&content.body[..], body, "{resource}");
    }
}
