use lingualay_core::{normalize_content, MediaIndex};

fn media() -> MediaIndex {
    let mut m = MediaIndex::new();
    m.insert("hello.mp3", "anki://hello.mp3");
    m.insert("cat.jpg", "data:image/jpeg;base64,Y2F0");
    m
}

#[test]
fn sound_marker_becomes_audio() {
    let out = normalize_content("Hola [sound:hello.mp3]", &media());
    assert_eq!(
        out,
        r#"Hola <audio controls><source src="anki://hello.mp3" type="audio/mpeg"></audio>"#
    );
}

#[test]
fn image_source_is_rewritten() {
    let out = normalize_content(r#"<div><img class="pic" src="cat.jpg" alt="cat"></div>"#, &media());
    assert_eq!(
        out,
        r#"<div><img class="pic" src="data:image/jpeg;base64,Y2F0" alt="cat"></div>"#
    );
}

#[test]
fn lazy_load_attribute_does_not_shadow_src() {
    let mut m = MediaIndex::new();
    m.insert("cat.jpg", "file:///m/cat.jpg");
    m.insert("lazy.jpg", "file:///m/lazy.jpg");
    let out = normalize_content(r#"<img data-src="lazy.jpg" src="cat.jpg">"#, &m);
    assert_eq!(out, r#"<img data-src="lazy.jpg" src="file:///m/cat.jpg">"#);
}

#[test]
fn unknown_media_is_left_alone() {
    let raw = r#"[sound:missing.mp3] <img src="dog.png"> [image:cat.jpg]"#;
    assert_eq!(normalize_content(raw, &media()), raw);
}

#[test]
fn absolute_sources_are_left_alone() {
    let raw = r#"<img src="https://example.com/cat.jpg"><img src="anki://cat.jpg">"#;
    assert_eq!(normalize_content(raw, &media()), raw);
}

#[test]
fn normalizing_twice_changes_nothing() {
    let inputs = [
        "",
        "plain text",
        "[sound:hello.mp3]",
        r#"<img src="cat.jpg">[sound:hello.mp3][sound:nope.mp3]"#,
        r#"<IMG SRC="cat.jpg"> and <img src="other.gif"> [sound:hello.mp3] [sound:hello.mp3]"#,
    ];
    let m = media();
    for raw in inputs {
        let once = normalize_content(raw, &m);
        let twice = normalize_content(&once, &m);
        assert_eq!(once, twice, "input: {raw}");
    }
}

#[test]
fn chained_references_stay_idempotent() {
    // The reference for one name is itself another indexed name.
    let mut m = MediaIndex::new();
    m.insert("a.png", "b.png");
    m.insert("b.png", "file:///media/b.png");
    let once = normalize_content(r#"<img src="a.png">"#, &m);
    assert_eq!(once, r#"<img src="b.png">"#);
    assert_eq!(normalize_content(&once, &m), once);

    // An indexed name that is also another entry's reference counts as resolved.
    let direct = r#"<img src="b.png">"#;
    assert_eq!(normalize_content(direct, &m), direct);
}

#[test]
fn scheme_index_and_directory_index() {
    let m = MediaIndex::with_scheme(["x.mp3"], "anki://");
    assert_eq!(m.resolve("x.mp3"), Some("anki://x.mp3"));

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("word.mp3"), b"id3").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let m = MediaIndex::from_dir(dir.path()).unwrap();
    assert_eq!(m.len(), 1);
    let url = m.resolve("word.mp3").unwrap();
    assert!(url.starts_with("file://"));
    assert!(url.ends_with("word.mp3"));
}
