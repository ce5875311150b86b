//! Rewriting of deck-local media markers into references the host UI can load.

use crate::CoreError;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Maps deck-local media file names (as they appear in card text) to absolute
/// references such as `anki://audio.mp3`, `file:///...` or `data:` URLs.
///
/// A source equal to any reference in the index is treated as already
/// resolved, even when it is also an indexed name. References are not
/// followed a second time, so `a -> b.png` together with `b.png -> file:///b.png`
/// leaves `<img src="b.png">` untouched.
#[derive(Clone, Debug, Default)]
pub struct MediaIndex {
    entries: HashMap<String, String>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every name resolves to `<scheme><name>`, e.g. `anki://sound.mp3`.
    pub fn with_scheme<I, S>(names: I, scheme: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for name in names {
            let name = name.into();
            let reference = format!("{scheme}{name}");
            index.insert(name, reference);
        }
        index
    }

    /// Indexes every regular file in `dir` as a `file://` URL.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        let dir = fs::canonicalize(dir.as_ref()).map_err(|_| CoreError::NotFound("media directory"))?;
        let entries = fs::read_dir(&dir).map_err(|_| CoreError::Storage("read media directory"))?;
        let mut index = Self::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            index.insert(name, format!("file://{}", path.display()));
        }
        tracing::debug!(dir = %dir.display(), files = index.len(), "indexed media directory");
        Ok(index)
    }

    pub fn insert(&mut self, name: impl Into<String>, reference: impl Into<String>) {
        self.entries.insert(name.into(), reference.into());
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // A source counts as already rewritten if it carries a scheme or is one
    // of the references this index hands out.
    fn is_reference(&self, src: &str) -> bool {
        has_scheme(src) || self.entries.values().any(|v| v == src)
    }
}

fn has_scheme(src: &str) -> bool {
    let s = src.trim_start();
    s.starts_with("data:") || s.contains("://")
}

fn sound_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[sound:([^\]]+)\]").expect("sound marker regex"))
}

fn img_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<img\b[^>]*>").expect("img tag regex"))
}

fn src_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)(\ssrc\s*=\s*")([^"]*)(")"#).expect("src attribute regex"))
}

/// Replaces `[sound:name]` markers with an audio element and points `<img>`
/// sources that name deck-local media at their resolved reference.
///
/// Markers whose media is not in `media` are left as they are. Applying the
/// function to its own output changes nothing.
pub fn normalize_content(raw: &str, media: &MediaIndex) -> String {
    let with_audio = sound_re().replace_all(raw, |caps: &Captures| match media.resolve(&caps[1]) {
        Some(url) => format!(r#"<audio controls><source src="{url}" type="audio/mpeg"></audio>"#),
        None => caps[0].to_string(),
    });

    img_re()
        .replace_all(&with_audio, |tag: &Captures| rewrite_img(&tag[0], media))
        .into_owned()
}

fn rewrite_img(tag: &str, media: &MediaIndex) -> String {
    src_re()
        .replace_all(tag, |caps: &Captures| {
            let src = &caps[2];
            if media.is_reference(src) {
                return caps[0].to_string();
            }
            match media.resolve(src) {
                Some(url) => format!("{}{}{}", &caps[1], url, &caps[3]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
