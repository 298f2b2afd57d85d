/// Player element kind for a media reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// HTML tag name of the player element
    pub fn tag_name(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// Classification of a media reference by its file-extension suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaClass {
    Supported { kind: MediaKind, extension: String },
    Unsupported { extension: String },
}

impl MediaClass {
    /// `<source type>` attribute value, e.g. "video/mp4".
    /// Built the same way the page always built it, so "mp3" yields
    /// "audio/mp3" rather than the registered "audio/mpeg".
    pub fn mime_type(&self) -> Option<String> {
        match self {
            MediaClass::Supported { kind, extension } => {
                Some(format!("{}/{}", kind.tag_name(), extension))
            }
            MediaClass::Unsupported { .. } => None,
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            MediaClass::Supported { extension, .. } => extension,
            MediaClass::Unsupported { extension } => extension,
        }
    }
}

/// Classify a media path by its extension, case-insensitively.
///
/// A path without any '.' is treated as having the whole path for an
/// extension, which falls through to Unsupported.
pub fn classify_media(path: &str) -> MediaClass {
    let extension = path
        .rsplit('.')
        .next()
        .unwrap_or(path)
        .to_lowercase();

    let kind = match extension.as_str() {
        "mp4" | "mov" | "webm" => Some(MediaKind::Video),
        "mp3" | "wav" | "ogg" => Some(MediaKind::Audio),
        _ => None,
    };

    match kind {
        Some(kind) => MediaClass::Supported { kind, extension },
        None => MediaClass::Unsupported { extension },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extensions() {
        for path in ["clip.mp4", "a/b/clip.mov", "clip.webm"] {
            match classify_media(path) {
                MediaClass::Supported { kind, .. } => assert_eq!(kind, MediaKind::Video),
                other => panic!("{} classified as {:?}", path, other),
            }
        }
    }

    #[test]
    fn test_audio_extensions() {
        for path in ["take.mp3", "take.wav", "take.ogg"] {
            match classify_media(path) {
                MediaClass::Supported { kind, .. } => assert_eq!(kind, MediaKind::Audio),
                other => panic!("{} classified as {:?}", path, other),
            }
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let class = classify_media("SHOUTY.MP3");
        assert_eq!(
            class,
            MediaClass::Supported {
                kind: MediaKind::Audio,
                extension: "mp3".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let class = classify_media("mystery.xyz");
        assert_eq!(
            class,
            MediaClass::Unsupported {
                extension: "xyz".to_string(),
            }
        );
        assert_eq!(class.mime_type(), None);
    }

    #[test]
    fn test_path_without_extension() {
        match classify_media("no_dot_here") {
            MediaClass::Unsupported { extension } => assert_eq!(extension, "no_dot_here"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mime_type_matches_tag_and_extension() {
        assert_eq!(classify_media("a.mp4").mime_type().unwrap(), "video/mp4");
        assert_eq!(classify_media("a.mp3").mime_type().unwrap(), "audio/mp3");
    }
}
