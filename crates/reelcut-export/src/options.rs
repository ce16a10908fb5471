//! Renderer option assembly.
//!
//! The renderer is sensitive to flag ordering relative to stream selection,
//! so `build_options` emits tokens in one fixed order: free-form tokens,
//! stream mapping, container format, then the video/audio/subtitle codec
//! policies.

/// Sentinel meaning "disable this stream kind" (or "no container format").
/// The empty string means the user left the field unset.
pub const CODEC_DISABLE: &str = "-";

/// User-facing export configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Free-form option tokens, split on whitespace when enabled
    pub custom_options: String,
    pub custom_options_enabled: bool,
    /// Free-form per-source option tokens, split on whitespace when enabled
    pub source_options: String,
    pub source_options_enabled: bool,
    /// Map every input stream into the output
    pub map_all_streams: bool,
    /// Container format, `"-"` for none
    pub format: String,
    /// Video codec: name, `"-"` to disable video, empty to leave unset
    pub video_codec: String,
    /// Audio codec, same three-way policy
    pub audio_codec: String,
    /// Subtitle codec, same three-way policy
    pub subtitle_codec: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            custom_options: String::new(),
            custom_options_enabled: false,
            source_options: String::new(),
            source_options_enabled: false,
            map_all_streams: false,
            format: "mp4".to_string(),
            video_codec: "copy".to_string(),
            audio_codec: "copy".to_string(),
            subtitle_codec: String::new(),
        }
    }
}

impl ExportSettings {
    /// Assemble the flat option-token list for the job request.
    pub fn build_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        if self.custom_options_enabled {
            options.extend(self.custom_options.split_whitespace().map(String::from));
        }
        if self.source_options_enabled {
            options.extend(self.source_options.split_whitespace().map(String::from));
        }
        if self.map_all_streams {
            options.push("-map".to_string());
            options.push("0".to_string());
        }
        if self.format != CODEC_DISABLE {
            options.push("-f".to_string());
            options.push(self.format.clone());
        }
        push_codec(&mut options, "-vcodec", "-vn", &self.video_codec);
        push_codec(&mut options, "-acodec", "-an", &self.audio_codec);
        push_codec(&mut options, "-scodec", "-sn", &self.subtitle_codec);
        options
    }
}

/// The three-way codec policy: a name selects the codec, the `"-"` sentinel
/// disables the stream kind, empty emits nothing.
fn push_codec(options: &mut Vec<String>, flag: &str, disable_flag: &str, codec: &str) {
    if codec == CODEC_DISABLE {
        options.push(disable_flag.to_string());
    } else if !codec.is_empty() {
        options.push(flag.to_string());
        options.push(codec.to_string());
    }
}
