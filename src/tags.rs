//! The ID3 metadata record: read, additive merge, write-back.

use crate::config::{Field, SelectorRule};
use crate::error::PipelineError;
use crate::extract::Extraction;
use crate::normalize::{self, normalize};
use id3::frame::{Comment, Content, Frame};
use id3::{Tag, TagLike, Version};
use std::path::Path;

/// Album name used when the page yields none.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// In-memory view of the five tag fields the pipeline manages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub composer: Option<String>,
    pub comment: Option<String>,
}

impl MetadataRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Artist => self.artist.as_deref(),
            Field::Composer => self.composer.as_deref(),
            Field::Comment => self.comment.as_deref(),
        }
    }

    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Album => &mut self.album,
            Field::Artist => &mut self.artist,
            Field::Composer => &mut self.composer,
            Field::Comment => &mut self.comment,
        };
        *slot = Some(value);
    }

    /// Reads the record from the file's ID3 container. A file without a tag,
    /// or with one we cannot read, starts as an empty record.
    pub fn load(path: &Path) -> Self {
        let tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());
        let composer = tag
            .frames()
            .find(|f| f.id() == "TCOM")
            .and_then(|f| f.content().text())
            .map(str::to_string);
        let comment = tag.comments().next().map(|c| c.text.clone());
        Self {
            title: tag.title().map(str::to_string),
            album: tag.album().map(str::to_string),
            artist: tag.artist().map(str::to_string),
            composer,
            comment,
        }
    }

    /// Writes the record's set fields back into the file's ID3 container.
    ///
    /// Reads the on-disk tag fresh so frames outside the five managed fields
    /// survive the rewrite.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let mut tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());
        if let Some(v) = &self.title {
            tag.set_title(v);
        }
        if let Some(v) = &self.album {
            tag.set_album(v);
        }
        if let Some(v) = &self.artist {
            tag.set_artist(v);
        }
        if let Some(v) = &self.composer {
            tag.add_frame(Frame::with_content("TCOM", Content::Text(v.clone())));
        }
        if let Some(v) = &self.comment {
            tag.add_frame(Comment {
                lang: "eng".to_string(),
                description: String::new(),
                text: v.clone(),
            });
        }
        tag.write_to_path(path, Version::Id3v24)
            .map_err(|source| PipelineError::MetadataWrite {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Applies extracted values to the record, additively.
///
/// Fields already present in the record are never overwritten, so re-running
/// the pipeline over an already-tagged file is a no-op. The table is walked
/// in order; when several rows feed one field, the first row with a value
/// wins. After the table pass, an unset title falls back to the normalized
/// filename stem and an unset album to "Unknown Album", so both are always
/// set on return.
///
/// Returns the fields that were set; an empty change set means the caller
/// can skip the container write entirely.
pub fn merge(
    record: &mut MetadataRecord,
    extraction: &Extraction,
    rules: &[SelectorRule],
    filename_stem: &str,
) -> Vec<Field> {
    let mut changed = Vec::new();

    for (rule, value) in rules.iter().zip(extraction) {
        if record.get(rule.field).is_some() {
            continue;
        }
        if let Some(value) = value {
            record.set(rule.field, value.clone());
            changed.push(rule.field);
        }
    }

    if record.title.is_none() {
        let stem_title =
            normalize(filename_stem).unwrap_or_else(|| normalize::UNKNOWN.to_string());
        record.title = Some(stem_title);
        changed.push(Field::Title);
    }
    if record.album.is_none() {
        record.album = Some(UNKNOWN_ALBUM.to_string());
        changed.push(Field::Album);
    }

    changed
}
