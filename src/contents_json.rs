//! Contents.json data model for Apple's Asset Catalog format
//!
//! The app icon set's `Contents.json` is read, annotated with generated
//! filenames and written back. Only `filename` is ever changed: every other
//! key, known or not, is carried through a read/write cycle untouched and in
//! its original position

use crate::sizes::SizeDescriptor;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

/// Key holding the array of image entries
const IMAGES_KEY: &str = "images";

/// Keys read from each image entry
const FILENAME_KEY: &str = "filename";
const SIZE_KEY: &str = "size";
const SCALE_KEY: &str = "scale";

/// Root structure of a Contents.json file
///
/// The document is kept as parsed so `info`, `properties` and anything else
/// round-trip whatever their shape, in their on-disk key order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ContentsFile {
    document: Map<String, Value>,
}

impl ContentsFile {
    /// Parses a manifest from JSON text
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object, or if `images` is
    /// present but is not an array of objects
    pub fn parse(json: &str) -> Result<Self> {
        let contents: ContentsFile = serde_json::from_str(json)?;
        match contents.document.get(IMAGES_KEY) {
            None => {}
            Some(Value::Array(images)) => {
                if let Some(position) = images.iter().position(|entry| !entry.is_object()) {
                    bail!("image entry {position} is not an object");
                }
            }
            Some(_) => bail!("`{IMAGES_KEY}` is not an array"),
        }
        Ok(contents)
    }

    /// Reads and parses a Contents.json file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid manifest
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn images(&self) -> &[Value] {
        self.document
            .get(IMAGES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn image_mut(&mut self, index: usize) -> Option<&mut Map<String, Value>> {
        self.document
            .get_mut(IMAGES_KEY)?
            .as_array_mut()?
            .get_mut(index)?
            .as_object_mut()
    }

    /// Number of image entries
    pub fn image_count(&self) -> usize {
        self.images().len()
    }

    /// Size descriptors for every image entry, in manifest order
    pub fn descriptors(&self) -> Vec<SizeDescriptor> {
        self.images()
            .iter()
            .map(|entry| {
                SizeDescriptor::parse(
                    string_attribute(entry, SIZE_KEY),
                    string_attribute(entry, SCALE_KEY),
                )
            })
            .collect()
    }

    /// The `filename` recorded on entry `index`, if any
    pub fn filename(&self, index: usize) -> Option<&str> {
        self.images()
            .get(index)
            .and_then(|entry| entry.get(FILENAME_KEY))
            .and_then(Value::as_str)
    }

    /// Records `filename` on entry `index`
    ///
    /// An existing `filename` is replaced where it stands; otherwise the key
    /// is appended after the entry's other keys. Returns `false` when there
    /// is no such entry
    pub fn set_filename(&mut self, index: usize, filename: &str) -> bool {
        match self.image_mut(index) {
            Some(entry) => {
                entry.insert(FILENAME_KEY.to_string(), Value::from(filename));
                true
            }
            None => false,
        }
    }

    /// Serializes the manifest with 2-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the manifest to `path`, replacing what was there
    ///
    /// # Errors
    /// Returns an error if serialization or the file write fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// A string attribute of an image entry; other JSON types count as absent
fn string_attribute<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    let value = entry.get(key)?;
    let text = value.as_str();
    if text.is_none() {
        warn!(key, %value, "non-string attribute in image entry, using default");
    }
    text
}
