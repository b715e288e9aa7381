//! VirtualWorld implementation of the Typst World trait

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, Timelike};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use super::virtual_fs::VirtualFilesystem;
use crate::compiler::errors::RenderError;

/// A world for in-memory Typst compilation
pub struct VirtualWorld {
    filesystem: VirtualFilesystem,
    main: FileId,
    font_cache: &'static FontCache,
    /// Captured once so every `datetime.today()` in a document agrees
    time: DateTime<Local>,
    library: LazyHash<Library>,
}

impl VirtualWorld {
    /// Create a world with the given main source, inputs and mounted files
    pub fn new(
        source: String,
        inputs: HashMap<String, serde_json::Value>,
        assets: HashMap<String, Bytes>,
    ) -> Result<Self, RenderError> {
        let mut filesystem = VirtualFilesystem::new();
        let main = filesystem.mount_main(source);

        for (path, content) in assets {
            filesystem.mount_file(&path, content)?;
        }

        let mut dict = Dict::new();
        for (key, value) in inputs {
            dict.insert(key.into(), json_to_value(&value)?);
        }

        // Exposed to the document as `sys.inputs`
        let library = Library::builder().with_inputs(dict).build();

        Ok(Self {
            filesystem,
            main,
            font_cache: global_font_cache(),
            time: Local::now(),
            library: LazyHash::new(library),
        })
    }
}

/// Convert a JSON value to a Typst value
///
/// Integers stay integers; every other number becomes a float, so
/// centimetre offsets can be multiplied by `1cm` in templates.
fn json_to_value(json: &serde_json::Value) -> Result<Value, RenderError> {
    Ok(match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Int(i),
            (None, Some(f)) => Value::Float(f),
            (None, None) => {
                return Err(RenderError::InvalidInput(format!("Invalid number: {}", n)));
            }
        },
        serde_json::Value::String(s) => Value::Str(s.as_str().into()),
        serde_json::Value::Array(items) => {
            let values = items
                .iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Value::Array(Array::from(values.as_slice()))
        }
        serde_json::Value::Object(fields) => {
            let mut dict = Dict::new();
            for (key, value) in fields {
                dict.insert(key.as_str().into(), json_to_value(value)?);
            }
            Value::Dict(dict)
        }
    })
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.font_cache.book()
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        self.filesystem
            .source(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.filesystem
            .file(id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let date = match offset {
            None => self.time.naive_local(),
            Some(hours) => self.time.naive_utc() + chrono::Duration::hours(hours),
        };

        Datetime::from_ymd_hms(
            date.year(),
            date.month() as u8,
            date.day() as u8,
            date.hour() as u8,
            date.minute() as u8,
            date.second() as u8,
        )
    }
}
