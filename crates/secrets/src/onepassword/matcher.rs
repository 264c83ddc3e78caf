//! Locating the value a reference points at inside an item.

use super::item::ItemDocument;
use super::uri::Reference;
use opref_core::{Error, Result};

/// Find the value for `reference` in `item`.
///
/// Fields are scanned first, in document order, since they carry their value
/// inline. Only if no field matches are file attachments scanned; the first
/// matching file is read through `fetch_file`, which receives the raw
/// reference. The first match wins in both scans.
///
/// File contents must be UTF-8; binary attachments fail with
/// [`Error::NonUtf8File`] rather than being altered.
pub fn find_value<F>(item: &ItemDocument, reference: &Reference, fetch_file: F) -> Result<String>
where
    F: FnOnce(&str) -> Result<Vec<u8>>,
{
    if let Some(field) = item.fields.iter().find(|field| field.matches(reference)) {
        return Ok(field.value.clone());
    }

    if item.files.iter().any(|file| file.matches(reference)) {
        let contents = fetch_file(reference.raw())?;
        return String::from_utf8(contents)
            .map_err(|e| Error::non_utf8_file(reference.raw(), e));
    }

    Err(Error::field_not_found(reference.field()))
}
