use std::path::{Path, PathBuf};

use anyhow::Context as _;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{LogicalNode, StructuredDocument};

pub trait DocumentWriter {
    fn write(
        &self,
        path: &Path,
        process_title: &str,
        document: &StructuredDocument,
    ) -> anyhow::Result<()>;
}

impl<W: DocumentWriter + ?Sized> DocumentWriter for &W {
    fn write(
        &self,
        path: &Path,
        process_title: &str,
        document: &StructuredDocument,
    ) -> anyhow::Result<()> {
        (**self).write(path, process_title, document)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("identifier `{0}` cannot be used as an import file name")]
pub struct InvalidFileName(pub String);

/// `<import_folder>/<identifier>.xml`. Identifiers that would leave the
/// import folder (path separators or `..`) are rejected.
pub fn output_path(import_folder: &Path, identifier: &str) -> Result<PathBuf, InvalidFileName> {
    if identifier.contains(['/', '\\', '\0']) || identifier == ".." {
        return Err(InvalidFileName(identifier.to_owned()));
    }
    Ok(import_folder.join(format!("{identifier}.xml")))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentWriter;

impl DocumentWriter for XmlDocumentWriter {
    fn write(
        &self,
        path: &Path,
        process_title: &str,
        document: &StructuredDocument,
    ) -> anyhow::Result<()> {
        let xml = render_xml(process_title, document).context("render import xml")?;
        write_atomic(path, &xml)
    }
}

pub fn render_xml(process_title: &str, document: &StructuredDocument) -> anyhow::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("write xml declaration")?;

    let imported_at = chrono::Utc::now().to_rfc3339();
    let mut record = BytesStart::new("record");
    record.push_attribute(("processTitle", process_title));
    record.push_attribute(("importedAt", imported_at.as_str()));
    writer
        .write_event(Event::Start(record))
        .context("write record start")?;

    write_node(&mut writer, &document.logical)?;

    writer
        .write_event(Event::End(BytesEnd::new("record")))
        .context("write record end")?;
    Ok(writer.into_inner())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &LogicalNode) -> anyhow::Result<()> {
    let mut start = BytesStart::new("node");
    start.push_attribute(("type", node.doc_type.name()));
    if node.is_anchor() {
        start.push_attribute(("anchor", "true"));
    }
    writer
        .write_event(Event::Start(start))
        .context("write node start")?;

    for md in &node.metadata {
        let mut element = BytesStart::new("metadata");
        element.push_attribute(("name", md.name.as_str()));
        writer
            .write_event(Event::Start(element))
            .context("write metadata start")?;
        writer
            .write_event(Event::Text(BytesText::new(&md.value)))
            .context("write metadata value")?;
        writer
            .write_event(Event::End(BytesEnd::new("metadata")))
            .context("write metadata end")?;
    }

    for child in &node.children {
        write_node(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("node")))
        .context("write node end")?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("path has no parent: {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create import folder: {}", parent.display()))?;
    }

    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    std::fs::write(&tmp_path, bytes)
        .with_context(|| format!("write tmp: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("rename tmp to final: {}", path.display()))?;
    Ok(())
}
