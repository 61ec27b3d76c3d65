use std::io;
use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;

use crate::document::Document;

/// Textual encodings of a [`Document`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `{"name": ..., "children": [...]}`, with `children` left out on leaves
    #[default]
    Json,

    /// One label per line, indented by depth
    Outline,
}

impl Format {
    /// File extension used when no output path is given
    pub const fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Outline => "txt",
        }
    }

    pub fn write<W: Write>(self, doc: &Document, w: &mut W, pretty: bool) -> io::Result<()> {
        match self {
            Format::Json => write_json(doc, w, pretty),
            Format::Outline => write_outline(doc, w),
        }
    }
}

pub fn write_json<W: Write>(doc: &Document, w: &mut W, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *w, doc)?;
    } else {
        serde_json::to_writer(&mut *w, doc)?;
    }

    writeln!(w)
}

pub fn write_outline<W: Write>(doc: &Document, w: &mut W) -> io::Result<()> {
    fn go<W: Write>(doc: &Document, w: &mut W, level: usize) -> io::Result<()> {
        writeln!(w, "{:indent$}{}", "", doc.name, indent = 2 * level)?;

        for child in &doc.children {
            go(child, w, level + 1)?;
        }

        Ok(())
    }

    go(doc, w, 0)
}

/// Convenience wrapper around [`Format::write`] for in-memory output.
pub fn to_string(doc: &Document, format: Format, pretty: bool) -> io::Result<String> {
    let mut buf = Vec::new();
    format.write(doc, &mut buf, pretty)?;

    String::from_utf8(buf).map_err(io::Error::other)
}

#[cfg(test)]
mod test {
    use super::Format;
    use super::to_string;
    use crate::document::Document;

    fn doc() -> Document {
        Document::node(
            "Root",
            vec![Document::node("Node", vec![Document::leaf("(0,0)")])],
        )
    }

    #[test]
    fn compact_json() {
        let s = to_string(&doc(), Format::Json, false).unwrap();

        assert_eq!(
            s,
            "{\"name\":\"Root\",\"children\":[{\"name\":\"Node\",\"children\":[{\"name\":\"(0,0)\"}]}]}\n"
        );
    }

    #[test]
    fn json_is_valid() {
        let s = to_string(&doc(), Format::Json, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&s).unwrap();

        assert_eq!(v["children"][0]["children"][0]["name"], "(0,0)");
        assert!(v["children"][0]["children"][0].get("children").is_none());
    }

    #[test]
    fn outline() {
        let s = to_string(&doc(), Format::Outline, false).unwrap();

        assert_eq!(s, "Root\n  Node\n    (0,0)\n");
    }

    #[test]
    fn format_names() {
        let f: Format = serde_json::from_str("\"outline\"").unwrap();

        assert_eq!(f, Format::Outline);
        assert_eq!(Format::default(), Format::Json);
    }
}
