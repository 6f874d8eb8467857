//! Atom feed parsing and normalization.
//!
//! The query API answers with an Atom document whose `entry` elements describe
//! one paper each. Parsing is namespace-aware: only elements in the Atom
//! namespace are read, whatever prefix they use, while the arXiv extension
//! namespace and anything else is skipped.
//!
//! Malformed XML aborts the whole parse. Missing or empty pieces of an entry
//! never do; they degrade to empty values for that field alone.
//!
//! # Examples
//!
//! ```
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <title> Using LLMs in Clinical Trials </title>
//!     <link rel="alternate" href="http://arxiv.org/abs/2501.00001"/>
//!   </entry>
//! </feed>"#;
//!
//! let papers = paperfeed::feed::parse_feed(xml.as_bytes()).unwrap();
//! assert_eq!(papers[0].title, "Using LLMs in Clinical Trials");
//! assert_eq!(papers[0].pdf_url, "http://arxiv.org/pdf/2501.00001.pdf");
//! ```

use quick_xml::{
  events::{BytesStart, Event},
  name::{Namespace, ResolveResult},
  NsReader,
};

use super::*;

/// Namespace of every element the parser reads.
pub const ATOM_NAMESPACE: &[u8] = b"http://www.w3.org/2005/Atom";

/// arXiv extension namespace. Declared by the feed, not read.
pub const ARXIV_NAMESPACE: &[u8] = b"http://arxiv.org/schemas/atom";

/// Media type marking an explicit PDF link.
const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Parses a raw Atom response into papers, in document order.
///
/// # Errors
///
/// Returns [`FeedError::ParseFailed`] if `bytes` is not a well-formed XML
/// document. No papers are returned in that case.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Paper>, FeedError> {
  let mut reader = NsReader::from_reader(bytes);
  let mut parser = FeedParser::default();

  loop {
    let (namespace, event) = reader.read_resolved_event().map_err(FeedError::malformed)?;
    let in_atom = match namespace {
      ResolveResult::Bound(Namespace(uri)) => uri == ATOM_NAMESPACE,
      ResolveResult::Unbound => false,
      ResolveResult::Unknown(prefix) =>
        return Err(FeedError::malformed(format!(
          "unbound namespace prefix `{}`",
          String::from_utf8_lossy(&prefix)
        ))),
    };

    match event {
      Event::Start(e) => {
        check_start(&e)?;
        parser.open(in_atom, &e, false)?
      },
      Event::Empty(e) => {
        check_start(&e)?;
        parser.open(in_atom, &e, true)?
      },
      Event::End(_) => parser.close()?,
      Event::Text(e) => {
        let text = e.unescape().map_err(FeedError::malformed)?;
        if parser.capturing() {
          parser.text.push_str(&text);
        } else if parser.stack.is_empty() && !text.trim().is_empty() {
          return Err(FeedError::malformed("text outside of the root element"));
        }
      },
      Event::CData(e) =>
        if parser.capturing() {
          parser.text.push_str(&String::from_utf8_lossy(&e));
        } else if parser.stack.is_empty() {
          return Err(FeedError::malformed("character data outside of the root element"));
        },
      Event::Eof => break,
      _ => (),
    }
  }

  parser.finish()
}

/// Single-valued text fields read from an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
  /// `title`
  Title,
  /// `summary`
  Summary,
  /// `published`
  Published,
  /// `updated`
  Updated,
  /// `name` inside an `author`
  AuthorName,
}

/// What an open element means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
  /// The document element
  Root,
  /// An Atom `entry` directly under the root
  Entry,
  /// An Atom `author` directly under an entry
  Author,
  /// An element whose character data is being captured
  Text(Slot),
  /// A text element after its first child; later character data is dropped
  Tail(Slot),
  /// Anything the parser does not read
  Ignored,
}

/// Values collected for the entry currently being read.
#[derive(Debug, Default)]
struct EntryBuilder {
  /// First `title` text
  title:      Option<String>,
  /// First `summary` text
  summary:    Option<String>,
  /// First `published` text
  published:  Option<String>,
  /// First `updated` text
  updated:    Option<String>,
  /// Names collected so far
  authors:    Vec<String>,
  /// Name of the `author` currently open
  name:       Option<String>,
  /// href of the last `rel="alternate"` link
  alternate:  Option<String>,
  /// href of the last PDF-typed link
  pdf:        Option<String>,
  /// Non-empty category terms
  categories: Vec<String>,
}

impl EntryBuilder {
  /// Storage for a text slot.
  fn slot(&mut self, slot: Slot) -> &mut Option<String> {
    match slot {
      Slot::Title => &mut self.title,
      Slot::Summary => &mut self.summary,
      Slot::Published => &mut self.published,
      Slot::Updated => &mut self.updated,
      Slot::AuthorName => &mut self.name,
    }
  }

  /// Records a `link` element. Later links overwrite earlier ones of the same kind.
  fn link(&mut self, e: &BytesStart) -> Result<(), FeedError> {
    let href = attribute(e, b"href")?.unwrap_or_default();
    if attribute(e, b"rel")?.as_deref() == Some("alternate") {
      self.alternate = Some(href);
    } else if attribute(e, b"type")?.as_deref() == Some(PDF_MEDIA_TYPE) {
      self.pdf = Some(href);
    }
    Ok(())
  }

  /// Records a `category` element if it carries a term.
  fn category(&mut self, e: &BytesStart) -> Result<(), FeedError> {
    if let Some(term) = attribute(e, b"term")?.filter(|term| !term.is_empty()) {
      self.categories.push(term);
    }
    Ok(())
  }

  /// Closes the current `author`, keeping its name if the name had any text.
  fn finish_author(&mut self) {
    if let Some(name) = self.name.take().filter(|name| !name.is_empty()) {
      self.authors.push(name.trim().to_owned());
    }
  }

  /// Applies the fallback rules and produces the normalized record.
  fn build(self) -> Paper {
    let identifier = self
      .alternate
      .as_deref()
      .map(paper::identifier_from_url)
      .filter(|identifier| !identifier.is_empty())
      .map(str::to_owned);

    let pdf_url = match (self.pdf.filter(|url| !url.is_empty()), &identifier) {
      (Some(url), _) => url,
      (None, Some(identifier)) => paper::pdf_url_for(identifier),
      (None, None) => String::new(),
    };

    Paper {
      title: trimmed(self.title),
      authors: self.authors,
      abstract_text: trimmed(self.summary),
      pdf_url,
      arxiv_url: self.alternate.unwrap_or_default(),
      published: self.published.unwrap_or_default(),
      updated: self.updated.unwrap_or_default(),
      categories: self.categories,
      identifier,
    }
  }
}

/// Streaming state of a parse.
#[derive(Debug, Default)]
struct FeedParser {
  /// Meaning of every open element, innermost last
  stack:     Vec<Node>,
  /// Whether the document element has been seen
  seen_root: bool,
  /// Entry being read, if inside one
  entry:     Option<EntryBuilder>,
  /// Character data of the open text slot
  text:      String,
  /// Completed papers
  papers:    Vec<Paper>,
}

impl FeedParser {
  /// Whether character data should be collected right now.
  fn capturing(&self) -> bool { matches!(self.stack.last(), Some(Node::Text(_))) }

  /// Handles a start tag, or an empty element when `empty` is set.
  fn open(&mut self, in_atom: bool, e: &BytesStart, empty: bool) -> Result<(), FeedError> {
    // A text value is only the character data before the first child element.
    if let Some(node) = self.stack.last_mut() {
      if let Node::Text(slot) = *node {
        *node = Node::Tail(slot);
      }
    }

    let parent = match self.stack.last() {
      Some(node) => *node,
      None if self.seen_root => return Err(FeedError::malformed("multiple root elements")),
      None => {
        self.seen_root = true;
        if !empty {
          self.stack.push(Node::Root);
        }
        return Ok(());
      },
    };

    let name = e.local_name();
    let node = match (parent, in_atom, name.as_ref()) {
      (Node::Root, true, b"entry") => {
        self.entry = Some(EntryBuilder::default());
        Node::Entry
      },
      (Node::Entry, true, b"title") => Node::Text(Slot::Title),
      (Node::Entry, true, b"summary") => Node::Text(Slot::Summary),
      (Node::Entry, true, b"published") => Node::Text(Slot::Published),
      (Node::Entry, true, b"updated") => Node::Text(Slot::Updated),
      (Node::Entry, true, b"author") => Node::Author,
      (Node::Author, true, b"name") => Node::Text(Slot::AuthorName),
      (Node::Entry, true, b"link") => {
        self.current()?.link(e)?;
        Node::Ignored
      },
      (Node::Entry, true, b"category") => {
        self.current()?.category(e)?;
        Node::Ignored
      },
      _ => Node::Ignored,
    };

    // Only the first occurrence of a text field is read.
    let node = match node {
      Node::Text(slot) => {
        let value = self.current()?.slot(slot);
        if value.is_some() {
          Node::Ignored
        } else if empty {
          *value = Some(String::new());
          Node::Ignored
        } else {
          self.text.clear();
          node
        }
      },
      node => node,
    };

    if empty {
      self.close_node(node)
    } else {
      self.stack.push(node);
      Ok(())
    }
  }

  /// Handles an end tag.
  fn close(&mut self) -> Result<(), FeedError> {
    let node = self.stack.pop().ok_or_else(|| FeedError::malformed("unexpected end tag"))?;
    self.close_node(node)
  }

  /// Completes whatever `node` was collecting.
  fn close_node(&mut self, node: Node) -> Result<(), FeedError> {
    match node {
      Node::Text(slot) | Node::Tail(slot) => {
        let text = std::mem::take(&mut self.text);
        *self.current()?.slot(slot) = Some(text);
      },
      Node::Author => self.current()?.finish_author(),
      Node::Entry => {
        let entry = self.entry.take().ok_or_else(|| FeedError::malformed("entry not open"))?;
        self.papers.push(entry.build());
      },
      Node::Root | Node::Ignored => (),
    }
    Ok(())
  }

  /// The entry currently being read.
  fn current(&mut self) -> Result<&mut EntryBuilder, FeedError> {
    self.entry.as_mut().ok_or_else(|| FeedError::malformed("entry not open"))
  }

  /// Checks the document was complete and returns the papers.
  fn finish(self) -> Result<Vec<Paper>, FeedError> {
    if !self.seen_root {
      return Err(FeedError::malformed("no root element found"));
    }
    if !self.stack.is_empty() {
      return Err(FeedError::malformed("unexpected end of document"));
    }
    Ok(self.papers)
  }
}

/// Reads an unescaped attribute value by its unprefixed name.
fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, FeedError> {
  for attr in e.attributes() {
    let attr = attr.map_err(FeedError::malformed)?;
    if attr.key.as_ref() == key {
      return Ok(Some(attr.unescape_value().map_err(FeedError::malformed)?.into_owned()));
    }
  }
  Ok(None)
}

/// Rejects start tags with an invalid name or malformed attributes.
fn check_start(e: &BytesStart) -> Result<(), FeedError> {
  let name = e.name();
  if !name.as_ref().first().is_some_and(|byte| is_name_start(*byte)) {
    return Err(FeedError::malformed(format!(
      "invalid element name `{}`",
      String::from_utf8_lossy(name.as_ref())
    )));
  }
  // Checked iteration reports duplicate and unquoted attributes.
  for attr in e.attributes() {
    attr.map_err(FeedError::malformed)?.unescape_value().map_err(FeedError::malformed)?;
  }
  Ok(())
}

/// Whether `byte` may begin an XML name. Non-ASCII bytes are accepted.
fn is_name_start(byte: u8) -> bool {
  byte.is_ascii_alphabetic() || byte == b'_' || byte == b':' || !byte.is_ascii()
}

/// Trims optional text, treating absence as empty.
fn trimmed(text: Option<String>) -> String {
  text.map(|text| text.trim().to_owned()).unwrap_or_default()
}
