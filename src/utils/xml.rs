use crate::utils::error::{Result, ZuoraError};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Streaming writer handed to request-building callbacks.
pub struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Start(start))
            .map_err(ZuoraError::xml)
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(ZuoraError::xml)
    }

    /// `<name>text</name>`, text escaped.
    pub fn element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(ZuoraError::xml)?;
        self.end(name)
    }

    pub fn nest<F>(&mut self, name: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut XmlBuilder) -> Result<()>,
    {
        self.start(name, &[])?;
        body(self)?;
        self.end(name)
    }

    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(ZuoraError::xml)
    }
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned element tree used to read SOAP replies and to inspect outbound envelopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn parse(xml: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event().map_err(ZuoraError::xml)? {
                Event::Start(e) => stack.push(Self::open(&e)?),
                Event::Empty(e) => {
                    let element = Self::open(&e)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ZuoraError::xml("unbalanced closing tag"))?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::Text(t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape().map_err(ZuoraError::xml)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ZuoraError::xml("unexpected end of document"));
        }
        root.ok_or_else(|| ZuoraError::xml("document has no root element"))
    }

    fn open(start: &BytesStart<'_>) -> Result<XmlElement> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(ZuoraError::xml)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(ZuoraError::xml)?.into_owned();
            attributes.push((key, value));
        }
        Ok(XmlElement {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => *root = Some(element),
        }
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |c| c.local_name() == local_name)
    }

    pub fn child_text(&self, local_name: &str) -> Option<&str> {
        self.child(local_name).map(|c| c.text())
    }

    /// Follows a path of local names below this element, first match at each step.
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |node, step| node.child(step))
    }

    /// Every element reachable through the path, branching on repeated names.
    pub fn find_all(&self, path: &[&str]) -> Vec<&XmlElement> {
        let mut current = vec![self];
        for step in path {
            let mut next = Vec::new();
            for node in current {
                next.extend(node.children.iter().filter(|c| c.local_name() == *step));
            }
            current = next;
        }
        current
    }

    /// Depth-first search for the first descendant with this local name.
    pub fn descendant(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|c| {
            if c.local_name() == local_name {
                Some(c)
            } else {
                c.descendant(local_name)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_escapes_text() {
        let mut xml = XmlBuilder::new();
        xml.nest("ns1:Account", |a| a.element("ns2:Name", "Fish & Chips"))
            .unwrap();
        assert_eq!(
            xml.into_string().unwrap(),
            "<ns1:Account><ns2:Name>Fish &amp; Chips</ns2:Name></ns1:Account>"
        );
    }

    #[test]
    fn test_parse_and_find() {
        let doc = XmlElement::parse(
            r#"<env:Envelope xmlns:env="x"><env:Body>
                 <ns1:result><ns1:Id>A1</ns1:Id><ns1:Id>A2</ns1:Id><ns1:Empty/></ns1:result>
               </env:Body></env:Envelope>"#,
        )
        .unwrap();

        assert_eq!(doc.local_name(), "Envelope");
        assert_eq!(doc.attribute("xmlns:env"), Some("x"));
        assert_eq!(doc.find(&["Body", "result", "Id"]).unwrap().text(), "A1");
        assert_eq!(doc.find_all(&["Body", "result", "Id"]).len(), 2);
        assert_eq!(doc.descendant("Empty").unwrap().text(), "");
        assert!(doc.find(&["Body", "Missing"]).is_none());
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        assert!(XmlElement::parse("<a><b></b>").is_err());
    }
}
