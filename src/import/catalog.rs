//! Source catalog reader
//!
//! Reads the XML card catalog into `RawCard` records. Each card keeps its
//! child elements in document order so repeated elements (`clan`, `legal`,
//! `image`) and their attributes survive untouched for the normalizer.
//!
//! ```xml
//! <cards version="2024/3/30 Onyx Oracle Edition">
//!   <card id="AD092" type="strategy">
//!     <name>A Chance Meeting</name>
//!     <rarity>u</rarity>
//!     <edition>AD</edition><image edition="AD">images/cards/AD/AD092.jpg</image>
//!     <legal>open</legal>
//!     <text><![CDATA[<b>Battle:</b> ...]]></text>
//!   </card>
//! </cards>
//! ```

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::ImportError;

/// One child element of a card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl RawElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One card record as found in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCard {
    /// 1-based position in the catalog
    pub ordinal: u32,
    pub id: Option<String>,
    pub card_type: Option<String>,
    pub elements: Vec<RawElement>,
}

impl RawCard {
    /// Identifier for log and error messages
    pub fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("record {}", self.ordinal))
    }

    pub fn first(&self, name: &str) -> Option<&RawElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawElement> + 'a {
        self.elements.iter().filter(move |e| e.name == name)
    }

    /// Text of the first element with this name
    pub fn text(&self, name: &str) -> Option<&str> {
        self.first(name).map(|e| e.text.as_str())
    }

    /// Texts of every element with this name, in document order
    pub fn texts<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        self.all(name).map(|e| e.text.as_str()).collect()
    }
}

/// Parsed catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// `version` attribute of the root element
    pub version: Option<String>,
    pub cards: Vec<RawCard>,
}

/// Catalog reader
#[derive(Debug, Default)]
pub struct CatalogReader;

fn attributes_of(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Vec<(String, String)>, ImportError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            ImportError::ParseError(format!(
                "Malformed attribute at position {}: {}",
                reader.buffer_position(),
                err
            ))
        })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
        attributes.push((key, value));
    }
    Ok(attributes)
}

impl CatalogReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole catalog
    ///
    /// Malformed XML fails the whole catalog. Text outside `card` elements is
    /// ignored, as is markup nested inside a card field (its text is kept).
    pub fn parse_str(&self, xml_content: &str) -> Result<Catalog, ImportError> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut catalog = Catalog::default();
        let mut current: Option<RawCard> = None;
        let mut field: Option<RawElement> = None;
        // Depth of markup nested inside the current field
        let mut nested = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    if field.is_some() {
                        nested += 1;
                    } else if current.is_some() {
                        field = Some(RawElement {
                            name,
                            attributes: attributes_of(&reader, e)?,
                            text: String::new(),
                        });
                    } else if name == "card" {
                        current = Some(Self::start_card(&reader, e, &catalog)?);
                    } else if name == "cards" {
                        catalog.version = attributes_of(&reader, e)?
                            .into_iter()
                            .find(|(key, _)| key == "version")
                            .map(|(_, value)| value);
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    if field.is_some() {
                        continue;
                    }
                    if let Some(card) = current.as_mut() {
                        card.elements.push(RawElement {
                            name,
                            attributes: attributes_of(&reader, e)?,
                            text: String::new(),
                        });
                    } else if name == "card" {
                        let card = Self::start_card(&reader, e, &catalog)?;
                        catalog.cards.push(card);
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(element) = field.as_mut() {
                        let text = e
                            .unescape()
                            .map(|t| t.into_owned())
                            .unwrap_or_else(|_| String::from_utf8_lossy(e).to_string());
                        element.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(element) = field.as_mut() {
                        element
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    if nested > 0 {
                        nested -= 1;
                    } else if let Some(element) = field.take() {
                        if let Some(card) = current.as_mut() {
                            card.elements.push(element);
                        }
                    } else if let Some(card) = current.take() {
                        catalog.cards.push(card);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ImportError::ParseError(format!(
                        "XML parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if current.is_some() {
            return Err(ImportError::ParseError(
                "Unexpected end of catalog inside a card element".to_string(),
            ));
        }

        Ok(catalog)
    }

    fn start_card(
        reader: &Reader<&[u8]>,
        e: &BytesStart,
        catalog: &Catalog,
    ) -> Result<RawCard, ImportError> {
        let attributes = attributes_of(reader, e)?;
        let find = |key: &str| {
            attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Ok(RawCard {
            ordinal: catalog.cards.len() as u32 + 1,
            id: find("id"),
            card_type: find("type"),
            elements: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<cards version="2024/3/30 Onyx Oracle Edition">
    <card id="AD092" type="strategy">
        <name>A Chance Meeting</name>
        <rarity>u</rarity>
        <edition>AD</edition><image edition="AD">images/cards/AD/AD092.jpg</image>
        <legal>open</legal>
        <text><![CDATA[<b>Battle:</b> One of your Personalities challenges.]]></text>
        <cost>0</cost>
    </card>
    <card id="AD081" type="region">
        <name>Akodo Fields</name>
        <legal>open</legal>
        <legal>jade</legal>
    </card>
</cards>"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = CatalogReader::new().parse_str(SAMPLE).unwrap();
        assert_eq!(catalog.version.as_deref(), Some("2024/3/30 Onyx Oracle Edition"));
        assert_eq!(catalog.cards.len(), 2);

        let first = &catalog.cards[0];
        assert_eq!(first.ordinal, 1);
        assert_eq!(first.id.as_deref(), Some("AD092"));
        assert_eq!(first.card_type.as_deref(), Some("strategy"));
        assert_eq!(first.text("name"), Some("A Chance Meeting"));
        assert_eq!(
            first.text("text"),
            Some("<b>Battle:</b> One of your Personalities challenges.")
        );
        let image = first.first("image").unwrap();
        assert_eq!(image.attribute("edition"), Some("AD"));
        assert_eq!(image.text, "images/cards/AD/AD092.jpg");
    }

    #[test]
    fn test_repeated_elements_keep_order() {
        let catalog = CatalogReader::new().parse_str(SAMPLE).unwrap();
        let second = &catalog.cards[1];
        assert_eq!(second.ordinal, 2);
        assert_eq!(second.texts("legal"), vec!["open", "jade"]);
        assert!(second.first("rarity").is_none());
    }

    #[test]
    fn test_entities_in_plain_text() {
        let xml = r#"<cards><card id="X1" type="personality"><name>Hitomi &#149; Experienced</name></card></cards>"#;
        let catalog = CatalogReader::new().parse_str(xml).unwrap();
        assert_eq!(
            catalog.cards[0].text("name"),
            Some("Hitomi \u{0095} Experienced")
        );
    }

    #[test]
    fn test_nested_markup_keeps_text() {
        let xml = r#"<cards><card id="X1" type="holding"><text><b>Limited:</b> Gain</text></card></cards>"#;
        let catalog = CatalogReader::new().parse_str(xml).unwrap();
        assert_eq!(catalog.cards[0].elements.len(), 1);
        assert!(catalog.cards[0].text("text").unwrap().contains("Limited:"));
    }

    #[test]
    fn test_malformed_catalog() {
        let result = CatalogReader::new().parse_str("<cards><card id=\"X\"></cards>");
        assert!(matches!(result, Err(ImportError::ParseError(_))));
    }
}
