use crate::error::ParseError;
use oxrdfio::{RdfFormat, RdfParser};
use quintstore_model::{normalize_document_id, Dataset};
use quintstore_storage::QuadCollection;
use std::io::Read;

/// Turns the raw content of a document into a [QuadCollection].
pub trait DocumentParser: Send + Sync {
    /// Parses `data` that has been retrieved from `document`. Relative IRIs are resolved against
    /// `document`. Fails on malformed input.
    fn parse(
        &self,
        data: &[u8],
        content_type: Option<&str>,
        document: &str,
    ) -> Result<QuadCollection, ParseError>;
}

/// A [DocumentParser] for the RDF serializations supported by [oxrdfio].
///
/// The format is picked from the media type of the response. If there is none (or it is not an
/// RDF media type), the file extension of the document is used. Otherwise, the fallback format
/// applies (Turtle by default).
#[derive(Debug, Clone, Copy)]
pub struct RdfDocumentParser {
    fallback_format: RdfFormat,
}

impl Default for RdfDocumentParser {
    fn default() -> Self {
        Self::new(RdfFormat::Turtle)
    }
}

impl RdfDocumentParser {
    pub fn new(fallback_format: RdfFormat) -> Self {
        Self { fallback_format }
    }

    /// Returns the format used for a document with the given `content_type`.
    pub fn format_for(&self, content_type: Option<&str>, document: &str) -> RdfFormat {
        content_type
            .and_then(format_from_media_type)
            .or_else(|| format_from_extension(document))
            .unwrap_or(self.fallback_format)
    }

    /// Parses the content of `reader` in the given `format`, using `document` as base IRI.
    pub fn parse_reader(
        &self,
        format: RdfFormat,
        reader: impl Read,
        document: &str,
    ) -> Result<QuadCollection, ParseError> {
        let parser = RdfParser::from_format(format)
            .with_base_iri(document)
            .map_err(|error| ParseError::InvalidBaseIri {
                iri: document.to_owned(),
                error,
            })?;
        let dataset = parser.for_reader(reader).collect::<Result<Dataset, _>>()?;
        Ok(dataset.into())
    }
}

impl DocumentParser for RdfDocumentParser {
    fn parse(
        &self,
        data: &[u8],
        content_type: Option<&str>,
        document: &str,
    ) -> Result<QuadCollection, ParseError> {
        let format = self.format_for(content_type, document);
        self.parse_reader(format, data, document)
    }
}

fn format_from_media_type(content_type: &str) -> Option<RdfFormat> {
    let media_type = content_type.split(';').next()?.trim();
    RdfFormat::from_media_type(media_type)
}

fn format_from_extension(document: &str) -> Option<RdfFormat> {
    let path = normalize_document_id(document).split('?').next()?;
    let (_, file_name) = path.rsplit_once('/')?;
    let (_, extension) = file_name.rsplit_once('.')?;
    RdfFormat::from_extension(extension)
}
