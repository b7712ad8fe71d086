//! Citation and bibliography generation entry points.
//!
//! A generation run normalizes the records with the collection's dialect,
//! hands the resulting variable maps to the style processor, and formats
//! the processor's fragments into the requested encoding. The `try_*`
//! methods report failures as [`Error`]s; the plain methods never fail and
//! return a localized message instead.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::{format, format_citation};
use crate::l10n::{GENERATION_FAILED, Localization, MessageCatalog};
use crate::normalize::Normalizer;
use crate::processor::StyleProcessor;
use crate::record::{Collection, Record};
use crate::types::{Encoding, RenderMode};
use crate::variable::VariableMap;

pub struct CitationGenerator<P, L = MessageCatalog> {
    processor: P,
    localization: L,
}

impl<P: StyleProcessor> CitationGenerator<P> {
    pub fn new(processor: P) -> Self {
        CitationGenerator {
            processor,
            localization: MessageCatalog::default(),
        }
    }
}

impl<P: StyleProcessor, L: Localization> CitationGenerator<P, L> {
    /// Replace the message source used for failure messages.
    pub fn with_localization<M: Localization>(self, localization: M) -> CitationGenerator<P, M> {
        CitationGenerator {
            processor: self.processor,
            localization,
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Render one in-text citation for all `records`.
    pub fn try_generate_citation(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
    ) -> Result<String> {
        let fragments = self.render(records, style_source, encoding, collection, RenderMode::Citation)?;
        match fragments.as_slice() {
            [fragment] => Ok(format_citation(fragment, encoding)),
            _ => Err(Error::EntryCountMismatch {
                mode: RenderMode::Citation,
                expected: 1,
                found: fragments.len(),
            }),
        }
    }

    /// Render one bibliography entry per record, in input order.
    pub fn try_generate_bibliography(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
    ) -> Result<Vec<String>> {
        let fragments = self.render(
            records,
            style_source,
            encoding,
            collection,
            RenderMode::Bibliography,
        )?;
        if fragments.len() != records.len() {
            return Err(Error::EntryCountMismatch {
                mode: RenderMode::Bibliography,
                expected: records.len(),
                found: fragments.len(),
            });
        }
        Ok(fragments
            .iter()
            .map(|fragment| format(fragment, encoding))
            .collect())
    }

    /// Like [`Self::try_generate_citation`], returning the localized failure
    /// message on error.
    pub fn generate_citation(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
    ) -> String {
        self.try_generate_citation(records, style_source, encoding, collection)
            .unwrap_or_else(|err| self.failure_message(&err))
    }

    /// Like [`Self::try_generate_bibliography`]. On error the result is a
    /// single entry holding the localized failure message.
    pub fn generate_bibliography(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
    ) -> Vec<String> {
        self.try_generate_bibliography(records, style_source, encoding, collection)
            .unwrap_or_else(|err| vec![self.failure_message(&err)])
    }

    /// The bibliography entries concatenated into one string.
    pub fn generate_bibliography_string(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
    ) -> String {
        self.generate_bibliography(records, style_source, encoding, collection)
            .concat()
    }

    fn render(
        &self,
        records: &[Record],
        style_source: &str,
        encoding: Encoding,
        collection: &Collection,
        mode: RenderMode,
    ) -> Result<Vec<String>> {
        let mut items: Vec<VariableMap> =
            Normalizer::new(collection.dialect(), encoding).normalize_all(records, collection);
        // processors insert values into markup
        if encoding == Encoding::Plain {
            items = items.iter().map(VariableMap::to_markup).collect();
        }
        debug!(%mode, items = items.len(), %encoding, "rendering with style processor");
        Ok(self.processor.render(&items, style_source, mode)?)
    }

    fn failure_message(&self, err: &Error) -> String {
        warn!(code = err.code(), error = %err, "citation generation failed");
        self.localization.lookup(GENERATION_FAILED)
    }
}
