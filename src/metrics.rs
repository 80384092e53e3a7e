//! Font metrics for layout, and the session-scoped cache that hands them out.
//!
//! Layout never touches font files directly: it measures through the [FontMetrics]
//! trait. Metrics are obtained from a [FontProvider] (usually a [FontSet]) at most once
//! per document and font name, through a [MetricsCache].

use crate::{Document, Font, PDFError, Pt};
use moka::sync::Cache;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Horizontal and vertical metrics of a font, scaled linearly with the font size.
/// Implementations must be pure: the same grapheme and size always measure the same.
pub trait FontMetrics: Send + Sync {
    /// Advance width of one grapheme cluster at `size`
    fn advance_width(&self, grapheme: &str, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the font's typical glyphs
    fn ascent(&self, size: Pt) -> Pt;

    /// Distance from the baseline to the bottom of the font's typical glyphs.
    /// Note: this is usually negative
    fn descent(&self, size: Pt) -> Pt;

    /// Extra space the font asks for between lines
    fn line_gap(&self, size: Pt) -> Pt;

    /// Width of a run of text: the sum of its graphemes' advances, plus
    /// `character_spacing` between (but not after) graphemes
    fn measure(&self, text: &str, size: Pt, character_spacing: Pt) -> Pt {
        let (count, width) = text
            .graphemes(true)
            .fold((0usize, Pt(0.0)), |(count, width), g| {
                (count + 1, width + self.advance_width(g, size))
            });
        if count > 1 {
            width + character_spacing * (count - 1) as f32
        } else {
            width
        }
    }
}

/// Somewhere fonts can be loaded from by name
pub trait FontProvider: Send + Sync {
    /// Load the metrics for the named font. Fails with [PDFError::FontNotFound] when the
    /// name is absent from the active font set, or [PDFError::FontLoad] when the font is
    /// known but its data couldn't be fetched or parsed
    fn load_font(&self, name: &str) -> Result<Arc<dyn FontMetrics>, PDFError>;

    /// The font to substitute for names that aren't found
    fn fallback_font(&self) -> &str;
}

/// Where the bytes of a font live
#[derive(Debug, Clone)]
pub enum FontSource {
    /// The font file is already in memory
    Bytes(Vec<u8>),
    /// The font file is read from disk when first needed
    File(PathBuf),
}

/// A named collection of fonts with a designated fallback
#[derive(Debug, Clone)]
pub struct FontSet {
    sources: HashMap<String, FontSource>,
    fallback: String,
}

impl FontSet {
    /// Create a font set containing just the fallback font
    pub fn new<S: ToString>(fallback: S, source: FontSource) -> FontSet {
        let fallback = fallback.to_string();
        let mut sources = HashMap::new();
        sources.insert(fallback.clone(), source);
        FontSet { sources, fallback }
    }

    /// Add (or replace) a font in the set
    pub fn insert<S: ToString>(&mut self, name: S, source: FontSource) -> &mut Self {
        self.sources.insert(name.to_string(), source);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Names of every font in the set, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fetch and parse the named font
    pub fn load(&self, name: &str) -> Result<Font, PDFError> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| PDFError::FontNotFound(name.to_string()))?;

        let bytes = match source {
            FontSource::Bytes(bytes) => bytes.clone(),
            FontSource::File(path) => std::fs::read(path).map_err(|e| PDFError::FontLoad {
                name: name.to_string(),
                source: Arc::new(e.into()),
            })?,
        };

        Font::load(bytes).map_err(|e| PDFError::FontLoad {
            name: name.to_string(),
            source: Arc::new(e),
        })
    }

    /// Load every font in the set and register it with `document` under its name, so
    /// text laid out with this set can be drawn there
    pub fn embed_into(&self, document: &mut Document) -> Result<(), PDFError> {
        for name in self.names() {
            let font = self.load(name)?;
            document.add_font(name, font);
        }
        Ok(())
    }
}

impl FontProvider for FontSet {
    fn load_font(&self, name: &str) -> Result<Arc<dyn FontMetrics>, PDFError> {
        log::debug!("loading font `{name}`");
        Ok(Arc::new(self.load(name)?))
    }

    fn fallback_font(&self) -> &str {
        &self.fallback
    }
}

/// Identifies one logical document (one render pass) in a [MetricsCache]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Allocate an id that no other document in this process has used
    pub fn next() -> DocumentId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        DocumentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Metrics for a font name, after fallback substitution. `name` is the font that was
/// actually loaded, which the renderer must draw with so drawing matches measuring.
#[derive(Clone)]
pub struct ResolvedFont {
    pub name: Arc<str>,
    pub metrics: Arc<dyn FontMetrics>,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetricsKey {
    document: DocumentId,
    font: String,
}

/// Font metrics keyed by (document, font name). Reads are concurrent, and each key is
/// populated at most once: concurrent callers asking for the same missing key wait for
/// the first caller's load instead of loading again.
#[derive(Clone)]
pub struct MetricsCache {
    entries: Cache<MetricsKey, ResolvedFont>,
}

impl Default for MetricsCache {
    fn default() -> Self {
        MetricsCache::new()
    }
}

impl MetricsCache {
    pub fn new() -> MetricsCache {
        MetricsCache {
            entries: Cache::builder().support_invalidation_closures().build(),
        }
    }

    /// Get the metrics for `name` in `document`, loading them through `provider` if this
    /// is the first request. Names the provider doesn't know resolve to its fallback font.
    pub fn resolve(
        &self,
        document: DocumentId,
        name: &str,
        provider: &dyn FontProvider,
    ) -> Result<ResolvedFont, PDFError> {
        match self.resolve_exact(document, name, provider) {
            Err(PDFError::FontNotFound(missing)) if missing != provider.fallback_font() => {
                let fallback = provider.fallback_font();
                log::warn!("font `{missing}` not found, substituting `{fallback}`");
                let resolved = self.resolve_exact(document, fallback, provider)?;
                self.entries.insert(
                    MetricsKey {
                        document,
                        font: name.to_string(),
                    },
                    resolved.clone(),
                );
                Ok(resolved)
            }
            other => other,
        }
    }

    fn resolve_exact(
        &self,
        document: DocumentId,
        name: &str,
        provider: &dyn FontProvider,
    ) -> Result<ResolvedFont, PDFError> {
        let key = MetricsKey {
            document,
            font: name.to_string(),
        };
        self.entries
            .try_get_with(key, || {
                provider.load_font(name).map(|metrics| ResolvedFont {
                    name: Arc::from(name),
                    metrics,
                })
            })
            .map_err(|err| match Arc::try_unwrap(err) {
                Ok(err) => err,
                Err(shared) => match shared.as_ref() {
                    PDFError::FontNotFound(missing) => PDFError::FontNotFound(missing.clone()),
                    _ => PDFError::FontLoad {
                        name: name.to_string(),
                        source: shared,
                    },
                },
            })
    }

    /// Whether metrics for this document and font name have been loaded
    pub fn contains(&self, document: DocumentId, name: &str) -> bool {
        self.entries.contains_key(&MetricsKey {
            document,
            font: name.to_string(),
        })
    }

    /// Drop every entry belonging to one document, typically when its render pass ends
    pub fn invalidate_document(&self, document: DocumentId) {
        if let Err(e) = self
            .entries
            .invalidate_entries_if(move |key, _| key.document == document)
        {
            log::warn!("falling back to clearing the whole metrics cache: {e}");
            self.entries.invalidate_all();
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MonoMetrics;
    use std::sync::atomic::AtomicUsize;

    struct CountingProvider {
        loads: AtomicUsize,
    }

    impl FontProvider for CountingProvider {
        fn load_font(&self, name: &str) -> Result<Arc<dyn FontMetrics>, PDFError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            match name {
                "Mono" | "Fallback" => {
                    std::thread::sleep(std::time::Duration::from_millis(10));
                    Ok(Arc::new(MonoMetrics::default()))
                }
                "Broken" => Err(PDFError::FontLoad {
                    name: name.to_string(),
                    source: Arc::new(PDFError::Io(std::io::Error::other("connection reset"))),
                }),
                _ => Err(PDFError::FontNotFound(name.to_string())),
            }
        }

        fn fallback_font(&self) -> &str {
            "Fallback"
        }
    }

    fn provider() -> CountingProvider {
        CountingProvider {
            loads: AtomicUsize::new(0),
        }
    }

    #[test]
    fn measure_adds_spacing_between_graphemes_only() {
        let metrics = MonoMetrics::default();
        assert_eq!(metrics.measure("", Pt(10.0), Pt(1.0)), Pt(0.0));
        assert_eq!(metrics.measure("a", Pt(10.0), Pt(1.0)), Pt(5.0));
        assert_eq!(metrics.measure("abc", Pt(10.0), Pt(1.0)), Pt(17.0));
        // a combining sequence is one grapheme, so one advance and no extra spacing
        assert_eq!(metrics.measure("e\u{301}", Pt(10.0), Pt(1.0)), Pt(5.0));
    }

    #[test]
    fn concurrent_requests_load_once() {
        let cache = MetricsCache::new();
        let provider = provider();
        let doc = DocumentId::next();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let resolved = cache.resolve(doc, "Mono", &provider).unwrap();
                    assert_eq!(&*resolved.name, "Mono");
                });
            }
        });

        assert_eq!(provider.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_fonts_fall_back() {
        let cache = MetricsCache::new();
        let provider = provider();
        let doc = DocumentId::next();

        let resolved = cache.resolve(doc, "Comic Sans", &provider).unwrap();
        assert_eq!(&*resolved.name, "Fallback");
        assert!(cache.contains(doc, "Comic Sans"));

        // the substitution is remembered
        let loads = provider.loads.load(Ordering::SeqCst);
        cache.resolve(doc, "Comic Sans", &provider).unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), loads);
    }

    #[test]
    fn load_failures_are_surfaced() {
        let cache = MetricsCache::new();
        let provider = provider();
        let err = cache
            .resolve(DocumentId::next(), "Broken", &provider)
            .unwrap_err();
        assert!(matches!(err, PDFError::FontLoad { ref name, .. } if name == "Broken"));
    }

    #[test]
    fn documents_are_isolated() {
        let cache = MetricsCache::new();
        let provider = provider();
        let first = DocumentId::next();
        let second = DocumentId::next();

        cache.resolve(first, "Mono", &provider).unwrap();
        cache.resolve(second, "Mono", &provider).unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), 2);

        cache.invalidate_document(first);
        cache.entries.run_pending_tasks();
        assert!(!cache.contains(first, "Mono"));
        assert!(cache.contains(second, "Mono"));
    }

    #[test]
    fn font_set_reports_unknown_names() {
        let set = FontSet::new("Body", FontSource::Bytes(Vec::new()));
        assert!(set.contains("Body"));
        assert!(matches!(set.load("Heading"), Err(PDFError::FontNotFound(_))));
        // empty bytes aren't a font
        assert!(matches!(set.load("Body"), Err(PDFError::FontLoad { .. })));
        assert_eq!(set.names(), vec!["Body"]);
    }

    #[test]
    fn font_set_surfaces_io_failures() {
        let set = FontSet::new(
            "Body",
            FontSource::File(PathBuf::from("/definitely/not/here.ttf")),
        );
        match set.load("Body") {
            Err(PDFError::FontLoad { source, .. }) => {
                assert!(matches!(*source, PDFError::Io(_)))
            }
            other => panic!("expected a load failure, got {other:?}"),
        }
    }
}
