use crate::canvas::{render_plan, Canvas};
use crate::layout::{emit, LayoutConfig, LayoutResult, RenderPlan, TextLayout, TextSchema};
use crate::metrics::{DocumentId, FontProvider, MetricsCache, ResolvedFont};
use crate::{Mm, PDFError};

/// What happened when a batch of schemas was rendered. Schemas that failed were skipped
/// without affecting the others.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// How many schemas were drawn
    pub rendered: usize,
    /// The schemas that were skipped, by name, and why
    pub failures: Vec<(String, PDFError)>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One render pass over one logical document.
///
/// The session loads each font's metrics at most once, the first time a schema asks for
/// it, and forgets them again when it is dropped. A shared `&RenderSession` can lay out
/// independent schemas from several threads at once.
pub struct RenderSession<'p> {
    document: DocumentId,
    provider: &'p dyn FontProvider,
    cache: MetricsCache,
    config: LayoutConfig,
}

impl<'p> RenderSession<'p> {
    /// Start a session with its own metrics cache
    pub fn new(provider: &'p dyn FontProvider, config: LayoutConfig) -> RenderSession<'p> {
        RenderSession::with_cache(MetricsCache::new(), provider, config)
    }

    /// Start a session whose metrics live in `cache`, alongside those of other sessions.
    /// Only this session's entries are dropped when it ends.
    pub fn with_cache(
        cache: MetricsCache,
        provider: &'p dyn FontProvider,
        config: LayoutConfig,
    ) -> RenderSession<'p> {
        RenderSession {
            document: DocumentId::next(),
            provider,
            cache,
            config,
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Metrics for the named font, or for the fallback font if `name` is `None` or isn't
    /// in the provider's font set
    pub fn metrics(&self, name: Option<&str>) -> Result<ResolvedFont, PDFError> {
        let name = name.unwrap_or_else(|| self.provider.fallback_font());
        self.cache.resolve(self.document, name, self.provider)
    }

    /// Lay out `value` for `schema`
    pub fn layout(&self, schema: &TextSchema, value: &str) -> Result<LayoutResult, PDFError> {
        let font = self.metrics(schema.style.font_name.as_deref())?;
        Ok(TextLayout::new(font.metrics.as_ref(), &self.config).layout(schema, value))
    }

    /// Lay out `value` for `schema` and turn it into draw commands
    pub fn plan(&self, schema: &TextSchema, value: &str) -> Result<RenderPlan, PDFError> {
        self.plan_with(&self.config, schema, value)
    }

    fn plan_with(
        &self,
        config: &LayoutConfig,
        schema: &TextSchema,
        value: &str,
    ) -> Result<RenderPlan, PDFError> {
        let font = self.metrics(schema.style.font_name.as_deref())?;
        let layout = TextLayout::new(font.metrics.as_ref(), config).layout(schema, value);
        Ok(emit(schema, font.name, &layout, config))
    }

    /// Draw every `(schema, value)` pair onto `canvas`, starting at `base_page`. The
    /// canvas' own page height takes precedence over the configured one.
    ///
    /// A schema whose font can't be loaded, or that the canvas refuses to draw, is logged
    /// and skipped; the rest are still drawn.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        base_page: usize,
        fields: &[(&TextSchema, &str)],
    ) -> RenderReport {
        let config = match canvas.page_height(base_page) {
            Ok(height) => self.config.clone().with_page_height(Mm::from(height)),
            Err(_) => self.config.clone(),
        };

        let mut report = RenderReport::default();
        for (schema, value) in fields.iter() {
            let result = self
                .plan_with(&config, schema, value)
                .and_then(|plan| render_plan(canvas, base_page, &plan));
            match result {
                Ok(()) => report.rendered += 1,
                Err(e) => {
                    log::warn!("skipping `{}`: {e}", schema.name);
                    report.failures.push((schema.name.clone(), e));
                }
            }
        }
        report
    }
}

impl Drop for RenderSession<'_> {
    fn drop(&mut self) {
        self.cache.invalidate_document(self.document);
    }
}
