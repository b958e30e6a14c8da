use std::time::{Duration, Instant};

use schism_dom::{BaseDocument, DomError, ResizeListenerId, ResizeObserverId};
use schism_traits::ResizeEvent;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, error, trace, warn};

use crate::chars::split_chars;
use crate::debounce::Debouncer;
use crate::lines::{reference_font_size, split_lines};
use crate::probe::{GeometryProbe, LayoutProbe};
use crate::snapshot::SourceSnapshot;
use crate::tokenizer::tokenize;
use crate::units::{UnitTemplates, build_words};
use crate::{
    ConfigError, DEFAULT_RESIZE_DEBOUNCE_MS, Mutation, SchismOptions, SplitResult,
    ValidatedOptions,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    /// Construction failed validation. Nothing was touched and nothing is bound.
    Inert(ConfigError),
    Ready,
    /// Torn down. The host holds its original content again.
    Destroyed,
}

struct ResizeBindings {
    listener: ResizeListenerId,
    observer: ResizeObserverId,
    events: UnboundedReceiver<ResizeEvent>,
}

/// Keeps a host element split into units and re-splits it after resizes.
///
/// A `Schism` does not own the document. Every operation that touches the
/// render tree borrows it, and the host must not be mutated by anyone else
/// between rebuilds.
pub struct Schism {
    target: Option<usize>,
    options: SchismOptions,
    config: Option<ValidatedOptions>,
    snapshot: Option<SourceSnapshot>,
    state: LifecycleState,
    result: SplitResult,
    debouncer: Debouncer,
    bindings: Option<ResizeBindings>,
    probe: Box<dyn GeometryProbe>,
}

impl Schism {
    /// Validate the options, split `target` and start listening for resizes.
    ///
    /// Invalid configuration is logged and leaves the instance inert rather
    /// than failing. Check [`Schism::is_inert`] before relying on the units.
    pub fn new(doc: &mut BaseDocument, target: Option<usize>, options: SchismOptions) -> Self {
        Self::with_probe(doc, target, options, Box::new(LayoutProbe))
    }

    /// Like [`Schism::new`], measuring line mode words with `probe`
    pub fn with_probe(
        doc: &mut BaseDocument,
        target: Option<usize>,
        options: SchismOptions,
        probe: Box<dyn GeometryProbe>,
    ) -> Self {
        let mut schism = Self {
            target,
            options,
            config: None,
            snapshot: None,
            state: LifecycleState::Ready,
            result: SplitResult::default(),
            debouncer: Debouncer::new(Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS)),
            bindings: None,
            probe,
        };

        let (host, config) = match validate(doc, target, &schism.options) {
            Ok(validated) => validated,
            Err(err) => {
                error!("{err}");
                schism.state = LifecycleState::Inert(err);
                return schism;
            }
        };

        match SourceSnapshot::capture(doc, host) {
            Ok(snapshot) => schism.snapshot = Some(snapshot),
            Err(err) => {
                error!("could not capture split target {host}: {err}");
                schism.state = LifecycleState::Inert(ConfigError::UnknownTarget(host));
                return schism;
            }
        }
        schism.config = Some(config);
        schism.debouncer = Debouncer::new(config.resize_debounce);

        schism.split(doc);
        schism.bind(doc, host);
        schism
    }

    /// Rebuild the units from the pristine snapshot.
    ///
    /// The previous result is discarded first, even if the rebuild then fails.
    /// A no-op on inert or destroyed instances.
    pub fn split(&mut self, doc: &mut BaseDocument) {
        self.rebuild(doc);
    }

    /// Returns whether new units were built
    fn rebuild(&mut self, doc: &mut BaseDocument) -> bool {
        if self.state != LifecycleState::Ready {
            warn!("split called on a {} instance, ignoring", self.state_name());
            return false;
        }
        let (Some(host), Some(config), Some(snapshot)) =
            (self.target, self.config, self.snapshot.as_ref())
        else {
            return false;
        };

        self.result = SplitResult::default();
        if let Err(err) = snapshot.restore(doc, host) {
            warn!("split target {host} is gone, skipping rebuild: {err}");
            return false;
        }
        let markup = doc.inner_html(host);
        let tokens = tokenize(&markup);

        let templates = match UnitTemplates::new(doc, config.overflow) {
            Ok(templates) => templates,
            Err(err) => {
                warn!("could not build unit templates: {err}");
                return false;
            }
        };
        let built = self.build_units(doc, host, config, snapshot, &tokens, &templates);
        templates.release(doc);

        match built {
            Ok(result) => {
                debug!(
                    host,
                    mutation = %config.mutation,
                    tokens = tokens.len(),
                    units = result.units().len(),
                    outers = result.outers().len(),
                    "split host"
                );
                self.result = result;
                true
            }
            Err(err) => {
                warn!("splitting host {host} failed: {err}");
                false
            }
        }
    }

    fn build_units(
        &self,
        doc: &mut BaseDocument,
        host: usize,
        config: ValidatedOptions,
        snapshot: &SourceSnapshot,
        tokens: &[&str],
        templates: &UnitTemplates,
    ) -> Result<SplitResult, DomError> {
        let words = build_words(doc, host, tokens, templates)?;
        match config.mutation {
            Mutation::Words => Ok(words),
            Mutation::Chars => split_chars(doc, &words, templates),
            Mutation::Lines => {
                let font_size = reference_font_size(doc, host, snapshot);
                split_lines(
                    doc,
                    host,
                    &words,
                    templates,
                    font_size,
                    config.line_threshold_ratio,
                    self.probe.as_ref(),
                )
            }
        }
    }

    /// Listen for window resizes and for size changes of the host's parent
    /// element (or the host itself when it has none).
    fn bind(&mut self, doc: &mut BaseDocument, host: usize) {
        let observed = doc
            .get_node(host)
            .and_then(|node| node.parent)
            .filter(|parent| doc.nodes[*parent].is_element())
            .unwrap_or(host);

        let (sender, events) = unbounded_channel();
        let listener = doc.add_resize_listener(sender.clone());
        let observer = doc.observe_resize(observed, sender);
        trace!(host, observed, "bound resize handlers");

        self.bindings = Some(ResizeBindings {
            listener,
            observer,
            events,
        });
    }

    /// Schedule a rebuild one debounce delay after `now`, replacing any pending one
    pub fn handle_resize(&mut self, now: Instant) {
        if self.state == LifecycleState::Ready {
            self.debouncer.trigger(now);
        }
    }

    /// Drain pending resize notifications, then rebuild if the debounce delay
    /// has elapsed.
    ///
    /// Returns `true` if a rebuild ran and built units. Call this from the host's event loop,
    /// at least as often as [`Schism::next_deadline`] requires.
    ///
    /// Notifications carry no timestamp: any that arrived since the last poll
    /// count as one trigger at `now`. A poll that comes late with new
    /// notifications therefore pushes back a rebuild that was already due,
    /// the same as a resize landing just before a browser timer fires.
    pub fn poll(&mut self, doc: &mut BaseDocument, now: Instant) -> bool {
        let mut received = 0;
        if let Some(bindings) = self.bindings.as_mut() {
            while let Ok(event) = bindings.events.try_recv() {
                trace!(?event, "resize");
                received += 1;
            }
        }
        if received > 0 {
            self.handle_resize(now);
        }

        self.debouncer.fire_if_due(now) && self.rebuild(doc)
    }

    /// When the pending rebuild is due, if one is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Unbind the resize handlers and put the original content back.
    ///
    /// The instance cannot be used again afterwards. The unit ids it handed out
    /// refer to dropped nodes, so the result is cleared.
    pub fn destroy(&mut self, doc: &mut BaseDocument) {
        if self.state == LifecycleState::Destroyed {
            warn!("destroy called twice, ignoring");
            return;
        }

        if let Some(bindings) = self.bindings.take() {
            doc.remove_resize_listener(bindings.listener);
            doc.unobserve_resize(bindings.observer);
        }
        self.debouncer.cancel();

        if let (Some(host), Some(snapshot)) = (self.target, self.snapshot.as_ref()) {
            if let Err(err) = snapshot.restore(doc, host) {
                warn!("could not restore split target {host}: {err}");
            }
        }
        self.result = SplitResult::default();
        self.state = LifecycleState::Destroyed;
        debug!(host = ?self.target, "destroyed");
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_inert(&self) -> bool {
        matches!(self.state, LifecycleState::Inert(_))
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.state {
            LifecycleState::Inert(err) => Some(err),
            _ => None,
        }
    }

    pub fn result(&self) -> &SplitResult {
        &self.result
    }

    pub fn units(&self) -> &[usize] {
        self.result.units()
    }

    pub fn outers(&self) -> &[usize] {
        self.result.outers()
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn options(&self) -> &SchismOptions {
        &self.options
    }

    /// `None` unless construction succeeded
    pub fn mutation(&self) -> Option<Mutation> {
        self.config.map(|config| config.mutation)
    }

    pub fn snapshot(&self) -> Option<&SourceSnapshot> {
        self.snapshot.as_ref()
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            LifecycleState::Inert(_) => "inert",
            LifecycleState::Ready => "ready",
            LifecycleState::Destroyed => "destroyed",
        }
    }
}

fn validate(
    doc: &BaseDocument,
    target: Option<usize>,
    options: &SchismOptions,
) -> Result<(usize, ValidatedOptions), ConfigError> {
    let host = target.ok_or(ConfigError::MissingTarget)?;
    if !doc.get_node(host).is_some_and(|node| node.is_element()) {
        return Err(ConfigError::UnknownTarget(host));
    }
    Ok((host, options.validate()?))
}

#[cfg(test)]
mod tests {
    use schism_dom::DocumentConfig;
    use schism_html::set_inner_html;

    use super::*;

    fn doc_with_paragraph(markup: &str) -> (BaseDocument, usize) {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutator = doc.mutate();
        let root = mutator.doc.root_id();
        let host = mutator.create_html_element("p", vec![]);
        mutator.append_children(root, &[host]);
        set_inner_html(&mut doc, host, markup).unwrap();
        (doc, host)
    }

    #[test]
    fn missing_target_is_inert() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let schism = Schism::new(&mut doc, None, SchismOptions::default());
        assert_eq!(schism.config_error(), Some(&ConfigError::MissingTarget));
        assert!(schism.result().is_empty());
        assert_eq!(schism.mutation(), None);
    }

    #[test]
    fn text_nodes_are_not_targets() {
        let (mut doc, host) = doc_with_paragraph("ab");
        let text = doc.nodes[host].children[0];
        let schism = Schism::new(&mut doc, Some(text), SchismOptions::default());
        assert_eq!(schism.config_error(), Some(&ConfigError::UnknownTarget(text)));
        assert_eq!(doc.inner_html(host), "ab");
    }

    #[test]
    fn inert_instances_ignore_resizes() {
        let (mut doc, host) = doc_with_paragraph("ab");
        let options = SchismOptions::default().with_overflow("clip");
        let mut schism = Schism::new(&mut doc, Some(host), options);
        assert!(schism.is_inert());

        schism.handle_resize(Instant::now());
        assert_eq!(schism.next_deadline(), None);
        assert!(!schism.poll(&mut doc, Instant::now() + Duration::from_secs(1)));
    }

    #[test]
    fn resize_events_schedule_a_rebuild() {
        let (mut doc, host) = doc_with_paragraph("ab cd");
        let mut schism = Schism::new(&mut doc, Some(host), SchismOptions::default());
        assert_eq!(schism.state(), &LifecycleState::Ready);
        assert_eq!(schism.mutation(), Some(Mutation::Words));

        let t0 = Instant::now();
        schism.handle_resize(t0);
        assert_eq!(schism.next_deadline(), Some(t0 + Duration::from_millis(200)));
        assert!(schism.poll(&mut doc, t0 + Duration::from_millis(200)));
        assert_eq!(schism.result().unit_texts(&doc), ["ab", "cd"]);
    }

    #[test]
    fn late_polls_with_new_events_push_the_rebuild_back() {
        let (mut doc, host) = doc_with_paragraph("ab cd");
        let mut schism = Schism::new(&mut doc, Some(host), SchismOptions::default());
        let t0 = Instant::now();
        let ms = Duration::from_millis;

        schism.handle_resize(t0);
        doc.set_viewport(schism_traits::Viewport::new(400, 600, 1.0));

        // The first deadline has passed, but the pending notification re-arms it
        assert!(!schism.poll(&mut doc, t0 + ms(500)));
        assert_eq!(schism.next_deadline(), Some(t0 + ms(700)));
        assert!(schism.poll(&mut doc, t0 + ms(700)));
    }
}
