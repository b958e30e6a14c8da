//! Window resize listeners and per-node resize observers.
//!
//! Both deliver [`ResizeEvent`]s over unbounded channels. A closed channel
//! unregisters its listener the next time a notification is sent.

use schism_traits::{ResizeEvent, Viewport};
use tokio::sync::mpsc::UnboundedSender;

use crate::BaseDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeListenerId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeObserverId(usize);

pub(crate) struct ResizeObservation {
    node_id: usize,
    /// Size reported by the last notification. `None` until first laid out.
    last_size: Option<(f32, f32)>,
    sender: UnboundedSender<ResizeEvent>,
}

impl BaseDocument {
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let changed = self.viewport.size_differs(&viewport);
        self.viewport = viewport;
        if changed {
            let event = self.window_resize_event();
            self.resize_listeners
                .retain(|_, sender| sender.send(event).is_ok());
        }
    }

    pub fn add_resize_listener(&mut self, sender: UnboundedSender<ResizeEvent>) -> ResizeListenerId {
        ResizeListenerId(self.resize_listeners.insert(sender))
    }

    /// Returns `false` if the listener was already gone
    pub fn remove_resize_listener(&mut self, id: ResizeListenerId) -> bool {
        self.resize_listeners.try_remove(id.0).is_some()
    }

    /// Watch the laid out size of `node_id`.
    ///
    /// The first layout pass that sizes the node always notifies, after that
    /// only actual size changes do.
    pub fn observe_resize(
        &mut self,
        node_id: usize,
        sender: UnboundedSender<ResizeEvent>,
    ) -> ResizeObserverId {
        ResizeObserverId(self.resize_observers.insert(ResizeObservation {
            node_id,
            last_size: None,
            sender,
        }))
    }

    pub fn unobserve_resize(&mut self, id: ResizeObserverId) -> bool {
        self.resize_observers.try_remove(id.0).is_some()
    }

    pub(crate) fn notify_resize_observers(&mut self) {
        let nodes = &self.nodes;
        self.resize_observers.retain(|_, observation| {
            let size = nodes
                .get(observation.node_id)
                .and_then(|node| node.final_layout)
                .map(|layout| (layout.width, layout.height));
            let Some((width, height)) = size else {
                return !observation.sender.is_closed();
            };
            if observation.last_size == Some((width, height)) {
                return !observation.sender.is_closed();
            }
            observation.last_size = Some((width, height));
            observation
                .sender
                .send(ResizeEvent::observed(observation.node_id, width, height))
                .is_ok()
        });
    }
}
