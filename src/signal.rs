//! Readiness signals and the in-process channel that delivers them.
//!
//! A factory element announces its finished contribution exactly once, at
//! connection time, as a [`Signal`]. Signals do not bubble through a
//! platform tree; the composer resolves each one to a delivery [`Scope`]
//! (the nearest enclosing marker, or the host) and queues it on a
//! [`SignalChannel`], then drains the queue in emission order. Handlers
//! never emit signals of their own, so a drain cannot re-enter itself.

#[cfg(test)]
#[path = "signal_test.rs"]
mod signal_test;

use std::collections::VecDeque;

use crate::element::Content;
use crate::engine::MarkerId;
use crate::icon::IconDescriptor;
use crate::overlay::TooltipDescriptor;

/// A one-shot readiness signal from a connected element.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A default icon finished constructing.
    Icon(IconDescriptor),
    /// A hover icon finished constructing.
    HoverIcon(IconDescriptor),
    /// Popup content was captured.
    Popup(Content),
    /// Tooltip content was captured.
    Tooltip(TooltipDescriptor),
    /// A marker announced itself; carries the live marker handle.
    Marker(MarkerId),
}

impl Signal {
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Icon(_) => SignalKind::Icon,
            Self::HoverIcon(_) => SignalKind::HoverIcon,
            Self::Popup(_) => SignalKind::Popup,
            Self::Tooltip(_) => SignalKind::Tooltip,
            Self::Marker(_) => SignalKind::Marker,
        }
    }
}

/// The kind tag of a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Icon,
    HoverIcon,
    Popup,
    Tooltip,
    Marker,
}

/// Where a signal is delivered: the nearest marker enclosing the source
/// element, or the host when no marker encloses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Marker(MarkerId),
    Host,
}

/// A signal together with its resolved delivery scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub scope: Scope,
    pub signal: Signal,
}

/// Ordered delivery queue for readiness signals.
#[derive(Debug, Default)]
pub struct SignalChannel {
    queue: VecDeque<Envelope>,
}

impl SignalChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a signal for delivery to `scope`.
    pub fn emit(&mut self, scope: Scope, signal: Signal) {
        self.queue.push_back(Envelope { scope, signal });
    }

    /// Next envelope in emission order.
    pub fn pop(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
